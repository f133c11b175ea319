//! # Recipe Retrieval Engine
//!
//! Ingredient-based recipe search and resilient recipe-identifier resolution
//! for a meal-planning application. The engine is pure: it takes an
//! in-memory recipe collection and a request, and returns fresh results
//! without I/O or shared state, so it can be called from any number of
//! threads at once.

pub mod diagnostics;
pub mod engine_config;
pub mod engine_errors;
pub mod filters;
pub mod id_resolver;
pub mod ingredient_matcher;
pub mod normalizer;
pub mod ranking;
pub mod recipe_model;
pub mod recommender;
pub mod search;
pub mod similarity;

pub use engine_config::EngineConfig;
pub use engine_errors::EngineError;
pub use id_resolver::{IdResolution, IdResolver, MatchType, Suggestion};
pub use ingredient_matcher::MatchResult;
pub use ranking::SortBy;
pub use recipe_model::{Difficulty, Ingredient, MealType, Recipe};
pub use search::{search, SearchHit, SearchRequest, SearchResponse};
