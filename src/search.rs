//! # Search Module
//!
//! Ingredient search over a recipe collection: match every recipe against
//! the pantry, filter, then rank.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_engine::recipe_model::Recipe;
//! use recipe_engine::ranking::SortBy;
//! use recipe_engine::search::{search, SearchRequest};
//!
//! let recipes = vec![
//!     Recipe::new("recipe-001", "Tomato Soup")
//!         .with_cuisine("italian")
//!         .with_ingredient_names(&["tomato", "onion", "garlic"]),
//!     Recipe::new("recipe-002", "Tacos")
//!         .with_cuisine("mexican")
//!         .with_ingredient_names(&["tortilla", "beef"]),
//! ];
//!
//! let request = SearchRequest::new(&["tomatoes", "onion"])
//!     .with_sort_by(SortBy::BestMatch)
//!     .with_min_match_percentage(1);
//! let response = search(&recipes, &request);
//!
//! assert_eq!(response.total, 1);
//! assert_eq!(response.results[0].match_result.match_percentage, 67);
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::engine_config::{EngineConfig, DEFAULT_MIN_MATCH_PERCENTAGE};
use crate::filters::apply_filters;
use crate::ingredient_matcher::{MatchResult, Pantry};
use crate::ranking::{rank_in_place, SortBy};
use crate::recipe_model::Recipe;

/// Parameters for one ingredient search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub pantry_ingredients: Vec<String>,
    /// Cuisine to keep; `None` or "all" disables the filter
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Tags every result must carry
    #[serde(default)]
    pub dietary_filters: Vec<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default = "default_min_match")]
    pub min_match_percentage: u8,
    /// Page size; `None` returns every hit
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

fn default_min_match() -> u8 {
    DEFAULT_MIN_MATCH_PERCENTAGE
}

/// A recipe paired with how well the pantry covers it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit<'a> {
    pub recipe: &'a Recipe,
    pub match_result: MatchResult,
}

/// Ranked results plus the number of hits before paging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse<'a> {
    pub results: Vec<SearchHit<'a>>,
    pub total: usize,
}

impl SearchRequest {
    pub fn new<S: AsRef<str>>(pantry: &[S]) -> Self {
        Self {
            pantry_ingredients: pantry.iter().map(|s| s.as_ref().to_string()).collect(),
            cuisine: None,
            dietary_filters: Vec::new(),
            sort_by: SortBy::default(),
            min_match_percentage: DEFAULT_MIN_MATCH_PERCENTAGE,
            limit: None,
            offset: 0,
        }
    }

    /// Start from the configured defaults
    pub fn from_config<S: AsRef<str>>(pantry: &[S], config: &EngineConfig) -> Self {
        Self::new(pantry).with_min_match_percentage(config.min_match_percentage)
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = Some(cuisine.to_string());
        self
    }

    pub fn with_dietary_filter(mut self, tag: &str) -> Self {
        self.dietary_filters.push(tag.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Set the ordering from a raw key, reporting unsupported keys
    pub fn with_sort_key(mut self, raw: &str, diagnostics: &dyn Diagnostics) -> Self {
        self.sort_by = SortBy::parse_or_default(raw, diagnostics);
        self
    }

    /// Minimum match percentage, capped at 100
    pub fn with_min_match_percentage(mut self, min: u8) -> Self {
        self.min_match_percentage = min.min(100);
        self
    }

    pub fn with_page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}

/// Run an ingredient search over `recipes`
///
/// Never fails: an empty or unusable pantry simply yields hits at 0%, which
/// any positive minimum filters out.
pub fn search<'a>(recipes: &'a [Recipe], request: &SearchRequest) -> SearchResponse<'a> {
    let pantry = Pantry::new(request.pantry_ingredients.as_slice());

    let hits: Vec<SearchHit<'a>> = recipes
        .iter()
        .map(|recipe| SearchHit {
            recipe,
            match_result: pantry.match_recipe(recipe),
        })
        .collect();

    let mut filtered = apply_filters(hits, request);
    rank_in_place(&mut filtered, request.sort_by);

    let total = filtered.len();
    let results: Vec<SearchHit<'a>> = filtered
        .into_iter()
        .skip(request.offset)
        .take(request.limit.unwrap_or(usize::MAX))
        .collect();

    info!(
        "Search over {} recipes with {} pantry items: {} hits, returning {}",
        recipes.len(),
        pantry.len(),
        total,
        results.len()
    );

    SearchResponse { results, total }
}
