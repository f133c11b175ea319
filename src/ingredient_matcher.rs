//! # Ingredient Matcher
//!
//! Computes how much of a recipe a user's pantry covers. A recipe ingredient
//! counts as available when its normalized name and some normalized pantry
//! entry are equal or one contains the other, so "tomato" covers "tomatoes"
//! and "oil" covers "olive oil".
//!
//! ## Usage
//!
//! ```rust
//! use recipe_engine::ingredient_matcher::match_ingredients;
//! use recipe_engine::recipe_model::Ingredient;
//!
//! let ingredients = vec![
//!     Ingredient::new("tomato"),
//!     Ingredient::new("onion"),
//!     Ingredient::new("garlic"),
//! ];
//! let result = match_ingredients(&["tomato", "onion"], &ingredients);
//!
//! assert_eq!(result.match_percentage, 67);
//! assert_eq!(result.missing_ingredients, vec!["garlic".to_string()]);
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::normalizer::normalize_ingredient_name;
use crate::recipe_model::{Ingredient, Recipe};

/// How well a pantry covers one recipe
///
/// `available_ingredients` and `missing_ingredients` partition the recipe's
/// ingredient names, in recipe order and with their original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub recipe_id: Option<String>,
    /// Rounded percentage of recipe ingredients available, 0..=100
    pub match_percentage: u8,
    pub available_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
}

/// A pantry whose entries have already been normalized
///
/// Build it once per request and reuse it across every recipe.
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    /// Normalize the raw pantry entries, dropping any that normalize to nothing
    pub fn new<S: AsRef<str>>(raw_items: &[S]) -> Self {
        let items: Vec<String> = raw_items
            .iter()
            .map(|item| normalize_ingredient_name(item.as_ref()))
            .filter(|item| !item.is_empty())
            .collect();
        debug!(
            "Normalized pantry: {} of {} entries usable",
            items.len(),
            raw_items.len()
        );
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Whether some pantry entry satisfies the given ingredient name
    ///
    /// An ingredient that normalizes to nothing is never satisfied.
    pub fn covers(&self, ingredient_name: &str) -> bool {
        let token = normalize_ingredient_name(ingredient_name);
        if token.is_empty() {
            return false;
        }
        self.items
            .iter()
            .any(|item| *item == token || token.contains(item.as_str()) || item.contains(token.as_str()))
    }

    /// Match this pantry against a list of recipe ingredients
    pub fn match_ingredients(&self, ingredients: &[Ingredient]) -> MatchResult {
        if ingredients.is_empty() {
            return MatchResult {
                recipe_id: None,
                match_percentage: 0,
                available_ingredients: Vec::new(),
                missing_ingredients: Vec::new(),
            };
        }

        if self.is_empty() {
            return MatchResult {
                recipe_id: None,
                match_percentage: 0,
                available_ingredients: Vec::new(),
                missing_ingredients: ingredients.iter().map(|i| i.name.clone()).collect(),
            };
        }

        let (available, missing): (Vec<&Ingredient>, Vec<&Ingredient>) =
            ingredients.iter().partition(|i| self.covers(&i.name));

        let match_percentage = percentage(available.len(), ingredients.len());
        trace!(
            "Matched {}/{} ingredients ({}%)",
            available.len(),
            ingredients.len(),
            match_percentage
        );

        MatchResult {
            recipe_id: None,
            match_percentage,
            available_ingredients: available.into_iter().map(|i| i.name.clone()).collect(),
            missing_ingredients: missing.into_iter().map(|i| i.name.clone()).collect(),
        }
    }

    /// Match this pantry against a recipe, recording the recipe id
    pub fn match_recipe(&self, recipe: &Recipe) -> MatchResult {
        MatchResult {
            recipe_id: recipe.id.clone(),
            ..self.match_ingredients(&recipe.ingredients)
        }
    }
}

fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round().clamp(0.0, 100.0) as u8
}

/// Match raw pantry entries against a list of recipe ingredients
pub fn match_ingredients<S: AsRef<str>>(pantry: &[S], ingredients: &[Ingredient]) -> MatchResult {
    Pantry::new(pantry).match_ingredients(ingredients)
}

/// Match raw pantry entries against a recipe
pub fn match_recipe<S: AsRef<str>>(pantry: &[S], recipe: &Recipe) -> MatchResult {
    Pantry::new(pantry).match_recipe(recipe)
}
