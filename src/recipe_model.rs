//! # Recipe Data Model
//!
//! This module defines the records the retrieval engine works over: recipes,
//! their ingredients, and the small enumerations used for ranking and
//! recommendation. The collection is loaded and validated by the caller; the
//! engine only ever reads it.
//!
//! ## Core Concepts
//!
//! - **Recipe**: a dish with timings, difficulty, meal type, cuisine and tags
//! - **Ingredient**: a named ingredient with its quantity and unit
//! - **Difficulty**: Easy / Medium / Hard, ranked 1..=3 for sorting
//! - **MealType**: Breakfast / Lunch / Dinner / Snack
//!
//! ## Usage
//!
//! ```rust
//! use recipe_engine::recipe_model::{Difficulty, Ingredient, MealType, Recipe};
//!
//! let recipe = Recipe::new("recipe-001", "Tomato Soup")
//!     .with_cuisine("italian")
//!     .with_difficulty(Difficulty::Easy)
//!     .with_meal_type(MealType::Lunch)
//!     .with_times(10, 20)
//!     .with_ingredient(Ingredient::new("tomatoes").with_amount(4.0, "pieces"))
//!     .with_dietary_tag("vegetarian");
//!
//! assert_eq!(recipe.total_time, 30);
//! assert!(recipe.has_consistent_total_time());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::engine_errors::EngineError;

/// A single ingredient line belonging to one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Display name of the ingredient (e.g., "olive oil", "Tomatoes")
    pub name: String,

    /// Amount in `unit`
    #[serde(default)]
    pub quantity: f64,

    /// Free-form unit text (e.g., "cups", "g")
    #[serde(default)]
    pub unit: String,

    /// Alternative ingredients the recipe accepts in place of this one
    #[serde(default)]
    pub substitutions: Vec<String>,
}

/// How hard a recipe is to prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// The meal a recipe is intended for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A fully-formed recipe record
///
/// `id` is `None` when the source record carried no identifier or one that was
/// not a string. Such records still take part in ingredient search but are
/// never returned by identifier resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub cuisine: String,

    pub difficulty: Difficulty,

    pub meal_type: MealType,

    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: u32,

    /// Cooking time in minutes
    #[serde(default)]
    pub cook_time: u32,

    /// `prep_time + cook_time`, in minutes
    #[serde(default)]
    pub total_time: u32,

    #[serde(default = "default_servings")]
    pub servings: u32,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// Lowercase dietary tags (e.g., "vegetarian", "gluten-free")
    #[serde(default)]
    pub dietary_tags: Vec<String>,
}

fn default_servings() -> u32 {
    1
}

/// Accept any JSON value for `id`, keeping it only when it is a string
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(id) => Some(id),
        _ => None,
    })
}

impl Ingredient {
    /// Create a new ingredient with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: 0.0,
            unit: String::new(),
            substitutions: Vec::new(),
        }
    }

    /// Set the quantity and unit
    pub fn with_amount(mut self, quantity: f64, unit: &str) -> Self {
        self.quantity = quantity;
        self.unit = unit.to_string();
        self
    }

    /// Add an accepted substitution
    pub fn with_substitution(mut self, substitution: &str) -> Self {
        self.substitutions.push(substitution.to_string());
        self
    }
}

impl Difficulty {
    /// Sort rank: Easy=1, Medium=2, Hard=3
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(EngineError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl FromStr for MealType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(EngineError::UnknownMealType(other.to_string())),
        }
    }
}

impl Recipe {
    /// Create a recipe with an id and title; everything else starts empty
    ///
    /// Defaults to an `Easy` `Dinner` for one with no timings, ingredients or tags.
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            title: title.to_string(),
            cuisine: String::new(),
            difficulty: Difficulty::Easy,
            meal_type: MealType::Dinner,
            prep_time: 0,
            cook_time: 0,
            total_time: 0,
            servings: 1,
            ingredients: Vec::new(),
            dietary_tags: Vec::new(),
        }
    }

    /// Drop the identifier, as happens when a source record carries an invalid id
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = cuisine.to_string();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = meal_type;
        self
    }

    /// Set preparation and cooking time; total time is derived from them
    pub fn with_times(mut self, prep_time: u32, cook_time: u32) -> Self {
        self.prep_time = prep_time;
        self.cook_time = cook_time;
        self.total_time = prep_time.saturating_add(cook_time);
        self
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Add several ingredients by name only
    pub fn with_ingredient_names(mut self, names: &[&str]) -> Self {
        self.ingredients
            .extend(names.iter().map(|name| Ingredient::new(name)));
        self
    }

    /// Add a dietary tag, stored lowercase
    pub fn with_dietary_tag(mut self, tag: &str) -> Self {
        self.dietary_tags.push(tag.trim().to_lowercase());
        self
    }

    /// Check the `total_time == prep_time + cook_time` invariant
    pub fn has_consistent_total_time(&self) -> bool {
        self.prep_time.checked_add(self.cook_time) == Some(self.total_time)
    }

    /// Derive `total_time` from prep and cook time when the record left it out
    ///
    /// Records that omit `totalTime` deserialize with 0.
    pub fn fill_total_time(&mut self) {
        if self.total_time == 0 {
            self.total_time = self.prep_time.saturating_add(self.cook_time);
        }
    }

    /// Dietary tags trimmed and lowercased, empties dropped
    pub fn normalized_tags(&self) -> HashSet<String> {
        self.dietary_tags
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Identifier for display in logs and warnings
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity > 0.0 {
            if self.quantity.fract() == 0.0 {
                write!(f, "{} ", self.quantity as i64)?;
            } else {
                write!(f, "{} ", self.quantity)?;
            }
            if !self.unit.is_empty() {
                write!(f, "{} ", self.unit)?;
            }
        }
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}, {}, {}, {} min)",
            self.title,
            self.display_id(),
            self.cuisine,
            self.difficulty,
            self.meal_type,
            self.total_time
        )
    }
}
