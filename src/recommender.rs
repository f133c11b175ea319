//! # Recommender
//!
//! Suggests recipes to go with a reference recipe using a purely additive
//! score. The weights are tuning constants; results only need to be
//! deterministic for identical input.

use log::{debug, trace};
use serde::Serialize;

use crate::recipe_model::{MealType, Recipe};

/// Candidate shares the reference recipe's cuisine
pub const SAME_CUISINE_BONUS: u32 = 50;
/// A snack alongside a dinner
pub const DINNER_SNACK_BONUS: u32 = 30;
/// A lunch or snack following a breakfast
pub const BREAKFAST_FOLLOW_UP_BONUS: u32 = 20;
/// Candidate is quick to prepare
pub const QUICK_PREP_BONUS: u32 = 20;
/// Preparation time, in minutes, at or under which `QUICK_PREP_BONUS` applies
pub const QUICK_PREP_MAX_MINUTES: u32 = 15;
/// Per dietary tag shared with the reference
pub const SHARED_TAG_BONUS: u32 = 10;

/// A candidate recipe and its score against the reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub recipe: &'a Recipe,
    pub score: u32,
}

fn meal_type_bonus(reference: MealType, candidate: MealType) -> u32 {
    match (reference, candidate) {
        (MealType::Dinner, MealType::Snack) => DINNER_SNACK_BONUS,
        (MealType::Breakfast, MealType::Lunch | MealType::Snack) => BREAKFAST_FOLLOW_UP_BONUS,
        _ => 0,
    }
}

/// Score one candidate against the reference
pub fn score_candidate(reference: &Recipe, candidate: &Recipe) -> u32 {
    let mut score = 0;

    if candidate.cuisine == reference.cuisine {
        score += SAME_CUISINE_BONUS;
    }
    score += meal_type_bonus(reference.meal_type, candidate.meal_type);
    if candidate.prep_time <= QUICK_PREP_MAX_MINUTES {
        score += QUICK_PREP_BONUS;
    }

    let reference_tags = reference.normalized_tags();
    let shared = candidate
        .normalized_tags()
        .intersection(&reference_tags)
        .count() as u32;
    score += shared * SHARED_TAG_BONUS;

    trace!(
        "Recommendation score for {} against {}: {}",
        candidate.display_id(),
        reference.display_id(),
        score
    );
    score
}

fn is_reference(reference: &Recipe, candidate: &Recipe) -> bool {
    if std::ptr::eq(reference, candidate) {
        return true;
    }
    matches!((&reference.id, &candidate.id), (Some(a), Some(b)) if a == b)
}

/// Top `count` candidates by score, excluding the reference itself
///
/// Equal scores keep their input order.
pub fn recommend<'a>(reference: &Recipe, candidates: &'a [Recipe], count: usize) -> Vec<Recommendation<'a>> {
    let mut scored: Vec<Recommendation<'a>> = candidates
        .iter()
        .filter(|candidate| !is_reference(reference, candidate))
        .map(|recipe| Recommendation {
            recipe,
            score: score_candidate(reference, recipe),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(count);

    debug!(
        "Recommended {} of {} candidates for {}",
        scored.len(),
        candidates.len(),
        reference.display_id()
    );
    scored
}
