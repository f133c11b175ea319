//! # Filter Pipeline
//!
//! Narrows search hits by minimum match percentage, cuisine and dietary
//! tags. The three stages are independent and commute; they run cheapest
//! first.

use log::{debug, trace};
use std::collections::HashSet;

use crate::recipe_model::Recipe;
use crate::search::{SearchHit, SearchRequest};

/// Cuisine value meaning "no cuisine filter"
pub const ALL_CUISINES: &str = "all";

/// Keep hits at or above the minimum match percentage
pub fn meets_minimum(hit: &SearchHit<'_>, min_match_percentage: u8) -> bool {
    hit.match_result.match_percentage >= min_match_percentage
}

/// Case-insensitive cuisine equality; `None`, blank and "all" match everything
pub fn matches_cuisine(recipe: &Recipe, cuisine: Option<&str>) -> bool {
    match active_cuisine(cuisine) {
        Some(wanted) => recipe.cuisine.trim().to_lowercase() == wanted,
        None => true,
    }
}

/// Whether the recipe carries every requested tag
///
/// A recipe without tags fails any non-empty filter set.
pub fn satisfies_dietary_filters(recipe: &Recipe, required: &HashSet<String>) -> bool {
    if required.is_empty() {
        return true;
    }
    let tags = recipe.normalized_tags();
    required.iter().all(|tag| tags.contains(tag))
}

fn active_cuisine(cuisine: Option<&str>) -> Option<String> {
    let wanted = cuisine?.trim().to_lowercase();
    if wanted.is_empty() || wanted == ALL_CUISINES {
        None
    } else {
        Some(wanted)
    }
}

/// Lowercased, trimmed set of requested dietary tags
pub fn required_tags<S: AsRef<str>>(filters: &[S]) -> HashSet<String> {
    filters
        .iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Apply all three filters in order
pub fn apply_filters<'a>(hits: Vec<SearchHit<'a>>, request: &SearchRequest) -> Vec<SearchHit<'a>> {
    let before = hits.len();
    let cuisine = request.cuisine.as_deref();
    let required = required_tags(request.dietary_filters.as_slice());

    let filtered: Vec<SearchHit<'a>> = hits
        .into_iter()
        .filter(|hit| meets_minimum(hit, request.min_match_percentage))
        .filter(|hit| matches_cuisine(hit.recipe, cuisine))
        .filter(|hit| {
            let keep = satisfies_dietary_filters(hit.recipe, &required);
            if !keep {
                trace!("Recipe {} lacks required dietary tags", hit.recipe.display_id());
            }
            keep
        })
        .collect();

    debug!(
        "Filters kept {} of {} hits (min={}%, cuisine={:?}, dietary={:?})",
        filtered.len(),
        before,
        request.min_match_percentage,
        cuisine,
        required
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuisine_matching() {
        let recipe = Recipe::new("r", "Pasta").with_cuisine("Italian");

        let cases = vec![
            (None, true),
            (Some("all"), true),
            (Some("ALL"), true),
            (Some(""), true),
            (Some("italian"), true),
            (Some(" ITALIAN "), true),
            (Some("mexican"), false),
        ];
        for (cuisine, expected) in cases {
            assert_eq!(matches_cuisine(&recipe, cuisine), expected, "cuisine {:?}", cuisine);
        }
    }

    #[test]
    fn test_dietary_filters_use_and_semantics() {
        let recipe = Recipe::new("r", "Salad")
            .with_dietary_tag("vegan")
            .with_dietary_tag("gluten-free");

        assert!(satisfies_dietary_filters(&recipe, &required_tags::<&str>(&[])));
        assert!(satisfies_dietary_filters(&recipe, &required_tags(&["Vegan"])));
        assert!(satisfies_dietary_filters(&recipe, &required_tags(&["vegan", "gluten-free"])));
        assert!(!satisfies_dietary_filters(&recipe, &required_tags(&["vegan", "keto"])));
    }

    #[test]
    fn test_untagged_recipe_fails_any_filter() {
        let recipe = Recipe::new("r", "Steak");
        assert!(!satisfies_dietary_filters(&recipe, &required_tags(&["keto"])));
        assert!(satisfies_dietary_filters(&recipe, &required_tags(&["  "])));
    }
}
