//! # Identifier Resolver
//!
//! Maps a possibly malformed or mistyped recipe identifier onto a recipe in
//! the collection, trying progressively looser strategies and stopping at the
//! first that succeeds:
//!
//! 1. **Exact**: cleaned identifiers are equal (URL-decoded, trimmed,
//!    `.json`/`.html`/`.htm` stripped, case preserved)
//! 2. **Case-insensitive**: cleaned identifiers are equal ignoring case
//! 3. **Fuzzy**: the best normalized-id similarity reaches the fuzzy threshold
//! 4. **None**: nothing matched; [`IdResolver::suggest`] offers alternatives
//!
//! Records without a usable id are skipped once, when the candidate index is
//! built, and reported through the diagnostics channel.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_engine::id_resolver::{IdResolver, MatchType};
//! use recipe_engine::recipe_model::Recipe;
//!
//! let recipes = vec![Recipe::new("recipe-001", "Tomato Soup")];
//! let resolver = IdResolver::default();
//!
//! assert_eq!(resolver.resolve("recipe-001", &recipes).match_type, MatchType::Exact);
//! assert_eq!(resolver.resolve("Recipe-001", &recipes).match_type, MatchType::CaseInsensitive);
//! assert_eq!(resolver.resolve("recpe-001", &recipes).match_type, MatchType::Fuzzy);
//! assert_eq!(resolver.resolve("zzz999", &recipes).match_type, MatchType::None);
//! ```

use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::engine_config::{
    EngineConfig, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MAX_SUGGESTIONS, DEFAULT_SUGGESTION_THRESHOLD,
};
use crate::normalizer::{clean_identifier, normalize_identifier};
use crate::recipe_model::Recipe;
use crate::similarity::similarity;

pub const REASON_SAME_NUMERIC_ID: &str = "Same numeric ID";
pub const REASON_SIMILAR_PATTERN: &str = "Similar ID pattern";

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").expect("Digit pattern should be valid");
}

/// Which strategy resolved an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    Exact,
    CaseInsensitive,
    Fuzzy,
    None,
}

impl MatchType {
    /// Case-insensitive and fuzzy matches resolve, but signal a mismatch
    /// between the stored and requested identifiers
    pub fn is_soft(&self) -> bool {
        matches!(self, MatchType::CaseInsensitive | MatchType::Fuzzy)
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, MatchType::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::CaseInsensitive => "case-insensitive",
            MatchType::Fuzzy => "fuzzy",
            MatchType::None => "none",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of resolving one identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdResolution {
    /// The identifier as requested; empty when none was given
    pub requested_raw: String,
    pub normalized_requested: String,
    pub match_type: MatchType,
    pub matched_recipe_id: Option<String>,
    /// Similarity of the accepted candidate; set for fuzzy matches
    pub similarity: Option<f64>,
}

/// An alternative offered when resolution fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub recipe_id: String,
    pub title: String,
    pub similarity: f64,
    pub reason: String,
}

/// Resolution, the matched recipe when there is one, and suggestions when not
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup<'a> {
    pub resolution: IdResolution,
    pub recipe: Option<&'a Recipe>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug)]
struct Candidate<'a> {
    recipe: &'a Recipe,
    raw_id: &'a str,
    cleaned_id: String,
    normalized_id: String,
}

/// Recipes with usable ids and their precomputed comparison forms
pub struct CandidateIndex<'a> {
    candidates: Vec<Candidate<'a>>,
}

impl<'a> CandidateIndex<'a> {
    /// Index the recipes, skipping any without a usable id
    pub fn build(recipes: &'a [Recipe], diagnostics: &dyn Diagnostics) -> Self {
        let mut candidates = Vec::with_capacity(recipes.len());
        for (position, recipe) in recipes.iter().enumerate() {
            match recipe.id.as_deref() {
                Some(raw_id) => candidates.push(Candidate {
                    recipe,
                    raw_id,
                    cleaned_id: clean_identifier(raw_id),
                    normalized_id: normalize_identifier(raw_id),
                }),
                None => diagnostics.warn(&format!(
                    "Skipping recipe #{} '{}': missing or non-string id",
                    position, recipe.title
                )),
            }
        }
        trace!("Indexed {} of {} recipes by id", candidates.len(), recipes.len());
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Identifier resolver with configurable thresholds
#[derive(Clone)]
pub struct IdResolver {
    /// Minimum similarity (inclusive) to accept a fuzzy match
    pub fuzzy_threshold: f64,
    /// Similarity a candidate must exceed to be suggested
    pub suggestion_threshold: f64,
    /// Suggestions returned by [`IdResolver::lookup`]
    pub max_suggestions: usize,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for IdResolver {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            diagnostics: Arc::new(LogDiagnostics),
        }
    }
}

impl fmt::Debug for IdResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdResolver")
            .field("fuzzy_threshold", &self.fuzzy_threshold)
            .field("suggestion_threshold", &self.suggestion_threshold)
            .field("max_suggestions", &self.max_suggestions)
            .finish()
    }
}

impl IdResolver {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            fuzzy_threshold: config.fuzzy_threshold,
            suggestion_threshold: config.suggestion_threshold,
            max_suggestions: config.max_suggestions,
            ..Self::default()
        }
    }

    /// Route warnings to a caller-provided channel
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_suggestion_threshold(mut self, threshold: f64) -> Self {
        self.suggestion_threshold = threshold;
        self
    }

    pub fn index<'a>(&self, recipes: &'a [Recipe]) -> CandidateIndex<'a> {
        CandidateIndex::build(recipes, self.diagnostics.as_ref())
    }

    /// Resolve an identifier against a recipe collection
    pub fn resolve<'r>(&self, raw_id: impl Into<Option<&'r str>>, recipes: &[Recipe]) -> IdResolution {
        let index = self.index(recipes);
        self.resolve_in(raw_id.into(), &index).0
    }

    /// Suggest alternatives for an identifier that did not resolve
    pub fn suggest<'r>(
        &self,
        raw_id: impl Into<Option<&'r str>>,
        recipes: &[Recipe],
        max_suggestions: usize,
    ) -> Vec<Suggestion> {
        let index = self.index(recipes);
        self.suggest_in(&normalize_identifier(raw_id.into()), &index, max_suggestions)
    }

    /// Resolve, and on failure gather up to `max_suggestions` suggestions
    pub fn lookup<'a, 'r>(&self, raw_id: impl Into<Option<&'r str>>, recipes: &'a [Recipe]) -> Lookup<'a> {
        let index = self.index(recipes);
        let (resolution, recipe) = self.resolve_in(raw_id.into(), &index);
        let suggestions = if resolution.match_type.is_resolved() {
            Vec::new()
        } else {
            self.suggest_in(&resolution.normalized_requested, &index, self.max_suggestions)
        };
        Lookup {
            resolution,
            recipe,
            suggestions,
        }
    }

    fn resolve_in<'a>(&self, raw_id: Option<&str>, index: &CandidateIndex<'a>) -> (IdResolution, Option<&'a Recipe>) {
        let requested_raw = raw_id.unwrap_or_default().to_string();
        let cleaned = clean_identifier(raw_id);
        let normalized = cleaned.to_lowercase();

        let outcome = |match_type: MatchType, candidate: Option<&Candidate<'a>>, score: Option<f64>| {
            (
                IdResolution {
                    requested_raw: requested_raw.clone(),
                    normalized_requested: normalized.clone(),
                    match_type,
                    matched_recipe_id: candidate.map(|c| c.raw_id.to_string()),
                    similarity: score,
                },
                candidate.map(|c| c.recipe),
            )
        };

        if normalized.is_empty() {
            if !requested_raw.is_empty() {
                self.diagnostics.warn(&format!(
                    "Requested id '{}' is empty after normalization",
                    requested_raw
                ));
            }
            return outcome(MatchType::None, None, None);
        }

        if let Some(candidate) = index.candidates.iter().find(|c| c.cleaned_id == cleaned) {
            debug!("Resolved '{}' exactly to '{}'", requested_raw, candidate.raw_id);
            return outcome(MatchType::Exact, Some(candidate), None);
        }

        if let Some(candidate) = index
            .candidates
            .iter()
            .find(|c| c.cleaned_id.to_lowercase() == normalized)
        {
            self.diagnostics.warn(&format!(
                "Requested id '{}' matched '{}' only case-insensitively",
                requested_raw, candidate.raw_id
            ));
            return outcome(MatchType::CaseInsensitive, Some(candidate), None);
        }

        let mut best: Option<(&Candidate<'a>, f64)> = None;
        for candidate in &index.candidates {
            let score = similarity(&normalized, &candidate.normalized_id);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }

        if let Some((candidate, score)) = best {
            if score >= self.fuzzy_threshold {
                self.diagnostics.warn(&format!(
                    "Requested id '{}' fuzzily matched '{}' (similarity {:.2})",
                    requested_raw, candidate.raw_id, score
                ));
                return outcome(MatchType::Fuzzy, Some(candidate), Some(score));
            }
            debug!(
                "Best fuzzy candidate for '{}' was '{}' at {:.2}, below threshold {:.2}",
                requested_raw, candidate.raw_id, score, self.fuzzy_threshold
            );
        }

        info!("Could not resolve recipe id '{}'", requested_raw);
        outcome(MatchType::None, None, None)
    }

    fn suggest_in(&self, normalized: &str, index: &CandidateIndex<'_>, max_suggestions: usize) -> Vec<Suggestion> {
        if normalized.is_empty() {
            return Vec::new();
        }

        let requested_number = first_number(normalized);
        let mut suggestions: Vec<Suggestion> = index
            .candidates
            .iter()
            .filter_map(|candidate| {
                let score = similarity(normalized, &candidate.normalized_id);
                if score <= self.suggestion_threshold {
                    return None;
                }
                let same_number = requested_number.is_some()
                    && requested_number == first_number(&candidate.normalized_id);
                Some(Suggestion {
                    recipe_id: candidate.raw_id.to_string(),
                    title: candidate.recipe.title.clone(),
                    similarity: score,
                    reason: if same_number {
                        REASON_SAME_NUMERIC_ID
                    } else {
                        REASON_SIMILAR_PATTERN
                    }
                    .to_string(),
                })
            })
            .collect();

        suggestions.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        suggestions.truncate(max_suggestions);

        debug!("Generated {} suggestions for '{}'", suggestions.len(), normalized);
        suggestions
    }
}

/// First run of ASCII digits in an identifier
fn first_number(id: &str) -> Option<&str> {
    DIGIT_RUN.find(id).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;

    fn recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("recipe-001", "Tomato Soup"),
            Recipe::new("recipe-002", "Pad Thai"),
            Recipe::new("pasta-carbonara", "Carbonara"),
        ]
    }

    fn resolver_with_log() -> (IdResolver, Arc<CollectingDiagnostics>) {
        let diagnostics = Arc::new(CollectingDiagnostics::new());
        let resolver = IdResolver::default().with_diagnostics(diagnostics.clone());
        (resolver, diagnostics)
    }

    #[test]
    fn test_match_type_serialization() {
        assert_eq!(
            serde_json::to_string(&MatchType::CaseInsensitive).unwrap(),
            "\"case-insensitive\""
        );
        assert_eq!(serde_json::to_string(&MatchType::None).unwrap(), "\"none\"");
        assert!(MatchType::Fuzzy.is_soft());
        assert!(!MatchType::Exact.is_soft());
        assert!(!MatchType::None.is_resolved());
    }

    #[test]
    fn test_exact_match_with_extension_and_encoding() {
        let resolver = IdResolver::default();
        let recipes = recipes();

        for raw in ["recipe-001", " recipe-001 ", "recipe-001.json", "recipe%2D001.html"] {
            let resolution = resolver.resolve(raw, &recipes);
            assert_eq!(resolution.match_type, MatchType::Exact, "raw '{}'", raw);
            assert_eq!(resolution.matched_recipe_id.as_deref(), Some("recipe-001"));
        }
    }

    #[test]
    fn test_case_insensitive_match_warns() {
        let (resolver, diagnostics) = resolver_with_log();
        let resolution = resolver.resolve("RECIPE-002", &recipes());

        assert_eq!(resolution.match_type, MatchType::CaseInsensitive);
        assert_eq!(resolution.normalized_requested, "recipe-002");
        assert_eq!(resolution.matched_recipe_id.as_deref(), Some("recipe-002"));
        assert_eq!(diagnostics.messages().len(), 1);
    }

    #[test]
    fn test_fuzzy_picks_best_candidate() {
        let resolver = IdResolver::default();
        let resolution = resolver.resolve("pasta-carbonaro", &recipes());

        assert_eq!(resolution.match_type, MatchType::Fuzzy);
        assert_eq!(resolution.matched_recipe_id.as_deref(), Some("pasta-carbonara"));
        assert!(resolution.similarity.unwrap() >= 0.8);
    }

    #[test]
    fn test_fuzzy_threshold_is_configurable() {
        let strict = IdResolver::default().with_fuzzy_threshold(0.95);
        assert_eq!(strict.resolve("recpe-001", &recipes()).match_type, MatchType::None);

        let loose = IdResolver::default().with_fuzzy_threshold(0.5);
        assert_eq!(loose.resolve("recipe-0", &recipes()).match_type, MatchType::Fuzzy);
    }

    #[test]
    fn test_absent_and_malformed_ids() {
        let (resolver, diagnostics) = resolver_with_log();
        let recipes = recipes();

        let absent = resolver.resolve(None, &recipes);
        assert_eq!(absent.match_type, MatchType::None);
        assert_eq!(absent.requested_raw, "");
        assert!(diagnostics.is_empty());

        let collapsed = resolver.resolve(".json", &recipes);
        assert_eq!(collapsed.match_type, MatchType::None);
        assert_eq!(collapsed.normalized_requested, "");
        assert_eq!(diagnostics.messages().len(), 1);
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let (resolver, diagnostics) = resolver_with_log();
        let recipes = vec![
            Recipe::new("recipe-001", "Broken").without_id(),
            Recipe::new("recipe-001", "Valid"),
        ];

        let found = resolver.lookup("recipe-001", &recipes);
        assert_eq!(found.resolution.match_type, MatchType::Exact);
        assert_eq!(found.recipe.map(|r| r.title.as_str()), Some("Valid"));
        assert!(diagnostics.messages()[0].contains("Broken"));
    }

    #[test]
    fn test_suggestions() {
        let resolver = IdResolver::default();
        let recipes = vec![
            Recipe::new("recipe-001", "Tomato Soup"),
            Recipe::new("recipe-101", "Lentil Curry"),
            Recipe::new("dessert-777", "Pie"),
        ];

        let suggestions = resolver.suggest("recipe-001x", &recipes, 5);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].recipe_id, "recipe-001");
        assert_eq!(suggestions[0].reason, REASON_SAME_NUMERIC_ID);
        assert_eq!(suggestions[1].recipe_id, "recipe-101");
        assert_eq!(suggestions[1].reason, REASON_SIMILAR_PATTERN);
        assert!(suggestions.iter().all(|s| s.similarity > 0.5));

        assert_eq!(resolver.suggest("recipe-001x", &recipes, 1).len(), 1);
        assert!(resolver.suggest(None, &recipes, 5).is_empty());
    }

    #[test]
    fn test_lookup_attaches_suggestions_only_on_failure() {
        let resolver = IdResolver::default();
        let recipes = recipes();

        let hit = resolver.lookup("recipe-001", &recipes);
        assert!(hit.recipe.is_some());
        assert!(hit.suggestions.is_empty());

        let miss = resolver.lookup("recipe-9999", &recipes);
        assert_eq!(miss.resolution.match_type, MatchType::None);
        assert!(miss.recipe.is_none());
        assert!(!miss.suggestions.is_empty());
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("recipe-001-v2"), Some("001"));
        assert_eq!(first_number("carbonara"), None);
        assert_eq!(first_number("recipe-\u{0661}\u{0662}-7"), Some("7"));
    }
}
