//! # Ranker
//!
//! Orders search hits under one of three policies. Sorting is stable, so hits
//! with equal composite keys keep their input order and repeated calls on
//! the same input return the same order.
//!
//! | Policy       | Primary key                | Tie-break            |
//! |--------------|----------------------------|----------------------|
//! | `BestMatch`  | match percentage, desc     | total time, asc      |
//! | `Quickest`   | total time, asc            | match percentage, desc |
//! | `Easiest`    | difficulty rank, asc       | total time, asc      |

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::diagnostics::Diagnostics;
use crate::engine_errors::EngineError;
use crate::search::SearchHit;

/// Ordering policy for search results
///
/// Deserialization accepts the same spellings as `FromStr`; an unsupported
/// key falls back to `BestMatch` with a logged warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    BestMatch,
    Quickest,
    Easiest,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::BestMatch => "bestMatch",
            SortBy::Quickest => "quickest",
            SortBy::Easiest => "easiest",
        }
    }

    /// Parse a sort key, falling back to `BestMatch` for unsupported keys
    ///
    /// The fallback is not an error; it is reported through `diagnostics`.
    pub fn parse_or_default(raw: &str, diagnostics: &dyn Diagnostics) -> Self {
        match raw.parse::<SortBy>() {
            Ok(sort_by) => sort_by,
            Err(err) => {
                diagnostics.warn(&format!("{err}; falling back to bestMatch ordering"));
                SortBy::BestMatch
            }
        }
    }

    fn compare(&self, a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
        match self {
            SortBy::BestMatch => by_match(a, b).then_with(|| by_time(a, b)),
            SortBy::Quickest => by_time(a, b).then_with(|| by_match(a, b)),
            SortBy::Easiest => a
                .recipe
                .difficulty
                .rank()
                .cmp(&b.recipe.difficulty.rank())
                .then_with(|| by_time(a, b)),
        }
    }
}

// Higher match percentage first
fn by_match(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    b.match_result
        .match_percentage
        .cmp(&a.match_result.match_percentage)
}

// Shorter total time first
fn by_time(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    a.recipe.total_time.cmp(&b.recipe.total_time)
}

impl FromStr for SortBy {
    type Err = EngineError;

    /// Accepts camelCase, snake_case and kebab-case spellings, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "bestmatch" => Ok(SortBy::BestMatch),
            "quickest" => Ok(SortBy::Quickest),
            "easiest" => Ok(SortBy::Easiest),
            _ => Err(EngineError::UnknownSortKey(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|err| {
            warn!("{err}; falling back to bestMatch ordering");
            SortBy::BestMatch
        }))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Return the hits ordered under `sort_by`, leaving the input untouched
pub fn rank<'a>(hits: &[SearchHit<'a>], sort_by: SortBy) -> Vec<SearchHit<'a>> {
    let mut ranked = hits.to_vec();
    rank_in_place(&mut ranked, sort_by);
    ranked
}

/// Stable in-place sort used by the search pipeline, which already owns its hits
pub(crate) fn rank_in_place(hits: &mut [SearchHit<'_>], sort_by: SortBy) {
    debug!("Ranking {} hits by {}", hits.len(), sort_by);
    hits.sort_by(|a, b| sort_by.compare(a, b));
}
