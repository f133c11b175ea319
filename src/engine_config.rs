//! # Engine Configuration Module
//!
//! This module defines the tunable parameters of the retrieval engine:
//! identifier-resolution thresholds, suggestion limits and search defaults.
//! Values come from `Default` and can be overridden from the environment.

use log::{debug, info};

use crate::engine_errors::EngineError;

// Constants for engine configuration
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_SUGGESTION_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
pub const DEFAULT_MIN_MATCH_PERCENTAGE: u8 = 0;
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 4;

// Environment variable names
pub const ENV_FUZZY_THRESHOLD: &str = "RECIPE_FUZZY_THRESHOLD";
pub const ENV_SUGGESTION_THRESHOLD: &str = "RECIPE_SUGGESTION_THRESHOLD";
pub const ENV_MAX_SUGGESTIONS: &str = "RECIPE_MAX_SUGGESTIONS";
pub const ENV_MIN_MATCH_PERCENTAGE: &str = "RECIPE_MIN_MATCH_PERCENTAGE";
pub const ENV_RECOMMENDATION_COUNT: &str = "RECIPE_RECOMMENDATION_COUNT";

/// Configuration structure for the retrieval engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Minimum similarity for a fuzzy identifier match to be accepted (inclusive)
    pub fuzzy_threshold: f64,
    /// Similarity a candidate must exceed to be offered as a suggestion
    pub suggestion_threshold: f64,
    /// Maximum number of suggestions returned on resolution failure
    pub max_suggestions: usize,
    /// Default minimum match percentage for searches
    pub min_match_percentage: u8,
    /// Default number of recommendations
    pub recommendation_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            min_match_percentage: DEFAULT_MIN_MATCH_PERCENTAGE,
            recommendation_count: DEFAULT_RECOMMENDATION_COUNT,
        }
    }
}

impl EngineConfig {
    /// Build a configuration from the process environment
    ///
    /// Unset variables keep their defaults. Returns an error when a variable is
    /// set but cannot be parsed or is out of range.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_engine::engine_config::EngineConfig;
    ///
    /// let config = EngineConfig::from_lookup(|key| match key {
    ///     "RECIPE_FUZZY_THRESHOLD" => Some("0.9".to_string()),
    ///     _ => None,
    /// })?;
    /// assert_eq!(config.fuzzy_threshold, 0.9);
    /// assert_eq!(config.suggestion_threshold, 0.5);
    /// # Ok::<(), recipe_engine::engine_errors::EngineError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_FUZZY_THRESHOLD) {
            config.fuzzy_threshold = parse_value(ENV_FUZZY_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_SUGGESTION_THRESHOLD) {
            config.suggestion_threshold = parse_value(ENV_SUGGESTION_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_SUGGESTIONS) {
            config.max_suggestions = parse_value(ENV_MAX_SUGGESTIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_MIN_MATCH_PERCENTAGE) {
            config.min_match_percentage = parse_value(ENV_MIN_MATCH_PERCENTAGE, &value)?;
        }
        if let Some(value) = lookup(ENV_RECOMMENDATION_COUNT) {
            config.recommendation_count = parse_value(ENV_RECOMMENDATION_COUNT, &value)?;
        }

        config.validate()?;

        info!(
            "Engine configuration loaded: fuzzy_threshold={}, suggestion_threshold={}, max_suggestions={}, min_match={}%",
            config.fuzzy_threshold,
            config.suggestion_threshold,
            config.max_suggestions,
            config.min_match_percentage
        );
        Ok(config)
    }

    /// Check that thresholds lie in `[0, 1]` and percentages in `[0, 100]`
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            (ENV_FUZZY_THRESHOLD, self.fuzzy_threshold),
            (ENV_SUGGESTION_THRESHOLD, self.suggestion_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::OutOfRange(format!(
                    "{name}={value} (expected 0.0..=1.0)"
                )));
            }
        }
        if self.min_match_percentage > 100 {
            return Err(EngineError::OutOfRange(format!(
                "{}={} (expected 0..=100)",
                ENV_MIN_MATCH_PERCENTAGE, self.min_match_percentage
            )));
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, EngineError> {
    debug!("Parsing configuration value {}='{}'", name, raw);
    raw.trim()
        .parse::<T>()
        .map_err(|_| EngineError::InvalidConfig(format!("{name}='{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.fuzzy_threshold, 0.8);
        assert_eq!(config.suggestion_threshold, 0.5);
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.min_match_percentage, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ENV_FUZZY_THRESHOLD, "0.75"),
            (ENV_SUGGESTION_THRESHOLD, " 0.4 "),
            (ENV_MAX_SUGGESTIONS, "10"),
            (ENV_MIN_MATCH_PERCENTAGE, "50"),
            (ENV_RECOMMENDATION_COUNT, "6"),
        ]))
        .unwrap();

        assert_eq!(config.fuzzy_threshold, 0.75);
        assert_eq!(config.suggestion_threshold, 0.4);
        assert_eq!(config.max_suggestions, 10);
        assert_eq!(config.min_match_percentage, 50);
        assert_eq!(config.recommendation_count, 6);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = vec![
            (ENV_FUZZY_THRESHOLD, "high"),
            (ENV_FUZZY_THRESHOLD, "1.5"),
            (ENV_SUGGESTION_THRESHOLD, "-0.1"),
            (ENV_MIN_MATCH_PERCENTAGE, "101"),
            (ENV_MIN_MATCH_PERCENTAGE, "300"),
            (ENV_MAX_SUGGESTIONS, "-1"),
        ];

        for (key, value) in cases {
            let result = EngineConfig::from_lookup(lookup_from(&[(key, value)]));
            assert!(result.is_err(), "Expected {}='{}' to be rejected", key, value);
        }
    }
}
