//! # Engine Error Types Module
//!
//! Error types for the few engine operations that can fail: configuration
//! loading and parsing of enumerated request values. Matching, ranking and
//! resolution never fail; they degrade to empty results instead.

/// Custom error types for engine configuration and request parsing
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A configuration value could not be parsed
    InvalidConfig(String),
    /// A configuration value parsed but lies outside its allowed range
    OutOfRange(String),
    /// Unsupported sort key
    UnknownSortKey(String),
    /// Unsupported difficulty name
    UnknownDifficulty(String),
    /// Unsupported meal type name
    UnknownMealType(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            EngineError::OutOfRange(msg) => write!(f, "Configuration value out of range: {msg}"),
            EngineError::UnknownSortKey(key) => write!(f, "Unknown sort key: '{key}'"),
            EngineError::UnknownDifficulty(name) => write!(f, "Unknown difficulty: '{name}'"),
            EngineError::UnknownMealType(name) => write!(f, "Unknown meal type: '{name}'"),
        }
    }
}

impl std::error::Error for EngineError {}
