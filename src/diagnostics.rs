//! # Diagnostics Channel
//!
//! Non-fatal conditions noticed by the engine, such as an unsupported sort key
//! or a recipe skipped for lacking a usable id, are reported through an
//! injected [`Diagnostics`] implementation.

use log::warn;
use std::sync::Mutex;

/// Receiver for engine warnings
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Keeps warnings in memory, in the order they were reported
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings collected so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_diagnostics_keeps_order() {
        let diagnostics = CollectingDiagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.warn("first");
        diagnostics.warn("second");

        assert_eq!(diagnostics.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_log_diagnostics_does_not_panic() {
        LogDiagnostics.warn("nothing listening");
    }
}
