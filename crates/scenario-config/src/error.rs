//! Error types for scenario normalization
//!
//! Only unrecoverable identity or geometry problems are errors. Everything
//! else degrades to a [`NormalizationWarning`](crate::NormalizationWarning).

use crate::key::ScenarioKey;

/// Raw record cannot be turned into a canonical scenario
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidScenarioError {
    /// Raw record is not a JSON object
    #[error("scenario record is not an object (got {found})")]
    NotAnObject {
        /// JSON type that was found instead
        found: &'static str,
    },

    /// Identity field absent
    #[error("missing required field '{field}'")]
    MissingKey {
        /// Canonical field name
        field: &'static str,
    },

    /// Identity field present but not a non-negative integer
    #[error("field '{field}' must be a non-negative integer, got {value}")]
    InvalidKey {
        /// Canonical field name
        field: &'static str,
        /// Offending value as JSON text
        value: String,
    },

    /// No rule yields row and column counts
    #[error("grid dimensions of scenario {key} cannot be determined: {reason}")]
    GridUndetermined {
        /// Scenario whose grid failed
        key: ScenarioKey,
        /// Human-readable cause
        reason: String,
    },
}

impl InvalidScenarioError {
    /// Key of the failing scenario, when it was readable
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<ScenarioKey> {
        match self {
            Self::GridUndetermined { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Whether the failure concerns scenario identity
    #[inline]
    #[must_use]
    pub fn is_identity_error(&self) -> bool {
        matches!(self, Self::MissingKey { .. } | Self::InvalidKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InvalidScenarioError::MissingKey { field: "sceneId" };
        assert!(err.to_string().contains("sceneId"));
        assert!(err.is_identity_error());
        assert_eq!(err.key(), None);
    }

    #[test]
    fn grid_error_carries_key() {
        let err = InvalidScenarioError::GridUndetermined {
            key: ScenarioKey::new(1, 2),
            reason: "no rows".into(),
        };
        assert_eq!(err.key(), Some(ScenarioKey::new(1, 2)));
        assert!(!err.is_identity_error());
        assert!(err.to_string().contains("1:2"));
    }
}
