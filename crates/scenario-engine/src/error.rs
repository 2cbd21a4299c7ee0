//! Engine error umbrella

use scenario_config::{InvalidScenarioError, ScenarioKey};
use scenario_grid::GridError;
use scenario_session::TrackerError;

use crate::store::StoreError;

/// Error from a [`ScenarioEngine`](crate::ScenarioEngine) operation
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Stored record cannot be normalized
    #[error("invalid scenario: {0}")]
    InvalidScenario(#[from] InvalidScenarioError),

    /// No record for the key
    #[error("scenario {0} not found")]
    ScenarioNotFound(ScenarioKey),

    /// Tile or range text is malformed
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Session bookkeeping failed
    #[error("tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// Storage backend failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether the caller can carry on with other scenarios or inputs
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidScenario(_)
            | Self::ScenarioNotFound(_)
            | Self::Grid(_)
            | Self::Tracker(_) => true,
            Self::Store(StoreError::Unkeyed(_)) => true,
            Self::Store(_) => false,
        }
    }

    /// Whether the error concerns the content of one input
    #[inline]
    #[must_use]
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::InvalidScenario(_) | Self::Grid(_))
    }
}
