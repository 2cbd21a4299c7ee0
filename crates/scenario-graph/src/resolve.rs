//! Runtime transition resolution

use scenario_config::{ScenarioConfig, ScenarioKey};
use scenario_grid::{CellRef, GridError};
use serde::{Deserialize, Serialize};

/// Outcome of a tile interaction
///
/// `Terminal` is a normal outcome, not a failure: the scenario simply has
/// no edge for that tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionDecision {
    /// An edge fired
    Matched {
        /// Destination scenario
        to: ScenarioKey,
        /// Edge label, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// No edge for the tile
    Terminal,
}

impl TransitionDecision {
    /// Whether an edge fired
    #[inline]
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Destination, if an edge fired
    #[inline]
    #[must_use]
    pub fn to(&self) -> Option<ScenarioKey> {
        match self {
            Self::Matched { to, .. } => Some(*to),
            Self::Terminal => None,
        }
    }
}

/// Resolve an interaction on `tile`
///
/// The first transition in record order whose trigger equals `tile` wins.
/// Column letters compare case-insensitively because [`CellRef`] stores
/// them numerically.
#[must_use]
pub fn resolve(config: &ScenarioConfig, tile: &CellRef) -> TransitionDecision {
    config
        .transitions
        .iter()
        .find(|t| t.trigger_tile == *tile)
        .map_or(TransitionDecision::Terminal, |t| TransitionDecision::Matched {
            to: t.to,
            label: t.label.clone(),
        })
}

/// Resolve an interaction on a tile given as text, e.g. `"b2"`
///
/// # Errors
/// Returns [`GridError::InvalidCellRef`] if `tile` is not a cell reference.
pub fn resolve_str(config: &ScenarioConfig, tile: &str) -> Result<TransitionDecision, GridError> {
    let tile: CellRef = tile.parse()?;
    Ok(resolve(config, &tile))
}
