//! Scenario Config Normalization
//!
//! Scenario records were written by several generations of tooling. This
//! crate reads any of them and produces one canonical [`ScenarioConfig`].
//!
//! # Overview
//!
//! - **ScenarioKey**: `(sceneId, subsceneId)` identity
//! - **ScenarioConfig**: canonical scenario with grid, animation, tiles and
//!   transitions
//! - **normalize**: raw JSON → canonical config + warnings
//! - **ScenarioConfig::to_raw**: canonical config → current raw shape
//!
//! # Example
//!
//! ```rust
//! use scenario_config::{normalize, ScenarioKey};
//! use serde_json::json;
//!
//! let out = normalize(&json!({
//!     "sceneId": 1, "subsceneId": 2, "title": "Intro",
//!     "excelRange": "A1:K7", "animationType": "matrix_spiral"
//! }))
//! .unwrap();
//!
//! assert_eq!(out.config.key, ScenarioKey::new(1, 2));
//! assert_eq!((out.config.grid.rows, out.config.grid.cols), (7, 11));
//! assert!(out.config.is_terminal());
//! ```

mod emit;
pub mod error;
pub mod key;
pub mod normalize;
mod raw;
pub mod types;
pub mod warning;

// Re-exports
pub use error::InvalidScenarioError;
pub use key::{KeyParseError, ScenarioKey};
pub use normalize::{normalize, normalize_with, scenario_key_of, NormalizeOptions, UNRESOLVED_TILES};
pub use types::{
    AnimationSpec, AnimationSpeed, GridGeometry, Normalized, ParamValue, ScenarioConfig, Tile,
    TileActions, TileHandler, Transition,
};
pub use warning::NormalizationWarning;

/// Commonly used items
pub mod prelude {
    pub use crate::{
        normalize, normalize_with, InvalidScenarioError, NormalizationWarning, NormalizeOptions,
        Normalized, ScenarioConfig, ScenarioKey, Transition,
    };
    pub use scenario_grid::CellRef;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
