//! Scenario Graph Resolution Engine
//!
//! Facade over the scenario crates: raw records come from a
//! [`ScenarioStore`], are normalized on every read, resolved against tile
//! interactions and, optionally, recorded against a play session.
//!
//! # Overview
//!
//! - **ScenarioEngine**: `scenario`, `trigger`, `validate`, `tracker`
//! - **ScenarioStore / MemoryScenarioStore**: raw record storage seam
//! - **EngineConfig**: TOML-backed settings
//!
//! # Example
//!
//! ```rust
//! use scenario_engine::prelude::*;
//! use serde_json::json;
//!
//! let store = MemoryScenarioStore::from_records([json!({
//!     "sceneId": 1, "subsceneId": 1, "title": "Gate", "excelRange": "A1:C3",
//!     "nextScenes": [{"sceneId": 1, "subsceneId": 2, "triggerTile": "B2"}]
//! })]);
//! let engine = ScenarioEngine::in_memory(store, EngineConfig::default());
//!
//! let decision = engine.trigger_str(ScenarioKey::new(1, 1), "B2", None).unwrap();
//! assert_eq!(decision.to(), Some(ScenarioKey::new(1, 2)));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod store;

// Re-exports
pub use config::{ConfigError, EngineConfig};
pub use engine::{GraphReport, RecordFailure, ScenarioEngine, ScenarioWarnings};
pub use error::EngineError;
pub use store::{MemoryScenarioStore, ScenarioStore, StoreError};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        EngineConfig, EngineError, GraphReport, MemoryScenarioStore, ScenarioEngine,
        ScenarioStore,
    };
    pub use scenario_config::{Normalized, ScenarioConfig, ScenarioKey};
    pub use scenario_graph::{GraphIssue, TransitionDecision};
    pub use scenario_grid::CellRef;
    pub use scenario_session::{InteractionSessionTracker, SessionId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
