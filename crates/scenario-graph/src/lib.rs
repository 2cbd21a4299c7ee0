//! Scenario Transition Graph
//!
//! Runtime resolution of tile interactions and offline validation of the
//! graph formed by all scenarios.
//!
//! # Overview
//!
//! - **resolve**: `(config, tile)` → [`TransitionDecision`]; first match wins
//! - **ScenarioGraph**: explicit `petgraph` view over a set of configs
//! - **validate_graph**: dangling edges, unreachable scenarios and shadowed
//!   triggers as [`GraphIssue`]s
//!
//! # Example
//!
//! ```rust
//! use scenario_config::{normalize, ScenarioKey};
//! use scenario_graph::{resolve_str, validate_graph, TransitionDecision};
//! use serde_json::json;
//!
//! let config = normalize(&json!({
//!     "sceneId": 1, "subsceneId": 1, "title": "Gate", "excelRange": "A1:B2",
//!     "tiles": ["A1", "B1"],
//!     "nextScenes": [{"sceneId": 1, "subsceneId": 2, "triggerTile": "A1"}]
//! }))
//! .unwrap()
//! .into_config();
//!
//! assert_eq!(resolve_str(&config, "a1").unwrap().to(), Some(ScenarioKey::new(1, 2)));
//! assert_eq!(resolve_str(&config, "B1").unwrap(), TransitionDecision::Terminal);
//!
//! let issues = validate_graph(&[config], None);
//! assert_eq!(issues.len(), 1); // 1:2 does not exist
//! ```

pub mod graph;
pub mod resolve;
pub mod validate;

// Re-exports
pub use graph::ScenarioGraph;
pub use resolve::{resolve, resolve_str, TransitionDecision};
pub use validate::{validate_graph, GraphIssue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
