//! Interaction Session Tracking
//!
//! Session lifecycle plus an append-only interaction log per session.
//! Storage sits behind [`SessionStore`]; the in-memory store is
//! [`MemorySessionStore`].
//!
//! # Example
//!
//! ```rust
//! use scenario_config::ScenarioKey;
//! use scenario_session::InteractionSessionTracker;
//!
//! let tracker = InteractionSessionTracker::new();
//! let session = tracker.start_session(None);
//! let log = tracker
//!     .record_interaction(&session.session_id, ScenarioKey::new(1, 1), None, None)
//!     .unwrap();
//! assert!(!log.after_session_end);
//! ```

pub mod error;
pub mod store;
pub mod tracker;
pub mod types;

// Re-exports
pub use error::TrackerError;
pub use store::{MemorySessionStore, SessionStore};
pub use tracker::InteractionSessionTracker;
pub use types::{Interaction, InteractionLog, SessionId, SessionRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
