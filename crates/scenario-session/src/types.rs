//! Session and interaction records

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use scenario_config::ScenarioKey;
use scenario_grid::CellRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque session identifier
///
/// Generated ids are UUID v4 strings; ids handed in by a storage
/// collaborator may be any string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Fresh random id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow as a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One play-through of the scenario graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Identifier
    pub session_id: SessionId,
    /// Creation time
    pub started_at: DateTime<Utc>,
    /// Cleared once by `end_session`
    pub is_active: bool,
    /// Owning user; anonymous sessions have none
    pub owner_user_id: Option<String>,
}

impl SessionRecord {
    /// New active session started now
    #[must_use]
    pub fn new(session_id: SessionId, owner_user_id: Option<String>) -> Self {
        Self {
            session_id,
            started_at: Utc::now(),
            is_active: true,
            owner_user_id,
        }
    }

    /// Whether no user owns the session
    #[inline]
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.owner_user_id.is_none()
    }
}

/// Interaction as reported by the caller, before it is logged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// Scenario the interaction happened in
    pub scenario_key: ScenarioKey,
    /// Tile that was activated, if any
    pub trigger_tile: Option<CellRef>,
    /// Where the engine sent the player, if anywhere
    pub resolved_transition: Option<ScenarioKey>,
    /// When it happened
    pub occurred_at: DateTime<Utc>,
}

/// Immutable audit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionLog {
    /// Owning session
    pub session_id: SessionId,
    /// Scenario the interaction happened in
    pub scenario_key: ScenarioKey,
    /// Tile that was activated, if any
    pub trigger_tile: Option<CellRef>,
    /// Where the engine sent the player, if anywhere
    pub resolved_transition: Option<ScenarioKey>,
    /// When it happened
    pub occurred_at: DateTime<Utc>,
    /// Recorded after the session had ended
    #[serde(default)]
    pub after_session_end: bool,
}

impl InteractionLog {
    /// Stamp an interaction for `session`
    #[must_use]
    pub fn new(session: &SessionRecord, interaction: Interaction) -> Self {
        Self {
            session_id: session.session_id.clone(),
            scenario_key: interaction.scenario_key,
            trigger_tile: interaction.trigger_tile,
            resolved_transition: interaction.resolved_transition,
            occurred_at: interaction.occurred_at,
            after_session_end: !session.is_active,
        }
    }
}
