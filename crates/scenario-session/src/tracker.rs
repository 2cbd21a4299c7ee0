//! Interaction session tracker
//!
//! Observes play for audit. The tracker never gates a transition: callers
//! resolve first and record afterwards, and a recording failure is theirs
//! to log.

use chrono::{DateTime, Utc};
use scenario_config::ScenarioKey;
use scenario_grid::CellRef;

use crate::error::TrackerError;
use crate::store::{MemorySessionStore, SessionStore};
use crate::types::{Interaction, InteractionLog, SessionId, SessionRecord};

/// Session lifecycle and interaction logging over a [`SessionStore`]
#[derive(Debug, Default)]
pub struct InteractionSessionTracker<S = MemorySessionStore> {
    store: S,
}

impl InteractionSessionTracker {
    /// Tracker over a fresh in-memory store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SessionStore> InteractionSessionTracker<S> {
    /// Tracker over a caller-provided store
    #[inline]
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start an active session with a generated id
    ///
    /// Always succeeds; `owner` may be `None` for anonymous play.
    pub fn start_session(&self, owner: Option<String>) -> SessionRecord {
        self.start_session_with_id(SessionId::generate(), owner)
    }

    /// Start a session under an id chosen by the caller
    ///
    /// If the id already exists the stored record is returned unchanged.
    pub fn start_session_with_id(
        &self,
        id: impl Into<SessionId>,
        owner: Option<String>,
    ) -> SessionRecord {
        let record = self.store.insert_session(SessionRecord::new(id.into(), owner));
        tracing::debug!(
            session = %record.session_id,
            anonymous = record.is_anonymous(),
            active = record.is_active,
            "session started"
        );
        record
    }

    /// Append an interaction to a session's log, timestamped now
    ///
    /// Recording against an ended session still succeeds but the entry is
    /// flagged with `after_session_end`.
    ///
    /// # Errors
    /// Returns [`TrackerError::UnknownSession`] if the id was never started.
    pub fn record_interaction(
        &self,
        session_id: &SessionId,
        scenario_key: ScenarioKey,
        trigger_tile: Option<CellRef>,
        resolved_transition: Option<ScenarioKey>,
    ) -> Result<InteractionLog, TrackerError> {
        self.record_interaction_at(
            session_id,
            scenario_key,
            trigger_tile,
            resolved_transition,
            Utc::now(),
        )
    }

    /// [`record_interaction`](Self::record_interaction) with an explicit time
    ///
    /// # Errors
    /// Returns [`TrackerError::UnknownSession`] if the id was never started.
    pub fn record_interaction_at(
        &self,
        session_id: &SessionId,
        scenario_key: ScenarioKey,
        trigger_tile: Option<CellRef>,
        resolved_transition: Option<ScenarioKey>,
        occurred_at: DateTime<Utc>,
    ) -> Result<InteractionLog, TrackerError> {
        let interaction = Interaction {
            scenario_key,
            trigger_tile,
            resolved_transition,
            occurred_at,
        };
        let log = self
            .store
            .append(session_id, interaction)
            .ok_or_else(|| TrackerError::UnknownSession(session_id.clone()))?;

        if log.after_session_end {
            tracing::warn!(
                session = %session_id,
                scenario = %scenario_key,
                "interaction recorded after session end"
            );
        } else {
            tracing::debug!(session = %session_id, scenario = %scenario_key, "interaction recorded");
        }
        Ok(log)
    }

    /// Mark a session inactive
    ///
    /// Idempotent. Unknown ids are logged and otherwise ignored.
    pub fn end_session(&self, session_id: &SessionId) {
        match self.store.deactivate(session_id) {
            Some(true) => tracing::debug!(session = %session_id, "session ended"),
            Some(false) => tracing::debug!(session = %session_id, "session already ended"),
            None => tracing::warn!(session = %session_id, "end requested for unknown session"),
        }
    }

    /// Current state of a session
    #[must_use]
    pub fn session(&self, session_id: &SessionId) -> Option<SessionRecord> {
        self.store.session(session_id)
    }

    /// Interaction log of a session in append order
    ///
    /// # Errors
    /// Returns [`TrackerError::UnknownSession`] if the id was never started.
    pub fn interactions(&self, session_id: &SessionId) -> Result<Vec<InteractionLog>, TrackerError> {
        self.store
            .interactions(session_id)
            .ok_or_else(|| TrackerError::UnknownSession(session_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: u32, ss: u32) -> ScenarioKey {
        ScenarioKey::new(s, ss)
    }

    #[test]
    fn anonymous_session_records() {
        let tracker = InteractionSessionTracker::new();
        let session = tracker.start_session(None);
        assert!(session.is_active);
        assert!(session.is_anonymous());

        let log = tracker
            .record_interaction(&session.session_id, key(1, 1), Some("B2".parse().unwrap()), Some(key(1, 2)))
            .unwrap();
        assert_eq!(log.session_id, session.session_id);
        assert_eq!(log.resolved_transition, Some(key(1, 2)));
        assert!(!log.after_session_end);
    }

    #[test]
    fn unknown_session_is_rejected() {
        let tracker = InteractionSessionTracker::new();
        let id = SessionId::from("ghost");
        let err = tracker.record_interaction(&id, key(1, 1), None, None).unwrap_err();
        assert_eq!(err, TrackerError::UnknownSession(id.clone()));
        assert!(tracker.session(&id).is_none());
        assert!(tracker.interactions(&id).is_err());
    }

    #[test]
    fn end_session_is_idempotent() {
        let tracker = InteractionSessionTracker::new();
        let session = tracker.start_session(Some("alice".into()));
        tracker.end_session(&session.session_id);
        tracker.end_session(&session.session_id);
        tracker.end_session(&SessionId::from("ghost"));
        let stored = tracker.session(&session.session_id).unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.started_at, session.started_at);
        assert_eq!(stored.owner_user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn recording_after_end_is_flagged() {
        let tracker = InteractionSessionTracker::new();
        let session = tracker.start_session(None);
        tracker.end_session(&session.session_id);
        let log = tracker
            .record_interaction(&session.session_id, key(2, 1), None, None)
            .unwrap();
        assert!(log.after_session_end);
        assert_eq!(tracker.interactions(&session.session_id).unwrap(), vec![log]);
    }

    #[test]
    fn start_with_existing_id_returns_stored() {
        let tracker = InteractionSessionTracker::new();
        let first = tracker.start_session_with_id("fixed", Some("alice".into()));
        tracker.end_session(&first.session_id);
        let again = tracker.start_session_with_id("fixed", None);
        assert_eq!(again.owner_user_id.as_deref(), Some("alice"));
        assert!(!again.is_active);
        assert_eq!(tracker.store().session_count(), 1);
    }

    #[test]
    fn explicit_timestamps_are_kept() {
        let tracker = InteractionSessionTracker::new();
        let session = tracker.start_session(None);
        let at = "2024-05-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let log = tracker
            .record_interaction_at(&session.session_id, key(1, 1), None, None, at)
            .unwrap();
        assert_eq!(log.occurred_at, at);
    }
}
