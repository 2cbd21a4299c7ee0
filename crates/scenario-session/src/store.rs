//! Session storage seam
//!
//! The tracker never touches storage directly. Production deployments
//! implement [`SessionStore`] over their database; [`MemorySessionStore`]
//! serves tests and offline tooling.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::types::{Interaction, InteractionLog, SessionId, SessionRecord};

/// Persistence for sessions and their interaction logs
///
/// `append` must be atomic per call: the active flag it reads and the log
/// entry it writes belong to the same session state.
pub trait SessionStore: Send + Sync {
    /// Insert `record` unless its id exists; return the stored record
    fn insert_session(&self, record: SessionRecord) -> SessionRecord;

    /// Fetch a session
    fn session(&self, id: &SessionId) -> Option<SessionRecord>;

    /// Append an interaction; `None` if the session does not exist
    fn append(&self, id: &SessionId, interaction: Interaction) -> Option<InteractionLog>;

    /// Clear the active flag; `None` if unknown, else whether it was active
    fn deactivate(&self, id: &SessionId) -> Option<bool>;

    /// Logged interactions in append order; `None` if unknown
    fn interactions(&self, id: &SessionId) -> Option<Vec<InteractionLog>>;

    /// Number of sessions
    fn session_count(&self) -> usize;
}

#[derive(Debug)]
struct SessionEntry {
    record: SessionRecord,
    log: Vec<InteractionLog>,
}

/// In-memory [`SessionStore`]
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
}

impl MemorySessionStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn insert_session(&self, record: SessionRecord) -> SessionRecord {
        match self.sessions.entry(record.session_id.clone()) {
            Entry::Occupied(existing) => existing.get().record.clone(),
            Entry::Vacant(slot) => {
                slot.insert(SessionEntry {
                    record: record.clone(),
                    log: Vec::new(),
                });
                record
            }
        }
    }

    fn session(&self, id: &SessionId) -> Option<SessionRecord> {
        self.sessions.get(id).map(|e| e.record.clone())
    }

    fn append(&self, id: &SessionId, interaction: Interaction) -> Option<InteractionLog> {
        // Shard write lock held for the read-check-push
        let mut entry = self.sessions.get_mut(id)?;
        let log = InteractionLog::new(&entry.record, interaction);
        entry.log.push(log.clone());
        Some(log)
    }

    fn deactivate(&self, id: &SessionId) -> Option<bool> {
        let mut entry = self.sessions.get_mut(id)?;
        let was_active = entry.record.is_active;
        entry.record.is_active = false;
        Some(was_active)
    }

    fn interactions(&self, id: &SessionId) -> Option<Vec<InteractionLog>> {
        self.sessions.get(id).map(|e| e.log.clone())
    }

    fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scenario_config::ScenarioKey;

    fn interaction() -> Interaction {
        Interaction {
            scenario_key: ScenarioKey::new(1, 1),
            trigger_tile: None,
            resolved_transition: None,
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn insert_keeps_first_record() {
        let store = MemorySessionStore::new();
        let id = SessionId::from("s1");
        let first = store.insert_session(SessionRecord::new(id.clone(), Some("alice".into())));
        let second = store.insert_session(SessionRecord::new(id.clone(), None));
        assert_eq!(first, second);
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn append_to_unknown_is_none() {
        let store = MemorySessionStore::new();
        assert!(store.append(&SessionId::from("nope"), interaction()).is_none());
        assert!(store.interactions(&SessionId::from("nope")).is_none());
        assert!(store.deactivate(&SessionId::from("nope")).is_none());
    }

    #[test]
    fn deactivate_reports_previous_state() {
        let store = MemorySessionStore::new();
        let id = SessionId::from("s1");
        store.insert_session(SessionRecord::new(id.clone(), None));
        assert_eq!(store.deactivate(&id), Some(true));
        assert_eq!(store.deactivate(&id), Some(false));
        let log = store.append(&id, interaction()).unwrap();
        assert!(log.after_session_end);
        assert_eq!(store.interactions(&id).unwrap().len(), 1);
    }
}
