//! Tracker errors

use crate::types::SessionId;

/// Error from the session tracker
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Session id was never started
    #[error("unknown session '{0}'")]
    UnknownSession(SessionId),
}

impl TrackerError {
    /// Session the error refers to
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        match self {
            Self::UnknownSession(id) => id,
        }
    }
}
