//! Submission error taxonomy.

use thiserror::Error;

/// Errors that abort a submission before a risk verdict is produced.
///
/// None of these are fatal to the process: the form stays usable for
/// correction, except `SessionLocked` which holds for the rest of the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A required field was missing, non-numeric, or out of range.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The overtrading kill switch has fired.
    #[error("daily trade limit reached after {trades_logged} trades, journaling is locked for this session")]
    SessionLocked { trades_logged: u32 },

    /// No open journal entry matches the given id.
    #[error("no open journal entry matching id '{id}'")]
    UnknownEntry { id: String },
}

impl SubmitError {
    /// Stable tag for structured sinks.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::InvalidInput { .. } => "invalid_input",
            SubmitError::SessionLocked { .. } => "session_locked",
            SubmitError::UnknownEntry { .. } => "unknown_entry",
        }
    }
}
