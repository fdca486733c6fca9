use thiserror::Error;

use crate::SessionState;

/// Errors returned by session calls made in the wrong state.
///
/// Transport failures are not errors of the call; they surface as
/// [`SessionEvent`](crate::SessionEvent)s so the caller can retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation is not valid in the current session state
    #[error("Cannot {operation} while the session is {state:?}. Cancel the session first")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}
