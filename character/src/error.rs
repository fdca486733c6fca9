use thiserror::Error;

use crate::ActionId;

/// Errors that can occur while switching character actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action was never added to the state machine
    #[error("Action {action} is not registered with this state machine. Add it with add_action() first")]
    UnknownAction {
        action: ActionId,
    },
}
