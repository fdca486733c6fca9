use std::collections::HashMap;

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{Action, ActionError, ActionId, ActionListener};

/// Receives the id of every action that finished on its own
pub type ActionEndReceiver = UnboundedReceiver<ActionId>;

/// Exactly one action is active at a time. Switching is always decided by
/// the owner, typically in response to an [`ActionId`] arriving on the
/// receiver returned by [`ActionStateMachine::new`].
pub struct ActionStateMachine {
    actions: HashMap<ActionId, Box<dyn Action>>,
    current: Option<ActionId>,
    listener: ActionListener,
}

impl ActionStateMachine {
    pub fn new() -> (Self, ActionEndReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let machine = Self {
            actions: HashMap::new(),
            current: None,
            listener: ActionListener::new(sender),
        };
        (machine, receiver)
    }

    /// Listener to hand to actions built for this machine
    pub fn listener(&self) -> ActionListener {
        self.listener.clone()
    }

    /// Add `action`, replacing any action with the same id. Replacing the
    /// active action exits it first.
    pub fn add_action(&mut self, action: Box<dyn Action>) {
        let id = action.id();
        if self.current == Some(id) {
            if let Some(previous) = self.actions.get_mut(&id) {
                previous.exit();
            }
            self.current = None;
        }
        self.actions.insert(id, action);
    }

    pub fn current(&self) -> Option<ActionId> {
        self.current
    }

    /// Exit the active action and enter `id`
    pub fn start_action(&mut self, id: ActionId) -> Result<(), ActionError> {
        if !self.actions.contains_key(&id) {
            return Err(ActionError::UnknownAction { action: id });
        }

        if let Some(current) = self.current.take() {
            if let Some(action) = self.actions.get_mut(&current) {
                action.exit();
            }
        }

        debug!("Character action => {}", id);
        if let Some(action) = self.actions.get_mut(&id) {
            action.entry();
        }
        self.current = Some(id);
        Ok(())
    }

    /// Exit the active action, leaving none active
    pub fn stop(&mut self) {
        if let Some(current) = self.current.take() {
            if let Some(action) = self.actions.get_mut(&current) {
                action.exit();
            }
        }
    }

    /// Run the active action for one frame
    pub fn run(&mut self, frame_time: f32) {
        let Some(current) = self.current else {
            return;
        };
        if let Some(action) = self.actions.get_mut(&current) {
            action.run(frame_time);
        }
    }
}
