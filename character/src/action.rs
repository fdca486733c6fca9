use tokio::sync::mpsc::UnboundedSender;

use crate::ActionId;

/// One state of the character: entered, run once per frame, exited.
pub trait Action: Send {
    fn id(&self) -> ActionId;

    fn entry(&mut self);

    fn exit(&mut self);

    fn run(&mut self, frame_time: f32);
}

/// Handed to actions that finish on their own, to tell the owner of the
/// state machine they are done.
#[derive(Clone, Debug)]
pub struct ActionListener {
    sender: UnboundedSender<ActionId>,
}

impl ActionListener {
    pub(crate) fn new(sender: UnboundedSender<ActionId>) -> Self {
        Self { sender }
    }

    pub fn on_action_end(&self, action: ActionId) {
        // The owner may have dropped its receiver; nothing is waiting then
        let _ = self.sender.send(action);
    }
}
