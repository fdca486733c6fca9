use std::sync::Arc;

use arshare_session::SharedFrameSync;
use arshare_shared::{ObjectHandle, ObjectType};
use log::info;

use crate::{Action, ActionId};

/// The character is being placed by the user. While here it is registered
/// with the shared frame, so a guest sees it under the shared root.
pub struct Editing {
    frame_sync: Arc<SharedFrameSync>,
    character: ObjectHandle,
}

impl Editing {
    pub fn new(frame_sync: Arc<SharedFrameSync>, character: ObjectHandle) -> Self {
        Self {
            frame_sync,
            character,
        }
    }
}

impl Action for Editing {
    fn id(&self) -> ActionId {
        ActionId::Editing
    }

    fn entry(&mut self) {
        info!("Character entering {}", self.id());
        self.frame_sync
            .register_shared_object(ObjectType::PET, self.character);
    }

    fn exit(&mut self) {
        info!("Character leaving {}", self.id());
        self.frame_sync.unregister_shared_object(self.character);
    }

    fn run(&mut self, _frame_time: f32) {}
}
