use std::sync::Arc;

use arshare_session::SharedFrameSync;
use arshare_shared::{ObjectHandle, SceneGraph};
use log::info;

use crate::{Action, ActionId};

/// The character rests on the shared anchor while a sharing session runs.
/// Leaving the state snaps it to the shared anchor's current pose.
pub struct Sharing {
    frame_sync: Arc<SharedFrameSync>,
    scene: Arc<dyn SceneGraph>,
    character: ObjectHandle,
}

impl Sharing {
    pub fn new(
        frame_sync: Arc<SharedFrameSync>,
        scene: Arc<dyn SceneGraph>,
        character: ObjectHandle,
    ) -> Self {
        Self {
            frame_sync,
            scene,
            character,
        }
    }
}

impl Action for Sharing {
    fn id(&self) -> ActionId {
        ActionId::Sharing
    }

    fn entry(&mut self) {
        info!("Character entering {}", self.id());
    }

    fn exit(&mut self) {
        info!("Character leaving {}", self.id());
        if !self.frame_sync.is_sharing() {
            return;
        }
        if let Some(anchor) = self.frame_sync.shared_anchor_transform() {
            self.scene.set_transform(self.character, anchor);
        }
    }

    fn run(&mut self, _frame_time: f32) {}
}
