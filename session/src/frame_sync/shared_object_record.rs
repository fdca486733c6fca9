use arshare_shared::{ObjectHandle, ObjectType, SceneGraph};

/// An object registered for sharing. While a guest shares, the object sits
/// under the shared root and `parent_before_sharing` remembers where it came
/// from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedObjectRecord {
    pub object_type: ObjectType,
    pub object: ObjectHandle,
    pub parent_before_sharing: Option<ObjectHandle>,
}

impl SharedObjectRecord {
    pub fn new(object_type: ObjectType, object: ObjectHandle) -> Self {
        Self {
            object_type,
            object,
            parent_before_sharing: None,
        }
    }

    pub(crate) fn move_to_shared_root(&mut self, scene: &dyn SceneGraph) {
        if self.parent_before_sharing.is_some() {
            return;
        }
        if let Some(parent) = scene.parent(self.object) {
            scene.reparent(self.object, None);
            self.parent_before_sharing = Some(parent);
        }
    }

    pub(crate) fn restore_parent(&mut self, scene: &dyn SceneGraph) {
        if let Some(parent) = self.parent_before_sharing.take() {
            scene.reparent(self.object, Some(parent));
        }
    }
}
