use glam::Mat4;

use crate::ObjectHandle;

/// The scene graph the core reads and writes object transforms through.
///
/// Implementations are shared between the frame thread and the broadcast
/// task, so all methods take `&self`.
pub trait SceneGraph: Send + Sync {
    /// World model matrix of `object`
    fn transform(&self, object: ObjectHandle) -> Mat4;

    /// Replace the world model matrix of `object`
    fn set_transform(&self, object: ObjectHandle, transform: Mat4);

    /// Current parent of `object`; `None` when it already sits under the
    /// shared root.
    fn parent(&self, object: ObjectHandle) -> Option<ObjectHandle>;

    /// Move `object` under `parent`, or under the shared root for `None`
    fn reparent(&self, object: ObjectHandle, parent: Option<ObjectHandle>);
}
