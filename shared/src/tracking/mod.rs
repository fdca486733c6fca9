pub mod error;

use async_trait::async_trait;
use glam::Mat4;

use crate::{AnchorHandle, CloudAnchorErrorKind};

/// The AR tracking system: device pose, local anchors and the raw cloud
/// anchor primitives.
#[async_trait]
pub trait ArTracking: Send + Sync {
    /// Current camera pose in world space
    fn device_pose(&self) -> Mat4;

    /// Create a local anchor at `pose`
    fn create_local_anchor(&self, pose: Mat4) -> AnchorHandle;

    /// Current world pose of `anchor`; `None` once the anchor is no longer
    /// tracked
    fn anchor_pose(&self, anchor: AnchorHandle) -> Option<Mat4>;

    /// Stop tracking `anchor` and release it
    fn remove_anchor(&self, anchor: AnchorHandle);

    /// Persist `anchor` remotely, returning its cloud id
    async fn host_anchor(&self, anchor: AnchorHandle) -> Result<String, CloudAnchorErrorKind>;

    /// Resolve a cloud id hosted by another device into a local anchor
    async fn resolve_anchor(&self, cloud_id: &str) -> Result<AnchorHandle, CloudAnchorErrorKind>;
}
