use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::ObjectType;

/// An anchor hosted by the tracking system, resolvable on other devices by
/// its cloud id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudAnchor {
    pub object_type: ObjectType,
    pub cloud_id: String,
}

impl CloudAnchor {
    pub fn new(object_type: ObjectType, cloud_id: impl Into<String>) -> Self {
        Self {
            object_type,
            cloud_id: cloud_id.into(),
        }
    }
}

/// Pose of one shared object, relative to the shared anchor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharedObjectPose {
    pub object_type: ObjectType,
    pub matrix: Mat4,
}

impl SharedObjectPose {
    pub fn new(object_type: ObjectType, matrix: Mat4) -> Self {
        Self {
            object_type,
            matrix,
        }
    }
}
