use thiserror::Error;

use crate::ObjectType;

/// Why hosting or resolving a cloud anchor did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CloudAnchorErrorKind {
    /// Tracking was lost before the operation completed
    #[error("tracking not available")]
    NotAvailable,

    /// The operation did not complete in time
    #[error("timed out")]
    Timeout,

    /// The remote id is unknown or expired
    #[error("cloud id unresolvable")]
    Unresolvable,
}

/// A failed host or resolve of one named anchor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cloud anchor operation for '{object_type}' failed: {kind}")]
pub struct CloudAnchorError {
    pub kind: CloudAnchorErrorKind,
    pub object_type: ObjectType,
    /// Present for resolves, and for hosts that got as far as an id
    pub cloud_id: Option<String>,
}

impl CloudAnchorError {
    pub fn new(kind: CloudAnchorErrorKind, object_type: ObjectType) -> Self {
        Self {
            kind,
            object_type,
            cloud_id: None,
        }
    }

    pub fn with_cloud_id(mut self, cloud_id: impl Into<String>) -> Self {
        self.cloud_id = Some(cloud_id.into());
        self
    }
}
