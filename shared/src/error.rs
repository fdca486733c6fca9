use std::time::Duration;

use thiserror::Error;

use crate::{CloudAnchorError, CodecError, ObjectType, TransportError};

/// Top-level error for everything that can go wrong while sharing a frame
/// between devices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The transport could not be started (radio off, not discoverable)
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(TransportError),

    /// No peer showed up before the timeout
    #[error("No peer found within {timeout:?}")]
    ConnectionTimeout {
        timeout: Duration,
    },

    /// A named anchor needed by the workflow is missing or not tracked
    #[error("No tracked anchor of type '{object_type}' is available")]
    AnchorNotAvailable {
        object_type: ObjectType,
    },

    /// A resolve batch failed; carries the first failing item
    #[error("Cloud anchor resolve failed: {0}")]
    AnchorResolveFailed(CloudAnchorError),

    /// A host batch failed; carries the first failing item
    #[error("Cloud anchor host failed: {0}")]
    AnchorHostFailed(CloudAnchorError),

    /// A message could not be delivered to the peers
    #[error("Message delivery failed: {0}")]
    MessageDeliveryFailed(TransportError),

    /// A peer sent a malformed or unexpected envelope
    #[error("Protocol violation: {0}")]
    ProtocolViolation(#[from] CodecError),
}
