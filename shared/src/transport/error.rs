use thiserror::Error;

/// Errors returned synchronously by transport calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport could not be started
    #[error("Transport unavailable: {reason}. Check that the radio is enabled and retry")]
    Unavailable {
        reason: String,
    },

    /// A send was attempted with no connected peer
    #[error("No peer connected. Payload of {payload_size} bytes was dropped")]
    NotConnected {
        payload_size: usize,
    },

    /// The transport accepted the payload but failed to deliver it
    #[error("Failed to deliver payload of {payload_size} bytes: {reason}")]
    SendFailed {
        payload_size: usize,
        reason: String,
    },
}
