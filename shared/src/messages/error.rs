use thiserror::Error;

use crate::MessageKind;

/// Errors that can occur while encoding or decoding envelopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Received an empty datagram
    #[error("Received an empty payload. Every envelope starts with a message kind byte")]
    EmptyPayload,

    /// Invalid message kind index received (SECURITY: potentially malicious payload)
    #[error("Invalid message kind index {index} received (valid range: 1-3). This may indicate a malformed payload or a newer peer")]
    InvalidMessageKind {
        index: u8,
    },

    /// Payload bytes did not decode as the announced kind
    #[error("Malformed {kind} payload of {payload_size} bytes: {reason}")]
    MalformedPayload {
        kind: MessageKind,
        payload_size: usize,
        reason: String,
    },

    /// A well-formed envelope arrived that is not valid in the receiver's role
    #[error("Unexpected {kind} envelope for this device's role")]
    UnexpectedMessage {
        kind: MessageKind,
    },

    /// Serialization of an outgoing envelope failed
    #[error("Failed to encode {kind} envelope: {reason}")]
    EncodeFailed {
        kind: MessageKind,
        reason: String,
    },
}
