use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::{CloudAnchor, CodecError, MessageKind, SharedObjectPose, ViewCommand};

/// Everything paired devices say to each other, multiplexed over a single
/// channel. On the wire an envelope is its kind byte followed by the
/// `bincode` encoding of the payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Envelope {
    ViewCommand(ViewCommand),
    ShareCloudAnchors(Vec<CloudAnchor>),
    UpdatePoses(Vec<SharedObjectPose>),
}

impl Envelope {
    pub fn kind(&self) -> MessageKind {
        match self {
            Envelope::ViewCommand(_) => MessageKind::ViewCommand,
            Envelope::ShareCloudAnchors(_) => MessageKind::ShareCloudAnchors,
            Envelope::UpdatePoses(_) => MessageKind::UpdatePoses,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let kind = self.kind();
        let mut bytes = vec![kind.to_u8()];
        match self {
            Envelope::ViewCommand(command) => write_payload(&mut bytes, kind, command)?,
            Envelope::ShareCloudAnchors(anchors) => write_payload(&mut bytes, kind, anchors)?,
            Envelope::UpdatePoses(poses) => write_payload(&mut bytes, kind, poses)?,
        }
        Ok(bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (index, payload) = bytes.split_first().ok_or(CodecError::EmptyPayload)?;
        let kind = MessageKind::try_from(*index)?;
        debug!("decoding {} envelope of {} bytes", kind, payload.len());

        let envelope = match kind {
            MessageKind::ViewCommand => Envelope::ViewCommand(read_payload(kind, payload)?),
            MessageKind::ShareCloudAnchors => {
                Envelope::ShareCloudAnchors(read_payload(kind, payload)?)
            }
            MessageKind::UpdatePoses => Envelope::UpdatePoses(read_payload(kind, payload)?),
        };
        Ok(envelope)
    }
}

fn write_payload<T: Serialize + ?Sized>(
    bytes: &mut Vec<u8>,
    kind: MessageKind,
    payload: &T,
) -> Result<(), CodecError> {
    bincode::serialize_into(bytes, payload).map_err(|err| CodecError::EncodeFailed {
        kind,
        reason: err.to_string(),
    })
}

fn read_payload<T: DeserializeOwned>(kind: MessageKind, payload: &[u8]) -> Result<T, CodecError> {
    bincode::deserialize(payload).map_err(|err| CodecError::MalformedPayload {
        kind,
        payload_size: payload.len(),
        reason: err.to_string(),
    })
}
