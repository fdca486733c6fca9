// The one-byte discriminator prefixed to every envelope on the wire

use std::fmt;

use crate::CodecError;

#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash)]
pub enum MessageKind {
    // A small integer command telling the peer which screen to show
    ViewCommand,
    // The host's hosted cloud anchors, to be resolved by guests
    ShareCloudAnchors,
    // Poses of shared objects relative to the shared anchor
    UpdatePoses,
}

impl MessageKind {
    pub fn to_u8(self) -> u8 {
        match self {
            MessageKind::ViewCommand => 1,
            MessageKind::ShareCloudAnchors => 2,
            MessageKind::UpdatePoses => 3,
        }
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = CodecError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            1 => Ok(MessageKind::ViewCommand),
            2 => Ok(MessageKind::ShareCloudAnchors),
            3 => Ok(MessageKind::UpdatePoses),
            // Malformed or newer peers may send indices this build does not know
            _ => Err(CodecError::InvalidMessageKind { index }),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
