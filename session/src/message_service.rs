use std::sync::Arc;

use log::debug;

use arshare_shared::{
    CloudAnchor, Envelope, ShareError, SharedObjectPose, Transport, ViewCommand,
};

/// Typed front of the transport: encodes envelopes on the way out and
/// decodes them on the way in.
#[derive(Clone)]
pub struct MessageService {
    transport: Arc<dyn Transport>,
}

impl MessageService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn send(&self, envelope: &Envelope) -> Result<(), ShareError> {
        let bytes = envelope.encode()?;
        debug!("sending {} envelope, {} bytes", envelope.kind(), bytes.len());
        self.transport
            .send(&bytes)
            .map_err(ShareError::MessageDeliveryFailed)
    }

    pub fn send_view_command(&self, command: ViewCommand) -> Result<(), ShareError> {
        self.send(&Envelope::ViewCommand(command))
    }

    pub fn share_cloud_anchors(&self, anchors: Vec<CloudAnchor>) -> Result<(), ShareError> {
        self.send(&Envelope::ShareCloudAnchors(anchors))
    }

    pub fn update_poses(&self, poses: Vec<SharedObjectPose>) -> Result<(), ShareError> {
        self.send(&Envelope::UpdatePoses(poses))
    }

    /// Decode bytes received from a peer. Malformed input is returned as a
    /// `ProtocolViolation`, never a panic.
    pub fn decode(&self, bytes: &[u8]) -> Result<Envelope, ShareError> {
        Ok(Envelope::decode(bytes)?)
    }
}
