use std::{default::Default, time::Duration};

use arshare_shared::POSE_BROADCAST_INTERVAL;

/// Contains Config properties which will be used by the SharedFrameSync
#[derive(Clone, Debug)]
pub struct FrameSyncConfig {
    /// Period of the host's pose broadcast
    pub broadcast_interval: Duration,
}

impl Default for FrameSyncConfig {
    fn default() -> Self {
        Self {
            broadcast_interval: POSE_BROADCAST_INTERVAL,
        }
    }
}
