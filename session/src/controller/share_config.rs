use std::{default::Default, time::Duration};

use arshare_shared::DEFAULT_SCREEN_TIMEOUT;

use crate::{CloudAnchorConfig, FrameSyncConfig, SessionConfig};

/// Contains Config properties which will be used by the
/// ShareAnchorController
#[derive(Clone, Debug)]
pub struct ShareConfig {
    /// Used to configure pairing and its timeouts
    pub session: SessionConfig,
    /// Used to configure cloud anchor hosting and resolving
    pub cloud_anchor: CloudAnchorConfig,
    /// Used to configure the pose broadcast
    pub frame_sync: FrameSyncConfig,
    /// Delay before a deferred screen change is surfaced
    pub screen_timeout: Duration,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            cloud_anchor: CloudAnchorConfig::default(),
            frame_sync: FrameSyncConfig::default(),
            screen_timeout: DEFAULT_SCREEN_TIMEOUT,
        }
    }
}
