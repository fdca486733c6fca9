use std::{default::Default, time::Duration};

use arshare_shared::{DEFAULT_GUEST_TIMEOUT, DEFAULT_SERVER_LISTENING_TIMEOUT};

/// Contains Config properties which will be used by the SessionManager
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Absolute duration a host stays discoverable after
    /// `start_invitation()`
    pub listen_timeout: Duration,
    /// How long `accept_invitation()` waits for a host before reporting
    /// that none was found
    pub guest_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            listen_timeout: DEFAULT_SERVER_LISTENING_TIMEOUT,
            guest_timeout: DEFAULT_GUEST_TIMEOUT,
        }
    }
}
