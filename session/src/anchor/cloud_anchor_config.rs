use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the
/// CloudAnchorCoordinator
#[derive(Clone, Debug)]
pub struct CloudAnchorConfig {
    /// Upper bound on a single hosting; exceeding it fails the item with
    /// `CloudAnchorErrorKind::Timeout`
    pub host_timeout: Duration,
    /// Upper bound on a single resolve
    pub resolve_timeout: Duration,
}

impl Default for CloudAnchorConfig {
    fn default() -> Self {
        Self {
            host_timeout: Duration::from_secs(30),
            resolve_timeout: Duration::from_secs(30),
        }
    }
}
