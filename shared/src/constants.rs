use std::time::Duration;

/// How long a listening device stays discoverable, in seconds.
pub const DISCOVERABLE_DURATION: u64 = 30;

/// Absolute duration a host keeps listening for guests.
pub const DEFAULT_SERVER_LISTENING_TIMEOUT: Duration =
    Duration::from_millis(DISCOVERABLE_DURATION * 1000);

/// How long a guest waits to find a host after accepting an invitation.
pub const DEFAULT_GUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Delay between consecutive share-mode screens.
pub const DEFAULT_SCREEN_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Period of the host's pose broadcast.
pub const POSE_BROADCAST_INTERVAL: Duration = Duration::from_millis(300);
