use arshare_shared::{Role, ShareError, TransportFault, ViewCommand};

/// What the share flow reports to the UI layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareEvent {
    ListenerStarted,
    ConnectionEstablished { role: Role, peers: usize },
    PeerConnected { peers: usize },
    ListenerStopped { peers: usize },
    ConnectionLost,
    TransportFault(TransportFault),
    /// Every anchored object was hosted
    HostReady { anchors: usize },
    /// The hosted anchors were sent to the guests
    AnchorsShared { anchors: usize },
    /// Every anchor received from the host was resolved
    AnchorsResolved { anchors: usize },
    SharingStarted(Role),
    SharingStopped,
    /// A screen change requested by the peer (or by this device's own flow)
    ViewCommand(ViewCommand),
    Error(ShareError),
}
