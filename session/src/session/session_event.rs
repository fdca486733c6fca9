use arshare_shared::{Role, TransportError, TransportFault};

/// Everything a session reports to its owner, in the order it happened
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The transport is discoverable and waiting for guests
    ListenerStarted,
    /// The first peer connected; `role` follows from the call that started
    /// the session
    ConnectionEstablished { role: Role, peers: usize },
    /// Another guest joined an already connected host
    PeerConnected { peers: usize },
    /// The listening window closed with `peers` guests connected
    ListenerStopped { peers: usize },
    /// No peer was found before the timeout, the session is idle again
    ConnectionNotFound,
    /// Every peer disconnected
    ConnectionAllLost,
    /// The transport reported a problem after starting
    TransportFault(TransportFault),
    /// The transport could not be started
    TransportError(TransportError),
    /// Bytes received from a peer
    Received(Vec<u8>),
}
