pub mod error;
pub mod event;

use crate::{TransportError, TransportEventSink};

/// Peer link used by a session: device discovery, connection and delivery.
///
/// Everything the transport observes (connections, losses, received bytes)
/// is pushed into the sink handed to [`Transport::bind`], from whatever
/// thread the transport runs on.
pub trait Transport: Send + Sync {
    /// Install the sink that receives this transport's events
    fn bind(&self, sink: TransportEventSink);

    /// Become discoverable and accept incoming peers
    fn start_listening(&self) -> Result<(), TransportError>;

    /// Stop accepting incoming peers; existing connections stay open
    fn stop_listening(&self);

    /// Look for a listening peer and connect to it
    fn connect(&self) -> Result<(), TransportError>;

    /// Deliver `payload` to every connected peer
    fn send(&self, payload: &[u8]) -> Result<(), TransportError>;

    /// Close every connection
    fn disconnect_all(&self);
}
