use std::{fmt, sync::Arc};

/// Failures a transport reports asynchronously, after a call already
/// returned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportFault {
    /// The radio backing the transport is switched off
    RadioDisabled,
    /// The device could not be made visible to other devices
    NotDiscoverable,
}

impl fmt::Display for TransportFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFault::RadioDisabled => f.write_str("radio disabled"),
            TransportFault::NotDiscoverable => f.write_str("device not discoverable"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    ConnectionEstablished,
    ConnectionNotFound,
    ConnectionAllLost,
    ListenerStarted,
    Fault(TransportFault),
    Received(Vec<u8>),
}

/// Where a transport pushes its events. Cloning is cheap; every clone feeds
/// the same queue, in call order.
#[derive(Clone)]
pub struct TransportEventSink {
    push: Arc<dyn Fn(TransportEvent) + Send + Sync>,
}

impl TransportEventSink {
    pub fn new<F>(push: F) -> Self
    where
        F: Fn(TransportEvent) + Send + Sync + 'static,
    {
        Self {
            push: Arc::new(push),
        }
    }

    pub fn push(&self, event: TransportEvent) {
        (self.push)(event);
    }
}

impl fmt::Debug for TransportEventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportEventSink").finish_non_exhaustive()
    }
}
