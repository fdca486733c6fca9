//! In-memory transport for driving a session without a radio.
//! Tests play the remote side by pushing events through the bound sink.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use arshare_shared::{
    Envelope, Transport, TransportError, TransportEvent, TransportEventSink,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportCall {
    StartListening,
    StopListening,
    Connect,
    DisconnectAll,
}

#[derive(Default)]
pub struct FakeTransport {
    sink: Mutex<Option<TransportEventSink>>,
    calls: Mutex<Vec<TransportCall>>,
    sent: Mutex<Vec<Vec<u8>>>,
    fail_start: AtomicBool,
    fail_sends: AtomicBool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` as if the radio had observed it
    pub fn push(&self, event: TransportEvent) {
        let sink = self.sink.lock().clone();
        match sink {
            Some(sink) => sink.push(event),
            None => panic!("FakeTransport was never bound to a session"),
        }
    }

    /// Deliver `envelope` as if a peer had sent it
    pub fn receive(&self, envelope: &Envelope) {
        let bytes = envelope.encode().expect("envelope should encode");
        self.push(TransportEvent::Received(bytes));
    }

    pub fn set_fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, call: TransportCall) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    /// Every payload delivered so far, decoded
    pub fn sent_envelopes(&self) -> Vec<Envelope> {
        self.sent
            .lock()
            .iter()
            .map(|bytes| Envelope::decode(bytes).expect("sent bytes should decode"))
            .collect()
    }

    pub fn clear_sent(&self) {
        self.sent.lock().clear();
    }
}

impl Transport for FakeTransport {
    fn bind(&self, sink: TransportEventSink) {
        *self.sink.lock() = Some(sink);
    }

    fn start_listening(&self) -> Result<(), TransportError> {
        self.calls.lock().push(TransportCall::StartListening);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable {
                reason: "radio off".to_string(),
            });
        }
        Ok(())
    }

    fn stop_listening(&self) {
        self.calls.lock().push(TransportCall::StopListening);
    }

    fn connect(&self) -> Result<(), TransportError> {
        self.calls.lock().push(TransportCall::Connect);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable {
                reason: "radio off".to_string(),
            });
        }
        Ok(())
    }

    fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed {
                payload_size: payload.len(),
                reason: "link dropped".to_string(),
            });
        }
        self.sent.lock().push(payload.to_vec());
        Ok(())
    }

    fn disconnect_all(&self) {
        self.calls.lock().push(TransportCall::DisconnectAll);
    }
}
