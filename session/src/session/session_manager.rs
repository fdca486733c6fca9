use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use arshare_shared::{Role, Transport, TransportEvent, TransportEventSink};

use crate::{timer::Timer, SessionConfig, SessionError, SessionEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Listening,
    Connecting,
    Connected,
    Lost,
}

// Everything that can change the session, funneled through one queue so the
// owner observes it in order
enum SessionInput {
    Transport(TransportEvent),
    ListenTimeout(u64),
    AcceptTimeout(u64),
    Emit(SessionEvent),
}

/// Drives one pairing attempt: listening as a host or searching as a guest,
/// the timeouts bounding both, and the resulting connection.
///
/// The role is fixed by the call that started the attempt
/// (`start_invitation()` makes a host, `accept_invitation()` a guest) and
/// cannot change while connected.
pub struct SessionManager {
    config: SessionConfig,
    transport: Arc<dyn Transport>,
    runtime: Handle,
    input_sender: UnboundedSender<SessionInput>,
    input_receiver: UnboundedReceiver<SessionInput>,
    state: SessionState,
    candidate: Option<Role>,
    role: Option<Role>,
    peers: usize,
    listening: bool,
    // Bumped on every new attempt and every reset; timers from an older
    // generation are ignored when they fire
    generation: u64,
    timer: Option<Timer>,
}

impl SessionManager {
    pub fn new(config: SessionConfig, transport: Arc<dyn Transport>, runtime: Handle) -> Self {
        let (input_sender, input_receiver) = mpsc::unbounded_channel();

        let sink_sender = input_sender.clone();
        transport.bind(TransportEventSink::new(move |event| {
            // The receiver only goes away with the manager itself
            let _ = sink_sender.send(SessionInput::Transport(event));
        }));

        Self {
            config,
            transport,
            runtime,
            input_sender,
            input_receiver,
            state: SessionState::Idle,
            candidate: None,
            role: None,
            peers: 0,
            listening: false,
            generation: 0,
            timer: None,
        }
    }

    // Public

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Role of the established connection, `None` until connected
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn connected_peer_count(&self) -> usize {
        self.peers
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Become discoverable as a host. If the transport cannot start, a
    /// `TransportError` event is queued and the session stays idle.
    pub fn start_invitation(&mut self) -> Result<(), SessionError> {
        self.check_can_start("start an invitation")?;
        self.begin_attempt();

        if let Err(error) = self.transport.start_listening() {
            warn!("Unable to start listening for guests: {}", error);
            self.emit(SessionEvent::TransportError(error));
            return Ok(());
        }

        info!("Listening for guests for {:?}", self.config.listen_timeout);
        self.state = SessionState::Listening;
        self.candidate = Some(Role::Host);
        self.listening = true;

        let sender = self.input_sender.clone();
        let generation = self.generation;
        self.timer = Some(Timer::schedule(
            &self.runtime,
            self.config.listen_timeout,
            move || {
                let _ = sender.send(SessionInput::ListenTimeout(generation));
            },
        ));
        Ok(())
    }

    /// Stop accepting guests. Does nothing when not listening.
    pub fn stop_invitation(&mut self) {
        if !self.listening {
            return;
        }
        self.transport.stop_listening();
        self.listening = false;
        self.timer = None;

        if self.state == SessionState::Listening {
            info!("Stopped listening before any guest connected");
            self.reset(SessionState::Idle);
        }
    }

    /// Search for a host, giving up after the configured guest timeout
    pub fn accept_invitation(&mut self) -> Result<(), SessionError> {
        self.accept_invitation_with_timeout(self.config.guest_timeout)
    }

    /// Search for a host, giving up after `timeout`
    pub fn accept_invitation_with_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<(), SessionError> {
        self.check_can_start("accept an invitation")?;
        self.begin_attempt();

        if let Err(error) = self.transport.connect() {
            warn!("Unable to search for a host: {}", error);
            self.emit(SessionEvent::TransportError(error));
            return Ok(());
        }

        info!("Searching for a host for {:?}", timeout);
        self.state = SessionState::Connecting;
        self.candidate = Some(Role::Guest);

        let sender = self.input_sender.clone();
        let generation = self.generation;
        self.timer = Some(Timer::schedule(&self.runtime, timeout, move || {
            let _ = sender.send(SessionInput::AcceptTimeout(generation));
        }));
        Ok(())
    }

    /// Disconnect every peer and return to idle, cancelling pending timers
    pub fn cancel(&mut self) {
        if self.listening {
            self.transport.stop_listening();
        }
        if self.state != SessionState::Idle {
            self.transport.disconnect_all();
        }
        self.reset(SessionState::Idle);
    }

    /// Drain everything that happened since the last call, in order. Call
    /// from the thread that owns the session.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(input) = self.input_receiver.try_recv() {
            self.handle_input(input, &mut events);
        }
        events
    }

    // Private

    fn check_can_start(&self, operation: &'static str) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle | SessionState::Lost => Ok(()),
            state => Err(SessionError::InvalidState { operation, state }),
        }
    }

    fn begin_attempt(&mut self) {
        self.reset(SessionState::Idle);
    }

    fn reset(&mut self, state: SessionState) {
        self.timer = None;
        self.generation = self.generation.wrapping_add(1);
        self.state = state;
        self.candidate = None;
        self.role = None;
        self.peers = 0;
        self.listening = false;
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.input_sender.send(SessionInput::Emit(event));
    }

    fn handle_input(&mut self, input: SessionInput, events: &mut Vec<SessionEvent>) {
        match input {
            SessionInput::Transport(event) => self.handle_transport_event(event, events),
            SessionInput::ListenTimeout(generation) => {
                if generation == self.generation {
                    self.on_listen_timeout(events);
                }
            }
            SessionInput::AcceptTimeout(generation) => {
                if generation == self.generation && self.state == SessionState::Connecting {
                    info!("No host found before the guest timeout");
                    self.transport.disconnect_all();
                    self.reset(SessionState::Idle);
                    events.push(SessionEvent::ConnectionNotFound);
                }
            }
            SessionInput::Emit(event) => events.push(event),
        }
    }

    fn handle_transport_event(&mut self, event: TransportEvent, events: &mut Vec<SessionEvent>) {
        match event {
            TransportEvent::ConnectionEstablished => self.on_connection_established(events),
            TransportEvent::ConnectionNotFound => match self.state {
                SessionState::Listening | SessionState::Connecting => {
                    if self.listening {
                        self.transport.stop_listening();
                    }
                    self.reset(SessionState::Idle);
                    events.push(SessionEvent::ConnectionNotFound);
                }
                state => debug!("Ignoring stale 'not found' while {:?}", state),
            },
            TransportEvent::ConnectionAllLost => {
                if self.state == SessionState::Connected {
                    warn!("Lost every peer of the {:?} session", self.role);
                    if self.listening {
                        self.transport.stop_listening();
                    }
                    self.reset(SessionState::Lost);
                    events.push(SessionEvent::ConnectionAllLost);
                } else {
                    debug!("Ignoring 'all lost' while {:?}", self.state);
                }
            }
            TransportEvent::ListenerStarted => {
                if self.listening {
                    events.push(SessionEvent::ListenerStarted);
                }
            }
            TransportEvent::Fault(fault) => {
                warn!("Transport fault: {}", fault);
                events.push(SessionEvent::TransportFault(fault));
            }
            TransportEvent::Received(bytes) => {
                if self.state == SessionState::Connected {
                    events.push(SessionEvent::Received(bytes));
                } else {
                    debug!(
                        "Dropping {} bytes received while {:?}",
                        bytes.len(),
                        self.state
                    );
                }
            }
        }
    }

    fn on_connection_established(&mut self, events: &mut Vec<SessionEvent>) {
        match (self.state, self.candidate) {
            (SessionState::Listening, Some(role @ Role::Host))
            | (SessionState::Connecting, Some(role @ Role::Guest)) => {
                self.state = SessionState::Connected;
                self.role = Some(role);
                self.peers = 1;
                if role == Role::Guest {
                    // Found the host, the search window is over
                    self.timer = None;
                }
                info!("Connected as {}", role);
                events.push(SessionEvent::ConnectionEstablished {
                    role,
                    peers: self.peers,
                });
            }
            (SessionState::Connected, _) if self.role == Some(Role::Host) && self.listening => {
                self.peers += 1;
                info!("Guest joined, {} connected", self.peers);
                events.push(SessionEvent::PeerConnected { peers: self.peers });
            }
            (state, _) => warn!("Unexpected connection while {:?}, ignoring", state),
        }
    }

    fn on_listen_timeout(&mut self, events: &mut Vec<SessionEvent>) {
        if !self.listening {
            return;
        }
        info!("Listening window closed with {} guest(s)", self.peers);
        self.transport.stop_listening();
        self.listening = false;
        self.timer = None;

        if self.peers == 0 {
            self.reset(SessionState::Idle);
            events.push(SessionEvent::ConnectionNotFound);
        } else {
            events.push(SessionEvent::ListenerStopped { peers: self.peers });
        }
    }
}
