use std::{sync::Arc, time::Duration};

use tokio::runtime::Handle;

use arshare_session::{SessionConfig, SessionError, SessionEvent, SessionManager, SessionState};
use arshare_shared::{Role, TransportError, TransportEvent, TransportFault};
use arshare_test::{advance, init_logger, FakeTransport, TransportCall};

fn session() -> (SessionManager, Arc<FakeTransport>) {
    init_logger();
    let transport = Arc::new(FakeTransport::new());
    let session = SessionManager::new(
        SessionConfig::default(),
        transport.clone(),
        Handle::current(),
    );
    (session, transport)
}

#[tokio::test(start_paused = true)]
async fn guest_timeout_reports_not_found_exactly_once() {
    let (mut session, transport) = session();

    session
        .accept_invitation_with_timeout(Duration::from_secs(10))
        .expect("idle session should accept");
    assert_eq!(session.state(), SessionState::Connecting);

    advance(Duration::from_millis(9_999)).await;
    assert!(session.poll().is_empty());

    advance(Duration::from_millis(1)).await;
    assert_eq!(session.poll(), vec![SessionEvent::ConnectionNotFound]);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(transport.call_count(TransportCall::DisconnectAll), 1);

    advance(Duration::from_secs(60)).await;
    assert!(session.poll().is_empty());

    // The session is usable again
    assert!(session.accept_invitation().is_ok());
    assert_eq!(session.state(), SessionState::Connecting);
}

#[tokio::test(start_paused = true)]
async fn finding_a_host_cancels_the_guest_timeout() {
    let (mut session, transport) = session();

    session.accept_invitation().expect("idle session should accept");
    transport.push(TransportEvent::ConnectionEstablished);
    assert_eq!(
        session.poll(),
        vec![SessionEvent::ConnectionEstablished {
            role: Role::Guest,
            peers: 1
        }]
    );

    advance(Duration::from_secs(30)).await;
    assert!(session.poll().is_empty());
    assert_eq!(session.state(), SessionState::Connected);
    assert_eq!(session.role(), Some(Role::Guest));
}

#[tokio::test(start_paused = true)]
async fn listen_window_without_guests_reports_not_found() {
    let (mut session, transport) = session();

    session.start_invitation().expect("idle session should listen");
    transport.push(TransportEvent::ListenerStarted);
    assert_eq!(session.poll(), vec![SessionEvent::ListenerStarted]);
    assert!(session.is_listening());

    advance(Duration::from_secs(30)).await;
    assert_eq!(session.poll(), vec![SessionEvent::ConnectionNotFound]);
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.is_listening());
    assert_eq!(transport.call_count(TransportCall::StopListening), 1);

    advance(Duration::from_secs(30)).await;
    assert!(session.poll().is_empty());
}

#[tokio::test(start_paused = true)]
async fn listen_window_is_absolute_and_keeps_connected_guests() {
    let (mut session, transport) = session();

    session.start_invitation().expect("idle session should listen");
    advance(Duration::from_secs(5)).await;
    transport.push(TransportEvent::ConnectionEstablished);
    advance(Duration::from_secs(5)).await;
    transport.push(TransportEvent::ConnectionEstablished);

    assert_eq!(
        session.poll(),
        vec![
            SessionEvent::ConnectionEstablished {
                role: Role::Host,
                peers: 1
            },
            SessionEvent::PeerConnected { peers: 2 },
        ]
    );

    // 30s after start_invitation(), not after the last guest
    advance(Duration::from_secs(20)).await;
    assert_eq!(
        session.poll(),
        vec![SessionEvent::ListenerStopped { peers: 2 }]
    );
    assert_eq!(session.state(), SessionState::Connected);
    assert_eq!(session.connected_peer_count(), 2);
    assert!(!session.is_listening());

    // Late connections are no longer accepted
    transport.push(TransportEvent::ConnectionEstablished);
    assert!(session.poll().is_empty());
}

#[tokio::test(start_paused = true)]
async fn starting_twice_is_rejected() {
    let (mut session, _transport) = session();

    session.start_invitation().expect("idle session should listen");
    match session.accept_invitation() {
        Err(SessionError::InvalidState {
            state: SessionState::Listening,
            ..
        }) => {}
        other => panic!("Expected InvalidState while listening, got {:?}", other),
    }
    assert_eq!(session.state(), SessionState::Listening);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_on_start_is_reported_as_an_event() {
    let (mut session, transport) = session();
    transport.set_fail_start(true);

    assert!(session.start_invitation().is_ok());
    match session.poll().as_slice() {
        [SessionEvent::TransportError(TransportError::Unavailable { .. })] => {}
        events => panic!("Expected a single TransportError, got {:?}", events),
    }
    assert_eq!(session.state(), SessionState::Idle);

    // No listen timer was armed
    advance(Duration::from_secs(60)).await;
    assert!(session.poll().is_empty());
}

#[tokio::test(start_paused = true)]
async fn losing_every_peer_allows_a_new_attempt() {
    let (mut session, transport) = session();

    session.accept_invitation().expect("idle session should accept");
    transport.push(TransportEvent::ConnectionEstablished);
    transport.push(TransportEvent::ConnectionAllLost);
    let events = session.poll();
    assert_eq!(events.last(), Some(&SessionEvent::ConnectionAllLost));
    assert_eq!(session.state(), SessionState::Lost);
    assert_eq!(session.role(), None);

    assert!(session.start_invitation().is_ok());
    assert_eq!(session.state(), SessionState::Listening);
}

#[tokio::test(start_paused = true)]
async fn received_bytes_are_only_forwarded_while_connected() {
    let (mut session, transport) = session();

    session.accept_invitation().expect("idle session should accept");
    transport.push(TransportEvent::Received(vec![1, 2, 3]));
    assert!(session.poll().is_empty());

    transport.push(TransportEvent::ConnectionEstablished);
    transport.push(TransportEvent::Received(vec![4, 5]));
    assert_eq!(
        session.poll().last(),
        Some(&SessionEvent::Received(vec![4, 5]))
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_pending_timeouts() {
    let (mut session, transport) = session();

    session.start_invitation().expect("idle session should listen");
    session.cancel();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(transport.call_count(TransportCall::StopListening), 1);
    assert_eq!(transport.call_count(TransportCall::DisconnectAll), 1);

    advance(Duration::from_secs(60)).await;
    assert!(session.poll().is_empty());
}

#[tokio::test(start_paused = true)]
async fn faults_pass_through() {
    let (mut session, transport) = session();

    transport.push(TransportEvent::Fault(TransportFault::RadioDisabled));
    assert_eq!(
        session.poll(),
        vec![SessionEvent::TransportFault(TransportFault::RadioDisabled)]
    );
}
