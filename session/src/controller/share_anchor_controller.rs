use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use arshare_shared::{
    ArTracking, CloudAnchor, CloudAnchorError, CodecError, Envelope, MessageKind, ObjectType,
    Role, SceneGraph, ShareError, Transport, ViewCommand,
};

use crate::{
    timer::Timer, CloudAnchorCoordinator, HostReadyReceiver, HostReport, MessageService,
    NamedAnchor, ResolvedAnchor, SessionError, SessionEvent, SessionManager, ShareConfig,
    ShareEvent, SharedFrameSync,
};

/// The collaborators a controller is built from
#[derive(Clone)]
pub struct ShareServices {
    pub transport: Arc<dyn Transport>,
    pub tracking: Arc<dyn ArTracking>,
    pub scene: Arc<dyn SceneGraph>,
}

// Results of background work, handed back to the frame thread
enum ControllerTask {
    Resolved {
        generation: u64,
        batch: u64,
        result: Result<Vec<ResolvedAnchor>, CloudAnchorError>,
    },
    ScreenTimeout(u64, ViewCommand),
}

/// Runs the share flow on the frame thread.
///
/// Host: connect, host every anchored object, share the cloud anchors with
/// the guests and start broadcasting around the pet anchor.
/// Guest: connect, resolve the anchors the host shared and start applying
/// its poses around the resolved pet anchor.
///
/// Nothing here runs re-entrantly: transport deliveries, anchor batches and
/// timers all land in queues that [`ShareAnchorController::update`] drains.
pub struct ShareAnchorController {
    config: ShareConfig,
    runtime: Handle,
    session: SessionManager,
    coordinator: CloudAnchorCoordinator,
    host_ready: HostReadyReceiver,
    frame_sync: Arc<SharedFrameSync>,
    messages: MessageService,
    anchored_objects: Vec<NamedAnchor>,
    resolved: Vec<ResolvedAnchor>,
    task_sender: UnboundedSender<ControllerTask>,
    task_receiver: UnboundedReceiver<ControllerTask>,
    screen_timer: Option<Timer>,
    // Window of the current pairing attempt, reported if it runs out
    attempt_timeout: Duration,
    generation: u64,
    // Only the latest batch of received anchors may start sharing
    resolve_batch: u64,
}

impl ShareAnchorController {
    pub fn new(config: ShareConfig, services: ShareServices, runtime: Handle) -> Self {
        let ShareServices {
            transport,
            tracking,
            scene,
        } = services;

        let messages = MessageService::new(Arc::clone(&transport));
        let session = SessionManager::new(config.session.clone(), transport, runtime.clone());
        let (coordinator, host_ready) = CloudAnchorCoordinator::new(
            config.cloud_anchor.clone(),
            Arc::clone(&tracking),
            runtime.clone(),
        );
        let frame_sync = Arc::new(SharedFrameSync::new(
            config.frame_sync.clone(),
            scene,
            tracking,
            messages.clone(),
            runtime.clone(),
        ));
        let (task_sender, task_receiver) = mpsc::unbounded_channel();
        let attempt_timeout = config.session.listen_timeout;

        Self {
            config,
            runtime,
            session,
            coordinator,
            host_ready,
            frame_sync,
            messages,
            anchored_objects: Vec::new(),
            resolved: Vec::new(),
            task_sender,
            task_receiver,
            screen_timer: None,
            attempt_timeout,
            generation: 0,
            resolve_batch: 0,
        }
    }

    // Public

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn coordinator(&self) -> &CloudAnchorCoordinator {
        &self.coordinator
    }

    pub fn frame_sync(&self) -> Arc<SharedFrameSync> {
        Arc::clone(&self.frame_sync)
    }

    pub fn messages(&self) -> &MessageService {
        &self.messages
    }

    /// Anchors hosted when this device becomes the host. One per type; a
    /// later anchor replaces an earlier one of the same type.
    pub fn add_anchored_object(&mut self, anchor: NamedAnchor) {
        self.anchored_objects
            .retain(|existing| existing.object_type != anchor.object_type);
        self.anchored_objects.push(anchor);
    }

    pub fn remove_anchored_object(&mut self, object_type: &ObjectType) {
        self.anchored_objects
            .retain(|existing| &existing.object_type != object_type);
    }

    /// Become discoverable as the host
    pub fn host(&mut self) -> Result<(), SessionError> {
        self.session.start_invitation()?;
        self.attempt_timeout = self.config.session.listen_timeout;
        Ok(())
    }

    /// Look for a host to join
    pub fn join(&mut self) -> Result<(), SessionError> {
        self.session.accept_invitation()?;
        self.attempt_timeout = self.config.session.guest_timeout;
        Ok(())
    }

    /// Tear the whole flow down: disconnect, stop sharing, drop every
    /// pending timer and anchor operation.
    pub fn cancel(&mut self) {
        self.session.cancel();
        self.abandon();
    }

    /// Drain every queue and advance the flow. Call once per frame.
    pub fn update(&mut self) -> Vec<ShareEvent> {
        let mut events = Vec::new();

        for event in self.session.poll() {
            self.handle_session_event(event, &mut events);
        }
        while let Ok(report) = self.host_ready.try_recv() {
            self.handle_host_ready(report, &mut events);
        }
        while let Ok(task) = self.task_receiver.try_recv() {
            self.handle_task(task, &mut events);
        }

        events
    }

    // Private

    fn abandon(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.screen_timer = None;
        let was_sharing = self.frame_sync.is_sharing();
        self.frame_sync.stop_sharing();
        if was_sharing {
            debug!("Sharing abandoned");
        }
        self.coordinator.reset();
        while self.host_ready.try_recv().is_ok() {}
        let resolved = std::mem::take(&mut self.resolved);
        self.coordinator.release_resolved(&resolved);
    }

    fn handle_session_event(&mut self, event: SessionEvent, events: &mut Vec<ShareEvent>) {
        match event {
            SessionEvent::ListenerStarted => events.push(ShareEvent::ListenerStarted),
            SessionEvent::ConnectionEstablished { role, peers } => {
                events.push(ShareEvent::ConnectionEstablished { role, peers });
                if role == Role::Host {
                    info!(
                        "Hosting {} anchored object(s) for the guests",
                        self.anchored_objects.len()
                    );
                    self.coordinator.host_anchors(self.anchored_objects.clone());
                }
            }
            SessionEvent::PeerConnected { peers } => {
                events.push(ShareEvent::PeerConnected { peers });
                // Late guests get the anchors that were already shared
                if self.frame_sync.is_sharing() {
                    let anchors = self.coordinator.cloud_anchors();
                    if let Err(error) = self.messages.share_cloud_anchors(anchors) {
                        warn!("Unable to share anchors with the new guest: {}", error);
                        events.push(ShareEvent::Error(error));
                    }
                }
            }
            SessionEvent::ListenerStopped { peers } => {
                events.push(ShareEvent::ListenerStopped { peers })
            }
            SessionEvent::ConnectionNotFound => {
                events.push(ShareEvent::Error(ShareError::ConnectionTimeout {
                    timeout: self.attempt_timeout,
                }))
            }
            SessionEvent::ConnectionAllLost => {
                let was_sharing = self.frame_sync.is_sharing();
                self.abandon();
                events.push(ShareEvent::ConnectionLost);
                if was_sharing {
                    events.push(ShareEvent::SharingStopped);
                }
            }
            SessionEvent::TransportFault(fault) => events.push(ShareEvent::TransportFault(fault)),
            SessionEvent::TransportError(error) => {
                events.push(ShareEvent::Error(ShareError::TransportUnavailable(error)))
            }
            SessionEvent::Received(bytes) => match self.messages.decode(&bytes) {
                Ok(envelope) => self.handle_envelope(envelope, events),
                Err(error) => {
                    warn!("Discarding {} received bytes: {}", bytes.len(), error);
                    events.push(ShareEvent::Error(error));
                }
            },
        }
    }

    fn handle_envelope(&mut self, envelope: Envelope, events: &mut Vec<ShareEvent>) {
        match envelope {
            Envelope::ViewCommand(command) => self.handle_view_command(command, events),
            Envelope::ShareCloudAnchors(anchors) => {
                if self.session.role() != Some(Role::Guest) {
                    events.push(ShareEvent::Error(ShareError::ProtocolViolation(
                        CodecError::UnexpectedMessage {
                            kind: MessageKind::ShareCloudAnchors,
                        },
                    )));
                    return;
                }
                self.resolve(anchors);
            }
            Envelope::UpdatePoses(poses) => {
                let applied = self.frame_sync.apply_poses(&poses);
                debug!("Applied {}/{} received pose(s)", applied, poses.len());
            }
        }
    }

    fn handle_view_command(&mut self, command: ViewCommand, events: &mut Vec<ShareEvent>) {
        match command {
            ViewCommand::SHOW_MODE_SHARE_ANCHOR_VIEW | ViewCommand::SHARED_HOST => {
                events.push(ShareEvent::ViewCommand(command))
            }
            ViewCommand::LOOKING_SIDE_BY_SIDE => {
                let sender = self.task_sender.clone();
                let generation = self.generation;
                self.screen_timer = Some(Timer::schedule(
                    &self.runtime,
                    self.config.screen_timeout,
                    move || {
                        let _ = sender.send(ControllerTask::ScreenTimeout(generation, command));
                    },
                ));
            }
            unknown => debug!("Unknown view command: {}", unknown),
        }
    }

    fn resolve(&mut self, anchors: Vec<CloudAnchor>) {
        info!("Received {} cloud anchor(s) from the host", anchors.len());
        // A newer batch supersedes whatever was resolved before
        self.frame_sync.stop_sharing();
        let previous = std::mem::take(&mut self.resolved);
        self.coordinator.release_resolved(&previous);

        // Left to finish even if the flow is abandoned, so that whatever it
        // resolved is handed back and released
        let resolving = self.coordinator.resolve_anchors(anchors);
        self.resolve_batch = self.resolve_batch.wrapping_add(1);
        let sender = self.task_sender.clone();
        let generation = self.generation;
        let batch = self.resolve_batch;
        self.runtime.spawn(async move {
            let result = resolving.await;
            let _ = sender.send(ControllerTask::Resolved {
                generation,
                batch,
                result,
            });
        });
    }

    fn handle_host_ready(&mut self, report: HostReport, events: &mut Vec<ShareEvent>) {
        let anchors = match report.into_result() {
            Ok(anchors) => anchors,
            Err(first) => {
                warn!("Hosting failed: {}", first);
                events.push(ShareEvent::Error(ShareError::AnchorHostFailed(first)));
                return;
            }
        };
        events.push(ShareEvent::HostReady {
            anchors: anchors.len(),
        });

        for command in [ViewCommand::SHARED_HOST, ViewCommand::LOOKING_SIDE_BY_SIDE] {
            if let Err(error) = self.messages.send_view_command(command) {
                warn!("Command {} was not delivered: {}", command, error);
            }
        }

        // Share everything hosted so far, not only this batch
        let shared = self.coordinator.cloud_anchors();
        let count = shared.len();
        if let Err(error) = self.messages.share_cloud_anchors(shared) {
            warn!("Unable to share the cloud anchors: {}", error);
            events.push(ShareEvent::Error(error));
            return;
        }
        events.push(ShareEvent::AnchorsShared { anchors: count });

        match self
            .messages
            .send_view_command(ViewCommand::SHOW_MODE_SHARE_ANCHOR_VIEW)
        {
            Ok(()) => events.push(ShareEvent::ViewCommand(
                ViewCommand::SHOW_MODE_SHARE_ANCHOR_VIEW,
            )),
            Err(error) => warn!("Command to show the paired view failed: {}", error),
        }

        match self.coordinator.named_anchor(&ObjectType::PET) {
            Some(pet) => {
                if self.frame_sync.start_sharing(pet.anchor, Role::Host) {
                    events.push(ShareEvent::SharingStarted(Role::Host));
                }
            }
            None => events.push(ShareEvent::Error(ShareError::AnchorNotAvailable {
                object_type: ObjectType::PET,
            })),
        }
    }

    fn handle_task(&mut self, task: ControllerTask, events: &mut Vec<ShareEvent>) {
        match task {
            ControllerTask::Resolved {
                generation,
                batch,
                result,
            } => {
                if generation != self.generation || batch != self.resolve_batch {
                    if let Ok(stale) = result {
                        debug!("Releasing {} superseded resolved anchor(s)", stale.len());
                        self.coordinator.release_resolved(&stale);
                    }
                    return;
                }
                self.on_resolved(result, events);
            }
            ControllerTask::ScreenTimeout(generation, command) => {
                if generation == self.generation {
                    self.screen_timer = None;
                    events.push(ShareEvent::ViewCommand(command));
                }
            }
        }
    }

    fn on_resolved(
        &mut self,
        result: Result<Vec<ResolvedAnchor>, CloudAnchorError>,
        events: &mut Vec<ShareEvent>,
    ) {
        let resolved = match result {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!("Resolving the host's anchors failed: {}", error);
                events.push(ShareEvent::Error(ShareError::AnchorResolveFailed(error)));
                return;
            }
        };
        info!("All {} anchor(s) resolved", resolved.len());
        events.push(ShareEvent::AnchorsResolved {
            anchors: resolved.len(),
        });

        // The resolved pet pose becomes this guest's shared origin
        let pet = resolved
            .iter()
            .find(|anchor| anchor.object_type() == &ObjectType::PET)
            .map(ResolvedAnchor::anchor);
        self.resolved = resolved;

        match pet {
            Some(anchor) => {
                if self.frame_sync.start_sharing(anchor, Role::Guest) {
                    events.push(ShareEvent::SharingStarted(Role::Guest));
                }
            }
            None => events.push(ShareEvent::Error(ShareError::AnchorNotAvailable {
                object_type: ObjectType::PET,
            })),
        }
    }
}
