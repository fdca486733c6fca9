use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;
use tokio::{runtime::Handle, time::MissedTickBehavior};

use arshare_shared::{
    rebase, AnchorHandle, AnchorSpace, ArTracking, Mat4, ObjectHandle, ObjectType, Role,
    SceneGraph, ShareError, SharedObjectPose,
};

use crate::{timer::Timer, FrameSyncConfig, MessageService, SharedObjectRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SharingMode {
    Off,
    Host,
    Guest,
}

impl From<Role> for SharingMode {
    fn from(role: Role) -> Self {
        match role {
            Role::Host => SharingMode::Host,
            Role::Guest => SharingMode::Guest,
        }
    }
}

/// Keeps registered objects aligned across devices.
///
/// The host periodically sends every registered object's pose relative to
/// the shared anchor; the guest re-expresses received poses against its own
/// view of that anchor. Registry changes and broadcast ticks run under the
/// same lock, so objects can be (un)registered from the frame thread while
/// the broadcast runs on the background scheduler.
pub struct SharedFrameSync {
    inner: Arc<FrameSyncInner>,
    broadcast: Mutex<Option<Timer>>,
}

struct FrameSyncInner {
    config: FrameSyncConfig,
    scene: Arc<dyn SceneGraph>,
    tracking: Arc<dyn ArTracking>,
    messages: MessageService,
    runtime: Handle,
    state: Mutex<FrameSyncState>,
}

struct FrameSyncState {
    mode: SharingMode,
    shared_anchor: Option<AnchorHandle>,
    records: Vec<SharedObjectRecord>,
}

impl SharedFrameSync {
    pub fn new(
        config: FrameSyncConfig,
        scene: Arc<dyn SceneGraph>,
        tracking: Arc<dyn ArTracking>,
        messages: MessageService,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(FrameSyncInner {
                config,
                scene,
                tracking,
                messages,
                runtime,
                state: Mutex::new(FrameSyncState {
                    mode: SharingMode::Off,
                    shared_anchor: None,
                    records: Vec::new(),
                }),
            }),
            broadcast: Mutex::new(None),
        }
    }

    pub fn mode(&self) -> SharingMode {
        self.inner.state.lock().mode
    }

    pub fn is_sharing(&self) -> bool {
        self.mode() != SharingMode::Off
    }

    pub fn shared_anchor(&self) -> Option<AnchorHandle> {
        self.inner.state.lock().shared_anchor
    }

    /// Current world transform of the shared anchor, if sharing and tracked
    pub fn shared_anchor_transform(&self) -> Option<Mat4> {
        let anchor = self.shared_anchor()?;
        self.inner.tracking.anchor_pose(anchor)
    }

    /// Snapshot of the registry
    pub fn records(&self) -> Vec<SharedObjectRecord> {
        self.inner.state.lock().records.clone()
    }

    /// Register `object` for sharing under `object_type`. Registering the
    /// same pair twice does nothing. On a guest the object moves under the
    /// shared root right away.
    pub fn register_shared_object(&self, object_type: ObjectType, object: ObjectHandle) -> bool {
        let mut state = self.inner.state.lock();
        if state
            .records
            .iter()
            .any(|record| record.object == object && record.object_type == object_type)
        {
            return false;
        }

        let mut record = SharedObjectRecord::new(object_type, object);
        if state.mode == SharingMode::Guest {
            record.move_to_shared_root(self.inner.scene.as_ref());
        }
        debug!("Registered shared '{}' {:?}", record.object_type, object);
        state.records.push(record);
        true
    }

    /// Remove every record of `object`, restoring its parent first
    pub fn unregister_shared_object(&self, object: ObjectHandle) -> bool {
        let mut state = self.inner.state.lock();
        let scene = self.inner.scene.as_ref();
        let before = state.records.len();
        state.records.retain_mut(|record| {
            if record.object != object {
                return true;
            }
            record.restore_parent(scene);
            false
        });
        before != state.records.len()
    }

    /// Start sharing around `shared_anchor`. Does nothing if already sharing.
    pub fn start_sharing(&self, shared_anchor: AnchorHandle, role: Role) -> bool {
        {
            let mut state = self.inner.state.lock();
            if state.mode != SharingMode::Off {
                return false;
            }
            state.shared_anchor = Some(shared_anchor);
            state.mode = SharingMode::from(role);

            if role == Role::Guest {
                let scene = self.inner.scene.as_ref();
                for record in state.records.iter_mut() {
                    record.move_to_shared_root(scene);
                }
            }
        }

        info!("Sharing started as {} around {:?}", role, shared_anchor);
        if role == Role::Host {
            self.schedule_broadcast();
        }
        true
    }

    pub fn stop_sharing(&self) {
        {
            let mut state = self.inner.state.lock();
            if state.mode == SharingMode::Guest {
                let scene = self.inner.scene.as_ref();
                for record in state.records.iter_mut() {
                    record.restore_parent(scene);
                }
            }
            if state.mode != SharingMode::Off {
                info!("Sharing stopped");
            }
            state.mode = SharingMode::Off;
            state.shared_anchor = None;
        }
        *self.broadcast.lock() = None;
    }

    /// One host broadcast: send every registered pose relative to the shared
    /// anchor. Returns the number of poses sent.
    pub fn broadcast_tick(&self) -> Result<usize, ShareError> {
        self.inner.broadcast_tick()
    }

    /// Poses of every registered object relative to the shared anchor
    pub fn relative_poses(&self) -> Result<Vec<SharedObjectPose>, ShareError> {
        self.inner.relative_poses()
    }

    /// Apply poses received from the host. Each pose lands on the first
    /// registered object of its type; unknown types are skipped. Returns the
    /// number of objects moved.
    pub fn apply_poses(&self, poses: &[SharedObjectPose]) -> usize {
        let state = self.inner.state.lock();
        if state.mode != SharingMode::Guest {
            debug!("Ignoring {} pose(s) while {:?}", poses.len(), state.mode);
            return 0;
        }

        // The anchor keeps being refined by tracking, so it is read fresh on
        // every apply
        let Some(anchor) = state
            .shared_anchor
            .and_then(|handle| self.inner.tracking.anchor_pose(handle))
        else {
            warn!("Shared anchor is not tracked, dropping pose update");
            return 0;
        };

        let mut applied = 0;
        for pose in poses {
            let Some(record) = state
                .records
                .iter()
                .find(|record| record.object_type == pose.object_type)
            else {
                continue;
            };
            self.inner
                .scene
                .set_transform(record.object, rebase(&anchor, &pose.matrix));
            applied += 1;
        }
        applied
    }

    fn schedule_broadcast(&self) {
        let inner = Arc::clone(&self.inner);
        let interval = self.inner.config.broadcast_interval;

        let task = Timer::spawn(&self.inner.runtime, async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if inner.state.lock().mode != SharingMode::Host {
                    break;
                }
                // A missed tick is superseded by the next one
                if let Err(error) = inner.broadcast_tick() {
                    warn!("Pose broadcast failed: {}", error);
                }
            }
        });
        *self.broadcast.lock() = Some(task);
    }
}

impl FrameSyncInner {
    fn relative_poses(&self) -> Result<Vec<SharedObjectPose>, ShareError> {
        let state = self.state.lock();
        // The shared origin is always the pet's anchor
        let not_available = || ShareError::AnchorNotAvailable {
            object_type: ObjectType::PET,
        };

        let anchor = state
            .shared_anchor
            .and_then(|handle| self.tracking.anchor_pose(handle))
            .ok_or_else(not_available)?;
        let space = AnchorSpace::new(&anchor).ok_or_else(not_available)?;

        Ok(state
            .records
            .iter()
            .map(|record| {
                SharedObjectPose::new(
                    record.object_type.clone(),
                    space.relative(&self.scene.transform(record.object)),
                )
            })
            .collect())
    }

    fn broadcast_tick(&self) -> Result<usize, ShareError> {
        let poses = self.relative_poses()?;
        let count = poses.len();
        self.messages.update_poses(poses)?;
        debug!("Broadcast {} pose(s)", count);
        Ok(count)
    }
}

impl Drop for SharedFrameSync {
    fn drop(&mut self) {
        self.inner.state.lock().mode = SharingMode::Off;
    }
}
