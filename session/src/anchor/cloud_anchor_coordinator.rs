use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use futures::future::join_all;
use log::{debug, info, warn};
use parking_lot::Mutex;
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use arshare_shared::{
    AnchorHandle, ArTracking, CloudAnchor, CloudAnchorError, CloudAnchorErrorKind, ObjectType,
};

use crate::{CloudAnchorConfig, HostReport, NamedAnchor, ResolvedAnchor};

/// Receives one [`HostReport`] per completed hosting batch
pub type HostReadyReceiver = UnboundedReceiver<HostReport>;

/// Turns named local anchors into cloud anchors on the host, and cloud
/// anchors back into local ones on a guest.
///
/// Hostings are grouped into batches: every `host_anchor()` issued while a
/// batch still has outstanding items joins it, and the batch's
/// [`HostReport`] is sent exactly once, after its last item settled.
pub struct CloudAnchorCoordinator {
    config: CloudAnchorConfig,
    tracking: Arc<dyn ArTracking>,
    runtime: Handle,
    ready_sender: UnboundedSender<HostReport>,
    state: Arc<Mutex<CoordinatorState>>,
}

#[derive(Default)]
struct CoordinatorState {
    anchors: HashMap<ObjectType, NamedAnchor>,
    batch: Option<HostBatch>,
    next_batch_id: u64,
    tasks: Vec<JoinHandle<()>>,
}

struct HostBatch {
    id: u64,
    outstanding: usize,
    report: HostReport,
}

impl CloudAnchorCoordinator {
    pub fn new(
        config: CloudAnchorConfig,
        tracking: Arc<dyn ArTracking>,
        runtime: Handle,
    ) -> (Self, HostReadyReceiver) {
        let (ready_sender, ready_receiver) = mpsc::unbounded_channel();
        let coordinator = Self {
            config,
            tracking,
            runtime,
            ready_sender,
            state: Arc::new(Mutex::new(CoordinatorState::default())),
        };
        (coordinator, ready_receiver)
    }

    /// Begin hosting one anchor. Replaces any anchor of the same type.
    pub fn host_anchor(&self, anchor: NamedAnchor) {
        self.host_anchors(vec![anchor]);
    }

    /// Begin hosting every anchor of `anchors` as part of the current batch.
    /// An empty batch settles immediately with an empty report.
    pub fn host_anchors(&self, anchors: Vec<NamedAnchor>) {
        let mut state = self.state.lock();

        if anchors.is_empty() && state.batch.is_none() {
            let _ = self.ready_sender.send(HostReport::default());
            return;
        }

        let batch_id = match state.batch.as_mut() {
            Some(batch) => {
                batch.outstanding += anchors.len();
                batch.id
            }
            None => {
                let id = state.next_batch_id;
                state.next_batch_id += 1;
                state.batch = Some(HostBatch {
                    id,
                    outstanding: anchors.len(),
                    report: HostReport::default(),
                });
                id
            }
        };
        state.tasks.retain(|task| !task.is_finished());

        for anchor in anchors {
            let object_type = anchor.object_type.clone();
            let handle = anchor.anchor;
            if let Some(previous) = state
                .anchors
                .insert(object_type.clone(), NamedAnchor::new(object_type.clone(), handle))
            {
                debug!(
                    "Replacing '{}' anchor {:?} with {:?}",
                    object_type, previous.anchor, handle
                );
            }

            info!("Hosting '{}' anchor {:?}", object_type, handle);
            let tracking = Arc::clone(&self.tracking);
            let shared_state = Arc::clone(&self.state);
            let ready_sender = self.ready_sender.clone();
            let timeout = self.config.host_timeout;
            let task = self.runtime.spawn(async move {
                let result = with_timeout(timeout, tracking.host_anchor(handle)).await;
                complete_hosting(
                    &shared_state,
                    &ready_sender,
                    batch_id,
                    object_type,
                    handle,
                    result,
                );
            });
            state.tasks.push(task);
        }
    }

    /// Resolve every anchor of `cloud_anchors`.
    ///
    /// All resolves are awaited before the batch reports. If any of them
    /// failed, the whole batch fails with the first failure (in batch
    /// order) and the anchors that did resolve are released again, so a
    /// failed batch leaves nothing usable behind.
    pub fn resolve_anchors(
        &self,
        cloud_anchors: Vec<CloudAnchor>,
    ) -> impl Future<Output = Result<Vec<ResolvedAnchor>, CloudAnchorError>> + Send + 'static {
        let tracking = Arc::clone(&self.tracking);
        let timeout = self.config.resolve_timeout;

        async move {
            info!("Resolving {} cloud anchor(s)", cloud_anchors.len());
            let resolves = cloud_anchors.into_iter().map(|cloud_anchor| {
                let tracking = Arc::clone(&tracking);
                async move {
                    let result =
                        with_timeout(timeout, tracking.resolve_anchor(&cloud_anchor.cloud_id))
                            .await;
                    (cloud_anchor, result)
                }
            });
            let results = join_all(resolves).await;

            let mut resolved = Vec::with_capacity(results.len());
            let mut first_error = None;
            for (cloud_anchor, result) in results {
                match result {
                    Ok(handle) => resolved.push(ResolvedAnchor::new(
                        cloud_anchor.object_type,
                        handle,
                        cloud_anchor.cloud_id,
                    )),
                    Err(kind) => {
                        warn!(
                            "Resolving '{}' ({}) failed: {}",
                            cloud_anchor.object_type, cloud_anchor.cloud_id, kind
                        );
                        if first_error.is_none() {
                            first_error = Some(
                                CloudAnchorError::new(kind, cloud_anchor.object_type)
                                    .with_cloud_id(cloud_anchor.cloud_id),
                            );
                        }
                    }
                }
            }

            match first_error {
                Some(error) => {
                    for anchor in &resolved {
                        tracking.remove_anchor(anchor.anchor());
                    }
                    Err(error)
                }
                None => Ok(resolved),
            }
        }
    }

    /// Release anchors returned by an earlier `resolve_anchors()`
    pub fn release_resolved(&self, resolved: &[ResolvedAnchor]) {
        for anchor in resolved {
            self.tracking.remove_anchor(anchor.anchor());
        }
    }

    /// Snapshot of the anchors hosted so far, ordered by type
    pub fn cloud_anchors(&self) -> Vec<CloudAnchor> {
        let state = self.state.lock();
        let mut anchors: Vec<CloudAnchor> = state
            .anchors
            .values()
            .filter_map(NamedAnchor::cloud_anchor)
            .collect();
        anchors.sort_by(|a, b| a.object_type.cmp(&b.object_type));
        anchors
    }

    pub fn named_anchor(&self, object_type: &ObjectType) -> Option<NamedAnchor> {
        self.state.lock().anchors.get(object_type).cloned()
    }

    /// Whether a hosting batch still has outstanding items
    pub fn is_hosting(&self) -> bool {
        self.state.lock().batch.is_some()
    }

    /// Forget every named anchor and abandon the current batch; its report
    /// is never sent.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        for task in state.tasks.drain(..) {
            task.abort();
        }
        state.anchors.clear();
        state.batch = None;
    }
}

async fn with_timeout<T, F>(timeout: Duration, operation: F) -> Result<T, CloudAnchorErrorKind>
where
    F: Future<Output = Result<T, CloudAnchorErrorKind>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(CloudAnchorErrorKind::Timeout),
    }
}

fn complete_hosting(
    state: &Mutex<CoordinatorState>,
    ready_sender: &UnboundedSender<HostReport>,
    batch_id: u64,
    object_type: ObjectType,
    handle: AnchorHandle,
    result: Result<String, CloudAnchorErrorKind>,
) {
    let mut state = state.lock();
    let CoordinatorState { anchors, batch, .. } = &mut *state;

    let Some(current) = batch.as_mut().filter(|batch| batch.id == batch_id) else {
        debug!("Dropping result for '{}' from an abandoned batch", object_type);
        return;
    };

    match result {
        Ok(cloud_id) => {
            info!("Hosted '{}' as {}", object_type, cloud_id);
            match anchors.get_mut(&object_type) {
                Some(named) if named.anchor == handle => named.cloud_id = Some(cloud_id.clone()),
                _ => debug!("'{}' anchor was replaced while hosting", object_type),
            }
            current
                .report
                .hosted
                .push(CloudAnchor::new(object_type, cloud_id));
        }
        Err(kind) => {
            warn!("Hosting '{}' failed: {}", object_type, kind);
            current
                .report
                .failures
                .push(CloudAnchorError::new(kind, object_type));
        }
    }

    current.outstanding -= 1;
    if current.outstanding == 0 {
        if let Some(finished) = batch.take() {
            info!(
                "Hosting batch {} settled: {} hosted, {} failed",
                finished.id,
                finished.report.hosted.len(),
                finished.report.failures.len()
            );
            let _ = ready_sender.send(finished.report);
        }
    }
}
