use std::{future::Future, time::Duration};

use tokio::{runtime::Handle, task::JoinHandle, time::Instant};

/// A one-shot delayed task on the background scheduler. Dropping the timer
/// cancels it.
pub(crate) struct Timer {
    handle: JoinHandle<()>,
}

impl Timer {
    pub(crate) fn schedule<F>(runtime: &Handle, delay: Duration, fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        // The deadline counts from now, not from when the task first runs
        let deadline = Instant::now() + delay;
        Self::spawn(runtime, async move {
            tokio::time::sleep_until(deadline).await;
            fire();
        })
    }

    pub(crate) fn spawn<F>(runtime: &Handle, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: runtime.spawn(task),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
