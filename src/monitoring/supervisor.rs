use super::diag::DiagLog;
use log::{debug, warn};
use std::{
    any::Any, future::Future, sync::{atomic::{AtomicU64, Ordering}, Arc},
};
use tokio::task::{AbortHandle, JoinHandle};
/// Runs independent tasks and reports, then discards, whatever failures they
/// end with. A task's handle yields `Some(value)` on success and `None` when
/// the failure was swallowed here.
#[derive(Clone)]
pub struct Supervisor {
    diag: Arc<DiagLog>,
    counters: Arc<Counters>,
}
#[derive(Default)]
struct Counters {
    completed: AtomicU64,
    failed: AtomicU64,
    panicked: AtomicU64,
    cancelled: AtomicU64,
}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupervisorStats {
    pub completed: u64,
    pub failed: u64,
    pub panicked: u64,
    pub cancelled: u64,
}
impl SupervisorStats {
    pub fn total(&self) -> u64 {
        self.completed + self.failed + self.panicked + self.cancelled
    }
}
impl Supervisor {
    pub fn new(diag: Arc<DiagLog>) -> Self {
        Self {
            diag,
            counters: Arc::new(Counters::default()),
        }
    }
    /// Spawns `task` on the current tokio runtime. Aborting the returned
    /// handle aborts `task` too and counts it as cancelled.
    pub fn spawn<T, Fut>(&self, name: impl Into<String>, task: Fut) -> JoinHandle<Option<T>>
    where
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let name = name.into();
        let diag = Arc::clone(&self.diag);
        let counters = Arc::clone(&self.counters);
        let inner = tokio::spawn(task);
        let mut guard = AbortOnDrop {
            inner: inner.abort_handle(),
            counters: Arc::clone(&counters),
            name: name.clone(),
            settled: false,
        };
        tokio::spawn(async move {
            let result = inner.await;
            guard.settled = true;
            match result {
                Ok(Ok(value)) => {
                    counters.completed.fetch_add(1, Ordering::SeqCst);
                    debug!("task {} completed", name);
                    Some(value)
                }
                Ok(Err(e)) => {
                    counters.failed.fetch_add(1, Ordering::SeqCst);
                    diag.log_failure(&format!("task {} failed", name), &e);
                    None
                }
                Err(join) if join.is_panic() => {
                    counters.panicked.fetch_add(1, Ordering::SeqCst);
                    let reason = panic_reason(join.into_panic());
                    diag.log_failure(&format!("task {} panicked", name), &reason);
                    None
                }
                Err(join) => {
                    counters.cancelled.fetch_add(1, Ordering::SeqCst);
                    warn!("task {} did not finish: {}", name, join);
                    None
                }
            }
        })
    }
    pub fn stats(&self) -> SupervisorStats {
        SupervisorStats {
            completed: self.counters.completed.load(Ordering::SeqCst),
            failed: self.counters.failed.load(Ordering::SeqCst),
            panicked: self.counters.panicked.load(Ordering::SeqCst),
            cancelled: self.counters.cancelled.load(Ordering::SeqCst),
        }
    }
}
/// Aborts the supervised task when its watcher is dropped before the task
/// settles, which is what happens when the caller aborts the handle.
struct AbortOnDrop {
    inner: AbortHandle,
    counters: Arc<Counters>,
    name: String,
    settled: bool,
}
impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if !self.settled {
            self.inner.abort();
            self.counters.cancelled.fetch_add(1, Ordering::SeqCst);
            debug!("task {} aborted by its caller", self.name);
        }
    }
}
fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
