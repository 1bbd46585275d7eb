//! Delivery handles and the completion tracking queue
//!
//! Every destination invocation yields a [`DeliveryHandle`]. Handles land in
//! the shared [`CompletionTracker`], which prunes settled entries
//! opportunistically and drains everything outstanding on [`flush`].
//!
//! [`flush`]: CompletionTracker::flush

use super::error::LoggerError;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Upper bound on a single delivery attempt (5 seconds).
///
/// Applied centrally when a handle is spawned, so a destination can never
/// leave a handle permanently unsettled and hang `flush()`.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// One destination's in-flight delivery attempt.
///
/// The settled flag flips exactly once, when the underlying operation
/// reaches a terminal state — success, failure, and timeout all count.
pub struct DeliveryHandle {
    name: String,
    settled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl DeliveryHandle {
    /// An already-settled no-op handle, for synchronous sinks and for
    /// below-minimum-level skips.
    pub fn settled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settled: Arc::new(AtomicBool::new(true)),
            task: None,
        }
    }

    /// Spawn a delivery future bounded by [`DELIVERY_TIMEOUT`].
    ///
    /// Must be called within a tokio runtime. Failures are absorbed and
    /// reported through the stderr fallback; they never reach the logging
    /// caller.
    pub fn spawn<F>(name: impl Into<String>, delivery: F) -> Self
    where
        F: Future<Output = Result<(), LoggerError>> + Send + 'static,
    {
        Self::spawn_with_timeout(name, DELIVERY_TIMEOUT, delivery)
    }

    /// Spawn with an explicit per-attempt bound.
    pub fn spawn_with_timeout<F>(name: impl Into<String>, timeout: Duration, delivery: F) -> Self
    where
        F: Future<Output = Result<(), LoggerError>> + Send + 'static,
    {
        let name = name.into();
        let settled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&settled);
        let destination = name.clone();

        let task = tokio::spawn(async move {
            match tokio::time::timeout(timeout, delivery).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[dispatch-logger] {}", e);
                }
                Err(_) => {
                    eprintln!(
                        "[dispatch-logger] delivery to '{}' timed out after {:?}",
                        destination, timeout
                    );
                }
            }
            flag.store(true, Ordering::Release);
        });

        Self {
            name,
            settled,
            task: Some(task),
        }
    }

    /// Destination name this handle belongs to (diagnostics only).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }

    /// Wait for the underlying operation to reach a terminal state.
    ///
    /// Never fails: task panics and cancellations are absorbed, and the
    /// handle counts as settled afterwards either way.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        self.settled.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for DeliveryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryHandle")
            .field("name", &self.name)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Shared queue of pending delivery handles.
///
/// Appended to by the dispatcher, pruned by opportunistic [`cleanup`] after
/// each dispatch, and drained deterministically by [`flush`].
///
/// [`cleanup`]: CompletionTracker::cleanup
/// [`flush`]: CompletionTracker::flush
pub struct CompletionTracker {
    pending: Mutex<Vec<DeliveryHandle>>,
    enqueued_total: AtomicU64,
    cleaned_total: AtomicU64,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            enqueued_total: AtomicU64::new(0),
            cleaned_total: AtomicU64::new(0),
        }
    }

    /// Append a handle to the queue. O(1).
    pub fn enqueue(&self, handle: DeliveryHandle) {
        self.enqueued_total.fetch_add(1, Ordering::Relaxed);
        self.pending.lock().push(handle);
    }

    /// Number of handles currently in the queue, settled or not.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Number of queued handles that have not settled yet.
    pub fn unsettled_count(&self) -> usize {
        self.pending.lock().iter().filter(|h| !h.is_settled()).count()
    }

    /// Remove all settled handles. O(n). Returns the number removed.
    pub fn cleanup(&self) -> usize {
        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.retain(|handle| !handle.is_settled());
        let removed = before - pending.len();
        self.cleaned_total.fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }

    /// Wait for every delivery currently in the queue to settle.
    ///
    /// Snapshot semantics: the queue is drained at entry and only that set
    /// is awaited; handles enqueued while waiting stay queued for a later
    /// flush. Individual delivery failures are absorbed — this never fails
    /// and, because every spawned handle is time-bounded, never hangs.
    pub async fn flush(&self) {
        let drained: Vec<DeliveryHandle> = {
            let mut pending = self.pending.lock();
            pending.drain(..).collect()
        };
        let count = drained.len() as u64;

        for handle in drained {
            handle.join().await;
        }

        self.cleaned_total.fetch_add(count, Ordering::Relaxed);
    }

    /// Total handles ever enqueued.
    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total.load(Ordering::Relaxed)
    }

    /// Total handles removed by cleanup or flush.
    pub fn cleaned_total(&self) -> u64 {
        self.cleaned_total.load(Ordering::Relaxed)
    }
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}
