//! Scheduler
//!
//! Cancellable one-shot delayed tasks.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Work run when a scheduled delay elapses.
pub type ScheduledTask = BoxFuture<'static, ()>;

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Delayed task scheduler interface.
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskHandle;

    /// Cancel a task that has not fired yet. Unknown handles are ignored.
    fn cancel(&self, handle: TaskHandle);
}

/// Scheduler backed by tokio tasks.
pub struct TokioScheduler {
    runtime: Option<Handle>,
    next_id: AtomicU64,
    tasks: Arc<Mutex<HashMap<u64, JoinHandle<()>>>>,
}

impl TokioScheduler {
    /// Create a scheduler on the current tokio runtime, if any.
    pub fn new() -> Self {
        Self::with_runtime(Handle::try_current().ok())
    }

    /// Create a scheduler on an explicit runtime.
    pub fn with_runtime(runtime: Option<Handle>) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of tasks that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let handle = TaskHandle(id);

        let runtime = self
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok());

        let Some(runtime) = runtime else {
            tracing::warn!(task_id = id, "no tokio runtime available, task dropped");
            return handle;
        };

        // Hold the lock across spawn so the task cannot remove itself before
        // its join handle is registered.
        let mut tasks = self.tasks.lock();
        let registry = Arc::clone(&self.tasks);
        let join = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            registry.lock().remove(&id);
            task.await;
        });
        tasks.insert(id, join);

        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        if let Some(join) = self.tasks.lock().remove(&handle.0) {
            join.abort();
        }
    }
}

struct MockEntry {
    handle: TaskHandle,
    delay: Duration,
    task: Option<ScheduledTask>,
    cancelled: bool,
}

/// Scheduler for testing that only fires tasks on demand.
#[derive(Default)]
pub struct MockScheduler {
    next_id: AtomicU64,
    entries: Mutex<Vec<MockEntry>>,
    cancel_count: AtomicU64,
}

impl MockScheduler {
    /// Create new mock scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `schedule` calls.
    pub fn schedule_count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Number of cancellations of live tasks.
    pub fn cancel_count(&self) -> usize {
        self.cancel_count.load(Ordering::SeqCst) as usize
    }

    /// Delays of tasks that have neither fired nor been cancelled.
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.entries
            .lock()
            .iter()
            .filter(|e| !e.cancelled && e.task.is_some())
            .map(|e| e.delay)
            .collect()
    }

    /// Delay of the most recently scheduled task.
    pub fn last_delay(&self) -> Option<Duration> {
        self.entries.lock().last().map(|e| e.delay)
    }

    /// Run every live task, in scheduling order. Returns how many ran.
    pub async fn fire_pending(&self) -> usize {
        let tasks: Vec<ScheduledTask> = self
            .entries
            .lock()
            .iter_mut()
            .filter(|e| !e.cancelled)
            .filter_map(|e| e.task.take())
            .collect();

        let count = tasks.len();
        for task in tasks {
            task.await;
        }
        count
    }
}

impl Scheduler for MockScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskHandle {
        let handle = TaskHandle(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.entries.lock().push(MockEntry {
            handle,
            delay,
            task: Some(task),
            cancelled: false,
        });
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries
            .iter_mut()
            .find(|e| e.handle == handle && !e.cancelled && e.task.is_some())
        {
            entry.cancelled = true;
            entry.task = None;
            self.cancel_count.fetch_add(1, Ordering::SeqCst);
        }
    }
}
