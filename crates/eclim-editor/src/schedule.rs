//! One-shot deferred tasks on the editor's own event loop.
//!
//! Nothing runs in the background: the host calls
//! [`JavaTools::run_due`](crate::JavaTools::run_due) from its loop (or a timer callback) and
//! due tasks execute on that same thread. Tasks are neither cancellable nor deduplicated.

use crate::document::DocumentId;
use std::time::{Duration, Instant};

/// How long transient error messages stay in the status bar.
pub const ERROR_STATUS_TIMEOUT: Duration = Duration::from_millis(5000);
/// Delay of the second validation after a save.
pub const REVALIDATE_DELAY: Duration = Duration::from_millis(1500);

/// Work deferred to a later point on the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    /// Remove a transient status entry.
    EraseStatus {
        /// Document owning the status entry.
        document: DocumentId,
        /// Status key.
        key: &'static str,
    },
    /// Validate a document again.
    Revalidate {
        /// Document to validate.
        document: DocumentId,
    },
}

impl DeferredTask {
    /// The document the task operates on.
    pub fn document(&self) -> DocumentId {
        match self {
            Self::EraseStatus { document, .. } | Self::Revalidate { document } => *document,
        }
    }
}

/// Deadline-ordered queue of [`DeferredTask`]s.
#[derive(Debug, Default)]
pub struct TaskQueue {
    pending: Vec<(Instant, DeferredTask)>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has elapsed from now.
    pub fn schedule_in(&mut self, delay: Duration, task: DeferredTask) {
        self.schedule_at(Instant::now() + delay, task);
    }

    /// Run `task` once `due` has passed.
    pub fn schedule_at(&mut self, due: Instant, task: DeferredTask) {
        // Stable insertion: equal deadlines keep scheduling order.
        let idx = self.pending.partition_point(|(d, _)| *d <= due);
        self.pending.insert(idx, (due, task));
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<DeferredTask> {
        let split = self.pending.partition_point(|(due, _)| *due <= now);
        self.pending.drain(..split).map(|(_, task)| task).collect()
    }

    /// Deadline of the earliest pending task.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.first().map(|(due, _)| *due)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no task is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate over pending tasks in due order.
    pub fn iter(&self) -> impl Iterator<Item = (Instant, &DeferredTask)> {
        self.pending.iter().map(|(due, task)| (*due, task))
    }
}
