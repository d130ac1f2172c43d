//! Single-slot task controller.
//!
//! Every [`Client`](crate::Client) owns one [`TaskSlot`]. Starting a new operation in the slot
//! cancels the previous one, so at most one operation per client is running at any time. A
//! response of a cancelled operation is never delivered, even if it was already received from
//! the network when the task was cancelled.

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use parking_lot::Mutex;

/// State of a task.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskState {
    /// Task is created but not started yet, or the slot has never run a task.
    Idle = 0,
    /// Operation is in progress.
    Running = 1,
    /// Cancel was requested, the operation is being torn down.
    Cancelling = 2,
    /// Task is finished: its result was delivered, or it was cancelled.
    Completed = 3,
}

impl TaskState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::Cancelling,
            3 => Self::Completed,
            _ => unreachable!("invalid task state value: {raw}"),
        }
    }
}

/// Unique identifier of a task.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    fn next_id() -> Self {
        static ID: AtomicU64 = AtomicU64::new(0);
        Self(ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a task started in a [`TaskSlot`].
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    state: Arc<AtomicU8>,
    abort_handle: AbortHandle,
}

impl TaskHandle {
    fn new() -> (Self, AbortRegistration) {
        let (abort_handle, registration) = AbortHandle::new_pair();
        let handle = Self {
            id: TaskId::next_id(),
            state: Arc::new(AtomicU8::new(TaskState::Idle as u8)),
            abort_handle,
        };

        (handle, registration)
    }

    /// Id of the task.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Current state of the task.
    pub fn state(&self) -> TaskState {
        TaskState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Returns true if the task is running.
    pub fn is_active(&self) -> bool {
        self.state() == TaskState::Running
    }

    /// Requests the task to stop. Returns false if the task was not running.
    ///
    /// The completion callback of a cancelled task is never called.
    pub fn cancel(&self) -> bool {
        if self.transition(TaskState::Running, TaskState::Cancelling) {
            self.abort_handle.abort();
            true
        } else {
            false
        }
    }

    fn transition(&self, from: TaskState, to: TaskState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn start(&self) {
        let started = self.transition(TaskState::Idle, TaskState::Running);
        debug_assert!(started, "task {:?} is started twice", self.id);
    }

    fn deliver<T>(&self, result: Result<T, Aborted>, on_complete: impl FnOnce(T)) {
        match result {
            Ok(value) if self.transition(TaskState::Running, TaskState::Completed) => {
                log::trace!("Task {:?} completed", self.id);
                on_complete(value);
            }
            Ok(_) => {
                self.transition(TaskState::Cancelling, TaskState::Completed);
                log::debug!("Discarding result of cancelled task {:?}", self.id);
            }
            Err(Aborted) => {
                self.transition(TaskState::Cancelling, TaskState::Completed);
                log::debug!("Task {:?} aborted", self.id);
            }
        }
    }
}

/// Slot that runs at most one task at a time.
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: Mutex<Option<TaskHandle>>,
}

impl TaskSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the operation, cancelling the task that is currently running in the slot.
    ///
    /// When the operation completes, `on_complete` is called with its output exactly once,
    /// unless the task is cancelled before that.
    pub fn perform<T, F, C>(&self, operation: F, on_complete: C) -> TaskHandle
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        let (task, registration) = TaskHandle::new();
        {
            let mut current = self.current.lock();
            if let Some(previous) = current.take() {
                if previous.cancel() {
                    log::debug!(
                        "Task {:?} cancelled to start task {:?}",
                        previous.id(),
                        task.id()
                    );
                }
            }

            task.start();
            *current = Some(task.clone());
        }

        let handle = task.clone();
        crate::async_runtime::spawn(async move {
            let result = Abortable::new(operation, registration).await;
            task.deliver(result, on_complete);
        });

        handle
    }

    /// Cancels the current task. Returns false if there was no running task.
    pub fn cancel(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|task| task.cancel())
    }

    /// State of the last started task, or [`TaskState::Idle`] if no task was ever started.
    pub fn state(&self) -> TaskState {
        self.current
            .lock()
            .as_ref()
            .map_or(TaskState::Idle, |task| task.state())
    }

    /// Returns true if a task is running.
    pub fn is_active(&self) -> bool {
        self.state() == TaskState::Running
    }
}
