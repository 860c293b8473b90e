//! Task state and cooperative cancellation.
//!
//! A [`TaskControl`] is shared between the caller and the worker running a
//! chunk download. The caller may cancel at any time; the worker only looks
//! at the request between blocking operations.

use crate::error::{Error, Result};

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Lifecycle of a chunk download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskState {
    /// Created, not started yet.
    #[default]
    Pending = 0,
    /// Worker is running.
    Running = 1,
    /// Stopped on the caller's request. Terminal.
    Cancelled = 2,
    /// Completed or failed, `finish` was delivered. Terminal.
    Finished = 3,
}

impl TaskState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => TaskState::Pending,
            1 => TaskState::Running,
            2 => TaskState::Cancelled,
            _ => TaskState::Finished,
        }
    }

    /// Whether no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Cancelled | TaskState::Finished)
    }
}

/// Shared handle on a chunk download's state and cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct TaskControl {
    state: Arc<AtomicU8>,
    token: CancellationToken,
}

impl TaskControl {
    /// Creates a control in the [`TaskState::Pending`] state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Requests cancellation. Takes effect at the worker's next checkpoint.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the caller requested cancellation.
    ///
    /// A sink rejecting a segment does not count; that download finishes
    /// with [`ChunkError::Write`](crate::ChunkError::Write) instead.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Moves from [`TaskState::Pending`] to [`TaskState::Running`].
    pub(crate) fn begin(&self) -> Result<()> {
        self.state
            .compare_exchange(
                TaskState::Pending as u8,
                TaskState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|current| Error::AlreadyStarted(TaskState::from_u8(current)))
    }

    /// Moves from [`TaskState::Running`] to a terminal state.
    pub(crate) fn settle(&self, terminal: TaskState) -> TaskState {
        debug_assert!(terminal.is_terminal());
        let _ = self.state.compare_exchange(
            TaskState::Running as u8,
            terminal as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        self.state()
    }
}
