//! Cancellable fetch tasks tied to a page mount.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Result of a task that may have been cancelled before finishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> TaskOutcome<T> {
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Cancelled => None,
        }
    }
}

/// Cancellation scope for the fetches started by one mount.
///
/// Every mount gets a fresh scope with its own generation number; tearing
/// the mount down cancels the scope, and results carry the generation so
/// the owner can tell a stale completion from a current one.
#[derive(Debug, Clone)]
pub struct MountScope {
    token: CancellationToken,
    generation: u64,
}

impl MountScope {
    pub fn new(generation: u64) -> Self {
        Self {
            token: CancellationToken::new(),
            generation,
        }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` to completion unless the scope is cancelled first.
    pub async fn run<F>(&self, fut: F) -> TaskOutcome<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            () = self.token.cancelled() => TaskOutcome::Cancelled,
            value = fut => TaskOutcome::Completed(value),
        }
    }
}
