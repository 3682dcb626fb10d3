//! Shared plumbing for workflow state cells and timed notice dismissal.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Lock a workflow state cell, recovering from poisoning.
///
/// A poisoned mutex here only means some observer panicked mid-read; the
/// state itself stays consistent because each cell has a single writer.
pub(crate) fn lock<T>(cell: &Mutex<T>) -> MutexGuard<'_, T> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cancellable slot for one class of auto-dismissing notice.
///
/// Arming the slot bumps its epoch and aborts the previous task, so a
/// superseded or explicitly dismissed timer can never clear a newer
/// notice even if abortion races with the timer firing.
#[derive(Debug, Default)]
pub(crate) struct DismissTimer {
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl DismissTimer {
    /// Cancel any scheduled dismissal and invalidate its epoch.
    pub(crate) fn supersede(&mut self) -> u64 {
        self.epoch += 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.epoch
    }

    /// Current epoch; a firing task must match it to take effect.
    pub(crate) const fn epoch(&self) -> u64 {
        self.epoch
    }

    fn arm(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }
}

/// Schedule `on_expire` to run after `delay`, tied to `owner`'s lifetime.
///
/// The task holds only a weak reference: once every workflow handle is
/// dropped the timer silently evaporates instead of firing against a
/// stale instance. `on_expire` receives the epoch the timer was armed
/// with and must compare it against the slot before acting.
pub(crate) fn schedule_dismiss<I, F>(
    timer: &mut DismissTimer,
    delay: Duration,
    owner: &Arc<I>,
    on_expire: F,
) where
    I: Send + Sync + 'static,
    F: FnOnce(&I, u64) + Send + 'static,
{
    let epoch = timer.supersede();
    let weak = Arc::downgrade(owner);
    timer.arm(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(strong) = weak.upgrade() {
            on_expire(&strong, epoch);
        }
    }));
}
