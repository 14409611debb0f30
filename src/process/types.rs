/*!
 * Process Types
 * Child bookkeeping shared between a parent and the child it created
 */

use crate::core::sync::OnceSignal;
use crate::core::types::{ExitStatus, Pid};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of loading a child's program image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    Succeeded,
    Failed,
}

/// Kernel-side bookkeeping a parent keeps for one child it created.
///
/// Owned by the parent's registry; the child holds a second `Arc` so it
/// can raise the load and exit signals even while the parent is blocked
/// on them, or after the parent has released the record. Load outcome and
/// exit are independent one-shot signals and may race.
pub struct ChildRecord {
    pid: Pid,
    load: OnceSignal<LoadOutcome>,
    exit: OnceSignal<ExitStatus>,
}

impl ChildRecord {
    pub fn new(pid: Pid) -> Arc<Self> {
        Arc::new(Self {
            pid,
            load: OnceSignal::new(),
            exit: OnceSignal::new(),
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Raise the load-completion signal. Called exactly once, by or on
    /// behalf of the child, when its program image is ready or known bad.
    pub fn signal_load(&self, outcome: LoadOutcome) -> bool {
        self.load.signal(outcome)
    }

    /// Block until the load outcome is known; the rendezvous that keeps
    /// `exec` from returning before the child is actually runnable.
    pub fn await_load(&self) -> LoadOutcome {
        self.load.wait()
    }

    /// Load outcome if already signaled; `None` while pending.
    pub fn load_outcome(&self) -> Option<LoadOutcome> {
        self.load.peek()
    }

    /// Record the exit status and raise the exit signal.
    pub fn signal_exit(&self, status: ExitStatus) -> bool {
        self.exit.signal(status)
    }

    /// Block until the child has exited; returns its status.
    pub fn await_exit(&self) -> ExitStatus {
        self.exit.wait()
    }

    pub fn has_exited(&self) -> bool {
        self.exit.is_raised()
    }
}
