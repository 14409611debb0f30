/*!
 * Process Registry
 *
 * The set of children one process has created and not yet waited on.
 * Private to the owning process; the only cross-process traffic is a
 * child raising the one-shot signals inside a record the parent holds.
 */

use crate::core::types::{ExitStatus, Pid};
use crate::process::types::ChildRecord;
use log::trace;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct ProcessRegistry {
    children: Mutex<Vec<Arc<ChildRecord>>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            children: Mutex::new(Vec::new()),
        }
    }

    /// Create a record for a just-requested child and keep it.
    ///
    /// A child pid appears at most once; pids are never reused while the
    /// parent lives, so a duplicate here is a kernel bug.
    pub fn register_child(&self, pid: Pid) -> Arc<ChildRecord> {
        let mut children = self.children.lock();
        debug_assert!(children.iter().all(|record| record.pid() != pid));
        let record = ChildRecord::new(pid);
        children.push(record.clone());
        record
    }

    /// Look up a still-held record by child pid. Linear scan; the set is
    /// small and lookup must never mutate ids as a side effect.
    pub fn get(&self, pid: Pid) -> Option<Arc<ChildRecord>> {
        self.children
            .lock()
            .iter()
            .find(|record| record.pid() == pid)
            .cloned()
    }

    /// Remove and return the record for `pid`, if still held.
    pub fn remove(&self, pid: Pid) -> Option<Arc<ChildRecord>> {
        let mut children = self.children.lock();
        let index = children.iter().position(|record| record.pid() == pid)?;
        Some(children.swap_remove(index))
    }

    /// Wait for a direct child to exit; consumes the record.
    ///
    /// Returns `None` if `pid` is not a child, or was already waited on.
    /// The record is removed before blocking, so a concurrent second wait
    /// on the same pid fails instead of racing for the status.
    pub fn wait_for_exit(&self, pid: Pid) -> Option<ExitStatus> {
        let record = self.remove(pid)?;
        let status = record.await_exit();
        trace!("child {} exited with status {}", pid, status);
        Some(status)
    }

    /// Drop every remaining record; called once when the parent exits.
    ///
    /// Children keep running; their eventual exit signals land in orphaned
    /// records and the statuses are discarded.
    pub fn release_all(&self) {
        let mut children = self.children.lock();
        if !children.is_empty() {
            trace!("releasing {} child records", children.len());
        }
        children.clear();
    }

    /// Number of records still held, for diagnostics and tests.
    pub fn child_count(&self) -> usize {
        self.children.lock().len()
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
