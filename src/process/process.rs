/*!
 * Process
 * Per-process kernel state: address space, descriptors, children
 */

use crate::core::types::Pid;
use crate::fd::FdTable;
use crate::memory::PagedMemory;
use crate::process::registry::ProcessRegistry;
use crate::process::types::ChildRecord;
use crate::storage::FsContext;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One live user process as the kernel sees it.
///
/// The descriptor table and child registry are created empty when the
/// process starts, mutated only by its own syscalls, and torn down
/// synchronously when it exits.
pub struct Process {
    pid: Pid,
    name: String,
    memory: Arc<PagedMemory>,
    fds: FdTable,
    children: ProcessRegistry,
    parent_record: Option<Arc<ChildRecord>>,
    exited: AtomicBool,
}

impl Process {
    pub fn new(
        pid: Pid,
        name: String,
        memory: Arc<PagedMemory>,
        fs: Arc<FsContext>,
        parent_record: Option<Arc<ChildRecord>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            pid,
            name,
            memory,
            fds: FdTable::new(fs),
            children: ProcessRegistry::new(),
            parent_record,
            exited: AtomicBool::new(false),
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn memory(&self) -> &PagedMemory {
        &self.memory
    }

    pub fn fds(&self) -> &FdTable {
        &self.fds
    }

    pub fn children(&self) -> &ProcessRegistry {
        &self.children
    }

    /// Record this parent holds for us, if the parent still existed when
    /// we were created.
    pub fn parent_record(&self) -> Option<&Arc<ChildRecord>> {
        self.parent_record.as_ref()
    }

    /// Flip the exited latch; `true` exactly once, so every termination
    /// path converges on a single teardown.
    pub(crate) fn mark_exited(&self) -> bool {
        !self.exited.swap(true, Ordering::SeqCst)
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::SeqCst)
    }
}
