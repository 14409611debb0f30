/*!
 * Kernel
 *
 * Owner of the shared collaborators and the process table. Syscall
 * dispatch lives in the syscalls module; this file holds construction,
 * process creation, and the one exit routine every termination path
 * converges on.
 */

use crate::core::types::{ExitStatus, Pid, FAULT_STATUS};
use crate::io::{Console, Power, SoftPower, StdConsole};
use crate::memory::PagedMemory;
use crate::process::{LoadOutcome, Process, ProgramLoader, ThreadLoader};
use crate::storage::{FileStorage, FsContext, MemStorage};
use dashmap::DashMap;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

pub struct Kernel {
    fs: Arc<FsContext>,
    console: Arc<dyn Console>,
    power: Arc<dyn Power>,
    loader: Arc<dyn ProgramLoader>,
    processes: DashMap<Pid, Arc<Process>>,
    next_pid: AtomicU32,
}

impl Kernel {
    pub fn builder() -> KernelBuilder {
        KernelBuilder::default()
    }

    pub(crate) fn fs(&self) -> &Arc<FsContext> {
        &self.fs
    }

    pub(crate) fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }

    pub(crate) fn power(&self) -> &Arc<dyn Power> {
        &self.power
    }

    pub fn process(&self, pid: Pid) -> Option<Arc<Process>> {
        self.processes.get(&pid).map(|entry| entry.value().clone())
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Spawn a root process with no parent; the seed for demos and tests.
    pub fn spawn_init(self: &Arc<Self>, name: &str) -> Arc<Process> {
        let pid = self.next_pid.fetch_add(1, Ordering::Relaxed);
        let process = Process::new(
            pid,
            name.to_string(),
            PagedMemory::with_user_layout(),
            self.fs.clone(),
            None,
        );
        self.processes.insert(pid, process.clone());
        info!("spawned init process '{}' as pid {}", name, pid);
        process
    }

    /// Create a child for `parent` and block until its load outcome is
    /// known. Returns the child pid, or -1 if the program image could not
    /// be prepared; on failure the parent keeps no residual record.
    pub fn exec(self: &Arc<Self>, parent: &Arc<Process>, cmdline: &str) -> i32 {
        let name = match cmdline.split_whitespace().next() {
            Some(name) => name.to_string(),
            None => return FAULT_STATUS,
        };

        let pid = self.next_pid.fetch_add(1, Ordering::Relaxed);
        let record = parent.children().register_child(pid);
        let child = Process::new(
            pid,
            name,
            PagedMemory::with_user_layout(),
            self.fs.clone(),
            Some(record.clone()),
        );
        self.processes.insert(pid, child.clone());
        debug!("pid {} exec '{}' -> candidate pid {}", parent.pid(), cmdline, pid);

        self.loader
            .start(self.clone(), child, record.clone(), cmdline);

        match record.await_load() {
            LoadOutcome::Succeeded => pid as i32,
            LoadOutcome::Failed => {
                parent.children().remove(pid);
                self.processes.remove(&pid);
                FAULT_STATUS
            }
        }
    }

    /// Wait for a direct child to exit, at most once per child.
    pub fn wait(&self, parent: &Arc<Process>, pid: Pid) -> ExitStatus {
        parent
            .children()
            .wait_for_exit(pid)
            .unwrap_or(FAULT_STATUS)
    }

    /// The one exit routine. Parent notification and resource teardown
    /// happen here exactly once, whichever path requested termination.
    pub fn terminate(&self, process: &Arc<Process>, status: ExitStatus) {
        if !process.mark_exited() {
            return;
        }
        info!(
            "pid {} ({}) exiting with status {}",
            process.pid(),
            process.name(),
            status
        );

        let line = format!("{}: exit({})\n", process.name(), status);
        self.console.write_bytes(line.as_bytes());

        process.fds().close_all();
        process.children().release_all();

        // Signal the parent last, once this process is fully torn down.
        // If the parent already exited, the record is orphaned and the
        // status goes nowhere.
        if let Some(record) = process.parent_record() {
            record.signal_exit(status);
        }

        if self.processes.remove(&process.pid()).is_none() {
            warn!("pid {} exited but was not in the process table", process.pid());
        }
    }
}

/// Builder wiring the kernel's collaborators, with working defaults for
/// every seam.
pub struct KernelBuilder {
    storage: Option<Box<dyn FileStorage>>,
    console: Option<Arc<dyn Console>>,
    power: Option<Arc<dyn Power>>,
    loader: Option<Arc<dyn ProgramLoader>>,
}

impl Default for KernelBuilder {
    fn default() -> Self {
        Self {
            storage: None,
            console: None,
            power: None,
            loader: None,
        }
    }
}

impl KernelBuilder {
    pub fn storage(mut self, storage: impl FileStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn power(mut self, power: Arc<dyn Power>) -> Self {
        self.power = Some(power);
        self
    }

    pub fn loader(mut self, loader: Arc<dyn ProgramLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn build(self) -> Arc<Kernel> {
        let storage = self
            .storage
            .unwrap_or_else(|| Box::new(MemStorage::new()));
        let console = self.console.unwrap_or_else(|| Arc::new(StdConsole));
        let power = self.power.unwrap_or_else(|| Arc::new(SoftPower::new()));
        let loader: Arc<dyn ProgramLoader> =
            self.loader.unwrap_or_else(|| ThreadLoader::new());

        Arc::new(Kernel {
            fs: FsContext::new(storage),
            console,
            power,
            loader,
            processes: DashMap::new(),
            next_pid: AtomicU32::new(1),
        })
    }
}
