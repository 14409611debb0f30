/*!
 * Program Loader
 *
 * Collaborator that turns a command line into a runnable execution
 * context. The loader raises the load-completion signal on the record the
 * parent holds, exactly once, success or failure; `exec` rendezvouses on
 * that signal before reporting anything to the caller.
 */

use crate::core::types::ExitStatus;
use crate::kernel::Kernel;
use crate::process::process::Process;
use crate::process::types::{ChildRecord, LoadOutcome};
use dashmap::DashMap;
use log::{debug, warn};
use std::sync::Arc;
use std::thread;

pub trait ProgramLoader: Send + Sync {
    /// Prepare and start the program named by `cmdline` inside `process`.
    ///
    /// Must raise the load signal on `record` exactly once. On success the
    /// child runs independently and eventually reaches the kernel's exit
    /// routine; on failure the child never runs and the kernel discards it.
    fn start(
        &self,
        kernel: Arc<Kernel>,
        process: Arc<Process>,
        record: Arc<ChildRecord>,
        cmdline: &str,
    );
}

/// Program body run on the kernel-side thread of a simulated process
pub type ProgramBody = dyn Fn(&Arc<Kernel>, &Arc<Process>) -> ExitStatus + Send + Sync;

/// Loader backed by registered in-process programs, one thread per child.
///
/// The first whitespace-separated token of the command line names the
/// program; the rest is visible to the body through the command line the
/// kernel stored on the process.
pub struct ThreadLoader {
    programs: DashMap<String, Arc<ProgramBody>>,
}

impl ThreadLoader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            programs: DashMap::new(),
        })
    }

    pub fn register<F>(&self, name: &str, body: F)
    where
        F: Fn(&Arc<Kernel>, &Arc<Process>) -> ExitStatus + Send + Sync + 'static,
    {
        self.programs.insert(name.to_string(), Arc::new(body));
    }
}

impl ProgramLoader for ThreadLoader {
    fn start(
        &self,
        kernel: Arc<Kernel>,
        process: Arc<Process>,
        record: Arc<ChildRecord>,
        cmdline: &str,
    ) {
        let name = cmdline.split_whitespace().next().unwrap_or("");
        let body = self.programs.get(name).map(|entry| entry.value().clone());

        match body {
            Some(body) => {
                debug!("loaded program '{}' as pid {}", name, process.pid());
                record.signal_load(LoadOutcome::Succeeded);
                thread::spawn(move || {
                    let status = body(&kernel, &process);
                    // Programs that return instead of trapping into exit
                    // still go through the one exit routine.
                    kernel.terminate(&process, status);
                });
            }
            None => {
                warn!("no such program '{}', load failed", name);
                record.signal_load(LoadOutcome::Failed);
            }
        }
    }
}
