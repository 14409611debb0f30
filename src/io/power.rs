/*!
 * Shutdown Collaborator
 */

use log::info;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait Power: Send + Sync {
    /// Power the system down. The dispatcher stops the simulation after
    /// this returns; implementations record or act on the request.
    fn power_off(&self);
}

/// Power collaborator that latches the shutdown request.
///
/// The demo and tests observe the latch instead of killing the host.
pub struct SoftPower {
    halted: AtomicBool,
}

impl SoftPower {
    pub fn new() -> Self {
        Self {
            halted: AtomicBool::new(false),
        }
    }

    pub fn powered_off(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }
}

impl Default for SoftPower {
    fn default() -> Self {
        Self::new()
    }
}

impl Power for SoftPower {
    fn power_off(&self) {
        info!("power off requested");
        self.halted.store(true, Ordering::SeqCst);
    }
}
