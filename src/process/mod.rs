/*!
 * Process Module
 * Process state, child bookkeeping, and the program loader seam
 */

mod loader;
#[allow(clippy::module_inception)]
mod process;
mod registry;
mod types;

pub use loader::{ProgramBody, ProgramLoader, ThreadLoader};
pub use process::Process;
pub use registry::ProcessRegistry;
pub use types::{ChildRecord, LoadOutcome};
