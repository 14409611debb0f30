/*!
 * Trap Kernel Library
 *
 * The trusted boundary a kernel exposes to unprivileged user processes:
 * user-pointer validation, per-process descriptor tables, parent/child
 * lifecycle handshakes, and the syscall dispatcher tying them together.
 */

pub mod core;
pub mod fd;
pub mod io;
pub mod kernel;
pub mod memory;
pub mod process;
pub mod storage;
pub mod syscalls;
pub mod trap;
pub mod userland;

// Re-exports
pub use crate::core::errors::{StorageError, StorageResult, TrapError, TrapResult};
pub use crate::core::sync::OnceSignal;
pub use fd::FdTable;
pub use io::{Console, Power, SoftPower, StdConsole};
pub use kernel::{Kernel, KernelBuilder};
pub use memory::{AddressSpace, PagedMemory, UserMemory};
pub use process::{ChildRecord, LoadOutcome, Process, ProcessRegistry, ProgramLoader, ThreadLoader};
pub use storage::{FileStorage, FsContext, LocalStorage, MemStorage, StorageFile};
pub use syscalls::{SyscallNumber, TrapOutcome};
pub use trap::TrapFrame;
pub use userland::UserCalls;
