/*!
 * Syscalls Module
 * Trap decoding and the recognized call surface
 */

mod dispatcher;
mod fs;
mod types;

pub use types::{SyscallNumber, TrapOutcome};
