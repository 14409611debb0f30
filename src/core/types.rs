/*!
 * Core Types
 * Common types used across the kernel
 */

/// Process ID type
pub type Pid = u32;

/// File descriptor type
pub type Fd = u32;

/// Virtual address in the simulated 32-bit user address space
pub type VirtAddr = u32;

/// Exit status delivered to a waiting parent
pub type ExitStatus = i32;

/// Machine word size of the simulated user ABI, in bytes
pub const WORD_SIZE: VirtAddr = 4;

/// Lowest address at which user code or data may legitimately reside
pub const USER_FLOOR: VirtAddr = 0x0804_8000;

/// First kernel-reserved address; every user pointer must stay below it
pub const KERNEL_BASE: VirtAddr = 0xC000_0000;

/// Reserved descriptor for console input
pub const STDIN_FD: Fd = 0;

/// Reserved descriptor for console output
pub const STDOUT_FD: Fd = 1;

/// First descriptor id a fresh table hands out; 0 and 1 never back entries
pub const FIRST_FD: Fd = 2;

/// Status a process is terminated with when it faults inside a syscall
pub const FAULT_STATUS: ExitStatus = -1;

/// Failure sentinel written into the trap frame's return slot
pub const RETURN_FAILURE: u32 = -1i32 as u32;

/// Sentinel `tell` returns for an unknown descriptor; distinguishable from
/// any real position because files are capped well below 4 GiB
pub const TELL_SENTINEL: u32 = u32::MAX;
