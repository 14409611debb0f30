/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::VirtAddr;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults detected at the trap boundary.
///
/// Every variant is process-terminating: the dispatcher converts any of
/// these into the same exit path as an explicit `exit(-1)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum TrapError {
    #[error("invalid user address {0:#010x}")]
    #[diagnostic(
        code(trap::invalid_access),
        help("User pointers must lie in [0x08048000, 0xC0000000).")
    )]
    InvalidAccess(VirtAddr),

    #[error("unmapped user address {0:#010x}")]
    #[diagnostic(
        code(trap::unmapped),
        help("The address is in user range but no page is mapped there.")
    )]
    Unmapped(VirtAddr),

    #[error("unknown syscall number {0}")]
    #[diagnostic(
        code(trap::unknown_syscall),
        help("Recognized syscall numbers are 0 through 12.")
    )]
    UnknownSyscall(u32),
}

/// Errors surfaced by the file storage collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum StorageError {
    #[error("not found: {0}")]
    #[diagnostic(code(storage::not_found))]
    NotFound(String),

    #[error("already exists: {0}")]
    #[diagnostic(code(storage::already_exists))]
    AlreadyExists(String),

    #[error("invalid path: {0}")]
    #[diagnostic(code(storage::invalid_path))]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(storage::io_error))]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// Result type for trap-boundary operations
pub type TrapResult<T> = std::result::Result<T, TrapError>;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;
