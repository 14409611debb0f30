/*!
 * Core Module
 * Shared types, errors, and synchronization primitives
 */

pub mod errors;
pub mod sync;
pub mod types;

pub use errors::{StorageError, StorageResult, TrapError, TrapResult};
pub use sync::OnceSignal;
