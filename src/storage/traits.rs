/*!
 * Storage Traits
 * Interface to the external file storage collaborator
 */

use crate::core::errors::StorageResult;

/// One open file, exclusively owned by a descriptor-table entry.
///
/// The handle carries its own position; dropping it releases the
/// underlying resource exactly once.
pub trait StorageFile: Send {
    /// Read up to `buf.len()` bytes at the current position.
    fn read(&mut self, buf: &mut [u8]) -> StorageResult<usize>;

    /// Write `buf` at the current position, growing the file if needed.
    fn write(&mut self, buf: &[u8]) -> StorageResult<usize>;

    /// Move the position; seeking past end is allowed.
    fn seek(&mut self, position: u32);

    /// Current position, in bytes from the start.
    fn tell(&mut self) -> u32;

    /// Current file length in bytes.
    fn len(&mut self) -> u32;
}

/// Path-keyed file store shared by every process.
///
/// Callers serialize access through the process-wide filesystem lock;
/// implementations do not need their own cross-process coordination.
pub trait FileStorage: Send + Sync {
    /// Create an empty file of `initial_size` zero bytes.
    fn create(&self, path: &str, initial_size: u32) -> StorageResult<()>;

    /// Remove a file by path. Handles already open on it stay usable.
    fn remove(&self, path: &str) -> StorageResult<()>;

    /// Open an existing file.
    fn open(&self, path: &str) -> StorageResult<Box<dyn StorageFile>>;
}
