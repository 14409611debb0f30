/*!
 * File Descriptor Table
 *
 * Per-process mapping from small integer descriptors to open storage
 * handles. Descriptors 0 and 1 are the console streams and never appear
 * here; the syscall layer short-circuits them before the table is
 * consulted. Every storage touch happens under the filesystem lock.
 */

use crate::core::types::{Fd, FIRST_FD};
use crate::storage::{FsContext, StorageFile};
use log::trace;
use parking_lot::Mutex;
use std::sync::Arc;

struct OpenFileEntry {
    fd: Fd,
    file: Box<dyn StorageFile>,
}

struct TableInner {
    next_fd: Fd,
    entries: Vec<OpenFileEntry>,
}

pub struct FdTable {
    fs: Arc<FsContext>,
    inner: Mutex<TableInner>,
}

impl FdTable {
    pub fn new(fs: Arc<FsContext>) -> Self {
        Self {
            fs,
            inner: Mutex::new(TableInner {
                next_fd: FIRST_FD,
                entries: Vec::new(),
            }),
        }
    }

    /// Open `path` and allocate a fresh descriptor for it.
    ///
    /// Descriptor ids are monotonic per process; a closed id's number is
    /// never reissued. Returns `None` if the path cannot be opened.
    pub fn open(&self, path: &str) -> Option<Fd> {
        let file = self.fs.locked(|storage| storage.open(path)).ok()?;
        let mut inner = self.inner.lock();
        let fd = inner.next_fd;
        inner.next_fd += 1;
        inner.entries.push(OpenFileEntry { fd, file });
        trace!("fd {} -> {}", fd, path);
        Some(fd)
    }

    /// File length, or `None` for an unknown descriptor.
    pub fn size(&self, fd: Fd) -> Option<u32> {
        let mut inner = self.inner.lock();
        let entry = inner.entries.iter_mut().find(|entry| entry.fd == fd)?;
        Some(self.fs.locked_file(&mut entry.file, |file| file.len()))
    }

    /// Read up to `len` bytes at the current position.
    ///
    /// Zero-length reads on a live descriptor return an empty buffer
    /// without touching storage.
    pub fn read(&self, fd: Fd, len: u32) -> Option<Vec<u8>> {
        let mut inner = self.inner.lock();
        let entry = inner.entries.iter_mut().find(|entry| entry.fd == fd)?;
        if len == 0 {
            return Some(Vec::new());
        }
        let mut buf = vec![0u8; len as usize];
        let count = self
            .fs
            .locked_file(&mut entry.file, |file| file.read(&mut buf))
            .ok()?;
        buf.truncate(count);
        Some(buf)
    }

    /// Write `bytes` at the current position; returns the count written.
    pub fn write(&self, fd: Fd, bytes: &[u8]) -> Option<usize> {
        let mut inner = self.inner.lock();
        let entry = inner.entries.iter_mut().find(|entry| entry.fd == fd)?;
        if bytes.is_empty() {
            return Some(0);
        }
        self.fs
            .locked_file(&mut entry.file, |file| file.write(bytes))
            .ok()
    }

    /// Reposition a descriptor; unknown descriptors are a silent no-op.
    pub fn seek(&self, fd: Fd, position: u32) {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.iter_mut().find(|entry| entry.fd == fd) {
            self.fs
                .locked_file(&mut entry.file, |file| file.seek(position));
        }
    }

    /// Current position, or `None` for an unknown descriptor.
    pub fn tell(&self, fd: Fd) -> Option<u32> {
        let mut inner = self.inner.lock();
        let entry = inner.entries.iter_mut().find(|entry| entry.fd == fd)?;
        Some(self.fs.locked_file(&mut entry.file, |file| file.tell()))
    }

    /// Close a descriptor, releasing the handle exactly once.
    ///
    /// Ids are unique so at most one entry can match; closing an unknown
    /// descriptor is a no-op, not a failure.
    pub fn close(&self, fd: Fd) {
        let mut inner = self.inner.lock();
        if let Some(index) = inner.entries.iter().position(|entry| entry.fd == fd) {
            let entry = inner.entries.swap_remove(index);
            self.fs.locked(|_| drop(entry.file));
            trace!("closed fd {}", fd);
        }
    }

    /// Close every remaining entry; called once at process exit.
    pub fn close_all(&self) {
        let mut inner = self.inner.lock();
        let entries = std::mem::take(&mut inner.entries);
        if !entries.is_empty() {
            trace!("closing {} leftover descriptors", entries.len());
            self.fs.locked(|_| drop(entries));
        }
    }

    /// Number of live entries, for diagnostics and tests.
    pub fn open_count(&self) -> usize {
        self.inner.lock().entries.len()
    }
}
