/*!
 * Filesystem Context
 *
 * The storage collaborator plus the one coarse lock that serializes every
 * touch of it, kernel-wide. The lock is owned state, not a bare global,
 * and is only reachable through scoped acquisition, so it is released on
 * every exit path including the terminating ones.
 */

use crate::core::errors::StorageResult;
use crate::storage::traits::{FileStorage, StorageFile};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct FsContext {
    storage: Box<dyn FileStorage>,
    lock: Mutex<()>,
}

impl FsContext {
    pub fn new(storage: Box<dyn FileStorage>) -> Arc<Self> {
        Arc::new(Self {
            storage,
            lock: Mutex::new(()),
        })
    }

    /// Run `op` against the storage collaborator with the filesystem lock
    /// held. Console I/O never comes through here.
    pub fn locked<R>(&self, op: impl FnOnce(&dyn FileStorage) -> R) -> R {
        let _guard = self.lock.lock();
        op(&*self.storage)
    }

    /// Run `op` on an open handle with the filesystem lock held.
    pub fn locked_file<R>(
        &self,
        file: &mut Box<dyn StorageFile>,
        op: impl FnOnce(&mut dyn StorageFile) -> R,
    ) -> R {
        let _guard = self.lock.lock();
        op(file.as_mut())
    }

    pub fn create(&self, path: &str, initial_size: u32) -> StorageResult<()> {
        self.locked(|storage| storage.create(path, initial_size))
    }

    pub fn remove(&self, path: &str) -> StorageResult<()> {
        self.locked(|storage| storage.remove(path))
    }
}
