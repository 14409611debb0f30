/*!
 * In-Memory Storage
 * Path-keyed byte vectors; the default store for tests and the demo
 */

use crate::core::errors::{StorageError, StorageResult};
use crate::storage::traits::{FileStorage, StorageFile};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

type FileData = Arc<Mutex<Vec<u8>>>;

/// In-memory file store.
///
/// Removing a path only unlinks it; handles already open keep the data
/// alive until they are closed.
pub struct MemStorage {
    files: DashMap<String, FileData>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            files: DashMap::new(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorage for MemStorage {
    fn create(&self, path: &str, initial_size: u32) -> StorageResult<()> {
        if self.files.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        self.files.insert(
            path.to_string(),
            Arc::new(Mutex::new(vec![0u8; initial_size as usize])),
        );
        Ok(())
    }

    fn remove(&self, path: &str) -> StorageResult<()> {
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn open(&self, path: &str) -> StorageResult<Box<dyn StorageFile>> {
        let data = self
            .files
            .get(path)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        Ok(Box::new(MemFile { data, position: 0 }))
    }
}

struct MemFile {
    data: FileData,
    position: u32,
}

impl StorageFile for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> StorageResult<usize> {
        let data = self.data.lock();
        let start = (self.position as usize).min(data.len());
        let count = buf.len().min(data.len() - start);
        buf[..count].copy_from_slice(&data[start..start + count]);
        drop(data);
        self.position += count as u32;
        Ok(count)
    }

    fn write(&mut self, buf: &[u8]) -> StorageResult<usize> {
        let mut data = self.data.lock();
        let start = self.position as usize;
        let end = start + buf.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buf);
        drop(data);
        self.position = end as u32;
        Ok(buf.len())
    }

    fn seek(&mut self, position: u32) {
        self.position = position;
    }

    fn tell(&mut self) -> u32 {
        self.position
    }

    fn len(&mut self) -> u32 {
        self.data.lock().len() as u32
    }
}
