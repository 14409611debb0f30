/*!
 * Local Storage
 * Directory-backed store over std::fs, for persistence across runs
 */

use crate::core::errors::{StorageError, StorageResult};
use crate::storage::traits::{FileStorage, StorageFile};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

/// File store rooted at one host directory.
///
/// Paths are flat names resolved inside the root; anything that would
/// escape it is rejected before touching the host filesystem.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if path.is_empty() || escapes {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl FileStorage for LocalStorage {
    fn create(&self, path: &str, initial_size: u32) -> StorageResult<()> {
        let host_path = self.resolve(path)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&host_path)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_string()),
                _ => StorageError::Io(err.to_string()),
            })?;
        file.set_len(u64::from(initial_size))?;
        Ok(())
    }

    fn remove(&self, path: &str) -> StorageResult<()> {
        let host_path = self.resolve(path)?;
        std::fs::remove_file(&host_path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            _ => StorageError::Io(err.to_string()),
        })
    }

    fn open(&self, path: &str) -> StorageResult<Box<dyn StorageFile>> {
        let host_path = self.resolve(path)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&host_path)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
                _ => StorageError::Io(err.to_string()),
            })?;
        Ok(Box::new(LocalFile { file }))
    }
}

struct LocalFile {
    file: File,
}

impl StorageFile for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> StorageResult<usize> {
        Ok(self.file.read(buf)?)
    }

    fn write(&mut self, buf: &[u8]) -> StorageResult<usize> {
        Ok(self.file.write(buf)?)
    }

    fn seek(&mut self, position: u32) {
        if let Err(err) = self.file.seek(SeekFrom::Start(u64::from(position))) {
            warn!("seek to {} failed: {}", position, err);
        }
    }

    fn tell(&mut self) -> u32 {
        self.file
            .stream_position()
            .map(|position| position as u32)
            .unwrap_or(0)
    }

    fn len(&mut self) -> u32 {
        self.file
            .metadata()
            .map(|metadata| metadata.len() as u32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_write_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();

        storage.create("notes.txt", 0).unwrap();
        let mut file = storage.open("notes.txt").unwrap();
        file.write(b"persisted").unwrap();
        file.seek(0);

        let mut buf = [0u8; 9];
        assert_eq!(file.read(&mut buf).unwrap(), 9);
        assert_eq!(&buf, b"persisted");
    }

    #[test]
    fn test_initial_size_is_zero_filled() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();

        storage.create("blank", 32).unwrap();
        let mut file = storage.open("blank").unwrap();
        assert_eq!(file.len(), 32);
    }

    #[test]
    fn test_escaping_path_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();

        assert!(matches!(
            storage.create("../escape", 0),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            storage.open("/etc/passwd"),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_remove_missing_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();
        assert!(matches!(
            storage.remove("ghost"),
            Err(StorageError::NotFound(_))
        ));
    }
}
