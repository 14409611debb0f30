/*!
 * Shared Test Harness
 * Kernel wired to observable collaborators: scripted console, counting
 * storage, latching power
 */

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trap_kernel::{
    Console, FileStorage, Kernel, MemStorage, SoftPower, StorageFile, StorageResult, ThreadLoader,
};

/// Console with canned input and captured output
pub struct ScriptedConsole {
    input: Mutex<VecDeque<u8>>,
    output: Mutex<Vec<u8>>,
}

impl ScriptedConsole {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            input: Mutex::new(VecDeque::new()),
            output: Mutex::new(Vec::new()),
        })
    }

    pub fn feed(&self, bytes: &[u8]) {
        self.input.lock().extend(bytes.iter().copied());
    }

    pub fn output(&self) -> Vec<u8> {
        self.output.lock().clone()
    }

    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output()).into_owned()
    }
}

impl Console for ScriptedConsole {
    fn read_char(&self) -> u8 {
        self.input.lock().pop_front().unwrap_or(0)
    }

    fn write_bytes(&self, bytes: &[u8]) {
        self.output.lock().extend_from_slice(bytes);
    }
}

/// Storage wrapper that counts every collaborator call, so tests can
/// assert the console paths and zero-length I/O never reach storage.
pub struct CountingStorage {
    inner: MemStorage,
    ops: Arc<AtomicUsize>,
}

impl CountingStorage {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let ops = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: MemStorage::new(),
                ops: ops.clone(),
            },
            ops,
        )
    }
}

impl FileStorage for CountingStorage {
    fn create(&self, path: &str, initial_size: u32) -> StorageResult<()> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.inner.create(path, initial_size)
    }

    fn remove(&self, path: &str) -> StorageResult<()> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(path)
    }

    fn open(&self, path: &str) -> StorageResult<Box<dyn StorageFile>> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.open(path)?;
        Ok(Box::new(CountingFile {
            inner,
            ops: self.ops.clone(),
        }))
    }
}

struct CountingFile {
    inner: Box<dyn StorageFile>,
    ops: Arc<AtomicUsize>,
}

impl StorageFile for CountingFile {
    fn read(&mut self, buf: &mut [u8]) -> StorageResult<usize> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> StorageResult<usize> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.inner.write(buf)
    }

    fn seek(&mut self, position: u32) {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.inner.seek(position);
    }

    fn tell(&mut self) -> u32 {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.inner.tell()
    }

    fn len(&mut self) -> u32 {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.inner.len()
    }
}

/// Kernel plus handles to everything the tests observe
pub struct TestBed {
    pub kernel: Arc<Kernel>,
    pub console: Arc<ScriptedConsole>,
    pub power: Arc<SoftPower>,
    pub loader: Arc<ThreadLoader>,
    pub storage_ops: Arc<AtomicUsize>,
}

pub fn boot() -> TestBed {
    let (storage, storage_ops) = CountingStorage::new();
    let console = ScriptedConsole::new();
    let power = Arc::new(SoftPower::new());
    let loader = ThreadLoader::new();

    let kernel = Kernel::builder()
        .storage(storage)
        .console(console.clone())
        .power(power.clone())
        .loader(loader.clone())
        .build();

    TestBed {
        kernel,
        console,
        power,
        loader,
        storage_ops,
    }
}
