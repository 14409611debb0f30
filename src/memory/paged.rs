/*!
 * Paged User Memory
 *
 * Simulated page-table view of one process's user address space. Pages are
 * mapped explicitly; everything else is a fault waiting to happen, which is
 * exactly what the validator exists to catch.
 */

use crate::core::types::{VirtAddr, KERNEL_BASE};
use dashmap::DashMap;
use std::sync::Arc;

/// Page size of the simulated address space
pub const PAGE_SIZE: VirtAddr = 4096;

/// Stack bytes mapped directly below the kernel boundary
pub const USER_STACK_SIZE: VirtAddr = 0x1_0000;

/// Base of the data region the standard layout maps for user buffers
pub const USER_DATA_BASE: VirtAddr = 0x0810_0000;

/// Size of the standard data region
pub const USER_DATA_SIZE: VirtAddr = 0x4000;

/// Page-table view the validator consults before any dereference.
///
/// Implementations are the external memory-mapping collaborator: they only
/// answer "is this byte mapped" and move single bytes. Range checks and
/// user/kernel boundary policy live in [`UserMemory`](super::UserMemory).
pub trait AddressSpace: Send + Sync {
    /// Whether a frame is mapped at `addr`.
    fn resolve(&self, addr: VirtAddr) -> bool;

    /// Read one byte; `None` if the page is not mapped.
    fn read_byte_raw(&self, addr: VirtAddr) -> Option<u8>;

    /// Write one byte; `false` if the page is not mapped.
    fn write_byte_raw(&self, addr: VirtAddr, byte: u8) -> bool;
}

/// Sparse paged memory backing one simulated process
pub struct PagedMemory {
    pages: DashMap<VirtAddr, Box<[u8; PAGE_SIZE as usize]>>,
}

impl PagedMemory {
    pub fn new() -> Self {
        Self {
            pages: DashMap::new(),
        }
    }

    /// Map zero-filled pages covering `[base, base + len)`.
    ///
    /// Already-mapped pages in the range keep their contents.
    pub fn map_region(&self, base: VirtAddr, len: VirtAddr) {
        if len == 0 {
            return;
        }
        let first = base / PAGE_SIZE;
        let last = (base + len - 1) / PAGE_SIZE;
        for page in first..=last {
            self.pages
                .entry(page)
                .or_insert_with(|| Box::new([0u8; PAGE_SIZE as usize]));
        }
    }

    /// Standard layout every spawned process starts with: a stack just
    /// below the kernel boundary and a small data region for buffers.
    pub fn with_user_layout() -> Arc<Self> {
        let memory = Self::new();
        memory.map_region(KERNEL_BASE - USER_STACK_SIZE, USER_STACK_SIZE);
        memory.map_region(USER_DATA_BASE, USER_DATA_SIZE);
        Arc::new(memory)
    }

    /// Number of mapped pages, for diagnostics.
    pub fn mapped_pages(&self) -> usize {
        self.pages.len()
    }
}

impl Default for PagedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSpace for PagedMemory {
    fn resolve(&self, addr: VirtAddr) -> bool {
        self.pages.contains_key(&(addr / PAGE_SIZE))
    }

    fn read_byte_raw(&self, addr: VirtAddr) -> Option<u8> {
        self.pages
            .get(&(addr / PAGE_SIZE))
            .map(|page| page[(addr % PAGE_SIZE) as usize])
    }

    fn write_byte_raw(&self, addr: VirtAddr, byte: u8) -> bool {
        match self.pages.get_mut(&(addr / PAGE_SIZE)) {
            Some(mut page) => {
                page[(addr % PAGE_SIZE) as usize] = byte;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_by_default() {
        let memory = PagedMemory::new();
        assert!(!memory.resolve(0x0804_8000));
        assert_eq!(memory.read_byte_raw(0x0804_8000), None);
        assert!(!memory.write_byte_raw(0x0804_8000, 1));
    }

    #[test]
    fn test_map_region_round_trip() {
        let memory = PagedMemory::new();
        memory.map_region(0x0810_0000, 100);
        assert!(memory.resolve(0x0810_0000));
        assert!(memory.write_byte_raw(0x0810_0063, 0xAB));
        assert_eq!(memory.read_byte_raw(0x0810_0063), Some(0xAB));
    }

    #[test]
    fn test_map_region_spans_pages() {
        let memory = PagedMemory::new();
        memory.map_region(PAGE_SIZE - 1, 2);
        assert!(memory.resolve(PAGE_SIZE - 1));
        assert!(memory.resolve(PAGE_SIZE));
        assert!(!memory.resolve(2 * PAGE_SIZE));
    }

    #[test]
    fn test_map_region_zero_length() {
        let memory = PagedMemory::new();
        memory.map_region(0x0810_0000, 0);
        assert_eq!(memory.mapped_pages(), 0);
    }
}
