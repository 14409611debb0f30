/*!
 * Address Validation
 *
 * Every dereference of user-controlled memory goes through this view, with
 * no exceptions. A user process's stack pointer, its syscall arguments, and
 * any pointer-typed argument are adversarial inputs; the kernel touches
 * them only after `validate`/`translate` have passed.
 */

use crate::core::errors::{TrapError, TrapResult};
use crate::core::types::{VirtAddr, KERNEL_BASE, USER_FLOOR, WORD_SIZE};
use crate::memory::paged::AddressSpace;

/// Validated accessor over one process's user address space.
///
/// `validate` enforces the user/kernel boundary, `translate` additionally
/// requires a mapping, and the typed readers/writers below are the only
/// way kernel code moves bytes across the trap boundary.
pub struct UserMemory<'a> {
    space: &'a dyn AddressSpace,
}

impl<'a> UserMemory<'a> {
    pub fn new(space: &'a dyn AddressSpace) -> Self {
        Self { space }
    }

    /// Check that `addr` lies in the legitimate user range.
    pub fn validate(&self, addr: VirtAddr) -> TrapResult<()> {
        if addr >= KERNEL_BASE || addr < USER_FLOOR {
            return Err(TrapError::InvalidAccess(addr));
        }
        Ok(())
    }

    /// Check that `addr` is a valid user address with a page mapped behind it.
    pub fn translate(&self, addr: VirtAddr) -> TrapResult<()> {
        self.validate(addr)?;
        if !self.space.resolve(addr) {
            return Err(TrapError::Unmapped(addr));
        }
        Ok(())
    }

    /// Validate every byte of `[addr, addr + len)`, short-circuiting on the
    /// first invalid one. Required before any buffer of caller-supplied
    /// length is touched, in either direction.
    pub fn validate_range(&self, addr: VirtAddr, len: VirtAddr) -> TrapResult<()> {
        for offset in 0..len {
            let byte_addr = addr
                .checked_add(offset)
                .ok_or(TrapError::InvalidAccess(addr))?;
            self.translate(byte_addr)?;
        }
        Ok(())
    }

    pub fn read_byte(&self, addr: VirtAddr) -> TrapResult<u8> {
        self.translate(addr)?;
        self.space
            .read_byte_raw(addr)
            .ok_or(TrapError::Unmapped(addr))
    }

    pub fn write_byte(&self, addr: VirtAddr, byte: u8) -> TrapResult<()> {
        self.translate(addr)?;
        if !self.space.write_byte_raw(addr, byte) {
            return Err(TrapError::Unmapped(addr));
        }
        Ok(())
    }

    /// Read one little-endian machine word.
    pub fn read_word(&self, addr: VirtAddr) -> TrapResult<u32> {
        self.validate_range(addr, WORD_SIZE)?;
        let mut bytes = [0u8; WORD_SIZE as usize];
        for (i, slot) in bytes.iter_mut().enumerate() {
            *slot = self.read_byte(addr + i as VirtAddr)?;
        }
        Ok(u32::from_le_bytes(bytes))
    }

    /// Write one little-endian machine word.
    pub fn write_word(&self, addr: VirtAddr, word: u32) -> TrapResult<()> {
        self.validate_range(addr, WORD_SIZE)?;
        for (i, byte) in word.to_le_bytes().iter().enumerate() {
            self.write_byte(addr + i as VirtAddr, *byte)?;
        }
        Ok(())
    }

    /// Copy `len` bytes out of user memory, validating the whole range first.
    pub fn read_bytes(&self, addr: VirtAddr, len: VirtAddr) -> TrapResult<Vec<u8>> {
        self.validate_range(addr, len)?;
        let mut out = Vec::with_capacity(len as usize);
        for offset in 0..len {
            out.push(self.read_byte(addr + offset)?);
        }
        Ok(out)
    }

    /// Copy bytes into user memory, validating the whole range first.
    pub fn write_bytes(&self, addr: VirtAddr, bytes: &[u8]) -> TrapResult<()> {
        self.validate_range(addr, bytes.len() as VirtAddr)?;
        for (i, byte) in bytes.iter().enumerate() {
            self.write_byte(addr + i as VirtAddr, *byte)?;
        }
        Ok(())
    }

    /// Read a NUL-terminated string, validating byte by byte.
    ///
    /// A string that runs past `max_len` without a terminator is treated as
    /// an invalid access, same as a string wandering off the mapped range.
    pub fn read_cstring(&self, addr: VirtAddr, max_len: VirtAddr) -> TrapResult<String> {
        let mut bytes = Vec::new();
        for offset in 0..max_len {
            let byte_addr = addr
                .checked_add(offset)
                .ok_or(TrapError::InvalidAccess(addr))?;
            let byte = self.read_byte(byte_addr)?;
            if byte == 0 {
                return Ok(String::from_utf8_lossy(&bytes).into_owned());
            }
            bytes.push(byte);
        }
        Err(TrapError::InvalidAccess(addr))
    }
}
