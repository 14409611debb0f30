/*!
 * File Syscalls
 *
 * The reserved stream descriptors are routed to the console collaborator
 * before the table is consulted, and never acquire the filesystem lock.
 * Everything that touches storage goes through the locked context the
 * descriptor table wraps.
 */

use crate::core::errors::TrapResult;
use crate::core::types::{Fd, VirtAddr, RETURN_FAILURE, STDIN_FD, STDOUT_FD, TELL_SENTINEL};
use crate::kernel::Kernel;
use crate::memory::UserMemory;
use crate::process::Process;
use log::debug;
use std::sync::Arc;

impl Kernel {
    pub(super) fn sys_create(&self, path: &str, initial_size: u32) -> u32 {
        match self.fs().create(path, initial_size) {
            Ok(()) => 1,
            Err(err) => {
                debug!("create '{}' failed: {}", path, err);
                0
            }
        }
    }

    pub(super) fn sys_remove(&self, path: &str) -> u32 {
        match self.fs().remove(path) {
            Ok(()) => 1,
            Err(err) => {
                debug!("remove '{}' failed: {}", path, err);
                0
            }
        }
    }

    pub(super) fn sys_open(&self, process: &Arc<Process>, path: &str) -> u32 {
        match process.fds().open(path) {
            Some(fd) => fd,
            None => RETURN_FAILURE,
        }
    }

    pub(super) fn sys_filesize(&self, process: &Arc<Process>, fd: Fd) -> u32 {
        process.fds().size(fd).unwrap_or(RETURN_FAILURE)
    }

    /// Read into a user buffer. The whole destination range is validated
    /// before a single byte moves, in both the console and storage paths.
    pub(super) fn sys_read(
        &self,
        process: &Arc<Process>,
        memory: &UserMemory<'_>,
        fd: Fd,
        buffer: VirtAddr,
        len: u32,
    ) -> TrapResult<u32> {
        memory.validate_range(buffer, len)?;

        if fd == STDIN_FD {
            // Console input: one character at a time, no lock, no table.
            for offset in 0..len {
                let byte = self.console().read_char();
                memory.write_byte(buffer + offset, byte)?;
            }
            return Ok(len);
        }

        match process.fds().read(fd, len) {
            Some(data) => {
                memory.write_bytes(buffer, &data)?;
                Ok(data.len() as u32)
            }
            None => Ok(RETURN_FAILURE),
        }
    }

    /// Write from a user buffer; source range validated up front.
    pub(super) fn sys_write(
        &self,
        process: &Arc<Process>,
        memory: &UserMemory<'_>,
        fd: Fd,
        buffer: VirtAddr,
        len: u32,
    ) -> TrapResult<u32> {
        memory.validate_range(buffer, len)?;
        let bytes = memory.read_bytes(buffer, len)?;

        if fd == STDOUT_FD {
            self.console().write_bytes(&bytes);
            return Ok(len);
        }

        match process.fds().write(fd, &bytes) {
            Some(count) => Ok(count as u32),
            None => Ok(RETURN_FAILURE),
        }
    }

    pub(super) fn sys_tell(&self, process: &Arc<Process>, fd: Fd) -> u32 {
        process.fds().tell(fd).unwrap_or(TELL_SENTINEL)
    }
}
