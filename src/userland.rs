/*!
 * Userland Stubs
 *
 * The user-side half of the syscall ABI: builds a frame on the simulated
 * user stack and traps into the kernel, one call per function, the way a
 * libc stub would. Program bodies in demos and tests speak to the kernel
 * exclusively through this shim.
 *
 * Stack and buffer writes here happen through the raw address space, not
 * the validator; user code writing its own memory is not a kernel access.
 */

use crate::core::types::{ExitStatus, VirtAddr, KERNEL_BASE, WORD_SIZE};
use crate::kernel::Kernel;
use crate::memory::{AddressSpace, USER_DATA_BASE};
use crate::process::Process;
use crate::syscalls::{SyscallNumber, TrapOutcome};
use crate::trap::TrapFrame;
use std::sync::Arc;

/// Where string arguments are staged in the standard data region
const STRING_BASE: VirtAddr = USER_DATA_BASE;

/// Where I/O buffers are staged; separate from strings so a call can use both
const BUFFER_BASE: VirtAddr = USER_DATA_BASE + 0x1000;

pub struct UserCalls {
    kernel: Arc<Kernel>,
    process: Arc<Process>,
}

impl UserCalls {
    pub fn new(kernel: &Arc<Kernel>, process: &Arc<Process>) -> Self {
        Self {
            kernel: kernel.clone(),
            process: process.clone(),
        }
    }

    fn poke(&self, addr: VirtAddr, bytes: &[u8]) {
        let memory = self.process.memory();
        for (i, byte) in bytes.iter().enumerate() {
            let ok = memory.write_byte_raw(addr + i as VirtAddr, *byte);
            debug_assert!(ok, "staging area not mapped at {:#010x}", addr);
        }
    }

    fn peek(&self, addr: VirtAddr, len: usize) -> Vec<u8> {
        let memory = self.process.memory();
        (0..len)
            .map(|i| memory.read_byte_raw(addr + i as VirtAddr).unwrap_or(0))
            .collect()
    }

    fn stage_str(&self, value: &str) -> VirtAddr {
        self.poke(STRING_BASE, value.as_bytes());
        self.poke(STRING_BASE + value.len() as VirtAddr, &[0]);
        STRING_BASE
    }

    /// Push `number` and `args` onto the user stack and trap.
    pub fn raw_trap(&self, number: u32, args: &[u32]) -> (TrapOutcome, u32) {
        let words = 1 + args.len() as VirtAddr;
        let sp = KERNEL_BASE - WORD_SIZE * words;
        self.poke(sp, &number.to_le_bytes());
        for (i, arg) in args.iter().enumerate() {
            self.poke(sp + WORD_SIZE * (i as VirtAddr + 1), &arg.to_le_bytes());
        }

        let mut frame = TrapFrame::new(sp);
        let outcome = self.kernel.handle_trap(self.process.pid(), &mut frame);
        (outcome, frame.ret)
    }

    pub fn halt(&self) -> TrapOutcome {
        self.raw_trap(SyscallNumber::Halt as u32, &[]).0
    }

    pub fn exit(&self, status: ExitStatus) -> TrapOutcome {
        self.raw_trap(SyscallNumber::Exit as u32, &[status as u32]).0
    }

    pub fn exec(&self, cmdline: &str) -> i32 {
        let ptr = self.stage_str(cmdline);
        self.raw_trap(SyscallNumber::Exec as u32, &[ptr]).1 as i32
    }

    pub fn wait(&self, pid: i32) -> i32 {
        self.raw_trap(SyscallNumber::Wait as u32, &[pid as u32]).1 as i32
    }

    pub fn create(&self, path: &str, initial_size: u32) -> bool {
        let ptr = self.stage_str(path);
        self.raw_trap(SyscallNumber::Create as u32, &[ptr, initial_size])
            .1
            != 0
    }

    pub fn remove(&self, path: &str) -> bool {
        let ptr = self.stage_str(path);
        self.raw_trap(SyscallNumber::Remove as u32, &[ptr]).1 != 0
    }

    pub fn open(&self, path: &str) -> i32 {
        let ptr = self.stage_str(path);
        self.raw_trap(SyscallNumber::Open as u32, &[ptr]).1 as i32
    }

    pub fn filesize(&self, fd: i32) -> i32 {
        self.raw_trap(SyscallNumber::Filesize as u32, &[fd as u32])
            .1 as i32
    }

    /// Read through the kernel into the staged buffer; returns the call's
    /// result and the bytes that arrived.
    pub fn read(&self, fd: i32, len: u32) -> (i32, Vec<u8>) {
        let (_, ret) =
            self.raw_trap(SyscallNumber::Read as u32, &[fd as u32, BUFFER_BASE, len]);
        let count = ret as i32;
        let bytes = if count > 0 {
            self.peek(BUFFER_BASE, count as usize)
        } else {
            Vec::new()
        };
        (count, bytes)
    }

    pub fn write(&self, fd: i32, data: &[u8]) -> i32 {
        self.poke(BUFFER_BASE, data);
        self.raw_trap(
            SyscallNumber::Write as u32,
            &[fd as u32, BUFFER_BASE, data.len() as u32],
        )
        .1 as i32
    }

    pub fn seek(&self, fd: i32, position: u32) {
        self.raw_trap(SyscallNumber::Seek as u32, &[fd as u32, position]);
    }

    pub fn tell(&self, fd: i32) -> u32 {
        self.raw_trap(SyscallNumber::Tell as u32, &[fd as u32]).1
    }

    pub fn close(&self, fd: i32) {
        self.raw_trap(SyscallNumber::Close as u32, &[fd as u32]);
    }
}
