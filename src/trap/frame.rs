/*!
 * Trap Frame
 */

use crate::core::types::VirtAddr;

/// Saved user-mode state handed to the dispatcher when a syscall traps.
///
/// The stack pointer addresses the syscall number; arguments sit in the
/// words immediately above it. The return slot stands in for the register
/// the real trap machinery would restore into user mode.
#[derive(Debug, Clone)]
pub struct TrapFrame {
    /// User stack pointer at the moment of the trap
    pub sp: VirtAddr,
    /// Return-value slot written back by the dispatcher
    pub ret: u32,
}

impl TrapFrame {
    pub fn new(sp: VirtAddr) -> Self {
        Self { sp, ret: 0 }
    }

    pub fn set_return(&mut self, value: u32) {
        self.ret = value;
    }

    /// Return slot reinterpreted as the signed value most calls produce.
    pub fn return_signed(&self) -> i32 {
        self.ret as i32
    }
}
