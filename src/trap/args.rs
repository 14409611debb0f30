/*!
 * Argument Reader
 *
 * Pulls syscall arguments off the user stack. Each argument slot address
 * is validated before the word is read; this proves the slot was safe to
 * read, not that a pointer stored in it is valid. Pointer-valued arguments
 * still go through `translate`/`validate_range` in the handler.
 */

use crate::core::errors::TrapResult;
use crate::core::types::{VirtAddr, WORD_SIZE};
use crate::memory::UserMemory;
use crate::trap::frame::TrapFrame;

/// Largest argument count any recognized call takes
pub const MAX_ARGS: usize = 3;

/// Read `count` machine words starting one word above the syscall number.
pub fn read_arguments(
    memory: &UserMemory<'_>,
    frame: &TrapFrame,
    count: usize,
) -> TrapResult<Vec<u32>> {
    debug_assert!(count <= MAX_ARGS);
    let mut args = Vec::with_capacity(count);
    for i in 0..count {
        let slot = frame.sp.wrapping_add(WORD_SIZE * (i as VirtAddr + 1));
        args.push(memory.read_word(slot)?);
    }
    Ok(args)
}
