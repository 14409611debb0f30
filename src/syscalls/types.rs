/*!
 * Syscall Types
 * Call numbers of the recognized surface and dispatch outcomes
 */

use crate::core::types::ExitStatus;
use serde::{Deserialize, Serialize};

/// The recognized call surface, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum SyscallNumber {
    Halt = 0,
    Exit = 1,
    Exec = 2,
    Wait = 3,
    Create = 4,
    Remove = 5,
    Open = 6,
    Filesize = 7,
    Read = 8,
    Write = 9,
    Seek = 10,
    Tell = 11,
    Close = 12,
}

impl SyscallNumber {
    /// Argument words the call reads from the user stack.
    pub fn arg_count(self) -> usize {
        match self {
            Self::Halt => 0,
            Self::Exit | Self::Exec | Self::Wait | Self::Remove | Self::Open
            | Self::Filesize | Self::Tell | Self::Close => 1,
            Self::Create | Self::Seek => 2,
            Self::Read | Self::Write => 3,
        }
    }
}

impl TryFrom<u32> for SyscallNumber {
    type Error = u32;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Ok(match number {
            0 => Self::Halt,
            1 => Self::Exit,
            2 => Self::Exec,
            3 => Self::Wait,
            4 => Self::Create,
            5 => Self::Remove,
            6 => Self::Open,
            7 => Self::Filesize,
            8 => Self::Read,
            9 => Self::Write,
            10 => Self::Seek,
            11 => Self::Tell,
            12 => Self::Close,
            other => return Err(other),
        })
    }
}

/// What the dispatcher tells the trap machinery to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Return to user mode; the frame's return slot holds the result.
    Continue,
    /// The calling process no longer exists; do not resume it.
    Exit(ExitStatus),
    /// The system is powering down.
    Halt,
}
