/*!
 * Console I/O
 *
 * Character device behind the reserved stream descriptors. Deliberately
 * outside the filesystem lock; writes from different processes may
 * interleave at arbitrary byte boundaries.
 */

use std::io::{Read, Write};

pub trait Console: Send + Sync {
    /// Read one byte of console input, blocking until available.
    fn read_char(&self) -> u8;

    /// Write raw bytes to console output.
    fn write_bytes(&self, bytes: &[u8]);
}

/// Console over the host's stdin/stdout
pub struct StdConsole;

impl Console for StdConsole {
    fn read_char(&self) -> u8 {
        let mut byte = [0u8; 1];
        match std::io::stdin().lock().read(&mut byte) {
            Ok(1) => byte[0],
            // EOF and errors both read as NUL.
            _ => 0,
        }
    }

    fn write_bytes(&self, bytes: &[u8]) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    }
}
