/*!
 * Syscall Dispatcher
 *
 * One trap in, one result out. The call number itself lives at a
 * user-supplied address, so even decoding goes through the validator.
 * Unknown numbers and validation failures take the same terminating path
 * as an explicit exit(-1); nothing is silently ignored.
 */

use crate::core::errors::{TrapError, TrapResult};
use crate::core::types::{VirtAddr, FAULT_STATUS};
use crate::kernel::Kernel;
use crate::memory::UserMemory;
use crate::process::Process;
use crate::syscalls::types::{SyscallNumber, TrapOutcome};
use crate::trap::{read_arguments, TrapFrame};
use log::{info, trace, warn};
use std::sync::Arc;

/// Longest string argument (path or command line) the kernel will chase.
pub(super) const MAX_STRING_ARG: VirtAddr = 1024;

impl Kernel {
    /// Entry point of the trap boundary.
    ///
    /// Runs the call to completion; a fault anywhere inside terminates the
    /// calling process through the one exit routine, after which the trap
    /// machinery must not resume it.
    pub fn handle_trap(self: &Arc<Self>, pid: u32, frame: &mut TrapFrame) -> TrapOutcome {
        let Some(process) = self.process(pid) else {
            warn!("trap from unknown pid {}", pid);
            return TrapOutcome::Exit(FAULT_STATUS);
        };

        match self.dispatch(&process, frame) {
            Ok(outcome) => outcome,
            Err(err) => {
                info!("pid {} faulted in syscall: {}", pid, err);
                self.terminate(&process, FAULT_STATUS);
                TrapOutcome::Exit(FAULT_STATUS)
            }
        }
    }

    fn dispatch(
        self: &Arc<Self>,
        process: &Arc<Process>,
        frame: &mut TrapFrame,
    ) -> TrapResult<TrapOutcome> {
        let memory = UserMemory::new(process.memory());
        let number = memory.read_word(frame.sp)?;
        let call = SyscallNumber::try_from(number).map_err(TrapError::UnknownSyscall)?;
        trace!("pid {} trap: {:?}", process.pid(), call);

        let args = read_arguments(&memory, frame, call.arg_count())?;

        match call {
            SyscallNumber::Halt => {
                info!("pid {} requested halt", process.pid());
                self.power().power_off();
                Ok(TrapOutcome::Halt)
            }
            SyscallNumber::Exit => {
                let status = args[0] as i32;
                self.terminate(process, status);
                Ok(TrapOutcome::Exit(status))
            }
            SyscallNumber::Exec => {
                let cmdline = memory.read_cstring(args[0], MAX_STRING_ARG)?;
                frame.set_return(self.exec(process, &cmdline) as u32);
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Wait => {
                frame.set_return(self.wait(process, args[0]) as u32);
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Create => {
                let path = memory.read_cstring(args[0], MAX_STRING_ARG)?;
                frame.set_return(self.sys_create(&path, args[1]));
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Remove => {
                let path = memory.read_cstring(args[0], MAX_STRING_ARG)?;
                frame.set_return(self.sys_remove(&path));
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Open => {
                let path = memory.read_cstring(args[0], MAX_STRING_ARG)?;
                frame.set_return(self.sys_open(process, &path));
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Filesize => {
                frame.set_return(self.sys_filesize(process, args[0]));
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Read => {
                let value = self.sys_read(process, &memory, args[0], args[1], args[2])?;
                frame.set_return(value);
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Write => {
                let value = self.sys_write(process, &memory, args[0], args[1], args[2])?;
                frame.set_return(value);
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Seek => {
                process.fds().seek(args[0], args[1]);
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Tell => {
                frame.set_return(self.sys_tell(process, args[0]));
                Ok(TrapOutcome::Continue)
            }
            SyscallNumber::Close => {
                process.fds().close(args[0]);
                Ok(TrapOutcome::Continue)
            }
        }
    }
}
