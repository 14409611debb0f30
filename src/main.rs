/*!
 * Trap Kernel - Demo Entry Point
 *
 * Boots a kernel over the in-memory store, registers two demo programs,
 * and drives an init process through the call surface: file round-trip,
 * child creation, wait, halt.
 */

use anyhow::{bail, Result};
use log::info;
use std::sync::Arc;
use trap_kernel::{Kernel, SoftPower, ThreadLoader, TrapOutcome, UserCalls};

fn main() -> Result<()> {
    env_logger::init();

    info!("trap-kernel demo starting");

    let loader = ThreadLoader::new();
    let power = Arc::new(SoftPower::new());

    // A child that greets over the console and exits with a status the
    // parent can observe through wait.
    loader.register("greeter", |kernel, process| {
        let calls = UserCalls::new(kernel, process);
        calls.write(1, b"hello from the child\n");
        calls.exit(7);
        7
    });

    let kernel = Kernel::builder()
        .loader(loader.clone())
        .power(power.clone())
        .build();

    let init = kernel.spawn_init("init");
    let calls = UserCalls::new(&kernel, &init);

    // File round-trip through the descriptor table.
    if !calls.create("scratch.txt", 0) {
        bail!("create failed");
    }
    let fd = calls.open("scratch.txt");
    if fd < 0 {
        bail!("open failed");
    }
    calls.write(fd, b"round trip");
    calls.seek(fd, 0);
    let (count, bytes) = calls.read(fd, 10);
    info!("read back {} bytes: {:?}", count, String::from_utf8_lossy(&bytes));
    calls.close(fd);

    // Child lifecycle: exec rendezvouses on the load outcome, wait on exit.
    let child = calls.exec("greeter");
    if child < 0 {
        bail!("exec failed");
    }
    let status = calls.wait(child);
    info!("child {} exited with status {}", child, status);

    // A second wait on the same child is refused.
    assert_eq!(calls.wait(child), -1);

    let outcome = calls.halt();
    if outcome != TrapOutcome::Halt || !power.powered_off() {
        bail!("halt did not power the system down");
    }

    info!("trap-kernel demo finished");
    Ok(())
}
