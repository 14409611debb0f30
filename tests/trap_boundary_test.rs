/*!
 * Trap Boundary Tests
 * Adversarial frames and pointers must terminate the caller through the
 * normal exit path, never crash the kernel or leak resources
 */

mod common;

use common::boot;
use trap_kernel::{TrapFrame, TrapOutcome, UserCalls};

const KERNEL_BASE: u32 = 0xC000_0000;
const USER_FLOOR: u32 = 0x0804_8000;

#[test]
fn test_unknown_syscall_number_terminates() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    let (outcome, _) = calls.raw_trap(999, &[]);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
    assert!(init.has_exited());
    assert_eq!(bed.kernel.process_count(), 0);
    assert!(bed.console.output_string().contains("init: exit(-1)"));
}

#[test]
fn test_stack_pointer_in_kernel_space_terminates() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");

    let mut frame = TrapFrame::new(KERNEL_BASE);
    let outcome = bed.kernel.handle_trap(init.pid(), &mut frame);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
    assert!(init.has_exited());
}

#[test]
fn test_unmapped_stack_pointer_terminates() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");

    // In user range, but no page mapped there.
    let mut frame = TrapFrame::new(0x0900_0000);
    let outcome = bed.kernel.handle_trap(init.pid(), &mut frame);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
}

#[test]
fn test_string_pointer_below_user_floor_terminates() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    // exec with a command-line pointer below the lowest legitimate
    // user address.
    let (outcome, _) = calls.raw_trap(2, &[USER_FLOOR - 4]);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
    assert!(init.has_exited());
}

#[test]
fn test_read_buffer_in_kernel_space_terminates() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    let (outcome, _) = calls.raw_trap(8, &[0, KERNEL_BASE, 16]);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
}

#[test]
fn test_buffer_range_validated_to_the_last_byte() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    // The buffer starts inside the mapped data region but runs past its
    // end; per-byte validation must catch the tail before any byte moves.
    let data_end = 0x0810_0000 + 0x4000;
    let (outcome, _) = calls.raw_trap(9, &[1, data_end - 8, 64]);
    assert_eq!(outcome, TrapOutcome::Exit(-1));

    // Nothing reached the console before the fault was detected.
    assert_eq!(bed.console.output_string(), "init: exit(-1)\n");
}

#[test]
fn test_fault_releases_open_descriptors() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert!(calls.create("f", 0));
    assert!(calls.open("f") >= 2);
    assert_eq!(init.fds().open_count(), 1);

    let (outcome, _) = calls.raw_trap(999, &[]);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
    assert_eq!(init.fds().open_count(), 0);
}

#[test]
fn test_trap_from_unknown_pid_is_rejected() {
    let bed = boot();
    let mut frame = TrapFrame::new(KERNEL_BASE - 16);
    let outcome = bed.kernel.handle_trap(4242, &mut frame);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
}

#[test]
fn test_argument_slot_straddling_kernel_boundary() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");

    // The number slot is the last mapped user word; the argument slot
    // for exit's status lands on the kernel boundary.
    let sp = KERNEL_BASE - 4;
    let memory = init.memory();
    for (i, byte) in 1u32.to_le_bytes().iter().enumerate() {
        assert!(trap_kernel::AddressSpace::write_byte_raw(
            memory,
            sp + i as u32,
            *byte
        ));
    }

    let mut frame = TrapFrame::new(sp);
    let outcome = bed.kernel.handle_trap(init.pid(), &mut frame);
    assert_eq!(outcome, TrapOutcome::Exit(-1));
}
