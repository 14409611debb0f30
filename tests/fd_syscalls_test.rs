/*!
 * File Descriptor Syscall Tests
 * The call surface over the descriptor table, the reserved console
 * streams, and the storage collaborator behind the filesystem lock
 */

mod common;

use common::boot;
use pretty_assertions::assert_eq;
use std::sync::atomic::Ordering;
use trap_kernel::UserCalls;

#[test]
fn test_create_open_write_read_round_trip() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert!(calls.create("f", 0));
    let fd = calls.open("f");
    // 0 and 1 are reserved for the console streams.
    assert_eq!(fd, 2);

    assert_eq!(calls.write(fd, b"the quick brown fox"), 19);
    assert_eq!(calls.tell(fd), 19);
    calls.seek(fd, 0);
    assert_eq!(calls.tell(fd), 0);

    let (count, bytes) = calls.read(fd, 19);
    assert_eq!(count, 19);
    assert_eq!(bytes, b"the quick brown fox".to_vec());

    assert_eq!(calls.filesize(fd), 19);
    calls.close(fd);
    assert_eq!(init.fds().open_count(), 0);
}

#[test]
fn test_descriptors_are_unique_and_monotonic() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert!(calls.create("a", 0));
    assert!(calls.create("b", 0));

    let first = calls.open("a");
    let second = calls.open("b");
    assert_eq!(first, 2);
    assert_eq!(second, 3);

    calls.close(first);
    // Closed numbers are never reissued.
    assert_eq!(calls.open("a"), 4);
}

#[test]
fn test_open_missing_file_fails() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert_eq!(calls.open("ghost"), -1);
    assert!(!init.has_exited());
}

#[test]
fn test_create_existing_and_remove() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert!(calls.create("f", 16));
    assert!(!calls.create("f", 16));

    assert!(calls.remove("f"));
    assert!(!calls.remove("f"));
    assert_eq!(calls.open("f"), -1);
}

#[test]
fn test_operations_on_unknown_descriptor_return_sentinels() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert_eq!(calls.filesize(42), -1);
    let (count, _) = calls.read(42, 8);
    assert_eq!(count, -1);
    assert_eq!(calls.write(42, b"x"), -1);
    assert_eq!(calls.tell(42), u32::MAX);

    // seek and close on an unknown descriptor are silent no-ops; the
    // process keeps running.
    calls.seek(42, 0);
    calls.close(42);
    assert!(!init.has_exited());
}

#[test]
fn test_console_write_bypasses_storage() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    let before = bed.storage_ops.load(Ordering::SeqCst);
    assert_eq!(calls.write(1, b"hello console\n"), 14);
    assert_eq!(bed.storage_ops.load(Ordering::SeqCst), before);
    assert_eq!(bed.console.output_string(), "hello console\n");
}

#[test]
fn test_console_read_pulls_scripted_input() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    bed.console.feed(b"abc");
    let before = bed.storage_ops.load(Ordering::SeqCst);
    let (count, bytes) = calls.read(0, 3);
    assert_eq!(count, 3);
    assert_eq!(bytes, b"abc".to_vec());
    assert_eq!(bed.storage_ops.load(Ordering::SeqCst), before);
}

#[test]
fn test_zero_length_io_touches_nothing() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert!(calls.create("f", 4));
    let fd = calls.open("f");

    let before = bed.storage_ops.load(Ordering::SeqCst);
    let (count, _) = calls.read(fd, 0);
    assert_eq!(count, 0);
    assert_eq!(calls.write(fd, b""), 0);
    assert_eq!(bed.storage_ops.load(Ordering::SeqCst), before);
}

#[test]
fn test_exit_closes_remaining_descriptors() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert!(calls.create("a", 0));
    assert!(calls.create("b", 0));
    calls.open("a");
    calls.open("b");
    assert_eq!(init.fds().open_count(), 2);

    calls.exit(0);
    assert_eq!(init.fds().open_count(), 0);
    assert_eq!(bed.kernel.process_count(), 0);
}

#[test]
fn test_reading_a_fresh_file_returns_zero_fill() {
    let bed = boot();
    let init = bed.kernel.spawn_init("init");
    let calls = UserCalls::new(&bed.kernel, &init);

    assert!(calls.create("blank", 8));
    let fd = calls.open("blank");
    assert_eq!(calls.filesize(fd), 8);
    let (count, bytes) = calls.read(fd, 8);
    assert_eq!(count, 8);
    assert_eq!(bytes, vec![0u8; 8]);
}
