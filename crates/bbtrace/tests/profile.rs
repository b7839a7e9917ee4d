//! End-to-end profiling: session lifecycle, concurrent execution, emitted
//! profile contents.

use std::io::BufReader;
use std::sync::Barrier;

use bbtrace::{SessionConfig, TraceSession, parse_profile};

#[test]
fn concurrent_run_produces_exact_counts() {
    const THREADS: u64 = 4;
    const HITS: u64 = 25_000;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.txt");

    let session = TraceSession::new(SessionConfig::new().with_output(&path)).unwrap();

    // Discovery happens in a fixed order; execution below is unordered.
    let shared = session.register_block(0x0040_1020);
    let private_base = 0x0040_2000;
    let privates: Vec<_> = (0..THREADS)
        .map(|t| session.register_block(private_base + t * 0x10))
        .collect();
    let never_run = session.register_block(0x0040_f000);

    let barrier = Barrier::new(THREADS as usize);
    std::thread::scope(|s| {
        for private in &privates {
            let shared = shared.clone();
            let private = private.clone();
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for i in 0..HITS {
                    shared.hit();
                    if i % 2 == 0 {
                        private.hit();
                    }
                }
            });
        }
    });

    session.finish().unwrap();
    drop(never_run);

    let file = std::fs::File::open(&path).unwrap();
    let entries = parse_profile(BufReader::new(file)).unwrap();

    assert_eq!(entries.len() as u64, THREADS + 2);

    // Discovery order: shared block first, then per-thread blocks, then the
    // block that never executed.
    assert_eq!(entries[0].addr, 0x0040_1020);
    assert_eq!(entries[0].count, THREADS * HITS);
    for (i, entry) in entries[1..=THREADS as usize].iter().enumerate() {
        assert_eq!(entry.addr, private_base + i as u64 * 0x10);
        assert_eq!(entry.count, HITS / 2);
    }
    assert_eq!(entries[THREADS as usize + 1].addr, 0x0040_f000);
    assert_eq!(entries[THREADS as usize + 1].count, 0);
}

#[test]
fn retranslated_block_gets_its_own_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.txt");

    let session = TraceSession::new(SessionConfig::new().with_output(&path)).unwrap();

    let first = session.register_block(0x1000);
    first.hit();
    first.hit();

    // Code at 0x1000 is re-translated; the fresh descriptor counts only its
    // own executions.
    let second = session.register_block(0x1000);
    second.hit();

    session.finish().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "1000 2\n1000 1\n");
}

#[test]
fn bad_output_path_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("profile.txt");

    assert!(TraceSession::new(SessionConfig::new().with_output(&path)).is_err());
    assert!(!path.exists());
    assert!(!path.parent().unwrap().exists());
}
