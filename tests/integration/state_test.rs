//! Concurrency properties of the shared display state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use huectl::{DisplayState, RgbColor};

const WRITES: u64 = 50_000;

#[test]
fn readers_never_observe_torn_colors() {
    let state = Arc::new(DisplayState::new(RgbColor::BLACK));
    let done = Arc::new(AtomicBool::new(false));
    // Writer starts only after every reader has taken its first snapshot
    let started = Arc::new(Barrier::new(4));

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let state = Arc::clone(&state);
            let done = Arc::clone(&done);
            let started = Arc::clone(&started);
            thread::spawn(move || {
                let mut reads = 0u64;
                let mut last_version = 0;
                loop {
                    let snap = state.read();
                    assert!(
                        snap.color == RgbColor::BLACK || snap.color == RgbColor::WHITE,
                        "torn read: {}",
                        snap.color
                    );
                    assert!(snap.version >= last_version, "version went backwards");
                    // Even versions were written black, odd ones white
                    let expected = if snap.version % 2 == 0 {
                        RgbColor::BLACK
                    } else {
                        RgbColor::WHITE
                    };
                    assert_eq!(snap.color, expected, "color/version mismatch");
                    last_version = snap.version;
                    reads += 1;
                    if reads == 1 {
                        started.wait();
                    }
                    if done.load(Ordering::Acquire) {
                        break;
                    }
                }
                reads
            })
        })
        .collect();

    started.wait();
    for i in 1..=WRITES {
        let color = if i % 2 == 0 {
            RgbColor::BLACK
        } else {
            RgbColor::WHITE
        };
        let committed = state.write(color);
        assert_eq!(committed.version, i);
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(state.read().version, WRITES);
}

#[test]
fn version_counts_every_write_exactly_once() {
    let state = Arc::new(DisplayState::default());
    let writers: Vec<_> = (0..8u8)
        .map(|n| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    state.write(RgbColor::new(n, n, n));
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }
    assert_eq!(state.read().version, 8_000);
}
