//! Shared display state.
//!
//! Holds the single "current color" read by the render loop and written by
//! the command dispatcher. Color and version live together behind one mutex,
//! so a reader always sees a pair produced by one complete write, and writes
//! from any number of call sites are serialized.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::color::RgbColor;

/// A committed color together with the write that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub color: RgbColor,
    /// Number of successful writes so far. Starts at 0 for the initial color.
    pub version: u64,
}

/// The current color, safely shared between threads.
///
/// The critical section of both [`write`](Self::write) and
/// [`read`](Self::read) is a plain copy of a [`Snapshot`], so a reader never
/// waits longer than one write.
#[derive(Debug)]
pub struct DisplayState {
    current: Mutex<Snapshot>,
}

impl DisplayState {
    /// Create state holding `initial` at version 0.
    pub fn new(initial: RgbColor) -> Self {
        Self {
            current: Mutex::new(Snapshot {
                color: initial,
                version: 0,
            }),
        }
    }

    /// Replace the current color and bump the version in one step.
    ///
    /// Returns the snapshot that was committed.
    pub fn write(&self, color: RgbColor) -> Snapshot {
        let mut current = self.lock();
        current.color = color;
        current.version += 1;
        *current
    }

    /// Read the current color and its version.
    pub fn read(&self) -> Snapshot {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        // Snapshot is Copy and assigned field by field under the lock, with no
        // code in between that can panic, so a poisoned guard still holds a
        // whole value.
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(RgbColor::WHITE)
    }
}
