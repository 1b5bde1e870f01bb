//! Shared orientation state.
//!
//! Written by the bridge after a display change, read by the remapper on
//! every poll cycle. Orientation and extent are swapped under one lock
//! together with a generation counter, so a reader never pairs the new
//! orientation with the old resolution and can tell that a change happened
//! even when the values come back identical.
//!
//! While a mode switch is in flight the state is marked `switching`; the
//! remapper runs each cycle under [`OrientationState::hold`], so a cycle
//! either finishes before the switch starts or sees the mark and skips.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::orientation::Orientation;
use crate::transform::Extent;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub orientation: Orientation,
    pub extent: Extent,
}

/// A consistent read of the state and the number of changes before it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub display: DisplayState,
    pub generation: u64,
    /// A mode change has started but not yet been reported.
    pub switching: bool,
}

#[derive(Debug)]
pub struct OrientationState {
    inner: Mutex<Snapshot>,
}

impl OrientationState {
    pub fn new(orientation: Orientation, extent: Extent) -> Self {
        OrientationState {
            inner: Mutex::new(Snapshot {
                display: DisplayState {
                    orientation,
                    extent,
                },
                generation: 0,
                switching: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        // Every write is a plain copy, so a poisoned value is still whole.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Snapshot {
        *self.lock()
    }

    pub fn orientation(&self) -> Orientation {
        self.lock().display.orientation
    }

    pub fn extent(&self) -> Extent {
        self.lock().display.extent
    }

    /// Run `f` with the state locked, so no change can start meanwhile.
    pub fn hold<T>(&self, f: impl FnOnce(Snapshot) -> T) -> T {
        let guard = self.lock();
        f(*guard)
    }

    /// Mark a mode change as started. Waits for a held cycle to finish.
    pub fn begin_change(&self) {
        self.lock().switching = true;
    }

    /// The mode change failed; the old values still hold.
    pub fn cancel_change(&self) {
        self.lock().switching = false;
    }

    /// Replace all fields at once and start a new generation.
    pub fn replace(&self, display: DisplayState) -> u64 {
        let mut guard = self.lock();
        guard.display = display;
        guard.switching = false;
        guard.generation = guard.generation.wrapping_add(1);
        guard.generation
    }
}
