//! # Mouse remapping
//!
//! The cursor APIs are poll-based, so a single background thread samples
//! the absolute cursor position, works out how far the user pushed the
//! mouse since the last sample, turns that movement by the inverse of the
//! display rotation, and writes the corrected position back.
//!
//! Each cycle does exactly one of:
//!  - nothing, when the display isn't rotated or is being switched
//!  - take a new baseline, after the orientation or resolution changed
//!  - swallow the echo of its own previous write
//!  - apply the transformed movement, if there was any

use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::devices::Cursor;
use crate::error::Result;
use crate::orientation::Orientation;
use crate::state::{OrientationState, Snapshot};
use crate::transform::{logical_delta, Point};
use crate::worker::WorkerSlot;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RemapperConfig {
    /// Pause between cycles while the display is rotated.
    pub poll_interval: Duration,
    /// Pause between cycles while there is nothing to transform.
    pub idle_interval: Duration,
}

impl Default for RemapperConfig {
    fn default() -> Self {
        RemapperConfig {
            poll_interval: Duration::from_millis(1),
            idle_interval: Duration::from_millis(10),
        }
    }
}

/// What a single poll cycle did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// Display at 0°, the cursor is left alone.
    Passthrough,
    /// A mode switch is in flight; baseline dropped.
    Switching,
    /// Baseline taken from the live cursor; no movement applied.
    Resynced,
    /// The previous write was consumed; baseline stays on it.
    Settled,
    /// The mouse hasn't moved.
    Still,
    /// Movement was transformed and written.
    Moved { from: Point, to: Point },
    /// The platform refused a read or write; try again next cycle.
    Failed,
}

/// The remapper's per-cycle state machine, without any thread or timing.
pub struct PollLoop {
    cursor: Arc<dyn Cursor>,
    state: Arc<OrientationState>,
    baseline: Option<Point>,
    generation: Option<u64>,
    pending_write: bool,
}

impl PollLoop {
    pub fn new(cursor: Arc<dyn Cursor>, state: Arc<OrientationState>) -> Self {
        PollLoop {
            cursor,
            state,
            baseline: None,
            generation: None,
            pending_write: false,
        }
    }

    /// The last observed or written cursor position.
    pub fn baseline(&self) -> Option<Point> {
        self.baseline
    }

    /// Forget the baseline so the next cycle takes a fresh one.
    pub fn resync(&mut self) {
        self.baseline = None;
        self.pending_write = false;
    }

    fn read(&self) -> Option<Point> {
        match self.cursor.position() {
            Ok(point) => Some(point),
            Err(err) => {
                log::trace!("cursor read failed: {}", err);
                None
            }
        }
    }

    pub fn step(&mut self) -> Cycle {
        let state = self.state.clone();
        state.hold(|snapshot| self.cycle(snapshot))
    }

    fn cycle(&mut self, snapshot: Snapshot) -> Cycle {
        if snapshot.switching {
            self.resync();
            return Cycle::Switching;
        }

        let orientation = snapshot.display.orientation;

        if orientation == Orientation::Default {
            // Whatever happens to the cursor now is not ours to track.
            self.resync();
            return Cycle::Passthrough;
        }

        let Some(current) = self.read() else {
            return Cycle::Failed;
        };

        let baseline = match self.baseline {
            Some(baseline) if self.generation == Some(snapshot.generation) => baseline,
            _ => {
                self.baseline = Some(current);
                self.generation = Some(snapshot.generation);
                self.pending_write = false;
                return Cycle::Resynced;
            }
        };

        if self.pending_write {
            // Movement since the write stays measured against it.
            self.pending_write = false;
            return Cycle::Settled;
        }

        let physical = current.delta_from(baseline);
        if physical.is_zero() {
            return Cycle::Still;
        }

        let target = baseline
            .offset(logical_delta(orientation, physical))
            .clamp_to(snapshot.display.extent);

        match self.cursor.set_position(target) {
            Ok(()) => {
                self.baseline = Some(target);
                self.pending_write = true;
                Cycle::Moved {
                    from: current,
                    to: target,
                }
            }
            Err(err) => {
                log::trace!("cursor write failed: {}", err);
                // Drop this movement rather than replay it next cycle.
                self.baseline = Some(current);
                Cycle::Failed
            }
        }
    }
}

/// Owns the background thread running a [`PollLoop`].
pub struct MouseRemapper {
    cursor: Arc<dyn Cursor>,
    state: Arc<OrientationState>,
    clock: Arc<dyn Clock>,
    config: RemapperConfig,
    worker: WorkerSlot,
}

impl MouseRemapper {
    pub fn new(
        cursor: Arc<dyn Cursor>,
        state: Arc<OrientationState>,
        clock: Arc<dyn Clock>,
        config: RemapperConfig,
    ) -> Self {
        MouseRemapper {
            cursor,
            state,
            clock,
            config,
            worker: WorkerSlot::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.worker.is_running()
    }

    /// Start the worker. Returns `false` if it was already running.
    pub fn start(&self) -> Result<bool> {
        let mut poll = PollLoop::new(self.cursor.clone(), self.state.clone());
        let config = self.config;

        let started = self
            .worker
            .start("mouse-remapper", self.clock.clone(), move || {
                let cycle = poll.step();
                if let Cycle::Moved { from, to } = cycle {
                    log::trace!("remapped cursor {:?} -> {:?}", from, to);
                }
                match cycle {
                    Cycle::Passthrough => config.idle_interval,
                    _ => config.poll_interval,
                }
            })?;

        if !started {
            log::debug!("mouse remapping is already enabled");
            return Ok(false);
        }
        log::info!("mouse remapping enabled");
        if self.state.orientation() == Orientation::Default {
            log::info!("display is at 0°, movements pass through unchanged");
        }
        Ok(true)
    }

    /// Stop the worker and wait for it. Once this returns the remapper
    /// makes no further cursor writes. Returns `false` if it wasn't running.
    pub fn stop(&self) -> bool {
        let stopped = self.worker.stop();
        if stopped {
            log::info!("mouse remapping disabled");
        }
        stopped
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        if enabled {
            self.start()?;
        } else {
            self.stop();
        }
        Ok(())
    }
}
