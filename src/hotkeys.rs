//! Ctrl+Alt+Arrow rotation hotkeys.
//!
//! The keyboard is polled rather than hooked; a held combo repeats only
//! after the debounce window.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::clock::Clock;
use crate::devices::{Key, Keyboard};
use crate::error::Result;
use crate::orientation::Orientation;
use crate::rotator::ScreenRotator;
use crate::worker::WorkerSlot;

pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const REPEAT_AFTER: Duration = Duration::from_millis(300);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Combo {
    Up,
    Right,
    Down,
    Left,
}

impl Combo {
    /// Arrow keys point where the top of the picture should go.
    pub fn target(self) -> Orientation {
        match self {
            Combo::Up => Orientation::Default,
            Combo::Right => Orientation::Clockwise90,
            Combo::Down => Orientation::UpsideDown,
            Combo::Left => Orientation::Clockwise270,
        }
    }

    /// First held arrow, checked in Up, Down, Left, Right order.
    fn held(keyboard: &dyn Keyboard) -> Option<Combo> {
        [
            (Key::Up, Combo::Up),
            (Key::Down, Combo::Down),
            (Key::Left, Combo::Left),
            (Key::Right, Combo::Right),
        ]
        .into_iter()
        .find(|(key, _)| keyboard.is_pressed(*key))
        .map(|(_, combo)| combo)
    }
}

#[derive(Debug)]
pub struct HotkeyDebouncer {
    repeat_after: Duration,
    last: Option<(Combo, Duration)>,
}

impl HotkeyDebouncer {
    pub fn new(repeat_after: Duration) -> Self {
        HotkeyDebouncer {
            repeat_after,
            last: None,
        }
    }

    /// Feed one keyboard sample, returning the combo to act on, if any.
    pub fn observe(
        &mut self,
        modifiers: bool,
        arrow: Option<Combo>,
        now: Duration,
    ) -> Option<Combo> {
        if !modifiers {
            self.last = None;
            return None;
        }

        let combo = arrow?;
        let fire = match self.last {
            Some((last, at)) => last != combo || now.saturating_sub(at) > self.repeat_after,
            None => true,
        };
        if fire {
            self.last = Some((combo, now));
            Some(combo)
        } else {
            None
        }
    }
}

pub struct HotkeyMonitor {
    keyboard: Arc<dyn Keyboard>,
    rotator: Arc<Mutex<ScreenRotator>>,
    clock: Arc<dyn Clock>,
    worker: WorkerSlot,
}

impl HotkeyMonitor {
    pub fn new(
        keyboard: Arc<dyn Keyboard>,
        rotator: Arc<Mutex<ScreenRotator>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        HotkeyMonitor {
            keyboard,
            rotator,
            clock,
            worker: WorkerSlot::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.worker.is_running()
    }

    pub fn start(&self) -> Result<bool> {
        let keyboard = self.keyboard.clone();
        let rotator = self.rotator.clone();
        let clock = self.clock.clone();
        let mut debouncer = HotkeyDebouncer::new(REPEAT_AFTER);

        let started = self
            .worker
            .start("hotkey-monitor", self.clock.clone(), move || {
                let modifiers =
                    keyboard.is_pressed(Key::Control) && keyboard.is_pressed(Key::Alt);
                let arrow = Combo::held(keyboard.as_ref());

                if let Some(combo) = debouncer.observe(modifiers, arrow, clock.now()) {
                    let target = combo.target();
                    log::info!("[hotkey] Ctrl+Alt+{:?}, rotating to {}", combo, target);
                    let mut rotator = rotator.lock().unwrap_or_else(PoisonError::into_inner);
                    // Already logged by the rotator; the hotkey just tries again next time.
                    rotator.rotate_to(target).ok();
                }
                POLL_INTERVAL
            })?;

        if started {
            log::info!("keyboard shortcuts enabled");
        } else {
            log::debug!("keyboard shortcuts are already enabled");
        }
        Ok(started)
    }

    pub fn stop(&self) -> bool {
        let stopped = self.worker.stop();
        if stopped {
            log::info!("keyboard shortcuts disabled");
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
