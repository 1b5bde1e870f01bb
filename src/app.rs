//! The composed application: one owner for the shared state and every
//! component that reads or writes it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::backends::dummy::DummyDisplay;
use crate::backends::DisplayManager;
use crate::bridge::OrientationBridge;
use crate::clock::Clock;
use crate::devices::dummy::{DummyCursor, DummyKeyboard};
use crate::devices::{Cursor, Keyboard};
use crate::error::Result;
use crate::hotkeys::HotkeyMonitor;
use crate::orientation::Orientation;
use crate::remapper::{MouseRemapper, RemapperConfig};
use crate::rotator::ScreenRotator;
use crate::state::OrientationState;
use crate::transform::{Extent, Point};

/// Everything the application touches on the host.
pub struct Devices {
    pub display: Box<dyn DisplayManager>,
    pub cursor: Arc<dyn Cursor>,
    pub keyboard: Arc<dyn Keyboard>,
}

impl Devices {
    /// In-memory devices with the cursor centred on a landscape screen.
    pub fn simulated(extent: Extent) -> Self {
        let cursor = Arc::new(DummyCursor::new(
            extent,
            Point::new((extent.width / 2) as i32, (extent.height / 2) as i32),
        ));
        Devices {
            display: Box::new(
                DummyDisplay::new(Orientation::Default, extent).with_cursor(cursor.clone()),
            ),
            cursor,
            keyboard: Arc::new(DummyKeyboard::new()),
        }
    }

    #[cfg(windows)]
    pub fn native() -> Result<Self> {
        use crate::backends::win32::Win32Display;
        use crate::devices::win32::{Win32Cursor, Win32Keyboard};

        Ok(Devices {
            display: Box::new(Win32Display),
            cursor: Arc::new(Win32Cursor),
            keyboard: Arc::new(Win32Keyboard),
        })
    }

    #[cfg(not(windows))]
    pub fn native() -> Result<Self> {
        Err(crate::error::Error::Unsupported(
            "display rotation needs Windows; try --simulate WIDTHxHEIGHT".into(),
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub degrees: isize,
    pub label: &'static str,
    pub remapping: bool,
    pub hotkeys: bool,
}

pub struct App {
    state: Arc<OrientationState>,
    rotator: Arc<Mutex<ScreenRotator>>,
    remapper: MouseRemapper,
    hotkeys: HotkeyMonitor,
}

impl App {
    /// Build from the live display mode.
    pub fn new(devices: Devices, clock: Arc<dyn Clock>, config: RemapperConfig) -> Result<Self> {
        let Devices {
            mut display,
            cursor,
            keyboard,
        } = devices;

        let mode = display.get_display_mode()?;
        log::debug!("starting at {} with {}", mode.orientation, mode.extent);

        let state = Arc::new(OrientationState::new(mode.orientation, mode.extent));
        let bridge = OrientationBridge::new(state.clone());
        let rotator = Arc::new(Mutex::new(ScreenRotator::new(display, bridge)));
        let remapper = MouseRemapper::new(cursor, state.clone(), clock.clone(), config);
        let hotkeys = HotkeyMonitor::new(keyboard, rotator.clone(), clock);

        Ok(App {
            state,
            rotator,
            remapper,
            hotkeys,
        })
    }

    /// Exclusive access to the display; the hotkey thread shares it.
    pub fn rotator(&self) -> MutexGuard<'_, ScreenRotator> {
        self.rotator.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_orientation(&self) -> Orientation {
        self.state.orientation()
    }

    pub fn screen_extent(&self) -> Extent {
        self.state.extent()
    }

    pub fn remapping_enabled(&self) -> bool {
        self.remapper.is_enabled()
    }

    pub fn set_remapping(&self, enabled: bool) -> Result<()> {
        self.remapper.set_enabled(enabled)
    }

    pub fn hotkeys_enabled(&self) -> bool {
        self.hotkeys.is_enabled()
    }

    pub fn set_hotkeys(&self, enabled: bool) -> Result<()> {
        self.hotkeys.set_enabled(enabled)
    }

    pub fn screen_info(&self) -> ScreenInfo {
        let display = self.state.snapshot().display;
        ScreenInfo {
            width: display.extent.width,
            height: display.extent.height,
            orientation: display.orientation,
            degrees: display.orientation.to_degrees(),
            label: display.orientation.label(),
            remapping: self.remapping_enabled(),
            hotkeys: self.hotkeys_enabled(),
        }
    }

    /// Stop both background threads.
    pub fn shutdown(&self) {
        self.hotkeys.stop();
        self.remapper.stop();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn app() -> Result<App> {
        App::new(
            Devices::simulated(Extent::new(1280, 720)),
            Arc::new(ManualClock::new()),
            RemapperConfig::default(),
        )
    }

    #[test]
    fn starts_from_live_mode() -> Result<()> {
        let app = app()?;
        assert_eq!(app.current_orientation(), Orientation::Default);
        assert_eq!(app.screen_extent(), Extent::new(1280, 720));
        assert!(!app.remapping_enabled());
        assert!(!app.hotkeys_enabled());
        Ok(())
    }

    #[test]
    fn info_reflects_rotation_and_toggles() -> Result<()> {
        let app = app()?;
        app.rotator().rotate_counterclockwise()?;
        app.set_remapping(true)?;

        let info = app.screen_info();
        assert_eq!(
            info,
            ScreenInfo {
                width: 720,
                height: 1280,
                orientation: Orientation::Clockwise270,
                degrees: 270,
                label: "270° (Counter-clockwise)",
                remapping: true,
                hotkeys: false,
            }
        );

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["orientation"], "Clockwise270");
        assert_eq!(json["degrees"], 270);

        app.shutdown();
        assert!(!app.remapping_enabled());
        Ok(())
    }
}
