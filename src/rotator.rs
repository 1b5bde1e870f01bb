use crate::backends::DisplayManager;
use crate::bridge::OrientationBridge;
use crate::error::Result;
use crate::orientation::{Orientation, Rotation};
use crate::state::DisplayState;

/// Drives the display and reports every successful change to the bridge.
pub struct ScreenRotator {
    display: Box<dyn DisplayManager>,
    bridge: OrientationBridge,
}

impl ScreenRotator {
    pub fn new(display: Box<dyn DisplayManager>, bridge: OrientationBridge) -> Self {
        ScreenRotator { display, bridge }
    }

    pub fn bridge(&self) -> &OrientationBridge {
        &self.bridge
    }

    pub fn rotate_to(&mut self, target: Orientation) -> Result<DisplayState> {
        self.bridge.begin_change();
        let mode = match self.display.change_orientation(target) {
            Ok(mode) => mode,
            Err(err) => {
                self.bridge.cancel_change();
                log::error!("failed to rotate screen to {}: {}", target, err);
                return Err(err);
            }
        };

        self.bridge.notify_orientation_changed(
            mode.orientation,
            mode.extent.width,
            mode.extent.height,
        );
        log::info!(
            "screen rotated to {}, resolution {}",
            mode.orientation,
            mode.extent
        );
        Ok(mode)
    }

    pub fn rotate_by(&mut self, rotation: Rotation) -> Result<DisplayState> {
        self.rotate_to(self.bridge.current_orientation() + rotation)
    }

    pub fn rotate_clockwise(&mut self) -> Result<DisplayState> {
        self.rotate_by(Rotation::Clockwise90)
    }

    pub fn rotate_counterclockwise(&mut self) -> Result<DisplayState> {
        self.rotate_by(Rotation::Clockwise270)
    }

    pub fn rotate_to_default(&mut self) -> Result<DisplayState> {
        self.rotate_to(Orientation::Default)
    }

    /// Re-read the live mode, e.g. after something else changed it.
    pub fn refresh(&mut self) -> Result<DisplayState> {
        let mode = self.display.get_display_mode()?;
        self.bridge.notify_orientation_changed(
            mode.orientation,
            mode.extent.width,
            mode.extent.height,
        );
        Ok(mode)
    }
}
