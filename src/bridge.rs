use std::sync::Arc;

use crate::orientation::Orientation;
use crate::state::{DisplayState, OrientationState};
use crate::transform::Extent;

/// The single path by which a finished display change reaches the remapper.
///
/// Replacing the state starts a new generation; the remapper sees that on
/// its next cycle and takes a fresh baseline instead of computing a delta
/// across the two coordinate systems.
#[derive(Clone, Debug)]
pub struct OrientationBridge {
    state: Arc<OrientationState>,
}

impl OrientationBridge {
    pub fn new(state: Arc<OrientationState>) -> Self {
        OrientationBridge { state }
    }

    /// Call right before asking the display for a new mode. The remapper
    /// stops transforming until the change is reported or cancelled.
    pub fn begin_change(&self) {
        self.state.begin_change();
    }

    pub fn cancel_change(&self) {
        self.state.cancel_change();
    }

    /// Must be called once after every successful mode switch, with the
    /// post-rotation width and height.
    pub fn notify_orientation_changed(&self, orientation: Orientation, width: u32, height: u32) {
        let generation = self.state.replace(DisplayState {
            orientation,
            extent: Extent::new(width, height),
        });
        log::debug!(
            "orientation now {} at {}x{} (generation {})",
            orientation,
            width,
            height,
            generation
        );
    }

    pub fn current_orientation(&self) -> Orientation {
        self.state.orientation()
    }

    pub fn screen_extent(&self) -> Extent {
        self.state.extent()
    }

    pub fn state(&self) -> &Arc<OrientationState> {
        &self.state
    }
}
