use crate::error::Result;
use crate::orientation::Orientation;
use crate::state::DisplayState;
use crate::transform::Extent;

pub mod dummy;

#[cfg(windows)]
pub mod win32;

pub trait DisplayManager: Send {
    /// Read the live orientation and resolution of the target display.
    fn get_display_mode(&mut self) -> Result<DisplayState>;

    /// Switch the target display to `target`, returning the mode it ended
    /// up in. Width and height in the result are post-rotation.
    fn change_orientation(&mut self, target: Orientation) -> Result<DisplayState>;
}

/// Resolution to request for `target`, given the mode the display is in.
///
/// Drivers want width and height swapped by hand when going between
/// landscape and portrait, so go back to the native layout first.
pub fn target_extent(current: DisplayState, target: Orientation) -> Extent {
    let native = if current.orientation.is_portrait() {
        current.extent.swapped()
    } else {
        current.extent
    };

    if target.is_portrait() {
        native.swapped()
    } else {
        native
    }
}
