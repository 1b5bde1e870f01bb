//! Dummy display.
//!
//! Keeps the mode in memory. Used with `--simulate` and in tests; it can
//! be told to refuse the next change the way a driver would.

use std::sync::Arc;

use super::{target_extent, DisplayManager};
use crate::devices::dummy::DummyCursor;
use crate::error::{Error, Result};
use crate::orientation::Orientation;
use crate::state::DisplayState;
use crate::transform::Extent;

pub struct DummyDisplay {
    mode: DisplayState,
    cursor: Option<Arc<DummyCursor>>,
    refuse_next: Option<i32>,
    changes: usize,
}

impl DummyDisplay {
    pub fn new(orientation: Orientation, extent: Extent) -> Self {
        DummyDisplay {
            mode: DisplayState {
                orientation,
                extent,
            },
            cursor: None,
            refuse_next: None,
            changes: 0,
        }
    }

    /// Keep `cursor` confined to the screen across mode changes.
    pub fn with_cursor(mut self, cursor: Arc<DummyCursor>) -> Self {
        cursor.set_extent(self.mode.extent);
        self.cursor = Some(cursor);
        self
    }

    /// Fail the next change with the given `DISP_CHANGE_*` status.
    pub fn refuse_next(&mut self, code: i32) {
        self.refuse_next = Some(code);
    }

    pub fn changes(&self) -> usize {
        self.changes
    }
}

impl DisplayManager for DummyDisplay {
    fn get_display_mode(&mut self) -> Result<DisplayState> {
        Ok(self.mode)
    }

    fn change_orientation(&mut self, target: Orientation) -> Result<DisplayState> {
        if let Some(code) = self.refuse_next.take() {
            return Err(Error::display_change(code));
        }

        self.mode = DisplayState {
            orientation: target,
            extent: target_extent(self.mode, target),
        };
        self.changes += 1;
        if let Some(cursor) = &self.cursor {
            cursor.set_extent(self.mode.extent);
        }
        log::debug!(
            "dummy display now {} at {}",
            self.mode.orientation,
            self.mode.extent
        );
        Ok(self.mode)
    }
}
