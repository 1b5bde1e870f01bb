//! Dummy devices.
//!
//! In-memory cursor and keyboard for `--simulate` and for tests.
//! The cursor clamps to its screen like the real one does and records
//! every write the remapper makes.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Cursor, Key, Keyboard};
use crate::error::{Error, Result};
use crate::transform::{Delta, Extent, Point};

#[derive(Default)]
struct CursorState {
    position: Point,
    extent: Extent,
    writes: Vec<Point>,
    failing_reads: usize,
    failing_writes: usize,
}

pub struct DummyCursor {
    state: Mutex<CursorState>,
}

impl DummyCursor {
    pub fn new(extent: Extent, position: Point) -> Self {
        DummyCursor {
            state: Mutex::new(CursorState {
                position: position.clamp_to(extent),
                extent,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CursorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate the user pushing the mouse.
    pub fn move_by(&self, delta: Delta) {
        let mut state = self.lock();
        state.position = state.position.offset(delta).clamp_to(state.extent);
    }

    /// Put the cursor somewhere without it counting as a remapper write.
    pub fn place(&self, point: Point) {
        let mut state = self.lock();
        state.position = point.clamp_to(state.extent);
    }

    pub fn set_extent(&self, extent: Extent) {
        let mut state = self.lock();
        state.extent = extent;
        state.position = state.position.clamp_to(extent);
    }

    pub fn current(&self) -> Point {
        self.lock().position
    }

    pub fn writes(&self) -> Vec<Point> {
        self.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes.len()
    }

    pub fn fail_reads(&self, count: usize) {
        self.lock().failing_reads = count;
    }

    pub fn fail_writes(&self, count: usize) {
        self.lock().failing_writes = count;
    }
}

impl Cursor for DummyCursor {
    fn position(&self) -> Result<Point> {
        let mut state = self.lock();
        if state.failing_reads > 0 {
            state.failing_reads -= 1;
            return Err(Error::Cursor("simulated read failure".into()));
        }
        Ok(state.position)
    }

    fn set_position(&self, point: Point) -> Result<()> {
        let mut state = self.lock();
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(Error::Cursor("simulated write failure".into()));
        }
        state.position = point.clamp_to(state.extent);
        state.writes.push(point);
        Ok(())
    }
}

#[derive(Default)]
pub struct DummyKeyboard {
    pressed: Mutex<HashSet<Key>>,
}

impl DummyKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        self.pressed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key);
    }

    pub fn release(&self, key: Key) {
        self.pressed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
    }

    pub fn release_all(&self) {
        self.pressed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Keyboard for DummyKeyboard {
    fn is_pressed(&self, key: Key) -> bool {
        self.pressed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_on_screen() -> Result<()> {
        let cursor = DummyCursor::new(Extent::new(100, 50), Point::new(10, 10));
        cursor.move_by(Delta::new(500, -500));
        assert_eq!(cursor.position()?, Point::new(99, 0));

        cursor.set_position(Point::new(20, 20))?;
        assert_eq!(cursor.writes(), vec![Point::new(20, 20)]);

        cursor.set_extent(Extent::new(10, 10));
        assert_eq!(cursor.current(), Point::new(9, 9));
        Ok(())
    }

    #[test]
    fn injected_failures_are_one_shot() {
        let cursor = DummyCursor::new(Extent::new(100, 50), Point::default());
        cursor.fail_reads(1);
        assert!(cursor.position().is_err());
        assert!(cursor.position().is_ok());

        cursor.fail_writes(1);
        assert!(cursor.set_position(Point::new(1, 1)).is_err());
        assert_eq!(cursor.write_count(), 0);
    }

    #[test]
    fn keyboard_tracks_presses() {
        let keyboard = DummyKeyboard::new();
        keyboard.press(Key::Control);
        assert!(keyboard.is_pressed(Key::Control));
        assert!(!keyboard.is_pressed(Key::Alt));
        keyboard.release(Key::Control);
        assert!(!keyboard.is_pressed(Key::Control));
    }
}
