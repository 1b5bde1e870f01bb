//! Device traits.
//!
//! We care about two input devices:
//!  - the absolute cursor position, which the remapper reads and rewrites
//!  - the keyboard, polled for the rotation hotkeys
//!
//! Both are process-global on the platform, so implementations are
//! shared between threads behind an `Arc`.

pub mod dummy;

#[cfg(windows)]
pub mod win32;

use crate::error::Result;
use crate::transform::Point;

pub trait Cursor: Send + Sync + 'static {
    fn position(&self) -> Result<Point>;
    fn set_position(&self, point: Point) -> Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Control,
    Alt,
    Up,
    Down,
    Left,
    Right,
}

pub trait Keyboard: Send + Sync + 'static {
    /// Whether `key` is held down right now.
    fn is_pressed(&self, key: Key) -> bool;
}
