//! Coordinate mapping between the rotated panel and the user's hand.
//!
//! The cursor lives in the screen's native pixel space, which the driver
//! turns along with the picture. A gesture to the right on the desk must
//! still move the pointer towards the physical right edge, so each
//! movement delta is turned back by the inverse of the visual rotation.

use crate::orientation::Orientation;
use serde::Serialize;

/// Absolute cursor position in screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Movement from `from` to `self`.
    pub fn delta_from(self, from: Point) -> Delta {
        Delta {
            dx: self.x.saturating_sub(from.x),
            dy: self.y.saturating_sub(from.y),
        }
    }

    pub fn offset(self, delta: Delta) -> Point {
        Point {
            x: self.x.saturating_add(delta.dx),
            y: self.y.saturating_add(delta.dy),
        }
    }

    /// Saturate into `[0, width-1] x [0, height-1]`.
    pub fn clamp_to(self, extent: Extent) -> Point {
        Point {
            x: self.x.clamp(0, extent.max_x()),
            y: self.y.clamp(0, extent.max_y()),
        }
    }
}

/// Current (already rotated) screen resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Extent { width, height }
    }

    /// The same panel with its sides exchanged.
    pub fn swapped(self) -> Self {
        Extent {
            width: self.height,
            height: self.width,
        }
    }

    fn max_x(self) -> i32 {
        to_coord(self.width.saturating_sub(1))
    }

    fn max_y(self) -> i32 {
        to_coord(self.height.saturating_sub(1))
    }
}

fn to_coord(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A cursor movement vector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub fn new(dx: i32, dy: i32) -> Self {
        Delta { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Turn a physical delta into the logical delta for `orientation`.
///
/// Total over every input; negation saturates so `i32::MIN` can't overflow.
pub fn logical_delta(orientation: Orientation, physical: Delta) -> Delta {
    let Delta { dx, dy } = physical;
    match orientation {
        Orientation::Default => physical,
        Orientation::Clockwise90 => Delta::new(dy.saturating_neg(), dx),
        Orientation::UpsideDown => Delta::new(dx.saturating_neg(), dy.saturating_neg()),
        Orientation::Clockwise270 => Delta::new(dy, dx.saturating_neg()),
    }
}

/// Where an absolute position on the unrotated panel lands once the
/// panel is shown at `orientation`. `extent` is the native resolution.
pub fn map_point(orientation: Orientation, extent: Extent, point: Point) -> Point {
    let w = to_coord(extent.width);
    let h = to_coord(extent.height);
    match orientation {
        Orientation::Default => point,
        Orientation::Clockwise90 => Point::new(h.saturating_sub(point.y), point.x),
        Orientation::UpsideDown => {
            Point::new(w.saturating_sub(point.x), h.saturating_sub(point.y))
        }
        Orientation::Clockwise270 => Point::new(point.y, w.saturating_sub(point.x)),
    }
}
