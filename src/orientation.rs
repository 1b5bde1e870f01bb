//! # Rotation
//!
//! We differentiate between absolute orientations and relative rotations
//! so that a "turn clockwise" request can't be mistaken for "go to 90°".

use crate::error::{Error, Result};
use serde::Serialize;

/// A relative quarter-turn step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rotation {
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

/// The orientation a display is currently driven in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Orientation {
    /// Zero degree rotation, the panel's factory layout.
    Default,
    /// 90 degree clockwise rotation; `DMDO_90`.
    Clockwise90,
    /// 180 degree rotation; the panel is upside down.
    UpsideDown,
    /// 270 degree clockwise rotation, i.e. 90 counter-clockwise; `DMDO_270`.
    Clockwise270,
}

impl Rotation {
    /// Convert to clockwise degrees.
    pub fn to_degrees(&self) -> isize {
        match *self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Clockwise180 => 180,
            Self::Clockwise270 => 270,
        }
    }

    /// Attempt conversion from degrees to rotation.
    /// Positive value is clockwise, negative is counter clockwise.
    pub fn from_degrees(cw_degrees: isize) -> Result<Self> {
        match cw_degrees % 360 {
            0 => Ok(Self::None),
            90 | -270 => Ok(Self::Clockwise90),
            180 | -180 => Ok(Self::Clockwise180),
            270 | -90 => Ok(Self::Clockwise270),
            other => Err(Error::InvalidDegrees(other)),
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Clockwise90 => Self::Clockwise270,
            Self::Clockwise180 => Self::Clockwise180,
            Self::Clockwise270 => Self::Clockwise90,
        }
    }
}

impl std::ops::Add<Rotation> for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Self::Output {
        Rotation::from_degrees(self.to_degrees() + rhs.to_degrees())
            .expect("adding 90 degree values should never fail")
    }
}

impl From<Orientation> for Rotation {
    fn from(abs: Orientation) -> Self {
        match abs {
            Orientation::Default => Rotation::None,
            Orientation::Clockwise90 => Rotation::Clockwise90,
            Orientation::UpsideDown => Rotation::Clockwise180,
            Orientation::Clockwise270 => Rotation::Clockwise270,
        }
    }
}

impl From<Rotation> for Orientation {
    fn from(rel: Rotation) -> Self {
        match rel {
            Rotation::None => Orientation::Default,
            Rotation::Clockwise90 => Orientation::Clockwise90,
            Rotation::Clockwise180 => Orientation::UpsideDown,
            Rotation::Clockwise270 => Orientation::Clockwise270,
        }
    }
}

impl std::ops::Add<Rotation> for Orientation {
    type Output = Orientation;

    fn add(self, rhs: Rotation) -> Self::Output {
        Orientation::from(Rotation::from(self) + rhs)
    }
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Default,
        Orientation::Clockwise90,
        Orientation::UpsideDown,
        Orientation::Clockwise270,
    ];

    pub fn from_degrees(cw_degrees: isize) -> Result<Self> {
        Rotation::from_degrees(cw_degrees).map(Orientation::from)
    }

    pub fn to_degrees(&self) -> isize {
        Rotation::from(*self).to_degrees()
    }

    /// Win32 `DMDO_*` value: 0 through 3 in quarter turns.
    pub fn code(&self) -> u32 {
        (self.to_degrees() / 90) as u32
    }

    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Orientation::Default),
            1 => Ok(Orientation::Clockwise90),
            2 => Ok(Orientation::UpsideDown),
            3 => Ok(Orientation::Clockwise270),
            other => Err(Error::InvalidOrientationCode(other)),
        }
    }

    /// Like [`Orientation::from_code`], but a code the driver made up
    /// degrades to the unrotated layout so the mouse keeps working.
    pub fn from_code_or_default(code: u32) -> Self {
        Self::from_code(code).unwrap_or_else(|err| {
            log::warn!("{}, treating display as unrotated", err);
            Orientation::Default
        })
    }

    /// The orientation which, applied after this one, gets back to default.
    pub fn inverse(&self) -> Self {
        Orientation::from(Rotation::from(*self).inverse())
    }

    /// Whether width and height are swapped relative to the native mode.
    pub fn is_portrait(&self) -> bool {
        matches!(self, Orientation::Clockwise90 | Orientation::Clockwise270)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Default => "0° (Default)",
            Orientation::Clockwise90 => "90° (Clockwise)",
            Orientation::UpsideDown => "180° (Upside Down)",
            Orientation::Clockwise270 => "270° (Counter-clockwise)",
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Default
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_to_degrees() -> Result<()> {
        assert_eq!(Rotation::None.to_degrees(), 0);
        assert_eq!(Rotation::Clockwise90.to_degrees(), 90);
        assert_eq!(Rotation::Clockwise180.to_degrees(), 180);
        assert_eq!(Rotation::Clockwise270.to_degrees(), 270);
        Ok(())
    }

    #[test]
    fn degrees_to_rotation() -> Result<()> {
        // Clockwise degrees.
        assert_eq!(Rotation::from_degrees(0)?, Rotation::None);
        assert_eq!(Rotation::from_degrees(90)?, Rotation::Clockwise90);
        assert_eq!(Rotation::from_degrees(180)?, Rotation::Clockwise180);
        assert_eq!(Rotation::from_degrees(270)?, Rotation::Clockwise270);
        assert_eq!(Rotation::from_degrees(360)?, Rotation::None);

        // Counter-clockwise degrees.
        assert_eq!(Rotation::from_degrees(-90)?, Rotation::Clockwise270);
        assert_eq!(Rotation::from_degrees(-180)?, Rotation::Clockwise180);
        assert_eq!(Rotation::from_degrees(-270)?, Rotation::Clockwise90);

        // Test the modulo.
        assert_eq!(Rotation::from_degrees(720)?, Rotation::None);
        assert_eq!(Rotation::from_degrees(810)?, Rotation::Clockwise90);
        assert_eq!(Rotation::from_degrees(-810)?, Rotation::Clockwise270);

        assert!(matches!(
            Rotation::from_degrees(42),
            Err(Error::InvalidDegrees(42))
        ));

        Ok(())
    }

    #[test]
    fn orientation_plus_rotation() {
        assert_eq!(
            Orientation::Default + Rotation::Clockwise90,
            Orientation::Clockwise90
        );
        assert_eq!(
            Orientation::Clockwise90 + Rotation::Clockwise90,
            Orientation::UpsideDown
        );
        assert_eq!(
            Orientation::Clockwise270 + Rotation::Clockwise90,
            Orientation::Default
        );
        assert_eq!(
            Orientation::Default + Rotation::Clockwise270,
            Orientation::Clockwise270
        );
        assert_eq!(
            Orientation::UpsideDown + Rotation::Clockwise180,
            Orientation::Default
        );
    }

    #[test]
    fn win32_codes() -> Result<()> {
        for orientation in Orientation::ALL {
            assert_eq!(Orientation::from_code(orientation.code())?, orientation);
        }
        assert_eq!(Orientation::Clockwise270.code(), 3);
        assert!(Orientation::from_code(4).is_err());
        assert_eq!(Orientation::from_code_or_default(9), Orientation::Default);
        Ok(())
    }

    #[test]
    fn inverse_returns_to_default() {
        for orientation in Orientation::ALL {
            assert_eq!(
                orientation + Rotation::from(orientation.inverse()),
                Orientation::Default
            );
        }
        assert!(Orientation::Clockwise90.is_portrait());
        assert!(!Orientation::UpsideDown.is_portrait());
    }
}
