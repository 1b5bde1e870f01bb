//! Error types for screenturn
//!
//! Nothing in the remapping core is fatal; these mostly travel out of
//! the display backends and the command line parsing.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid degree of rotation, multiples of 90 degrees only, got {0}")]
    InvalidDegrees(isize),

    #[error("Not a number of degrees: {0:?}")]
    NotDegrees(String),

    #[error("Unknown display orientation code {0}")]
    InvalidOrientationCode(u32),

    #[error("Invalid screen extent {0:?}, expected WIDTHxHEIGHT")]
    InvalidExtent(String),

    #[error("Display mode change failed with {code}: {reason}")]
    DisplayChange { code: i32, reason: &'static str },

    #[error("Unable to read the current display mode: {0}")]
    DisplayQuery(String),

    #[error("Cursor access failed: {0}")]
    Cursor(String),

    #[error("Not supported on this platform: {0}")]
    Unsupported(String),

    #[error("Underlying I/O error")]
    IOError(#[from] std::io::Error),
}

impl Error {
    /// Build a `DisplayChange` error from a `DISP_CHANGE_*` status.
    pub fn display_change(code: i32) -> Self {
        let reason = match code {
            -1 => "restart required",
            -2 => "invalid display mode",
            -3 => "display driver failed",
            -4 => "invalid parameter",
            -5 => "invalid flags",
            _ => "unknown error",
        };
        Error::DisplayChange { code, reason }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_change_reasons() {
        assert!(matches!(
            Error::display_change(-2),
            Error::DisplayChange {
                code: -2,
                reason: "invalid display mode"
            }
        ));
        assert!(matches!(
            Error::display_change(7),
            Error::DisplayChange {
                reason: "unknown error",
                ..
            }
        ));
        assert_eq!(
            Error::display_change(-1).to_string(),
            "Display mode change failed with -1: restart required"
        );
    }
}
