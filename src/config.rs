//! Command line configuration.

use std::time::Duration;

use clap::Parser;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::orientation::Orientation;
use crate::remapper::RemapperConfig;
use crate::transform::Extent;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Rotate the display and keep the mouse moving the way your hand does"
)]
pub struct Args {
    /// Rotate once to the given clockwise degrees (negative for
    /// counter-clockwise) and exit
    #[clap(long, value_name = "DEGREES", allow_hyphen_values = true, value_parser = parse_orientation)]
    pub rotate: Option<Orientation>,

    /// Print the current screen information and exit
    #[clap(long)]
    pub info: bool,

    /// Print the screen information as JSON
    #[clap(long, requires = "info")]
    pub json: bool,

    /// Enable mouse remapping on startup
    #[clap(long)]
    pub remap: bool,

    /// Enable Ctrl+Alt+Arrow rotation hotkeys on startup
    #[clap(long)]
    pub hotkeys: bool,

    /// Pause between remapper cycles while the display is rotated
    #[clap(long, value_name = "MICROS", default_value_t = 1000)]
    pub poll_interval_us: u64,

    /// Pause between remapper cycles while the display is unrotated
    #[clap(long, value_name = "MILLIS", default_value_t = 10)]
    pub idle_interval_ms: u64,

    /// Use an in-memory display and cursor of the given size instead of
    /// the real ones
    #[clap(long, value_name = "WIDTHxHEIGHT", value_parser = parse_extent)]
    pub simulate: Option<Extent>,

    /// More output per occurrence
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn remapper_config(&self) -> RemapperConfig {
        RemapperConfig {
            poll_interval: Duration::from_micros(self.poll_interval_us),
            idle_interval: Duration::from_millis(self.idle_interval_ms),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

pub fn parse_orientation(arg: &str) -> Result<Orientation> {
    let degrees = arg
        .trim()
        .trim_end_matches('°')
        .parse::<isize>()
        .map_err(|_| Error::NotDegrees(arg.to_owned()))?;
    Orientation::from_degrees(degrees)
}

pub fn parse_extent(arg: &str) -> Result<Extent> {
    lazy_static! {
        static ref EXTENT: Regex = Regex::new(r"^\s*(\d{1,5})\s*[xX×]\s*(\d{1,5})\s*$").unwrap();
    }

    let captures = EXTENT
        .captures(arg)
        .ok_or_else(|| Error::InvalidExtent(arg.to_owned()))?;
    let width = captures[1]
        .parse::<u32>()
        .map_err(|_| Error::InvalidExtent(arg.to_owned()))?;
    let height = captures[2]
        .parse::<u32>()
        .map_err(|_| Error::InvalidExtent(arg.to_owned()))?;

    if width == 0 || height == 0 {
        return Err(Error::InvalidExtent(arg.to_owned()));
    }
    Ok(Extent::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents() -> Result<()> {
        assert_eq!(parse_extent("1920x1080")?, Extent::new(1920, 1080));
        assert_eq!(parse_extent(" 800 X 600 ")?, Extent::new(800, 600));
        assert!(parse_extent("1920").is_err());
        assert!(parse_extent("0x600").is_err());
        assert!(parse_extent("-5x600").is_err());
        Ok(())
    }

    #[test]
    fn orientations() -> Result<()> {
        assert_eq!(parse_orientation("90")?, Orientation::Clockwise90);
        assert_eq!(parse_orientation("-90")?, Orientation::Clockwise270);
        assert_eq!(parse_orientation("180°")?, Orientation::UpsideDown);
        assert!(parse_orientation("45").is_err());
        assert!(matches!(
            parse_orientation("left"),
            Err(Error::NotDegrees(_))
        ));
        Ok(())
    }

    #[test]
    fn command_line() {
        let args = Args::parse_from([
            "screenturn",
            "--remap",
            "--simulate",
            "1024x768",
            "--poll-interval-us",
            "250",
            "-vv",
        ]);
        assert!(args.remap);
        assert!(!args.hotkeys);
        assert_eq!(args.simulate, Some(Extent::new(1024, 768)));
        assert_eq!(
            args.remapper_config().poll_interval,
            Duration::from_micros(250)
        );
        assert_eq!(args.remapper_config().idle_interval, Duration::from_millis(10));
        assert_eq!(args.log_level(), log::LevelFilter::Trace);

        let args = Args::parse_from(["screenturn", "--rotate", "-90"]);
        assert_eq!(args.rotate, Some(Orientation::Clockwise270));

        assert!(Args::try_parse_from(["screenturn", "--json"]).is_err());
    }
}
