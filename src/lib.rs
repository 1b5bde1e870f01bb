pub mod app;
pub mod backends;
pub mod bridge;
pub mod clock;
pub mod config;
pub mod devices;
pub mod error;
pub mod hotkeys;
pub mod orientation;
pub mod remapper;
pub mod rotator;
pub mod state;
pub mod transform;
pub mod worker;
