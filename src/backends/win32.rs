//! Primary display through the GDI mode APIs.

use std::mem::{size_of, zeroed};
use std::ptr::null;

use windows_sys::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsW, EnumDisplaySettingsW, CDS_UPDATEREGISTRY, DEVMODEW,
    DISP_CHANGE_SUCCESSFUL, DM_DISPLAYORIENTATION, DM_PELSHEIGHT, DM_PELSWIDTH,
    ENUM_CURRENT_SETTINGS,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use super::{target_extent, DisplayManager};
use crate::error::{Error, Result};
use crate::orientation::Orientation;
use crate::state::DisplayState;
use crate::transform::Extent;

pub struct Win32Display;

impl Win32Display {
    fn current_settings() -> Result<DEVMODEW> {
        let mut display_mode = DEVMODEW {
            dmSize: size_of::<DEVMODEW>() as _,

            // SAFETY: structure can be zeroed because it will be filled
            // by `EnumDisplaySettingsW`.
            ..unsafe { zeroed() }
        };

        // SAFETY: a null device name selects the primary display and
        // `display_mode` is a valid structure with `dmSize` set.
        let status =
            unsafe { EnumDisplaySettingsW(null(), ENUM_CURRENT_SETTINGS, &mut display_mode) };

        if status == 0 {
            return Err(Error::DisplayQuery(format!(
                "EnumDisplaySettingsW: {}",
                std::io::Error::last_os_error()
            )));
        }

        Ok(display_mode)
    }

    /// Resolution as the desktop sees it right now.
    fn screen_extent() -> Extent {
        // SAFETY: plain value argument.
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        Extent::new(width.max(0) as u32, height.max(0) as u32)
    }
}

impl DisplayManager for Win32Display {
    fn get_display_mode(&mut self) -> Result<DisplayState> {
        let display_mode = Self::current_settings()?;

        // SAFETY: the display member of the union is what
        // `EnumDisplaySettingsW` fills for a monitor.
        let code = unsafe { display_mode.Anonymous1.Anonymous2.dmDisplayOrientation };

        Ok(DisplayState {
            orientation: Orientation::from_code_or_default(code),
            extent: Self::screen_extent(),
        })
    }

    fn change_orientation(&mut self, target: Orientation) -> Result<DisplayState> {
        let mut display_mode = Self::current_settings()?;

        // SAFETY: see `get_display_mode`.
        let code = unsafe { display_mode.Anonymous1.Anonymous2.dmDisplayOrientation };
        let current = DisplayState {
            orientation: Orientation::from_code_or_default(code),
            extent: Extent::new(display_mode.dmPelsWidth, display_mode.dmPelsHeight),
        };
        let extent = target_extent(current, target);

        display_mode.Anonymous1.Anonymous2.dmDisplayOrientation = target.code();
        display_mode.dmPelsWidth = extent.width;
        display_mode.dmPelsHeight = extent.height;
        display_mode.dmFields = DM_DISPLAYORIENTATION | DM_PELSWIDTH | DM_PELSHEIGHT;

        // SAFETY: `display_mode` is a valid, fully initialised structure.
        let status = unsafe { ChangeDisplaySettingsW(&display_mode, CDS_UPDATEREGISTRY) };

        if status != DISP_CHANGE_SUCCESSFUL {
            log::warn!("attempted {} @ {}", extent, target);
            return Err(Error::display_change(status));
        }

        Ok(DisplayState {
            orientation: target,
            extent: Self::screen_extent(),
        })
    }
}
