//! Win32 cursor and keyboard.

use windows_sys::Win32::Foundation::POINT;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, VIRTUAL_KEY, VK_CONTROL, VK_DOWN, VK_LEFT, VK_MENU, VK_RIGHT, VK_UP,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

use super::{Cursor, Key, Keyboard};
use crate::error::{Error, Result};
use crate::transform::Point;

pub struct Win32Cursor;

impl Cursor for Win32Cursor {
    fn position(&self) -> Result<Point> {
        let mut point = POINT { x: 0, y: 0 };

        // SAFETY: `GetCursorPos` only writes through a valid `POINT` pointer.
        let status = unsafe { GetCursorPos(&mut point) };

        if status == 0 {
            return Err(Error::Cursor(format!(
                "GetCursorPos: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok(Point::new(point.x, point.y))
    }

    fn set_position(&self, point: Point) -> Result<()> {
        // SAFETY: plain value arguments.
        let status = unsafe { SetCursorPos(point.x, point.y) };

        if status == 0 {
            return Err(Error::Cursor(format!(
                "SetCursorPos: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok(())
    }
}

pub struct Win32Keyboard;

fn virtual_key(key: Key) -> VIRTUAL_KEY {
    match key {
        Key::Control => VK_CONTROL,
        Key::Alt => VK_MENU,
        Key::Up => VK_UP,
        Key::Down => VK_DOWN,
        Key::Left => VK_LEFT,
        Key::Right => VK_RIGHT,
    }
}

impl Keyboard for Win32Keyboard {
    fn is_pressed(&self, key: Key) -> bool {
        // SAFETY: `GetAsyncKeyState` accepts any virtual key code.
        let state = unsafe { GetAsyncKeyState(virtual_key(key) as i32) };

        // High bit set means the key is down.
        (state as u16) & 0x8000 != 0
    }
}
