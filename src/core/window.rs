use windows::Win32::{
    Foundation::{BOOL, HWND, LPARAM, POINT, RECT},
    Graphics::Gdi::{ClientToScreen, GetDC, GetPixel, ReleaseDC, ScreenToClient, CLR_INVALID},
    UI::WindowsAndMessaging::{
        EnumWindows, GetClientRect, GetCursorPos, GetWindowRect, GetWindowTextW, IsWindow,
        IsWindowVisible, SetForegroundWindow, ShowWindow, SW_MAXIMIZE,
    },
};

use crate::core::coords::{PixelRect, Point};

/// Title prefix shared by all Luna game client windows.
const LUNA_TITLE_PREFIX: &str = "Luna - ";

struct EnumState {
    found: Option<(HWND, String)>,
}

extern "system" fn find_luna_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    unsafe {
        if !IsWindowVisible(hwnd).as_bool() {
            return true.into();
        }

        let mut buffer = [0u16; 512];
        let len = GetWindowTextW(hwnd, &mut buffer);
        if len > 0 {
            let title = String::from_utf16_lossy(&buffer[..len as usize]);
            if title.starts_with(LUNA_TITLE_PREFIX) {
                let state = &mut *(lparam.0 as *mut EnumState);
                state.found = Some((hwnd, title));
                return false.into();
            }
        }

        true.into()
    }
}

/// Find the first visible Luna client by its window title
pub fn find_luna_window() -> Option<(HWND, String)> {
    let mut state = EnumState { found: None };
    unsafe {
        // EnumWindows reports an error when the callback stops it early,
        // which is exactly what a hit does
        let _ = EnumWindows(
            Some(find_luna_proc),
            LPARAM(&mut state as *mut EnumState as isize),
        );
    }
    state.found
}

/// Bring the client to the foreground and maximize it
pub fn activate_and_maximize(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_MAXIMIZE);
        let _ = SetForegroundWindow(hwnd);
    }
}

/// Check if window handle is valid
pub fn is_window_valid(hwnd: HWND) -> bool {
    unsafe { IsWindow(hwnd).as_bool() }
}

/// Outer window rectangle as (left, top, width, height)
pub fn get_window_rect(hwnd: HWND) -> Option<PixelRect> {
    unsafe {
        let mut rect = RECT::default();
        if GetWindowRect(hwnd, &mut rect).is_ok() {
            Some((
                rect.left,
                rect.top,
                rect.right - rect.left,
                rect.bottom - rect.top,
            ))
        } else {
            None
        }
    }
}

/// Client-area size in pixels
pub fn get_client_size(hwnd: HWND) -> Option<(i32, i32)> {
    unsafe {
        let mut rect = RECT::default();
        if GetClientRect(hwnd, &mut rect).is_ok() {
            Some((rect.right - rect.left, rect.bottom - rect.top))
        } else {
            None
        }
    }
}

/// Convert client-relative coordinates to screen coordinates
pub fn client_to_screen_coords(hwnd: HWND, point: Point) -> Option<Point> {
    unsafe {
        let mut raw = POINT {
            x: point.x,
            y: point.y,
        };
        if ClientToScreen(hwnd, &mut raw).as_bool() {
            Some(Point::new(raw.x, raw.y))
        } else {
            None
        }
    }
}

/// Convert screen coordinates to client-relative coordinates
pub fn screen_to_client_coords(hwnd: HWND, point: Point) -> Option<Point> {
    unsafe {
        let mut raw = POINT {
            x: point.x,
            y: point.y,
        };
        if ScreenToClient(hwnd, &mut raw).as_bool() {
            Some(Point::new(raw.x, raw.y))
        } else {
            None
        }
    }
}

/// Current cursor position in screen coordinates
pub fn get_cursor_pos() -> Option<Point> {
    unsafe {
        let mut raw = POINT::default();
        if GetCursorPos(&mut raw).is_ok() {
            Some(Point::new(raw.x, raw.y))
        } else {
            None
        }
    }
}

/// Color of the screen pixel at the given coordinates
pub fn get_pixel_color(point: Point) -> Option<(u8, u8, u8)> {
    unsafe {
        let hdc = GetDC(HWND(0));
        if hdc.is_invalid() {
            return None;
        }
        let color = GetPixel(hdc, point.x, point.y);
        let _ = ReleaseDC(HWND(0), hdc);
        if color.0 == CLR_INVALID {
            return None;
        }
        // COLORREF is 0x00BBGGRR
        let value = color.0;
        Some((
            (value & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            ((value >> 16) & 0xFF) as u8,
        ))
    }
}
