use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    UI::Input::KeyboardAndMouse::GetAsyncKeyState,
    UI::WindowsAndMessaging::{SendMessageA, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_RBUTTONDOWN, WM_RBUTTONUP},
};

use crate::core::coords::Point;

const MK_LBUTTON: usize = 0x0001;
const MK_RBUTTON: usize = 0x0002;
const VK_ESCAPE: i32 = 0x1B;

/// Pack client coordinates into the lParam of a mouse message.
fn mouse_lparam(point: Point) -> LPARAM {
    LPARAM((((point.y as u32) << 16) | (point.x as u32 & 0xFFFF)) as isize)
}

/// Left click delivered straight to the client via SendMessage.
/// Does not move the physical cursor.
pub fn click_at_position(hwnd: HWND, point: Point) {
    let lparam = mouse_lparam(point);
    unsafe {
        SendMessageA(hwnd, WM_LBUTTONDOWN, WPARAM(MK_LBUTTON), lparam);
        SendMessageA(hwnd, WM_LBUTTONUP, WPARAM(0), lparam);
    }
}

/// Right click delivered straight to the client via SendMessage.
pub fn right_click_at_position(hwnd: HWND, point: Point) {
    let lparam = mouse_lparam(point);
    unsafe {
        SendMessageA(hwnd, WM_RBUTTONDOWN, WPARAM(MK_RBUTTON), lparam);
        SendMessageA(hwnd, WM_RBUTTONUP, WPARAM(0), lparam);
    }
}

/// Check if ESC is currently down (works even when the app doesn't have focus)
pub fn is_escape_key_down() -> bool {
    unsafe { (GetAsyncKeyState(VK_ESCAPE) as u16) & 0x8000 != 0 }
}
