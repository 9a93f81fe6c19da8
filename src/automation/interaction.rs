use std::thread;
use std::time::Duration;

use rustautogui::RustAutoGui;

use crate::core::coords::Point;
use crate::settings::MouseButton;

/// Cursor travel time for eased moves, matching the original scripts.
const EASED_MOVE_SECS: f32 = 1.5;

/// Delay for a specified number of milliseconds
pub fn delay_ms(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Move the physical cursor to a screen point, instantly or eased.
pub fn move_mouse_to(gui: &mut RustAutoGui, point: Point, eased: bool) -> Result<(), String> {
    let travel = if eased { EASED_MOVE_SECS } else { 0.0 };
    gui.move_mouse_to_pos(point.x as u32, point.y as u32, travel)
        .map_err(|e| format!("Failed to move mouse to {}: {}", point, e))
}

/// Move to a screen point and physically click.
/// One retry with a short pause; the client sometimes swallows the first
/// event right after a focus change.
pub fn click_at_screen(gui: &mut RustAutoGui, point: Point, button: MouseButton) -> bool {
    for attempt in 0..2 {
        if move_mouse_to(gui, point, false).is_err() {
            if attempt == 0 {
                delay_ms(50);
                continue;
            }
            return false;
        }

        // Short sleep to stabilize cursor
        delay_ms(20);

        let clicked = match button {
            MouseButton::Left => gui.left_click(),
            MouseButton::Right => gui.right_click(),
        };
        match clicked {
            Ok(()) => return true,
            Err(_) if attempt == 0 => delay_ms(50),
            Err(_) => return false,
        }
    }
    false
}
