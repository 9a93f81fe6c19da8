use log::warn;
use rustautogui::RustAutoGui;
use windows::Win32::Foundation::HWND;

use crate::core::coords::{PixelRect, Point};
use crate::core::screen_capture::capture_client_region;

/// Search the screen for a stored template.
/// Returns the center of the best match at or above `min_confidence`.
pub fn find_template(gui: &mut RustAutoGui, alias: &str, min_confidence: f32) -> Option<Point> {
    match gui.find_stored_image_on_screen(min_confidence, alias) {
        Ok(Some(matches)) => matches
            .first()
            .map(|(x, y, _score)| Point::new(*x as i32, *y as i32)),
        Ok(None) => None,
        Err(e) => {
            warn!("Template search for '{}' failed: {}", alias, e);
            None
        }
    }
}

/// Per-channel closeness test used by the color probe.
pub fn color_within_threshold(color: (u8, u8, u8), target: (u8, u8, u8), threshold: u8) -> bool {
    color.0.abs_diff(target.0) <= threshold
        && color.1.abs_diff(target.1) <= threshold
        && color.2.abs_diff(target.2) <= threshold
}

/// Scan a client-area region for the first pixel within `threshold` of
/// `target`, sampling every `step` pixels. Returns the client-relative hit.
pub fn find_pixel_by_color(
    hwnd: HWND,
    region: PixelRect,
    target: (u8, u8, u8),
    threshold: u8,
    step: i32,
) -> Result<Option<Point>, String> {
    if step <= 0 {
        return Err(format!("Scan step must be positive, got {}", step));
    }

    let capture = capture_client_region(hwnd, region)?;
    let (region_x, region_y, region_w, region_h) = region;

    let mut y = 0;
    while y < region_h {
        let mut x = 0;
        while x < region_w {
            let pixel = capture.get_pixel(x as u32, y as u32);
            if color_within_threshold((pixel[0], pixel[1], pixel[2]), target, threshold) {
                return Ok(Some(Point::new(region_x + x, region_y + y)));
            }
            x += step;
        }
        y += step;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_color_matches() {
        assert!(color_within_threshold((120, 40, 200), (120, 40, 200), 0));
    }

    #[test]
    fn test_each_channel_checked() {
        let target = (100, 100, 100);
        assert!(color_within_threshold((130, 100, 100), target, 30));
        assert!(!color_within_threshold((131, 100, 100), target, 30));
        assert!(!color_within_threshold((100, 131, 100), target, 30));
        assert!(!color_within_threshold((100, 100, 131), target, 30));
    }

    #[test]
    fn test_threshold_is_symmetric() {
        let target = (100, 100, 100);
        assert!(color_within_threshold((70, 70, 70), target, 30));
        assert!(color_within_threshold((130, 130, 130), target, 30));
        assert!(!color_within_threshold((69, 100, 100), target, 30));
    }
}
