use rustautogui::{MatchMode, RustAutoGui};
use windows::Win32::Foundation::HWND;

use crate::core::coords::{PixelRect, Point};
use crate::core::window::{client_to_screen_coords, get_window_rect};

/// Bundles the vision/input backend with the connected client window.
pub struct BotContext {
    pub gui: RustAutoGui,
    pub hwnd: HWND,
    pub window_rect: PixelRect,
}

impl BotContext {
    pub fn new(hwnd: HWND) -> Result<Self, String> {
        let gui = RustAutoGui::new(false)
            .map_err(|e| format!("Failed to initialize rustautogui: {}", e))?;

        let window_rect =
            get_window_rect(hwnd).ok_or_else(|| "Failed to get window position".to_string())?;

        Ok(Self {
            gui,
            hwnd,
            window_rect,
        })
    }

    /// Screen point -> surface-relative point (the overlay covers the
    /// outer window rect).
    pub fn to_overlay_point(&self, point: Point) -> Point {
        Point::new(point.x - self.window_rect.0, point.y - self.window_rect.1)
    }

    /// Client-relative region -> screen region for template search.
    pub fn client_region_to_screen(&self, region: PixelRect) -> Option<(u32, u32, u32, u32)> {
        let origin = client_to_screen_coords(self.hwnd, Point::new(region.0, region.1))?;
        Some((
            origin.x as u32,
            origin.y as u32,
            region.2 as u32,
            region.3 as u32,
        ))
    }

    /// Load a template image and register it for repeated searches.
    pub fn store_template(
        &mut self,
        path: &str,
        screen_region: Option<(u32, u32, u32, u32)>,
        alias: &str,
    ) -> Result<(), String> {
        self.gui
            .store_template_from_file(path, screen_region, MatchMode::Segmented, alias)
            .map_err(|e| format!("Failed to load template '{}': {}", path, e))
    }
}
