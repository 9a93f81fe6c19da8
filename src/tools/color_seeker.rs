use std::sync::mpsc::Sender;

use eframe::egui;
use windows::Win32::Foundation::HWND;

use crate::automation::context::BotContext;
use crate::automation::detection::find_pixel_by_color;
use crate::automation::interaction::{delay_ms, move_mouse_to};
use crate::core::annotations::OverlayCommand;
use crate::core::color::{format_hex_color, parse_hex_color};
use crate::core::input::is_escape_key_down;
use crate::core::window::{client_to_screen_coords, get_client_size, get_cursor_pos, get_pixel_color};
use crate::core::worker::Worker;
use crate::settings::{ColorSeekerSettings, OverlaySettings};
use crate::tools::r#trait::Tool;
use crate::ui::color_seeker::{render_ui, ColorUiAction};
use crate::ui::log_panel::ActivityLog;

pub struct ColorSeekerTool {
    interval_ms_str: String,
    settings_synced: bool,
    worker: Worker,
}

impl Default for ColorSeekerTool {
    fn default() -> Self {
        Self {
            interval_ms_str: "500".to_string(),
            settings_synced: false,
            worker: Worker::new(),
        }
    }
}

impl Tool for ColorSeekerTool {
    fn name(&self) -> &str {
        "Color Seeker"
    }

    fn worker(&self) -> &Worker {
        &self.worker
    }
}

impl ColorSeekerTool {
    pub fn update(
        &mut self,
        ui: &mut egui::Ui,
        settings: &mut ColorSeekerSettings,
        overlay_settings: &OverlaySettings,
        luna_hwnd: Option<HWND>,
        overlay: &Sender<OverlayCommand>,
        log: &ActivityLog,
    ) {
        if !self.settings_synced {
            self.interval_ms_str = settings.interval_ms.to_string();
            self.settings_synced = true;
        }

        if luna_hwnd.is_none() && self.worker.is_running() {
            self.worker.stop();
            self.worker.set_status("Disconnected");
        }

        let action = render_ui(
            ui,
            settings,
            &mut self.interval_ms_str,
            self.worker.is_running(),
            &self.worker.status(),
            luna_hwnd.is_some(),
        );

        if let Ok(value) = self.interval_ms_str.parse::<u64>() {
            settings.interval_ms = value;
        }

        match action {
            ColorUiAction::PickColor => {
                match get_cursor_pos().and_then(get_pixel_color) {
                    Some(color) => {
                        settings.hex_color = format_hex_color(color);
                        self.worker
                            .set_status(&format!("Picked {}", settings.hex_color));
                    }
                    None => self.worker.set_status("Failed to read pixel color"),
                }
            }
            ColorUiAction::Start => match luna_hwnd {
                Some(hwnd) => self.start_scanning(
                    settings.clone(),
                    overlay_settings.clone(),
                    hwnd,
                    overlay.clone(),
                    log.clone(),
                ),
                None => self.worker.set_status("Connect to the game first"),
            },
            ColorUiAction::Stop => self.stop(),
            ColorUiAction::None => {}
        }
    }

    fn start_scanning(
        &mut self,
        settings: ColorSeekerSettings,
        overlay_settings: OverlaySettings,
        hwnd: HWND,
        overlay: Sender<OverlayCommand>,
        log: ActivityLog,
    ) {
        let target = match parse_hex_color(&settings.hex_color) {
            Ok(color) => (color.r(), color.g(), color.b()),
            Err(e) => {
                self.worker.set_status(&format!("Invalid color: {}", e));
                return;
            }
        };

        self.worker.set_status("Starting...");

        self.worker.start(move |handle| {
            let mut ctx = match BotContext::new(hwnd) {
                Ok(ctx) => ctx,
                Err(e) => {
                    handle.set_status(&format!("Error: {}", e));
                    handle.request_stop();
                    return;
                }
            };

            log.push(&format!("Color seeker started for {}", settings.hex_color));
            handle.set_status("Scanning...");

            while handle.is_running() {
                if is_escape_key_down() {
                    handle.set_status("Stopped (ESC pressed)");
                    handle.request_stop();
                    break;
                }

                let Some(client) = get_client_size(hwnd) else {
                    handle.set_status("Lost the client window");
                    handle.request_stop();
                    break;
                };

                let scan = find_pixel_by_color(
                    hwnd,
                    (0, 0, client.0, client.1),
                    target,
                    settings.threshold,
                    settings.step,
                );
                match scan {
                    Ok(Some(hit)) => {
                        handle.set_status(&format!("Found color at {}", hit));
                        log.push(&format!("Color found at {}", hit));

                        if let Some(screen) = client_to_screen_coords(hwnd, hit) {
                            if let Err(e) =
                                move_mouse_to(&mut ctx.gui, screen, settings.eased_move)
                            {
                                handle.set_status(&format!("Error: {}", e));
                            }

                            let cell = ctx.to_overlay_point(screen);
                            let _ = overlay.send(OverlayCommand::Message {
                                text: format!("Color found at {}", hit),
                                duration_ms: Some(overlay_settings.message_duration_ms),
                            });
                            let _ = overlay.send(OverlayCommand::Highlight {
                                rect: (cell.x, cell.y, settings.step, settings.step),
                                rows: 1,
                                columns: 1,
                                duration_ms: Some(overlay_settings.highlight_duration_ms),
                            });
                        }
                    }
                    Ok(None) => {
                        handle.set_status("Scanning...");
                    }
                    Err(e) => {
                        handle.set_status(&format!("Error: {}", e));
                        handle.request_stop();
                        break;
                    }
                }

                delay_ms(settings.interval_ms);
            }
        });
    }
}
