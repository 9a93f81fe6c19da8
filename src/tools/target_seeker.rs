use std::sync::mpsc::Sender;

use eframe::egui;
use log::warn;
use windows::Win32::Foundation::HWND;

use crate::automation::context::BotContext;
use crate::automation::detection::find_template;
use crate::automation::interaction::{click_at_screen, delay_ms};
use crate::core::annotations::OverlayCommand;
use crate::core::coords::{denormalize_rect, is_within_client};
use crate::core::input::{click_at_position, is_escape_key_down, right_click_at_position};
use crate::core::window::{get_client_size, screen_to_client_coords};
use crate::core::worker::Worker;
use crate::settings::{ClickMethod, MouseButton, OverlaySettings, TargetSeekerSettings};
use crate::tools::r#trait::Tool;
use crate::ui::log_panel::ActivityLog;
use crate::ui::target_seeker::{render_ui, TargetUiAction};

const TEMPLATE_ALIAS: &str = "seek_target";

// Settle time after a click so one target is not clicked twice
const POST_CLICK_DELAY_MS: u64 = 500;

pub struct TargetSeekerTool {
    interval_ms_str: String,
    settings_synced: bool,
    worker: Worker,
}

impl Default for TargetSeekerTool {
    fn default() -> Self {
        Self {
            interval_ms_str: "1000".to_string(),
            settings_synced: false,
            worker: Worker::new(),
        }
    }
}

impl Tool for TargetSeekerTool {
    fn name(&self) -> &str {
        "Target Seeker"
    }

    fn worker(&self) -> &Worker {
        &self.worker
    }
}

impl TargetSeekerTool {
    pub fn update(
        &mut self,
        ui: &mut egui::Ui,
        settings: &mut TargetSeekerSettings,
        overlay_settings: &OverlaySettings,
        luna_hwnd: Option<HWND>,
        overlay: &Sender<OverlayCommand>,
        log: &ActivityLog,
    ) {
        // Sync UI with settings on first load
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
            TargetUiAction::Start => match luna_hwnd {
                Some(hwnd) => self.start_seeking(
                    settings.clone(),
                    overlay_settings.clone(),
                    hwnd,
                    overlay.clone(),
                    log.clone(),
                ),
                None => self.worker.set_status("Connect to the game first"),
            },
            TargetUiAction::Stop => self.stop(),
            TargetUiAction::None => {}
        }
    }

    fn start_seeking(
        &mut self,
        settings: TargetSeekerSettings,
        overlay_settings: OverlaySettings,
        hwnd: HWND,
        overlay: Sender<OverlayCommand>,
        log: ActivityLog,
    ) {
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

            // The template size drives the highlight box around a match center
            let (template_w, template_h) = match image::image_dimensions(&settings.image_path) {
                Ok((w, h)) => (w as i32, h as i32),
                Err(e) => {
                    handle.set_status(&format!("Image error: {}", e));
                    handle.request_stop();
                    return;
                }
            };

            let screen_region = settings.search_region.and_then(|region| {
                let client = get_client_size(hwnd)?;
                let rect = denormalize_rect(client, region)?;
                ctx.client_region_to_screen(rect)
            });
            if let Err(e) = ctx.store_template(&settings.image_path, screen_region, TEMPLATE_ALIAS) {
                handle.set_status(&format!("Image error: {}", e));
                handle.request_stop();
                return;
            }

            log.push(&format!("Target seeker started with {}", settings.image_path));
            handle.set_status("Searching...");

            while handle.is_running() {
                if is_escape_key_down() {
                    handle.set_status("Stopped (ESC pressed)");
                    handle.request_stop();
                    break;
                }

                if let Some(center) =
                    find_template(&mut ctx.gui, TEMPLATE_ALIAS, settings.min_confidence)
                {
                    handle.set_status(&format!("Found at {}, clicking...", center));
                    log.push(&format!("Target found at {}", center));

                    let overlay_center = ctx.to_overlay_point(center);
                    let _ = overlay.send(OverlayCommand::Message {
                        text: format!("Target found at {}", center),
                        duration_ms: Some(overlay_settings.message_duration_ms),
                    });
                    let _ = overlay.send(OverlayCommand::Highlight {
                        rect: (
                            overlay_center.x - template_w / 2,
                            overlay_center.y - template_h / 2,
                            template_w,
                            template_h,
                        ),
                        rows: 1,
                        columns: 1,
                        duration_ms: Some(overlay_settings.highlight_duration_ms),
                    });

                    match settings.click_method {
                        ClickMethod::SendMessage => {
                            let target = screen_to_client_coords(hwnd, center)
                                .zip(get_client_size(hwnd));
                            match target {
                                Some((client, size)) if is_within_client(size, client) => {
                                    match settings.button {
                                        MouseButton::Left => click_at_position(hwnd, client),
                                        MouseButton::Right => right_click_at_position(hwnd, client),
                                    }
                                }
                                Some((client, _)) => {
                                    warn!("Click target {} is outside the client area", client);
                                }
                                None => handle.set_status("Error converting coordinates"),
                            }
                        }
                        ClickMethod::MouseMovement => {
                            click_at_screen(&mut ctx.gui, center, settings.button);
                        }
                    }

                    delay_ms(POST_CLICK_DELAY_MS);
                } else {
                    handle.set_status("Searching...");
                }

                delay_ms(settings.interval_ms);
            }
        });
    }
}
