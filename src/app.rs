use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use eframe::egui;
use windows::Win32::Foundation::HWND;

use crate::core::annotations::OverlayCommand;
use crate::core::input::is_escape_key_down;
use crate::core::window::{activate_and_maximize, is_window_valid};
use crate::settings::AppSettings;
use crate::tools::color_seeker::ColorSeekerTool;
use crate::tools::r#trait::Tool;
use crate::tools::target_seeker::TargetSeekerTool;
use crate::ui::app_header::{render_header, HeaderAction};
use crate::ui::log_panel::{render_log_panel, ActivityLog};
use crate::ui::overlay::{render_overlay_settings, OverlayUiAction, OverlayWindow};

pub struct LunaHelperApp {
    settings: AppSettings,

    // Connection state
    luna_hwnd: Option<HWND>,
    luna_title: String,

    // Tools
    target_seeker: TargetSeekerTool,
    color_seeker: ColorSeekerTool,

    // Overlay surface plus the channel tools post annotations through
    overlay: OverlayWindow,
    overlay_tx: Sender<OverlayCommand>,
    overlay_rx: Receiver<OverlayCommand>,

    log: ActivityLog,
    show_log: bool,
    selected_tab: Tab,
}

#[derive(PartialEq, Eq, Default)]
enum Tab {
    #[default]
    TargetSeeker,
    ColorSeeker,
    Overlay,
}

impl LunaHelperApp {
    pub fn new() -> Self {
        let settings = AppSettings::load();
        let (overlay_tx, overlay_rx) = mpsc::channel();

        Self {
            overlay: OverlayWindow::new(&settings.overlay),
            settings,
            luna_hwnd: None,
            luna_title: "Not connected".to_string(),
            target_seeker: TargetSeekerTool::default(),
            color_seeker: ColorSeekerTool::default(),
            overlay_tx,
            overlay_rx,
            log: ActivityLog::new(),
            show_log: false,
            selected_tab: Tab::default(),
        }
    }

    fn stop_all_tools(&mut self) {
        if self.target_seeker.is_running() {
            self.target_seeker.stop();
            self.log.push(&format!("{} stopped", self.target_seeker.name()));
        }
        if self.color_seeker.is_running() {
            self.color_seeker.stop();
            self.log.push(&format!("{} stopped", self.color_seeker.name()));
        }
    }
}

impl eframe::App for LunaHelperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drop the connection if the client went away
        if let Some(hwnd) = self.luna_hwnd {
            if !is_window_valid(hwnd) {
                self.luna_hwnd = None;
                self.luna_title = "Client window closed".to_string();
                self.stop_all_tools();
            }
        }

        // Worker threads only hand over annotation requests; the queue is
        // mutated here, on the UI thread.
        let now = Instant::now();
        while let Ok(command) = self.overlay_rx.try_recv() {
            self.overlay.apply(command, now);
        }

        if self.show_log {
            render_log_panel(ctx, &self.log);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            match render_header(ui, &mut self.luna_hwnd, &mut self.luna_title) {
                HeaderAction::Connect(hwnd) => {
                    activate_and_maximize(hwnd);
                    self.log.push(&format!("Connected to {}", self.luna_title));
                }
                HeaderAction::Disconnect => {
                    self.stop_all_tools();
                    self.log.push("Disconnected");
                }
                HeaderAction::ToggleLog => self.show_log = !self.show_log,
                HeaderAction::None => {}
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.selected_tab, Tab::TargetSeeker, "Target Seeker");
                ui.selectable_value(&mut self.selected_tab, Tab::ColorSeeker, "Color Seeker");
                ui.selectable_value(&mut self.selected_tab, Tab::Overlay, "Overlay");
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match self.selected_tab {
                Tab::TargetSeeker => self.target_seeker.update(
                    ui,
                    &mut self.settings.target_seeker,
                    &self.settings.overlay,
                    self.luna_hwnd,
                    &self.overlay_tx,
                    &self.log,
                ),
                Tab::ColorSeeker => self.color_seeker.update(
                    ui,
                    &mut self.settings.color_seeker,
                    &self.settings.overlay,
                    self.luna_hwnd,
                    &self.overlay_tx,
                    &self.log,
                ),
                Tab::Overlay => {
                    let connected = self.luna_hwnd.is_some();
                    match render_overlay_settings(ui, &mut self.settings.overlay, connected) {
                        OverlayUiAction::ApplyColors => {
                            self.overlay.apply_colors(&self.settings.overlay);
                            self.settings.auto_save();
                        }
                        OverlayUiAction::Test => {
                            self.overlay.show_test(&self.settings.overlay, Instant::now());
                        }
                        OverlayUiAction::None => {}
                    }
                }
            });
        });

        // The overlay surface exists only while annotations are pending;
        // skipping the show call is the teardown.
        if let Some(hwnd) = self.luna_hwnd {
            if !self.overlay.is_idle() {
                self.overlay.show(ctx, hwnd);
                // Immediate viewports repaint with the parent, so keep the
                // parent ticking until the annotations have expired
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }

        // Keep polling worker state and the annotation channel while a tool
        // is running in the background.
        if self.target_seeker.is_running() || self.color_seeker.is_running() {
            if is_escape_key_down() {
                self.stop_all_tools();
            }
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.stop_all_tools();
        self.settings.auto_save();
    }
}
