use std::sync::{Arc, Mutex};

use eframe::egui;

const MAX_LOG_LINES: usize = 200;

/// Activity log shared between the UI thread and tool workers.
#[derive(Clone, Default)]
pub struct ActivityLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: &str) {
        let mut lines = self.lines.lock().unwrap();
        lines.push(line.to_string());
        let excess = lines.len().saturating_sub(MAX_LOG_LINES);
        if excess > 0 {
            lines.drain(..excess);
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

pub fn render_log_panel(ctx: &egui::Context, log: &ActivityLog) {
    let snapshot = log.snapshot();

    egui::SidePanel::right("activity_log")
        .resizable(true)
        .default_width(280.0)
        .min_width(200.0)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(12, 12, 12))
                .inner_margin(egui::Margin::same(8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("Activity")
                                .strong()
                                .color(egui::Color32::LIGHT_GRAY),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Clear").clicked() {
                                log.clear();
                            }
                            ui.label(
                                egui::RichText::new(format!("{} lines", snapshot.len()))
                                    .small()
                                    .color(egui::Color32::DARK_GRAY),
                            );
                        });
                    });

                    ui.add_space(6.0);
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            if snapshot.is_empty() {
                                ui.label(
                                    egui::RichText::new("No activity yet.")
                                        .italics()
                                        .color(egui::Color32::DARK_GRAY),
                                );
                            } else {
                                for line in &snapshot {
                                    ui.label(
                                        egui::RichText::new(line)
                                            .monospace()
                                            .color(egui::Color32::from_rgb(200, 200, 200)),
                                    );
                                }
                            }
                        });
                });
        });
}
