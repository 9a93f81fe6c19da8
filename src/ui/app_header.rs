use eframe::egui;
use windows::Win32::Foundation::HWND;

use crate::core::window::{find_luna_window, get_client_size};

pub enum HeaderAction {
    Connect(HWND),
    Disconnect,
    ToggleLog,
    None,
}

/// Render the unified app header (connection status + utility buttons)
pub fn render_header(
    ui: &mut egui::Ui,
    luna_hwnd: &mut Option<HWND>,
    luna_title: &mut String,
) -> HeaderAction {
    let mut action = HeaderAction::None;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            if let Some(hwnd) = luna_hwnd {
                ui.label(
                    egui::RichText::new(format!("Connected to {}", luna_title))
                        .color(egui::Color32::from_rgb(168, 226, 187))
                        .strong(),
                );

                if let Some((w, h)) = get_client_size(*hwnd) {
                    ui.label(
                        egui::RichText::new(format!("{}x{}", w, h))
                            .color(egui::Color32::from_rgb(140, 140, 140))
                            .small(),
                    );
                }
            } else {
                ui.label(
                    egui::RichText::new(format!("Status: {}", luna_title))
                        .color(egui::Color32::from_rgb(200, 200, 200))
                        .strong(),
                );
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 0.0);
            let button_size = egui::vec2(80.0, 26.0);

            if ui
                .add_sized(button_size, egui::Button::new("Log"))
                .clicked()
            {
                action = HeaderAction::ToggleLog;
            }

            if luna_hwnd.is_none() {
                if ui
                    .add_sized(button_size, egui::Button::new("Connect"))
                    .clicked()
                {
                    if let Some((hwnd, title)) = find_luna_window() {
                        *luna_hwnd = Some(hwnd);
                        *luna_title = title;
                        action = HeaderAction::Connect(hwnd);
                    } else {
                        // No internal retry; the user clicks Connect again
                        *luna_title = "No Luna client found".to_string();
                    }
                }
            } else if ui
                .add_sized(button_size, egui::Button::new("Disconnect"))
                .clicked()
            {
                *luna_hwnd = None;
                *luna_title = "Disconnected".to_string();
                action = HeaderAction::Disconnect;
            }
        });
    });

    action
}
