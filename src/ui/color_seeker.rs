use eframe::egui;

use crate::core::color::parse_hex_color;
use crate::settings::ColorSeekerSettings;
use crate::ui::status::render_status;

pub enum ColorUiAction {
    Start,
    Stop,
    PickColor,
    None,
}

pub fn render_ui(
    ui: &mut egui::Ui,
    settings: &mut ColorSeekerSettings,
    interval_ms_str: &mut String,
    is_running: bool,
    status: &str,
    connected: bool,
) -> ColorUiAction {
    let mut action = ColorUiAction::None;

    ui.heading("Color Seeker");
    ui.label("Scans the client for a pixel of the given color and moves the cursor there.");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Color:");
        ui.add(egui::TextEdit::singleline(&mut settings.hex_color).desired_width(80.0));
        if let Ok(color) = parse_hex_color(&settings.hex_color) {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, egui::Rounding::same(3.0), color);
        } else {
            ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "invalid");
        }
        // Reads the screen pixel under the cursor at the moment of the click
        if ui.button("Pick under cursor").clicked() {
            action = ColorUiAction::PickColor;
        }
    });

    ui.horizontal(|ui| {
        ui.label("Step (px):");
        ui.add(egui::DragValue::new(&mut settings.step).clamp_range(1..=100));
        ui.label("Threshold:");
        ui.add(egui::DragValue::new(&mut settings.threshold).clamp_range(0..=255));
        ui.label("Interval (ms):");
        ui.add(egui::TextEdit::singleline(interval_ms_str).desired_width(60.0));
    });

    ui.checkbox(&mut settings.eased_move, "Eased cursor movement");

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if is_running {
            if ui.button("Stop").clicked() {
                action = ColorUiAction::Stop;
            }
        } else {
            let start = ui.add_enabled(connected, egui::Button::new("Start"));
            if start.clicked() {
                action = ColorUiAction::Start;
            }
        }
    });

    render_status(ui, status);

    action
}
