use eframe::egui;

use crate::settings::{ClickMethod, MouseButton, TargetSeekerSettings};
use crate::ui::status::render_status;

pub enum TargetUiAction {
    Start,
    Stop,
    None,
}

pub fn render_ui(
    ui: &mut egui::Ui,
    settings: &mut TargetSeekerSettings,
    interval_ms_str: &mut String,
    is_running: bool,
    status: &str,
    connected: bool,
) -> TargetUiAction {
    let mut action = TargetUiAction::None;

    ui.heading("Target Seeker");
    ui.label("Finds a template image in the client, highlights it and clicks it.");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Template:");
        ui.text_edit_singleline(&mut settings.image_path);
        if ui.button("Browse...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
                .pick_file()
            {
                settings.image_path = path.display().to_string();
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Interval (ms):");
        ui.add(egui::TextEdit::singleline(interval_ms_str).desired_width(60.0));
        ui.label("Min confidence:");
        ui.add(egui::Slider::new(&mut settings.min_confidence, 0.5..=1.0));
    });

    ui.horizontal(|ui| {
        ui.label("Click:");
        ui.selectable_value(&mut settings.click_method, ClickMethod::SendMessage, "Direct");
        ui.selectable_value(
            &mut settings.click_method,
            ClickMethod::MouseMovement,
            "Mouse",
        );
        ui.separator();
        ui.selectable_value(&mut settings.button, MouseButton::Left, "Left");
        ui.selectable_value(&mut settings.button, MouseButton::Right, "Right");
    });

    let mut limited = settings.search_region.is_some();
    if ui
        .checkbox(&mut limited, "Limit search region (client-relative 0..1)")
        .changed()
    {
        settings.search_region = limited.then_some((0.0, 0.0, 1.0, 1.0));
    }
    if let Some(region) = &mut settings.search_region {
        ui.horizontal(|ui| {
            ui.label("x");
            ui.add(egui::DragValue::new(&mut region.0).speed(0.01).clamp_range(0.0..=1.0));
            ui.label("y");
            ui.add(egui::DragValue::new(&mut region.1).speed(0.01).clamp_range(0.0..=1.0));
            ui.label("w");
            ui.add(egui::DragValue::new(&mut region.2).speed(0.01).clamp_range(0.0..=1.0));
            ui.label("h");
            ui.add(egui::DragValue::new(&mut region.3).speed(0.01).clamp_range(0.0..=1.0));
        });
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if is_running {
            if ui.button("Stop").clicked() {
                action = TargetUiAction::Stop;
            }
        } else {
            let start = ui.add_enabled(connected, egui::Button::new("Start"));
            if start.clicked() {
                action = TargetUiAction::Start;
            }
        }
    });

    render_status(ui, status);

    action
}
