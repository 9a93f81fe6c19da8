mod app;
mod automation;
mod core;
mod settings;
mod tools;
mod ui;

use app::LunaHelperApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_title("Luna Helper"),
        ..Default::default()
    };

    eframe::run_native(
        "Luna Helper",
        options,
        Box::new(|_cc| Box::new(LunaHelperApp::new())),
    )
}
