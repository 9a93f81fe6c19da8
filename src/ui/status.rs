use eframe::egui;

pub fn render_status(ui: &mut egui::Ui, status: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Status:").strong());

        let status_color = if status.contains("Error")
            || status.contains("Failed")
            || status.contains("Invalid")
        {
            egui::Color32::from_rgb(255, 100, 100)
        } else if status.contains("Searching")
            || status.contains("Scanning")
            || status.contains("Found")
        {
            egui::Color32::from_rgb(100, 255, 100)
        } else {
            egui::Color32::GRAY
        };

        ui.label(egui::RichText::new(status).color(status_color));
    });
}
