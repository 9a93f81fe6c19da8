use std::time::{Duration, Instant};

use eframe::egui;
use windows::Win32::Foundation::HWND;

use crate::core::annotations::{AnnotationQueue, HighlightHandle, OverlayCommand, Surface};
use crate::core::color::parse_hex_color;
use crate::core::coords::PixelRect;
use crate::core::window::get_window_rect;
use crate::settings::OverlaySettings;

const HIGHLIGHT_STROKE: f32 = 2.0;
const MESSAGE_FONT_SIZE: f32 = 13.0;

/// Transparent click-through viewport drawn over the game client.
///
/// Owns the annotation queue. The app calls `show` only while the queue has
/// something to display; once the queue reports idle, simply not calling
/// `show` again closes the viewport.
pub struct OverlayWindow {
    queue: AnnotationQueue,
    test_group: Option<HighlightHandle>,
}

impl OverlayWindow {
    pub fn new(settings: &OverlaySettings) -> Self {
        let mut queue = AnnotationQueue::new();
        queue.set_message_color(&settings.message_color);
        queue.set_highlight_color(&settings.highlight_color);
        Self {
            queue,
            test_group: None,
        }
    }

    pub fn apply_colors(&mut self, settings: &OverlaySettings) {
        self.queue.set_message_color(&settings.message_color);
        self.queue.set_highlight_color(&settings.highlight_color);
    }

    /// Apply one annotation request on the UI thread.
    pub fn apply(&mut self, command: OverlayCommand, now: Instant) {
        match command {
            OverlayCommand::Message { text, duration_ms } => {
                self.queue
                    .post_message(&text, duration_ms.map(Duration::from_millis), now);
            }
            OverlayCommand::Highlight {
                rect,
                rows,
                columns,
                duration_ms,
            } => {
                self.queue.post_highlight_group(
                    rect,
                    rows,
                    columns,
                    duration_ms.map(Duration::from_millis),
                    now,
                );
            }
        }
    }

    /// Post a sample message and grid so the user can check colors and
    /// placement. Re-running the test replaces the previous demo instead of
    /// stacking a new grid on top of it.
    pub fn show_test(&mut self, settings: &OverlaySettings, now: Instant) {
        if let Some(handle) = self.test_group.take() {
            self.queue.clear_highlight_group(&handle);
        }
        self.queue.clear_message();

        self.queue.post_message(
            "Overlay test",
            Some(Duration::from_millis(settings.message_duration_ms)),
            now,
        );
        self.test_group = self.queue.post_highlight_group(
            (40, 40, 200, 200),
            2,
            2,
            Some(Duration::from_millis(settings.highlight_duration_ms)),
            now,
        );
        if let Some(handle) = &self.test_group {
            log::info!("Posted overlay test grid with {} cells", handle.cells().len());
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_idle()
    }

    /// Reposition the viewport over the client and render the queue.
    pub fn show(&mut self, ctx: &egui::Context, hwnd: HWND) {
        let Some(window_rect) = get_window_rect(hwnd) else {
            return;
        };

        let now = Instant::now();
        self.queue.tick(now);
        if self.queue.is_idle() {
            return;
        }

        let position = egui::pos2(window_rect.0 as f32, window_rect.1 as f32);
        let size = egui::vec2(window_rect.2 as f32, window_rect.3 as f32);
        let queue = &self.queue;

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("luna_overlay"),
            egui::ViewportBuilder::default()
                .with_title("Luna Overlay")
                .with_position(position)
                .with_inner_size(size)
                .with_decorations(false)
                .with_transparent(true)
                .with_always_on_top()
                .with_mouse_passthrough(true)
                .with_taskbar(false),
            |ctx, _class| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none())
                    .show(ctx, |ui| {
                        let mut surface = PainterSurface {
                            painter: ui.painter(),
                            origin: ui.max_rect().min,
                            size: (window_rect.2, window_rect.3),
                        };
                        queue.render(&mut surface);
                    });

                // Wake up again when the next annotation is due to expire
                if let Some(deadline) = queue.next_deadline() {
                    ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
                }
            },
        );
    }
}

struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    size: (i32, i32),
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> (i32, i32) {
        self.size
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: egui::Color32) {
        let min = self.origin + egui::vec2(rect.0 as f32, rect.1 as f32);
        let cell = egui::Rect::from_min_size(min, egui::vec2(rect.2 as f32, rect.3 as f32));
        self.painter.rect_stroke(
            cell,
            egui::Rounding::ZERO,
            egui::Stroke::new(HIGHLIGHT_STROKE, color),
        );
    }

    fn draw_text(&mut self, center_x: i32, top_y: i32, text: &str, color: egui::Color32) {
        let pos = self.origin + egui::vec2(center_x as f32, top_y as f32);
        self.painter.text(
            pos,
            egui::Align2::CENTER_TOP,
            text,
            egui::FontId::proportional(MESSAGE_FONT_SIZE),
            color,
        );
    }
}

pub enum OverlayUiAction {
    ApplyColors,
    Test,
    None,
}

/// Settings panel for the overlay colors and default durations.
pub fn render_overlay_settings(
    ui: &mut egui::Ui,
    settings: &mut OverlaySettings,
    connected: bool,
) -> OverlayUiAction {
    let mut action = OverlayUiAction::None;

    ui.heading("Overlay");
    ui.label("Colors and timing for the highlights drawn over the client.");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Message color:");
        ui.text_edit_singleline(&mut settings.message_color);
        color_swatch(ui, &settings.message_color);
    });

    ui.horizontal(|ui| {
        ui.label("Highlight color:");
        ui.text_edit_singleline(&mut settings.highlight_color);
        color_swatch(ui, &settings.highlight_color);
    });

    ui.horizontal(|ui| {
        ui.label("Message duration (ms):");
        ui.add(egui::DragValue::new(&mut settings.message_duration_ms).speed(50));
        ui.label("Highlight duration (ms):");
        ui.add(egui::DragValue::new(&mut settings.highlight_duration_ms).speed(50));
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button("Apply colors").clicked() {
            action = OverlayUiAction::ApplyColors;
        }
        let test = ui.add_enabled(connected, egui::Button::new("Test overlay"));
        if test.clicked() {
            action = OverlayUiAction::Test;
        }
    });

    action
}

fn color_swatch(ui: &mut egui::Ui, hex: &str) {
    if let Ok(color) = parse_hex_color(hex) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, egui::Rounding::same(3.0), color);
    } else {
        ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "invalid");
    }
}
