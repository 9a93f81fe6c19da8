use std::time::{Duration, Instant};

use eframe::egui::Color32;
use log::warn;

use crate::core::color::parse_hex_color;
use crate::core::coords::PixelRect;

/// Vertical offset of the status message below the top edge of the surface.
const MESSAGE_TOP_OFFSET: i32 = 8;

/// Render target for annotations: the overlay viewport in the app, a
/// recording fake in tests.
pub trait Surface {
    /// Surface extent as (width, height) in pixels.
    fn size(&self) -> (i32, i32);

    /// Draw an unfilled rectangle outline.
    fn stroke_rect(&mut self, rect: PixelRect, color: Color32);

    /// Draw text horizontally centered on `center_x` with its top at `top_y`.
    fn draw_text(&mut self, center_x: i32, top_y: i32, text: &str, color: Color32);
}

/// Annotation requests produced by tool worker threads. The queue itself is
/// single-threaded; the app drains these on the UI thread and applies them.
pub enum OverlayCommand {
    Message {
        text: String,
        duration_ms: Option<u64>,
    },
    Highlight {
        rect: PixelRect,
        rows: i32,
        columns: i32,
        duration_ms: Option<u64>,
    },
}

/// Identifies one highlight group and carries the exact cells it was created
/// with, so a scheduled or manual removal always targets that set even if
/// other groups come and go in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightHandle {
    id: u64,
    cells: Vec<PixelRect>,
}

impl HighlightHandle {
    pub fn cells(&self) -> &[PixelRect] {
        &self.cells
    }
}

struct StatusMessage {
    text: String,
    expires_at: Option<Instant>,
}

struct HighlightGroup {
    id: u64,
    cells: Vec<PixelRect>,
    expires_at: Option<Instant>,
}

/// Tracks the transient annotations shown over the game client: one status
/// message slot and any number of highlight groups, each removed on its own
/// deadline.
///
/// The queue never tears anything down itself; its owner polls `is_idle` and
/// closes the display surface once both the message slot and the highlight
/// set are empty at the same evaluation point.
pub struct AnnotationQueue {
    message: Option<StatusMessage>,
    groups: Vec<HighlightGroup>,
    next_group_id: u64,
    message_color: Color32,
    highlight_color: Color32,
}

impl Default for AnnotationQueue {
    fn default() -> Self {
        Self {
            message: None,
            groups: Vec::new(),
            next_group_id: 0,
            message_color: Color32::WHITE,
            highlight_color: Color32::WHITE,
        }
    }
}

impl AnnotationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current status message. A `duration` of `None` keeps the
    /// message until it is superseded or cleared manually. An empty message
    /// is skipped without touching the slot.
    pub fn post_message(&mut self, text: &str, duration: Option<Duration>, now: Instant) {
        if text.is_empty() {
            warn!("Ignoring empty status message");
            return;
        }
        self.message = Some(StatusMessage {
            text: text.to_string(),
            expires_at: duration.map(|d| now + d),
        });
    }

    /// Subdivide `bounding_box` into a `rows` x `columns` grid and register
    /// the cells as one removal unit.
    ///
    /// Cells are sized by integer division. When the box does not divide
    /// evenly, the remainder pixels along the right/bottom edges stay
    /// uncovered, so a grid over an odd-sized box sits slightly short of the
    /// box edge. Non-positive width, height, rows or columns are rejected
    /// before any cell is computed.
    pub fn post_highlight_group(
        &mut self,
        bounding_box: PixelRect,
        rows: i32,
        columns: i32,
        duration: Option<Duration>,
        now: Instant,
    ) -> Option<HighlightHandle> {
        let cells = split_grid(bounding_box, rows, columns)?;
        let id = self.next_group_id;
        self.next_group_id += 1;
        self.groups.push(HighlightGroup {
            id,
            cells: cells.clone(),
            expires_at: duration.map(|d| now + d),
        });
        Some(HighlightHandle { id, cells })
    }

    /// Clear the status message. Safe to call when none is shown.
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Remove exactly the cells belonging to `handle`, leaving every other
    /// group in place. An unknown or already-removed handle is a no-op.
    pub fn clear_highlight_group(&mut self, handle: &HighlightHandle) {
        self.groups.retain(|group| group.id != handle.id);
    }

    /// Drop every annotation whose deadline has passed. A deadline firing
    /// after its group was cleared manually finds nothing and changes
    /// nothing. Returns true if anything was removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.groups.len() + usize::from(self.message.is_some());
        if self
            .message
            .as_ref()
            .and_then(|m| m.expires_at)
            .is_some_and(|at| at <= now)
        {
            self.message = None;
        }
        self.groups
            .retain(|group| group.expires_at.map_or(true, |at| at > now));
        before != self.groups.len() + usize::from(self.message.is_some())
    }

    /// Earliest pending deadline, if any annotation expires at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        let message = self.message.as_ref().and_then(|m| m.expires_at);
        let group = self.groups.iter().filter_map(|g| g.expires_at).min();
        match (message, group) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn message_cleared(&self) -> bool {
        self.message.is_none()
    }

    pub fn highlights_cleared(&self) -> bool {
        self.groups.is_empty()
    }

    /// Both the message slot and the highlight set are empty. Recomputed
    /// from the collections on every call, never from cached flags.
    pub fn is_idle(&self) -> bool {
        self.message_cleared() && self.highlights_cleared()
    }

    pub fn set_message_color(&mut self, hex: &str) {
        match parse_hex_color(hex) {
            Ok(color) => self.message_color = color,
            Err(e) => warn!("{}", e),
        }
    }

    pub fn set_highlight_color(&mut self, hex: &str) {
        match parse_hex_color(hex) {
            Ok(color) => self.highlight_color = color,
            Err(e) => warn!("{}", e),
        }
    }

    /// Draw the current annotations. Draws nothing when idle.
    pub fn render(&self, surface: &mut dyn Surface) {
        if let Some(message) = &self.message {
            let (width, _) = surface.size();
            surface.draw_text(width / 2, MESSAGE_TOP_OFFSET, &message.text, self.message_color);
        }
        for group in &self.groups {
            for cell in &group.cells {
                surface.stroke_rect(*cell, self.highlight_color);
            }
        }
    }
}

/// Cut `bounding_box` into a row-major grid of equal floor-divided cells.
fn split_grid(bounding_box: PixelRect, rows: i32, columns: i32) -> Option<Vec<PixelRect>> {
    let (left, top, width, height) = bounding_box;
    if width <= 0 || height <= 0 || rows <= 0 || columns <= 0 {
        warn!(
            "Rejecting {}x{} highlight grid over {}x{} box: geometry must be positive",
            rows, columns, width, height
        );
        return None;
    }
    let cell_width = width / columns;
    let cell_height = height / rows;
    let mut cells = Vec::with_capacity((rows * columns) as usize);
    for row in 0..rows {
        for column in 0..columns {
            cells.push((
                left + column * cell_width,
                top + row * cell_height,
                cell_width,
                cell_height,
            ));
        }
    }
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSurface {
        rects: Vec<(PixelRect, Color32)>,
        texts: Vec<(i32, i32, String, Color32)>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                rects: Vec::new(),
                texts: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (i32, i32) {
            (800, 600)
        }

        fn stroke_rect(&mut self, rect: PixelRect, color: Color32) {
            self.rects.push((rect, color));
        }

        fn draw_text(&mut self, center_x: i32, top_y: i32, text: &str, color: Color32) {
            self.texts.push((center_x, top_y, text.to_string(), color));
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_grid_two_by_two() {
        let mut queue = AnnotationQueue::new();
        let handle = queue
            .post_highlight_group((0, 0, 100, 100), 2, 2, None, Instant::now())
            .unwrap();
        assert_eq!(
            handle.cells(),
            &[
                (0, 0, 50, 50),
                (50, 0, 50, 50),
                (0, 50, 50, 50),
                (50, 50, 50, 50),
            ]
        );
    }

    #[test]
    fn test_grid_offset_box() {
        let mut queue = AnnotationQueue::new();
        let handle = queue
            .post_highlight_group((10, 20, 60, 40), 1, 2, None, Instant::now())
            .unwrap();
        assert_eq!(handle.cells(), &[(10, 20, 30, 40), (40, 20, 30, 40)]);
    }

    #[test]
    fn test_grid_truncates_remainder() {
        let mut queue = AnnotationQueue::new();
        let handle = queue
            .post_highlight_group((0, 0, 101, 101), 3, 3, None, Instant::now())
            .unwrap();
        assert_eq!(handle.cells().len(), 9);
        for &(_, _, w, h) in handle.cells() {
            assert_eq!((w, h), (33, 33));
        }
        // Union of cell areas never exceeds the box area
        let union: i32 = handle.cells().iter().map(|&(_, _, w, h)| w * h).sum();
        assert!(union <= 101 * 101);
        // Last cell ends short of the box edge, the 2px remainder is uncovered
        let &(x, y, w, h) = handle.cells().last().unwrap();
        assert_eq!((x + w, y + h), (99, 99));
    }

    #[test]
    fn test_grid_rejects_bad_geometry() {
        let now = Instant::now();
        let mut queue = AnnotationQueue::new();
        assert!(queue.post_highlight_group((0, 0, 0, 100), 1, 1, None, now).is_none());
        assert!(queue.post_highlight_group((0, 0, 100, -5), 1, 1, None, now).is_none());
        assert!(queue.post_highlight_group((0, 0, 100, 100), 0, 1, None, now).is_none());
        assert!(queue.post_highlight_group((0, 0, 100, 100), 2, -2, None, now).is_none());
        assert!(queue.is_idle());
    }

    #[test]
    fn test_empty_message_is_noop() {
        let mut queue = AnnotationQueue::new();
        queue.post_message("", Some(ms(1000)), Instant::now());
        assert!(queue.message_cleared());
        assert!(queue.is_idle());
    }

    #[test]
    fn test_message_superseded() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.post_message("first", Some(ms(1000)), base);
        queue.post_message("second", None, base);
        // The permanent replacement outlives the first message's deadline
        queue.tick(base + ms(5000));
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert_eq!(surface.texts.len(), 1);
        assert_eq!(surface.texts[0].2, "second");
    }

    #[test]
    fn test_idle_requires_both_empty() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.post_message("working...", Some(ms(1000)), base);
        queue.post_highlight_group((0, 0, 100, 100), 1, 1, Some(ms(5000)), base);
        assert!(!queue.is_idle());

        // Message expires first, the group keeps the queue active
        queue.tick(base + ms(1000));
        assert!(queue.message_cleared());
        assert!(!queue.highlights_cleared());
        assert!(!queue.is_idle());

        queue.tick(base + ms(5000));
        assert!(queue.is_idle());
    }

    #[test]
    fn test_expiry_removes_whole_group_at_once() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.post_highlight_group((0, 0, 100, 100), 2, 2, Some(ms(1000)), base);

        queue.tick(base + ms(999));
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert_eq!(surface.rects.len(), 4);

        assert!(queue.tick(base + ms(1000)));
        assert!(queue.is_idle());
    }

    #[test]
    fn test_groups_expire_independently() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.post_highlight_group((0, 0, 10, 10), 1, 1, Some(ms(500)), base);
        let long = queue
            .post_highlight_group((20, 0, 10, 10), 1, 1, Some(ms(2000)), base)
            .unwrap();

        queue.tick(base + ms(500));
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert_eq!(surface.rects.len(), 1);
        assert_eq!(surface.rects[0].0, long.cells()[0]);
    }

    #[test]
    fn test_clear_removes_only_target_group() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        let first = queue.post_highlight_group((0, 0, 10, 10), 1, 1, None, base).unwrap();
        let second = queue.post_highlight_group((20, 0, 10, 10), 1, 1, None, base).unwrap();
        let third = queue.post_highlight_group((40, 0, 10, 10), 1, 1, None, base).unwrap();

        queue.clear_highlight_group(&second);
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        let drawn: Vec<PixelRect> = surface.rects.iter().map(|(r, _)| *r).collect();
        assert_eq!(drawn, vec![first.cells()[0], third.cells()[0]]);
    }

    #[test]
    fn test_clear_absent_handle_is_noop() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        let first = queue.post_highlight_group((0, 0, 10, 10), 1, 1, None, base).unwrap();
        let second = queue.post_highlight_group((20, 0, 10, 10), 1, 1, None, base).unwrap();

        queue.clear_highlight_group(&first);
        queue.clear_highlight_group(&first); // second removal finds nothing
        assert!(!queue.highlights_cleared());

        queue.clear_highlight_group(&second);
        assert!(queue.is_idle());
        queue.clear_highlight_group(&second);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_expiry_after_manual_clear_is_noop() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        let handle = queue
            .post_highlight_group((0, 0, 10, 10), 1, 1, Some(ms(1000)), base)
            .unwrap();
        let other = queue
            .post_highlight_group((20, 0, 10, 10), 1, 1, Some(ms(5000)), base)
            .unwrap();

        queue.clear_highlight_group(&handle);
        // The cleared group's deadline passes without touching the survivor
        assert!(!queue.tick(base + ms(1000)));
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert_eq!(surface.rects.len(), 1);
        assert_eq!(surface.rects[0].0, other.cells()[0]);
    }

    #[test]
    fn test_permanent_annotations_never_expire() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.post_message("hold", None, base);
        queue.post_highlight_group((0, 0, 10, 10), 1, 1, None, base);

        assert!(!queue.tick(base + Duration::from_secs(3600)));
        assert!(!queue.is_idle());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.post_message("msg", Some(ms(3000)), base);
        queue.post_highlight_group((0, 0, 10, 10), 1, 1, Some(ms(1000)), base);
        assert_eq!(queue.next_deadline(), Some(base + ms(1000)));
    }

    #[test]
    fn test_render_empty_draws_nothing() {
        let queue = AnnotationQueue::new();
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert!(surface.rects.is_empty());
        assert!(surface.texts.is_empty());
    }

    #[test]
    fn test_message_rendered_centered_near_top() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.post_message("Searching...", None, base);
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert_eq!(surface.texts.len(), 1);
        let (center_x, top_y, ref text, _) = surface.texts[0];
        assert_eq!(center_x, 400);
        assert_eq!(top_y, MESSAGE_TOP_OFFSET);
        assert_eq!(text, "Searching...");
    }

    #[test]
    fn test_invalid_color_keeps_previous() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.set_highlight_color("#00FF00");
        queue.set_highlight_color("not-a-color");
        queue.post_highlight_group((0, 0, 10, 10), 1, 1, None, base);
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert_eq!(surface.rects[0].1, Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_message_and_highlight_colors_independent() {
        let base = Instant::now();
        let mut queue = AnnotationQueue::new();
        queue.set_message_color("#FF0000");
        queue.set_highlight_color("#0000FF");
        queue.post_message("msg", None, base);
        queue.post_highlight_group((0, 0, 10, 10), 1, 1, None, base);
        let mut surface = RecordingSurface::new();
        queue.render(&mut surface);
        assert_eq!(surface.texts[0].3, Color32::from_rgb(255, 0, 0));
        assert_eq!(surface.rects[0].1, Color32::from_rgb(0, 0, 255));
    }
}
