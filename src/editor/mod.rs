//! Raster brush editor.
//!
//! The editor owns a single RGBA canvas, the source image used by restore
//! strokes, the current stroke session and a bounded undo/redo history of
//! full canvas snapshots.
//!
//! # Example
//!
//! ```ignore
//! use cutout::editor::RasterBrushEditor;
//! use cutout::types::{BrushMode, Point};
//!
//! let mut editor = RasterBrushEditor::new();
//! editor.load_image(&image, 2000)?;
//! editor.set_mode(BrushMode::Erase);
//! editor.begin_stroke(Point::new(10.0, 10.0));
//! editor.continue_stroke(Point::new(40.0, 12.0));
//! editor.end_stroke();
//! let png = editor.export_png()?;
//! ```

mod history;
mod mapping;
mod paint;
mod session;

use std::io::Cursor;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{CutoutError, Result};
use crate::types::{BrushMode, Point};

pub use history::{History, DEFAULT_MAX_HISTORY};
pub use mapping::map_to_canvas;
pub use paint::{paint_segment, PaintOp, CLEAR};
pub use session::StrokeSession;

/// Longest edge a loaded image is scaled down to by default.
pub const DEFAULT_MAX_DIMENSION: u32 = 2000;

/// Default brush diameter in canvas pixels.
pub const DEFAULT_BRUSH_SIZE: f32 = 30.0;

/// Everything that belongs to one loaded image.
#[derive(Debug)]
struct Document {
    canvas: RgbaImage,
    source: Arc<RgbaImage>,
    history: History<RgbaImage>,
}

/// Erase/restore brush editor over a single raster canvas.
#[derive(Debug)]
pub struct RasterBrushEditor {
    document: Option<Document>,
    mode: BrushMode,
    brush_size: f32,
    max_history: usize,
    session: StrokeSession,
}

impl RasterBrushEditor {
    /// Create an editor with the default history depth and brush.
    pub fn new() -> Self {
        Self {
            document: None,
            mode: BrushMode::default(),
            brush_size: DEFAULT_BRUSH_SIZE,
            max_history: DEFAULT_MAX_HISTORY,
            session: StrokeSession::Idle,
        }
    }

    /// Create an editor keeping at most `max_history` snapshots.
    pub fn with_max_history(max_history: usize) -> Result<Self> {
        if max_history == 0 {
            return Err(CutoutError::InvalidArgument {
                message: "History depth must be at least 1".to_string(),
                help: Some("The freshly loaded image always occupies one slot".to_string()),
            });
        }

        Ok(Self {
            max_history,
            ..Self::new()
        })
    }

    /// Load an image, replacing the canvas, the source image and the history.
    ///
    /// Images larger than `max_dimension` on either axis are scaled down
    /// proportionally; smaller images are drawn at their own size. Any stroke
    /// in progress is dropped.
    pub fn load_image(&mut self, image: &DynamicImage, max_dimension: u32) -> Result<()> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(CutoutError::InvalidInput {
                message: format!("Image has no pixels ({}x{})", width, height),
                help: Some("Both width and height must be at least 1".to_string()),
            });
        }
        if max_dimension == 0 {
            return Err(CutoutError::argument("Maximum dimension must be at least 1"));
        }

        let (fit_w, fit_h) = fit_dimensions(width, height, max_dimension);
        let drawn = if (fit_w, fit_h) == (width, height) {
            image.to_rgba8()
        } else {
            image.resize_exact(fit_w, fit_h, FilterType::Triangle).to_rgba8()
        };

        log::info!("Loaded {}x{} image onto a {}x{} canvas", width, height, fit_w, fit_h);

        let mut history = History::new(self.max_history);
        history.reset(drawn.clone());

        self.document = Some(Document {
            source: Arc::new(drawn.clone()),
            canvas: drawn,
            history,
        });
        self.session = StrokeSession::Idle;

        Ok(())
    }

    /// Choose the paint mode for the next stroke.
    pub fn set_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
    }

    /// Set the brush diameter for the next stroke.
    ///
    /// Zero, negative and non-finite sizes are rejected.
    pub fn set_brush_size(&mut self, size: f32) -> Result<()> {
        if !(size > 0.0 && size.is_finite()) {
            return Err(CutoutError::InvalidArgument {
                message: format!("Brush size must be a positive number, got {}", size),
                help: None,
            });
        }
        self.brush_size = size;
        Ok(())
    }

    /// Start a stroke at `position` (canvas pixels) and paint a dot there.
    ///
    /// An active stroke is replaced without committing anything; its pixels
    /// stay on the canvas and are committed with the next `end_stroke`.
    pub fn begin_stroke(&mut self, position: Point) {
        if self.document.is_none() {
            return;
        }
        if self.session.is_active() {
            log::debug!("Stroke restarted at ({}, {}) before the previous one ended", position.x, position.y);
        }

        self.session = StrokeSession::Active {
            mode: self.mode,
            width: self.brush_size,
            last: position,
        };
        self.paint(position, position);
    }

    /// Extend the active stroke to `position`. No-op when idle.
    pub fn continue_stroke(&mut self, position: Point) {
        let Some(from) = self.session.last_position() else {
            return;
        };

        self.paint(from, position);

        if let StrokeSession::Active { last, .. } = &mut self.session {
            *last = position;
        }
    }

    /// Finish the active stroke and record it in the history. No-op when idle.
    pub fn end_stroke(&mut self) {
        if !self.session.is_active() {
            return;
        }
        self.session = StrokeSession::Idle;

        if let Some(doc) = &mut self.document {
            doc.history.commit(doc.canvas.clone());
            log::debug!(
                "Committed stroke ({} of {} history states, cursor {})",
                doc.history.len(),
                doc.history.capacity(),
                doc.history.index()
            );
        }
    }

    /// Step back one history state. No-op at the oldest state.
    pub fn undo(&mut self) {
        if let Some(doc) = &mut self.document {
            if let Some(snapshot) = doc.history.undo() {
                doc.canvas.clone_from(snapshot);
                log::debug!("Undo to history state {}", doc.history.index());
            }
        }
    }

    /// Step forward one history state. No-op at the newest state.
    pub fn redo(&mut self) {
        if let Some(doc) = &mut self.document {
            if let Some(snapshot) = doc.history.redo() {
                doc.canvas.clone_from(snapshot);
                log::debug!("Redo to history state {}", doc.history.index());
            }
        }
    }

    /// Encode the current canvas as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let canvas = self
            .canvas()
            .ok_or_else(|| CutoutError::input("Nothing to export: no image is loaded"))?;

        let mut bytes = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| CutoutError::Encode {
                message: format!("Failed to encode PNG: {}", e),
            })?;

        Ok(bytes)
    }

    /// The live canvas, if an image is loaded.
    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.document.as_ref().map(|doc| &doc.canvas)
    }

    /// The source image used by restore strokes, at canvas size.
    pub fn source(&self) -> Option<&RgbaImage> {
        self.document.as_ref().map(|doc| &*doc.source)
    }

    /// Canvas dimensions as (width, height).
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.canvas().map(|c| c.dimensions())
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    /// Number of stored history states (0 before the first load).
    pub fn history_len(&self) -> usize {
        self.document.as_ref().map_or(0, |doc| doc.history.len())
    }

    /// Index of the displayed history state.
    pub fn history_index(&self) -> usize {
        self.document.as_ref().map_or(0, |doc| doc.history.index())
    }

    pub fn can_undo(&self) -> bool {
        self.document.as_ref().is_some_and(|doc| doc.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.document.as_ref().is_some_and(|doc| doc.history.can_redo())
    }

    /// Paint one segment with the active session's mode and width.
    fn paint(&mut self, from: Point, to: Point) {
        let StrokeSession::Active { mode, width, .. } = self.session else {
            return;
        };
        let Some(Document { canvas, source, .. }) = &mut self.document else {
            return;
        };

        let op = match mode {
            BrushMode::Erase => PaintOp::Erase,
            BrushMode::Restore => PaintOp::Restore(&**source),
        };
        paint_segment(canvas, from, to, width, op);
    }
}

impl Default for RasterBrushEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Fit `width` x `height` inside `max_dimension` while keeping the aspect ratio.
///
/// The longer edge becomes `max_dimension` and the shorter one is truncated,
/// never below 1. Images that already fit are returned unchanged.
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    let max = max_dimension as u64;
    if width > height {
        let h = (max * height as u64 / width as u64).max(1);
        (max_dimension, h as u32)
    } else {
        let w = (max * width as u64 / height as u64).max(1);
        (w as u32, max_dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    fn loaded(width: u32, height: u32, max_history: usize) -> RasterBrushEditor {
        let mut editor = RasterBrushEditor::with_max_history(max_history).unwrap();
        editor.load_image(&gradient(width, height), DEFAULT_MAX_DIMENSION).unwrap();
        editor
    }

    /// Erase a short horizontal stroke on row `y`.
    fn stroke(editor: &mut RasterBrushEditor, y: f32) {
        editor.begin_stroke(Point::new(2.0, y));
        editor.continue_stroke(Point::new(10.0, y));
        editor.end_stroke();
    }

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_dimensions(4000, 2000, 2000), (2000, 1000));
        assert_eq!(fit_dimensions(1000, 3000, 2000), (666, 2000));
        assert_eq!(fit_dimensions(2500, 2500, 2000), (2000, 2000));
        assert_eq!(fit_dimensions(640, 480, 2000), (640, 480));
        assert_eq!(fit_dimensions(5000, 1, 100), (100, 1));
    }

    #[test]
    fn test_load_downscales_large_image() {
        let mut editor = RasterBrushEditor::new();
        editor.load_image(&gradient(400, 100), 200).unwrap();

        assert_eq!(editor.dimensions(), Some((200, 50)));
        assert_eq!(editor.source().unwrap().dimensions(), (200, 50));
        assert_eq!(editor.history_len(), 1);
        assert_eq!(editor.history_index(), 0);
    }

    #[test]
    fn test_load_does_not_upscale() {
        let image = gradient(30, 20);
        let mut editor = RasterBrushEditor::new();
        editor.load_image(&image, 2000).unwrap();

        assert_eq!(editor.dimensions(), Some((30, 20)));
        assert_eq!(editor.canvas().unwrap(), &image.to_rgba8());
    }

    #[test]
    fn test_load_rejects_empty_image_and_zero_limit() {
        let mut editor = RasterBrushEditor::new();
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 10));
        assert!(matches!(
            editor.load_image(&empty, 2000),
            Err(CutoutError::InvalidInput { .. })
        ));
        assert!(matches!(
            editor.load_image(&gradient(4, 4), 0),
            Err(CutoutError::InvalidArgument { .. })
        ));
        assert!(!editor.is_loaded());
    }

    #[test]
    fn test_reload_resets_history_and_session() {
        let mut editor = loaded(20, 20, 10);
        stroke(&mut editor, 5.0);
        editor.begin_stroke(Point::new(3.0, 3.0));

        editor.load_image(&gradient(12, 8), 2000).unwrap();

        assert_eq!(editor.history_len(), 1);
        assert!(!editor.session().is_active());
        assert_eq!(editor.dimensions(), Some((12, 8)));
    }

    #[test]
    fn test_with_max_history_rejects_zero() {
        assert!(RasterBrushEditor::with_max_history(0).is_err());
        assert_eq!(RasterBrushEditor::with_max_history(3).unwrap().max_history(), 3);
    }

    #[test]
    fn test_brush_size_validation() {
        let mut editor = RasterBrushEditor::new();
        assert!(editor.set_brush_size(0.0).is_err());
        assert!(editor.set_brush_size(-4.0).is_err());
        assert!(editor.set_brush_size(f32::INFINITY).is_err());
        assert_eq!(editor.brush_size(), DEFAULT_BRUSH_SIZE);

        editor.set_brush_size(12.5).unwrap();
        assert_eq!(editor.brush_size(), 12.5);
    }

    #[test]
    fn test_single_click_paints_dot() {
        let mut editor = loaded(20, 20, 10);
        editor.set_brush_size(4.0).unwrap();

        editor.begin_stroke(Point::new(10.0, 10.0));
        editor.end_stroke();

        assert_eq!(*editor.canvas().unwrap().get_pixel(10, 10), CLEAR);
        assert_eq!(editor.history_len(), 2);
    }

    #[test]
    fn test_strokes_without_image_are_ignored() {
        let mut editor = RasterBrushEditor::new();
        editor.begin_stroke(Point::new(1.0, 1.0));
        editor.continue_stroke(Point::new(2.0, 2.0));
        editor.end_stroke();
        editor.undo();
        editor.redo();

        assert!(!editor.session().is_active());
        assert_eq!(editor.history_len(), 0);
        assert!(editor.export_png().is_err());
    }

    #[test]
    fn test_continue_and_end_without_begin_are_no_ops() {
        let mut editor = loaded(16, 16, 10);
        let before = editor.canvas().unwrap().clone();

        editor.continue_stroke(Point::new(8.0, 8.0));
        editor.end_stroke();

        assert_eq!(editor.canvas().unwrap(), &before);
        assert_eq!(editor.history_len(), 1);
    }

    #[test]
    fn test_mode_change_applies_to_next_stroke() {
        let mut editor = loaded(20, 20, 10);
        editor.set_brush_size(4.0).unwrap();
        editor.begin_stroke(Point::new(5.0, 5.0));

        // Switching mid-stroke keeps erasing.
        editor.set_mode(BrushMode::Restore);
        editor.continue_stroke(Point::new(15.0, 5.0));
        editor.end_stroke();

        assert_eq!(*editor.canvas().unwrap().get_pixel(14, 5), CLEAR);
        assert_eq!(editor.mode(), BrushMode::Restore);
    }

    #[test]
    fn test_restart_while_active_replaces_session() {
        let mut editor = loaded(20, 20, 10);
        editor.set_brush_size(2.0).unwrap();

        editor.begin_stroke(Point::new(2.0, 2.0));
        editor.begin_stroke(Point::new(15.0, 15.0));
        editor.continue_stroke(Point::new(15.0, 18.0));

        assert_eq!(editor.session().last_position(), Some(Point::new(15.0, 18.0)));
        // The abandoned start stays painted.
        assert_eq!(*editor.canvas().unwrap().get_pixel(2, 2), CLEAR);
        // Nothing between the two starts was painted.
        assert_ne!(*editor.canvas().unwrap().get_pixel(8, 8), CLEAR);

        editor.end_stroke();
        assert_eq!(editor.history_len(), 2);
    }

    #[test]
    fn test_undo_returns_to_loaded_image() {
        let mut editor = loaded(20, 20, 10);
        let original = editor.canvas().unwrap().clone();

        for i in 0..5 {
            stroke(&mut editor, 2.0 + i as f32 * 3.0);
        }
        assert_eq!(editor.history_len(), 6);

        for _ in 0..5 {
            editor.undo();
        }
        assert_eq!(editor.canvas().unwrap(), &original);
        assert!(!editor.can_undo());

        // Extra undo is a no-op.
        editor.undo();
        assert_eq!(editor.history_index(), 0);
    }

    #[test]
    fn test_redo_reapplies_stroke() {
        let mut editor = loaded(20, 20, 10);
        stroke(&mut editor, 5.0);
        let after = editor.canvas().unwrap().clone();

        editor.undo();
        assert_ne!(editor.canvas().unwrap(), &after);

        editor.redo();
        assert_eq!(editor.canvas().unwrap(), &after);

        // At the tail, redo does nothing.
        editor.redo();
        assert_eq!(editor.history_index(), 1);
    }

    #[test]
    fn test_new_stroke_after_undo_drops_redo() {
        let mut editor = loaded(20, 20, 10);
        stroke(&mut editor, 3.0);
        stroke(&mut editor, 9.0);

        editor.undo();
        stroke(&mut editor, 15.0);
        let current = editor.canvas().unwrap().clone();

        assert!(!editor.can_redo());
        editor.redo();
        assert_eq!(editor.canvas().unwrap(), &current);
        assert_eq!(editor.history_len(), 3);
    }

    #[test]
    fn test_history_is_capped() {
        let mut editor = loaded(20, 20, 4);
        for i in 0..7 {
            stroke(&mut editor, 1.0 + i as f32 * 2.5);
        }

        assert_eq!(editor.history_len(), 4);
        for _ in 0..10 {
            editor.undo();
        }
        assert_eq!(editor.history_index(), 0);
    }

    #[test]
    fn test_erase_then_restore_reproduces_source() {
        let mut editor = loaded(32, 32, 10);
        editor.set_brush_size(6.0).unwrap();
        let path = [Point::new(4.0, 4.0), Point::new(20.0, 9.0), Point::new(26.0, 27.0)];

        for mode in [BrushMode::Erase, BrushMode::Restore] {
            editor.set_mode(mode);
            editor.begin_stroke(path[0]);
            for p in &path[1..] {
                editor.continue_stroke(*p);
            }
            editor.end_stroke();
        }

        assert_eq!(editor.canvas().unwrap(), editor.source().unwrap());
    }

    #[test]
    fn test_restore_keeps_soft_matte_edges() {
        let matte = RgbaImage::from_fn(40, 20, |x, _| Rgba([10, 200, 30, if x < 20 { 128 } else { 64 }]));
        let mut editor = RasterBrushEditor::new();
        editor.load_image(&DynamicImage::ImageRgba8(matte), DEFAULT_MAX_DIMENSION).unwrap();
        editor.set_brush_size(6.0).unwrap();

        let path = [Point::new(5.0, 10.0), Point::new(20.0, 10.0), Point::new(35.0, 10.0)];
        let run = |editor: &mut RasterBrushEditor, mode: BrushMode| {
            editor.set_mode(mode);
            editor.begin_stroke(path[0]);
            for p in &path[1..] {
                editor.continue_stroke(*p);
            }
            editor.end_stroke();
        };

        run(&mut editor, BrushMode::Erase);
        assert_eq!(*editor.canvas().unwrap().get_pixel(20, 10), CLEAR);
        run(&mut editor, BrushMode::Restore);
        assert_eq!(editor.canvas().unwrap(), editor.source().unwrap());

        // A second pass over pixels that were never erased changes nothing.
        run(&mut editor, BrushMode::Restore);
        assert_eq!(editor.canvas().unwrap(), editor.source().unwrap());
        assert_eq!(editor.canvas().unwrap().get_pixel(20, 10).0, [10, 200, 30, 64]);
    }

    #[test]
    fn test_export_png_round_trips_canvas() {
        let mut editor = loaded(8, 6, 10);
        editor.set_brush_size(3.0).unwrap();
        editor.begin_stroke(Point::new(4.0, 3.0));
        editor.end_stroke();

        let png = editor.export_png().unwrap();
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgba8();

        assert_eq!(&decoded, editor.canvas().unwrap());
    }
}
