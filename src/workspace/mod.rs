//! Editing workspace: upload, background removal and pointer routing.
//!
//! A [`Workspace`] plays the part of the page controller around a
//! [`RasterBrushEditor`]. It keeps the uploaded bytes and the processed
//! result, moves between the upload, processing and editor stages, and maps
//! pointer events from viewport coordinates into canvas pixels before
//! handing them to the editor.

mod decode;
mod remover;

use std::fmt;

use crate::editor::{
    map_to_canvas, RasterBrushEditor, DEFAULT_BRUSH_SIZE, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_HISTORY,
};
use crate::error::{CutoutError, Result};
use crate::types::{BrushMode, Point, ViewportRect};

pub use decode::{decode_image, sniff_format};
pub use remover::{BackgroundRemover, CommandRemover, PassthroughRemover};

/// Where the user is in the upload-to-edit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for an image.
    Upload,
    /// The remover is running.
    Processing,
    /// An image is loaded into the editor.
    Editor,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Upload => write!(f, "upload"),
            Stage::Processing => write!(f, "processing"),
            Stage::Editor => write!(f, "editor"),
        }
    }
}

/// Editor settings applied when a workspace is created.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceOptions {
    pub max_dimension: u32,
    pub max_history: usize,
    pub brush_size: f32,
    pub mode: BrushMode,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_history: DEFAULT_MAX_HISTORY,
            brush_size: DEFAULT_BRUSH_SIZE,
            mode: BrushMode::default(),
        }
    }
}

/// Controller that owns the editor for one editing session.
pub struct Workspace {
    editor: RasterBrushEditor,
    remover: Box<dyn BackgroundRemover>,
    max_dimension: u32,
    stage: Stage,
    original: Option<Vec<u8>>,
    processed: Option<Vec<u8>>,
    manual: bool,
    viewport: Option<ViewportRect>,
}

impl Workspace {
    /// Create a workspace around `remover` with the given editor settings.
    pub fn new(remover: impl BackgroundRemover + 'static, options: WorkspaceOptions) -> Result<Self> {
        if options.max_dimension == 0 {
            return Err(CutoutError::argument("Maximum dimension must be at least 1"));
        }

        let mut editor = RasterBrushEditor::with_max_history(options.max_history)?;
        editor.set_brush_size(options.brush_size)?;
        editor.set_mode(options.mode);

        Ok(Self {
            editor,
            remover: Box::new(remover),
            max_dimension: options.max_dimension,
            stage: Stage::Upload,
            original: None,
            processed: None,
            manual: false,
            viewport: None,
        })
    }

    /// Upload an image, remove its background and load the result.
    ///
    /// Bytes that are not an image are rejected before anything changes. A
    /// remover failure discards the upload and returns to the upload stage.
    pub fn upload(&mut self, bytes: Vec<u8>) -> Result<()> {
        decode_image(&bytes)?;

        self.stage = Stage::Processing;
        log::info!("Removing background from {} byte upload", bytes.len());

        let result = self
            .remover
            .remove_background(&bytes)
            .and_then(|processed| {
                let image = decode_image(&processed).map_err(|e| CutoutError::Upstream {
                    message: format!("Remover returned an unreadable image: {}", e),
                    help: None,
                })?;
                Ok((processed, image))
            });

        let (processed, image) = match result {
            Ok(ok) => ok,
            Err(e) => {
                log::warn!("Background removal failed, back to upload: {}", e);
                self.abandon_upload();
                return Err(e);
            }
        };

        if let Err(e) = self.editor.load_image(&image, self.max_dimension) {
            log::warn!("Processed image could not be loaded, back to upload: {}", e);
            self.abandon_upload();
            return Err(e);
        }
        self.original = Some(bytes);
        self.processed = Some(processed);
        self.manual = false;
        self.stage = Stage::Editor;

        Ok(())
    }

    fn abandon_upload(&mut self) {
        self.stage = Stage::Upload;
        self.original = None;
        self.processed = None;
    }

    /// Switch manual mode on or off.
    ///
    /// Turning it on reloads the original upload so the background can be
    /// removed by hand; turning it off reloads the processed result. Either
    /// way the editor's history starts over.
    ///
    /// The flag only changes once the image is on the canvas.
    pub fn set_manual(&mut self, enabled: bool) -> Result<()> {
        let bytes = if enabled { &self.original } else { &self.processed };
        if let Some(bytes) = bytes {
            let image = decode_image(bytes)?;
            self.editor.load_image(&image, self.max_dimension)?;
            log::info!("Manual mode {}", if enabled { "on" } else { "off" });
        }

        self.manual = enabled;
        Ok(())
    }

    /// Flip manual mode; returns the new state.
    pub fn toggle_manual(&mut self) -> Result<bool> {
        let enabled = !self.manual;
        self.set_manual(enabled)?;
        Ok(enabled)
    }

    /// Set the on-screen rectangle the canvas is rendered into.
    ///
    /// `None` maps pointer positions 1:1 onto the canvas.
    pub fn set_viewport(&mut self, viewport: Option<ViewportRect>) {
        self.viewport = viewport;
    }

    /// Map a viewport position to canvas pixels under the current viewport.
    pub fn to_canvas(&self, position: Point) -> Option<Point> {
        let buffer = self.editor.dimensions()?;
        let rect = self
            .viewport
            .unwrap_or_else(|| ViewportRect::identity(buffer.0, buffer.1));
        map_to_canvas(position, &rect, buffer)
    }

    /// Pointer pressed at a viewport position.
    pub fn pointer_down(&mut self, position: Point) {
        if let Some(p) = self.to_canvas(position) {
            self.editor.begin_stroke(p);
        }
    }

    /// Pointer moved to a viewport position.
    pub fn pointer_move(&mut self, position: Point) {
        if let Some(p) = self.to_canvas(position) {
            self.editor.continue_stroke(p);
        }
    }

    /// Pointer released or left the canvas.
    pub fn pointer_up(&mut self) {
        self.editor.end_stroke();
    }

    /// PNG bytes of the current canvas.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        self.editor.export_png()
    }

    pub fn editor(&self) -> &RasterBrushEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut RasterBrushEditor {
        &mut self.editor
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn viewport(&self) -> Option<ViewportRect> {
        self.viewport
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("stage", &self.stage)
            .field("manual", &self.manual)
            .field("dimensions", &self.editor.dimensions())
            .field("viewport", &self.viewport)
            .finish()
    }
}
