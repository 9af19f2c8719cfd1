//! cutout - background removal with erase/restore touch-up
//!
//! A raster brush editor that loads an image with its background removed,
//! lets strokes erase pixels or paint the original back in, keeps a bounded
//! undo/redo history and exports the result as PNG.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod output;
pub mod script;
pub mod types;
pub mod workspace;

pub use config::Config;
pub use editor::{fit_dimensions, map_to_canvas, History, RasterBrushEditor, StrokeSession};
pub use error::{CutoutError, Result};
pub use script::{Action, ReplaySummary, Script};
pub use types::{BrushMode, Point, ViewportRect};
pub use workspace::{BackgroundRemover, CommandRemover, PassthroughRemover, Stage, Workspace, WorkspaceOptions};
