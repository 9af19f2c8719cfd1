//! Core value types shared by the editor and the workspace.
//!
//! - `Point` - a position in canvas or viewport pixels
//! - `ViewportRect` - where the canvas is drawn on screen
//! - `BrushMode` - erase or restore

mod geometry;
mod mode;

pub use geometry::{Point, ViewportRect};
pub use mode::BrushMode;
