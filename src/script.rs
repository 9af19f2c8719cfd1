//! Stroke scripts: recorded UI events replayed against a workspace.
//!
//! A script is a YAML (or JSON) document with an optional viewport and a
//! list of actions. Pointer positions are viewport coordinates and go
//! through the same mapping a live UI would use.
//!
//! ```yaml
//! viewport: { left: 0, top: 0, width: 1000, height: 500 }
//! actions:
//!   - action: brush
//!     size: 12
//!   - action: down
//!     x: 10
//!     y: 10
//!   - action: move
//!     x: 40
//!     y: 10
//!   - action: up
//!   - action: undo
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CutoutError, Result};
use crate::types::{BrushMode, Point, ViewportRect};
use crate::workspace::Workspace;

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Rendered canvas rectangle. Without one, positions are canvas pixels.
    #[serde(default)]
    pub viewport: Option<ViewportRect>,

    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One UI event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Select `erase` or `restore`.
    Mode { mode: String },
    /// Set the brush diameter.
    Brush { size: f32 },
    /// Pointer pressed.
    Down { x: f32, y: f32 },
    /// Pointer moved.
    Move { x: f32, y: f32 },
    /// Pointer released or left the canvas.
    Up,
    Undo,
    Redo,
    /// Switch manual mode (reloads the original or the processed image).
    Manual { enabled: bool },
    /// The canvas was re-laid out on screen.
    Viewport(ViewportRect),
}

/// Counts of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub strokes: usize,
    pub undos: usize,
    pub redos: usize,
    pub reloads: usize,
}

impl Script {
    /// Load a script, choosing JSON for `.json` files and YAML otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CutoutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read script: {}", e),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&content),
            _ => Self::parse_yaml(&content),
        }
    }

    pub fn parse_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| CutoutError::Parse {
            message: format!("Invalid stroke script: {}", e),
            help: Some("Each action needs an `action:` key (mode, brush, down, move, up, undo, redo, manual, viewport)".to_string()),
        })
    }

    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CutoutError::Parse {
            message: format!("Invalid stroke script: {}", e),
            help: None,
        })
    }

    /// Replay every action in order.
    ///
    /// Stops at the first action the editor rejects (an unknown mode or a
    /// non-positive brush size).
    pub fn replay(&self, workspace: &mut Workspace) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();
        workspace.set_viewport(self.viewport);

        for (i, action) in self.actions.iter().enumerate() {
            log::debug!("Action {}: {:?}", i + 1, action);

            match action {
                Action::Mode { mode } => {
                    let mode: BrushMode = mode.parse()?;
                    workspace.editor_mut().set_mode(mode);
                }
                Action::Brush { size } => workspace.editor_mut().set_brush_size(*size)?,
                Action::Down { x, y } => workspace.pointer_down(Point::new(*x, *y)),
                Action::Move { x, y } => workspace.pointer_move(Point::new(*x, *y)),
                Action::Up => {
                    if workspace.editor().session().is_active() {
                        summary.strokes += 1;
                    }
                    workspace.pointer_up();
                }
                Action::Undo => {
                    if workspace.editor().can_undo() {
                        summary.undos += 1;
                    }
                    workspace.editor_mut().undo();
                }
                Action::Redo => {
                    if workspace.editor().can_redo() {
                        summary.redos += 1;
                    }
                    workspace.editor_mut().redo();
                }
                Action::Manual { enabled } => {
                    workspace.set_manual(*enabled)?;
                    summary.reloads += 1;
                }
                Action::Viewport(rect) => workspace.set_viewport(Some(*rect)),
            }
        }

        Ok(summary)
    }
}
