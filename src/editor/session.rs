//! Stroke session state.

use crate::types::{BrushMode, Point};

/// Whether a stroke is in progress between pointer-down and pointer-up.
///
/// Mode and width are captured when the stroke begins, so changing either
/// mid-stroke only affects the next stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeSession {
    #[default]
    Idle,
    Active {
        mode: BrushMode,
        width: f32,
        last: Point,
    },
}

impl StrokeSession {
    pub fn is_active(&self) -> bool {
        matches!(self, StrokeSession::Active { .. })
    }

    /// Last recorded position of an active stroke.
    pub fn last_position(&self) -> Option<Point> {
        match self {
            StrokeSession::Active { last, .. } => Some(*last),
            StrokeSession::Idle => None,
        }
    }
}
