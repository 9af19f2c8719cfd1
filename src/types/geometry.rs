//! Points and rectangles shared by the editor and its controllers.

use serde::{Deserialize, Serialize};

/// A position in either viewport or canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Squared distance from this point to the segment `a`-`b`.
    ///
    /// A zero-length segment degrades to the distance to `a`.
    pub fn distance_sq_to_segment(self, a: Point, b: Point) -> f32 {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let ab2 = abx * abx + aby * aby;

        if ab2 <= f32::EPSILON {
            return self.distance_sq(a);
        }

        let t = ((self.x - a.x) * abx + (self.y - a.y) * aby) / ab2;
        let t = t.clamp(0.0, 1.0);

        self.distance_sq(Point::new(a.x + t * abx, a.y + t * aby))
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// The on-screen bounding rectangle of the rendered canvas, in viewport
/// coordinates. Its size may differ from the backing buffer because of CSS
/// scaling and device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect at the origin rendered at exactly the buffer size (1:1 mapping).
    pub fn identity(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// True when the rect has no usable area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
