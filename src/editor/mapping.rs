//! Viewport to canvas coordinate mapping.

use crate::types::{Point, ViewportRect};

/// Map a pointer position in viewport coordinates to canvas pixel space.
///
/// `rect` is the rendered bounding box of the canvas and `buffer` the backing
/// pixel dimensions. Returns `None` when the rect has no area. The rendered
/// size can change between events, so callers map every event afresh.
pub fn map_to_canvas(pointer: Point, rect: &ViewportRect, buffer: (u32, u32)) -> Option<Point> {
    if rect.is_degenerate() {
        return None;
    }

    let scale_x = buffer.0 as f32 / rect.width;
    let scale_y = buffer.1 as f32 / rect.height;

    Some(Point::new(
        (pointer.x - rect.left) * scale_x,
        (pointer.y - rect.top) * scale_y,
    ))
}
