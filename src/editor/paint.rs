//! Brush rasterization.
//!
//! A stroke segment is a capsule: every pixel whose centre lies within half
//! the brush width of the segment is covered. That gives round caps and round
//! joins between consecutive segments, and a zero-length segment paints a dot.
//! Coverage is binary so erasing and restoring the same path touch exactly the
//! same pixels.

use image::{Rgba, RgbaImage};

use crate::types::Point;

/// Fully transparent pixel written by erase strokes.
pub const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// What to do with each covered pixel.
#[derive(Debug, Clone, Copy)]
pub enum PaintOp<'a> {
    /// Replace with a transparent pixel.
    Erase,
    /// Copy the pixel at the same coordinates of the source. Painting the
    /// same pixel again leaves it unchanged.
    Restore(&'a RgbaImage),
}

/// Paint one capsule segment from `from` to `to` onto `canvas`.
///
/// Returns the number of pixels covered. Segments entirely outside the
/// canvas, non-positive widths and non-finite coordinates paint nothing.
pub fn paint_segment(
    canvas: &mut RgbaImage,
    from: Point,
    to: Point,
    width: f32,
    op: PaintOp<'_>,
) -> usize {
    let radius = width / 2.0;
    if !(radius > 0.0) || !radius.is_finite() {
        return 0;
    }
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return 0;
    }

    let Some((x0, y0, x1, y1)) = covered_bounds(canvas, from, to, radius) else {
        return 0;
    };

    let radius_sq = radius * radius;
    let mut covered = 0;

    for y in y0..y1 {
        for x in x0..x1 {
            let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if centre.distance_sq_to_segment(from, to) > radius_sq {
                continue;
            }

            match op {
                PaintOp::Erase => canvas.put_pixel(x, y, CLEAR),
                PaintOp::Restore(source) => {
                    if x >= source.width() || y >= source.height() {
                        continue;
                    }
                    canvas.put_pixel(x, y, *source.get_pixel(x, y));
                }
            }
            covered += 1;
        }
    }

    covered
}

/// Pixel bounds `[x0, x1) x [y0, y1)` of the capsule clipped to the canvas.
fn covered_bounds(canvas: &RgbaImage, from: Point, to: Point, radius: f32) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);

    let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
    let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
    let max_x = (from.x.max(to.x) + radius).ceil().min(w);
    let max_y = (from.y.max(to.y) + radius).ceil().min(h);

    if min_x >= max_x || min_y >= max_y {
        return None;
    }

    Some((min_x as u32, min_y as u32, max_x as u32, max_y as u32))
}
