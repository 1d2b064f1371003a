use buildlane_protocol::{JobPaints, Rect, Thickness};

use crate::math::clamp;
use crate::surface::DrawSurface;

/// Largest corner radius a job shape gets.
pub const MAX_CORNER_RADIUS: f64 = 2.0;

/// How a job's background was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JobShape {
    Plain,
    Rounded { radius: f64 },
}

/// Shrink `bounds` by `margin`, keeping at least one pixel of width.
///
/// When the margins would leave less than a pixel, the rectangle is
/// recentred on where the padded rectangle would have been and forced to
/// exactly 1 px wide so the border stays visible.
pub fn padded_rect(bounds: Rect, margin: &Thickness) -> Rect {
    let mut left = bounds.x + margin.left;
    let mut width = bounds.w - margin.horizontal();

    if width < 1.0 || width.is_nan() {
        if width.is_finite() {
            left += (width - 1.0) / 2.0;
        }
        width = 1.0;
    }

    Rect::new(
        left,
        bounds.y + margin.top,
        width,
        (bounds.h - margin.vertical()).max(0.0),
    )
}

/// Radius for a job `width` px wide: zero at `threshold`, growing half a
/// pixel per pixel of extra width, capped at [`MAX_CORNER_RADIUS`].
pub fn corner_radius(width: f64, threshold: f64) -> f64 {
    clamp((width - threshold) / 2.0, 0.0, MAX_CORNER_RADIUS)
}

/// Pick the shape for a job whose unpadded width is `width`.
pub fn shape_for(width: f64, threshold: f64) -> JobShape {
    if width <= threshold {
        JobShape::Plain
    } else {
        JobShape::Rounded {
            radius: corner_radius(width, threshold),
        }
    }
}

/// Draw the background and border of a job.
///
/// `bounds` is the unpadded job rectangle and decides the shape; `padded`
/// is what actually gets drawn.
pub fn draw_job_shape<S: DrawSurface + ?Sized>(
    surface: &mut S,
    bounds: Rect,
    padded: Rect,
    paints: &JobPaints,
    threshold: f64,
) -> JobShape {
    let shape = shape_for(bounds.w, threshold);
    match shape {
        JobShape::Plain => surface.draw_rect(padded, &paints.background, paints.border.as_ref()),
        JobShape::Rounded { radius } => surface.draw_rounded_rect(
            padded,
            radius,
            &paints.background,
            paints.border.as_ref(),
        ),
    }
    shape
}
