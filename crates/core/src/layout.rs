//! Per-job horizontal layout: where a job starts, how wide it is drawn, and
//! whether it is drawn at all.

use buildlane_protocol::Rect;

use crate::config::RenderConfig;
use crate::math::clamp;
use crate::model::{Job, LaneMap};
use crate::viewport::Viewport;

/// Horizontal extent of a job, relative to the start of the timeline area
/// (the lane header is not included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f64,
    pub width: f64,
}

/// Lay out `job` against the viewport.
///
/// `next_start` is the start offset of the following job on the same lane,
/// if known. Returns `None` when the job should neither be drawn nor be
/// hit-testable in this pass.
pub fn layout_span(
    job: &Job,
    next_start: Option<f64>,
    viewport: &Viewport,
    config: &RenderConfig,
) -> Option<Span> {
    let accepted_start = viewport.start.max(job.start);
    let left = viewport.minimum_left().max(viewport.to_pixels(job.start));
    let max_width = viewport.max_width(config.right_edge_headroom).max(0.0);

    let mut width = clamp(
        viewport.to_pixels(job.end - accepted_start),
        0.0,
        max_width,
    );

    let threshold = config.short_job_width_threshold;
    if width < threshold {
        width = borrowed_width(accepted_start, next_start, viewport.scaling, threshold);
    }

    // `left` can be negative when the window is scrolled past the job.
    if width < 1.0 || !left.is_finite() || left + width < 1.0 {
        return None;
    }

    Some(Span { left, width })
}

/// Width of a job too short to show on its own: it extends into the gap
/// before the next job, never past `threshold`, and takes the full
/// `threshold` when nothing follows it.
pub fn borrowed_width(
    accepted_start: f64,
    next_start: Option<f64>,
    scaling: f64,
    threshold: f64,
) -> f64 {
    match next_start {
        Some(next) => clamp((next - accepted_start) * scaling, 0.0, threshold),
        None => threshold,
    }
}

/// Place a span on its lane.
pub fn job_rect(span: Span, lane_top: f64, lanes: &LaneMap) -> Rect {
    Rect::new(
        span.left + lanes.header_width,
        lane_top,
        span.width,
        lanes.job_height,
    )
}
