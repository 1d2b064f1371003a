//! The per-frame render pass over all jobs.

use buildlane_protocol::{Paint, Point, Rect};
use serde::Serialize;

use crate::bounds::BoundsMap;
use crate::config::RenderConfig;
use crate::fade;
use crate::font::{FontMetrics, FontMetricsProvider};
use crate::layout;
use crate::model::{DisplayMode, Job, LaneMap, TimelineFrame};
use crate::shape::{self, JobShape};
use crate::surface::DrawSurface;
use crate::text::{self, Overflow};
use crate::viewport::Viewport;

/// Borrowed view of everything a pass reads. Nothing here may change while
/// the pass runs.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub jobs: &'a [Job],
    pub lanes: &'a LaneMap,
    pub viewport: &'a Viewport,
    pub mode: DisplayMode,
    /// Filled before any job is drawn.
    pub background: Option<(Rect, &'a Paint)>,
}

impl TimelineFrame {
    pub fn input(&self) -> FrameInput<'_> {
        FrameInput {
            jobs: &self.jobs,
            lanes: &self.lanes,
            viewport: &self.viewport,
            mode: self.mode,
            background: None,
        }
    }

    /// Canvas area covering the lane headers and the visible window, in the
    /// same coordinates the job bounds use.
    pub fn visible_area(&self, config: &RenderConfig) -> Rect {
        Rect::new(
            self.viewport.minimum_left(),
            0.0,
            self.lanes.header_width
                + self
                    .viewport
                    .max_width(config.right_edge_headroom)
                    .max(0.0),
            self.lanes.content_height(),
        )
    }
}

/// What a pass drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub drawn: usize,
    pub skipped: usize,
    pub labels: usize,
    pub overlays: usize,
}

/// Draws build jobs and remembers where each one ended up.
#[derive(Debug, Clone, Default)]
pub struct JobsRenderer {
    config: RenderConfig,
    fonts: FontMetricsProvider,
    bounds: BoundsMap,
}

impl JobsRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_fonts(config, FontMetricsProvider::new())
    }

    pub fn with_fonts(config: RenderConfig, fonts: FontMetricsProvider) -> Self {
        Self {
            config,
            fonts,
            bounds: BoundsMap::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn fonts(&self) -> &FontMetricsProvider {
        &self.fonts
    }

    /// For applying style changes between passes.
    pub fn fonts_mut(&mut self) -> &mut FontMetricsProvider {
        &mut self.fonts
    }

    /// Bounds of the jobs drawn by the latest pass.
    pub fn bounds(&self) -> &BoundsMap {
        &self.bounds
    }

    /// Lay out and draw every job of `frame` onto `surface`.
    ///
    /// The bounds map is replaced with the jobs drawn in this pass. Without
    /// font metrics only shapes are drawn.
    pub fn render<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        frame: &FrameInput<'_>,
    ) -> PassStats {
        self.bounds.clear();

        if let Some((area, paint)) = frame.background {
            surface.draw_rect(area, paint, None);
        }

        let text = self.fonts.metrics();

        let mut stats = PassStats::default();
        for job in frame.jobs {
            let next_start = job.next.map(|next| next.start);

            let Some(span) = layout::layout_span(job, next_start, frame.viewport, &self.config)
            else {
                stats.skipped += 1;
                continue;
            };
            let Some(top) = frame.lanes.top(job.lane) else {
                tracing::debug!(job = %job.id, lane = job.lane.0, "job on unknown lane skipped");
                stats.skipped += 1;
                continue;
            };

            let rect = layout::job_rect(span, top, frame.lanes);
            self.bounds.insert(job.id, rect);
            draw_job(surface, job, rect, frame.mode, text, &self.config, &mut stats);
            stats.drawn += 1;
        }

        tracing::trace!(
            drawn = stats.drawn,
            skipped = stats.skipped,
            labels = stats.labels,
            overlays = stats.overlays,
            "job render pass"
        );
        stats
    }
}

fn draw_job<S: DrawSurface + ?Sized>(
    surface: &mut S,
    job: &Job,
    rect: Rect,
    mode: DisplayMode,
    text: Option<&FontMetrics>,
    config: &RenderConfig,
    stats: &mut PassStats,
) {
    let padded = shape::padded_rect(rect, &config.job_margin);
    let paints = &*job.paints;

    let shape = shape::draw_job_shape(
        surface,
        rect,
        padded,
        paints,
        config.short_job_width_threshold,
    );
    if shape == JobShape::Plain {
        return;
    }

    if !fade::label_visible(mode, rect.w, config.textless_job_width_threshold) {
        return;
    }
    let Some(metrics) = text else {
        return;
    };

    let opacity = fade::label_opacity(rect.w, config.textless_job_width_threshold);
    let Some(label_paint) = fade::faded(&paints.foreground, opacity) else {
        return;
    };

    let margin = &config.label_margin;
    let origin = Point::new(
        padded.x + margin.left,
        padded.y + (padded.h - metrics.line_height()) / 2.0,
    );
    let run = text::fit_glyph_run(
        metrics,
        &job.name,
        origin,
        padded.w - margin.horizontal(),
        Overflow::Ellipsis,
    );
    surface.draw_glyph_run(&run, &label_paint);
    stats.labels += 1;

    if !job.status.is_building() {
        return;
    }

    let opacity = fade::elapsed_overlay_opacity(
        job.elapsed_seconds,
        config.elapsed_overlay_delay,
        config.elapsed_overlay_fade,
    );
    if let Some(overlay_paint) = fade::faded(&paints.foreground, opacity) {
        let run = text::fit_glyph_run(
            metrics,
            &fade::format_elapsed(job.elapsed_seconds),
            Point::new(origin.x + padded.w, origin.y),
            f64::INFINITY,
            Overflow::Clip,
        );
        surface.draw_glyph_run(&run, &overlay_paint);
        stats.overlays += 1;
    }
}
