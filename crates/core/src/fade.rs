//! Opacity rules for job labels and the elapsed-time overlay.

use std::borrow::Cow;

use buildlane_protocol::Paint;

use crate::math::unit;
use crate::model::DisplayMode;

/// Whether a job `width` px wide gets a label at all.
pub fn label_visible(mode: DisplayMode, width: f64, textless_threshold: f64) -> bool {
    mode == DisplayMode::Standard && width > textless_threshold
}

/// Label opacity: 0 up to `textless_threshold`, 1 from twice that, linear
/// in between.
pub fn label_opacity(width: f64, textless_threshold: f64) -> f64 {
    unit((width - textless_threshold) / textless_threshold)
}

/// Opacity of the elapsed-time overlay of a building job: invisible for the
/// first `delay` seconds, then fading in over `fade` seconds.
pub fn elapsed_overlay_opacity(elapsed_seconds: f64, delay: f64, fade: f64) -> f64 {
    let since = elapsed_seconds - delay;
    if fade > 0.0 {
        unit(since / fade)
    } else if since > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// The paint to draw with at `opacity`.
///
/// - `None` when nothing would be visible.
/// - The caller's paint, borrowed, at full opacity. This is the common case
///   for wide jobs and must not allocate: a frame can hold hundreds of them.
/// - An owned copy with reduced opacity only while fading.
pub fn faded(paint: &Paint, opacity: f64) -> Option<Cow<'_, Paint>> {
    if opacity.is_nan() || opacity <= 0.0 {
        None
    } else if opacity >= 1.0 {
        Some(Cow::Borrowed(paint))
    } else {
        Some(Cow::Owned(paint.with_opacity(opacity)))
    }
}

/// Overlay text for a job that has been building for `elapsed_seconds`,
/// to one decimal with ties rounded away from zero.
pub fn format_elapsed(elapsed_seconds: f64) -> String {
    let tenths = (elapsed_seconds * 10.0).round() / 10.0;
    format!("+{tenths:.1}")
}

#[cfg(test)]
mod tests {
    use buildlane_protocol::Color;

    use super::*;

    #[test]
    fn label_hidden_in_compact_mode() {
        assert!(label_visible(DisplayMode::Standard, 40.0, 36.0));
        assert!(!label_visible(DisplayMode::Compact, 400.0, 36.0));
        assert!(!label_visible(DisplayMode::Standard, 36.0, 36.0));
    }

    #[test]
    fn label_opacity_ramps_between_one_and_two_thresholds() {
        assert!(label_opacity(20.0, 36.0).abs() < f64::EPSILON);
        assert!(label_opacity(36.0, 36.0).abs() < f64::EPSILON);
        assert!((label_opacity(54.0, 36.0) - 0.5).abs() < f64::EPSILON);
        assert!((label_opacity(72.0, 36.0) - 1.0).abs() < f64::EPSILON);
        assert!((label_opacity(500.0, 36.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overlay_hidden_before_delay() {
        assert!(elapsed_overlay_opacity(3.5, 4.0, 1.0) <= 0.0);
        assert!(elapsed_overlay_opacity(4.0, 4.0, 1.0) <= 0.0);
    }

    #[test]
    fn overlay_fades_in_over_one_second() {
        assert!((elapsed_overlay_opacity(4.7, 4.0, 1.0) - 0.7).abs() < 1e-9);
        assert!((elapsed_overlay_opacity(5.0, 4.0, 1.0) - 1.0).abs() < f64::EPSILON);
        assert!((elapsed_overlay_opacity(90.0, 4.0, 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_fade_is_a_step() {
        assert!(elapsed_overlay_opacity(4.0, 4.0, 0.0).abs() < f64::EPSILON);
        assert!((elapsed_overlay_opacity(4.01, 4.0, 0.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn opaque_paint_is_borrowed() {
        let paint = Paint::solid(Color::hex(0xffffff));
        match faded(&paint, 1.0) {
            Some(Cow::Borrowed(p)) => assert!(std::ptr::eq(p, &paint)),
            other => panic!("expected borrowed paint, got {other:?}"),
        }
        assert!(matches!(faded(&paint, 3.0), Some(Cow::Borrowed(_))));
    }

    #[test]
    fn partial_opacity_derives_a_copy() {
        let paint = Paint {
            color: Color::hex(0xffffff),
            opacity: 0.8,
        };
        match faded(&paint, 0.5) {
            Some(Cow::Owned(p)) => assert!((p.opacity - 0.4).abs() < 1e-9),
            other => panic!("expected owned paint, got {other:?}"),
        }
        assert!((paint.opacity - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn invisible_opacity_draws_nothing() {
        let paint = Paint::solid(Color::hex(0xffffff));
        assert!(faded(&paint, 0.0).is_none());
        assert!(faded(&paint, -1.0).is_none());
        assert!(faded(&paint, f64::NAN).is_none());
    }

    #[test]
    fn elapsed_text_has_one_decimal() {
        assert_eq!(format_elapsed(4.73), "+4.7");
        assert_eq!(format_elapsed(12.0), "+12.0");
    }

    #[test]
    fn elapsed_text_rounds_ties_away_from_zero() {
        assert_eq!(format_elapsed(4.25), "+4.3");
        assert_eq!(format_elapsed(0.25), "+0.3");
        assert_eq!(format_elapsed(4.249), "+4.2");
    }
}
