//! Fit a label into a pixel width and turn it into a positioned glyph run.

use buildlane_protocol::{Glyph, GlyphRun, Point};

use crate::font::FontMetrics;

/// What to do with text that does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Drop the characters that do not fit.
    Clip,
    /// Drop enough trailing characters to make room for "...".
    Ellipsis,
}

/// Build the glyph run for `text`, drawn from the top-left `origin` and at
/// most `available_width` px wide.
///
/// Characters are accepted left to right until the next one would overflow.
/// With [`Overflow::Ellipsis`], at least the last accepted glyph is then
/// removed, and more from the end until three dots fit in the freed space. Characters the font does not map
/// are drawn with its missing glyph.
///
/// Pass `f64::INFINITY` for text that must never be cut.
pub fn fit_glyph_run(
    metrics: &FontMetrics,
    text: &str,
    origin: Point,
    available_width: f64,
    overflow: Overflow,
) -> GlyphRun {
    let baseline_origin = Point::new(origin.x, origin.y + metrics.baseline());

    // A cut label leaves out at least one character before adding three dots.
    let mut glyphs = Vec::with_capacity(text.len() + 2);
    let mut remaining = if available_width.is_nan() {
        0.0
    } else {
        available_width
    };

    let mut truncated = false;
    for ch in text.chars() {
        let id = metrics.glyph(ch);
        let advance = metrics.advance(id);
        if remaining - advance < 0.0 {
            truncated = true;
            break;
        }
        remaining -= advance;
        glyphs.push(Glyph { id, advance, ch });
    }

    if truncated && overflow == Overflow::Ellipsis {
        let dot_id = metrics.glyph('.');
        let dot = Glyph {
            id: dot_id,
            advance: metrics.advance(dot_id),
            ch: '.',
        };
        let ellipsis_width = dot.advance * 3.0;

        // The last accepted glyph always goes, even if the dots would fit.
        while let Some(removed) = glyphs.pop() {
            remaining += removed.advance;
            if remaining >= ellipsis_width {
                break;
            }
        }
        glyphs.extend([dot; 3]);
    }

    GlyphRun {
        origin: baseline_origin,
        font_size: metrics.font_size(),
        glyphs,
    }
}
