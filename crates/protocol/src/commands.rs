use serde::{Deserialize, Serialize};

use crate::glyphs::GlyphRun;
use crate::paint::{Paint, Stroke};
use crate::types::Rect;

/// A single, stateless draw instruction.
///
/// A recording surface turns every draw call of a render pass into one of
/// these, so a frame can be exported (SVG, JSON over the WASM boundary) or
/// inspected in tests. Each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill and optionally stroke an axis-aligned rectangle.
    DrawRect {
        rect: Rect,
        fill: Paint,
        stroke: Option<Stroke>,
    },

    /// Same as `DrawRect` with both corner radii set to `radius`.
    DrawRoundedRect {
        rect: Rect,
        radius: f64,
        fill: Paint,
        stroke: Option<Stroke>,
    },

    /// Draw a positioned glyph run.
    DrawGlyphRun { run: GlyphRun, paint: Paint },
}
