use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Index of a glyph inside a font face's glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphId(pub u16);

/// One positioned glyph of a run: the glyph, how far it advances the pen,
/// and the character it was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub id: GlyphId,
    pub advance: f64,
    pub ch: char,
}

/// A horizontal run of glyphs anchored at a baseline origin.
///
/// Glyph `i` is drawn at `origin.x + sum(advance[..i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    pub origin: Point,
    pub font_size: f64,
    pub glyphs: Vec<Glyph>,
}

impl GlyphRun {
    pub fn width(&self) -> f64 {
        self.glyphs.iter().map(|g| g.advance).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Pen position of every glyph, left to right.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.glyphs.iter().scan(self.origin.x, |x, g| {
            let at = *x;
            *x += g.advance;
            Some(at)
        })
    }

    /// The characters the run was built from, including any ellipsis dots.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> GlyphRun {
        GlyphRun {
            origin: Point::new(10.0, 5.0),
            font_size: 10.0,
            glyphs: vec![
                Glyph {
                    id: GlyphId(1),
                    advance: 6.0,
                    ch: 'a',
                },
                Glyph {
                    id: GlyphId(2),
                    advance: 4.0,
                    ch: 'b',
                },
                Glyph {
                    id: GlyphId(3),
                    advance: 5.0,
                    ch: 'c',
                },
            ],
        }
    }

    #[test]
    fn width_is_sum_of_advances() {
        assert!((run().width() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn positions_accumulate_from_origin() {
        let xs: Vec<f64> = run().positions().collect();
        assert_eq!(xs, vec![10.0, 16.0, 20.0]);
    }

    #[test]
    fn text_from_glyphs() {
        assert_eq!(run().text(), "abc");
        assert_eq!(run().len(), 3);
        assert!(!run().is_empty());
    }
}
