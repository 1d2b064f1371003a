use serde::{Deserialize, Serialize};

use crate::types::Color;

/// A fill resource: a solid color plus an opacity multiplier.
///
/// Paints are owned by whoever produces job records and are handed to the
/// renderer by reference. The renderer only ever derives a new `Paint` when
/// it has to fade one, see [`Paint::with_opacity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub color: Color,
    pub opacity: f64,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// Copy of this paint with its opacity multiplied by `factor`.
    pub fn with_opacity(&self, factor: f64) -> Self {
        Self {
            color: self.color,
            opacity: self.opacity * factor,
        }
    }

    /// Final alpha after combining the color's own alpha with `opacity`.
    pub fn effective_alpha(&self) -> f64 {
        f64::from(self.color.a) * self.opacity
    }
}

/// Border stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub paint: Paint,
    pub thickness: f64,
}

impl Stroke {
    pub fn new(color: Color, thickness: f64) -> Self {
        Self {
            paint: Paint::solid(color),
            thickness,
        }
    }
}

/// The three paint resources a job is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPaints {
    pub background: Paint,
    pub border: Option<Stroke>,
    pub foreground: Paint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_opacity_multiplies() {
        let p = Paint {
            color: Color::hex(0xffffff),
            opacity: 0.5,
        };
        let faded = p.with_opacity(0.5);
        assert!((faded.opacity - 0.25).abs() < f64::EPSILON);
        assert_eq!(faded.color, p.color);
    }

    #[test]
    fn effective_alpha_combines_color_alpha() {
        let p = Paint {
            color: Color::rgba(0.0, 0.0, 0.0, 0.5),
            opacity: 0.5,
        };
        assert!((p.effective_alpha() - 0.25).abs() < 1e-9);
    }
}
