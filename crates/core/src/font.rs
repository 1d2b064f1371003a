//! Font metrics: glyph lookup, advance widths and vertical metrics.
//!
//! A [`FontFace`] is an unscaled glyph table in em units. A [`FontMetrics`]
//! snapshot binds a face to a font size and is what the text fitter reads.
//! [`FontMetricsProvider`] owns the current snapshot and rebuilds it whenever
//! the text style changes.

use std::collections::HashMap;
use std::sync::Arc;

use buildlane_protocol::GlyphId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("invalid font JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no font face registered for family {0:?}")]
    UnknownFamily(String),
    #[error("font size must be finite and positive, got {0}")]
    InvalidSize(f64),
    #[error("font face {family:?} is malformed: {reason}")]
    MalformedFace { family: String, reason: String },
}

/// Unscaled glyph table of one font face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    pub family: String,
    /// Distance from the top of the line box to the baseline, in em.
    pub baseline: f64,
    /// Line box height, in em.
    pub height: f64,
    /// Advance width per glyph id, in em.
    pub advances: Vec<f64>,
    pub char_map: HashMap<char, u16>,
    /// Glyph drawn for characters the face does not map.
    #[serde(default)]
    pub missing_glyph: u16,
}

impl FontFace {
    pub fn from_json(data: &[u8]) -> Result<Self, FontError> {
        let face: Self = serde_json::from_slice(data)?;
        face.validate()?;
        Ok(face)
    }

    pub fn validate(&self) -> Result<(), FontError> {
        let malformed = |reason: String| FontError::MalformedFace {
            family: self.family.clone(),
            reason,
        };

        if !(self.baseline.is_finite() && self.height.is_finite() && self.height > 0.0) {
            return Err(malformed("baseline and height must be finite".into()));
        }
        if usize::from(self.missing_glyph) >= self.advances.len() {
            return Err(malformed(format!(
                "missing glyph {} is out of range",
                self.missing_glyph
            )));
        }
        if let Some(bad) = self.advances.iter().position(|a| !a.is_finite() || *a < 0.0) {
            return Err(malformed(format!("glyph {bad} has an invalid advance")));
        }
        if let Some((ch, id)) = self
            .char_map
            .iter()
            .find(|(_, id)| usize::from(**id) >= self.advances.len())
        {
            return Err(malformed(format!("{ch:?} maps to unknown glyph {id}")));
        }
        Ok(())
    }

    /// Every character in `chars` gets its own glyph with the same advance.
    /// Glyph 0 is the missing-glyph box.
    pub fn uniform(family: impl Into<String>, chars: &str, advance: f64) -> Self {
        let mut char_map = HashMap::new();
        let mut advances = vec![advance];
        for ch in chars.chars() {
            if let std::collections::hash_map::Entry::Vacant(slot) = char_map.entry(ch) {
                slot.insert(advances.len() as u16);
                advances.push(advance);
            }
        }
        Self {
            family: family.into(),
            baseline: 0.8,
            height: 1.2,
            advances,
            char_map,
            missing_glyph: 0,
        }
    }

    /// An approximate proportional sans face covering printable ASCII.
    pub fn builtin() -> Self {
        let mut char_map = HashMap::new();
        let mut advances = vec![0.5];
        for byte in 0x20u8..=0x7e {
            let ch = char::from(byte);
            char_map.insert(ch, advances.len() as u16);
            advances.push(builtin_advance(ch));
        }
        Self {
            family: BUILTIN_FAMILY.to_string(),
            baseline: 0.78,
            height: 1.17,
            advances,
            char_map,
            missing_glyph: 0,
        }
    }
}

pub const BUILTIN_FAMILY: &str = "builtin-sans";

fn builtin_advance(ch: char) -> f64 {
    match ch {
        ' ' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' | 'i' | 'l' | 'I' => 0.28,
        'f' | 'j' | 'r' | 't' | '(' | ')' | '[' | ']' | '-' | '/' | '\\' => 0.35,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.66,
        _ => 0.52,
    }
}

/// What the renderer asks for when the job text style changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: BUILTIN_FAMILY.to_string(),
            size: 11.0,
        }
    }
}

/// A face bound to a size. Immutable; replaced wholesale on style change.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    face: Arc<FontFace>,
    size: f64,
}

impl FontMetrics {
    pub fn new(face: Arc<FontFace>, size: f64) -> Result<Self, FontError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FontError::InvalidSize(size));
        }
        face.validate()?;
        Ok(Self { face, size })
    }

    pub fn font_size(&self) -> f64 {
        self.size
    }

    pub fn family(&self) -> &str {
        &self.face.family
    }

    /// Glyph for `ch`, or the face's missing glyph.
    pub fn glyph(&self, ch: char) -> GlyphId {
        GlyphId(
            self.face
                .char_map
                .get(&ch)
                .copied()
                .unwrap_or(self.face.missing_glyph),
        )
    }

    /// Advance of `glyph` in pixels at the current size.
    pub fn advance(&self, glyph: GlyphId) -> f64 {
        self.face
            .advances
            .get(usize::from(glyph.0))
            .copied()
            .unwrap_or(0.0)
            * self.size
    }

    /// Baseline offset from the top of the line box, in pixels.
    pub fn baseline(&self) -> f64 {
        self.face.baseline * self.size
    }

    /// Line box height in pixels.
    pub fn line_height(&self) -> f64 {
        self.face.height * self.size
    }
}

/// Looks up a font face by family name.
pub trait FontResolver {
    fn resolve(&self, family: &str) -> Result<Arc<FontFace>, FontError>;
}

/// In-memory resolver keyed by family name.
#[derive(Debug, Clone, Default)]
pub struct FaceRegistry {
    faces: HashMap<String, Arc<FontFace>>,
}

impl FaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only [`FontFace::builtin`].
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(FontFace::builtin());
        registry
    }

    pub fn register(&mut self, face: FontFace) {
        self.faces.insert(face.family.clone(), Arc::new(face));
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }
}

impl FontResolver for FaceRegistry {
    fn resolve(&self, family: &str) -> Result<Arc<FontFace>, FontError> {
        self.faces
            .get(family)
            .cloned()
            .ok_or_else(|| FontError::UnknownFamily(family.to_string()))
    }
}

/// Holds the font metrics snapshot the renderer draws text with.
///
/// Starts empty: until the first style is applied there are no metrics and
/// the renderer draws shapes only.
#[derive(Debug, Clone, Default)]
pub struct FontMetricsProvider {
    style: Option<TextStyle>,
    metrics: Option<FontMetrics>,
}

impl FontMetricsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: FontMetrics) -> Self {
        Self {
            style: Some(TextStyle {
                family: metrics.family().to_string(),
                size: metrics.font_size(),
            }),
            metrics: Some(metrics),
        }
    }

    /// Rebuild the snapshot for `style`. On failure the previous snapshot is
    /// dropped as well, so text stays suppressed until a style resolves.
    pub fn apply_style(
        &mut self,
        style: TextStyle,
        resolver: &impl FontResolver,
    ) -> Result<(), FontError> {
        let rebuilt = resolver
            .resolve(&style.family)
            .and_then(|face| FontMetrics::new(face, style.size));

        self.style = Some(style);
        match rebuilt {
            Ok(metrics) => {
                tracing::debug!(
                    family = metrics.family(),
                    size = metrics.font_size(),
                    "job text metrics rebuilt"
                );
                self.metrics = Some(metrics);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "job text metrics unavailable, labels suppressed");
                self.metrics = None;
                Err(err)
            }
        }
    }

    /// Re-resolve the current style, e.g. after the inherited font family
    /// changed in the resolver.
    pub fn refresh(&mut self, resolver: &impl FontResolver) -> Result<(), FontError> {
        match self.style.clone() {
            Some(style) => self.apply_style(style, resolver),
            None => Ok(()),
        }
    }

    pub fn style(&self) -> Option<&TextStyle> {
        self.style.as_ref()
    }

    pub fn metrics(&self) -> Option<&FontMetrics> {
        self.metrics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_char_falls_back_to_missing_glyph() {
        let metrics = FontMetrics::new(Arc::new(FontFace::uniform("t", "ab", 0.5)), 10.0)
            .expect("valid metrics");
        assert_eq!(metrics.glyph('a'), GlyphId(1));
        assert_eq!(metrics.glyph('b'), GlyphId(2));
        assert_eq!(metrics.glyph('€'), GlyphId(0));
        assert!((metrics.advance(GlyphId(0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn metrics_scale_with_size() {
        let metrics =
            FontMetrics::new(Arc::new(FontFace::uniform("t", "a", 0.5)), 20.0).expect("valid");
        assert!((metrics.advance(GlyphId(1)) - 10.0).abs() < f64::EPSILON);
        assert!((metrics.baseline() - 16.0).abs() < 1e-9);
        assert!((metrics.line_height() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_glyph_has_no_advance() {
        let metrics =
            FontMetrics::new(Arc::new(FontFace::uniform("t", "a", 0.5)), 10.0).expect("valid");
        assert!(metrics.advance(GlyphId(999)).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_positive_size() {
        let face = Arc::new(FontFace::builtin());
        assert!(matches!(
            FontMetrics::new(Arc::clone(&face), 0.0),
            Err(FontError::InvalidSize(_))
        ));
        assert!(matches!(
            FontMetrics::new(face, f64::NAN),
            Err(FontError::InvalidSize(_))
        ));
    }

    #[test]
    fn builtin_face_covers_printable_ascii() {
        let face = FontFace::builtin();
        assert!(face.validate().is_ok());
        assert_eq!(face.char_map.len(), 95);
        assert!(face.char_map.contains_key(&'.'));
        assert!(face.char_map.contains_key(&'+'));
    }

    #[test]
    fn face_json_roundtrip_with_char_keys() {
        let json = r#"{
            "family": "mono",
            "baseline": 0.8,
            "height": 1.2,
            "advances": [0.6, 0.6, 0.6],
            "char_map": { "a": 1, ".": 2 }
        }"#;
        let face = FontFace::from_json(json.as_bytes()).expect("face should parse");
        assert_eq!(face.char_map.get(&'.'), Some(&2));
        assert_eq!(face.missing_glyph, 0);
    }

    #[test]
    fn malformed_face_is_rejected() {
        let json = r#"{
            "family": "broken",
            "baseline": 0.8,
            "height": 1.2,
            "advances": [0.6],
            "char_map": { "a": 4 }
        }"#;
        assert!(matches!(
            FontFace::from_json(json.as_bytes()),
            Err(FontError::MalformedFace { .. })
        ));
    }

    #[test]
    fn registry_lists_registered_families() {
        let mut registry = FaceRegistry::with_builtin();
        registry.register(FontFace::uniform("mono", "abc", 0.5));
        let mut families: Vec<&str> = registry.families().collect();
        families.sort_unstable();
        assert_eq!(families, vec![BUILTIN_FAMILY, "mono"]);
    }

    #[test]
    fn provider_starts_without_metrics() {
        let provider = FontMetricsProvider::new();
        assert!(provider.metrics().is_none());
        assert!(provider.style().is_none());
    }

    #[test]
    fn provider_rebuilds_on_style_change() {
        let registry = FaceRegistry::with_builtin();
        let mut provider = FontMetricsProvider::new();
        provider
            .apply_style(TextStyle::default(), &registry)
            .expect("builtin family resolves");
        assert!((provider.metrics().map_or(0.0, FontMetrics::font_size) - 11.0).abs() < 1e-9);

        provider
            .apply_style(
                TextStyle {
                    family: BUILTIN_FAMILY.into(),
                    size: 14.0,
                },
                &registry,
            )
            .expect("builtin family resolves");
        assert!((provider.metrics().map_or(0.0, FontMetrics::font_size) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn failed_rebuild_clears_metrics() {
        let registry = FaceRegistry::with_builtin();
        let mut provider = FontMetricsProvider::new();
        provider
            .apply_style(TextStyle::default(), &registry)
            .expect("builtin family resolves");

        let result = provider.apply_style(
            TextStyle {
                family: "Nope Sans".into(),
                size: 11.0,
            },
            &registry,
        );
        assert!(matches!(result, Err(FontError::UnknownFamily(_))));
        assert!(provider.metrics().is_none());
    }

    #[test]
    fn refresh_picks_up_newly_registered_family() {
        let mut registry = FaceRegistry::new();
        let mut provider = FontMetricsProvider::new();
        let style = TextStyle {
            family: "late".into(),
            size: 10.0,
        };
        assert!(provider.apply_style(style, &registry).is_err());

        registry.register(FontFace::uniform("late", "abc", 0.5));
        provider.refresh(&registry).expect("family now registered");
        assert_eq!(provider.metrics().map(FontMetrics::family), Some("late"));
    }
}
