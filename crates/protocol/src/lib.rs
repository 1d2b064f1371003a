pub mod commands;
pub mod glyphs;
pub mod paint;
pub mod status;
pub mod theme;
pub mod types;

pub use commands::RenderCommand;
pub use glyphs::{Glyph, GlyphId, GlyphRun};
pub use paint::{JobPaints, Paint, Stroke};
pub use status::JobStatus;
pub use theme::ThemeMode;
pub use types::{Color, Point, Rect, Thickness};
