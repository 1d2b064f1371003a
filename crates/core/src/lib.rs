//! Layout and level-of-detail drawing of build jobs on a lane timeline.
//!
//! ```text
//!   Viewport ──▶ layout (bounds per job) ──▶ shape (plain / rounded)
//!                                              │
//!                        fade (opacity) ◀──────┘
//!                            │
//!   FontMetrics ──▶ text (fit + ellipsis) ──▶ DrawSurface
//! ```
//!
//! [`render::JobsRenderer`] drives one pass over all jobs and keeps the
//! bounds map for hit-testing.

pub mod bounds;
pub mod config;
pub mod fade;
pub mod font;
pub mod layout;
pub mod math;
pub mod model;
pub mod render;
pub mod shape;
pub mod surface;
pub mod svg;
pub mod text;
pub mod viewport;

pub use bounds::BoundsMap;
pub use config::{ConfigError, RenderConfig};
pub use font::{FaceRegistry, FontError, FontFace, FontMetrics, FontMetricsProvider, TextStyle};
pub use render::{FrameInput, JobsRenderer, PassStats};
pub use surface::{CommandRecorder, DrawSurface};
pub use viewport::Viewport;
