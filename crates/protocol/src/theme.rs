use serde::{Deserialize, Serialize};

use crate::paint::{JobPaints, Paint, Stroke};
use crate::status::JobStatus;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Background / border / foreground colors for one job status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusColors {
    pub background: Color,
    pub border: Color,
    pub foreground: Color,
}

impl StatusColors {
    const fn new(background: u32, border: u32, foreground: u32) -> Self {
        Self {
            background: Color::hex(background),
            border: Color::hex(border),
            foreground: Color::hex(foreground),
        }
    }

    pub fn to_paints(self, border_thickness: f64) -> JobPaints {
        JobPaints {
            background: Paint::solid(self.background),
            border: Some(Stroke::new(self.border, border_thickness)),
            foreground: Paint::solid(self.foreground),
        }
    }
}

/// Resolve the colors a job with `status` is painted with.
pub fn status_colors(status: JobStatus, mode: ThemeMode) -> StatusColors {
    match mode {
        ThemeMode::Dark => status_colors_dark(status),
        ThemeMode::Light => status_colors_light(status),
    }
}

fn status_colors_dark(status: JobStatus) -> StatusColors {
    use JobStatus::*;
    match status {
        Queued => StatusColors::new(0x313244, 0x45475a, 0xa6adc8),
        Building => StatusColors::new(0x1e3a5f, 0x89b4fa, 0xcdd6f4),
        Success => StatusColors::new(0x1f3d2b, 0xa6e3a1, 0xcdd6f4),
        SuccessCached => StatusColors::new(0x1f3a3d, 0x94e2d5, 0xcdd6f4),
        Failed => StatusColors::new(0x4a1f2a, 0xf38ba8, 0xf5e0dc),
        Skipped => StatusColors::new(0x2a2a37, 0x585b70, 0x9399b2),
        Aborted => StatusColors::new(0x3d2f1f, 0xfab387, 0xf5e0dc),
    }
}

fn status_colors_light(status: JobStatus) -> StatusColors {
    use JobStatus::*;
    match status {
        Queued => StatusColors::new(0xe6e9ef, 0xbcc0cc, 0x5c5f77),
        Building => StatusColors::new(0xdce6fb, 0x1e66f5, 0x1a1a2e),
        Success => StatusColors::new(0xdff3dc, 0x40a02b, 0x1a1a2e),
        SuccessCached => StatusColors::new(0xd9f1ef, 0x179299, 0x1a1a2e),
        Failed => StatusColors::new(0xf9dde2, 0xd20f39, 0x1a1a2e),
        Skipped => StatusColors::new(0xeff1f5, 0x9ca0b0, 0x6c6f85),
        Aborted => StatusColors::new(0xfbe7d8, 0xfe640b, 0x1a1a2e),
    }
}

/// Frame background behind all lanes.
pub fn background_color(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Dark => Color::hex(0x1e1e2e),
        ThemeMode::Light => Color::hex(0xf8f9fa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_differs_from_success() {
        for mode in [ThemeMode::Dark, ThemeMode::Light] {
            assert_ne!(
                status_colors(JobStatus::Failed, mode).background,
                status_colors(JobStatus::Success, mode).background
            );
        }
    }

    #[test]
    fn paints_are_opaque_with_border() {
        let paints = status_colors(JobStatus::Building, ThemeMode::Dark).to_paints(1.0);
        assert!((paints.background.opacity - 1.0).abs() < f64::EPSILON);
        assert!((paints.foreground.opacity - 1.0).abs() < f64::EPSILON);
        assert!(paints.border.is_some());
    }
}
