use buildlane_protocol::Thickness;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("{0} must have finite, non-negative edges")]
    InvalidMargin(&'static str),
}

/// Tunable constants of the job renderer.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Inset between a job's bounds and its drawn shape.
    pub job_margin: Thickness,
    /// Inset between the drawn shape and the label text.
    pub label_margin: Thickness,
    /// Jobs narrower than this borrow width from the gap before the next job
    /// and are drawn as plain rectangles.
    pub short_job_width_threshold: f64,
    /// Labels start fading in above this width and are fully opaque at twice
    /// this width.
    pub textless_job_width_threshold: f64,
    /// Extra pixels allowed past the right edge of the visible window.
    pub right_edge_headroom: f64,
    /// Seconds a job has to be building before its elapsed time shows.
    pub elapsed_overlay_delay: f64,
    /// Seconds the elapsed time takes to fade in fully.
    pub elapsed_overlay_fade: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            job_margin: Thickness::new(2.0, 0.25, 2.0, 0.25),
            label_margin: Thickness::new(8.0, 2.0, 2.0, 2.0),
            short_job_width_threshold: 12.0,
            textless_job_width_threshold: 36.0,
            right_edge_headroom: 16.0,
            elapsed_overlay_delay: 4.0,
            elapsed_overlay_fade: 1.0,
        }
    }
}

impl RenderConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.job_margin.is_valid() {
            return Err(ConfigError::InvalidMargin("job_margin"));
        }
        if !self.label_margin.is_valid() {
            return Err(ConfigError::InvalidMargin("label_margin"));
        }

        positive("short_job_width_threshold", self.short_job_width_threshold)?;
        positive(
            "textless_job_width_threshold",
            self.textless_job_width_threshold,
        )?;
        non_negative("right_edge_headroom", self.right_edge_headroom)?;
        non_negative("elapsed_overlay_delay", self.elapsed_overlay_delay)?;
        non_negative("elapsed_overlay_fade", self.elapsed_overlay_fade)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            requirement: "finite and positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            requirement: "finite and non-negative",
            value,
        })
    }
}
