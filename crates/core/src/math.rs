/// Clamp that never lets NaN through: a NaN input collapses to `min`.
///
/// Every width, radius and opacity handed to a draw call goes through here.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.max(min).min(max)
    }
}

/// `clamp(value, 0, 1)`.
pub fn unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}
