//! Numeric helpers.
//!
//! The clamps never panic. When `min > max` the result is `min`, and NaN
//! inputs pass through unchanged.

/// Clamps `value` into `[min, max]`.
///
/// ```
/// # use paperkit::util::math::clamp;
/// assert_eq!(clamp(99, 0, 10), 10);
/// assert_eq!(clamp(-1, 0, 10), 0);
/// assert_eq!(clamp(5, 10, 0), 10);
/// ```
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let capped = if value > max { max } else { value };
    if capped < min { min } else { capped }
}

pub fn clamp_f32(value: f32, min: f32, max: f32) -> f32 {
    clamp(value, min, max)
}

pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    clamp(value, min, max)
}

/// The logarithm of `value` in the given `base`.
pub fn log_base(value: f64, base: f64) -> f64 {
    value.ln() / base.ln()
}
