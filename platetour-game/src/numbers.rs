//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a character count to `u32`, saturating on overflow.
#[must_use]
pub fn count_to_u32(value: usize) -> u32 {
    cast::<usize, u32>(value).unwrap_or(u32::MAX)
}

/// Convert a `u32` to `f32` while allowing precision loss in a single location.
#[must_use]
pub fn u32_to_f32(value: u32) -> f32 {
    cast::<u32, f32>(value).unwrap_or(0.0)
}

/// Clamp a fraction into `[0, 1]`, returning 0.0 for NaN.
#[must_use]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Map a unit fraction to a whole percentage in `[0, 100]`.
#[must_use]
pub fn fraction_to_pct(fraction: f32) -> u8 {
    let scaled = (clamp_unit(fraction) * 100.0).round();
    cast::<f32, u8>(scaled).unwrap_or(0).min(100)
}

/// Convert an `i64` reward amount to `u32`, returning `None` for negatives and
/// saturating large values.
#[must_use]
pub fn reward_to_u32(value: i64) -> Option<u32> {
    if value < 0 {
        return None;
    }
    Some(cast::<i64, u32>(value).unwrap_or(u32::MAX))
}
