//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the u32 range, returning 0 for NaN values.
///
/// Negative input clamps to zero, so this doubles as `max(0, round(x))`.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.round().clamp(0.0, max);
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert a seat index to a player id, saturating at `u32::MAX`.
#[must_use]
pub fn index_to_id(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

/// Convert a one-based round number into a zero-based slot index.
#[must_use]
pub fn round_to_slot(round: u32) -> usize {
    usize::try_from(round.saturating_sub(1)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_u32(1.6), 2);
        assert_eq!(round_f64_to_u32(999.5), 1000);
        assert_eq!(round_f64_to_u32(-0.4), 0);
        assert_eq!(round_f64_to_u32(-250.0), 0);
        assert_eq!(round_f64_to_u32(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn slots_are_zero_based() {
        assert_eq!(round_to_slot(1), 0);
        assert_eq!(round_to_slot(12), 11);
        assert_eq!(round_to_slot(0), 0);
        assert_eq!(index_to_id(3), 3);
    }
}
