// Licensed under the Apache-2.0 license

//! Fixed-point rate conversion.
//!
//! A value measured at `from` units per second is converted to `to` units per
//! second as `(value * mult) >> shift`, which needs no division at run time.
//! The pair is chosen so that `value * mult` stays within 64 bits for any
//! `value` up to [`MAX_CONVERT_SECS`] seconds' worth of `from` units.

use crate::config::MAX_CONVERT_SECS;

/// A multiplier/shift pair produced by [`compute_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointScale {
    pub mult: u32,
    pub shift: u8,
}

impl FixedPointScale {
    /// A zero multiplier maps everything to zero and cannot be used as a
    /// clock.
    pub fn is_degenerate(&self) -> bool {
        self.mult == 0
    }

    /// Apply the scale to `value`.
    ///
    /// Exact to the precision of `mult` inside the calibrated range. Beyond it
    /// the product is still formed in 128 bits, so the result degrades in
    /// precision but never wraps.
    #[inline]
    pub fn apply(&self, value: u64) -> u64 {
        ((value as u128 * self.mult as u128) >> self.shift) as u64
    }
}

/// Compute the multiplier and shift converting `from` units/s into `to`
/// units/s.
///
/// The shift is the largest value in `1..=32` whose rounded multiplier still
/// fits the accumulator budget left over by the largest input. If none fits,
/// the shift falls through to zero and the multiplier may be degenerate; a
/// `from` of zero always yields the zero multiplier.
pub fn compute_scale(from: u64, to: u64) -> FixedPointScale {
    if from == 0 {
        return FixedPointScale { mult: 0, shift: 0 };
    }

    // Bits of headroom left for the multiplier once the largest input
    // (MAX_CONVERT_SECS worth of `from` units) occupies the accumulator.
    let mut sftacc: u32 = 32;
    let mut tmp = (MAX_CONVERT_SECS as u128 * from as u128) >> 32;
    while tmp != 0 {
        tmp >>= 1;
        sftacc = sftacc.saturating_sub(1);
    }

    let mut candidate: u128 = 0;
    for shift in (1..=32u8).rev() {
        // Round to nearest rather than truncate.
        candidate = ((to as u128) << shift) + (from / 2) as u128;
        candidate /= from as u128;
        if candidate >> sftacc == 0 {
            return FixedPointScale {
                mult: candidate as u32,
                shift,
            };
        }
    }

    FixedPointScale {
        mult: candidate as u32,
        shift: 0,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::NSEC_PER_SEC;

    // Round trips are not exact to one unit: at the one-hour horizon they are
    // off by up to 9 908 ticks at 19.2 MHz and 17 694 ticks at 54 MHz, about
    // 1.4e-7 relative. Both multipliers keep at least 21 significant bits, so
    // 2^-20 relative bounds the error, plus truncation near zero.
    fn within_precision(expected: u64, actual: u64) -> bool {
        expected.abs_diff(actual) <= expected / (1 << 20) + 2
    }

    #[test]
    fn test_scale_19_2_mhz() {
        let to_ns = compute_scale(19_200_000, NSEC_PER_SEC);
        assert_eq!(to_ns, FixedPointScale { mult: 109_226_667, shift: 21 });

        let to_ticks = compute_scale(NSEC_PER_SEC, 19_200_000);
        assert_eq!(to_ticks, FixedPointScale { mult: 2_576_980, shift: 27 });

        let one_second = to_ns.apply(19_200_000);
        assert!(within_precision(NSEC_PER_SEC, one_second), "{one_second}");

        let ticks = to_ticks.apply(NSEC_PER_SEC);
        assert!(within_precision(19_200_000, ticks), "{ticks}");
    }

    #[test]
    fn test_scale_nonzero_across_frequencies() {
        let mut freq = 1_000_000u64;
        while freq <= 1_000_000_000 {
            assert!(!compute_scale(freq, NSEC_PER_SEC).is_degenerate(), "{freq}");
            assert!(!compute_scale(NSEC_PER_SEC, freq).is_degenerate(), "{freq}");
            freq += 7_777_777;
        }
    }

    #[test]
    fn test_round_trip_within_horizon() {
        for freq in [1_000_000u64, 19_200_000, 24_000_000, 54_000_000, 62_500_000, 1_000_000_000] {
            let to_ns = compute_scale(freq, NSEC_PER_SEC);
            let to_ticks = compute_scale(NSEC_PER_SEC, freq);
            let horizon = MAX_CONVERT_SECS * freq;
            for ticks in [0, 1, freq - 1, freq, freq * 60 + 12_345, horizon / 3, horizon - 1, horizon] {
                let back = to_ticks.apply(to_ns.apply(ticks));
                assert!(
                    within_precision(ticks, back),
                    "freq {freq}: {ticks} -> {back}"
                );
            }
        }
    }

    #[test]
    fn test_product_fits_64_bits_at_horizon() {
        for freq in [1_000_000u64, 19_200_000, 600_000_000, u32::MAX as u64] {
            let to_ns = compute_scale(freq, NSEC_PER_SEC);
            let horizon = MAX_CONVERT_SECS * freq;
            assert!((to_ns.mult as u64).checked_mul(horizon).is_some(), "{freq}");
        }
    }

    #[test]
    fn test_exact_power_of_two_ratio() {
        // 1 GHz counter: one tick is one nanosecond.
        let to_ns = compute_scale(NSEC_PER_SEC, NSEC_PER_SEC);
        assert_eq!(to_ns.apply(123_456_789), 123_456_789);
    }

    #[test]
    fn test_no_shift_fits_falls_through_to_zero_shift() {
        // Even shift 1 overflows the headroom; the last candidate is
        // truncated to 32 bits.
        assert_eq!(
            compute_scale(1, 1 << 40),
            FixedPointScale { mult: 0, shift: 0 }
        );
        assert_eq!(
            compute_scale(1, (1 << 40) + 3),
            FixedPointScale { mult: 6, shift: 0 }
        );
    }

    #[test]
    fn test_zero_source_rate_is_degenerate() {
        assert!(compute_scale(0, NSEC_PER_SEC).is_degenerate());
        assert!(compute_scale(NSEC_PER_SEC, 0).is_degenerate());
    }
}
