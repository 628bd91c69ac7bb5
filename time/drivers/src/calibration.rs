// Licensed under the Apache-2.0 license

//! Counter calibration.

use crate::config::{MAX_CONVERT_SECS, NSEC_PER_SEC};
use crate::error::{TimeError, TimeResult};
use crate::scale::{compute_scale, FixedPointScale};

/// Stages of the boot-time init sequence, in order. The sequence is linear:
/// each stage is entered exactly once and never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InitStage {
    Uninitialized,
    FrequencyRead,
    TickToNsCalibrated,
    NsToTickCalibrated,
    IrqMasked,
    Enabled,
    Ready,
}

/// Scaling state derived once from the counter frequency.
///
/// Built by [`TimerCalibration::new`] during boot and immutable afterwards;
/// there is no way to change a calibration in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerCalibration {
    boot_ticks: u64,
    counter_freq: u32,
    to_ns: FixedPointScale,
    to_ticks: FixedPointScale,
    max_convert_ticks: u64,
}

impl TimerCalibration {
    /// Calibrate for a counter running at `counter_freq` Hz whose monotonic
    /// origin is `boot_ticks`.
    ///
    /// Fails when either conversion direction has a zero multiplier. A zero
    /// frequency is reported separately since it usually means the firmware
    /// never programmed CNTFRQ.
    pub fn new(boot_ticks: u64, counter_freq: u32) -> TimeResult<Self> {
        if counter_freq == 0 {
            return Err(TimeError::ZeroFrequency);
        }

        let to_ns = compute_scale(counter_freq as u64, NSEC_PER_SEC);
        if to_ns.is_degenerate() {
            return Err(TimeError::DegenerateScale {
                stage: InitStage::TickToNsCalibrated,
            });
        }

        let to_ticks = compute_scale(NSEC_PER_SEC, counter_freq as u64);
        if to_ticks.is_degenerate() {
            return Err(TimeError::DegenerateScale {
                stage: InitStage::NsToTickCalibrated,
            });
        }

        Ok(Self {
            boot_ticks,
            counter_freq,
            to_ns,
            to_ticks,
            max_convert_ticks: MAX_CONVERT_SECS * counter_freq as u64,
        })
    }

    pub fn boot_ticks(&self) -> u64 {
        self.boot_ticks
    }

    pub fn counter_freq(&self) -> u32 {
        self.counter_freq
    }

    pub fn ns_per_tick(&self) -> u32 {
        self.to_ns.mult
    }

    pub fn shift_to_ns(&self) -> u8 {
        self.to_ns.shift
    }

    pub fn tick_per_ns(&self) -> u32 {
        self.to_ticks.mult
    }

    pub fn shift_to_tick(&self) -> u8 {
        self.to_ticks.shift
    }

    /// Largest tick count the scales were sized for.
    ///
    /// Informational only: conversions accept larger values, since uptime
    /// runs past this bound, and lose a little precision beyond it without
    /// wrapping.
    pub fn max_convert_ticks(&self) -> u64 {
        self.max_convert_ticks
    }

    #[inline]
    pub fn ticks_to_ns(&self, ticks: u64) -> u64 {
        self.to_ns.apply(ticks)
    }

    #[inline]
    pub fn ns_to_ticks(&self, ns: u64) -> u64 {
        self.to_ticks.apply(ns)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_calibrate_19_2_mhz() {
        let cal = TimerCalibration::new(1000, 19_200_000).unwrap();
        assert_eq!(cal.boot_ticks(), 1000);
        assert_eq!(cal.counter_freq(), 19_200_000);
        assert_eq!(cal.ns_per_tick(), 109_226_667);
        assert_eq!(cal.shift_to_ns(), 21);
        assert_eq!(cal.tick_per_ns(), 2_576_980);
        assert_eq!(cal.shift_to_tick(), 27);
        assert_eq!(cal.max_convert_ticks(), 69_120_000_000);

        assert!(cal.ticks_to_ns(19_200_000).abs_diff(NSEC_PER_SEC) <= 4);
        assert!(cal.ns_to_ticks(NSEC_PER_SEC).abs_diff(19_200_000) <= 4);
    }

    #[test]
    fn test_zero_frequency_is_fatal() {
        assert_eq!(
            TimerCalibration::new(0, 0),
            Err(TimeError::ZeroFrequency)
        );
    }

    #[test]
    fn test_low_frequency_still_calibrates() {
        // 32.768 kHz always-on counters are the slowest seen in practice.
        let cal = TimerCalibration::new(0, 32_768).unwrap();
        assert_ne!(cal.ns_per_tick(), 0);
        assert_ne!(cal.tick_per_ns(), 0);
        assert!(cal.ticks_to_ns(32_768).abs_diff(NSEC_PER_SEC) <= 1_000);
    }

    #[test]
    fn test_conversion_past_max_convert_ticks() {
        let cal = TimerCalibration::new(0, 19_200_000).unwrap();
        let ticks = cal.max_convert_ticks() * 24;
        let ns = cal.ticks_to_ns(ticks);
        let expected = 24 * 3600 * NSEC_PER_SEC;
        assert!(ns > cal.ticks_to_ns(cal.max_convert_ticks()));
        assert!(ns.abs_diff(expected) <= expected / (1 << 20), "{ns}");
    }

    #[test]
    fn test_stages_are_ordered() {
        assert!(InitStage::Uninitialized < InitStage::FrequencyRead);
        assert!(InitStage::NsToTickCalibrated < InitStage::IrqMasked);
        assert!(InitStage::Enabled < InitStage::Ready);
    }
}
