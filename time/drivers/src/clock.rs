// Licensed under the Apache-2.0 license

use crate::calibration::TimerCalibration;
use crate::config::TimeConfig;

/// Monotonic and wall clock arithmetic over a fixed calibration.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    calibration: TimerCalibration,
    epoch_offset_ns: u64,
}

impl Clock {
    pub fn new(calibration: TimerCalibration, config: TimeConfig) -> Self {
        Self {
            calibration,
            epoch_offset_ns: config.epoch_offset_ns,
        }
    }

    pub fn calibration(&self) -> &TimerCalibration {
        &self.calibration
    }

    pub fn epoch_offset_ns(&self) -> u64 {
        self.epoch_offset_ns
    }

    /// Nanoseconds elapsed between boot and the counter value `now_ticks`.
    #[inline]
    pub fn monotonic_ns(&self, now_ticks: u64) -> u64 {
        self.calibration
            .ticks_to_ns(now_ticks.wrapping_sub(self.calibration.boot_ticks()))
    }

    #[inline]
    pub fn wall_ns(&self, now_ticks: u64) -> u64 {
        self.monotonic_ns(now_ticks)
            .wrapping_add(self.epoch_offset_ns)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_monotonic_one_second_after_boot() {
        let cal = TimerCalibration::new(1000, 19_200_000).unwrap();
        let clock = Clock::new(cal, TimeConfig::DEFAULT);

        assert_eq!(clock.monotonic_ns(1000), 0);
        let ns = clock.monotonic_ns(1000 + 19_200_000);
        assert!(ns.abs_diff(1_000_000_000) <= 4, "{ns}");
    }

    #[test]
    fn test_wall_adds_fixed_offset() {
        let cal = TimerCalibration::new(0, 1_000_000_000).unwrap();
        let clock = Clock::new(
            cal,
            TimeConfig {
                epoch_offset_ns: 1_700_000_000_000_000_000,
            },
        );
        assert_eq!(clock.wall_ns(500), 1_700_000_000_000_000_500);
        assert_eq!(clock.wall_ns(500) - clock.monotonic_ns(500), clock.epoch_offset_ns());
    }

    #[test]
    fn test_default_epoch_is_zero() {
        let cal = TimerCalibration::new(7, 24_000_000).unwrap();
        let clock = Clock::new(cal, TimeConfig::default());
        assert_eq!(clock.wall_ns(24_000_007), clock.monotonic_ns(24_000_007));
    }

    #[test]
    fn test_past_horizon_does_not_wrap() {
        let cal = TimerCalibration::new(0, 19_200_000).unwrap();
        let clock = Clock::new(cal, TimeConfig::DEFAULT);
        let hours = 10 * 3600;
        let ns = clock.monotonic_ns(hours * 19_200_000);
        let expected = hours * 1_000_000_000;
        assert!(ns.abs_diff(expected) <= expected / (1 << 20), "{ns}");
    }
}
