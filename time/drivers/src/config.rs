// Licensed under the Apache-2.0 license

/// Nanoseconds per second.
pub const NSEC_PER_SEC: u64 = 1_000_000_000;

/// Time range in seconds the scaling factors are sized for.
///
/// Conversions of up to this many seconds' worth of ticks or nanoseconds keep
/// full precision. A longer range would give smaller multipliers and shifts
/// and so a coarser conversion.
pub const MAX_CONVERT_SECS: u64 = 3600;


/// Run-time configuration of the time subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConfig {
    /// Offset added to monotonic time to produce wall time. There is no RTC
    /// source, so this stays fixed for the lifetime of the clock.
    pub epoch_offset_ns: u64,
}

impl TimeConfig {
    pub const DEFAULT: TimeConfig = TimeConfig { epoch_offset_ns: 0 };
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
