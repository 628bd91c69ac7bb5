/*++

Licensed under the Apache-2.0 license.

File Name:

    timers.rs

Abstract:

    Hardware Interface Layer traits for timer peripherals and the
    scheduler-facing clock.

--*/

/// Raw access to a free-running tick counter of known frequency.
///
/// Elapsed-time helpers tolerate one wrap of the counter between `start` and
/// `end` and return 0 for an unknown (zero) frequency.
pub trait Timers {
    /// Current counter value. Never decreases except by wrapping.
    fn ticks(&self) -> u64;

    /// Counter frequency in Hz.
    fn clock_freq_hz(&self) -> u64;

    fn elapsed_us(&self, start: u64, end: u64) -> u64 {
        ticks_to_unit(end.wrapping_sub(start), self.clock_freq_hz(), 1_000_000)
    }

    fn elapsed_ms(&self, start: u64, end: u64) -> u64 {
        ticks_to_unit(end.wrapping_sub(start), self.clock_freq_hz(), 1_000)
    }
}

fn ticks_to_unit(ticks: u64, freq: u64, units_per_sec: u64) -> u64 {
    if freq == 0 {
        return 0;
    }
    (ticks as u128 * units_per_sec as u128 / freq as u128) as u64
}

/// Nanosecond clocks derived from a calibrated counter.
///
/// Both reads are non-blocking and always succeed once the clock exists.
pub trait Clock {
    /// Nanoseconds since the clock was initialized.
    fn monotonic_clock(&self) -> u64;

    /// Monotonic time plus a fixed epoch offset.
    fn wall_clock(&self) -> u64;
}

/// Scheduler-facing wake-up interrupt control.
pub trait NextInterrupt {
    /// Arm the timer interrupt `delta_ns` nanoseconds from now.
    ///
    /// Must be called with local interrupt delivery disabled, from the
    /// scheduler's idle path only. A deadline that is already in the past
    /// fires as soon as interrupts are re-enabled.
    fn setup_next_interrupt(&self, delta_ns: u64);

    /// Service a fired timer interrupt. Leaves the interrupt masked; the
    /// scheduler re-arms through `setup_next_interrupt`.
    fn handle_timer_irq(&self);
}
