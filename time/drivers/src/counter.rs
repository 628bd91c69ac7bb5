// Licensed under the Apache-2.0 license

//! Counter read strategies.
//!
//! Cortex-A73 r0p0 - r0p2 (erratum #858921) can return a wrong counter value
//! when the counter crosses a 32-bit boundary during the read. Newer parts
//! are not affected. The workaround reads twice and compares bit 32 of the
//! two values: if it differs keep the first value, otherwise keep the second.
//!
//! The strategy is a type parameter of the timer so both paths are always
//! compiled and tested; the `erratum-858921` feature picks the default.

use time_hil::TimerRegisters;

pub trait CounterRead {
    fn read_ticks<R: TimerRegisters + ?Sized>(regs: &R) -> u64;
}

/// Single raw read, for cores without the erratum.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRead;

impl CounterRead for PlainRead {
    #[inline]
    fn read_ticks<R: TimerRegisters + ?Sized>(regs: &R) -> u64 {
        regs.counter()
    }
}

/// Double read with bit-32 comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct Erratum858921Read;

impl CounterRead for Erratum858921Read {
    #[inline]
    fn read_ticks<R: TimerRegisters + ?Sized>(regs: &R) -> u64 {
        let first = regs.counter();
        let second = regs.counter();
        stable_sample(first, second)
    }
}

#[cfg(feature = "erratum-858921")]
pub type DefaultCounterRead = Erratum858921Read;

#[cfg(not(feature = "erratum-858921"))]
pub type DefaultCounterRead = PlainRead;

/// Pick between two back-to-back counter samples.
///
/// If bit 32 differs the counter crossed the boundary between the reads and
/// the second sample may be corrupt, so the pre-rollover sample is returned.
#[inline]
pub fn stable_sample(first: u64, second: u64) -> u64 {
    if ((first ^ second) >> 32) & 1 != 0 {
        first
    } else {
        second
    }
}
