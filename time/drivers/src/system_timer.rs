// Licensed under the Apache-2.0 license

//! BCM283x system timer.
//!
//! The 64-bit counter can only be read as two 32-bit words, so a carry from
//! CLO into CHI between the two reads has to be detected.

use kernel::utilities::StaticRef;
use time_hil::{SplitCounter, Timers};
use tock_registers::interfaces::Readable;

use crate::regs::{regs, SYSTEM_TIMER_ADDR, SYSTEM_TIMER_FREQ_HZ};

pub const SYSTEM_TIMER_BASE: StaticRef<regs::SystemTimer> =
    unsafe { StaticRef::new(SYSTEM_TIMER_ADDR as *const regs::SystemTimer) };

/// Read a split counter, re-reading once if the high word moved.
pub fn read_split_counter<C: SplitCounter + ?Sized>(counter: &C) -> u64 {
    let mut high = counter.high();
    let mut low = counter.low();
    // we have to repeat it if the high word changed during the read
    if high != counter.high() {
        high = counter.high();
        low = counter.low();
    }
    ((high as u64) << 32) | low as u64
}

pub struct SystemTimer {
    registers: StaticRef<regs::SystemTimer>,
}

impl SystemTimer {
    pub const fn new(registers: StaticRef<regs::SystemTimer>) -> Self {
        SystemTimer { registers }
    }
}

impl SplitCounter for SystemTimer {
    fn high(&self) -> u32 {
        self.registers.chi.get()
    }

    fn low(&self) -> u32 {
        self.registers.clo.get()
    }
}

impl Timers for SystemTimer {
    fn ticks(&self) -> u64 {
        read_split_counter(self)
    }

    fn clock_freq_hz(&self) -> u64 {
        SYSTEM_TIMER_FREQ_HZ
    }
}
