// Licensed under the Apache-2.0 license

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use time_hil::generic_timer::ControlValue;
use time_hil::{TimerRegisters, CNTV_CTL};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::InMemoryRegister;

/// In-memory generic timer register file.
///
/// The counter is free-running in the sense that every raw read advances it
/// by `step` ticks (zero by default, which freezes it). Reads can also be
/// scripted with exact values, which is how the 32-bit boundary race is
/// reproduced.
pub struct FakeTimerRegisters {
    frequency: Cell<u32>,
    counter: Cell<u64>,
    step: Cell<u64>,
    scripted: RefCell<VecDeque<u64>>,
    control: InMemoryRegister<u64, CNTV_CTL::Register>,
    compare: InMemoryRegister<u64>,
    counter_reads: Cell<usize>,
    barriers: Cell<usize>,
    unfenced_writes: Cell<usize>,
}

impl FakeTimerRegisters {
    pub fn new(frequency: u32) -> Self {
        Self {
            frequency: Cell::new(frequency),
            counter: Cell::new(0),
            step: Cell::new(0),
            scripted: RefCell::new(VecDeque::new()),
            control: InMemoryRegister::new(0),
            compare: InMemoryRegister::new(0),
            counter_reads: Cell::new(0),
            barriers: Cell::new(0),
            unfenced_writes: Cell::new(0),
        }
    }

    /// Set the counter value returned by the next unscripted read.
    pub fn set_counter(&self, ticks: u64) {
        self.counter.set(ticks);
    }

    /// Move the counter forward, as if `ticks` cycles elapsed.
    pub fn advance(&self, ticks: u64) {
        self.counter.set(self.counter.get().wrapping_add(ticks));
    }

    /// Advance the counter by `step` after every raw read.
    pub fn set_step(&self, step: u64) {
        self.step.set(step);
    }

    /// Queue exact values for the next raw reads. Scripted values are
    /// consumed before the free-running counter is used again.
    pub fn script_reads(&self, values: &[u64]) {
        self.scripted.borrow_mut().extend(values.iter().copied());
    }

    /// Raise the hardware status bit, as the timer does when the counter
    /// passes the compare value.
    pub fn fire(&self) {
        self.control.modify(CNTV_CTL::ISTATUS::SET);
    }

    pub fn is_enabled(&self) -> bool {
        self.control.is_set(CNTV_CTL::ENABLE)
    }

    pub fn is_masked(&self) -> bool {
        self.control.is_set(CNTV_CTL::IMASK)
    }

    pub fn is_pending(&self) -> bool {
        self.control.is_set(CNTV_CTL::ISTATUS)
    }

    pub fn raw_control(&self) -> u64 {
        self.control.get()
    }

    pub fn counter_reads(&self) -> usize {
        self.counter_reads.get()
    }

    pub fn barriers(&self) -> usize {
        self.barriers.get()
    }

    /// Register writes not yet followed by a barrier.
    pub fn unfenced_writes(&self) -> usize {
        self.unfenced_writes.get()
    }
}

impl TimerRegisters for FakeTimerRegisters {
    fn counter_frequency(&self) -> u32 {
        self.frequency.get()
    }

    fn counter(&self) -> u64 {
        self.counter_reads.set(self.counter_reads.get() + 1);
        if let Some(value) = self.scripted.borrow_mut().pop_front() {
            return value;
        }
        let value = self.counter.get();
        self.counter.set(value.wrapping_add(self.step.get()));
        value
    }

    fn control(&self) -> ControlValue {
        self.control.extract()
    }

    fn set_control(&self, value: ControlValue) {
        self.control.set(value.get());
        self.unfenced_writes.set(self.unfenced_writes.get() + 1);
    }

    fn compare(&self) -> u64 {
        self.compare.get()
    }

    fn set_compare(&self, deadline: u64) {
        self.compare.set(deadline);
        self.unfenced_writes.set(self.unfenced_writes.get() + 1);
    }

    fn barrier(&self) {
        self.barriers.set(self.barriers.get() + 1);
        self.unfenced_writes.set(0);
    }
}
