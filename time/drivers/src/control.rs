// Licensed under the Apache-2.0 license

//! Timer control register operations.
//!
//! Each operation is a read-modify-write of one field of CNTV_CTL (or a write
//! of CNTV_CVAL) followed by an instruction barrier, so the new state is in
//! effect before the next dependent instruction. None of them take a lock:
//! the compare register has a single writer, the scheduler with interrupts
//! off.

use time_hil::generic_timer::CNTV_CTL;
use time_hil::TimerRegisters;
use tock_registers::fields::FieldValue;

pub struct TimerControl<'a, R: TimerRegisters + ?Sized> {
    regs: &'a R,
}

impl<'a, R: TimerRegisters + ?Sized> TimerControl<'a, R> {
    pub fn new(regs: &'a R) -> Self {
        Self { regs }
    }

    fn modify(&self, field: FieldValue<u64, CNTV_CTL::Register>) {
        let mut ctl = self.regs.control();
        ctl.modify(field);
        self.regs.set_control(ctl);

        // Ensure the write of the sys register is visible
        self.regs.barrier();
    }

    pub fn enable(&self) {
        self.modify(CNTV_CTL::ENABLE::SET);
    }

    pub fn disable(&self) {
        self.modify(CNTV_CTL::ENABLE::CLEAR);
    }

    pub fn mask_irq(&self) {
        self.modify(CNTV_CTL::IMASK::SET);
    }

    pub fn unmask_irq(&self) {
        self.modify(CNTV_CTL::IMASK::CLEAR);
    }

    pub fn clear_irq_status(&self) {
        self.modify(CNTV_CTL::ISTATUS::CLEAR);
    }

    /// Write the absolute deadline, in ticks.
    pub fn program_compare(&self, deadline: u64) {
        self.regs.set_compare(deadline);
        self.regs.barrier();
    }

    pub fn is_enabled(&self) -> bool {
        self.regs.control().is_set(CNTV_CTL::ENABLE)
    }

    pub fn is_masked(&self) -> bool {
        self.regs.control().is_set(CNTV_CTL::IMASK)
    }
}
