/*++

Licensed under the Apache-2.0 license.

File Name:

    arm_side_timer.rs

Abstract:

    Driver for the BCM283x ARM-side (SP804-style) down-counting timer.

--*/

use kernel::utilities::StaticRef;
use log::debug;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};

use crate::regs::bits::{ArmTimerControl, ArmTimerIrq};
use crate::regs::{regs, ARM_TIMER_ADDR};

pub const ARM_TIMER_BASE: StaticRef<regs::ArmTimer> =
    unsafe { StaticRef::new(ARM_TIMER_ADDR as *const regs::ArmTimer) };

pub struct ArmSideTimer {
    registers: StaticRef<regs::ArmTimer>,
}

impl ArmSideTimer {
    pub const fn new(registers: StaticRef<regs::ArmTimer>) -> Self {
        ArmSideTimer { registers }
    }

    pub fn load(&self) -> u32 {
        self.registers.load.get()
    }

    /// Count to start from. The counter reloads it and raises the interrupt
    /// when it reaches zero.
    pub fn set_load(&self, ticks: u32) {
        self.registers.load.set(ticks);
    }

    pub fn value(&self) -> u32 {
        self.registers.value.get()
    }

    /// Start counting with a 32-bit counter and no prescaler.
    pub fn enable(&self) {
        self.registers.control.modify(
            ArmTimerControl::Counter32::SET
                + ArmTimerControl::Prescale::Div1
                + ArmTimerControl::Enable::SET,
        );
    }

    pub fn disable(&self) {
        self.registers
            .control
            .modify(ArmTimerControl::Enable::CLEAR);
    }

    pub fn irq_enable(&self) {
        self.registers
            .control
            .modify(ArmTimerControl::IntEnable::SET);
    }

    pub fn irq_disable(&self) {
        self.registers
            .control
            .modify(ArmTimerControl::IntEnable::CLEAR);
    }

    /// Any write acknowledges the interrupt.
    pub fn irq_clear(&self) {
        self.registers.irq_clear.set(1);
    }

    pub fn irq_pending(&self) -> bool {
        self.registers.raw_irq.is_set(ArmTimerIrq::Pending)
    }

    /// Service a fired interrupt: sample the counter, disable and
    /// acknowledge the interrupt. Returns how many cycles the counter ran
    /// past its reload point before being serviced. Does not re-enable.
    pub fn service_irq(&self) -> u32 {
        let value = self.value();
        self.irq_disable();
        self.irq_clear();

        let delay = self.load().wrapping_sub(value);
        debug!("[time] Timer IRQ delay: {} cycles", delay);
        delay
    }
}
