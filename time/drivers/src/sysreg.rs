// Licensed under the Apache-2.0 license

//! EL0 virtual timer system registers.

use core::arch::asm;

use time_hil::generic_timer::ControlValue;
use time_hil::TimerRegisters;

/// The running core's virtual timer, reached through `mrs`/`msr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualTimerRegisters;

impl TimerRegisters for VirtualTimerRegisters {
    #[inline(always)]
    fn counter_frequency(&self) -> u32 {
        let freq: u64;
        unsafe { asm!("mrs {}, cntfrq_el0", out(reg) freq, options(nomem, nostack, preserves_flags)) };
        freq as u32
    }

    #[inline(always)]
    fn counter(&self) -> u64 {
        let ticks: u64;
        unsafe { asm!("mrs {}, cntvct_el0", out(reg) ticks, options(nomem, nostack, preserves_flags)) };
        ticks
    }

    #[inline(always)]
    fn control(&self) -> ControlValue {
        let ctl: u64;
        unsafe { asm!("mrs {}, cntv_ctl_el0", out(reg) ctl, options(nomem, nostack, preserves_flags)) };
        ControlValue::new(ctl)
    }

    #[inline(always)]
    fn set_control(&self, value: ControlValue) {
        unsafe { asm!("msr cntv_ctl_el0, {}", in(reg) value.get(), options(nomem, nostack, preserves_flags)) };
    }

    #[inline(always)]
    fn compare(&self) -> u64 {
        let cval: u64;
        unsafe { asm!("mrs {}, cntv_cval_el0", out(reg) cval, options(nomem, nostack, preserves_flags)) };
        cval
    }

    #[inline(always)]
    fn set_compare(&self, deadline: u64) {
        unsafe { asm!("msr cntv_cval_el0, {}", in(reg) deadline, options(nomem, nostack, preserves_flags)) };
    }

    #[inline(always)]
    fn barrier(&self) {
        unsafe { asm!("isb", options(nostack, preserves_flags)) };
    }
}
