// Licensed under the Apache-2.0 license

//! Entry points for the scheduler and the interrupt vector.
//!
//! The platform runs one generic timer, owned by the boot core.

use crate::boot_cell::BootCell;
use crate::config::TimeConfig;
use crate::generic_timer::GenericTimer;
use crate::sysreg::VirtualTimerRegisters;

type PlatformTimer = GenericTimer<VirtualTimerRegisters>;

static TIMER: BootCell<PlatformTimer> = BootCell::new();

fn timer() -> &'static PlatformTimer {
    match TIMER.get() {
        Ok(timer) => timer,
        Err(err) => panic!("[time] {}", err),
    }
}

/// Calibrate and enable the timer. Must be called before interrupts are
/// enabled. Panics on failure: without a clock there is no scheduler.
pub fn time_init() {
    let timer = match GenericTimer::init(VirtualTimerRegisters, TimeConfig::DEFAULT) {
        Ok(timer) => timer,
        Err(err) => panic!("Failed to initialize platform time: {}", err),
    };

    // Safety: boot runs single-threaded with interrupts still disabled.
    if let Err(err) = unsafe { TIMER.init(timer) } {
        panic!("Failed to initialize platform time: {}", err);
    }
}

/// Nanoseconds since `time_init`.
pub fn monotonic_clock() -> u64 {
    timer().monotonic_ns()
}

/// Wall time in nanoseconds.
pub fn wall_clock() -> u64 {
    timer().wall_ns()
}

/// See [`GenericTimer::arm_next_interrupt`]. Interrupts must be disabled.
pub fn setup_next_interrupt(delta_ns: u64) {
    timer().arm_next_interrupt(delta_ns);
}

#[no_mangle]
pub extern "C" fn handle_timer_irq() {
    timer().service_irq();
}
