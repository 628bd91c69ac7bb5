/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Platform time drivers: counter calibration, monotonic clock and the
    scheduler's wake-up timer.

--*/

#![cfg_attr(not(test), no_std)]

pub mod arm_side_timer;
pub mod boot_cell;
pub mod calibration;
pub mod clock;
pub mod config;
pub mod control;
pub mod counter;
pub mod error;
pub mod generic_timer;
#[cfg(all(target_arch = "aarch64", feature = "platform"))]
pub mod platform;
pub mod regs;
pub mod scale;
#[cfg(target_arch = "aarch64")]
pub mod sysreg;
pub mod system_timer;

pub use arm_side_timer::ArmSideTimer;
pub use boot_cell::BootCell;
pub use calibration::{InitStage, TimerCalibration};
pub use config::TimeConfig;
pub use counter::{CounterRead, DefaultCounterRead, Erratum858921Read, PlainRead};
pub use error::{TimeError, TimeResult};
pub use generic_timer::{GenericTimer, TimerIrq};
pub use scale::{compute_scale, FixedPointScale};
#[cfg(target_arch = "aarch64")]
pub use sysreg::VirtualTimerRegisters;
pub use system_timer::SystemTimer;
