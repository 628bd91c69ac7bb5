/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Hardware Interface Layer (HIL) for the platform time subsystem.
--*/

#![no_std]

pub mod generic_timer;
pub mod split_counter;
pub mod timers;

pub use generic_timer::{TimerRegisters, CNTV_CTL};
pub use split_counter::SplitCounter;
pub use timers::{Clock, NextInterrupt, Timers};
