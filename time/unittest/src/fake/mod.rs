// Licensed under the Apache-2.0 license

mod generic_timer;
mod split_counter;

pub use generic_timer::FakeTimerRegisters;
pub use split_counter::FakeSplitCounter;
