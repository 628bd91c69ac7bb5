// Licensed under the Apache-2.0 license

use std::cell::RefCell;
use std::collections::VecDeque;

use time_hil::SplitCounter;

/// Split 64-bit counter that replays scripted register reads.
///
/// Each half keeps its own queue; once a queue runs dry the last value read
/// from it is repeated.
#[derive(Default)]
pub struct FakeSplitCounter {
    high: RefCell<VecDeque<u32>>,
    low: RefCell<VecDeque<u32>>,
    last_high: RefCell<u32>,
    last_low: RefCell<u32>,
}

impl FakeSplitCounter {
    pub fn new(high: &[u32], low: &[u32]) -> Self {
        Self {
            high: RefCell::new(high.iter().copied().collect()),
            low: RefCell::new(low.iter().copied().collect()),
            ..Default::default()
        }
    }

    /// Reads of the high word still queued.
    pub fn pending_high(&self) -> usize {
        self.high.borrow().len()
    }
}

impl SplitCounter for FakeSplitCounter {
    fn high(&self) -> u32 {
        if let Some(value) = self.high.borrow_mut().pop_front() {
            *self.last_high.borrow_mut() = value;
        }
        *self.last_high.borrow()
    }

    fn low(&self) -> u32 {
        if let Some(value) = self.low.borrow_mut().pop_front() {
            *self.last_low.borrow_mut() = value;
        }
        *self.last_low.borrow()
    }
}
