// Licensed under the Apache-2.0 license

//! Unit test support for the time subsystem.
//!
//! The `fake` module provides in-memory stand-ins for the hardware interfaces
//! declared in `time-hil`, so drivers can be exercised on the host without
//! touching real system registers or MMIO.

pub mod fake;
