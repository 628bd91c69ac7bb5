/*++

Licensed under the Apache-2.0 license.

File Name:

    generic_timer.rs

Abstract:

    Register access capability for the ARM generic (virtual) timer.

--*/

use tock_registers::register_bitfields;
use tock_registers::LocalRegisterCopy;

// CNTV_CTL_EL0, virtual timer control.
register_bitfields![u64,
    pub CNTV_CTL [
        ENABLE OFFSET(0) NUMBITS(1) [],
        IMASK OFFSET(1) NUMBITS(1) [],
        ISTATUS OFFSET(2) NUMBITS(1) []
    ]
];

/// Snapshot of the control register used for read-modify-write sequences.
pub type ControlValue = LocalRegisterCopy<u64, CNTV_CTL::Register>;

/// Minimal access to the four logical timer registers.
///
/// Implementations perform raw accesses only. Ordering is the caller's job:
/// every write that later instructions depend on must be followed by
/// [`TimerRegisters::barrier`].
///
/// All methods take `&self`; system registers and MMIO are inherently shared,
/// and fakes use interior mutability.
pub trait TimerRegisters {
    /// Counter frequency in Hz (CNTFRQ_EL0). Read-only.
    fn counter_frequency(&self) -> u32;

    /// One raw read of the free-running counter (CNTVCT_EL0).
    ///
    /// On affected cores this read may be wrong when the counter crosses a
    /// 32-bit boundary; use a counter read strategy instead of calling this
    /// directly.
    fn counter(&self) -> u64;

    fn control(&self) -> ControlValue;

    fn set_control(&self, value: ControlValue);

    /// Absolute deadline in ticks (CNTV_CVAL_EL0).
    fn compare(&self) -> u64;

    fn set_compare(&self, deadline: u64);

    /// Instruction synchronization barrier. Makes prior register writes
    /// visible before any subsequent dependent instruction executes.
    fn barrier(&self);
}

impl<T: TimerRegisters + ?Sized> TimerRegisters for &T {
    fn counter_frequency(&self) -> u32 {
        (**self).counter_frequency()
    }

    fn counter(&self) -> u64 {
        (**self).counter()
    }

    fn control(&self) -> ControlValue {
        (**self).control()
    }

    fn set_control(&self, value: ControlValue) {
        (**self).set_control(value)
    }

    fn compare(&self) -> u64 {
        (**self).compare()
    }

    fn set_compare(&self, deadline: u64) {
        (**self).set_compare(deadline)
    }

    fn barrier(&self) {
        (**self).barrier()
    }
}
