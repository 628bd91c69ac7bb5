// Licensed under the Apache-2.0 license

//! MMIO register blocks of the BCM283x timer peripherals.

/// SoC system timer (free-running, 1 MHz).
pub const SYSTEM_TIMER_ADDR: u32 = 0x3F00_3000;

/// ARM-side SP804-style timer.
pub const ARM_TIMER_ADDR: u32 = 0x3F00_B400;

pub const SYSTEM_TIMER_FREQ_HZ: u64 = 1_000_000;

pub mod bits {
    use tock_registers::register_bitfields;

    register_bitfields! {
        u32,
        pub SystemTimerCs [
            M0 OFFSET(0) NUMBITS(1) [],
            M1 OFFSET(1) NUMBITS(1) [],
            M2 OFFSET(2) NUMBITS(1) [],
            M3 OFFSET(3) NUMBITS(1) [],
        ],
        pub ArmTimerControl [
            Counter32 OFFSET(1) NUMBITS(1) [],
            Prescale OFFSET(2) NUMBITS(2) [
                Div1 = 0,
                Div16 = 1,
                Div256 = 2,
            ],
            IntEnable OFFSET(5) NUMBITS(1) [],
            Enable OFFSET(7) NUMBITS(1) [],
            HaltInDebug OFFSET(8) NUMBITS(1) [],
            FreeRunEnable OFFSET(9) NUMBITS(1) [],
            FreeRunPrescale OFFSET(16) NUMBITS(8) [],
        ],
        pub ArmTimerIrq [
            Pending OFFSET(0) NUMBITS(1) [],
        ],
    }
}

pub mod regs {
    use tock_registers::register_structs;
    use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};

    register_structs! {
        pub SystemTimer {
            (0x0 => pub cs: ReadWrite<u32, super::bits::SystemTimerCs::Register>),
            (0x4 => pub clo: ReadOnly<u32>),
            (0x8 => pub chi: ReadOnly<u32>),
            (0xc => pub compare: [ReadWrite<u32>; 4]),
            (0x1c => @END),
        },
        pub ArmTimer {
            (0x0 => pub load: ReadWrite<u32>),
            (0x4 => pub value: ReadOnly<u32>),
            (0x8 => pub control: ReadWrite<u32, super::bits::ArmTimerControl::Register>),
            (0xc => pub irq_clear: WriteOnly<u32>),
            (0x10 => pub raw_irq: ReadOnly<u32, super::bits::ArmTimerIrq::Register>),
            (0x14 => pub masked_irq: ReadOnly<u32, super::bits::ArmTimerIrq::Register>),
            (0x18 => pub reload: ReadWrite<u32>),
            (0x1c => pub prediv: ReadWrite<u32>),
            (0x20 => pub free_run: ReadOnly<u32>),
            (0x24 => @END),
        }
    }
}
