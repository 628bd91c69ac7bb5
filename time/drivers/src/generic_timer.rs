/*++

Licensed under the Apache-2.0 license.

File Name:

    generic_timer.rs

Abstract:

    ARM generic timer driver: boot-time calibration, monotonic and wall
    clocks, next-interrupt arming and the timer IRQ service routine.

--*/

use core::marker::PhantomData;

use log::{debug, info, trace};
use time_hil::{Clock as ClockHil, NextInterrupt, TimerRegisters, Timers};

use crate::calibration::{InitStage, TimerCalibration};
use crate::clock::Clock;
use crate::config::TimeConfig;
use crate::control::TimerControl;
use crate::counter::{CounterRead, DefaultCounterRead};
use crate::error::TimeResult;

/// What the IRQ service routine observed when the timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerIrq {
    /// Counter value when the routine ran.
    pub now: u64,
    /// Deadline that was programmed.
    pub deadline: u64,
    /// Cycles between the deadline and servicing. Zero for an early or
    /// spurious fire.
    pub overrun: u64,
}

/// A calibrated, enabled generic timer owned by one core.
///
/// Only [`GenericTimer::init`] constructs it, so holding one means the
/// calibration succeeded and the timer is enabled with its IRQ masked.
pub struct GenericTimer<R: TimerRegisters, C: CounterRead = DefaultCounterRead> {
    regs: R,
    clock: Clock,
    _read: PhantomData<C>,
}

impl<R: TimerRegisters, C: CounterRead> GenericTimer<R, C> {
    /// Run the boot-time init sequence. Must be called before interrupts are
    /// globally enabled.
    ///
    /// Any error is fatal for the platform. On error the control register
    /// has not been touched.
    pub fn init(regs: R, config: TimeConfig) -> TimeResult<Self> {
        // Monotonic time begins at boot_ticks, the first read of the counter
        // before calibration.
        let boot_ticks = C::read_ticks(&regs);

        let mut stage = InitStage::Uninitialized;
        let mut advance = |next: InitStage| {
            debug_assert!(next > stage);
            trace!("[time] {:?} -> {:?}", stage, next);
            stage = next;
        };

        let counter_freq = regs.counter_frequency();
        advance(InitStage::FrequencyRead);

        let calibration = TimerCalibration::new(boot_ticks, counter_freq)?;
        advance(InitStage::TickToNsCalibrated);
        advance(InitStage::NsToTickCalibrated);
        info!(
            "[time] counter {} Hz, to_ns {}>>{}, to_ticks {}>>{}",
            counter_freq,
            calibration.ns_per_tick(),
            calibration.shift_to_ns(),
            calibration.tick_per_ns(),
            calibration.shift_to_tick()
        );

        let control = TimerControl::new(&regs);
        // Mask before the scheduler starts, otherwise a stale compare value
        // raises an interrupt during boot.
        control.mask_irq();
        advance(InitStage::IrqMasked);

        control.enable();
        advance(InitStage::Enabled);
        advance(InitStage::Ready);

        Ok(Self {
            regs,
            clock: Clock::new(calibration, config),
            _read: PhantomData,
        })
    }

    pub fn calibration(&self) -> &TimerCalibration {
        self.clock.calibration()
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    fn control(&self) -> TimerControl<'_, R> {
        TimerControl::new(&self.regs)
    }

    pub fn read_ticks(&self) -> u64 {
        C::read_ticks(&self.regs)
    }

    /// Nanoseconds since `init`.
    pub fn monotonic_ns(&self) -> u64 {
        self.clock.monotonic_ns(self.read_ticks())
    }

    pub fn wall_ns(&self) -> u64 {
        self.clock.wall_ns(self.read_ticks())
    }

    /// Program the compare register `delta_ns` from now and unmask the IRQ.
    ///
    /// Only for the scheduler's idle path, with local interrupts disabled.
    /// This is not a yield and not a general-purpose alarm: nothing protects
    /// the compare register from a second writer except that precondition.
    pub fn arm_next_interrupt(&self, delta_ns: u64) {
        let until_ticks = self
            .read_ticks()
            .wrapping_add(self.calibration().ns_to_ticks(delta_ns));

        let control = self.control();
        control.program_compare(until_ticks);
        control.unmask_irq();
    }

    /// Service a fired timer interrupt.
    ///
    /// Masks and clears the interrupt and reports how late it was serviced.
    /// Re-arming is left to the scheduler.
    pub fn service_irq(&self) -> TimerIrq {
        let now = self.read_ticks();
        let deadline = self.regs.compare();

        let control = self.control();
        control.mask_irq();
        control.clear_irq_status();

        let overrun = now.saturating_sub(deadline);
        debug!("[time] Timer IRQ delay: {} cycles", overrun);

        TimerIrq {
            now,
            deadline,
            overrun,
        }
    }

    /// Idle until the monotonic clock reaches `until_ns`.
    ///
    /// Arms the timer for the remaining time and calls `idle`, which is
    /// expected to wait for an interrupt (e.g. `wfi`) and return once one has
    /// been taken. Returns at once if the deadline has already passed. Same
    /// precondition as [`GenericTimer::arm_next_interrupt`].
    pub fn block_until(&self, until_ns: u64, mut idle: impl FnMut()) {
        loop {
            let now = self.monotonic_ns();
            if now >= until_ns {
                return;
            }
            self.arm_next_interrupt(until_ns - now);
            idle();
        }
    }
}

impl<R: TimerRegisters, C: CounterRead> ClockHil for GenericTimer<R, C> {
    fn monotonic_clock(&self) -> u64 {
        self.monotonic_ns()
    }

    fn wall_clock(&self) -> u64 {
        self.wall_ns()
    }
}

impl<R: TimerRegisters, C: CounterRead> NextInterrupt for GenericTimer<R, C> {
    fn setup_next_interrupt(&self, delta_ns: u64) {
        self.arm_next_interrupt(delta_ns);
    }

    fn handle_timer_irq(&self) {
        self.service_irq();
    }
}

impl<R: TimerRegisters, C: CounterRead> Timers for GenericTimer<R, C> {
    fn ticks(&self) -> u64 {
        self.read_ticks()
    }

    fn clock_freq_hz(&self) -> u64 {
        self.calibration().counter_freq() as u64
    }
}
