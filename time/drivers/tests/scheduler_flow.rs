// Licensed under the Apache-2.0 license

use log::LevelFilter;
use simple_logger::SimpleLogger;
use time_drivers::{GenericTimer, PlainRead, TimeConfig, TimeError};
use time_hil::{Clock, NextInterrupt, TimerRegisters, Timers};
use time_unittest::fake::FakeTimerRegisters;

const FREQ: u32 = 54_000_000;

fn init_logger() {
    let _ = SimpleLogger::new().with_level(LevelFilter::Trace).init();
}

// What a cooperative scheduler does when every thread sleeps: arm the timer
// for the earliest wake-up, wait, then service the interrupt.
fn sleep_once<T: Clock + NextInterrupt>(timer: &T, regs: &FakeTimerRegisters, delta_ns: u64) {
    timer.setup_next_interrupt(delta_ns);
    assert!(!regs.is_masked());

    let deadline = regs.compare();
    regs.set_counter(deadline + 3);
    regs.fire();

    timer.handle_timer_irq();
    assert!(regs.is_masked());
    assert!(!regs.is_pending());
}

#[test]
fn test_scheduler_sleep_cycle() {
    init_logger();

    let regs = FakeTimerRegisters::new(FREQ);
    regs.set_counter(1_000);
    let timer = GenericTimer::<_, PlainRead>::init(&regs, TimeConfig::DEFAULT).unwrap();
    assert!(regs.is_enabled());
    assert!(regs.is_masked());

    let mut last = timer.monotonic_clock();
    for delta_ms in [1u64, 10, 100, 1_000] {
        sleep_once(&timer, &regs, delta_ms * 1_000_000);

        let now = timer.monotonic_clock();
        assert!(now >= last);
        let slept = now - last;
        let expected = delta_ms * 1_000_000;
        assert!(slept.abs_diff(expected) <= 1_000, "{slept} vs {expected}");
        last = now;
    }

    // Re-arming is only ever done by the scheduler.
    let deadline = regs.compare();
    regs.advance(FREQ as u64);
    assert_eq!(regs.compare(), deadline);
    assert!(regs.is_masked());
}

#[test]
fn test_wall_clock_with_epoch() {
    init_logger();

    let regs = FakeTimerRegisters::new(FREQ);
    let epoch = 1_000_000_000_000;
    let timer = GenericTimer::<_, PlainRead>::init(
        &regs,
        TimeConfig {
            epoch_offset_ns: epoch,
        },
    )
    .unwrap();

    regs.advance(FREQ as u64 * 2);
    let mono = timer.monotonic_clock();
    assert!(mono.abs_diff(2_000_000_000) <= 2);
    assert_eq!(timer.wall_clock(), mono + epoch);
    assert_eq!(timer.elapsed_ms(0, timer.ticks()), 2_000);
}

#[test]
fn test_free_running_counter_is_monotonic() {
    init_logger();

    let regs = FakeTimerRegisters::new(FREQ);
    regs.set_step(17);
    let timer = GenericTimer::<_, PlainRead>::init(&regs, TimeConfig::DEFAULT).unwrap();

    let mut last = 0;
    for _ in 0..1_000 {
        let now = timer.monotonic_clock();
        assert!(now >= last);
        last = now;
    }
}

#[test]
fn test_boot_aborts_without_frequency() {
    init_logger();

    let regs = FakeTimerRegisters::new(0);
    let err = GenericTimer::<_, PlainRead>::init(&regs, TimeConfig::DEFAULT)
        .err()
        .unwrap();
    assert_eq!(err, TimeError::ZeroFrequency);
    assert!(!regs.is_enabled());
    assert!(!regs.is_masked());
}
