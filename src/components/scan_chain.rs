/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Scan chain lines bound to GPIO, clocked from a high priority interrupt executor.
//!
//! The thread mode side arms a capture and busy-waits, the tick task preempts it
//! and walks [`ScanCapture::on_tick`] at the configured rate.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use defmt::unwrap;
use embassy_executor::InterruptExecutor;
use embassy_stm32::gpio::{AnyPin, Input, Output};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Instant, Ticker};
use ttf_fixture_core::scan::{CaptureError, ScanCapture, ScanChain, ScanSample, TickSource};

type ScanLines = ScanChain<
    Output<'static, AnyPin>, // SCAN_LD_N
    Output<'static, AnyPin>, // SCAN_CLK
    Input<'static, AnyPin>,  // SCAN_DATA_IN
    Delay,
    TickGate,
>;

static SCAN_CAPTURE: ScanCapture = ScanCapture::new();
static SCAN_LINES: Mutex<CriticalSectionRawMutex, RefCell<Option<ScanLines>>> =
    Mutex::new(RefCell::new(None));

static TICK_ENABLED: AtomicBool = AtomicBool::new(false);
static TICK_START: Signal<CriticalSectionRawMutex, ()> = Signal::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

// USART1 is not wired on the fixture, borrowed as the software interrupt
#[interrupt]
unsafe fn USART1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Gate of the tick task, [`TickSource`] for the capture engine
pub struct TickGate;

impl TickSource for TickGate {
    fn start(&mut self) {
        TICK_ENABLED.store(true, Ordering::Release);
        TICK_START.signal(());
    }

    fn stop(&mut self) {
        TICK_ENABLED.store(false, Ordering::Release);
    }
}

#[embassy_executor::task]
async fn scan_tick_task(tick_hz: u32) {
    loop {
        TICK_START.wait().await;
        let mut ticker = Ticker::every(Duration::from_hz(tick_hz.into()));

        while TICK_ENABLED.load(Ordering::Acquire) {
            ticker.next().await;

            SCAN_LINES.lock(|lines| {
                if let Some(lines) = lines.borrow_mut().as_mut() {
                    SCAN_CAPTURE.on_tick(lines);
                }
            });
        }
    }
}

/// Handle of the installed scan chain, only one exists
pub struct ScanChainDevice {
    _private: (),
}

impl ScanChainDevice {
    pub fn new(
        load_n: Output<'static, AnyPin>,
        clock: Output<'static, AnyPin>,
        data_in: Input<'static, AnyPin>,
    ) -> Self {
        let lines = ScanChain::new(load_n, clock, data_in, Delay, TickGate);
        SCAN_LINES.lock(|cell| *cell.borrow_mut() = Some(lines));

        Self { _private: () }
    }

    /// Spawn the tick task on the high priority executor
    pub fn start_tasks(&'static self, tick_hz: u32) {
        interrupt::USART1.set_priority(Priority::P1);
        let spawner = EXECUTOR_HIGH.start(interrupt::USART1);
        unwrap!(spawner.spawn(scan_tick_task(tick_hz)));
    }

    /// Blocking capture of the 32 bit scan chain word.
    ///
    /// `budget` of `None` waits until the card clocks all 32 bits.
    pub fn capture(&self, budget: Option<Duration>) -> Result<ScanSample, CaptureError> {
        SCAN_LINES.lock(|cell| {
            let mut lines = cell.borrow_mut();
            let armed = SCAN_CAPTURE.begin_capture(unwrap!(lines.as_mut()));
            armed
        })?;

        let deadline = budget.map(|budget| Instant::now() + budget);
        SCAN_CAPTURE.wait(|| deadline.is_some_and(|deadline| Instant::now() >= deadline))
    }
}
