/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Width of SCAN_LD_N low pulse
pub const LOAD_PULSE_US: u32 = 200;
/// Data line settling time after the falling edge of SCAN_CLK
pub const SETTLE_US: u32 = 10;
pub const SCAN_BITS: u8 = 32;
/// Tick rate, one clock edge per tick
pub const DEFAULT_TICK_HZ: u32 = 4096;

/// Captured scan chain word, bit 31 is the first bit shifted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanSample(pub u32);

impl ScanSample {
    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub const fn bit(&self, register_bit: u8) -> bool {
        (self.0 >> register_bit) & 1 == 1
    }

    /// Logical byte in arrival order, byte 0 holds register bits 31..24
    pub const fn byte(&self, index: usize) -> u8 {
        self.0.to_be_bytes()[index]
    }
}

impl From<ScanSample> for u32 {
    fn from(value: ScanSample) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CapturePhase {
    Idle = 0,
    /// Load pulse done, waiting for the first falling edge
    Armed = 1,
    Clocking = 2,
    Complete = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Another capture is armed or clocking
    CaptureInProgress,
    /// Caller's time budget expired before all bits were counted
    Timeout { completed_bits: u8 },
}

/// Periodic interrupt that drives [`ScanCapture::on_tick`]
pub trait TickSource {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Lines and timer the capture engine drives.
pub trait ScanHardware {
    fn set_clock(&mut self, high: bool);
    /// Assert SCAN_LD_N low for [`LOAD_PULSE_US`]
    fn pulse_load(&mut self);
    /// Level of SCAN_DATA_IN after [`SETTLE_US`]
    fn sample_data(&mut self) -> bool;
    fn start_ticks(&mut self);
    fn stop_ticks(&mut self);
}

/// State shared between the tick interrupt (sole writer during a capture)
/// and the polling caller.
///
/// Only atomic load and store are used, Cortex-M0+ has no read-modify-write atomics.
pub struct ScanCapture {
    phase: AtomicU8,
    shift_register: AtomicU32,
    cursor: AtomicU8,
    completed_bits: AtomicU8,
    clock_high: AtomicBool,
}

impl Default for ScanCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanCapture {
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(CapturePhase::Idle as u8),
            shift_register: AtomicU32::new(0),
            cursor: AtomicU8::new(SCAN_BITS - 1),
            completed_bits: AtomicU8::new(0),
            // SCAN_CLK idles high
            clock_high: AtomicBool::new(true),
        }
    }

    pub fn phase(&self) -> CapturePhase {
        CapturePhase::try_from(self.phase.load(Ordering::Acquire)).unwrap_or(CapturePhase::Idle)
    }

    fn set_phase(&self, phase: CapturePhase) {
        self.phase.store(phase.into(), Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase(), CapturePhase::Armed | CapturePhase::Clocking)
    }

    pub fn completed_bits(&self) -> u8 {
        self.completed_bits.load(Ordering::Acquire)
    }

    /// Reset the shift register, pulse SCAN_LD_N and start the tick source.
    ///
    /// Rejected with [`CaptureError::CaptureInProgress`] before any line is touched
    /// while a previous capture is still running.
    pub fn begin_capture<H: ScanHardware>(&self, hw: &mut H) -> Result<(), CaptureError> {
        if self.is_busy() {
            hybrid_warn!("Scan capture requested while {} bits in flight", self.completed_bits());
            return Err(CaptureError::CaptureInProgress);
        }

        self.shift_register.store(0, Ordering::Relaxed);
        self.cursor.store(SCAN_BITS - 1, Ordering::Relaxed);
        self.completed_bits.store(0, Ordering::Relaxed);
        self.clock_high.store(true, Ordering::Relaxed);

        hw.set_clock(true);
        hw.pulse_load();

        self.set_phase(CapturePhase::Armed);
        hw.start_ticks();

        Ok(())
    }

    /// Tick handler body, one SCAN_CLK edge per call.
    ///
    /// Falling edge samples the data line into the next bit from the top,
    /// rising edge counts the bit. The tick source is stopped after the 32nd bit
    /// or on the first tick after the capture was abandoned.
    pub fn on_tick<H: ScanHardware>(&self, hw: &mut H) {
        if !self.is_busy() {
            hw.stop_ticks();
            return;
        }

        if self.clock_high.load(Ordering::Relaxed) {
            self.clock_high.store(false, Ordering::Relaxed);
            hw.set_clock(false);

            let cursor = self.cursor.load(Ordering::Relaxed);
            if hw.sample_data() {
                let shifted = self.shift_register.load(Ordering::Relaxed) | (1 << cursor);
                self.shift_register.store(shifted, Ordering::Relaxed);
            }
            self.cursor.store(cursor.saturating_sub(1), Ordering::Relaxed);
            self.set_phase(CapturePhase::Clocking);
        } else {
            self.clock_high.store(true, Ordering::Relaxed);
            let completed = self.completed_bits.load(Ordering::Relaxed) + 1;
            self.completed_bits.store(completed, Ordering::Release);
            hw.set_clock(true);

            if completed >= SCAN_BITS {
                hw.stop_ticks();
                self.set_phase(CapturePhase::Complete);
            }
        }
    }

    /// Finished sample, if any
    pub fn poll(&self) -> Option<ScanSample> {
        match self.phase() {
            CapturePhase::Complete => Some(ScanSample(self.shift_register.load(Ordering::Acquire))),
            _ => None,
        }
    }

    /// Busy wait on the completed bit counter.
    ///
    /// `expired` is polled on every spin, a closure that always returns `false`
    /// waits forever. On expiry the capture is abandoned and the tick handler
    /// stops the tick source on its next run.
    pub fn wait(&self, mut expired: impl FnMut() -> bool) -> Result<ScanSample, CaptureError> {
        loop {
            if self.completed_bits() >= SCAN_BITS {
                return Ok(ScanSample(self.shift_register.load(Ordering::Acquire)));
            }

            if expired() {
                let completed_bits = self.completed_bits();
                self.abort();
                hybrid_warn!("Scan capture timed out after {} bits", completed_bits);
                return Err(CaptureError::Timeout { completed_bits });
            }

            core::hint::spin_loop();
        }
    }

    pub fn abort(&self) {
        if self.is_busy() {
            self.set_phase(CapturePhase::Idle);
        }
    }
}

/// Scan chain lines on GPIO, the tick comes from a hardware timer.
pub struct ScanChain<LD, CLK, DATA, DELAY, TICK> {
    load_n: LD,
    clock: CLK,
    data: DATA,
    delay: DELAY,
    tick: TICK,
}

impl<LD, CLK, DATA, DELAY, TICK> ScanChain<LD, CLK, DATA, DELAY, TICK>
where
    LD: OutputPin,
    CLK: OutputPin,
    DATA: InputPin,
    DELAY: DelayNs,
    TICK: TickSource,
{
    pub fn new(mut load_n: LD, mut clock: CLK, data: DATA, delay: DELAY, tick: TICK) -> Self {
        load_n.set_high().ok();
        clock.set_high().ok();

        Self {
            load_n,
            clock,
            data,
            delay,
            tick,
        }
    }
}

impl<LD, CLK, DATA, DELAY, TICK> ScanHardware for ScanChain<LD, CLK, DATA, DELAY, TICK>
where
    LD: OutputPin,
    CLK: OutputPin,
    DATA: InputPin,
    DELAY: DelayNs,
    TICK: TickSource,
{
    fn set_clock(&mut self, high: bool) {
        match high {
            true => self.clock.set_high().ok(),
            false => self.clock.set_low().ok(),
        };
    }

    fn pulse_load(&mut self) {
        self.load_n.set_low().ok();
        self.delay.delay_us(LOAD_PULSE_US);
        self.load_n.set_high().ok();
    }

    fn sample_data(&mut self) -> bool {
        self.delay.delay_us(SETTLE_US);
        self.data.is_high().unwrap_or(false)
    }

    fn start_ticks(&mut self) {
        self.tick.start();
    }

    fn stop_ticks(&mut self) {
        self.tick.stop();
    }
}
