/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! # NIC 3.0 scan chain readback
//!
//! ```text
//! SCAN_LD_N  ‾‾‾‾|__200us__|‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//! SCAN_CLK   ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|____|‾‾‾‾|____|‾‾‾‾ ... |____|‾‾‾‾
//!                                 ^ sample 10us after fall, bit 31 first
//! ```
//! One edge per timer tick, 64 ticks for the 32 bit status word.

mod bit_names;
mod capture;

pub use bit_names::{NamedBit, ScanBitNamer, SCAN_BIT_NAMES};
pub use capture::{
    CaptureError, CapturePhase, ScanCapture, ScanChain, ScanHardware, ScanSample, TickSource,
    DEFAULT_TICK_HZ, LOAD_PULSE_US, SCAN_BITS, SETTLE_US,
};
