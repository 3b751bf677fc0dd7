/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Hardware independent part of the NIC 3.0 test fixture firmware.
//!
//! - [`fru`] : IPMI FRU inventory decoder working on top of any [`fru::ByteStore`]
//!   (the fixture uses the I2C EEPROM on the card under test).
//! - [`scan`] : Timer tick driven scan chain capture engine that shifts 32 status bits
//!   out of the card over SCAN_CLK / SCAN_DATA_IN.
//! - [`board`] : Board revision, scan chain version and card presence helpers.
//!
//! The firmware binds these on real peripherals, host side tests bind them on mocks.

#![no_std]

#[cfg(test)] // for the print out internnal log in test code
extern crate std;

#[macro_use]
mod common;

pub mod board;
pub mod fru;
pub mod scan;

pub use board::{BoardRevision, CardPresence, ScanChainVersion};
pub use fru::{decode_field, decode_inventory, dump_region, ByteStore, FruError, InventoryRecord};
pub use scan::{CaptureError, CapturePhase, ScanCapture, ScanSample};
