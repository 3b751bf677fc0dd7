/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use embassy_time::Duration;
use static_assertions::*;
use ttf_fixture_core::fru::{FruSlot, DUMP_MAX_LEN};
use ttf_fixture_core::scan::DEFAULT_TICK_HZ;

/// Rows printed when the FRU common header is not recognized
pub const FRU_HEADER_DUMP_LEN: usize = 16 * 2;
const_assert!(FRU_HEADER_DUMP_LEN <= DUMP_MAX_LEN);

/// Runtime knobs of the fixture, fixed at build time for now.
#[derive(Debug, Clone, Copy, defmt::Format)]
pub struct FixtureConfig {
    /// Slot ID straps are tied to ground on the fixture, slot 0 (0x50)
    pub fru_slot: FruSlot,
    /// One SCAN_CLK edge per tick
    pub scan_tick_hz: u32,
    /// `None` waits for the scan chain forever
    pub capture_budget: Option<Duration>,
    /// Card needs a moment after PRSNTB asserts before its scan chain is valid
    pub card_settle: Duration,
    pub poll_interval: Duration,
    pub i2c_hz: u32,
}

impl FixtureConfig {
    pub const fn default() -> Self {
        Self {
            fru_slot: FruSlot::Slot0,
            scan_tick_hz: DEFAULT_TICK_HZ,
            capture_budget: Some(Duration::from_millis(100)),
            card_settle: Duration::from_millis(2000),
            poll_interval: Duration::from_millis(1000),
            i2c_hz: 100_000,
        }
    }
}

// embassy-time tick must divide evenly into the scan clock
const_assert_eq!(embassy_time::TICK_HZ % DEFAULT_TICK_HZ as u64, 0);
