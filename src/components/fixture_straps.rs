/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use embassy_stm32::gpio::{AnyPin, Input};
use ttf_fixture_core::board::{BoardRevision, CardPresence, ScanChainVersion};

/// Static inputs of the fixture and the card edge
pub struct FixtureStraps {
    /// BOARD_ID0..=2, pulled down
    board_id: [Input<'static, AnyPin>; 3],
    /// PRSNTB0_N..=3_N, pulled up
    prsntb_n: [Input<'static, AnyPin>; 4],
    /// SCAN_VER0..=1
    scan_ver: [Input<'static, AnyPin>; 2],
}

impl FixtureStraps {
    pub const fn new(
        board_id: [Input<'static, AnyPin>; 3],
        prsntb_n: [Input<'static, AnyPin>; 4],
        scan_ver: [Input<'static, AnyPin>; 2],
    ) -> Self {
        Self {
            board_id,
            prsntb_n,
            scan_ver,
        }
    }

    pub fn board_revision(&self) -> BoardRevision {
        let [id0, id1, id2] = &self.board_id;
        BoardRevision::from_levels(id2.is_high(), id1.is_high(), id0.is_high())
    }

    pub fn card_presence(&self) -> CardPresence {
        let bits = self
            .prsntb_n
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, pin)| acc | ((pin.is_high() as u8) << i));

        CardPresence::from_bits(bits)
    }

    pub fn scan_version(&self) -> ScanChainVersion {
        let [ver0, ver1] = &self.scan_ver;
        ScanChainVersion::from_levels(ver1.is_high(), ver0.is_high())
    }
}
