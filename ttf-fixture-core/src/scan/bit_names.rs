/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use core::fmt;

use static_assertions::*;

use super::capture::{ScanSample, SCAN_BITS};

/// Signal names in arrival order, index 0 is register bit 31 (logical byte 0, bit 7).
/// `#` suffix marks per port signals, `_N` suffix marks active low.
pub const SCAN_BIT_NAMES: [&str; SCAN_BITS as usize] = [
    // Byte 0
    "FAN_ON_AUX",
    "TEMP_CRIT_N",
    "TEMP_WARN_N",
    "WAKE_N",
    "PRSNTB[3]_P#",
    "PRSNTB[2]_P#",
    "PRSNTB[1]_P#",
    "PRSNTB[0]_P#",
    // Byte 1
    "LINK_SPDB_P2#",
    "LINK_SPDA_P2#",
    "ACT_P1#",
    "LINK_SPDB_P1#",
    "LINK_SPDA_P1#",
    "ACT_P0#",
    "LINK_SPDB_P0#",
    "LINK_SPDA_P0#",
    // Byte 2
    "LINK_SPDA_P5#",
    "ACT_P4#",
    "LINK_SPDB_P4#",
    "LINK_SPDA_P4#",
    "ACT_P3#",
    "LINK_SPDB_P3#",
    "LINK_SPDA_P3#",
    "ACT_P2#",
    // Byte 3
    "ACT_P7#",
    "LINK_SPDB_P7#",
    "LINK_SPDA_P7#",
    "ACT_P6#",
    "LINK_SPDB_P6#",
    "LINK_SPDA_P6#",
    "ACT_P5#",
    "LINK_SPDB_P5#",
];

const_assert_eq!(SCAN_BIT_NAMES.len() % 8, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NamedBit {
    pub name: &'static str,
    /// Logical byte in arrival order, 0..=3
    pub byte: u8,
    /// Bit inside the logical byte, 7 arrives first
    pub bit: u8,
    /// Position in [`ScanSample`], 31..=0
    pub register_bit: u8,
    pub level: bool,
}

impl NamedBit {
    fn at(sample: ScanSample, index: usize) -> Self {
        let register_bit = SCAN_BITS - 1 - index as u8;
        Self {
            name: SCAN_BIT_NAMES[index],
            byte: index as u8 / 8,
            bit: 7 - index as u8 % 8,
            register_bit,
            level: sample.bit(register_bit),
        }
    }
}

/// `0.7 FAN_ON_AUX ... 1`
impl fmt::Display for NamedBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} {:<16} ... {}",
            self.byte, self.bit, self.name, self.level as u8
        )
    }
}

/// Pairs a captured word with the signal names, MSB first.
pub struct ScanBitNamer;

impl ScanBitNamer {
    pub fn iter(sample: ScanSample) -> impl ExactSizeIterator<Item = NamedBit> {
        (0..SCAN_BIT_NAMES.len()).map(move |index| NamedBit::at(sample, index))
    }

    pub fn find(sample: ScanSample, name: &str) -> Option<NamedBit> {
        Self::iter(sample).find(|named| named.name == name)
    }
}
