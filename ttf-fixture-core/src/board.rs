/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Fixture strap and card present inputs

use core::fmt;

use embedded_hal::digital::InputPin;

/// Revision of the fixture board itself, strapped on BOARD_ID[2:0].
///
/// | BOARD_ID | Revision |
/// | -------- | -------- |
/// | 0b000    | X06      |
/// | 0b001    | X07      |
/// | ...      | ...      |
/// | 0b111    | X13      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardRevision {
    pins: u8,
}

impl BoardRevision {
    /// X06 is the first board with BOARD_ID straps
    pub const BASE: u8 = 6;

    pub const fn from_pins(pins: u8) -> Self {
        Self { pins: pins & 0b111 }
    }

    pub const fn from_levels(id2: bool, id1: bool, id0: bool) -> Self {
        Self::from_pins(((id2 as u8) << 2) | ((id1 as u8) << 1) | id0 as u8)
    }

    /// Pulled down straps, a failed read counts as low
    pub fn read<P: InputPin>(id2: &mut P, id1: &mut P, id0: &mut P) -> Self {
        Self::from_levels(
            id2.is_high().unwrap_or(false),
            id1.is_high().unwrap_or(false),
            id0.is_high().unwrap_or(false),
        )
    }

    pub const fn pins(&self) -> u8 {
        self.pins
    }

    pub const fn number(&self) -> u8 {
        Self::BASE + self.pins
    }
}

impl fmt::Display for BoardRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{:02}", self.number())
    }
}

/// PRSNTB[3:0]_N of the card edge, active low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CardPresence {
    bits: u8,
}

impl CardPresence {
    const ABSENT: u8 = 0b1111;

    /// `bits` is PRSNTB3_N in bit 3 down to PRSNTB0_N in bit 0
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0b1111 }
    }

    pub fn read<P: InputPin>(prsntb: [&mut P; 4]) -> Self {
        let bits = prsntb
            .into_iter()
            .enumerate()
            // floating is pulled up, treat failure the same
            .fold(0, |acc, (i, pin)| acc | ((pin.is_high().unwrap_or(true) as u8) << i));
        Self::from_bits(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Any PRSNTB line pulled low means a card is seated
    pub const fn is_present(&self) -> bool {
        self.bits != Self::ABSENT
    }
}

/// `PRSNTB [3:0]   0111 CARD`
impl fmt::Display for CardPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.is_present() {
            true => "CARD",
            false => "VOID",
        };
        write!(f, "PRSNTB [3:0]   {:04b} {}", self.bits, tag)
    }
}

/// SCAN_VER[1:0] reported by the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanChainVersion(u8);

impl ScanChainVersion {
    pub const fn from_levels(ver1: bool, ver0: bool) -> Self {
        Self(((ver1 as u8) << 1) | ver0 as u8)
    }

    pub fn read<P: InputPin>(ver1: &mut P, ver0: &mut P) -> Self {
        Self::from_levels(
            ver1.is_high().unwrap_or(false),
            ver0.is_high().unwrap_or(false),
        )
    }

    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ScanChainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCAN VERS [1:0]     {:02b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use std::format;

    use embedded_hal::digital::ErrorType;

    use super::*;

    struct Level(bool);

    impl ErrorType for Level {
        type Error = Infallible;
    }

    impl InputPin for Level {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    #[test]
    fn revision_from_straps() {
        assert_eq!(format!("{}", BoardRevision::from_pins(0)), "X06");
        assert_eq!(format!("{}", BoardRevision::from_levels(false, false, true)), "X07");
        assert_eq!(BoardRevision::from_levels(true, false, true).number(), 11);
        assert_eq!(format!("{}", BoardRevision::from_pins(0xFF)), "X13");

        let rev = BoardRevision::read(&mut Level(false), &mut Level(true), &mut Level(false));
        assert_eq!(rev.pins(), 0b010);
    }

    #[test]
    fn card_presence() {
        assert!(!CardPresence::from_bits(0xF).is_present());
        assert!(CardPresence::from_bits(0xE).is_present());
        assert!(CardPresence::from_bits(0x0).is_present());
        // upper nibble is not a PRSNTB line
        assert!(!CardPresence::from_bits(0xFF).is_present());

        let (mut p0, mut p1, mut p2, mut p3) = (Level(true), Level(true), Level(true), Level(false));
        let presence = CardPresence::read([&mut p0, &mut p1, &mut p2, &mut p3]);
        assert_eq!(presence.bits(), 0b0111);
        assert_eq!(format!("{}", presence), "PRSNTB [3:0]   0111 CARD");
        assert_eq!(format!("{}", CardPresence::from_bits(0xF)), "PRSNTB [3:0]   1111 VOID");
    }

    #[test]
    fn scan_version() {
        let version = ScanChainVersion::read(&mut Level(true), &mut Level(false));
        assert_eq!(version.value(), 2);
        assert_eq!(format!("{}", version), "SCAN VERS [1:0]     10");
    }
}
