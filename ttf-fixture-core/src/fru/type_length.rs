/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use bit_field::BitField;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// ## Type/Length byte
///
/// | b7 | b6 | b5 | b4 | b3 | b2 | b1 | b0 |
/// | :-: | :-: | :-: | :-: | :-: | :-: | :-: | :-: |
/// | type   || length (number of encoded bytes)   ||||||
///
/// One tag precedes every variable length field of an FRU area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TypeLengthTag(u8);

/// Encoding selected by the top two bits of a [`TypeLengthTag`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FieldEncoding {
    /// `00` : Binary or unspecified
    Binary = 0,
    /// `01` : BCD plus
    BcdPlus = 1,
    /// `10` : 6-bit ASCII, packed
    SixBitAscii = 2,
    /// `11` : 8-bit ASCII + Latin 1 (interpretation depends on language code)
    Text8Bit = 3,
}

pub const TYPE_LENGTH_MAX_LEN: usize = 0x3F;

impl TypeLengthTag {
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub fn new(encoding: FieldEncoding, length: usize) -> Self {
        let mut raw = 0u8;
        raw.set_bits(6..8, encoding.into());
        raw.set_bits(0..6, length.min(TYPE_LENGTH_MAX_LEN) as u8);
        Self(raw)
    }

    pub const fn raw(&self) -> u8 {
        self.0
    }

    pub fn encoding(&self) -> FieldEncoding {
        match self.0.get_bits(6..8) {
            0 => FieldEncoding::Binary,
            1 => FieldEncoding::BcdPlus,
            2 => FieldEncoding::SixBitAscii,
            _ => FieldEncoding::Text8Bit,
        }
    }

    /// Number of payload bytes that follow the tag
    pub fn length(&self) -> usize {
        self.0.get_bits(0..6) as usize
    }
}

impl From<u8> for TypeLengthTag {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_type_and_length() {
        let tag = TypeLengthTag::from_raw(0xC5);
        assert_eq!(tag.encoding(), FieldEncoding::Text8Bit);
        assert_eq!(tag.length(), 5);

        let tag = TypeLengthTag::from_raw(0x83);
        assert_eq!(tag.encoding(), FieldEncoding::SixBitAscii);
        assert_eq!(tag.length(), 3);

        let tag = TypeLengthTag::from_raw(0x7F);
        assert_eq!(tag.encoding(), FieldEncoding::BcdPlus);
        assert_eq!(tag.length(), 63);

        let tag = TypeLengthTag::from_raw(0x00);
        assert_eq!(tag.encoding(), FieldEncoding::Binary);
        assert_eq!(tag.length(), 0);
    }

    #[test]
    fn compose_tag() {
        assert_eq!(TypeLengthTag::new(FieldEncoding::Text8Bit, 5).raw(), 0xC5);
        assert_eq!(TypeLengthTag::new(FieldEncoding::SixBitAscii, 3).raw(), 0x83);
        // length saturates at 6 bits instead of leaking into the type bits
        assert_eq!(TypeLengthTag::new(FieldEncoding::Binary, 200).raw(), 0x3F);
    }

    #[test]
    fn encoding_from_primitive() {
        assert_eq!(FieldEncoding::try_from(2u8).ok(), Some(FieldEncoding::SixBitAscii));
        assert!(FieldEncoding::try_from(4u8).is_err());
    }
}
