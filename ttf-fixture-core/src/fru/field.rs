/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Decoder for a single type/length prefixed FRU field.

use core::fmt::Write;

use heapless::String;
use static_assertions::*;

use super::type_length::{FieldEncoding, TypeLengthTag, TYPE_LENGTH_MAX_LEN};

/// Large enough for the longest rendering, binary marker plus 63 bytes in hex.
pub const FIELD_TEXT_CAPACITY: usize = 160;

pub type FieldText = String<FIELD_TEXT_CAPACITY>;

pub const BINARY_FIELD_MARKER: &str = "Binary or unspecified format: ";

/// Substitution for BCD plus nibbles `0xD..=0xF`
pub const BCD_PLUS_UNMAPPED: char = '?';

/// 6-bit ASCII symbol table, ASCII `0x20..=0x5F` in order.
pub const SIX_BIT_ASCII_TABLE: [u8; 64] =
    *b" !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_";

const_assert!(BINARY_FIELD_MARKER.len() + TYPE_LENGTH_MAX_LEN * 2 <= FIELD_TEXT_CAPACITY);
// latin-1 code points above 0x7F take two bytes in utf-8
const_assert!(TYPE_LENGTH_MAX_LEN * 2 <= FIELD_TEXT_CAPACITY);
const_assert!(TYPE_LENGTH_MAX_LEN / 3 * 4 <= FIELD_TEXT_CAPACITY);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldQuality {
    /// Every payload byte was decoded as-is
    Clean,
    /// Decoded with substitutions (unmapped BCD plus nibble, partial 6-bit group)
    Degraded,
    /// Declared length runs past the end of the buffer, only the bytes in the buffer were decoded
    Truncated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedField {
    /// `None` when the tag byte itself lies outside of the buffer
    pub tag: Option<TypeLengthTag>,
    pub text: FieldText,
    pub quality: FieldQuality,
    /// Offset right after the payload, the tag of the next field lives here
    pub next_offset: usize,
}

impl DecodedField {
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_clean(&self) -> bool {
        self.quality == FieldQuality::Clean
    }

    pub(crate) fn missing(offset: usize) -> Self {
        Self {
            tag: None,
            text: FieldText::new(),
            quality: FieldQuality::Truncated,
            next_offset: offset,
        }
    }
}

/// Decode the field whose type/length byte sits at `buffer[offset]`.
///
/// Never fails, malformed input is rendered best-effort and flagged in
/// [`DecodedField::quality`]. The payload is never read past `buffer.len()`.
pub fn decode_field(buffer: &[u8], offset: usize) -> DecodedField {
    let Some(&raw_tag) = buffer.get(offset) else {
        hybrid_warn!("FRU field tag offset {} is out of {} bytes", offset, buffer.len());
        return DecodedField::missing(offset);
    };

    let tag = TypeLengthTag::from(raw_tag);
    let start = offset + 1;
    let declared = tag.length();
    let end = (start + declared).min(buffer.len());
    let payload = buffer.get(start..end).unwrap_or(&[]);

    let mut text = FieldText::new();
    let fit = match tag.encoding() {
        FieldEncoding::Binary => decode_binary(payload, &mut text),
        FieldEncoding::BcdPlus => decode_bcd_plus(payload, &mut text),
        FieldEncoding::SixBitAscii => decode_six_bit_ascii(payload, &mut text),
        FieldEncoding::Text8Bit => decode_text_8bit(payload, &mut text),
    };

    let quality = match (payload.len() == declared, fit) {
        (false, _) => FieldQuality::Truncated,
        (true, false) => FieldQuality::Degraded,
        (true, true) => FieldQuality::Clean,
    };

    if quality != FieldQuality::Clean {
        hybrid_warn!(
            "FRU field at {} (tag {:#x}) decoded with substitutions",
            offset,
            raw_tag
        );
    }

    DecodedField {
        tag: Some(tag),
        text,
        quality,
        next_offset: start + declared,
    }
}

fn push_all(text: &mut FieldText, chars: impl IntoIterator<Item = char>) -> bool {
    chars
        .into_iter()
        .fold(true, |fit, c| text.push(c).is_ok() && fit)
}

fn decode_text_8bit(payload: &[u8], text: &mut FieldText) -> bool {
    // latin-1 maps one to one onto the first 256 code points
    push_all(text, payload.iter().map(|&b| b as char))
}

fn decode_binary(payload: &[u8], text: &mut FieldText) -> bool {
    let mut fit = text.push_str(BINARY_FIELD_MARKER).is_ok();
    for byte in payload {
        fit &= write!(text, "{:02X}", byte).is_ok();
    }
    fit
}

fn bcd_plus_char(nibble: u8) -> Option<char> {
    match nibble {
        0x0..=0x9 => Some((b'0' + nibble) as char),
        0xA => Some(' '),
        0xB => Some('-'),
        0xC => Some('.'),
        _ => None,
    }
}

fn decode_bcd_plus(payload: &[u8], text: &mut FieldText) -> bool {
    let mut clean = true;
    for byte in payload {
        for nibble in [byte >> 4, byte & 0x0F] {
            let c = bcd_plus_char(nibble).unwrap_or_else(|| {
                clean = false;
                BCD_PLUS_UNMAPPED
            });
            clean &= text.push(c).is_ok();
        }
    }
    clean
}

fn decode_six_bit_ascii(payload: &[u8], text: &mut FieldText) -> bool {
    let groups = payload.chunks_exact(3);
    let whole = groups.remainder().is_empty();

    if !whole {
        hybrid_warn!(
            "6-bit ASCII field of {} bytes is not a multiple of 3, dropping {} bytes",
            payload.len(),
            payload.len() % 3
        );
    }

    let mut fit = true;
    for group in groups {
        fit &= push_all(text, unpack_six_bit([group[0], group[1], group[2]]));
    }

    whole && fit
}

/// Unpack 3 bytes into 4 symbols, first symbol in the low 6 bits of the first byte.
pub fn unpack_six_bit(group: [u8; 3]) -> [char; 4] {
    let packed = u32::from_le_bytes([group[0], group[1], group[2], 0]);
    [0, 6, 12, 18].map(|shift| SIX_BIT_ASCII_TABLE[((packed >> shift) & 0x3F) as usize] as char)
}

/// Inverse of [`unpack_six_bit`], `None` if a character is outside of the 6-bit alphabet.
pub fn pack_six_bit(chars: [u8; 4]) -> Option<[u8; 3]> {
    let mut packed = 0u32;
    for (i, c) in chars.iter().enumerate() {
        let symbol = SIX_BIT_ASCII_TABLE.iter().position(|t| t == c)? as u32;
        packed |= symbol << (i * 6);
    }
    let [b0, b1, b2, _] = packed.to_le_bytes();
    Some([b0, b1, b2])
}
