/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use static_assertions::*;

use super::datetime::MfgTimestamp;

/// All area offsets and lengths in the FRU image count in 8 byte units
pub const AREA_UNIT: usize = 8;

/// Expected value of the low nibble of the very first byte
pub const FRU_FORMAT_VERSION: u8 = 0x01;

pub const COMMON_HEADER_LEN: usize = 8;
pub const BOARD_INFO_HEADER_LEN: usize = 6;

// Common Header (IPMI FRU Table 8-1), always at offset 0
// +-----+-----+-----+-----+-----+-----+-----+-----+
// | 0x0 | 0x1 | 0x2 | 0x3 | 0x4 | 0x5 | 0x6 | 0x7 |
// +-----+-----+-----+-----+-----+-----+-----+-----+
// | ver | int | chs | brd | prd | mrc | pad | sum |
// +-----+-----+-----+-----+-----+-----+-----+-----+
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommonHeader {
    pub format_version: u8,
    pub internal_use_offset: u8,
    pub chassis_offset: u8,
    pub board_offset: u8,
    pub product_offset: u8,
    pub multirecord_offset: u8,
    pub pad: u8,
    /// zero checksum, kept but not verified
    pub checksum: u8,
}

/// Checks the signature byte (first byte of the image) for the supported format version.
pub fn is_valid_signature(first_byte: u8) -> bool {
    first_byte & 0x0F == FRU_FORMAT_VERSION
}

impl CommonHeader {
    pub fn from_bytes(raw: &[u8; COMMON_HEADER_LEN]) -> Self {
        Self {
            format_version: raw[0],
            internal_use_offset: raw[1],
            chassis_offset: raw[2],
            board_offset: raw[3],
            product_offset: raw[4],
            multirecord_offset: raw[5],
            pad: raw[6],
            checksum: raw[7],
        }
    }

    /// Only the low nibble is the format version, upper nibble is reserved
    pub fn version(&self) -> u8 {
        self.format_version & 0x0F
    }

    pub fn areas(&self) -> AreaDescriptor {
        AreaDescriptor {
            internal_use: area_offset(self.internal_use_offset),
            chassis: area_offset(self.chassis_offset),
            board: area_offset(self.board_offset),
            product: area_offset(self.product_offset),
            multirecord: area_offset(self.multirecord_offset),
        }
    }
}

const fn area_offset(units: u8) -> u16 {
    units as u16 * AREA_UNIT as u16
}

// 255 units must not overflow the byte address
const_assert!(u8::MAX as usize * AREA_UNIT <= u16::MAX as usize);

/// Byte address of every area in the device, `0` means the area is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AreaDescriptor {
    pub internal_use: u16,
    pub chassis: u16,
    pub board: u16,
    pub product: u16,
    pub multirecord: u16,
}

/// Whether this firmware decodes an area or only reports where it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AreaSupport {
    Absent,
    Decoded,
    NotSupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AreaKind {
    InternalUse,
    Chassis,
    Board,
    Product,
    MultiRecord,
}

impl AreaDescriptor {
    pub const AREAS: [AreaKind; 5] = [
        AreaKind::InternalUse,
        AreaKind::Chassis,
        AreaKind::Board,
        AreaKind::Product,
        AreaKind::MultiRecord,
    ];

    pub fn offset(&self, kind: AreaKind) -> u16 {
        match kind {
            AreaKind::InternalUse => self.internal_use,
            AreaKind::Chassis => self.chassis,
            AreaKind::Board => self.board,
            AreaKind::Product => self.product,
            AreaKind::MultiRecord => self.multirecord,
        }
    }

    pub fn is_present(&self, kind: AreaKind) -> bool {
        self.offset(kind) != 0
    }

    /// Only the board info area is decoded, internal use and chassis are listed
    /// by offset, product and multi record are never attempted.
    pub fn support(&self, kind: AreaKind) -> AreaSupport {
        match (self.is_present(kind), kind) {
            (false, _) => AreaSupport::Absent,
            (true, AreaKind::Board) => AreaSupport::Decoded,
            (true, _) => AreaSupport::NotSupported,
        }
    }
}

// Board Info Area header (IPMI FRU Table 11-1)
// +-----+-----+-----+-----+-----+-----+
// | 0x0 | 0x1 | 0x2 | 0x3 | 0x4 | 0x5 |
// +-----+-----+-----+-----+-----+-----+
// | ver | len | lng | mfg time LE u24 |
// +-----+-----+-----+-----+-----+-----+
// Followed by the type/length fields (manufacturer first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardInfoHeader {
    pub format_version: u8,
    /// In 8 byte units, includes this header
    pub area_length_units: u8,
    pub language: u8,
    pub mfg_time: MfgTimestamp,
}

impl BoardInfoHeader {
    pub fn from_bytes(raw: &[u8; BOARD_INFO_HEADER_LEN]) -> Self {
        Self {
            format_version: raw[0],
            area_length_units: raw[1],
            language: raw[2],
            mfg_time: MfgTimestamp::from_le_bytes([raw[3], raw[4], raw[5]]),
        }
    }

    /// Whole area length in bytes
    pub fn area_length(&self) -> usize {
        self.area_length_units as usize * AREA_UNIT
    }

    /// Bytes after the header, where the type/length fields live
    pub fn body_length(&self) -> usize {
        self.area_length().saturating_sub(BOARD_INFO_HEADER_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_offsets_are_eight_times_header() {
        let header = CommonHeader::from_bytes(&[0x01, 0x08, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00]);
        let areas = header.areas();

        assert_eq!(header.version(), 1);
        assert_eq!(areas.board, 16);
        assert_eq!(areas.internal_use, 64);
        assert_eq!(areas.chassis, 0);
        assert_eq!(areas.product, 0);
        assert_eq!(areas.multirecord, 0);
    }

    #[test]
    fn every_offset_scales_by_unit() {
        for units in 0..=u8::MAX {
            let header = CommonHeader::from_bytes(&[1, units, units, units, units, units, 0, 0]);
            let areas = header.areas();
            for kind in AreaDescriptor::AREAS {
                assert_eq!(areas.offset(kind), units as u16 * 8);
                assert_eq!(areas.is_present(kind), units != 0);
            }
        }
    }

    #[test]
    fn area_support() {
        let header = CommonHeader::from_bytes(&[0x01, 0x01, 0x00, 0x02, 0x04, 0x09, 0x00, 0xF1]);
        let areas = header.areas();

        assert_eq!(areas.support(AreaKind::InternalUse), AreaSupport::NotSupported);
        assert_eq!(areas.support(AreaKind::Chassis), AreaSupport::Absent);
        assert_eq!(areas.support(AreaKind::Board), AreaSupport::Decoded);
        assert_eq!(areas.support(AreaKind::Product), AreaSupport::NotSupported);
        assert_eq!(areas.support(AreaKind::MultiRecord), AreaSupport::NotSupported);
    }

    #[test]
    fn signature() {
        assert!(is_valid_signature(0x01));
        assert!(is_valid_signature(0x11));
        assert!(!is_valid_signature(0x00));
        assert!(!is_valid_signature(0xFF));
        assert!(!is_valid_signature(0x02));
    }

    #[test]
    fn board_header_lengths() {
        let header = BoardInfoHeader::from_bytes(&[0x01, 0x09, 0x19, 0x01, 0x00, 0x00]);

        assert_eq!(header.language, 0x19);
        assert_eq!(header.area_length(), 72);
        assert_eq!(header.body_length(), 66);
        assert_eq!(header.mfg_time.minutes(), 1);

        let empty = BoardInfoHeader::from_bytes(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(empty.body_length(), 0);
    }
}
