/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use heapless::Vec;

use super::byte_store::ByteStore;
use super::datetime::CalendarDateTime;
use super::field::{decode_field, DecodedField, FieldQuality};
use super::header::{
    is_valid_signature, AreaDescriptor, BoardInfoHeader, CommonHeader, BOARD_INFO_HEADER_LEN,
    COMMON_HEADER_LEN,
};
use super::FruError;

/// Per-call scratch for the board area body, longer areas are clamped
pub const FRU_SCRATCH_LEN: usize = 256;

/// Last byte address of the 64Kbit FRU EEPROM
pub const FRU_DEVICE_MAX_ADDR: u16 = 8 * 1024 - 1;

/// Largest raw dump, 20 rows of 16 bytes
pub const DUMP_MAX_LEN: usize = 16 * 20;

/// Fixed fields of the board info area in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardField {
    Manufacturer,
    ProductName,
    SerialNumber,
    PartNumber,
    FruFileId,
}

impl BoardField {
    pub const ORDER: [BoardField; 5] = [
        BoardField::Manufacturer,
        BoardField::ProductName,
        BoardField::SerialNumber,
        BoardField::PartNumber,
        BoardField::FruFileId,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            BoardField::Manufacturer => "Manufacturer",
            BoardField::ProductName => "Product Name",
            BoardField::SerialNumber => "Serial Number",
            BoardField::PartNumber => "Part Number",
            BoardField::FruFileId => "FRU File ID",
        }
    }
}

/// Problems that did not stop the decode, reported alongside the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeIssue {
    /// Board area body is longer than [`FRU_SCRATCH_LEN`], only the head was fetched
    Truncated { declared: usize, capacity: usize },
    /// Field decoded with substitutions or running past the area
    MalformedField(BoardField),
}

const DECODE_ISSUE_CAPACITY: usize = BoardField::ORDER.len() + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardInfo {
    pub header: BoardInfoHeader,
    pub manufacturer: DecodedField,
    pub product_name: DecodedField,
    pub serial_number: DecodedField,
    pub part_number: DecodedField,
    pub fru_file_id: DecodedField,
}

impl BoardInfo {
    pub fn field(&self, field: BoardField) -> &DecodedField {
        match field {
            BoardField::Manufacturer => &self.manufacturer,
            BoardField::ProductName => &self.product_name,
            BoardField::SerialNumber => &self.serial_number,
            BoardField::PartNumber => &self.part_number,
            BoardField::FruFileId => &self.fru_file_id,
        }
    }

    /// Fields in storage order, manufacturer first
    pub fn fields(&self) -> impl Iterator<Item = (BoardField, &DecodedField)> + '_ {
        BoardField::ORDER.into_iter().map(|f| (f, self.field(f)))
    }

    pub fn language(&self) -> u8 {
        self.header.language
    }

    pub fn mfg_datetime(&self) -> CalendarDateTime {
        self.header.mfg_time.to_datetime()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InventoryRecord {
    pub device_address: u8,
    pub header: CommonHeader,
    pub areas: AreaDescriptor,
    /// `None` when the common header has no board area
    pub board: Option<BoardInfo>,
    pub issues: Vec<DecodeIssue, DECODE_ISSUE_CAPACITY>,
}

impl InventoryRecord {
    pub fn format_version(&self) -> u8 {
        self.header.version()
    }

    pub fn is_truncated(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, DecodeIssue::Truncated { .. }))
    }

    /// Decoded without truncation nor substitution
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Read and decode the FRU inventory of the device at `device_address`.
///
/// Returns [`FruError::NotPresent`] when nothing answers at `device_address` or the
/// first byte is not a supported format version, and [`FruError::Transport`] on any
/// other read failure. Area truncation and
/// degraded fields are reported in [`InventoryRecord::issues`].
pub fn decode_inventory<S: ByteStore>(
    store: &mut S,
    device_address: u8,
) -> Result<InventoryRecord, FruError<S::Error>> {
    let mut signature = [0u8; 1];
    let probed = match store.read(device_address, 0, &mut signature) {
        Ok(()) => is_valid_signature(signature[0]),
        Err(e) if S::is_no_device(&e) => false,
        Err(e) => return Err(FruError::Transport(e)),
    };

    if !probed {
        hybrid_warn!(
            "Unable to locate FRU EEPROM at SMB address {:#x}",
            device_address
        );
        return Err(FruError::NotPresent);
    }

    hybrid_debug!("FRU EEPROM found at SMB address {:#x}", device_address);

    let mut raw_header = [0u8; COMMON_HEADER_LEN];
    store
        .read(device_address, 0, &mut raw_header)
        .map_err(FruError::Transport)?;

    let header = CommonHeader::from_bytes(&raw_header);
    let areas = header.areas();
    let mut issues = Vec::new();

    let board = match areas.board {
        0 => None,
        board_offset => Some(decode_board_area(
            store,
            device_address,
            board_offset,
            &mut issues,
        )?),
    };

    Ok(InventoryRecord {
        device_address,
        header,
        areas,
        board,
        issues,
    })
}

fn decode_board_area<S: ByteStore>(
    store: &mut S,
    device_address: u8,
    board_offset: u16,
    issues: &mut Vec<DecodeIssue, DECODE_ISSUE_CAPACITY>,
) -> Result<BoardInfo, FruError<S::Error>> {
    let mut raw_header = [0u8; BOARD_INFO_HEADER_LEN];
    store
        .read(device_address, board_offset, &mut raw_header)
        .map_err(FruError::Transport)?;

    let header = BoardInfoHeader::from_bytes(&raw_header);

    let declared = header.body_length();
    let area_truncated = declared > FRU_SCRATCH_LEN;
    if area_truncated {
        hybrid_warn!(
            "Board area body of {} bytes clamped to {}",
            declared,
            FRU_SCRATCH_LEN
        );
        // capacity covers one truncation plus every field
        let _ = issues.push(DecodeIssue::Truncated {
            declared,
            capacity: FRU_SCRATCH_LEN,
        });
    }

    let mut scratch = [0u8; FRU_SCRATCH_LEN];
    let body = &mut scratch[..declared.min(FRU_SCRATCH_LEN)];
    store
        .read(
            device_address,
            board_offset + BOARD_INFO_HEADER_LEN as u16,
            body,
        )
        .map_err(FruError::Transport)?;
    let body = &*body;

    let mut offset = 0;
    let mut next_field = |field: BoardField| {
        let decoded = decode_field(body, offset);
        offset = decoded.next_offset;

        let clamped_by_us = area_truncated && decoded.quality == FieldQuality::Truncated;
        if !decoded.is_clean() && !clamped_by_us {
            let _ = issues.push(DecodeIssue::MalformedField(field));
        }
        decoded
    };

    Ok(BoardInfo {
        header,
        manufacturer: next_field(BoardField::Manufacturer),
        product_name: next_field(BoardField::ProductName),
        serial_number: next_field(BoardField::SerialNumber),
        part_number: next_field(BoardField::PartNumber),
        fru_file_id: next_field(BoardField::FruFileId),
    })
}

/// Raw read of `dest.len()` bytes at `offset`, for inspecting an image by hand.
pub fn dump_region<S: ByteStore>(
    store: &mut S,
    device_address: u8,
    offset: u16,
    dest: &mut [u8],
) -> Result<(), FruError<S::Error>> {
    if offset > FRU_DEVICE_MAX_ADDR {
        return Err(FruError::OffsetOutOfRange { offset });
    }

    if dest.len() > DUMP_MAX_LEN {
        return Err(FruError::Truncated {
            declared: dest.len(),
            capacity: DUMP_MAX_LEN,
        });
    }

    store
        .read(device_address, offset, dest)
        .map_err(FruError::Transport)
}

#[cfg(test)]
mod tests {
    use std::vec::Vec as StdVec;

    use super::*;
    use crate::fru::{pack_six_bit, FieldEncoding, TypeLengthTag};

    const DEVICE: u8 = 0x52;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    /// EEPROM image in memory, records every read for bound checks
    struct MemoryStore {
        image: StdVec<u8>,
        reads: StdVec<(u16, usize)>,
        fail_at: Option<u16>,
    }

    impl MemoryStore {
        fn new(image: StdVec<u8>) -> Self {
            Self {
                image,
                reads: StdVec::new(),
                fail_at: None,
            }
        }
    }

    impl ByteStore for MemoryStore {
        type Error = Nack;

        fn read(&mut self, device_address: u8, offset: u16, dest: &mut [u8]) -> Result<(), Nack> {
            self.reads.push((offset, dest.len()));
            if device_address != DEVICE || self.fail_at == Some(offset) {
                return Err(Nack);
            }
            // a real EEPROM reads 0xFF past the programmed image
            for (i, b) in dest.iter_mut().enumerate() {
                *b = *self.image.get(offset as usize + i).unwrap_or(&0xFF);
            }
            Ok(())
        }

        fn is_no_device(_error: &Nack) -> bool {
            true
        }
    }

    fn push_field(image: &mut StdVec<u8>, encoding: FieldEncoding, payload: &[u8]) {
        image.push(TypeLengthTag::new(encoding, payload.len()).raw());
        image.extend_from_slice(payload);
    }

    /// Common header with board area at 8 (1 unit), board area of `units` with the fields
    fn sample_image(units: u8) -> StdVec<u8> {
        let mut image = StdVec::from([0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFE]);
        // version, length, language (english), mfg time 1 minute
        image.extend_from_slice(&[0x01, units, 0x19, 0x01, 0x00, 0x00]);
        push_field(&mut image, FieldEncoding::Text8Bit, b"Acme");
        push_field(&mut image, FieldEncoding::Text8Bit, b"OCP NIC 3.0 TTF");
        push_field(&mut image, FieldEncoding::SixBitAscii, &pack_six_bit(*b"SN01").unwrap());
        push_field(&mut image, FieldEncoding::BcdPlus, &[0x12, 0x3B, 0x45]);
        push_field(&mut image, FieldEncoding::Binary, &[0x01]);
        image.push(0xC1);
        image
    }

    #[test]
    fn decode_board_area_fields() {
        let mut store = MemoryStore::new(sample_image(8));
        let record = decode_inventory(&mut store, DEVICE).unwrap();

        assert_eq!(record.format_version(), 1);
        assert_eq!(record.areas.board, 8);
        assert!(record.is_clean());

        let board = record.board.as_ref().unwrap();
        assert_eq!(board.language(), 0x19);
        assert_eq!(board.manufacturer.as_str(), "Acme");
        assert_eq!(board.product_name.as_str(), "OCP NIC 3.0 TTF");
        assert_eq!(board.serial_number.as_str(), "SN01");
        assert_eq!(board.part_number.as_str(), "123-45");
        assert_eq!(
            board.fru_file_id.as_str(),
            "Binary or unspecified format: 01"
        );
        assert_eq!(
            std::format!("{}", board.mfg_datetime()),
            "Mon Jan  1 00:01:00 1996"
        );

        let labels: StdVec<&str> = board.fields().map(|(f, _)| f.label()).collect();
        assert_eq!(
            labels,
            ["Manufacturer", "Product Name", "Serial Number", "Part Number", "FRU File ID"]
        );
    }

    #[test]
    fn read_sequence() {
        let mut store = MemoryStore::new(sample_image(8));
        decode_inventory(&mut store, DEVICE).unwrap();

        // signature, common header, board header, board body (64 - 6)
        assert_eq!(store.reads, [(0, 1), (0, 8), (8, 6), (14, 58)]);
    }

    #[test]
    fn blank_eeprom_is_not_present() {
        let mut store = MemoryStore::new(StdVec::from([0xFF; 16]));
        assert_eq!(decode_inventory(&mut store, DEVICE), Err(FruError::NotPresent));
        // nothing beyond the signature byte is read
        assert_eq!(store.reads.len(), 1);
    }

    #[test]
    fn transport_error_propagates() {
        // silence on the signature read is an empty slot, not a bus fault
        let mut store = MemoryStore::new(sample_image(8));
        assert_eq!(decode_inventory(&mut store, 0x50), Err(FruError::NotPresent));
        assert_eq!(store.reads, [(0, 1)]);

        let mut store = MemoryStore::new(sample_image(8));
        store.fail_at = Some(8);
        assert_eq!(
            decode_inventory(&mut store, DEVICE),
            Err(FruError::Transport(Nack))
        );
    }

    #[test]
    fn absent_board_area_still_reports() {
        let image = StdVec::from([0x01, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF7]);
        let mut store = MemoryStore::new(image);
        let record = decode_inventory(&mut store, DEVICE).unwrap();

        assert_eq!(record.board, None);
        assert_eq!(record.areas.internal_use, 64);
        assert_eq!(store.reads, [(0, 1), (0, 8)]);
    }

    #[test]
    fn oversized_area_is_clamped() {
        // 255 units = 2040 bytes declared
        let mut store = MemoryStore::new(sample_image(0xFF));
        let record = decode_inventory(&mut store, DEVICE).unwrap();

        assert!(record.is_truncated());
        assert_eq!(
            record.issues[0],
            DecodeIssue::Truncated {
                declared: 2040 - 6,
                capacity: FRU_SCRATCH_LEN
            }
        );
        // body fetch never goes over the scratch capacity
        assert!(store.reads.iter().all(|&(_, len)| len <= FRU_SCRATCH_LEN));
        assert_eq!(store.reads.last(), Some(&(14, FRU_SCRATCH_LEN)));

        let board = record.board.unwrap();
        assert_eq!(board.manufacturer.as_str(), "Acme");
    }

    #[test]
    fn field_past_area_end_is_malformed() {
        let mut image = StdVec::from([0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFE]);
        // 2 units, 10 bytes of body
        image.extend_from_slice(&[0x01, 0x02, 0x00, 0x00, 0x00, 0x00]);
        push_field(&mut image, FieldEncoding::Text8Bit, b"Acme");
        // declares 20 bytes, runs past the area
        image.push(TypeLengthTag::new(FieldEncoding::Text8Bit, 20).raw());
        image.extend_from_slice(b"NIC");

        let mut store = MemoryStore::new(image);
        let record = decode_inventory(&mut store, DEVICE).unwrap();
        let board = record.board.as_ref().unwrap();

        assert_eq!(board.manufacturer.as_str(), "Acme");
        assert_eq!(board.product_name.quality, FieldQuality::Truncated);
        assert!(record.issues.contains(&DecodeIssue::MalformedField(BoardField::ProductName)));
        assert!(!record.is_truncated());
    }

    #[test]
    fn degraded_field_reported() {
        let mut image = StdVec::from([0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFE]);
        image.extend_from_slice(&[0x01, 0x04, 0x00, 0x00, 0x00, 0x00]);
        push_field(&mut image, FieldEncoding::BcdPlus, &[0x1F]);

        let mut store = MemoryStore::new(image);
        let record = decode_inventory(&mut store, DEVICE).unwrap();

        assert_eq!(record.board.as_ref().unwrap().manufacturer.as_str(), "1?");
        assert_eq!(
            record.issues.first(),
            Some(&DecodeIssue::MalformedField(BoardField::Manufacturer))
        );
    }

    #[test]
    fn dump_bounds() {
        let mut store = MemoryStore::new(sample_image(8));
        let mut dest = [0u8; 16];

        dump_region(&mut store, DEVICE, 0, &mut dest).unwrap();
        assert_eq!(&dest[..8], &[0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFE]);

        assert_eq!(
            dump_region(&mut store, DEVICE, 0x2000, &mut dest),
            Err(FruError::OffsetOutOfRange { offset: 0x2000 })
        );

        let mut too_long = [0u8; DUMP_MAX_LEN + 1];
        assert_eq!(
            dump_region(&mut store, DEVICE, 0, &mut too_long),
            Err(FruError::Truncated {
                declared: DUMP_MAX_LEN + 1,
                capacity: DUMP_MAX_LEN
            })
        );
        // rejected requests never reach the store
        assert_eq!(store.reads.len(), 1);
    }
}
