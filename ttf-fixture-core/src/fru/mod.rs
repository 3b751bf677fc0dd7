/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! # IPMI FRU inventory decoder
//!
//! ```text
//! +---------------+ offset 0
//! | Common Header |  8 bytes, area offsets in 8 byte units
//! +---------------+
//! | Internal Use  |  listed only
//! | Chassis Info  |  listed only
//! | Board Info    |  6 byte header + manufacturer, product, serial, part no, file id
//! | Product Info  |  not supported
//! | MultiRecord   |  not supported
//! +---------------+
//! ```

mod byte_store;
mod datetime;
mod field;
mod header;
mod record;
mod type_length;

pub use byte_store::{ByteStore, FruSlot, I2cByteStore};
pub use datetime::{CalendarDateTime, MfgTimestamp, Weekday, FRU_EPOCH_UNIX_SECONDS};
pub use field::{
    decode_field, pack_six_bit, unpack_six_bit, DecodedField, FieldQuality, FieldText,
    BCD_PLUS_UNMAPPED, BINARY_FIELD_MARKER, FIELD_TEXT_CAPACITY, SIX_BIT_ASCII_TABLE,
};
pub use header::{
    is_valid_signature, AreaDescriptor, AreaKind, AreaSupport, BoardInfoHeader, CommonHeader,
    AREA_UNIT, BOARD_INFO_HEADER_LEN, COMMON_HEADER_LEN, FRU_FORMAT_VERSION,
};
pub use record::{
    decode_inventory, dump_region, BoardField, BoardInfo, DecodeIssue, InventoryRecord,
    DUMP_MAX_LEN, FRU_DEVICE_MAX_ADDR, FRU_SCRATCH_LEN,
};
pub use type_length::{FieldEncoding, TypeLengthTag, TYPE_LENGTH_MAX_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FruError<E> {
    /// No valid format version at offset 0, normal outcome for an empty slot or blank EEPROM
    NotPresent,
    /// Failure of the underlying [`ByteStore`]
    Transport(E),
    /// Requested length is over the buffer capacity
    Truncated { declared: usize, capacity: usize },
    /// Offset outside of the device address space
    OffsetOutOfRange { offset: u16 },
}
