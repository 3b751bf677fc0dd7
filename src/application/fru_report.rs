/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use defmt::{error, info, warn, Display2Format};
use ttf_fixture_core::fru::{AreaDescriptor, AreaSupport, FruError, InventoryRecord};

use crate::components::fru_eeprom::FruEeprom;
use crate::types::fixture_config::FRU_HEADER_DUMP_LEN;

pub fn report_inventory(record: &InventoryRecord) {
    info!(
        "FRU EEPROM found at SMB address {=u8:#04x}, format version {}",
        record.device_address,
        record.format_version()
    );

    for kind in AreaDescriptor::AREAS {
        let offset = record.areas.offset(kind);
        match record.areas.support(kind) {
            AreaSupport::Absent => info!("{} area : absent", kind),
            AreaSupport::Decoded => info!("{} area : offset {=u16:#06x}", kind, offset),
            AreaSupport::NotSupported => {
                info!("{} area : offset {=u16:#06x} (not supported)", kind, offset)
            }
        }
    }

    match &record.board {
        None => warn!("Board info area absent"),
        Some(board) => {
            info!(
                "Board area version {}, {} bytes, language {}",
                board.header.format_version,
                board.header.area_length(),
                board.language()
            );
            for (field, decoded) in board.fields() {
                info!("{=str} : {=str}", field.label(), decoded.as_str());
            }
            info!("Mfg Date/Time : {}", Display2Format(&board.mfg_datetime()));
        }
    }

    for issue in record.issues.iter() {
        warn!("FRU decode issue : {}", issue);
    }
}

fn dump_header(eeprom: &FruEeprom) {
    let mut raw = [0u8; FRU_HEADER_DUMP_LEN];

    match eeprom.dump(0, &mut raw) {
        Ok(()) => {
            for (row, chunk) in raw.chunks(16).enumerate() {
                info!("{=u16:04x} : {=[u8]:02x}", (row * 16) as u16, chunk);
            }
        }
        Err(e) => warn!("FRU EEPROM dump failed : {}", e),
    }
}

/// Read, decode and log the FRU inventory, `true` when nothing was off
pub fn report_fru(eeprom: &FruEeprom) -> bool {
    match eeprom.read_inventory() {
        Ok(record) => {
            report_inventory(&record);
            record.is_clean()
        }
        Err(FruError::NotPresent) => {
            warn!(
                "Unable to locate FRU EEPROM at expected SMB address {=u8:#04x}",
                eeprom.device_address()
            );
            dump_header(eeprom);
            false
        }
        Err(e) => {
            error!("FRU EEPROM read failed : {}", e);
            false
        }
    }
}
