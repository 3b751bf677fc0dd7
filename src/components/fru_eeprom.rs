/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use core::cell::RefCell;

use embassy_stm32::dma::NoDma;
use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::peripherals::I2C1;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use ttf_fixture_core::fru::{
    decode_inventory, dump_region, FruError, FruSlot, I2cByteStore, InventoryRecord,
};

pub type FruI2c = I2c<'static, I2C1, NoDma, NoDma>;
pub type FruEepromError = FruError<I2cError>;

/// FRU EEPROM of the card under test, 24C64 on the card edge SMBus
pub struct FruEeprom {
    store: Mutex<ThreadModeRawMutex, RefCell<I2cByteStore<FruI2c>>>,
    device_address: u8,
}

impl FruEeprom {
    pub fn new(i2c: FruI2c, slot: FruSlot) -> Self {
        Self {
            store: Mutex::new(RefCell::new(I2cByteStore::new(i2c))),
            device_address: slot.i2c_address(),
        }
    }

    pub fn device_address(&self) -> u8 {
        self.device_address
    }

    pub fn read_inventory(&self) -> Result<InventoryRecord, FruEepromError> {
        self.store
            .lock(|store| decode_inventory(&mut *store.borrow_mut(), self.device_address))
    }

    pub fn dump(&self, offset: u16, dest: &mut [u8]) -> Result<(), FruEepromError> {
        self.store
            .lock(|store| dump_region(&mut *store.borrow_mut(), self.device_address, offset, dest))
    }
}
