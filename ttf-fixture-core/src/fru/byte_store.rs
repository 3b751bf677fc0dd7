/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Addressable serial memory that the FRU decoder reads from.
///
/// Implementations own the transport, there is no retry at this level.
pub trait ByteStore {
    type Error;

    /// Fill `dest` with `dest.len()` bytes starting at `offset` of the device at `device_address`.
    fn read(&mut self, device_address: u8, offset: u16, dest: &mut [u8]) -> Result<(), Self::Error>;

    /// `true` when `error` means nothing answered at the device address at all.
    fn is_no_device(_error: &Self::Error) -> bool {
        false
    }
}

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    type Error = T::Error;

    fn read(&mut self, device_address: u8, offset: u16, dest: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(device_address, offset, dest)
    }

    fn is_no_device(error: &Self::Error) -> bool {
        T::is_no_device(error)
    }
}

/// 24Cxx style EEPROM on an I2C bus, 16 bit big endian word address then sequential read.
pub struct I2cByteStore<I2C> {
    bus: I2C,
}

impl<I2C: I2c> I2cByteStore<I2C> {
    pub const fn new(bus: I2C) -> Self {
        Self { bus }
    }

    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C: I2c> ByteStore for I2cByteStore<I2C> {
    type Error = I2C::Error;

    fn read(&mut self, device_address: u8, offset: u16, dest: &mut [u8]) -> Result<(), Self::Error> {
        self.bus
            .write_read(device_address, &offset.to_be_bytes(), dest)
    }

    // many HALs cannot tell an address NACK from a data NACK
    fn is_no_device(error: &Self::Error) -> bool {
        matches!(error.kind(), ErrorKind::NoAcknowledge(_))
    }
}

/// NIC 3.0 card slot, decides the SMBus address of the FRU EEPROM.
/// Note that these do not follow the NIC 3.0 base specification table,
/// the fixture wiring is what counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FruSlot {
    Slot0 = 0,
    Slot1 = 1,
    Slot2 = 2,
    Slot3 = 3,
}

impl FruSlot {
    pub const fn i2c_address(&self) -> u8 {
        match self {
            FruSlot::Slot0 => 0x50,
            FruSlot::Slot1 => 0x52,
            FruSlot::Slot2 => 0x54,
            FruSlot::Slot3 => 0x56,
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    use super::*;
    use crate::fru::{decode_inventory, FruError};

    struct MockEeprom {
        address: u8,
        image: [u8; 64],
        word_address: usize,
    }

    impl ErrorType for MockEeprom {
        type Error = ErrorKind;
    }

    impl I2c for MockEeprom {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.address {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }

            for operation in operations {
                match operation {
                    Operation::Write(bytes) => {
                        self.word_address = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
                    }
                    Operation::Read(dest) => {
                        let end = self.word_address + dest.len();
                        dest.copy_from_slice(&self.image[self.word_address..end]);
                        self.word_address = end;
                    }
                }
            }

            Ok(())
        }
    }

    fn mock() -> MockEeprom {
        let mut image = [0u8; 64];
        for (i, b) in image.iter_mut().enumerate() {
            *b = i as u8;
        }
        MockEeprom {
            address: 0x52,
            image,
            word_address: 0,
        }
    }

    #[test]
    fn sequential_read_at_word_address() {
        let mut store = I2cByteStore::new(mock());
        let mut dest = [0u8; 4];

        store.read(0x52, 0x0010, &mut dest).unwrap();
        assert_eq!(dest, [0x10, 0x11, 0x12, 0x13]);

        let bus = store.release();
        assert_eq!(bus.word_address, 0x14);
    }

    #[test]
    fn nack_is_transport_error() {
        let mut store = I2cByteStore::new(mock());
        let mut dest = [0u8; 1];

        assert_eq!(
            store.read(0x50, 0, &mut dest),
            Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
        );
        assert!(I2cByteStore::<MockEeprom>::is_no_device(
            &ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)
        ));
        assert!(!I2cByteStore::<MockEeprom>::is_no_device(&ErrorKind::Bus));
    }

    #[test]
    fn empty_slot_is_not_present() {
        let mut store = I2cByteStore::new(mock());
        assert_eq!(decode_inventory(&mut store, 0x50), Err(FruError::NotPresent));
    }

    #[test]
    fn bus_fault_on_signature_stays_transport() {
        struct StuckBus;

        impl ErrorType for StuckBus {
            type Error = ErrorKind;
        }

        impl I2c for StuckBus {
            fn transaction(
                &mut self,
                _address: u8,
                _operations: &mut [Operation<'_>],
            ) -> Result<(), Self::Error> {
                Err(ErrorKind::Bus)
            }
        }

        let mut store = I2cByteStore::new(StuckBus);
        assert_eq!(
            decode_inventory(&mut store, 0x50),
            Err(FruError::Transport(ErrorKind::Bus))
        );
    }

    #[test]
    fn slot_addresses() {
        assert_eq!(FruSlot::try_from(0u8).map(|s| s.i2c_address()).ok(), Some(0x50));
        assert_eq!(FruSlot::try_from(1u8).map(|s| s.i2c_address()).ok(), Some(0x52));
        assert_eq!(FruSlot::try_from(2u8).map(|s| s.i2c_address()).ok(), Some(0x54));
        assert_eq!(FruSlot::try_from(3u8).map(|s| s.i2c_address()).ok(), Some(0x56));
        assert!(FruSlot::try_from(4u8).is_err());
    }
}
