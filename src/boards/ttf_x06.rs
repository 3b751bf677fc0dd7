/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Hardware initialization code for the NIC 3.0 TTF fixture, revision X06 and later.
//! BOARD_ID straps tell the exact revision at runtime, the pin map is shared.

use embassy_stm32::dma::NoDma;
use embassy_stm32::gpio::{Input, Level, Output, Pin, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use {defmt_rtt as _, panic_probe as _};

use super::Hardware;
use crate::components::fixture_straps::FixtureStraps;
use crate::components::fru_eeprom::FruEeprom;
use crate::components::scan_chain::ScanChainDevice;
use crate::semi_layer::indicator::Indicator;
use crate::types::fixture_config::FixtureConfig;

bind_interrupts!(struct Irqs {
    I2C1 => embassy_stm32::i2c::InterruptHandler<peripherals::I2C1>;
});

pub fn hardware_init_ttf_x06(p: embassy_stm32::Peripherals, config: &FixtureConfig) -> Hardware {
    // Blocking transfers only, FRU reads are short and rare
    let i2c = I2c::new(
        p.I2C1,
        p.PB8, // SMB_SCL
        p.PB9, // SMB_SDA
        Irqs,
        NoDma,
        NoDma,
        Hertz(config.i2c_hz),
        Default::default(),
    );

    Hardware {
        fru_eeprom: FruEeprom::new(i2c, config.fru_slot),
        scan_chain: ScanChainDevice::new(
            Output::new(p.PA4.degrade(), Level::High, Speed::Low), // SCAN_LD_N
            Output::new(p.PA5.degrade(), Level::High, Speed::Low), // SCAN_CLK
            Input::new(p.PA6.degrade(), Pull::None),               // SCAN_DATA_IN
        ),
        straps: FixtureStraps::new(
            [
                Input::new(p.PB0.degrade(), Pull::Down), // BOARD_ID0
                Input::new(p.PB1.degrade(), Pull::Down), // BOARD_ID1
                Input::new(p.PB2.degrade(), Pull::Down), // BOARD_ID2
            ],
            [
                Input::new(p.PA8.degrade(), Pull::Up),  // PRSNTB0_N
                Input::new(p.PA11.degrade(), Pull::Up), // PRSNTB1_N
                Input::new(p.PA12.degrade(), Pull::Up), // PRSNTB2_N
                Input::new(p.PA15.degrade(), Pull::Up), // PRSNTB3_N
            ],
            [
                Input::new(p.PD0.degrade(), Pull::None), // SCAN_VER0
                Input::new(p.PD1.degrade(), Pull::None), // SCAN_VER1
            ],
        ),
        status_led: Indicator::new(
            Output::new(p.PB4.degrade(), Level::Low, Speed::Low), // LED_STATUS
            "LED_STATUS",
        ),
    }
}
