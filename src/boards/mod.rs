/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::Config as Stm32Config;
use static_cell::make_static;

#[cfg(feature = "hw_ttf_x06")]
use self::ttf_x06::hardware_init_ttf_x06;
use crate::components::fixture_straps::FixtureStraps;
use crate::components::fru_eeprom::FruEeprom;
use crate::components::scan_chain::ScanChainDevice;
use crate::semi_layer::indicator::{indicator_spawn, Indicator};
use crate::types::fixture_config::FixtureConfig;

pub mod const_str;
#[cfg(feature = "hw_ttf_x06")]
mod ttf_x06;

use const_str::*;

pub struct Hardware {
    /// IPMI FRU EEPROM on the card under test
    pub fru_eeprom: FruEeprom,

    /// SCAN_LD_N / SCAN_CLK / SCAN_DATA_IN readback of the card status word
    pub scan_chain: ScanChainDevice,

    /// Board ID, card present and scan chain version inputs
    pub straps: FixtureStraps,

    /// Single status LED
    pub status_led: Indicator,
}

impl Hardware {
    /// STM32G030 16Mhz basic CPU configuration
    fn mcu_default_config() -> Stm32Config {
        Stm32Config::default()
    }

    /// Initialize MCU PLL and CPU on init hardware
    /// > `Hardware::mcu_pre_init()`
    /// 2 `Hardware::hardware_init(..)`
    /// 3 `hardware.start_tasks(..)`
    pub fn mcu_pre_init() -> embassy_stm32::Peripherals {
        embassy_stm32::init(Self::mcu_default_config())
    }

    /// Initialize MCU peripherals and nearby components
    /// 1 `Hardware::mcu_pre_init()`
    /// > `Hardware::hardware_init(..)`
    /// 3 `hardware.start_tasks(..)`
    fn hardware_init(peripherals: embassy_stm32::Peripherals, config: &FixtureConfig) -> Hardware {
        #[cfg(feature = "hw_ttf_x06")]
        let ret = hardware_init_ttf_x06(peripherals, config);

        ret
    }

    /// Initialize MCU peripherals and nearby components
    /// 1 `Hardware::mcu_pre_init()`
    /// 2 `Hardware::hardware_init(..)`
    /// > `hardware.start_tasks(..)`
    fn start_tasks(&'static self, spawner: &Spawner, config: &FixtureConfig) {
        self.scan_chain.start_tasks(config.scan_tick_hz);

        unwrap!(spawner.spawn(indicator_spawn(&self.status_led)));
    }
}

pub struct Board {
    pub hardware: Hardware,
    pub config: FixtureConfig,
}

impl Board {
    pub fn init() -> &'static Self {
        let p = Hardware::mcu_pre_init();
        let config = FixtureConfig::default();
        let hardware = Hardware::hardware_init(p, &config);

        // print my info
        defmt::println!("{}", PRINT_BAR);
        defmt::println!("Firmware Ver : {} {}", PROJECT_NAME, VERSION_STR);
        defmt::println!("Git Hash     : {}", COMMIT_HASH);
        defmt::println!("Git Datetime : {} | {}", GIT_COMMIT_DATETIME, COMMIT_SHORT);
        defmt::println!(
            "Hardware     : {} (strap {})",
            HW_MODEL,
            defmt::Display2Format(&hardware.straps.board_revision())
        );
        defmt::println!("{}", PRINT_BAR);

        make_static!(Self { hardware, config })
    }

    pub fn start_tasks(&'static self, spawner: &Spawner) -> &'static Self {
        self.hardware.start_tasks(spawner, &self.config);
        self
    }
}
