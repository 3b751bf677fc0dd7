/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

mod fru_report;
mod scan_report;

use defmt::{info, warn, Display2Format};
use embassy_time::Timer;
use ttf_fixture_core::scan::ScanSample;
use ttf_fixture_core::CardPresence;

use crate::boards::*;
use crate::types::indicator_pattern::IndicatorPattern;

pub struct Application {
    /// Hardware and necessary shared object
    pub board: &'static Board,
}

impl Application {
    pub fn new(board: &'static Board) -> Self {
        Self { board }
    }

    /// Full FRU and scan report of a freshly seated card, the flag is `true` when both passed.
    ///
    /// Card power enables are not driven by this firmware, the card is expected to be
    /// powered by the fixture supply by the time the settle delay has passed.
    fn inspect_card(&self) -> (bool, Option<ScanSample>) {
        let hardware = &self.board.hardware;
        let config = &self.board.config;

        info!("{}", Display2Format(&hardware.straps.scan_version()));

        let fru_ok = fru_report::report_fru(&hardware.fru_eeprom);

        // first word after power up is stale, shift it out once
        if let Err(e) = hardware.scan_chain.capture(config.capture_budget) {
            warn!("Scan chain warm up capture failed : {}", e);
        }

        match hardware.scan_chain.capture(config.capture_budget) {
            Ok(sample) => {
                scan_report::report_scan(sample);
                (fru_ok, Some(sample))
            }
            Err(e) => {
                warn!("Scan chain capture failed : {}", e);
                (false, None)
            }
        }
    }

    pub async fn main_task(&self) -> ! {
        let hardware = &self.board.hardware;
        let config = &self.board.config;
        let mut presence: Option<CardPresence> = None;
        let mut last_sample: Option<ScanSample> = None;

        info!("Fixture config : {}", config);
        hardware.status_led.set(IndicatorPattern::WaitingCard);

        loop {
            let latest = hardware.straps.card_presence();
            let was_present = presence.is_some_and(|p| p.is_present());

            if presence != Some(latest) {
                info!("{}", Display2Format(&latest));
                presence = Some(latest);
            }

            match (was_present, latest.is_present()) {
                (false, true) => {
                    info!(
                        "NIC card inserted, waiting {} ms for scan chain data",
                        config.card_settle.as_millis()
                    );
                    Timer::after(config.card_settle).await;

                    let (passed, sample) = self.inspect_card();
                    last_sample = sample;
                    hardware.status_led.set(match passed {
                        true => IndicatorPattern::Heartbeat,
                        false => IndicatorPattern::Fault,
                    });
                }
                (true, true) => match hardware.scan_chain.capture(config.capture_budget) {
                    Ok(sample) => {
                        if let Some(previous) = last_sample.filter(|&prev| prev != sample) {
                            scan_report::report_scan_change(previous, sample);
                        }
                        last_sample = Some(sample);
                    }
                    Err(e) => {
                        warn!("Scan chain capture failed : {}", e);
                        hardware.status_led.set(IndicatorPattern::Fault);
                    }
                },
                (true, false) => {
                    info!("NIC card removed");
                    last_sample = None;
                    hardware.status_led.set(IndicatorPattern::WaitingCard);
                }
                (false, false) => {}
            }

            Timer::after(config.poll_interval).await;
        }
    }
}
