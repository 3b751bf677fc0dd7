/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use core::cell::RefCell;

use embassy_stm32::gpio::{AnyPin, Output};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration, Instant};

use super::timing::BlinkFsm;
use crate::types::indicator_pattern::IndicatorPattern;

/// Status LED driven by its own task, the application only posts the latest pattern.
pub struct Indicator {
    io: Mutex<ThreadModeRawMutex, RefCell<Output<'static, AnyPin>>>,
    request: Signal<ThreadModeRawMutex, IndicatorPattern>,
    name_str: &'static str,
}

impl Indicator {
    pub const fn new(out_pin: Output<'static, AnyPin>, name_str: &'static str) -> Self {
        Self {
            io: Mutex::new(RefCell::new(out_pin)),
            request: Signal::new(),
            name_str,
        }
    }

    /// Replace the running pattern, repeated requests of the same pattern keep the phase
    pub fn set(&self, pattern: IndicatorPattern) {
        self.request.signal(pattern);
    }

    fn reflect_on_io(&self, level: bool) {
        self.io.lock(|io| match level {
            true => io.borrow_mut().set_high(),
            false => io.borrow_mut().set_low(),
        });
    }

    pub async fn run(&self) -> ! {
        let mut pattern = IndicatorPattern::default();
        let mut fsm: Option<BlinkFsm> = None;
        let mut last = Instant::now();

        loop {
            self.reflect_on_io(fsm.map_or(false, |f| f.expect_output_pin_state()));

            let request = match (pattern.timing(), fsm) {
                (Some(_), Some(f)) => {
                    with_timeout(
                        Duration::from_millis(f.duration().into()),
                        self.request.wait(),
                    )
                    .await
                }
                _ => Ok(self.request.wait().await),
            };

            let elapsed = (Instant::now() - last).as_millis().min(u16::MAX.into()) as u16;
            last = Instant::now();

            match request {
                Ok(next) if next != pattern => {
                    defmt::debug!("{} : {} -> {}", self.name_str, pattern, next);
                    pattern = next;
                    fsm = next.timing().map(|timing| BlinkFsm::rising(&timing));
                }
                _ => {
                    fsm = match (pattern.timing(), fsm) {
                        (Some(timing), Some(f)) => Some(f.substract(&timing, elapsed)),
                        _ => None,
                    };
                }
            }
        }
    }
}

#[embassy_executor::task]
pub async fn indicator_spawn(instance: &'static Indicator) {
    instance.run().await
}
