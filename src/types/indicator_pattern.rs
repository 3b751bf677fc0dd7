/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::semi_layer::timing::ToggleTiming;

/// ## Status LED pattern
///
/// | Pattern       | High    | Low     | Meaning                              |
/// | ------------- | ------- | ------- | ------------------------------------ |
/// | `Off`         | -       | -       | Not started                          |
/// | `WaitingCard` | 500 ms  | 500 ms  | PRSNTB[3:0] reads `1111`             |
/// | `Heartbeat`   | 100 ms  | 900 ms  | Card present, last FRU / scan passed |
/// | `Fault`       | 100 ms  | 100 ms  | Last FRU read or scan capture failed |
#[repr(u8)]
#[derive(
    Debug, defmt::Format, Clone, Copy, Eq, PartialEq, Default, TryFromPrimitive, IntoPrimitive,
)]
pub enum IndicatorPattern {
    #[default]
    Off = 0,
    WaitingCard = 1,
    Heartbeat = 2,
    Fault = 3,
}

impl IndicatorPattern {
    pub const fn timing(&self) -> Option<ToggleTiming> {
        match self {
            Self::Off => None,
            Self::WaitingCard => Some(ToggleTiming {
                high_ms: 500,
                low_ms: 500,
            }),
            Self::Heartbeat => Some(ToggleTiming {
                high_ms: 100,
                low_ms: 900,
            }),
            Self::Fault => Some(ToggleTiming {
                high_ms: 100,
                low_ms: 100,
            }),
        }
    }
}
