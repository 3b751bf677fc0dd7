/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Manufacturing date/time of the board info area.
//!
//! The EEPROM stores minutes since 1996-01-01 00:00 UTC in 3 little endian bytes.
//! Conversion to calendar fields is pure integer arithmetic (proleptic gregorian, UTC),
//! the firmware has no RTC nor timezone.

use core::fmt;

/// Unix time of 1996-01-01T00:00:00Z
pub const FRU_EPOCH_UNIX_SECONDS: u64 = 820_454_400;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MfgTimestamp(u32);

impl MfgTimestamp {
    /// `minutes` is cut down to 24 bits like the storage format
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes & 0x00FF_FFFF)
    }

    pub const fn from_le_bytes(raw: [u8; 3]) -> Self {
        Self((raw[0] as u32) | ((raw[1] as u32) << 8) | ((raw[2] as u32) << 16))
    }

    pub const fn minutes(&self) -> u32 {
        self.0
    }

    /// Minutes of the fru epoch converted to seconds since 1970-01-01
    pub const fn unix_seconds(&self) -> u64 {
        self.0 as u64 * 60 + FRU_EPOCH_UNIX_SECONDS
    }

    pub fn to_datetime(&self) -> CalendarDateTime {
        CalendarDateTime::from_unix_seconds(self.unix_seconds())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub const fn short_name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

const MONTH_SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Broken down UTC time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarDateTime {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub weekday: Weekday,
}

impl CalendarDateTime {
    pub fn from_unix_seconds(seconds: u64) -> Self {
        let days = seconds / SECONDS_PER_DAY;
        let rem = seconds % SECONDS_PER_DAY;
        let (year, month, day) = civil_from_days(days);

        Self {
            year,
            month,
            day,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
            // 1970-01-01 was a thursday
            weekday: Weekday::ALL[((days + 4) % 7) as usize],
        }
    }
}

/// Days since 1970-01-01 to (year, month, day).
/// Howard Hinnant's `civil_from_days`, restricted to non negative days.
fn civil_from_days(days: u64) -> (u16, u8, u8) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + (month <= 2) as u64;

    (year as u16, month as u8, day as u8)
}

/// `asctime` layout without the trailing newline, `Mon Jan  1 00:00:00 1996`
impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{:3} {:02}:{:02}:{:02} {}",
            self.weekday.short_name(),
            MONTH_SHORT_NAMES[(self.month as usize).clamp(1, 12) - 1],
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.year
        )
    }
}
