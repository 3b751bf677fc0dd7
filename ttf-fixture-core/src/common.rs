/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

/// warn! for no_std , std(test)
/// Work as `defmt::warn!` on no_std environment
/// Work as `log::warn!` on test coverage with std
#[cfg(not(test))]
macro_rules! hybrid_warn {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::warn!($($args)*);
    };
}

/// warn! for no_std , std(test)
/// Work as `defmt::warn!` on no_std environment
/// Work as `log::warn!` on test coverage with std
#[cfg(test)]
macro_rules! hybrid_warn {
    ($($args:tt)*) => {
        log::warn!($($args)*);
    };
}

/// debug! for no_std , std(test)
/// Work as `defmt::debug!` on no_std environment
/// Work as `log::debug!` on test coverage with std
#[cfg(not(test))]
macro_rules! hybrid_debug {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($args)*);
    };
}

/// debug! for no_std , std(test)
/// Work as `defmt::debug!` on no_std environment
/// Work as `log::debug!` on test coverage with std
#[cfg(test)]
macro_rules! hybrid_debug {
    ($($args:tt)*) => {
        log::debug!($($args)*);
    };
}
