/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

pub(crate) mod fixture_straps;
pub(crate) mod fru_eeprom;
pub(crate) mod scan_chain;
