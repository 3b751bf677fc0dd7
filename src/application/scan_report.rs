/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use defmt::info;
use ttf_fixture_core::scan::{ScanBitNamer, ScanSample};

pub fn report_scan(sample: ScanSample) {
    info!("scan chain shift register 0: {=u32:08X}", sample.raw());

    for named in ScanBitNamer::iter(sample) {
        info!(
            "{}.{} {=str} ... {}",
            named.byte,
            named.bit,
            named.name,
            named.level as u8
        );
    }
}

/// Only the bits that flipped since `previous`
pub fn report_scan_change(previous: ScanSample, sample: ScanSample) {
    info!(
        "scan chain changed {=u32:08X} -> {=u32:08X}",
        previous.raw(),
        sample.raw()
    );

    ScanBitNamer::iter(sample)
        .filter(|named| previous.bit(named.register_bit) != named.level)
        .for_each(|named| info!("{=str} -> {}", named.name, named.level as u8));
}
