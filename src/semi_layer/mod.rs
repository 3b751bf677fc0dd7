/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

// [`semi-layer`] justify common necessary

pub(crate) mod indicator;

pub mod timing;
