/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

#![no_std]
#![no_main]
#![feature(type_alias_impl_trait)]
#![feature(impl_trait_in_assoc_type)]

mod application;
mod boards;
mod components;
mod semi_layer;
mod types;

use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use crate::application::Application;
use crate::boards::Board;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let board = Board::init().start_tasks(&spawner);

    let application = Application::new(board);
    application.main_task().await;
}
