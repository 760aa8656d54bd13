// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # IR remote control for mpv.
//!
//! Relays button presses from an infrared remote to a running mpv.
//!
//! A receiver (typically a microcontroller with an IR sensor) writes one hex
//! code per line to a serial port. Each code is:
//!
//! * **Debounced**, since a held button repeats its code (or sends a special
//!   repeat code) many times a second.
//! * **Mapped** to an abstract button using the enabled remote profiles.
//! * **Routed** through an ordered chain of handlers, the first handler able
//!   to act on the button wins.
//! * **Executed**, usually by sending an input command to mpv's IPC socket.
//!
//! ## Architecture
//!
//! The whole application is a single blocking loop. Configuration errors are
//! reported before the loop starts, and only the serial port failing ends it
//! with an error. A failure to reach mpv is logged and the loop carries on.

mod actions;
mod config;
mod controller;
mod debounce;
mod events;
mod handlers;
mod mapping;
mod model;
mod player;
mod telemetry;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use crate::{
    config::Cli,
    controller::setup::build_controller,
    debounce::Debouncer,
    events::{Dispatcher, source},
    player::MpvIpc,
};

/// The entry point of the application.
///
/// Loads and validates the configuration, opens the serial port, and runs
/// the dispatch loop until the port goes away or the process is interrupted.
fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let config = config::load_config()
        .context("Failed to load configuration file")?
        .merge(&cli);

    if cli.print_config {
        let path = config::config_path().context("Failed to locate configuration file")?;
        println!("# {}", path.display());
        println!("{config:#?}");
        return Ok(());
    }

    let settings = config.validate().context("Invalid configuration")?;

    let controller = build_controller(&settings);
    for mapping in controller.mappings() {
        info!(remote = mapping.name(), codes = mapping.len(), "Loaded remote profile");
    }
    for handler in controller.handlers() {
        debug!(handler = handler.name(), "Registered handler");
    }

    let ipc = MpvIpc::new(&settings.socket);
    if !ipc.socket_exists() {
        warn!(socket = %ipc.socket_path().display(), "Missing mpv socket");
    }

    util::signal::install_interrupt_handler()?;

    let mut source = source::open_serial(&settings.port, settings.baud)
        .context("Failed to connect to the IR receiver")?;
    info!(port = settings.port.as_str(), baud = settings.baud, "Connected. Waiting for IR codes...");

    let debouncer = Debouncer::new(settings.repeat_code.clone(), settings.cooldown);
    info!(
        repeat_code = %debouncer.repeat_code(),
        cooldown = ?debouncer.cooldown(),
        "Debouncing repeats"
    );

    let mut dispatcher = Dispatcher::new(controller, debouncer);
    dispatcher
        .run(&mut source)
        .context("Lost connection to the IR receiver")?;

    info!("Stopped");
    Ok(())
}
