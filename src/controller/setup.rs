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

//! Builds the controller for a run from validated [`Settings`].
//!
//! The handler chain is:
//!
//! 1. **desktop** (optional): navigation and enter become key presses, but
//!    only while mpv is not running, e.g. to drive a browser based media
//!    catalog.
//! 2. **mpv**: everything else goes to mpv as input commands.

use std::collections::BTreeMap;

use crate::{
    actions::process::ProcessAction,
    config::Settings,
    controller::Controller,
    handlers::Handler,
    model::Button,
    player::{
        MpvIpc, PlayerInactive,
        commands::{self, MpvCommand},
    },
};

pub(crate) const DESKTOP_HANDLER: &str = "desktop";
pub(crate) const MPV_HANDLER: &str = "mpv";

const DESKTOP_KEYS: [(Button, &str, &str); 3] = [
    (Button::NavLeft, "Left", "Press left arrow"),
    (Button::NavRight, "Right", "Press right arrow"),
    (Button::Enter, "Return", "Press enter"),
];

pub(crate) fn build_controller(settings: &Settings) -> Controller {
    let ipc = MpvIpc::new(&settings.socket);

    let mut builder = settings
        .mappings
        .iter()
        .cloned()
        .fold(Controller::builder(), |builder, mapping| builder.mapping(mapping));

    if settings.desktop_keys {
        builder = builder.handler(desktop_handler(&settings.key_tool, ipc.clone()));
    }

    builder.handler(mpv_handler(ipc, &settings.mpv_overrides)).build()
}

fn desktop_handler(key_tool: &str, ipc: MpvIpc) -> Handler {
    DESKTOP_KEYS
        .into_iter()
        .fold(Handler::new(DESKTOP_HANDLER), |handler, (button, key, description)| {
            handler.bind(button, ProcessAction::key_press(key_tool, key), description)
        })
        .only_when(PlayerInactive::new(ipc))
}

/// The mpv handler, with the default command table patched by `overrides`.
fn mpv_handler(ipc: MpvIpc, overrides: &[(Button, String)]) -> Handler {
    let mut table: BTreeMap<Button, String> = commands::default_commands()
        .into_iter()
        .map(|(button, command)| (button, command.to_string()))
        .collect();
    table.extend(overrides.iter().cloned());

    table
        .into_iter()
        .fold(Handler::new(MPV_HANDLER), |handler, (button, command)| {
            let action = MpvCommand::new(ipc.clone(), command.clone());
            handler.bind(button, action, command)
        })
}
