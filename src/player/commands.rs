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

//! mpv commands bound to buttons.
//!
//! The default table below drives a typical video session: transport
//! controls with on-screen feedback, chapter and seek navigation, subtitles
//! and volume.

use crate::{
    actions::{Action, ActionError},
    model::Button,
    player::MpvIpc,
};

/// Sends a fixed command string to mpv.
#[derive(Clone, Debug)]
pub(crate) struct MpvCommand {
    ipc: MpvIpc,
    command: String,
}

impl MpvCommand {
    pub(crate) fn new(ipc: MpvIpc, command: impl Into<String>) -> Self {
        Self {
            ipc,
            command: command.into(),
        }
    }
}

impl Action for MpvCommand {
    fn execute(&self) -> Result<(), ActionError> {
        Ok(self.ipc.send(&self.command)?)
    }
}

/// The default button to mpv command table.
pub(crate) fn default_commands() -> Vec<(Button, &'static str)> {
    vec![
        (
            Button::Play,
            "set pause no; set speed 1; set mute no; show-text \"Play\"",
        ),
        (Button::Pause, "set pause yes; set speed 1; show-text \"Pause\""),
        (
            Button::Forward,
            "multiply speed 2; set pause no; set mute yes; show-text \"Fast-forward\"",
        ),
        (Button::Rewind, "set speed 1; seek -5; show-text \"Rewind\""),
        (Button::ChapterPrevious, "add chapter -1"),
        (Button::ChapterNext, "add chapter 1"),
        (Button::StepLeft, "seek -1"),
        (Button::StepRight, "seek 1"),
        (Button::Subtitle, "cycle sub"),
        (Button::Enter, "show-progress"),
        (Button::Stop, "quit-watch-later"),
        (Button::NavLeft, "seek -5"),
        (Button::NavRight, "seek 5"),
        (Button::NavDown, "seek -60"),
        (Button::NavUp, "seek 60"),
        (Button::VolumeUp, "add volume 2"),
        (Button::VolumeDown, "add volume -2"),
        (Button::Mute, "cycle mute"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::tests::{listen, temp_socket_path};

    #[test]
    fn executes_by_sending_its_command() {
        let (_dir, path) = temp_socket_path();
        let server = listen(&path, 1);
        let action = MpvCommand::new(MpvIpc::new(path.to_str().unwrap()), "add chapter 1");

        action.execute().unwrap();
        assert_eq!(server.join().unwrap(), ["add chapter 1\n"]);
    }

    #[test]
    fn missing_player_is_unreachable() {
        let (_dir, path) = temp_socket_path();
        let action = MpvCommand::new(MpvIpc::new(path.to_str().unwrap()), "cycle sub");

        let error = action.execute().unwrap_err();
        assert!(error.is_unreachable());
        assert!(error.to_string().contains("cycle sub"));
    }

    #[test]
    fn default_table_binds_each_button_once() {
        let commands = default_commands();
        let mut buttons: Vec<_> = commands.iter().map(|(button, _)| *button).collect();
        buttons.sort();
        buttons.dedup();
        assert_eq!(buttons.len(), commands.len());
    }
}
