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

//! Application configuration.
//!
//! Defaults live in a configuration file managed by `confy`, so that remote
//! profiles and custom code tables survive between runs. Command-line
//! arguments override the file for a single run. The merged result is
//! validated once at startup into immutable [`Settings`].

mod cli;
mod validation;

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

pub(crate) use cli::Cli;
pub(crate) use validation::Settings;

use crate::mapping::profiles;

const CONFIG_NAME: &str = "irmpv";

pub(crate) const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub(crate) const DEFAULT_BAUD: u32 = 9600;
pub(crate) const DEFAULT_REPEAT_CODE: &str = "0";
pub(crate) const DEFAULT_COOLDOWN_SECS: f64 = 0.2;
pub(crate) const DEFAULT_SOCKET: &str = "~/.config/mpv/socket";
pub(crate) const DEFAULT_KEY_TOOL: &str = "xdotool";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub version: u32,

    /// Serial device path or port name.
    pub port: String,
    pub baud: u32,

    /// The code a remote sends to mean "repeat the last button".
    pub repeat_code: String,

    /// Seconds before a repeated code is acted upon again.
    pub cooldown: f64,

    /// Path of mpv's IPC socket (`input-ipc-server`).
    pub socket: String,

    /// Built-in remote profiles to enable, in priority order.
    pub remotes: Vec<String>,

    /// Additional code tables, consulted before the built-in profiles.
    pub mappings: Vec<MappingConfig>,

    /// Press desktop keys for navigation buttons while mpv is not running.
    pub desktop_keys: bool,

    /// Key synthesiser used for desktop key presses.
    pub key_tool: String,

    /// Per-button overrides of the default mpv commands, keyed by button name.
    pub mpv_commands: BTreeMap<String, String>,
}

/// A user-defined remote profile.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub(crate) struct MappingConfig {
    pub name: String,

    /// Codes (hex) to button names.
    pub codes: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            port: DEFAULT_PORT.to_string(),
            baud: DEFAULT_BAUD,
            repeat_code: DEFAULT_REPEAT_CODE.to_string(),
            cooldown: DEFAULT_COOLDOWN_SECS,
            socket: DEFAULT_SOCKET.to_string(),
            remotes: profiles::BUILTIN.iter().map(|name| name.to_string()).collect(),
            mappings: vec![],
            desktop_keys: true,
            key_tool: DEFAULT_KEY_TOOL.to_string(),
            mpv_commands: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Applies command-line overrides on top of the file configuration.
    pub(crate) fn merge(mut self, cli: &Cli) -> Self {
        if let Some(port) = &cli.port {
            self.port = port.clone();
        }
        if let Some(baud) = cli.baud {
            self.baud = baud;
        }
        if let Some(repeat_code) = &cli.repeat_code {
            self.repeat_code = repeat_code.clone();
        }
        if let Some(cooldown) = cli.cooldown {
            self.cooldown = cooldown;
        }
        if let Some(socket) = &cli.socket {
            self.socket = socket.clone();
        }
        if cli.no_desktop_keys {
            self.desktop_keys = false;
        }
        self
    }
}

pub(crate) fn load_config() -> Result<AppConfig, confy::ConfyError> {
    confy::load(CONFIG_NAME, None)
}

pub(crate) fn config_path() -> Result<PathBuf, confy::ConfyError> {
    confy::get_configuration_file_path(CONFIG_NAME, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_overrides_file_values() {
        let file = AppConfig {
            port: "/dev/ttyACM0".into(),
            ..AppConfig::default()
        };
        let cli = Cli::parse_from([
            "irmpv",
            "/dev/ttyUSB1",
            "115200",
            "-c",
            "0.5",
            "--no-desktop-keys",
        ]);

        let merged = file.merge(&cli);
        assert_eq!(merged.port, "/dev/ttyUSB1");
        assert_eq!(merged.baud, 115200);
        assert_eq!(merged.cooldown, 0.5);
        assert!(!merged.desktop_keys);
        assert_eq!(merged.repeat_code, DEFAULT_REPEAT_CODE);
    }

    #[test]
    fn file_values_survive_an_empty_command_line() {
        let file = AppConfig {
            baud: 57600,
            socket: "/run/mpv.sock".into(),
            ..AppConfig::default()
        };
        let cli = Cli::parse_from(["irmpv"]);

        let merged = file.clone().merge(&cli);
        assert_eq!(merged.baud, 57600);
        assert_eq!(merged.port, file.port);
        assert_eq!(merged.cooldown, file.cooldown);
        assert_eq!(merged.desktop_keys, file.desktop_keys);
    }

    #[test]
    fn defaults_enable_every_builtin_remote() {
        let config = AppConfig::default();
        assert_eq!(config.remotes, ["legacy", "sony"]);
        assert!(config.desktop_keys);
    }
}
