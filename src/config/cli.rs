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

use clap::{ArgAction, Parser};

/// Command-line options. Every value left out falls back to the
/// configuration file.
#[derive(Debug, Parser, Clone)]
#[command(
    about = "Relay infrared remote button presses from a serial receiver to mpv",
    author,
    version
)]
pub(crate) struct Cli {
    /// Serial device path or port name (default: /dev/ttyUSB0)
    pub port: Option<String>,

    /// Serial baud rate (default: 9600)
    pub baud: Option<u32>,

    /// Treat this code as "repeat the last received code" (default: 0)
    #[arg(short = 'r', long = "repeat-code", value_name = "CODE")]
    pub repeat_code: Option<String>,

    /// Cooldown in seconds between executing duplicate commands (default: 0.2)
    #[arg(short = 'c', long = "cooldown", value_name = "SECONDS")]
    pub cooldown: Option<f64>,

    /// Path to the mpv IPC socket (default: ~/.config/mpv/socket)
    #[arg(short = 's', long = "socket", env = "MPV_SOCKET_PATH")]
    pub socket: Option<String>,

    /// Never press desktop keys, send every button to mpv
    #[arg(long = "no-desktop-keys", default_value_t = false)]
    pub no_desktop_keys: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the effective configuration and its file location, then exit
    #[arg(long = "print-config", default_value_t = false)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_port_and_baud() {
        let cli = Cli::parse_from(["irmpv", "/dev/ttyACM0", "19200"]);
        assert_eq!(cli.port.as_deref(), Some("/dev/ttyACM0"));
        assert_eq!(cli.baud, Some(19200));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::parse_from(["irmpv", "-r", "ffffffff", "-c", "0.3", "-s", "/tmp/s", "-vv"]);
        assert_eq!(cli.repeat_code.as_deref(), Some("ffffffff"));
        assert_eq!(cli.cooldown, Some(0.3));
        assert_eq!(cli.socket.as_deref(), Some("/tmp/s"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_non_numeric_baud() {
        assert!(Cli::try_parse_from(["irmpv", "/dev/ttyUSB0", "fast"]).is_err());
    }
}
