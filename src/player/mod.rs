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

//! mpv control over its JSON/text IPC socket.
//!
//! mpv listens on a local Unix socket when started with
//! `--input-ipc-server=<path>` (or the equivalent `mpv.conf` entry). Each
//! connection accepts newline-terminated input commands, the same syntax as
//! `input.conf`, so several commands can be joined with `;` and sent at once.
//!
//! Delivery is best effort: a command is written and the connection closed
//! without waiting for a reply.

pub(crate) mod commands;

use std::{
    io::{self, Write},
    os::unix::net::UnixStream,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    handlers::{Precondition, ProbeError},
    util::path::expand_home,
};

/// The command sent to find out whether mpv is listening.
const PROBE_COMMAND: &str = "ignore";

#[derive(Debug, Error)]
pub(crate) enum SinkError {
    #[error("mpv socket {} does not exist. Failed to execute mpv command: \"{command}\"", .path.display())]
    Absent { path: PathBuf, command: String },

    #[error("mpv refused the connection on {}. Failed to execute mpv command: \"{command}\"", .path.display())]
    Refused { path: PathBuf, command: String },

    #[error("Failed to execute mpv command \"{command}\" on {}", .path.display())]
    Io {
        path: PathBuf,
        command: String,
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    /// Whether mpv is simply not there, as opposed to some other I/O failure.
    pub(crate) fn is_unreachable(&self) -> bool {
        matches!(self, SinkError::Absent { .. } | SinkError::Refused { .. })
    }

    fn new(path: &Path, command: &str, source: io::Error) -> Self {
        let path = path.to_path_buf();
        let command = command.to_string();
        match source.kind() {
            io::ErrorKind::NotFound => SinkError::Absent { path, command },
            io::ErrorKind::ConnectionRefused => SinkError::Refused { path, command },
            _ => SinkError::Io {
                path,
                command,
                source,
            },
        }
    }
}

/// A handle to a running mpv's IPC socket.
#[derive(Clone, Debug)]
pub(crate) struct MpvIpc {
    socket_path: PathBuf,
}

impl MpvIpc {
    /// # Arguments
    ///
    /// * `socket_path` - Path of the socket, a leading `~` is expanded.
    pub(crate) fn new(socket_path: &str) -> Self {
        Self {
            socket_path: expand_home(socket_path),
        }
    }

    pub(crate) fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub(crate) fn socket_exists(&self) -> bool {
        self.socket_path.exists()
    }

    /// Sends a single command line to mpv.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Absent`] if the socket does not exist and
    /// [`SinkError::Refused`] if nothing is listening on it. Both mean mpv is
    /// not running.
    pub(crate) fn send(&self, command: &str) -> Result<(), SinkError> {
        let error = |source: io::Error| SinkError::new(&self.socket_path, command, source);

        let mut stream = UnixStream::connect(&self.socket_path).map_err(error)?;
        stream
            .write_all(format!("{command}\n").as_bytes())
            .map_err(error)?;
        Ok(())
    }

    /// Checks whether mpv is listening, by sending it a no-op command.
    ///
    /// # Errors
    ///
    /// Only failures other than "absent" or "refused" are errors, those two
    /// just mean mpv is not running.
    pub(crate) fn is_running(&self) -> Result<bool, SinkError> {
        match self.send(PROBE_COMMAND) {
            Ok(()) => Ok(true),
            Err(e) if e.is_unreachable() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Holds a handler back while mpv is running.
///
/// Used for handlers that drive the desktop (e.g. a browser) and must not
/// steal buttons from an active player.
#[derive(Clone, Debug)]
pub(crate) struct PlayerInactive {
    ipc: MpvIpc,
}

impl PlayerInactive {
    pub(crate) fn new(ipc: MpvIpc) -> Self {
        Self { ipc }
    }
}

impl Precondition for PlayerInactive {
    fn check(&self) -> Result<bool, ProbeError> {
        Ok(!self.ipc.is_running()?)
    }
}
