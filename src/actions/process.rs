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

//! Actions backed by an external program.

use std::process::{Command, Stdio};

use crate::actions::{Action, ActionError};

/// Runs a program with fixed arguments and waits for it to finish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProcessAction {
    program: String,
    args: Vec<String>,
}

impl ProcessAction {
    pub(crate) fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Synthesizes a single key press using an `xdotool` compatible program.
    ///
    /// # Arguments
    ///
    /// * `tool` - The key synthesiser to run, invoked as `tool key <key>`.
    /// * `key` - The key name, e.g. `Left` or `Return`.
    pub(crate) fn key_press(tool: &str, key: &str) -> Self {
        Self::new(tool, ["key", key])
    }
}

impl Action for ProcessAction {
    fn execute(&self) -> Result<(), ActionError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|source| ActionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ActionError::Exit {
                program: self.program.clone(),
                status,
            })
        }
    }
}
