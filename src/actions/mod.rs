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

//! Side effects performed in response to a button.
//!
//! An [`Action`] is the opaque, failable effect that a handler binds to a
//! button. The dispatch loop never looks inside an action: it runs it and
//! inspects the result.
//!
//! # Organization
//!
//! * [`process`]: Actions that run an external program, such as a key press
//!   synthesiser.
//!
//! Player commands live with the player in [`crate::player::commands`].

pub(crate) mod process;

use std::{io, process::ExitStatus};

use thiserror::Error;

use crate::player::SinkError;

/// A zero-argument effect bound to a button.
pub(crate) trait Action {
    fn execute(&self) -> Result<(), ActionError>;
}

impl<F> Action for F
where
    F: Fn() -> Result<(), ActionError>,
{
    fn execute(&self) -> Result<(), ActionError> {
        self()
    }
}

#[derive(Debug, Error)]
pub(crate) enum ActionError {
    /// The target of the action is not there or refused the connection.
    #[error(transparent)]
    Unreachable(SinkError),

    #[error(transparent)]
    Sink(SinkError),

    #[error("Failed to run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

impl ActionError {
    /// Whether the failure is the kind a user can fix by simply trying again
    /// later, e.g. by starting the player.
    pub(crate) fn is_unreachable(&self) -> bool {
        matches!(self, ActionError::Unreachable(_))
    }
}

impl From<SinkError> for ActionError {
    fn from(error: SinkError) -> Self {
        if error.is_unreachable() {
            ActionError::Unreachable(error)
        } else {
            ActionError::Sink(error)
        }
    }
}
