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

//! The dispatch loop.
//!
//! Every received code goes through the same steps:
//!
//! 1. **Debounce**: repeats inside the cooldown are dropped.
//! 2. **Map**: the code becomes a [`Button`], or is reported as unknown.
//! 3. **Route**: the handler chain picks who acts on the button.
//! 4. **Execute**: the action runs. Only a successful action is recorded as
//!    the last press, so a failure (e.g. mpv not running yet) can be retried
//!    straight away without waiting out the cooldown.
//!
//! Nothing that goes wrong with a single code stops the loop. Only the code
//! source failing does.

pub(crate) mod source;

use std::time::Instant;

use tracing::{debug, error, info, trace};

use crate::{
    actions::ActionError,
    controller::Controller,
    debounce::{DebounceState, Debouncer},
    events::source::{CodeSource, SourceError},
    model::{Button, RawCode},
};

/// What happened to a single received code.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// A repeat inside the cooldown window.
    Suppressed { code: Option<RawCode> },

    /// No mapping knows the code, or it was a repeat with nothing to repeat.
    Unrecognized { code: Option<RawCode> },

    /// The button is known but no handler claimed it.
    Unbound { code: RawCode, button: Button },

    Executed {
        code: RawCode,
        button: Button,
        handler: String,
        description: String,
    },

    Failed {
        code: RawCode,
        button: Button,
        handler: String,
        description: String,
        error: ActionError,
    },
}

/// Owns the controller and the debounce state for the lifetime of the loop.
pub(crate) struct Dispatcher {
    controller: Controller,
    debouncer: Debouncer,
    state: DebounceState,
}

impl Dispatcher {
    pub(crate) fn new(controller: Controller, debouncer: Debouncer) -> Self {
        Self {
            controller,
            debouncer,
            state: DebounceState::default(),
        }
    }

    pub(crate) fn state(&self) -> &DebounceState {
        &self.state
    }

    /// Processes one raw token received at `now`.
    pub(crate) fn step(&mut self, token: &str, now: Instant) -> Outcome {
        let decision = self
            .debouncer
            .decide(RawCode::parse(token), &self.state, now);
        if decision.suppress {
            return Outcome::Suppressed {
                code: decision.code,
            };
        }

        let Some(code) = decision.code else {
            return Outcome::Unrecognized { code: None };
        };

        let Some(button) = self.controller.resolve(&code) else {
            return Outcome::Unrecognized { code: Some(code) };
        };

        let Some(route) = self.controller.route(button) else {
            return Outcome::Unbound { code, button };
        };

        let handler = route.handler.name().to_string();
        let description = route.description().to_string();

        match route.execute() {
            Ok(()) => {
                self.state.record(code.clone(), now);
                Outcome::Executed {
                    code,
                    button,
                    handler,
                    description,
                }
            }
            Err(error) => Outcome::Failed {
                code,
                button,
                handler,
                description,
                error,
            },
        }
    }

    /// Runs until the source ends or the process is interrupted.
    ///
    /// # Errors
    ///
    /// Returns the source's error if it can no longer be read, e.g. because
    /// the receiver was unplugged.
    pub(crate) fn run(&mut self, source: &mut impl CodeSource) -> Result<(), SourceError> {
        while let Some(token) = source.next_code()? {
            let outcome = self.step(&token, Instant::now());
            report(&token, &outcome);
        }

        debug!(
            last_code = ?self.state().last_code(),
            last_time = ?self.state().last_time(),
            "Code source ended"
        );
        Ok(())
    }
}

fn report(token: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Suppressed { code } => trace!(token, ?code, "Repeat suppressed"),
        Outcome::Unrecognized { code: Some(code) } => {
            info!(%code, "No button associated with code")
        }
        Outcome::Unrecognized { code: None } => {
            info!(token, "No button associated with code, nothing to repeat yet")
        }
        Outcome::Unbound { code, button } => {
            info!(%code, %button, "No action associated with button")
        }
        Outcome::Executed {
            code,
            button,
            handler,
            description,
        } => info!(
            %code,
            %button,
            handler = handler.as_str(),
            description = description.as_str(),
            "Executed"
        ),
        Outcome::Failed {
            code,
            button,
            handler,
            description,
            error,
        } => {
            let reason = if error.is_unreachable() {
                "Target unreachable"
            } else {
                "Action failed"
            };
            error!(
                %code,
                %button,
                handler = handler.as_str(),
                description = description.as_str(),
                "{reason}: {error}"
            )
        }
    }
}
