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

//! Repeat detection and cooldown enforcement.
//!
//! A held remote button produces a stream of codes: either the same code over
//! and over, or the code once followed by a "repeat" code. The [`Debouncer`]
//! collapses that stream back into discrete presses.
//!
//! The debouncer itself is pure. The dispatch loop owns the single
//! [`DebounceState`] and records into it only after an action succeeds.

use std::time::{Duration, Instant};

use crate::model::RawCode;

/// The last code that was successfully acted upon, and when.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct DebounceState {
    last_code: Option<RawCode>,
    last_time: Option<Instant>,
}

impl DebounceState {
    pub(crate) fn last_code(&self) -> Option<&RawCode> {
        self.last_code.as_ref()
    }

    pub(crate) fn last_time(&self) -> Option<Instant> {
        self.last_time
    }

    /// Records a successfully executed code.
    ///
    /// The timestamp never moves backwards, even if the caller hands in an
    /// older instant.
    pub(crate) fn record(&mut self, code: RawCode, at: Instant) {
        let at = match self.last_time {
            Some(previous) => at.max(previous),
            None => at,
        };
        self.last_code = Some(code);
        self.last_time = Some(at);
    }
}

/// The verdict for a single received code.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Decision {
    /// The code to map, `None` when a repeat arrives before anything was
    /// pressed.
    pub(crate) code: Option<RawCode>,
    pub(crate) suppress: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Debouncer {
    repeat_code: RawCode,
    cooldown: Duration,
}

impl Debouncer {
    /// # Arguments
    ///
    /// * `repeat_code` - The code a remote sends to mean "repeat the previous
    ///   button".
    /// * `cooldown` - Minimum time between two executions of the same code.
    pub(crate) fn new(repeat_code: RawCode, cooldown: Duration) -> Self {
        Self {
            repeat_code,
            cooldown,
        }
    }

    pub(crate) fn repeat_code(&self) -> &RawCode {
        &self.repeat_code
    }

    pub(crate) fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Decides what to do with a received code.
    ///
    /// A code equal to the last executed code, or equal to the repeat code,
    /// is treated as a repeat: it resolves to the last executed code and is
    /// suppressed while the cooldown since the last execution is still
    /// running. Any other code is a fresh press and always goes through.
    pub(crate) fn decide(&self, raw: RawCode, state: &DebounceState, now: Instant) -> Decision {
        let is_repeat = raw == self.repeat_code || state.last_code.as_ref() == Some(&raw);
        if !is_repeat {
            return Decision {
                code: Some(raw),
                suppress: false,
            };
        }

        let suppress = state
            .last_time
            .is_some_and(|last| now.saturating_duration_since(last) < self.cooldown);

        Decision {
            code: state.last_code.clone(),
            suppress,
        }
    }
}
