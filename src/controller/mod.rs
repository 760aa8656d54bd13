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

//! The controller: remote profiles plus the handler chain.
//!
//! A [`Controller`] owns an ordered list of [`Mapping`]s and an ordered list
//! of [`Handler`]s, both fixed when it is built. For every received code it
//! answers two questions: which button is this, and who handles it.

pub(crate) mod setup;

use crate::{
    handlers::{self, Handler, Route},
    mapping::{self, Mapping},
    model::{Button, RawCode},
};

#[derive(Debug)]
pub(crate) struct Controller {
    mappings: Vec<Mapping>,
    handlers: Vec<Handler>,
}

impl Controller {
    pub(crate) fn builder() -> ControllerBuilder {
        ControllerBuilder::default()
    }

    pub(crate) fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub(crate) fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Finds the button a code stands for.
    pub(crate) fn resolve(&self, code: &RawCode) -> Option<Button> {
        mapping::resolve(code, &self.mappings)
    }

    /// Finds the handler that will act on a button.
    pub(crate) fn route(&self, button: Button) -> Option<Route<'_>> {
        handlers::route(button, &self.handlers)
    }
}

/// Assembles a [`Controller`]. Mappings and handlers keep the order in which
/// they are added, earlier entries take priority.
#[derive(Default)]
pub(crate) struct ControllerBuilder {
    mappings: Vec<Mapping>,
    handlers: Vec<Handler>,
}

impl ControllerBuilder {
    pub(crate) fn mapping(mut self, mapping: Mapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub(crate) fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub(crate) fn build(self) -> Controller {
        Controller {
            mappings: self.mappings,
            handlers: self.handlers,
        }
    }
}
