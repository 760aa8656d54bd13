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

//! Code-to-button mappings.
//!
//! Each physical remote (or generation of remote) gets its own [`Mapping`],
//! associating the codes it emits with abstract [`Button`]s. Supporting a new
//! remote means adding a mapping, not a new type.

pub(crate) mod profiles;

use std::collections::HashMap;

use crate::model::{Button, RawCode};

/// A read-only code table for a single remote profile.
#[derive(Clone, Debug)]
pub(crate) struct Mapping {
    name: String,
    codes: HashMap<RawCode, Button>,
}

impl Mapping {
    /// Creates a mapping from `(code, button)` pairs.
    ///
    /// If a code appears more than once, the last entry wins.
    pub(crate) fn new<I, C>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (C, Button)>,
        C: Into<RawCode>,
    {
        Self {
            name: name.into(),
            codes: entries
                .into_iter()
                .map(|(code, button)| (code.into(), button))
                .collect(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn get(&self, code: &RawCode) -> Option<Button> {
        self.codes.get(code).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.codes.len()
    }
}

/// Finds the button for a code, consulting mappings in priority order.
///
/// The first mapping that knows the code wins, later mappings are not
/// consulted.
pub(crate) fn resolve(code: &RawCode, mappings: &[Mapping]) -> Option<Button> {
    mappings.iter().find_map(|mapping| mapping.get(code))
}
