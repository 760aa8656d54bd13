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

//! Button handlers and the handler chain.
//!
//! A [`Handler`] binds buttons to [`Action`]s, each with a human-readable
//! description. Handlers are consulted in priority order and the first one
//! that can currently act on a button claims it.
//!
//! # Preconditions
//!
//! A handler may carry a [`Precondition`], checked afresh every time the
//! handler is asked about a button it binds. This is what lets a handler
//! early in the chain step aside based on live system state, e.g. "only
//! while the player is not running", so that a later, more general handler
//! gets the button instead.
//!
//! Asking a handler yields a [`Capability`]: it claims the button, declines
//! it, or failed while checking. A failed check is not a claim, and the
//! search carries on with the next handler.

use std::{collections::HashMap, fmt};

use thiserror::Error;
use tracing::warn;

use crate::{
    actions::{Action, ActionError},
    model::Button,
    player::SinkError,
};

#[derive(Debug, Error)]
pub(crate) enum ProbeError {
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// A runtime condition that must hold for a handler to act.
pub(crate) trait Precondition {
    /// Returns `Ok(true)` if the handler may act right now.
    fn check(&self) -> Result<bool, ProbeError>;
}

/// An action and the description shown when it runs.
pub(crate) struct Binding {
    action: Box<dyn Action>,
    description: String,
}

impl Binding {
    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn execute(&self) -> Result<(), ActionError> {
        self.action.execute()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The answer a handler gives when asked about a button.
#[derive(Debug)]
pub(crate) enum Capability<'a> {
    Claims(&'a Binding),
    Declines,
    Failed(ProbeError),
}

/// A named table of button bindings, with an optional precondition.
pub(crate) struct Handler {
    name: String,
    bindings: HashMap<Button, Binding>,
    precondition: Option<Box<dyn Precondition>>,
}

impl Handler {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
            precondition: None,
        }
    }

    /// Binds an action to a button, replacing any earlier binding.
    pub(crate) fn bind(
        mut self,
        button: Button,
        action: impl Action + 'static,
        description: impl Into<String>,
    ) -> Self {
        self.bindings.insert(
            button,
            Binding {
                action: Box::new(action),
                description: description.into(),
            },
        );
        self
    }

    /// Makes the handler decline every button while `precondition` does not
    /// hold.
    pub(crate) fn only_when(mut self, precondition: impl Precondition + 'static) -> Self {
        self.precondition = Some(Box::new(precondition));
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Asks whether this handler can act on `button` right now.
    ///
    /// The precondition, if any, is only checked for buttons this handler
    /// actually binds.
    pub(crate) fn capability(&self, button: Button) -> Capability<'_> {
        let Some(binding) = self.bindings.get(&button) else {
            return Capability::Declines;
        };

        match self.precondition.as_ref().map(|p| p.check()) {
            None | Some(Ok(true)) => Capability::Claims(binding),
            Some(Ok(false)) => Capability::Declines,
            Some(Err(e)) => Capability::Failed(e),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("bindings", &self.bindings.len())
            .field("precondition", &self.precondition.is_some())
            .finish()
    }
}

/// The handler that claimed a button, and what it will do.
#[derive(Debug)]
pub(crate) struct Route<'a> {
    pub(crate) handler: &'a Handler,
    pub(crate) binding: &'a Binding,
}

impl Route<'_> {
    pub(crate) fn description(&self) -> &str {
        self.binding.description()
    }

    pub(crate) fn execute(&self) -> Result<(), ActionError> {
        self.binding.execute()
    }
}

/// Finds the first handler, in priority order, that claims `button`.
///
/// Every handler is asked afresh, nothing is cached between calls. A handler
/// whose precondition check fails is logged and skipped.
pub(crate) fn route(button: Button, handlers: &[Handler]) -> Option<Route<'_>> {
    for handler in handlers {
        match handler.capability(button) {
            Capability::Claims(binding) => return Some(Route { handler, binding }),
            Capability::Declines => {}
            Capability::Failed(e) => {
                warn!(handler = handler.name(), %button, "Handler check failed: {e}");
            }
        }
    }
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::{cell::Cell, rc::Rc};

    /// An action that counts its executions and can be told to fail.
    #[derive(Clone, Default)]
    pub(crate) struct FakeAction {
        pub(crate) calls: Rc<Cell<usize>>,
        pub(crate) unreachable: Rc<Cell<bool>>,
    }

    impl Action for FakeAction {
        fn execute(&self) -> Result<(), ActionError> {
            self.calls.set(self.calls.get() + 1);
            if self.unreachable.get() {
                Err(ActionError::Unreachable(SinkError::Absent {
                    path: "/nonexistent/mpv.sock".into(),
                    command: "fake".into(),
                }))
            } else {
                Ok(())
            }
        }
    }

    /// A precondition with a scripted answer that counts how often it is
    /// asked.
    #[derive(Clone)]
    pub(crate) struct FakeCondition {
        pub(crate) answer: Rc<Cell<Option<bool>>>,
        pub(crate) checks: Rc<Cell<usize>>,
    }

    impl FakeCondition {
        pub(crate) fn new(answer: Option<bool>) -> Self {
            Self {
                answer: Rc::new(Cell::new(answer)),
                checks: Rc::default(),
            }
        }
    }

    impl Precondition for FakeCondition {
        fn check(&self) -> Result<bool, ProbeError> {
            self.checks.set(self.checks.get() + 1);
            self.answer.get().ok_or_else(|| {
                ProbeError::Sink(SinkError::Io {
                    path: "/run/mpv.sock".into(),
                    command: "ignore".into(),
                    source: std::io::Error::other("probe failed"),
                })
            })
        }
    }

    #[test]
    fn first_capable_handler_wins() {
        let first = FakeAction::default();
        let second = FakeAction::default();
        let handlers = [
            Handler::new("first").bind(Button::Play, first.clone(), "first play"),
            Handler::new("second").bind(Button::Play, second.clone(), "second play"),
        ];

        let route = route(Button::Play, &handlers).unwrap();
        assert_eq!(route.handler.name(), "first");
        assert_eq!(route.description(), "first play");

        route.execute().unwrap();
        assert_eq!(first.calls.get(), 1);
        assert_eq!(second.calls.get(), 0);
    }

    #[test]
    fn declining_handler_does_not_block_later_ones() {
        let condition = FakeCondition::new(Some(false));
        let handlers = [
            Handler::new("desktop")
                .bind(Button::NavLeft, FakeAction::default(), "press left")
                .only_when(condition.clone()),
            Handler::new("mpv").bind(Button::NavLeft, FakeAction::default(), "seek -5"),
        ];

        let route = route(Button::NavLeft, &handlers).unwrap();
        assert_eq!(route.handler.name(), "mpv");
        assert_eq!(condition.checks.get(), 1);
    }

    #[test]
    fn failed_check_is_not_a_claim() {
        let condition = FakeCondition::new(None);
        let handler = Handler::new("desktop")
            .bind(Button::Enter, FakeAction::default(), "press enter")
            .only_when(condition);

        assert!(matches!(
            handler.capability(Button::Enter),
            Capability::Failed(ProbeError::Sink(_))
        ));

        let handlers = [
            handler,
            Handler::new("mpv").bind(Button::Enter, FakeAction::default(), "show-progress"),
        ];
        assert_eq!(route(Button::Enter, &handlers).unwrap().handler.name(), "mpv");
    }

    #[test]
    fn precondition_is_checked_on_every_dispatch() {
        let condition = FakeCondition::new(Some(true));
        let handlers = [Handler::new("desktop")
            .bind(Button::Enter, FakeAction::default(), "press enter")
            .only_when(condition.clone())];

        assert!(route(Button::Enter, &handlers).is_some());
        condition.answer.set(Some(false));
        assert!(route(Button::Enter, &handlers).is_none());
        assert_eq!(condition.checks.get(), 2);
    }

    #[test]
    fn precondition_is_skipped_for_unbound_buttons() {
        let condition = FakeCondition::new(Some(true));
        let handler = Handler::new("desktop")
            .bind(Button::Enter, FakeAction::default(), "press enter")
            .only_when(condition.clone());

        assert!(matches!(handler.capability(Button::Play), Capability::Declines));
        assert_eq!(condition.checks.get(), 0);
    }

    #[test]
    fn unclaimed_button_routes_nowhere() {
        let handlers = [Handler::new("mpv").bind(Button::Play, FakeAction::default(), "play")];
        assert!(route(Button::Power, &handlers).is_none());
        assert!(route(Button::Play, &[]).is_none());
    }

    #[test]
    fn closures_are_actions() {
        let handlers = [Handler::new("inline").bind(
            Button::Mute,
            || Ok::<(), ActionError>(()),
            "mute",
        )];
        assert!(route(Button::Mute, &handlers).unwrap().execute().is_ok());
    }
}
