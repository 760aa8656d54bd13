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

//! Domain models and core data structures.
//!
//! This module defines the two identities every received code passes through:
//! the device-specific [`RawCode`] read from the serial line, and the abstract
//! [`Button`] that a remote profile maps it to.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A normalized code token as received from the code source.
///
/// Tokens are trimmed, lower-cased and parsed as hexadecimal (an optional
/// `0x` prefix is accepted). Anything that is not valid hex is kept as text so
/// it can still be logged and compared, but it will never match a mapping
/// entry built from numeric codes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum RawCode {
    Numeric(u64),
    Text(String),
}

impl RawCode {
    /// Normalizes a raw token read from the transport.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// assert_eq!(RawCode::parse(" 49D32\r"), RawCode::Numeric(0x49d32));
    /// assert_eq!(RawCode::parse("0x92"), RawCode::Numeric(0x92));
    /// ```
    pub(crate) fn parse(token: &str) -> Self {
        let token = token.trim().to_ascii_lowercase();
        let digits = token.strip_prefix("0x").unwrap_or(&token);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return RawCode::Text(token);
        }
        match u64::from_str_radix(digits, 16) {
            Ok(value) => RawCode::Numeric(value),
            Err(_) => RawCode::Text(token),
        }
    }

    pub(crate) fn is_numeric(&self) -> bool {
        matches!(self, RawCode::Numeric(_))
    }
}

impl From<u64> for RawCode {
    fn from(value: u64) -> Self {
        RawCode::Numeric(value)
    }
}

impl fmt::Display for RawCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCode::Numeric(value) => write!(f, "{value:#x}"),
            RawCode::Text(text) => write!(f, "{text:?}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown button name \"{0}\"")]
pub(crate) struct UnknownButton(pub(crate) String);

/// Abstract input identities, independent of the physical remote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Button {
    Play,
    Pause,
    Stop,
    Rewind,
    Forward,
    Mute,
    VolumeUp,
    VolumeDown,
    Info,
    Option,
    Back,
    Cancel,
    Home,
    Subtitle,
    Power,
    ChannelUp,
    ChannelDown,
    Menu,
    Setup,
    ChapterNext,
    ChapterPrevious,
    NavUp,
    NavRight,
    NavDown,
    NavLeft,
    Enter,
    StepLeft,
    StepRight,
}

impl Button {
    pub(crate) const ALL: [Button; 28] = [
        Button::Play,
        Button::Pause,
        Button::Stop,
        Button::Rewind,
        Button::Forward,
        Button::Mute,
        Button::VolumeUp,
        Button::VolumeDown,
        Button::Info,
        Button::Option,
        Button::Back,
        Button::Cancel,
        Button::Home,
        Button::Subtitle,
        Button::Power,
        Button::ChannelUp,
        Button::ChannelDown,
        Button::Menu,
        Button::Setup,
        Button::ChapterNext,
        Button::ChapterPrevious,
        Button::NavUp,
        Button::NavRight,
        Button::NavDown,
        Button::NavLeft,
        Button::Enter,
        Button::StepLeft,
        Button::StepRight,
    ];

    /// The stable name used in configuration files and log output.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Button::Play => "play",
            Button::Pause => "pause",
            Button::Stop => "stop",
            Button::Rewind => "rewind",
            Button::Forward => "forward",
            Button::Mute => "mute",
            Button::VolumeUp => "volume_up",
            Button::VolumeDown => "volume_down",
            Button::Info => "info",
            Button::Option => "option",
            Button::Back => "back",
            Button::Cancel => "cancel",
            Button::Home => "home",
            Button::Subtitle => "subtitle",
            Button::Power => "power",
            Button::ChannelUp => "channel_up",
            Button::ChannelDown => "channel_down",
            Button::Menu => "menu",
            Button::Setup => "setup",
            Button::ChapterNext => "chapter_next",
            Button::ChapterPrevious => "chapter_previous",
            Button::NavUp => "nav_up",
            Button::NavRight => "nav_right",
            Button::NavDown => "nav_down",
            Button::NavLeft => "nav_left",
            Button::Enter => "enter",
            Button::StepLeft => "step_left",
            Button::StepRight => "step_right",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Button::ALL
            .into_iter()
            .find(|button| button.name() == wanted)
            .ok_or_else(|| UnknownButton(s.to_string()))
    }
}
