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

//! Built-in remote profiles.

use crate::{mapping::Mapping, model::Button};

pub(crate) const LEGACY: &str = "legacy";
pub(crate) const SONY: &str = "sony";

pub(crate) const BUILTIN: [&str; 2] = [LEGACY, SONY];

/// Looks up a built-in profile by name.
pub(crate) fn builtin(name: &str) -> Option<Mapping> {
    match name {
        LEGACY => Some(legacy()),
        SONY => Some(sony()),
        _ => None,
    }
}

/// The first-generation remote, which reports short codes.
pub(crate) fn legacy() -> Mapping {
    Mapping::new(
        LEGACY,
        [
            (0x49d32_u64, Button::Play),
            (0x49d39, Button::Pause),
            (0x49d23, Button::Forward),
            (0x49d22, Button::Rewind),
            (0x49d30, Button::ChapterPrevious),
            (0x49d31, Button::ChapterNext),
            (0x49d5c, Button::StepLeft),
            (0x62d14, Button::StepRight),
            (0x49d63, Button::Subtitle),
            (0x49d0b, Button::Enter),
            (0x49d38, Button::Stop),
            (0x49d7b, Button::NavLeft),
            (0x49d7c, Button::NavRight),
            (0x49d7a, Button::NavDown),
            (0x49d79, Button::NavUp),
            (0x92, Button::VolumeUp),
            (0x93, Button::VolumeDown),
        ],
    )
}

/// The second-generation remote, which reports full 32-bit codes.
pub(crate) fn sony() -> Mapping {
    Mapping::new(
        SONY,
        [
            (0x7f3e0140_u64, Button::Play),
            (0x5f3e2140, Button::Pause),
            (0x4f3e3140, Button::ChapterPrevious),
            (0x3f3e4140, Button::ChapterNext),
            (0xbd3cc140, Button::ChannelUp),
            (0xad3cd140, Button::ChannelDown),
            (0x66270140, Button::Info),
            (0x2a3b5140, Button::Option),
            (0x63022140, Button::Back),
            (0xb001f140, Button::Enter),
            (0x9001d140, Button::NavLeft),
            (0xa001e140, Button::NavRight),
            (0x8001c140, Button::NavDown),
            (0xf001b140, Button::NavUp),
            (0x56170140, Button::VolumeUp),
            (0x46171140, Button::VolumeDown),
            (0x76172140, Button::Mute),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawCode;

    #[test]
    fn every_builtin_name_resolves() {
        for name in BUILTIN {
            let mapping = builtin(name).expect("builtin profile");
            assert_eq!(mapping.name(), name);
            assert_eq!(mapping.len(), 17);
        }
        assert!(builtin("nope").is_none());
    }

    #[test]
    fn legacy_codes_match_serial_tokens() {
        let mapping = legacy();
        assert_eq!(mapping.get(&RawCode::parse("49d32")), Some(Button::Play));
        assert_eq!(mapping.get(&RawCode::parse("92")), Some(Button::VolumeUp));
        assert_eq!(mapping.get(&RawCode::parse("0")), None);
    }
}
