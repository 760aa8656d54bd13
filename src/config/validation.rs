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

use std::time::Duration;

use thiserror::Error;

use crate::{
    config::AppConfig,
    mapping::{Mapping, profiles},
    model::{Button, RawCode, UnknownButton},
};

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("serial port must not be empty")]
    EmptyPort,

    #[error("baud rate must be greater than zero")]
    InvalidBaud,

    #[error("cooldown must be a finite, non-negative number of seconds, got {0}")]
    InvalidCooldown(f64),

    #[error("repeat code must be a hexadecimal code, got \"{0}\"")]
    InvalidRepeatCode(String),

    #[error("unknown remote profile \"{name}\" (available: {available})")]
    UnknownRemote { name: String, available: String },

    #[error("mapping \"{mapping}\": code \"{code}\" is not hexadecimal")]
    InvalidCode { mapping: String, code: String },

    #[error("{context}: {source}")]
    UnknownButton {
        context: String,
        #[source]
        source: UnknownButton,
    },

    #[error("mpv command for button {0} must not be empty")]
    EmptyCommand(Button),

    #[error(
        "repeat code {code} is also mapped to button {button} by remote \"{mapping}\", choose a different repeat code"
    )]
    RepeatCodeCollision {
        code: RawCode,
        mapping: String,
        button: Button,
    },
}

/// Validated, immutable settings for one run.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub port: String,
    pub baud: u32,
    pub repeat_code: RawCode,
    pub cooldown: Duration,
    pub socket: String,

    /// Code tables in priority order: user-defined first, then the enabled
    /// built-in profiles.
    pub mappings: Vec<Mapping>,

    pub desktop_keys: bool,
    pub key_tool: String,
    pub mpv_overrides: Vec<(Button, String)>,
}

impl AppConfig {
    /// Checks the merged configuration and builds the run settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid value found.
    pub(crate) fn validate(&self) -> Result<Settings, ConfigError> {
        if self.port.trim().is_empty() {
            return Err(ConfigError::EmptyPort);
        }
        if self.baud == 0 {
            return Err(ConfigError::InvalidBaud);
        }

        let cooldown = Duration::try_from_secs_f64(self.cooldown)
            .map_err(|_| ConfigError::InvalidCooldown(self.cooldown))?;

        let repeat_code = RawCode::parse(&self.repeat_code);
        if !repeat_code.is_numeric() {
            return Err(ConfigError::InvalidRepeatCode(self.repeat_code.clone()));
        }

        let mappings = self.build_mappings()?;
        check_repeat_code(&repeat_code, &mappings)?;

        let mpv_overrides = self
            .mpv_commands
            .iter()
            .map(|(name, command)| {
                let button = parse_button(name, "mpv_commands")?;
                if command.trim().is_empty() {
                    return Err(ConfigError::EmptyCommand(button));
                }
                Ok((button, command.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Settings {
            port: self.port.trim().to_string(),
            baud: self.baud,
            repeat_code,
            cooldown,
            socket: self.socket.clone(),
            mappings,
            desktop_keys: self.desktop_keys,
            key_tool: self.key_tool.clone(),
            mpv_overrides,
        })
    }

    fn build_mappings(&self) -> Result<Vec<Mapping>, ConfigError> {
        let mut mappings = Vec::with_capacity(self.mappings.len() + self.remotes.len());

        for custom in &self.mappings {
            let mut entries = Vec::with_capacity(custom.codes.len());
            for (code, name) in &custom.codes {
                let raw = RawCode::parse(code);
                if !raw.is_numeric() {
                    return Err(ConfigError::InvalidCode {
                        mapping: custom.name.clone(),
                        code: code.clone(),
                    });
                }
                let context = format!("mapping \"{}\"", custom.name);
                entries.push((raw, parse_button(name, &context)?));
            }
            mappings.push(Mapping::new(custom.name.clone(), entries));
        }

        for name in &self.remotes {
            let mapping = profiles::builtin(name).ok_or_else(|| ConfigError::UnknownRemote {
                name: name.clone(),
                available: profiles::BUILTIN.join(", "),
            })?;
            mappings.push(mapping);
        }

        Ok(mappings)
    }
}

fn parse_button(name: &str, context: &str) -> Result<Button, ConfigError> {
    name.parse().map_err(|source| ConfigError::UnknownButton {
        context: context.to_string(),
        source,
    })
}

/// Rejects a repeat code that some remote also uses for a real button, since
/// every press of that button would be read as a repeat.
fn check_repeat_code(code: &RawCode, mappings: &[Mapping]) -> Result<(), ConfigError> {
    for mapping in mappings {
        if let Some(button) = mapping.get(code) {
            return Err(ConfigError::RepeatCodeCollision {
                code: code.clone(),
                mapping: mapping.name().to_string(),
                button,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MappingConfig;

    use std::collections::BTreeMap;

    fn custom(name: &str, codes: &[(&str, &str)]) -> MappingConfig {
        MappingConfig {
            name: name.to_string(),
            codes: codes
                .iter()
                .map(|(code, button)| (code.to_string(), button.to_string()))
                .collect(),
        }
    }

    #[test]
    fn accepts_defaults() {
        let settings = AppConfig::default().validate().unwrap();
        assert_eq!(settings.repeat_code, RawCode::Numeric(0));
        assert_eq!(settings.cooldown, Duration::from_millis(200));
        assert_eq!(settings.baud, 9600);
        let names: Vec<_> = settings.mappings.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["legacy", "sony"]);
    }

    #[test]
    fn rejects_bad_cooldowns() {
        for cooldown in [-0.1, f64::NAN, f64::INFINITY] {
            let config = AppConfig {
                cooldown,
                ..AppConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidCooldown(_))
            ));
        }

        let config = AppConfig {
            cooldown: 0.0,
            ..AppConfig::default()
        };
        assert_eq!(config.validate().unwrap().cooldown, Duration::ZERO);
    }

    #[test]
    fn rejects_empty_port_and_zero_baud() {
        let config = AppConfig {
            port: "  ".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPort)));

        let config = AppConfig {
            baud: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaud)));
    }

    #[test]
    fn rejects_non_hex_repeat_code() {
        let config = AppConfig {
            repeat_code: "repeat".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRepeatCode(_))
        ));
    }

    #[test]
    fn rejects_repeat_code_that_is_a_real_button() {
        let config = AppConfig {
            repeat_code: "49D32".into(),
            ..AppConfig::default()
        };
        match config.validate() {
            Err(ConfigError::RepeatCodeCollision {
                mapping, button, ..
            }) => {
                assert_eq!(mapping, "legacy");
                assert_eq!(button, Button::Play);
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn repeat_code_collision_checks_only_enabled_remotes() {
        let config = AppConfig {
            repeat_code: "49d32".into(),
            remotes: vec!["sony".into()],
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_remote() {
        let config = AppConfig {
            remotes: vec!["philips".into()],
            ..AppConfig::default()
        };
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("philips"));
        assert!(error.to_string().contains("legacy, sony"));
    }

    #[test]
    fn custom_mappings_come_first() {
        let config = AppConfig {
            mappings: vec![custom("living-room", &[("0x49D32", "pause"), ("abc", "nav_up")])],
            ..AppConfig::default()
        };
        let settings = config.validate().unwrap();

        assert_eq!(settings.mappings[0].name(), "living-room");
        assert_eq!(
            crate::mapping::resolve(&RawCode::Numeric(0x49d32), &settings.mappings),
            Some(Button::Pause)
        );
    }

    #[test]
    fn rejects_bad_custom_entries() {
        let config = AppConfig {
            mappings: vec![custom("bad", &[("xyz", "play")])],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCode { .. })
        ));

        let config = AppConfig {
            mappings: vec![custom("bad", &[("123", "jump")])],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownButton { .. })
        ));
    }

    #[test]
    fn parses_mpv_overrides() {
        let mut mpv_commands = BTreeMap::new();
        mpv_commands.insert("mute".to_string(), "cycle mute; show-text Mute".to_string());
        let config = AppConfig {
            mpv_commands,
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate().unwrap().mpv_overrides,
            [(Button::Mute, "cycle mute; show-text Mute".to_string())]
        );

        let mut mpv_commands = BTreeMap::new();
        mpv_commands.insert("power".to_string(), " ".to_string());
        let config = AppConfig {
            mpv_commands,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyCommand(Button::Power))
        ));
    }
}
