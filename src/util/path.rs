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

use std::path::PathBuf;

/// Expands a leading `~` to the current user's home directory.
///
/// The home directory comes from `HOME`, or from the user database when
/// `HOME` is unset, as is common for services. Paths without a leading `~`,
/// or for a user with no known home directory, are returned unchanged.
///
/// # Examples
///
/// ```ignore
/// // With HOME=/home/me
/// assert_eq!(expand_home("~/.config/mpv/socket"), PathBuf::from("/home/me/.config/mpv/socket"));
/// ```
pub(crate) fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{env, process::Command};

    /// Set in the child process spawned by
    /// `expands_tilde_with_home_variable_unset`.
    const HOMELESS_CHILD: &str = "IRMPV_TEST_HOMELESS_CHILD";

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_home("/tmp/mpv.sock"), PathBuf::from("/tmp/mpv.sock"));
        assert_eq!(expand_home("~other/sock"), PathBuf::from("~other/sock"));
    }

    #[test]
    fn expands_leading_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_home("~/.config/mpv/socket"),
            home.join(".config/mpv/socket")
        );
        assert_eq!(expand_home("~"), home);
    }

    #[test]
    fn expands_tilde_with_home_variable_unset() {
        if env::var_os(HOMELESS_CHILD).is_some() {
            assert!(env::var_os("HOME").is_none());
            let expanded = expand_home("~/.config/mpv/socket");
            assert!(expanded.is_absolute(), "{}", expanded.display());
            assert!(expanded.ends_with(".config/mpv/socket"));
            return;
        }

        // Rerun just this test without HOME, leaving this process's
        // environment alone for the tests running beside it.
        let status = Command::new(env::current_exe().unwrap())
            .args([
                "util::path::tests::expands_tilde_with_home_variable_unset",
                "--exact",
                "--test-threads=1",
            ])
            .env_remove("HOME")
            .env(HOMELESS_CHILD, "1")
            .status()
            .unwrap();
        assert!(status.success());
    }
}
