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

//! Logging setup.
//!
//! Log lines go to stderr. The level comes from `RUST_LOG` when set, and
//! otherwise from the number of `-v` flags.

use std::{io, sync::OnceLock};

use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "irmpv=info",
        1 => "irmpv=debug",
        _ => "irmpv=trace",
    }
}

pub(crate) fn init_tracing(verbosity: u8) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(default_directive(0), "irmpv=info");
        assert_eq!(default_directive(1), "irmpv=debug");
        assert_eq!(default_directive(7), "irmpv=trace");
    }
}
