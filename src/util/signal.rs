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

//! Interrupt handling.
//!
//! The input loop blocks on the serial line, so a Ctrl-C must not simply kill
//! the process mid-write. SIGINT and SIGTERM only flip a flag, and the code
//! source checks it between reads.
//!
//! The flag is handed out as a `&'static AtomicBool` so that a code source can
//! be given a different flag to watch.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_interrupt(_: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub(crate) fn install_interrupt_handler() -> Result<()> {
    for signal in [libc::SIGINT, libc::SIGTERM] {
        unsafe {
            // SAFETY: handle_interrupt only stores to an atomic flag, which is
            // async-signal-safe.
            let handler = handle_interrupt as *const () as libc::sighandler_t;
            if libc::signal(signal, handler) == libc::SIG_ERR {
                return Err(anyhow!("Failed to install handler for signal {signal}"));
            }
        }
    }
    Ok(())
}

/// The flag raised by SIGINT and SIGTERM once the handler is installed.
pub(crate) fn interrupt_flag() -> &'static AtomicBool {
    &INTERRUPTED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_flag_starts_lowered() {
        assert!(std::ptr::eq(interrupt_flag(), &INTERRUPTED));
        assert!(!interrupt_flag().load(Ordering::SeqCst));
    }
}
