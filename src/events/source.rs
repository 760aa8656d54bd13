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

//! Where codes come from.
//!
//! The receiver (typically a microcontroller with an IR sensor) writes one
//! code per line to a serial port. [`LineSource`] turns any buffered reader
//! into a stream of those lines, and [`open_serial`] wires it to a real port.

use std::{
    io::{self, BufRead, BufReader, Read},
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use serialport::SerialPort;
use thiserror::Error;
use tracing::warn;

use crate::util::signal;

/// How long a serial read blocks before the interrupt flag is rechecked.
const READ_TIMEOUT: Duration = Duration::from_millis(250);

/// Longest accepted line, in bytes. Real codes are at most a few dozen.
const MAX_LINE: usize = 256;

#[derive(Debug, Error)]
pub(crate) enum SourceError {
    #[error("Failed to open serial port {port}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Failed to read from the code source")]
    Read(#[source] io::Error),

    #[error("The code source disconnected")]
    Disconnected,
}

/// A blocking supplier of raw code tokens.
pub(crate) trait CodeSource {
    /// Waits for the next token.
    ///
    /// Returns `Ok(None)` when the source has ended normally, including when
    /// the process has been interrupted.
    fn next_code(&mut self) -> Result<Option<String>, SourceError>;
}

/// Reads newline-delimited tokens from a buffered reader.
///
/// Read timeouts are not failures: they only give the loop a chance to notice
/// an interrupt. Blank lines are skipped, and so are lines longer than
/// [`MAX_LINE`] bytes.
pub(crate) struct LineSource<R> {
    reader: R,
    line: Vec<u8>,
    overlong: bool,
    end_is_disconnect: bool,
    interrupt: &'static AtomicBool,
}

impl<R: BufRead> LineSource<R> {
    /// Wraps `reader`, stopping once the process-wide interrupt flag is
    /// raised.
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            overlong: false,
            end_is_disconnect: false,
            interrupt: signal::interrupt_flag(),
        }
    }

    /// Watches `flag` instead of the process-wide interrupt flag.
    pub(crate) fn interrupted_by(mut self, flag: &'static AtomicBool) -> Self {
        self.interrupt = flag;
        self
    }

    /// Treats end of input as the device going away rather than a normal end.
    pub(crate) fn end_is_disconnect(mut self) -> Self {
        self.end_is_disconnect = true;
        self
    }

    fn take_line(&mut self) -> Option<String> {
        if self.overlong {
            self.overlong = false;
            self.line.clear();
            return None;
        }
        let line = String::from_utf8_lossy(&self.line).trim().to_string();
        self.line.clear();
        (!line.is_empty()).then_some(line)
    }
}

impl<R: BufRead> CodeSource for LineSource<R> {
    fn next_code(&mut self) -> Result<Option<String>, SourceError> {
        loop {
            if self.interrupt.load(Ordering::SeqCst) {
                return Ok(None);
            }

            let budget = (MAX_LINE + 1).saturating_sub(self.line.len()) as u64;
            match (&mut self.reader).take(budget).read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    if let Some(line) = self.take_line() {
                        return Ok(Some(line));
                    }
                    return if self.end_is_disconnect {
                        Err(SourceError::Disconnected)
                    } else {
                        Ok(None)
                    };
                }
                Ok(_) if self.line.ends_with(b"\n") => {
                    if let Some(line) = self.take_line() {
                        return Ok(Some(line));
                    }
                }
                Ok(_) if self.line.len() > MAX_LINE => {
                    if !self.overlong {
                        warn!(limit = MAX_LINE, "Discarding overlong line from the code source");
                    }
                    self.overlong = true;
                    self.line.clear();
                }
                // Partial line before a timeout or end of input, keep reading.
                Ok(_) => {}
                Err(e) if is_transient(&e) => {}
                Err(e) => return Err(SourceError::Read(e)),
            }
        }
    }
}

fn is_transient(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

/// Opens a serial port as a code source.
///
/// # Errors
///
/// Returns [`SourceError::Open`] if the port does not exist or cannot be
/// configured.
pub(crate) fn open_serial(
    port: &str,
    baud: u32,
) -> Result<LineSource<BufReader<Box<dyn SerialPort>>>, SourceError> {
    let serial = serialport::new(port, baud)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(|source| SourceError::Open {
            port: port.to_string(),
            source,
        })?;

    Ok(LineSource::new(BufReader::new(serial)).end_is_disconnect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(source: &mut impl CodeSource) -> Vec<String> {
        let mut codes = vec![];
        while let Some(code) = source.next_code().unwrap() {
            codes.push(code);
        }
        codes
    }

    #[test]
    fn yields_trimmed_lines_and_skips_blanks() {
        let mut source = LineSource::new(Cursor::new("49D32\r\n\n  0\r\n92"));
        assert_eq!(drain(&mut source), ["49D32", "0", "92"]);
    }

    #[test]
    fn end_of_serial_input_is_a_disconnect() {
        let mut source = LineSource::new(Cursor::new("92\n")).end_is_disconnect();
        assert_eq!(source.next_code().unwrap().as_deref(), Some("92"));
        assert!(matches!(source.next_code(), Err(SourceError::Disconnected)));
    }

    /// Times out once between every chunk, like an idle serial port.
    struct Stuttering {
        chunks: Vec<&'static [u8]>,
        timed_out: bool,
    }

    impl Read for Stuttering {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.timed_out {
                self.timed_out = true;
                return Err(io::ErrorKind::TimedOut.into());
            }
            self.timed_out = false;
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn timeouts_do_not_split_lines() {
        let reader = Stuttering {
            chunks: vec![b"49d", b"32\n0", b"\n"],
            timed_out: false,
        };
        let mut source = LineSource::new(BufReader::new(reader));
        assert_eq!(drain(&mut source), ["49d32", "0"]);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn read_failures_are_fatal() {
        let mut source = LineSource::new(BufReader::new(Broken));
        assert!(matches!(source.next_code(), Err(SourceError::Read(_))));
    }

    #[test]
    fn raised_interrupt_ends_the_source_cleanly() {
        static STOP: AtomicBool = AtomicBool::new(true);

        let mut source = LineSource::new(Cursor::new("49d32\n92\n")).interrupted_by(&STOP);
        assert_eq!(source.next_code().unwrap(), None);

        STOP.store(false, Ordering::SeqCst);
        assert_eq!(source.next_code().unwrap().as_deref(), Some("49d32"));
    }

    #[test]
    fn interrupt_wins_over_a_disconnect() {
        static STOP: AtomicBool = AtomicBool::new(true);

        let mut source = LineSource::new(Cursor::new(""))
            .end_is_disconnect()
            .interrupted_by(&STOP);
        assert!(matches!(source.next_code(), Ok(None)));
    }

    #[test]
    fn overlong_lines_are_discarded() {
        let noise = "f".repeat(MAX_LINE * 3);
        let input = format!("49d32\n{noise}\n92\n{noise}");
        let mut source = LineSource::new(Cursor::new(input));

        assert_eq!(drain(&mut source), ["49d32", "92"]);
    }

    #[test]
    fn opening_a_missing_port_fails() {
        let error = open_serial("/dev/irmpv-no-such-port", 9600).err().unwrap();
        assert!(matches!(error, SourceError::Open { .. }));
    }
}
