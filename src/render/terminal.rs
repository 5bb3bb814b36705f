//! Terminal background display surface.
//!
//! Uses the xterm OSC 11 sequence to recolor the whole terminal background,
//! which leaves the interactive prompt and its scrollback untouched.
//! Supported by most modern emulators (xterm, kitty, iTerm2, GNOME Terminal,
//! WezTerm, Alacritty).

use std::fmt;
use std::io::Write;

use crossterm::{queue, Command};
use tracing::debug;

use super::sink::{DisplaySurface, SinkError};
use crate::color::RgbColor;

const SINK_NAME: &str = "terminal";

/// Set the terminal's default background color (OSC 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTerminalBackground(pub RgbColor);

impl Command for SetTerminalBackground {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let RgbColor { r, g, b } = self.0;
        write!(f, "\x1b]11;rgb:{:02x}/{:02x}/{:02x}\x1b\\", r, g, b)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "OSC 11 requires an ANSI terminal",
        ))
    }
}

/// Restore the terminal's configured background color (OSC 111).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTerminalBackground;

impl Command for ResetTerminalBackground {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b]111\x1b\\")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "OSC 111 requires an ANSI terminal",
        ))
    }
}

/// Display surface that paints the terminal background.
///
/// Only emits an escape sequence when the color differs from what was last
/// presented successfully, so the 30Hz tick does not flood the terminal.
pub struct TerminalBackground<W: Write + Send> {
    out: W,
    staged: Option<RgbColor>,
    shown: Option<RgbColor>,
}

impl<W: Write + Send> TerminalBackground<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            staged: None,
            shown: None,
        }
    }

    /// Consume the surface and return the writer (for tests).
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, command: impl Command) -> Result<(), SinkError> {
        // Build the whole sequence first so it reaches the terminal in one write
        // and cannot interleave with prompt output.
        let mut buf = Vec::new();
        queue!(buf, command).map_err(|e| SinkError::io(SINK_NAME, e))?;
        self.out
            .write_all(&buf)
            .and_then(|_| self.out.flush())
            .map_err(|e| SinkError::io(SINK_NAME, e))
    }
}

impl<W: Write + Send> DisplaySurface for TerminalBackground<W> {
    fn name(&self) -> &'static str {
        SINK_NAME
    }

    fn set_background(&mut self, color: RgbColor) -> Result<(), SinkError> {
        self.staged = Some(color);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SinkError> {
        let Some(color) = self.staged else {
            return Ok(());
        };
        if self.shown == Some(color) {
            return Ok(());
        }
        self.emit(SetTerminalBackground(color))?;
        debug!(%color, "terminal background updated");
        self.shown = Some(color);
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), SinkError> {
        if self.shown.take().is_some() {
            self.emit(ResetTerminalBackground)?;
        }
        Ok(())
    }
}
