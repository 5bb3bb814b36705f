//! Sinks that only log, used when no terminal or strip hardware is attached.

use tracing::info;

use super::sink::{DisplaySurface, LightStrip, SinkError};
use crate::color::RgbColor;

/// Display surface that logs color changes instead of painting anything.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    staged: Option<RgbColor>,
    shown: Option<RgbColor>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for HeadlessSurface {
    fn name(&self) -> &'static str {
        "headless-display"
    }

    fn set_background(&mut self, color: RgbColor) -> Result<(), SinkError> {
        self.staged = Some(color);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SinkError> {
        if self.staged != self.shown {
            if let Some(color) = self.staged {
                info!(sink = self.name(), %color, "background changed");
            }
            self.shown = self.staged;
        }
        Ok(())
    }
}

/// Light strip that logs color changes instead of driving LEDs.
#[derive(Debug, Default)]
pub struct HeadlessStrip {
    staged: Option<RgbColor>,
    shown: Option<RgbColor>,
}

impl HeadlessStrip {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LightStrip for HeadlessStrip {
    fn name(&self) -> &'static str {
        "headless-strip"
    }

    fn set_all(&mut self, color: RgbColor) -> Result<(), SinkError> {
        self.staged = Some(color);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if self.staged != self.shown {
            if let Some(color) = self.staged {
                info!(sink = self.name(), %color, "strip color changed");
            }
            self.shown = self.staged;
        }
        Ok(())
    }
}
