//! Output sink interfaces driven by the render loop.
//!
//! Sinks are touched only from the render thread, so they need `Send` but
//! not `Sync`. Every tick pushes the full current color; a sink that failed
//! on one tick is simply retried with fresh state on the next.

use std::io;

use crate::color::RgbColor;

/// Errors raised by an output sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("{sink} rejected write: {message}")]
    WriteFailed { sink: &'static str, message: String },

    #[error("{sink} I/O error: {source}")]
    Io {
        sink: &'static str,
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    pub fn io(sink: &'static str, source: io::Error) -> Self {
        Self::Io { sink, source }
    }
}

/// A visual surface whose background shows the current color.
pub trait DisplaySurface: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Stage the background color for the next [`present`](Self::present).
    fn set_background(&mut self, color: RgbColor) -> Result<(), SinkError>;

    /// Make the staged color visible.
    fn present(&mut self) -> Result<(), SinkError>;

    /// Release the surface. Called once when rendering stops.
    fn teardown(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A string of addressable LEDs, all set to the same color.
pub trait LightStrip: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Stage `color` for every LED.
    fn set_all(&mut self, color: RgbColor) -> Result<(), SinkError>;

    /// Send the staged frame to the hardware.
    fn flush(&mut self) -> Result<(), SinkError>;

    /// Release the strip. Called once when rendering stops.
    fn teardown(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
