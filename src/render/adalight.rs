//! Adalight LED strip driver.
//!
//! Adalight is the de-facto serial framing used by Arduino/ESP based
//! WS2812 (NeoPixel) controllers:
//!
//! ```text
//! 'A' 'd' 'a' <count-1 hi> <count-1 lo> <hi ^ lo ^ 0x55> [R G B] * count
//! ```
//!
//! The device is any writable byte stream, usually a serial port such as
//! `/dev/ttyUSB0` configured by the controller's firmware.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::sink::{LightStrip, SinkError};
use crate::color::RgbColor;

const SINK_NAME: &str = "adalight";

/// Magic word that starts every frame.
const MAGIC: &[u8; 3] = b"Ada";

/// LED strip that speaks the Adalight protocol.
pub struct AdalightStrip<W: Write + Send> {
    out: W,
    led_count: u16,
    brightness: f32,
    clear_on_exit: bool,
    staged: RgbColor,
}

impl AdalightStrip<std::fs::File> {
    /// Open a device path for writing.
    pub fn open(
        path: &Path,
        led_count: u16,
        brightness: f32,
        clear_on_exit: bool,
    ) -> Result<Self, SinkError> {
        let device = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| SinkError::io(SINK_NAME, e))?;
        Ok(Self::new(device, led_count, brightness, clear_on_exit))
    }
}

impl<W: Write + Send> AdalightStrip<W> {
    /// Wrap a writer. `led_count` is raised to 1 and `brightness` clamped to 0.0-1.0.
    pub fn new(out: W, led_count: u16, brightness: f32, clear_on_exit: bool) -> Self {
        Self {
            out,
            led_count: led_count.max(1),
            brightness: if brightness.is_nan() {
                1.0
            } else {
                brightness.clamp(0.0, 1.0)
            },
            clear_on_exit,
            staged: RgbColor::BLACK,
        }
    }

    /// Consume the strip and return the writer (for tests).
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Encode one frame with every LED set to `color`.
    pub fn encode_frame(&self, color: RgbColor) -> Vec<u8> {
        let count = usize::from(self.led_count);
        let [hi, lo] = (self.led_count - 1).to_be_bytes();
        let pixel = [
            self.scale(color.r),
            self.scale(color.g),
            self.scale(color.b),
        ];

        let mut frame = Vec::with_capacity(6 + count * 3);
        frame.extend_from_slice(MAGIC);
        frame.extend_from_slice(&[hi, lo, hi ^ lo ^ 0x55]);
        for _ in 0..count {
            frame.extend_from_slice(&pixel);
        }
        frame
    }

    fn scale(&self, channel: u8) -> u8 {
        (f32::from(channel) * self.brightness).round() as u8
    }

    fn write_frame(&mut self, color: RgbColor) -> Result<(), SinkError> {
        let frame = self.encode_frame(color);
        self.out
            .write_all(&frame)
            .and_then(|_| self.out.flush())
            .map_err(|e| SinkError::io(SINK_NAME, e))
    }
}

impl<W: Write + Send> LightStrip for AdalightStrip<W> {
    fn name(&self) -> &'static str {
        SINK_NAME
    }

    fn set_all(&mut self, color: RgbColor) -> Result<(), SinkError> {
        self.staged = color;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.write_frame(self.staged)
    }

    fn teardown(&mut self) -> Result<(), SinkError> {
        if self.clear_on_exit {
            self.write_frame(RgbColor::BLACK)?;
        }
        Ok(())
    }
}
