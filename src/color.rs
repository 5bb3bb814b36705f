//! RGB color value type.
//!
//! Every color that reaches the shared display state passes through
//! [`RgbColor::from_channels`], so channel values are always byte-range.

use std::fmt;
use std::str::FromStr;

use crate::resolver::{resolve_explicit, ResolveError};

/// Channel names in the order they appear in an `R,G,B` triple.
pub const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// An immutable 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Startup color of the display state.
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);
    /// All channels off.
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);

    /// Create a color from byte channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from wide integers, rejecting anything outside 0-255.
    ///
    /// Out-of-range values are reported with the offending channel instead of
    /// being clamped or wrapped.
    pub fn from_channels(r: i64, g: i64, b: i64) -> Result<Self, ResolveError> {
        let mut bytes = [0u8; 3];
        for (i, value) in [r, g, b].into_iter().enumerate() {
            bytes[i] = u8::try_from(value).map_err(|_| ResolveError::OutOfRange {
                channel: CHANNEL_NAMES[i],
                value: value.to_string(),
            })?;
        }
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }

    /// Channels as an array, in wire order.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for RgbColor {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_explicit(s)
    }
}
