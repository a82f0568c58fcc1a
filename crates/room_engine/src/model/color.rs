//! sRGB colors written as `#rrggbb`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

/// Malformed color text
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color '{0}', expected #rrggbb")]
pub struct ColorError(pub String);

impl Color {
    /// White
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Build from channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional)
    pub fn from_hex(text: &str) -> Result<Self, ColorError> {
        let err = || ColorError(text.to_string());
        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let expand = |s: &str| channel(&s.repeat(2));
                Ok(Self::rgb(expand(&hex[0..1])?, expand(&hex[1..2])?, expand(&hex[2..3])?))
            }
            _ => Err(err()),
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as linear-light floats
    pub fn to_linear(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| srgb_to_linear(f32::from(c) / 255.0))
    }

    /// Build from linear-light floats, clamping to `[0, 1]`
    pub fn from_linear(linear: [f32; 3]) -> Self {
        let [r, g, b] = linear.map(|c| {
            let encoded = linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let byte = encoded.round().clamp(0.0, 255.0) as u8;
            byte
        });
        Self::rgb(r, g, b)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
