use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const LIGHT_GREY: Rgb = Rgb::new(0xCC, 0xCC, 0xCC);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Expected a color starting with '#', got \"{got}\"")]
    MissingHash { got: String },

    #[error("Expected 3 or 6 hex digits, got {len} in \"{got}\"")]
    BadLength { got: String, len: usize },

    #[error("Invalid hex digit '{digit}' in \"{got}\"")]
    BadDigit { got: String, digit: char },
}

/// Parses `#RRGGBB`, or the `#RGB` shorthand where each digit is doubled.
impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(hex) = s.strip_prefix('#') else {
            return Err(ColorError::MissingHash { got: s.to_string() });
        };

        let mut digits = Vec::with_capacity(6);
        for c in hex.chars() {
            let d = c.to_digit(16).ok_or_else(|| ColorError::BadDigit {
                got: s.to_string(),
                digit: c,
            })?;

            digits.push(d as u8);
        }

        match digits[..] {
            [r, g, b] => Ok(Rgb::new(r * 0x11, g * 0x11, b * 0x11)),
            [r1, r0, g1, g0, b1, b0] => Ok(Rgb::new(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
            _ => Err(ColorError::BadLength {
                got: s.to_string(),
                len: digits.len(),
            }),
        }
    }
}
