#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MapScaleError;

/// Color representation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl TryFrom<String> for Color {
    type Error = MapScaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_hex(&value).ok_or_else(|| {
            MapScaleError::InvalidConfiguration(format!("'{value}' is not a HEX6 or HEX8 color"))
        })
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl Color {
    /// Transparent color: `#00000000`
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Dark gray color used for the scale bar ruler and labels: `#3A3C3BFF`
    pub const DARK_GRAY: Color = Color::from_hex("#3A3C3B");

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8
    /// (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 && hex_string.len() != 9 || !hex_string.starts_with('#') {
            return None;
        }

        let channel = |index: usize| u8::from_str_radix(hex_string.get(index..index + 2)?, 16).ok();

        let r = channel(1)?;
        let g = channel(3)?;
        let b = channel(5)?;
        let a = if hex_string.len() == 9 {
            channel(7)?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Parses a color from the hex string at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the parsing fails.
    pub const fn from_hex(hex_string: &'static str) -> Self {
        let bytes = hex_string.as_bytes();
        if bytes.len() != 7 && bytes.len() != 9 || bytes[0] != b'#' {
            panic!("Invalid color hex string");
        }

        let r = decode_byte(bytes[1], bytes[2]);
        let g = decode_byte(bytes[3], bytes[4]);
        let b = decode_byte(bytes[5], bytes[6]);
        let a = if bytes.len() == 9 {
            decode_byte(bytes[7], bytes[8])
        } else {
            255
        };

        Self { r, g, b, a }
    }

    /// Returns true if the color is fully transparent (`a == 0`).
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Red component of the color in RGBA space.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green component of the color in RGBA space.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue component of the color in RGBA space.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Opacity component of the color.
    pub fn a(&self) -> u8 {
        self.a
    }
}

const fn decode_byte(high: u8, low: u8) -> u8 {
    decode_char(high) * 16 + decode_char(low)
}

const fn decode_char(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => panic!("Invalid hex character"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let hex = "#FF1000AA";
        let color = Color::try_from_hex(hex).unwrap();
        assert_eq!(&color.to_hex(), hex);

        assert_eq!(Color::from_hex(hex), color);
    }

    #[test]
    fn hex6_is_opaque() {
        assert_eq!(Color::DARK_GRAY, Color::rgba(0x3a, 0x3c, 0x3b, 255));
        assert_eq!(Color::try_from_hex("#3a3c3b"), Some(Color::DARK_GRAY));
    }

    #[test]
    fn channels() {
        let color = Color::from_hex("#0A141E28");
        assert_eq!(
            (color.r(), color.g(), color.b(), color.a()),
            (10, 20, 30, 40)
        );
        assert!(!color.is_transparent());
        assert!(Color::TRANSPARENT.is_transparent());
    }

    #[test]
    fn invalid_hex() {
        assert_eq!(Color::try_from_hex("3A3C3B"), None);
        assert_eq!(Color::try_from_hex("#3A3C3"), None);
        assert_eq!(Color::try_from_hex("#3A3C3G"), None);
        assert_eq!(Color::try_from_hex("#ÿÿÿ"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::WHITE).unwrap();
        assert_eq!(json, "\"#FFFFFFFF\"");

        let color: Color = serde_json::from_str("\"#3A3C3B\"").unwrap();
        assert_eq!(color, Color::DARK_GRAY);

        assert!(serde_json::from_str::<Color>("\"white\"").is_err());
    }
}
