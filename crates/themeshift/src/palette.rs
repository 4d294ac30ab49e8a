//! Background colours for each mode.

use serde::{Deserialize, Serialize};

use crate::mode::ThemeMode;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Error returned when a colour string is not `#RRGGBB` or `RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour '{input}': expected #RRGGBB")]
pub struct ParseColorError {
    pub input: String,
}

impl Rgb {
    /// Parses `#RRGGBB` or `RRGGBB`.
    ///
    /// ```rust
    /// use themeshift::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#06080B").unwrap(), Rgb(6, 8, 11));
    /// assert!(Rgb::from_hex("#fff").is_err());
    /// ```
    pub fn from_hex(input: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError {
            input: input.to_string(),
        };
        let hex = input.trim().strip_prefix('#').unwrap_or(input.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Formats as `#RRGGBB` with uppercase digits.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `0.0..=1.0`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Page background per mode. The transition overlay is painted in the
/// background of the mode being switched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub dark: Rgb,
    pub light: Rgb,
}

impl Palette {
    pub fn background(&self, mode: ThemeMode) -> Rgb {
        match mode {
            ThemeMode::Dark => self.dark,
            ThemeMode::Light => self.light,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dark: Rgb(0x06, 0x08, 0x0B),
            light: Rgb(0xF4, 0xF7, 0xF9),
        }
    }
}

/// Converts an RGB colour to the nearest ANSI 256-colour palette index.
///
/// Terminal hosts use this to paint the overlay where true colour is not
/// available.
///
/// ```rust
/// use themeshift::{rgb_to_ansi256, Rgb};
///
/// assert_eq!(rgb_to_ansi256(Rgb(255, 0, 0)), 196);
/// assert_eq!(rgb_to_ansi256(Rgb(0, 0, 0)), 16);
/// ```
pub fn rgb_to_ansi256(Rgb(r, g, b): Rgb) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#F4F7F9").unwrap(), Rgb(0xF4, 0xF7, 0xF9));
        assert_eq!(Rgb::from_hex("f4f7f9").unwrap(), Rgb(0xF4, 0xF7, 0xF9));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        for input in ["", "#", "#12345", "#1234567", "#GG0000", "#ééé"] {
            assert!(Rgb::from_hex(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_to_hex_round_trips_defaults() {
        let palette = Palette::default();
        assert_eq!(palette.dark.to_hex(), "#06080B");
        assert_eq!(palette.light.to_hex(), "#F4F7F9");
    }

    #[test]
    fn test_background_per_mode() {
        let palette = Palette::default();
        assert_eq!(palette.background(ThemeMode::Dark), palette.dark);
        assert_eq!(palette.background(ThemeMode::Light), palette.light);
    }

    #[test]
    fn test_mix_endpoints_and_midpoint() {
        let black = Rgb(0, 0, 0);
        let white = Rgb(255, 255, 255);
        assert_eq!(black.mix(white, 0.0), black);
        assert_eq!(black.mix(white, 1.0), white);
        assert_eq!(black.mix(white, 0.5), Rgb(128, 128, 128));
        assert_eq!(black.mix(white, 7.0), white);
    }

    #[test]
    fn test_rgb_to_ansi256_grayscale() {
        assert_eq!(rgb_to_ansi256(Rgb(0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256(Rgb(255, 255, 255)), 231);
        let mid = rgb_to_ansi256(Rgb(128, 128, 128));
        assert!((232..=255).contains(&mid));
    }

    #[test]
    fn test_rgb_to_ansi256_color_cube() {
        assert_eq!(rgb_to_ansi256(Rgb(0, 255, 0)), 46);
        assert_eq!(rgb_to_ansi256(Rgb(0, 0, 255)), 21);
    }
}
