//! RGB color values and the palette blending used by the render boundary.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(ColorParseError(s.to_string()));
        }
        let parse = |range| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation toward `other`, `t` clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid hex color: {0}")]
pub struct ColorParseError(pub String);

/// Sample a palette at a continuous phase.
///
/// The phase indexes into the palette; the fractional part blends between the
/// indexed color and its successor (wrapping), giving the continuously
/// shifting gradient the render layer paints.
pub fn palette_at_phase(palette: &[Color], phase: f64) -> Color {
    if palette.is_empty() {
        return Color::rgb(0, 0, 0);
    }
    let n = palette.len() as f64;
    let scaled = (phase.rem_euclid(1.0)) * n;
    let idx = (scaled as usize) % palette.len();
    let next = (idx + 1) % palette.len();
    palette[idx].lerp(palette[next], scaled.fract())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex("#FF9800").unwrap();
        assert_eq!(c, Color::rgb(0xFF, 0x98, 0x00));
        let c = Color::from_hex("03a9f4").unwrap();
        assert_eq!(c, Color::rgb(0x03, 0xA9, 0xF4));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("not a color").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn test_hex_roundtrip() {
        let c = Color::rgb(0x3F, 0x51, 0xB5);
        assert_eq!(Color::from_hex(&c.to_hex()).unwrap(), c);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_lerp_clamps_t() {
        let a = Color::rgb(10, 20, 30);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn test_palette_at_phase_wraps() {
        let palette = [Color::rgb(255, 0, 0), Color::rgb(0, 255, 0)];
        // Phase 0 sits exactly on the first color.
        assert_eq!(palette_at_phase(&palette, 0.0), palette[0]);
        // A full turn comes back around.
        assert_eq!(palette_at_phase(&palette, 1.0), palette[0]);
        assert_eq!(palette_at_phase(&palette, -1.0), palette[0]);
    }

    #[test]
    fn test_palette_at_phase_empty() {
        assert_eq!(palette_at_phase(&[], 0.3), Color::rgb(0, 0, 0));
    }
}
