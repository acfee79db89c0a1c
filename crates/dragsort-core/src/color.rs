#![forbid(unsafe_code)]

//! Packed RGBA colors for overlay tinting.
//!
//! Storage is straight (non-premultiplied) alpha, one byte per channel,
//! packed as `0xRRGGBBAA`.

use std::fmt;

/// A packed straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque green, the default drag overlay.
    pub const GREEN: Self = Self::rgb(0, 255, 0);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Scale the alpha channel by `opacity`, clamped into `0.0..=1.0`.
    ///
    /// NaN is treated as fully transparent.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let a = (f32::from(self.a()) * opacity).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            len => Err(ColorParseError::InvalidLength(len)),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())?;
        if self.a() != 255 {
            write!(f, "{:02x}", self.a())?;
        }
        Ok(())
    }
}

/// Errors from [`Rgba::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Expected 6 or 8 hex digits.
    InvalidLength(usize),
    /// A character outside `[0-9a-fA-F]`.
    InvalidDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "expected 6 or 8 hex digits, got {len}")
            }
            Self::InvalidDigit(input) => write!(f, "invalid hex color {input:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip_through_packing() {
        let c = Rgba::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(c.0, 0x1234_5678);
    }

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Rgba::from_hex("#99cc00"), Ok(Rgba::rgb(0x99, 0xcc, 0x00)));
        assert_eq!(Rgba::from_hex("00FF00"), Ok(Rgba::GREEN));
    }

    #[test]
    fn parses_eight_digit_hex() {
        assert_eq!(
            Rgba::from_hex("#ffffff80"),
            Ok(Rgba::rgba(255, 255, 255, 0x80))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Rgba::from_hex("#abc"),
            Err(ColorParseError::InvalidLength(3))
        );
        assert!(matches!(
            Rgba::from_hex("#zzzzzz"),
            Err(ColorParseError::InvalidDigit(_))
        ));
        assert!(matches!(
            Rgba::from_hex("#ééé"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn opacity_scales_alpha() {
        assert_eq!(Rgba::GREEN.with_opacity(0.5).a(), 128);
        assert_eq!(Rgba::GREEN.with_opacity(0.0).a(), 0);
        assert_eq!(Rgba::GREEN.with_opacity(3.0).a(), 255);
        assert_eq!(Rgba::GREEN.with_opacity(f32::NAN).a(), 0);
        assert_eq!(Rgba::GREEN.with_opacity(0.5).g(), 255);
    }

    #[test]
    fn display_omits_opaque_alpha() {
        assert_eq!(Rgba::rgb(0x99, 0xcc, 0).to_string(), "#99cc00");
        assert_eq!(Rgba::rgba(0, 0, 0, 0x40).to_string(), "#00000040");
    }
}
