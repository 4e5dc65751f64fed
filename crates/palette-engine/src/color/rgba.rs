//! RGBA color type with transparent-aware equality.
//!
//! Source images routinely carry many fully transparent pixels whose RGB
//! channels hold leftover editor or compression noise. [`Color`] treats all
//! of them as one color so that they collapse into a single palette entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// Absolute tolerance used by [`approx_eq`].
pub const EPSILON: f32 = 1e-5;

/// Relative tolerance used by [`approx_eq`] for larger magnitudes.
const RELATIVE_EPSILON: f32 = 1e-6;

/// Compare two floats with a combined relative and absolute tolerance.
///
/// # Example
/// ```
/// use palette_engine::color::approx_eq;
/// assert!(approx_eq(0.0, 0.000_001));
/// assert!(!approx_eq(0.0, 0.01));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    let tolerance = (RELATIVE_EPSILON * a.abs().max(b.abs())).max(EPSILON);
    (a - b).abs() < tolerance
}

/// A color with four normalized channels.
///
/// Values are conceptually in `0.0..=1.0` (mapping to 0..255 for 8-bit).
///
/// Equality is exact per channel, except that two colors whose alpha are both
/// approximately zero are always equal. Use [`Color::canonical`] to obtain the
/// single representative `(0, 0, 0, 0)` of that class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0.0..=1.0)
    pub r: f32,
    /// Green channel (0.0..=1.0)
    pub g: f32,
    /// Blue channel (0.0..=1.0)
    pub b: f32,
    /// Alpha channel (0.0..=1.0)
    pub a: f32,
}

impl Color {
    /// Fully transparent black, the canonical transparent color.
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque magenta.
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);

    /// Create a color from float channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from float channels.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit channels.
    ///
    /// # Example
    /// ```
    /// use palette_engine::Color;
    /// let red = Color::from_u8(255, 0, 0, 255);
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(red.a, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from a byte array `[R, G, B, A]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to a byte array `[R, G, B, A]`.
    ///
    /// Rounds and clamps values to the 0..=255 range.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Whether alpha is approximately zero.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        approx_eq(self.a, 0.0)
    }

    /// Return the canonical form of this color.
    ///
    /// Any color with alpha approximately zero becomes [`Color::CLEAR`];
    /// every other color is returned unchanged. The operation is idempotent.
    ///
    /// # Example
    /// ```
    /// use palette_engine::Color;
    /// let noisy = Color::new(0.3, 0.7, 0.1, 0.0);
    /// let clear = noisy.canonical();
    /// assert_eq!(clear.to_bytes(), [0, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn canonical(self) -> Self {
        if self.is_transparent() {
            Self::CLEAR
        } else {
            self
        }
    }

    /// Component-wise approximate comparison.
    pub fn approx_eq(&self, other: &Color) -> bool {
        approx_eq(self.r, other.r)
            && approx_eq(self.g, other.g)
            && approx_eq(self.b, other.b)
            && approx_eq(self.a, other.a)
    }

    /// Perceptual grayscale value (`0.299 R + 0.587 G + 0.114 B`).
    #[inline]
    pub fn grayscale(&self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Format as an 8-digit `#RRGGBBAA` hex string.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

#[inline]
fn channel_to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        if self.is_transparent() && other.is_transparent() {
            return true;
        }
        self.r == other.r && self.g == other.g && self.b == other.b && self.a == other.a
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_bytes();
        write!(f, "RGBA({r}, {g}, {b}, {a})")
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RGB`, `#RRGGBB` and `#RRGGBBAA`, with or without the
    /// leading hash. Parsing is case-insensitive and trims whitespace.
    /// Forms without an alpha component are opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use palette_engine::Color;
    ///
    /// let red: Color = "#F00".parse().unwrap();
    /// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
    ///
    /// let clear: Color = "12345600".parse().unwrap();
    /// assert_eq!(clear, Color::CLEAR);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        let digits = s
            .bytes()
            .map(hex_digit)
            .collect::<Result<Vec<u8>, _>>()?;
        match *digits.as_slice() {
            // Shorthand: each digit expands to a byte (0xF -> 0xFF)
            [r, g, b] => Ok(Self::from_u8(r * 17, g * 17, b * 17, 255)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::from_u8(
                r1 << 4 | r0,
                g1 << 4 | g0,
                b1 << 4 | b0,
                255,
            )),
            [r1, r0, g1, g0, b1, b0, a1, a0] => Ok(Self::from_u8(
                r1 << 4 | r0,
                g1 << 4 | g0,
                b1 << 4 | b0,
                a1 << 4 | a0,
            )),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// Value of one ASCII hex digit. Signs and other characters are rejected.
fn hex_digit(byte: u8) -> Result<u8, ParseColorError> {
    char::from(byte)
        .to_digit(16)
        .map(|d| d as u8)
        .ok_or(ParseColorError::InvalidHex(char::from(byte)))
}
