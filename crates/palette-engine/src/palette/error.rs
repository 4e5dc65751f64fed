//! Error types for palette operations
//!
//! This module provides error types for color parsing, palette and palette
//! group mutation, and index map construction.

use std::fmt;

use crate::color::Color;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 6 or 8 characters after stripping '#')
    InvalidLength,
    /// Character that is not a hexadecimal digit
    InvalidHex(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(
                    f,
                    "invalid hex color length (expected 3, 6 or 8 characters)"
                )
            }
            ParseColorError::InvalidHex(c) => {
                write!(f, "invalid hex character: '{}'", c)
            }
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error type for palette and palette group mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// Mutation attempted on a locked palette or palette group
    Locked {
        /// Name of the locked palette or group
        target: String,
    },
    /// Slot or palette index out of bounds
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of valid entries
        len: usize,
    },
    /// Palette would exceed the number of colors an 8-bit index can address
    Overflow {
        /// Maximum number of colors
        max: usize,
    },
    /// A color grid without rows cannot produce a base palette
    EmptyGrid,
    /// The only remaining palette of a group cannot be removed
    BaseRequired,
    /// A group palette does not have the base palette's number of colors
    LengthMismatch {
        /// Position of the palette within the group
        palette: usize,
        /// Number of colors in the base palette
        expected: usize,
        /// Number of colors in the offending palette
        actual: usize,
    },
    /// Color grid buffer length does not match `width * height`
    GridSize {
        /// `width * height`
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Locked { target } => {
                write!(f, "'{}' is locked", target)
            }
            PaletteError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range (length {})", index, len)
            }
            PaletteError::Overflow { max } => {
                write!(f, "palette cannot hold more than {} colors", max)
            }
            PaletteError::EmptyGrid => {
                write!(f, "color grid has no rows")
            }
            PaletteError::BaseRequired => {
                write!(f, "a palette group must keep its base palette")
            }
            PaletteError::LengthMismatch {
                palette,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "palette {} has {} colors, base palette has {}",
                    palette, actual, expected
                )
            }
            PaletteError::GridSize { expected, actual } => {
                write!(
                    f,
                    "color grid has {} colors, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for PaletteError {}

/// Error type for index map construction.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexMapError {
    /// A source pixel's color is missing from the palette.
    ///
    /// `x` counts columns from the left starting at 0. `y` counts rows from
    /// the top edge starting at 1, so the bottom row of the image is
    /// reported as `height`.
    ColorNotInPalette {
        /// The offending (canonical) color
        color: Color,
        /// Column of the pixel
        x: usize,
        /// Row of the pixel, counted from the top edge
        y: usize,
    },
    /// Pixel buffer length does not match `width * height`
    DimensionMismatch {
        /// `width * height`
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },
}

impl fmt::Display for IndexMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexMapError::ColorNotInPalette { color, x, y } => {
                write!(
                    f,
                    "color {} at coordinate ({}, {}) is not in the base palette",
                    color, x, y
                )
            }
            IndexMapError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "pixel buffer has {} pixels, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for IndexMapError {}
