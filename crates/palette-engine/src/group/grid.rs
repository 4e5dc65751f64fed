//! Two-dimensional color grid, the persisted form of a palette group.

use crate::color::Color;
use crate::palette::PaletteError;

/// Row-major grid of colors: one row per palette, one column per slot.
///
/// Row 0 holds the base palette. The raster codec decides how rows map onto
/// image scanlines.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid {
    width: usize,
    height: usize,
    colors: Vec<Color>,
}

impl ColorGrid {
    /// Create a grid from row-major colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::GridSize`] if `colors.len() != width * height`.
    pub fn new(width: usize, height: usize, colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.len() != width * height {
            return Err(PaletteError::GridSize {
                expected: width * height,
                actual: colors.len(),
            });
        }
        Ok(Self {
            width,
            height,
            colors,
        })
    }

    /// Build a grid whose size the caller already guarantees.
    pub(crate) fn from_parts(width: usize, height: usize, colors: Vec<Color>) -> Self {
        debug_assert_eq!(colors.len(), width * height);
        Self {
            width,
            height,
            colors,
        }
    }

    /// Create a grid from tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, PaletteError> {
        if bytes.len() != width * height * 4 {
            return Err(PaletteError::GridSize {
                expected: width * height,
                actual: bytes.len() / 4,
            });
        }
        let colors = bytes
            .chunks_exact(4)
            .map(|px| Color::from_bytes([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::new(width, height, colors)
    }

    /// Slots per palette.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of palettes.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at column `x` of row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.colors[y * self.width + x])
    }

    /// All colors of row `y`.
    pub fn row(&self, y: usize) -> Option<&[Color]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.colors[start..start + self.width])
    }

    /// Flatten to RGBA8 bytes in row-major order.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_bytes()).collect()
    }
}
