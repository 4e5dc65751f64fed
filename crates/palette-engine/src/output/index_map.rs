//! Index map construction and byte encodings.

use crate::color::Color;
use crate::palette::{IndexMapError, Palette};

/// Largest value an index map pixel may hold.
///
/// The last palette slot maps to this value instead of 1.0 so that a
/// renderer sampling the key texture never wraps around to slot 0.
pub const MAX_INDEX_VALUE: f32 = 0.99;

/// Normalized scalar for palette slot `index` out of `count` slots.
///
/// Returns `index / (count - 1)` clamped to `[0.0, MAX_INDEX_VALUE]`, and
/// exactly `0.0` when the palette has at most one color.
///
/// # Example
///
/// ```
/// use palette_engine::output::index_value;
///
/// assert_eq!(index_value(0, 4), 0.0);
/// assert_eq!(index_value(1, 4), 1.0 / 3.0);
/// assert_eq!(index_value(3, 4), 0.99);
/// assert_eq!(index_value(0, 1), 0.0);
/// ```
#[inline]
pub fn index_value(index: usize, count: usize) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    (index as f32 / (count - 1) as f32).clamp(0.0, MAX_INDEX_VALUE)
}

/// A source image re-encoded as palette slot references.
///
/// Pixels keep the order of the source buffer (bottom row first).
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMap {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl IndexMap {
    /// Map every pixel to its slot in `palette`.
    ///
    /// Fails on the first pixel whose canonical color is missing from the
    /// palette; no partial map is returned.
    pub fn build(
        pixels: &[Color],
        palette: &Palette,
        width: usize,
        height: usize,
    ) -> Result<Self, IndexMapError> {
        if pixels.len() != width * height {
            return Err(IndexMapError::DimensionMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }

        let count = palette.len();
        let mut values = Vec::with_capacity(pixels.len());
        for (i, &pixel) in pixels.iter().enumerate() {
            let index = palette
                .index_of(pixel)
                .ok_or(IndexMapError::ColorNotInPalette {
                    color: pixel,
                    x: i % width,
                    y: height - i / width,
                })?;
            values.push(index_value(index, count));
        }

        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Per-pixel scalars in source buffer order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at column `x` of buffer row `y` (row 0 is the first row of the
    /// source buffer).
    pub fn value_at(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }

    /// One byte per pixel, `round(value * 255)`.
    pub fn to_alpha8(&self) -> Vec<u8> {
        self.values.iter().map(|&v| encode_channel(v)).collect()
    }

    /// `[0, 0, 0, alpha]` per pixel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.values.len() * 4);
        for &v in &self.values {
            rgba.extend_from_slice(&[0, 0, 0, encode_channel(v)]);
        }
        rgba
    }
}

#[inline]
fn encode_channel(value: f32) -> u8 {
    (value * 255.0).round() as u8
}
