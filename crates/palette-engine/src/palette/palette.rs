//! Ordered palette of canonical colors.
//!
//! A [`Palette`] keeps colors in insertion order; the position of a color is
//! its index in the palette map. Lookups canonicalize the query so that all
//! fully transparent pixels resolve to the same entry.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::error::PaletteError;
use crate::color::Color;

/// Maximum number of colors an 8-bit index map can address.
pub const MAX_COLORS: usize = 256;

/// Named, ordered sequence of colors with an optional lock.
///
/// While [`locked`](Palette::is_locked), [`add`](Palette::add),
/// [`set`](Palette::set), [`remove_at`](Palette::remove_at) and
/// [`sort_by_luminance`](Palette::sort_by_luminance) fail with
/// [`PaletteError::Locked`].
///
/// # Example
///
/// ```
/// use palette_engine::{Color, Palette};
///
/// let pixels = [
///     Color::rgb(1.0, 0.0, 0.0),
///     Color::new(0.4, 0.4, 0.4, 0.0),
///     Color::rgb(1.0, 0.0, 0.0),
///     Color::new(0.9, 0.1, 0.0, 0.0),
/// ];
/// let palette = Palette::from_pixels("sprite", &pixels).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.index_of(Color::rgb(1.0, 0.0, 0.0)), Some(0));
/// assert_eq!(palette.index_of(Color::new(0.7, 0.7, 0.7, 0.0)), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    name: String,
    #[serde(default)]
    locked: bool,
    colors: Vec<Color>,
}

impl Palette {
    /// Create an empty, unlocked palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locked: false,
            colors: Vec::new(),
        }
    }

    /// Extract the unique canonical colors of a pixel buffer.
    ///
    /// Colors appear in the order they are first encountered in `pixels`, so
    /// the same buffer always yields the same palette.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Overflow`] if the buffer holds more than
    /// [`MAX_COLORS`] distinct canonical colors.
    pub fn from_pixels(name: impl Into<String>, pixels: &[Color]) -> Result<Self, PaletteError> {
        let mut palette = Self::new(name);
        for &pixel in pixels {
            let color = pixel.canonical();
            if !palette.contains(color) {
                palette.add(color)?;
            }
        }
        Ok(palette)
    }

    /// Palette display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the palette. Allowed while locked.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Iterate over colors in palette order.
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    /// Color at `index`, if in bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Append the canonical form of `color`.
    ///
    /// No uniqueness check is made here; callers that need a deduplicated
    /// palette check [`contains`](Self::contains) first.
    pub fn add(&mut self, color: Color) -> Result<(), PaletteError> {
        self.ensure_unlocked()?;
        if self.colors.len() >= MAX_COLORS {
            return Err(PaletteError::Overflow { max: MAX_COLORS });
        }
        self.colors.push(color.canonical());
        Ok(())
    }

    /// Remove the color at `index`, shifting later colors down.
    pub fn remove_at(&mut self, index: usize) -> Result<Color, PaletteError> {
        self.ensure_unlocked()?;
        self.check_index(index)?;
        Ok(self.colors.remove(index))
    }

    /// Replace the color at `index` with the canonical form of `color`.
    pub fn set(&mut self, index: usize, color: Color) -> Result<(), PaletteError> {
        self.ensure_unlocked()?;
        self.check_index(index)?;
        self.colors[index] = color.canonical();
        Ok(())
    }

    /// Whether the canonical form of `color` is in the palette.
    #[inline]
    pub fn contains(&self, color: Color) -> bool {
        self.index_of(color).is_some()
    }

    /// Position of the first entry equal to the canonical form of `color`.
    pub fn index_of(&self, color: Color) -> Option<usize> {
        let query = color.canonical();
        self.colors.iter().position(|&entry| entry == query)
    }

    /// Stable sort by grayscale, with translucent colors first.
    ///
    /// Ordering rules, applied in turn:
    /// 1. colors with alpha below 1.0 precede the rest;
    /// 2. ascending grayscale;
    /// 3. ascending alpha;
    /// 4. original relative order.
    pub fn sort_by_luminance(&mut self) -> Result<(), PaletteError> {
        self.ensure_unlocked()?;
        self.colors.sort_by(compare_by_luminance);
        Ok(())
    }

    /// Remove a slot regardless of the lock flag.
    ///
    /// Palette groups use this after validating the whole group so that a
    /// structural change never applies to some palettes and not others.
    pub(crate) fn remove_unchecked(&mut self, index: usize) -> Color {
        self.colors.remove(index)
    }

    pub(crate) fn push_unchecked(&mut self, color: Color) {
        self.colors.push(color.canonical());
    }

    fn ensure_unlocked(&self) -> Result<(), PaletteError> {
        if self.locked {
            return Err(PaletteError::Locked {
                target: self.name.clone(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), PaletteError> {
        if index >= self.colors.len() {
            return Err(PaletteError::IndexOutOfRange {
                index,
                len: self.colors.len(),
            });
        }
        Ok(())
    }
}

fn compare_by_luminance(a: &Color, b: &Color) -> Ordering {
    let a_translucent = a.a < 1.0;
    let b_translucent = b.a < 1.0;
    b_translucent
        .cmp(&a_translucent)
        .then_with(|| a.grayscale().total_cmp(&b.grayscale()))
        .then_with(|| a.a.total_cmp(&b.a))
}

impl Index<usize> for Palette {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.colors[index]
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Palette: Name={} Count={} Colors=", self.name, self.len())?;
        for color in &self.colors {
            write!(f, "{{{}}}", color)?;
        }
        write!(f, "]")
    }
}
