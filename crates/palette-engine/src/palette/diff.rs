//! Set difference between two palettes.

use super::palette::Palette;
use crate::color::Color;

/// Colors gained and lost between an old and a new palette.
///
/// Both lists follow the iteration order of the palette they come from.
/// Comparison uses canonical color equality, so transparent entries with
/// different RGB noise never show up as a change.
///
/// # Example
///
/// ```
/// use palette_engine::{Color, Palette, PaletteDiff};
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let green = Color::rgb(0.0, 1.0, 0.0);
/// let old = Palette::from_pixels("old", &[red, green]).unwrap();
/// let new = Palette::from_pixels("new", &[green]).unwrap();
///
/// let diff = PaletteDiff::between(&old, &new);
/// assert_eq!(diff.deletions, vec![red]);
/// assert!(diff.insertions.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteDiff {
    /// Colors in the new palette that the old one lacks
    pub insertions: Vec<Color>,
    /// Colors in the old palette that the new one lacks
    pub deletions: Vec<Color>,
}

impl PaletteDiff {
    /// Compare `old` against `new`.
    pub fn between(old: &Palette, new: &Palette) -> Self {
        let deletions = old
            .iter()
            .copied()
            .filter(|&color| !new.contains(color))
            .collect();
        let insertions = new
            .iter()
            .copied()
            .filter(|&color| !old.contains(color))
            .collect();

        Self {
            insertions,
            deletions,
        }
    }

    /// Whether the two palettes hold the same set of colors.
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.deletions.is_empty()
    }
}
