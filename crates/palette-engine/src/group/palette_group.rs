//! Base palette plus parallel variant palettes.
//!
//! Slot `i` of every palette in a [`PaletteGroup`] is the same logical color,
//! recolored per variant. The group is the only owner allowed to change the
//! number of slots, and it always does so across all palettes at once.

use serde::{Deserialize, Serialize};

use super::grid::ColorGrid;
use crate::color::Color;
use crate::palette::{Palette, PaletteDiff, PaletteError, MAX_COLORS};

/// Name given to the base palette of a new group.
pub const BASE_PALETTE_NAME: &str = "Base Palette";

/// Name given to newly added variant palettes.
pub const VARIANT_PALETTE_NAME: &str = "Unnamed";

/// Color written into variant slots that still need to be painted.
pub const PLACEHOLDER: Color = Color::MAGENTA;

/// Outcome of [`PaletteGroup::sync_with_pixels`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Colors that received a new slot, in encounter order
    pub added: Vec<Color>,
    /// Colors whose slot was removed, in former base palette order
    pub removed: Vec<Color>,
}

impl SyncReport {
    /// Whether the sync changed the group's slots.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A base palette and any number of equally sized variant palettes.
///
/// # Example
///
/// ```
/// use palette_engine::{Color, PaletteGroup, PLACEHOLDER};
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let blue = Color::rgb(0.0, 0.0, 1.0);
///
/// let mut group = PaletteGroup::from_pixels("hero", &[red]).unwrap();
/// group.add_variant();
/// group.set_color(1, 0, Color::rgb(0.5, 0.0, 0.0)).unwrap();
///
/// // The artwork gained a color: every palette grows one slot.
/// let report = group.sync_with_pixels(&[red, blue]).unwrap();
/// assert_eq!(report.added, vec![blue]);
/// assert_eq!(group.palette(0).unwrap().colors(), &[red, blue]);
/// assert_eq!(group.palette(1).unwrap()[1], PLACEHOLDER);
/// ```
///
/// Deserialization runs [`validate`](PaletteGroup::validate), so a group read
/// from an asset always has a base palette and parallel slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GroupAsset")]
pub struct PaletteGroup {
    name: String,
    #[serde(default)]
    locked: bool,
    palettes: Vec<Palette>,
}

/// Unchecked on-disk layout of a [`PaletteGroup`].
#[derive(Deserialize)]
struct GroupAsset {
    name: String,
    #[serde(default)]
    locked: bool,
    palettes: Vec<Palette>,
}

impl TryFrom<GroupAsset> for PaletteGroup {
    type Error = PaletteError;

    fn try_from(asset: GroupAsset) -> Result<Self, Self::Error> {
        let group = Self {
            name: asset.name,
            locked: asset.locked,
            palettes: asset.palettes,
        };
        group.validate()?;
        Ok(group)
    }
}

impl PaletteGroup {
    /// Create an unlocked group.
    ///
    /// Without a `base`, the group starts with an empty palette named
    /// [`BASE_PALETTE_NAME`].
    pub fn new(name: impl Into<String>, base: Option<Palette>) -> Self {
        let base = base.unwrap_or_else(|| Palette::new(BASE_PALETTE_NAME));
        Self {
            name: name.into(),
            locked: false,
            palettes: vec![base],
        }
    }

    /// Create a locked group whose locked base palette is extracted from
    /// `pixels`.
    pub fn from_pixels(name: impl Into<String>, pixels: &[Color]) -> Result<Self, PaletteError> {
        let mut base = Palette::from_pixels(BASE_PALETTE_NAME, pixels)?;
        base.lock();
        let mut group = Self::new(name, Some(base));
        group.lock();
        Ok(group)
    }

    /// Rebuild a group from a color grid, one palette per row.
    ///
    /// Row 0 becomes the base palette. The group and its palettes are
    /// unlocked.
    pub fn from_grid(name: impl Into<String>, grid: &ColorGrid) -> Result<Self, PaletteError> {
        if grid.height() == 0 {
            return Err(PaletteError::EmptyGrid);
        }
        if grid.width() > MAX_COLORS {
            return Err(PaletteError::Overflow { max: MAX_COLORS });
        }

        let mut palettes = Vec::with_capacity(grid.height());
        for y in 0..grid.height() {
            let palette_name = if y == 0 {
                BASE_PALETTE_NAME
            } else {
                VARIANT_PALETTE_NAME
            };
            let mut palette = Palette::new(palette_name);
            for &color in grid.row(y).unwrap_or_default() {
                palette.add(color)?;
            }
            palettes.push(palette);
        }

        Ok(Self {
            name: name.into(),
            locked: false,
            palettes,
        })
    }

    /// Export the group as a grid: row `p` holds palette `p`.
    pub fn to_grid(&self) -> ColorGrid {
        let colors: Vec<Color> = self
            .palettes
            .iter()
            .flat_map(|p| p.colors().iter().copied())
            .collect();
        ColorGrid::from_parts(self.colors_per_palette(), self.len(), colors)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
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

    /// Number of palettes, base included.
    #[inline]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Always false for a well-formed group.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Number of slots in every palette.
    pub fn colors_per_palette(&self) -> usize {
        self.palettes.first().map_or(0, Palette::len)
    }

    /// The base palette (palette 0).
    pub fn base(&self) -> &Palette {
        &self.palettes[0]
    }

    pub fn palette(&self, index: usize) -> Option<&Palette> {
        self.palettes.get(index)
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Verify the structural invariants of a group loaded from storage.
    pub fn validate(&self) -> Result<(), PaletteError> {
        let expected = match self.palettes.first() {
            Some(base) => base.len(),
            None => return Err(PaletteError::BaseRequired),
        };
        if expected > MAX_COLORS {
            return Err(PaletteError::Overflow { max: MAX_COLORS });
        }
        for (index, palette) in self.palettes.iter().enumerate() {
            if palette.len() != expected {
                return Err(PaletteError::LengthMismatch {
                    palette: index,
                    expected,
                    actual: palette.len(),
                });
            }
        }
        Ok(())
    }

    /// Append a copy of the base palette named [`VARIANT_PALETTE_NAME`].
    ///
    /// Allowed while the group is locked. Returns the new palette's index.
    pub fn add_variant(&mut self) -> usize {
        let mut variant = self.base().clone();
        variant.set_name(VARIANT_PALETTE_NAME);
        variant.unlock();
        self.palettes.push(variant);
        self.palettes.len() - 1
    }

    /// Remove the palette at `index`.
    ///
    /// The base palette cannot be removed from a locked group, and a group
    /// never gives up its last palette.
    pub fn remove_variant(&mut self, index: usize) -> Result<Palette, PaletteError> {
        if self.locked && index == 0 {
            return Err(self.locked_error());
        }
        if index >= self.palettes.len() {
            return Err(PaletteError::IndexOutOfRange {
                index,
                len: self.palettes.len(),
            });
        }
        if self.palettes.len() == 1 {
            return Err(PaletteError::BaseRequired);
        }
        Ok(self.palettes.remove(index))
    }

    /// Append a slot to every palette.
    ///
    /// The base palette receives the canonical form of `color`, every variant
    /// receives
    /// [`PLACEHOLDER`]. Nothing changes if any check fails.
    pub fn add_color_slot(&mut self, color: Color) -> Result<(), PaletteError> {
        self.ensure_structurally_unlocked()?;
        if self.colors_per_palette() >= MAX_COLORS {
            return Err(PaletteError::Overflow { max: MAX_COLORS });
        }

        for (index, palette) in self.palettes.iter_mut().enumerate() {
            palette.push_unchecked(if index == 0 { color } else { PLACEHOLDER });
        }
        self.debug_assert_parallel();
        Ok(())
    }

    /// Remove slot `index` from every palette.
    pub fn remove_color_slot(&mut self, index: usize) -> Result<(), PaletteError> {
        self.ensure_structurally_unlocked()?;
        let len = self.colors_per_palette();
        if index >= len {
            return Err(PaletteError::IndexOutOfRange { index, len });
        }

        for palette in &mut self.palettes {
            palette.remove_unchecked(index);
        }
        self.debug_assert_parallel();
        Ok(())
    }

    /// Paint one slot of one palette.
    ///
    /// Honors the target palette's lock; the group lock only guards slot
    /// structure.
    pub fn set_color(&mut self, palette: usize, slot: usize, color: Color) -> Result<(), PaletteError> {
        self.palette_mut(palette)?.set(slot, color)
    }

    pub fn rename_palette(&mut self, palette: usize, name: impl Into<String>) -> Result<(), PaletteError> {
        self.palette_mut(palette)?.set_name(name);
        Ok(())
    }

    pub fn set_palette_locked(&mut self, palette: usize, locked: bool) -> Result<(), PaletteError> {
        self.palette_mut(palette)?.set_locked(locked);
        Ok(())
    }

    /// Diff the base palette against the palette extracted from `pixels`.
    pub fn diff_with_pixels(&self, pixels: &[Color]) -> Result<PaletteDiff, PaletteError> {
        let source = Palette::from_pixels(self.base().name(), pixels)?;
        Ok(PaletteDiff::between(self.base(), &source))
    }

    /// Reconcile the group with the current source artwork.
    ///
    /// Afterwards the base palette holds exactly the canonical colors of
    /// `pixels`: colors new to the base get a slot (placeholder in every
    /// variant), and slots whose color no longer appears are removed from all
    /// palettes. Variant colors at the remaining slots are kept.
    ///
    /// Lock flags are lifted for the duration of the sync and restored
    /// afterwards, whether or not it succeeds.
    pub fn sync_with_pixels(&mut self, pixels: &[Color]) -> Result<SyncReport, PaletteError> {
        let saved = self.unlock_all();
        let result = self.apply_sync(pixels);
        self.restore_locks(saved);
        result
    }

    fn apply_sync(&mut self, pixels: &[Color]) -> Result<SyncReport, PaletteError> {
        let mut seen: Vec<Color> = Vec::new();
        let mut added: Vec<Color> = Vec::new();
        for &pixel in pixels {
            let color = pixel.canonical();
            if self.base().contains(color) {
                if !seen.contains(&color) {
                    seen.push(color);
                }
            } else if !added.contains(&color) {
                added.push(color);
                // The final count is at least the number of new colors
                if added.len() > MAX_COLORS {
                    return Err(PaletteError::Overflow { max: MAX_COLORS });
                }
            }
        }

        let stale: Vec<usize> = self
            .base()
            .iter()
            .enumerate()
            .filter(|(_, color)| !seen.contains(color))
            .map(|(index, _)| index)
            .collect();

        let final_len = self.colors_per_palette() - stale.len() + added.len();
        if final_len > MAX_COLORS {
            return Err(PaletteError::Overflow { max: MAX_COLORS });
        }

        // New slots are appended after every pre-existing slot, so removing
        // stale slots first yields the same order and never exceeds the limit.
        let mut removed = Vec::with_capacity(stale.len());
        for &index in stale.iter().rev() {
            removed.push(self.base()[index]);
            self.remove_color_slot(index)?;
        }
        removed.reverse();

        for &color in &added {
            self.add_color_slot(color)?;
        }

        Ok(SyncReport { added, removed })
    }

    fn unlock_all(&mut self) -> (bool, Vec<bool>) {
        let group = std::mem::replace(&mut self.locked, false);
        let palettes = self
            .palettes
            .iter_mut()
            .map(|palette| {
                let was_locked = palette.is_locked();
                palette.unlock();
                was_locked
            })
            .collect();
        (group, palettes)
    }

    fn restore_locks(&mut self, (group, palettes): (bool, Vec<bool>)) {
        self.locked = group;
        for (palette, locked) in self.palettes.iter_mut().zip(palettes) {
            palette.set_locked(locked);
        }
    }

    fn palette_mut(&mut self, index: usize) -> Result<&mut Palette, PaletteError> {
        let len = self.palettes.len();
        self.palettes
            .get_mut(index)
            .ok_or(PaletteError::IndexOutOfRange { index, len })
    }

    fn ensure_structurally_unlocked(&self) -> Result<(), PaletteError> {
        if self.locked {
            return Err(self.locked_error());
        }
        if let Some(palette) = self.palettes.iter().find(|p| p.is_locked()) {
            return Err(PaletteError::Locked {
                target: palette.name().to_string(),
            });
        }
        Ok(())
    }

    fn locked_error(&self) -> PaletteError {
        PaletteError::Locked {
            target: self.name.clone(),
        }
    }

    #[inline]
    fn debug_assert_parallel(&self) {
        debug_assert!(
            self.validate().is_ok(),
            "palette group '{}' lost its parallel slot layout",
            self.name
        );
    }
}
