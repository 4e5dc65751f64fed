//! PaletteMapper builder -- the "create palette map and key" workflow.
//!
//! [`PaletteMapper`] takes a decoded pixel buffer and produces a palette
//! group plus the index map that references it, either by extracting a fresh
//! palette or by syncing an existing group against the artwork.

use crate::color::Color;
use crate::group::{PaletteGroup, SyncReport, BASE_PALETTE_NAME};
use crate::output::IndexMap;
use crate::palette::Palette;

use super::error::MapError;

/// Result of [`PaletteMapper::run`].
#[derive(Debug, Clone)]
pub struct MapOutput {
    /// The group the index map refers to (new or synced)
    pub group: PaletteGroup,
    /// Index map built against the group's base palette
    pub index_map: IndexMap,
    /// Slot changes applied to an existing group, `None` for a new group
    pub sync: Option<SyncReport>,
    /// Whether `group` was created by this run
    pub created: bool,
}

/// Builder for mapping an image onto a palette group.
///
/// # Design
///
/// - Constructor takes the pixel buffer and its dimensions
/// - Configuration methods consume and return `self`
/// - [`run()`](Self::run) consumes the mapper and hands the group back in
///   [`MapOutput`]
///
/// # Example
///
/// ```
/// use palette_engine::{Color, PaletteMapper};
///
/// let black = Color::BLACK;
/// let white = Color::WHITE;
/// let pixels = vec![white, black, black, white];
///
/// let output = PaletteMapper::new(&pixels, 2, 2)
///     .name("checker")
///     .sort(true)
///     .run()
///     .unwrap();
///
/// assert!(output.created);
/// assert_eq!(output.group.base().colors(), &[black, white]);
/// assert_eq!(output.index_map.values(), &[0.99, 0.0, 0.0, 0.99]);
/// ```
pub struct PaletteMapper<'a> {
    pixels: &'a [Color],
    width: usize,
    height: usize,
    group: Option<PaletteGroup>,
    sort: bool,
    name: String,
}

impl<'a> PaletteMapper<'a> {
    /// Create a mapper over a bottom-row-first pixel buffer.
    pub fn new(pixels: &'a [Color], width: usize, height: usize) -> Self {
        Self {
            pixels,
            width,
            height,
            group: None,
            sort: false,
            name: String::from("Palette"),
        }
    }

    /// Sync and map against an existing group instead of extracting one.
    #[inline]
    pub fn group(mut self, group: PaletteGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// Sort a freshly extracted palette by luminance.
    ///
    /// Ignored when an existing group is supplied; its slot order is kept.
    #[inline]
    pub fn sort(mut self, enabled: bool) -> Self {
        self.sort = enabled;
        self
    }

    /// Name of a newly created group.
    #[inline]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Run the workflow.
    pub fn run(self) -> Result<MapOutput, MapError> {
        let (group, sync, created) = match self.group {
            Some(mut group) => {
                let report = group.sync_with_pixels(self.pixels)?;
                (group, Some(report), false)
            }
            None => {
                let mut base = Palette::from_pixels(BASE_PALETTE_NAME, self.pixels)?;
                if self.sort {
                    base.sort_by_luminance()?;
                }
                base.lock();
                let mut group = PaletteGroup::new(self.name, Some(base));
                group.lock();
                (group, None, true)
            }
        };

        let index_map = IndexMap::build(self.pixels, group.base(), self.width, self.height)?;

        Ok(MapOutput {
            group,
            index_map,
            sync,
            created,
        })
    }
}
