//! Palette groups: a base palette with parallel recolor variants.
//!
//! [`PaletteGroup`] owns the slot structure shared by all of its palettes and
//! keeps it in sync with the source artwork. [`ColorGrid`] is the flat
//! two-dimensional form used to persist a group as an image.

mod grid;
mod palette_group;

pub use grid::ColorGrid;
pub use palette_group::{
    PaletteGroup, SyncReport, BASE_PALETTE_NAME, PLACEHOLDER, VARIANT_PALETTE_NAME,
};
