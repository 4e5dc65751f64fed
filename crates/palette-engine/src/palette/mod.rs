//! Palette types and utilities
//!
//! This module provides the ordered [`Palette`], the [`PaletteDiff`] set
//! difference between two palettes, and the error types shared by the
//! palette, group and index map modules.

mod diff;
mod error;
mod palette;

pub use diff::PaletteDiff;
pub use error::{IndexMapError, PaletteError, ParseColorError};
pub use palette::{Palette, MAX_COLORS};
