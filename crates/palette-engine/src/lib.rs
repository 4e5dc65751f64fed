#![allow(clippy::module_inception)]

//! palette-engine: palette extraction and index mapping for palette swaps
//!
//! This library turns a decoded bitmap into a deduplicated palette plus an
//! index map whose pixels reference that palette. A renderer samples the
//! index map, looks the slot up in a palette key texture, and swapping the
//! key recolors the artwork.
//!
//! # Quick Start
//!
//! The [`PaletteMapper`] builder is the primary entry point:
//!
//! ```
//! use palette_engine::{Color, PaletteMapper};
//!
//! let red = Color::from_u8(255, 0, 0, 255);
//! let blue = Color::from_u8(0, 0, 255, 255);
//! let pixels = vec![red, blue, blue, red];
//!
//! let output = PaletteMapper::new(&pixels, 2, 2).name("hero").run().unwrap();
//! assert_eq!(output.group.colors_per_palette(), 2);
//! assert_eq!(output.index_map.to_alpha8(), vec![0, 252, 252, 0]);
//! ```
//!
//! # Palette Groups
//!
//! A [`PaletteGroup`] holds the base palette extracted from the artwork and
//! any number of recolor variants. Slot `i` means the same thing in every
//! palette, so the group alone adds or removes slots. When the artwork
//! changes, [`PaletteGroup::sync_with_pixels`] gives new colors a slot
//! (painted [`PLACEHOLDER`] in the variants) and drops slots whose color is
//! gone, keeping every painted variant color that still applies.
//!
//! # Canonical Colors
//!
//! Fully transparent pixels compare equal whatever their RGB channels hold,
//! and are stored as `(0, 0, 0, 0)`. See [`Color::canonical`].
//!
//! # Index Values
//!
//! Slot `i` of an `n`-color palette is stored as `i / (n - 1)`, clamped to
//! `0.99` so the last slot never wraps to the first when sampled. A
//! single-color palette maps every pixel to `0.0`. See
//! [`output::index_value`].
//!
//! # Pixel Order
//!
//! Pixel buffers are bottom row first. [`IndexMapError::ColorNotInPalette`]
//! converts positions to rows counted from the top edge.
//!
//! This crate performs no I/O and does not log.

pub mod api;
pub mod color;
pub mod group;
pub mod output;
pub mod palette;


pub use api::{MapError, MapOutput, PaletteMapper};
pub use color::Color;
pub use group::{ColorGrid, PaletteGroup, SyncReport, PLACEHOLDER};
pub use output::IndexMap;
pub use palette::{
    IndexMapError, Palette, PaletteDiff, PaletteError, ParseColorError, MAX_COLORS,
};
