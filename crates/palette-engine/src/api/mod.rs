//! Public API for the palette-engine crate.
//!
//! This module provides the high-level API: the [`PaletteMapper`] builder that
//! runs the extract / sync / map workflow, and the unified [`MapError`].

mod error;
mod mapper;

pub use error::MapError;
pub use mapper::{MapOutput, PaletteMapper};
