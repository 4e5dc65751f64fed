//! Output types for the index-mapping pipeline.
//!
//! [`IndexMap`] is the encoded form of a source image against a palette: one
//! normalized scalar per pixel that a renderer samples as an offset into the
//! palette key texture.
//!
//! # Output Formats
//!
//! - **Scalar** ([`IndexMap::values`]): raw `f32` values in `0.0..=0.99`
//! - **Alpha** ([`IndexMap::to_alpha8`]): one byte per pixel
//! - **RGBA** ([`IndexMap::to_rgba8`]): zero RGB with the value in alpha

mod index_map;

pub use index_map::{index_value, IndexMap, MAX_INDEX_VALUE};
