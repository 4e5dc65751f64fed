//! Palettemap - palette extraction and index maps for palette swaps
//!
//! Reads source images, drives the `palette-engine` crate, and writes the
//! palette group, key grid and index map artifacts.
//! This library exposes modules for integration testing.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
