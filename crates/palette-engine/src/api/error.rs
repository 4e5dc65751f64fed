//! Unified error type for the palette-engine public API.
//!
//! [`MapError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use crate::palette::{IndexMapError, PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the palette-engine public API.
///
/// # Example
///
/// ```
/// use palette_engine::{Color, MapError, Palette};
///
/// fn palette_from_hex(hex: &[&str]) -> Result<Palette, MapError> {
///     let mut palette = Palette::new("custom");
///     for h in hex {
///         palette.add(h.parse::<Color>()?)?;
///     }
///     Ok(palette)
/// }
///
/// assert_eq!(palette_from_hex(&["#000", "#fff"]).unwrap().len(), 2);
/// assert!(palette_from_hex(&["#12"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// Palette or palette group mutation failed
    Palette(PaletteError),
    /// Index map construction failed
    IndexMap(IndexMapError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Palette(err) => write!(f, "palette error: {}", err),
            MapError::IndexMap(err) => write!(f, "index map error: {}", err),
            MapError::ParseColor(err) => write!(f, "color parse error: {}", err),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Palette(err) => Some(err),
            MapError::IndexMap(err) => Some(err),
            MapError::ParseColor(err) => Some(err),
        }
    }
}

impl From<PaletteError> for MapError {
    fn from(err: PaletteError) -> Self {
        MapError::Palette(err)
    }
}

impl From<IndexMapError> for MapError {
    fn from(err: IndexMapError) -> Self {
        MapError::IndexMap(err)
    }
}

impl From<ParseColorError> for MapError {
    fn from(err: ParseColorError) -> Self {
        MapError::ParseColor(err)
    }
}
