//! Color type and canonicalization
//!
//! All palette operations compare colors through [`Color`]'s equality, which
//! folds every fully transparent pixel into one class. Canonicalize with
//! [`Color::canonical`] before storing a color so that the class has a single
//! stored representative.
//!
//! # Example
//!
//! ```
//! use palette_engine::Color;
//!
//! let a = Color::from_u8(12, 200, 7, 0);
//! let b = Color::from_u8(0, 0, 0, 0);
//! assert_eq!(a, b);
//! assert_eq!(a.canonical().to_bytes(), [0, 0, 0, 0]);
//! ```

mod rgba;

pub use rgba::{approx_eq, Color, EPSILON};
