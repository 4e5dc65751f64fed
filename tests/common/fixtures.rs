//! Test fixtures and constants.

use palette_engine::Color;

/// Colors used by the test sprites
pub mod colors {
    use palette_engine::Color;

    pub const SKIN: Color = Color::new(240.0 / 255.0, 200.0 / 255.0, 160.0 / 255.0, 1.0);
    pub const SHIRT: Color = Color::new(200.0 / 255.0, 0.0, 0.0, 1.0);
    pub const BOOTS: Color = Color::new(60.0 / 255.0, 40.0 / 255.0, 20.0 / 255.0, 1.0);
    pub const BELT: Color = Color::new(90.0 / 255.0, 90.0 / 255.0, 90.0 / 255.0, 1.0);

    /// Transparent pixel with leftover RGB, as exported by many editors
    pub const DIRTY_CLEAR: Color = Color::new(0.5, 0.2, 0.9, 0.0);
}

/// Width and height of [`hero_sprite`]
pub const HERO_SIZE: (usize, usize) = (3, 3);

/// 3x3 sprite, bottom row first:
///
/// ```text
/// top     .  skin  .
///         shirt shirt shirt
/// bottom  boots .  boots
/// ```
pub fn hero_sprite() -> Vec<Color> {
    use colors::*;
    vec![
        BOOTS, DIRTY_CLEAR, BOOTS, //
        SHIRT, SHIRT, SHIRT, //
        Color::CLEAR, SKIN, DIRTY_CLEAR,
    ]
}

/// The hero sprite after a redesign: shirt dropped, belt added.
pub fn hero_sprite_with_belt() -> Vec<Color> {
    use colors::*;
    vec![
        BOOTS, DIRTY_CLEAR, BOOTS, //
        BELT, BELT, BELT, //
        Color::CLEAR, SKIN, DIRTY_CLEAR,
    ]
}

/// Flatten colors to RGBA8 bytes.
pub fn rgba_bytes(pixels: &[Color]) -> Vec<u8> {
    pixels.iter().flat_map(|c| c.to_bytes()).collect()
}
