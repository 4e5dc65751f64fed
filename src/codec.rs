//! PNG raster codec.
//!
//! All buffers handed to and returned from this module are bottom row first:
//! pixel 0 is the bottom-left corner of the image. PNG stores scanlines top
//! to bottom, so rows are flipped on the way in and on the way out.

use crate::error::ArtifactError;
use palette_engine::{Color, ColorGrid, IndexMap};
use std::io::Cursor;

/// A decoded image as normalized colors, bottom row first.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl RasterImage {
    /// Wrap a bottom-row-first pixel buffer.
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, ArtifactError> {
        if pixels.len() != width * height {
            return Err(ArtifactError::InvalidSourceFormat(format!(
                "{} pixels for a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Flatten to bottom-row-first RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }
}

/// Decode an 8-bit PNG into RGBA colors.
///
/// Indexed, grayscale and RGB images are expanded to RGBA. 16-bit images
/// are rejected.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage, ArtifactError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    // Expand indexed/paletted, grayscale <8-bit, and tRNS chunks to full RGB(A)
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ArtifactError::InvalidSourceFormat(e.to_string()))?;

    if reader.info().bit_depth == png::BitDepth::Sixteen {
        return Err(ArtifactError::InvalidSourceFormat(
            "16-bit PNG images are not supported".to_string(),
        ));
    }

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ArtifactError::InvalidSourceFormat(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    let width = frame.width as usize;
    let height = frame.height as usize;
    let channels = match frame.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(ArtifactError::InvalidSourceFormat(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    let row_len = width * channels;
    let mut pixels = Vec::with_capacity(width * height);
    for row in buf.chunks_exact(row_len).take(height).rev() {
        for px in row.chunks_exact(channels) {
            let bytes = match *px {
                [v] => [v, v, v, 255],
                [v, a] => [v, v, v, a],
                [r, g, b] => [r, g, b, 255],
                [r, g, b, a] => [r, g, b, a],
                _ => unreachable!("chunks_exact yields {channels} channels"),
            };
            pixels.push(Color::from_bytes(bytes));
        }
    }

    RasterImage::new(width, height, pixels)
}

/// Encode bottom-row-first RGBA8 bytes as an 8-bit RGBA PNG.
pub fn encode_rgba_png(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>, ArtifactError> {
    if rgba.len() != width * height * 4 {
        return Err(ArtifactError::PngEncode(format!(
            "{} bytes for a {}x{} RGBA image",
            rgba.len(),
            width,
            height
        )));
    }
    let png_width =
        u32::try_from(width).map_err(|_| ArtifactError::PngEncode("image too wide".into()))?;
    let png_height =
        u32::try_from(height).map_err(|_| ArtifactError::PngEncode("image too tall".into()))?;

    let mut top_down = Vec::with_capacity(rgba.len());
    if width > 0 {
        for row in rgba.chunks_exact(width * 4).rev() {
            top_down.extend_from_slice(row);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, png_width, png_height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ArtifactError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&top_down)
            .map_err(|e| ArtifactError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode an index map: zero RGB, index value in alpha.
pub fn encode_index_map_png(map: &IndexMap) -> Result<Vec<u8>, ArtifactError> {
    encode_rgba_png(map.width(), map.height(), &map.to_rgba8())
}

/// Encode a palette key grid. Palette 0 becomes the bottom scanline.
pub fn encode_grid_png(grid: &ColorGrid) -> Result<Vec<u8>, ArtifactError> {
    encode_rgba_png(grid.width(), grid.height(), &grid.to_rgba8())
}

/// Decode a palette key grid written by [`encode_grid_png`].
pub fn decode_grid_png(bytes: &[u8]) -> Result<ColorGrid, ArtifactError> {
    let image = decode_png(bytes)?;
    Ok(ColorGrid::new(
        image.width(),
        image.height(),
        image.pixels().to_vec(),
    )?)
}
