//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;

use palettemap::codec;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Assert a file exists and is a PNG image
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image at {}, got {} bytes starting with {:?}",
        path.display(),
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Decode a palette map and return its alpha channel, bottom row first.
///
/// Also asserts that every RGB channel is zero.
pub fn read_index_alpha(path: &Path) -> Vec<u8> {
    assert_png_file(path);
    let image = codec::decode_png(&std::fs::read(path).unwrap()).unwrap();
    let rgba = image.to_rgba8();
    for (i, px) in rgba.chunks_exact(4).enumerate() {
        assert_eq!(&px[..3], &[0, 0, 0], "pixel {i} of palette map has RGB");
    }
    rgba.chunks_exact(4).map(|px| px[3]).collect()
}
