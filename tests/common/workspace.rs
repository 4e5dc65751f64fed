//! Scratch workspace with a pipeline writing into a temp directory.

use palette_engine::Color;
use palettemap::codec;
use palettemap::models::AppConfig;
use palettemap::services::ArtifactPipeline;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::rgba_bytes;

/// Temp directory plus an [`ArtifactPipeline`] configured for it
pub struct TestWorkspace {
    pub dir: TempDir,
    pub pipeline: ArtifactPipeline,
    pub rng: StdRng,
}

impl TestWorkspace {
    /// Workspace with the default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            pipeline: ArtifactPipeline::new(config),
            rng: StdRng::seed_from_u64(0x5eed),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a bottom-row-first pixel buffer as a PNG in the workspace.
    pub fn write_image(&self, name: &str, width: usize, height: usize, pixels: &[Color]) -> PathBuf {
        let png = codec::encode_rgba_png(width, height, &rgba_bytes(pixels))
            .expect("Failed to encode test image");
        let path = self.path(name);
        std::fs::write(&path, png).expect("Failed to write test image");
        path
    }
}
