use std::path::{Path, PathBuf};

use palette_engine::{MapError, PaletteDiff, PaletteGroup, PaletteMapper, SyncReport};
use rand::Rng;

use crate::codec::{self, RasterImage};
use crate::error::ArtifactError;
use crate::models::AppConfig;
use crate::store::ArtifactStore;

/// Files written by a pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artifacts {
    /// Palette group asset (YAML)
    pub group: Option<PathBuf>,
    /// Palette key grid (PNG)
    pub key: Option<PathBuf>,
    /// Index map (PNG)
    pub map: Option<PathBuf>,
}

/// Result from running the pipeline on a source image
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub group: PaletteGroup,
    pub artifacts: Artifacts,
    /// Slot changes when an existing group was synced
    pub sync: Option<SyncReport>,
}

/// Pipeline that orchestrates decode → extract/sync → map → write
pub struct ArtifactPipeline {
    config: AppConfig,
}

impl ArtifactPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read and decode a source image.
    pub fn load_source(&self, path: &Path) -> Result<RasterImage, ArtifactError> {
        let (store, name) = locate(path)?;
        codec::decode_png(&store.read(&name)?)
    }

    /// Read a palette group asset and check its slot layout.
    pub fn load_group(&self, path: &Path) -> Result<PaletteGroup, ArtifactError> {
        let (store, name) = locate(path)?;
        let group: PaletteGroup = serde_yaml::from_slice(&store.read(&name)?)?;
        tracing::debug!(
            path = %path.display(),
            palettes = group.len(),
            colors = group.colors_per_palette(),
            "Loaded palette group"
        );
        Ok(group)
    }

    /// Key grid path that belongs to a group asset.
    pub fn key_path_for(&self, group_path: &Path) -> PathBuf {
        let file_name = group_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let stem = self.config.naming.stem_of_group_file(file_name);
        group_path.with_file_name(self.config.naming.key_file(&stem))
    }

    /// Write a group asset and its key grid next to it.
    pub fn save_group(
        &self,
        path: &Path,
        group: &PaletteGroup,
        allow_overwrite: bool,
    ) -> Result<Artifacts, ArtifactError> {
        let yaml = serde_yaml::to_string(group)?;
        let key_png = codec::encode_grid_png(&group.to_grid())?;

        let (store, name) = locate(path)?;
        let (_, key_name) = locate(&self.key_path_for(path))?;
        // Check both targets before writing either
        if !allow_overwrite {
            for target in [&name, &key_name] {
                if store.exists(target) {
                    return Err(ArtifactError::OverwriteRefused {
                        path: store.path_for(target),
                    });
                }
            }
        }

        let group_path = store.write(&name, yaml.as_bytes(), allow_overwrite)?;
        let key_path = store.write(&key_name, &key_png, allow_overwrite)?;
        tracing::info!(
            group = %group_path.display(),
            key = %key_path.display(),
            palettes = group.len(),
            colors = group.colors_per_palette(),
            "Saved palette group"
        );

        Ok(Artifacts {
            group: Some(group_path),
            key: Some(key_path),
            map: None,
        })
    }

    /// Load a group, apply `edit`, and save it back in place.
    pub fn edit_group<T>(
        &self,
        path: &Path,
        edit: impl FnOnce(&mut PaletteGroup) -> Result<T, MapError>,
    ) -> Result<(PaletteGroup, T), ArtifactError> {
        let mut group = self.load_group(path)?;
        let value = edit(&mut group)?;
        self.save_group(path, &group, true)?;
        Ok((group, value))
    }

    /// Create a new group and key grid from a source image.
    pub fn extract<R: Rng + ?Sized>(
        &self,
        source: &Path,
        rng: &mut R,
    ) -> Result<PipelineResult, ArtifactError> {
        let image = self.load_source(source)?;
        let stem = source_stem(source)?;
        let output = PaletteMapper::new(image.pixels(), image.width(), image.height())
            .name(stem)
            .sort(self.config.sort_palette)
            .run()?;

        let group_path = self.new_group_path(source, stem, rng);
        let artifacts = self.save_group(&group_path, &output.group, self.config.overwrite)?;
        tracing::info!(
            source = %source.display(),
            colors = output.group.colors_per_palette(),
            "Extracted palette"
        );

        Ok(PipelineResult {
            group: output.group,
            artifacts,
            sync: None,
        })
    }

    /// Write the index map of a source image.
    ///
    /// With `group`, the group is synced against the image and saved back
    /// in place. Without one, a new group and key are created first.
    pub fn map<R: Rng + ?Sized>(
        &self,
        source: &Path,
        group: Option<&Path>,
        rng: &mut R,
    ) -> Result<PipelineResult, ArtifactError> {
        let image = self.load_source(source)?;
        let stem = source_stem(source)?;

        let mut mapper = PaletteMapper::new(image.pixels(), image.width(), image.height())
            .name(stem)
            .sort(self.config.sort_palette);
        if let Some(path) = group {
            mapper = mapper.group(self.load_group(path)?);
        }
        let output = mapper.run()?;

        let map_store = ArtifactStore::new(self.config.output_dir_for(source));
        let map_name = self.config.naming.map_file(stem);
        if !self.config.overwrite && map_store.exists(&map_name) {
            return Err(ArtifactError::OverwriteRefused {
                path: map_store.path_for(&map_name),
            });
        }

        let mut artifacts = match group {
            Some(path) => {
                if let Some(report) = &output.sync {
                    tracing::info!(
                        added = report.added.len(),
                        removed = report.removed.len(),
                        "Synced palette group"
                    );
                }
                self.save_group(path, &output.group, true)?
            }
            None => {
                let group_path = self.new_group_path(source, stem, rng);
                self.save_group(&group_path, &output.group, self.config.overwrite)?
            }
        };

        let map_png = codec::encode_index_map_png(&output.index_map)?;
        let map_path = map_store.write(&map_name, &map_png, self.config.overwrite)?;
        tracing::info!(path = %map_path.display(), "Wrote palette map");
        artifacts.map = Some(map_path);

        Ok(PipelineResult {
            group: output.group,
            artifacts,
            sync: output.sync,
        })
    }

    /// Colors the source image gained and lost relative to a group's base
    /// palette. Nothing is written.
    pub fn diff(&self, source: &Path, group: &Path) -> Result<PaletteDiff, ArtifactError> {
        let image = self.load_source(source)?;
        let group = self.load_group(group)?;
        Ok(group.diff_with_pixels(image.pixels())?)
    }

    /// Rebuild a group from a key grid image.
    pub fn import<R: Rng + ?Sized>(
        &self,
        grid_png: &Path,
        name: &str,
        rng: &mut R,
    ) -> Result<PipelineResult, ArtifactError> {
        let (store, file) = locate(grid_png)?;
        let grid = codec::decode_grid_png(&store.read(&file)?)?;
        let group = PaletteGroup::from_grid(name, &grid)?;

        let group_path = self.new_group_path(grid_png, name, rng);
        let artifacts = self.save_group(&group_path, &group, self.config.overwrite)?;

        Ok(PipelineResult {
            group,
            artifacts,
            sync: None,
        })
    }

    /// Group asset path for a newly created group.
    ///
    /// Overwriting reuses the plain name; otherwise the first free numbered
    /// name is taken.
    fn new_group_path<R: Rng + ?Sized>(&self, source: &Path, stem: &str, rng: &mut R) -> PathBuf {
        let store = ArtifactStore::new(self.config.output_dir_for(source));
        let desired = self.config.naming.group_file(stem);
        if self.config.overwrite {
            return store.path_for(&desired);
        }
        store.path_for(&store.unique_name(&desired, rng))
    }
}

/// Split a path into a store rooted at its directory and its file name.
fn locate(path: &Path) -> Result<(ArtifactStore, String), ArtifactError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ArtifactError::NotFound {
            path: path.to_path_buf(),
        })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((ArtifactStore::new(dir), name.to_string()))
}

fn source_stem(path: &Path) -> Result<&str, ArtifactError> {
    path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
        ArtifactError::InvalidSourceFormat(format!("{} has no file name", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_engine::Color;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: usize, height: usize, pixels: &[Color]) -> PathBuf {
        let rgba: Vec<u8> = pixels.iter().flat_map(|c| c.to_bytes()).collect();
        let bytes = codec::encode_rgba_png(width, height, &rgba).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    #[test]
    fn test_key_path_for_group() {
        let pipeline = ArtifactPipeline::new(AppConfig::default());
        assert_eq!(
            pipeline.key_path_for(Path::new("out/hero_PaletteGroup.asset")),
            PathBuf::from("out/hero_PaletteKey.png")
        );
        assert_eq!(
            pipeline.key_path_for(Path::new("out/hero_PaletteGroup 1.asset")),
            PathBuf::from("out/hero 1_PaletteKey.png")
        );
    }

    #[test]
    fn test_extract_then_load_group() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "hero.png", 2, 1, &[Color::WHITE, Color::BLACK]);
        let pipeline = ArtifactPipeline::new(AppConfig::default());

        let result = pipeline.extract(&source, &mut rng()).unwrap();
        let group_path = result.artifacts.group.unwrap();
        assert_eq!(group_path, dir.path().join("hero_PaletteGroup.asset"));
        assert!(dir.path().join("hero_PaletteKey.png").exists());

        let loaded = pipeline.load_group(&group_path).unwrap();
        assert_eq!(loaded, result.group);
        assert!(loaded.is_locked());
    }

    #[test]
    fn test_second_extract_gets_numbered_group() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "hero.png", 1, 1, &[Color::WHITE]);
        let pipeline = ArtifactPipeline::new(AppConfig::default());

        pipeline.extract(&source, &mut rng()).unwrap();
        let second = pipeline.extract(&source, &mut rng()).unwrap();
        assert_eq!(
            second.artifacts.group.unwrap(),
            dir.path().join("hero_PaletteGroup 1.asset")
        );
        assert!(dir.path().join("hero 1_PaletteKey.png").exists());
    }

    #[test]
    fn test_save_group_refuses_partial_write() {
        let dir = TempDir::new().unwrap();
        let pipeline = ArtifactPipeline::new(AppConfig::default());
        let group = PaletteGroup::from_pixels("g", &[Color::WHITE]).unwrap();
        std::fs::write(dir.path().join("g_PaletteKey.png"), b"keep").unwrap();

        let err = pipeline
            .save_group(&dir.path().join("g_PaletteGroup.asset"), &group, false)
            .unwrap_err();
        assert!(matches!(err, ArtifactError::OverwriteRefused { .. }));
        assert!(!dir.path().join("g_PaletteGroup.asset").exists());
    }

    #[test]
    fn test_load_group_rejects_ragged_asset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_PaletteGroup.asset");
        std::fs::write(
            &path,
            "name: bad\npalettes:\n  - name: Base Palette\n    colors:\n      - {r: 1.0, g: 1.0, b: 1.0, a: 1.0}\n  - name: Unnamed\n    colors: []\n",
        )
        .unwrap();

        let pipeline = ArtifactPipeline::new(AppConfig::default());
        let err = pipeline.load_group(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Yaml(_)));
        assert!(err.to_string().contains("palette 1 has 0 colors"), "{err}");
    }

    #[test]
    fn test_load_source_missing() {
        let dir = TempDir::new().unwrap();
        let pipeline = ArtifactPipeline::new(AppConfig::default());
        let err = pipeline.load_source(&dir.path().join("none.png")).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound { .. }));
    }
}
