//! Artifact store rooted at an output directory.
//!
//! Every artifact the tool produces (group asset, key grid, index map) is
//! written through [`ArtifactStore::write`], which refuses to replace an
//! existing file unless overwriting is allowed.

use crate::error::ArtifactError;
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Numbered suffixes tried by [`ArtifactStore::unique_name`] before it falls
/// back to a random one.
pub const MAX_SEQUENTIAL_SUFFIX: u32 = 1000;

/// Filesystem store for generated artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory all artifact names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of an artifact.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Write an artifact, creating the output directory if needed.
    ///
    /// Fails with [`ArtifactError::OverwriteRefused`] if the file exists and
    /// `allow_overwrite` is false; the existing file is left untouched.
    pub fn write(
        &self,
        name: &str,
        bytes: &[u8],
        allow_overwrite: bool,
    ) -> Result<PathBuf, ArtifactError> {
        let path = self.path_for(name);
        if !allow_overwrite && path.exists() {
            return Err(ArtifactError::OverwriteRefused { path });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");
        Ok(path)
    }

    /// Read an artifact.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.path_for(name);
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ArtifactError::NotFound { path },
            _ => ArtifactError::Io(e),
        })
    }

    /// First unused variant of `filename` in the store.
    ///
    /// Returns `filename` itself when free, otherwise inserts `" 1"` to
    /// `" 999"` before the first `.`, e.g. `hero.asset` -> `hero 1.asset`.
    /// When all of those are taken a random suffix from `rng` is used,
    /// without checking it.
    pub fn unique_name<R: Rng + ?Sized>(&self, filename: &str, rng: &mut R) -> String {
        if !self.exists(filename) {
            return filename.to_string();
        }

        let (stem, extensions) = match filename.find('.') {
            Some(dot) => filename.split_at(dot),
            None => (filename, ""),
        };

        for i in 1..MAX_SEQUENTIAL_SUFFIX {
            let candidate = format!("{stem} {i}{extensions}");
            if !self.exists(&candidate) {
                return candidate;
            }
        }

        let suffix: u32 = rng.gen_range(MAX_SEQUENTIAL_SUFFIX..i32::MAX as u32);
        tracing::warn!(filename, suffix, "No sequential name free, using random suffix");
        format!("{stem} {suffix}{extensions}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().join("nested/out"));

        let path = store.write("a.png", b"data", false).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"data");
        assert!(store.exists("a.png"));
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.write("a.png", b"old", false).unwrap();

        let err = store.write("a.png", b"new", false).unwrap_err();
        assert!(matches!(err, ArtifactError::OverwriteRefused { .. }));
        assert_eq!(store.read("a.png").unwrap(), b"old");

        store.write("a.png", b"new", true).unwrap();
        assert_eq!(store.read("a.png").unwrap(), b"new");
    }

    #[test]
    fn test_read_missing() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        let err = store.read("nope.asset").unwrap_err();
        match err {
            ArtifactError::NotFound { path } => assert!(path.ends_with("nope.asset")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_name_sequential() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(store.unique_name("hero_PaletteGroup.asset", &mut rng), "hero_PaletteGroup.asset");

        store.write("hero_PaletteGroup.asset", b"", false).unwrap();
        assert_eq!(store.unique_name("hero_PaletteGroup.asset", &mut rng), "hero_PaletteGroup 1.asset");

        store.write("hero_PaletteGroup 1.asset", b"", false).unwrap();
        assert_eq!(store.unique_name("hero_PaletteGroup.asset", &mut rng), "hero_PaletteGroup 2.asset");
    }

    #[test]
    fn test_unique_name_keeps_all_extensions() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.write("map.tar.gz", b"", false).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(store.unique_name("map.tar.gz", &mut rng), "map 1.tar.gz");
    }

    #[test]
    fn test_unique_name_random_fallback_is_seeded() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.write("key", b"", false).unwrap();
        for i in 1..MAX_SEQUENTIAL_SUFFIX {
            store.write(&format!("key {i}"), b"", false).unwrap();
        }

        let a = store.unique_name("key", &mut StdRng::seed_from_u64(42));
        let b = store.unique_name("key", &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let suffix: u32 = a.strip_prefix("key ").unwrap().parse().unwrap();
        assert!(suffix >= MAX_SEQUENTIAL_SUFFIX);
    }
}
