use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "PALETTEMAP_CONFIG";

/// Application configuration loaded from palettemap.yaml
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Where artifacts are written (default: next to the source image)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Replace existing artifacts instead of refusing to write
    #[serde(default)]
    pub overwrite: bool,

    /// Sort freshly extracted palettes by luminance
    #[serde(default)]
    pub sort_palette: bool,

    /// Artifact file naming
    #[serde(default)]
    pub naming: NamingConfig,
}

/// Suffixes appended to the source image stem to name artifacts
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NamingConfig {
    #[serde(default = "default_map_suffix")]
    pub map_suffix: String,

    #[serde(default = "default_key_suffix")]
    pub key_suffix: String,

    #[serde(default = "default_group_suffix")]
    pub group_suffix: String,
}

fn default_map_suffix() -> String {
    "_PaletteMap".to_string()
}

fn default_key_suffix() -> String {
    "_PaletteKey".to_string()
}

fn default_group_suffix() -> String {
    "_PaletteGroup".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            map_suffix: default_map_suffix(),
            key_suffix: default_key_suffix(),
            group_suffix: default_group_suffix(),
        }
    }
}

impl NamingConfig {
    /// `<stem>_PaletteMap.png`
    pub fn map_file(&self, stem: &str) -> String {
        format!("{stem}{}.png", self.map_suffix)
    }

    /// `<stem>_PaletteKey.png`
    pub fn key_file(&self, stem: &str) -> String {
        format!("{stem}{}.png", self.key_suffix)
    }

    /// `<stem>_PaletteGroup.asset`
    pub fn group_file(&self, stem: &str) -> String {
        format!("{stem}{}.asset", self.group_suffix)
    }

    /// Recover the group name from a group asset filename.
    ///
    /// Numbered names keep their number: `hero_PaletteGroup 2.asset` gives
    /// `hero 2`.
    pub fn stem_of_group_file(&self, filename: &str) -> String {
        let stem = filename.strip_suffix(".asset").unwrap_or(filename);
        match stem.rfind(self.group_suffix.as_str()) {
            Some(at) if !self.group_suffix.is_empty() => {
                format!("{}{}", &stem[..at], &stem[at + self.group_suffix.len()..])
            }
            _ => stem.to_string(),
        }
    }
}

impl AppConfig {
    /// Config path from the command line, falling back to `PALETTEMAP_CONFIG`.
    pub fn resolve_path(cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
    }

    /// Load configuration, using defaults when no file is configured or the
    /// file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file configured, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        overwrite = config.overwrite,
                        sort_palette = config.sort_palette,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Output directory for artifacts derived from `source`.
    pub fn output_dir_for(&self, source: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => source
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
