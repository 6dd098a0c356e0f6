use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sealnote_core::crypto::KdfParams;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SealNoteConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub kdf: KdfSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: Option<String>,
}

/// KDF cost for newly created stores and password changes.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KdfSection {
    pub memory_kib: Option<u32>,
    pub iterations: Option<u32>,
    pub parallelism: Option<u32>,
}

impl KdfSection {
    /// Resolve to validated parameters, filling gaps from the defaults.
    pub fn params(&self) -> anyhow::Result<KdfParams> {
        let defaults = KdfParams::default();
        KdfParams::new(
            self.memory_kib.unwrap_or(defaults.memory_kib),
            self.iterations.unwrap_or(defaults.iterations),
            self.parallelism.unwrap_or(defaults.parallelism),
        )
        .map_err(|e| anyhow::anyhow!("Invalid [kdf] config: {}", e))
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes.sealnote"))
}

pub fn read_config(path: &Path) -> anyhow::Result<SealNoteConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Load the config at `path`, or the default location.
///
/// A missing file at the default location is not an error; an explicitly
/// requested file must exist.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SealNoteConfig> {
    match path {
        Some(path) => read_config(path),
        None => {
            let path = default_config_path()?;
            if path.exists() {
                read_config(&path)
            } else {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(SealNoteConfig::default())
            }
        }
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("sealnote"));
        }
    }
    Ok(home_dir()?.join(".config").join("sealnote"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("sealnote"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("sealnote"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
