use content_blocks_engine::{Catalog, CatalogFile, DependencyFlags};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read catalog at {catalog_path}: {source}")]
    CatalogReadError {
        catalog_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog at {catalog_path}: {source}")]
    CatalogParseError {
        catalog_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown dependency flag: {0}")]
    UnknownFlag(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// TOML file listing block definitions and data-types
    pub catalog_path: PathBuf,
    /// Flag names applied when none are given on the command line
    #[serde(default)]
    pub default_flags: Vec<String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the catalog path
        config.catalog_path = expand_path(&config.catalog_path).unwrap_or(config.catalog_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/content-blocks");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The configured default flags combined into one set
    pub fn default_flags(&self) -> Result<DependencyFlags, ConfigError> {
        parse_flags(&self.default_flags)
    }

    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        load_catalog(&self.catalog_path)
    }
}

/// Combine flag names such as `INCLUDE_MEDIA` into one set
pub fn parse_flags<S: AsRef<str>>(names: &[S]) -> Result<DependencyFlags, ConfigError> {
    names.iter().try_fold(DependencyFlags::NONE, |flags, name| {
        let name = name.as_ref().trim().to_ascii_uppercase();
        DependencyFlags::from_name(&name)
            .map(|flag| flags | flag)
            .ok_or(ConfigError::UnknownFlag(name))
    })
}

/// Read a TOML catalog with `[[definitions]]` and `[[data_types]]` tables
pub fn load_catalog<P: AsRef<Path>>(catalog_path: P) -> Result<Catalog, ConfigError> {
    let catalog_path = catalog_path.as_ref();
    let content =
        std::fs::read_to_string(catalog_path).map_err(|source| ConfigError::CatalogReadError {
            catalog_path: catalog_path.to_path_buf(),
            source,
        })?;

    let file: CatalogFile =
        toml::from_str(&content).map_err(|source| ConfigError::CatalogParseError {
            catalog_path: catalog_path.to_path_buf(),
            source,
        })?;

    Ok(Catalog::from(file))
}

fn expand_path(path: &Path) -> Option<PathBuf> {
    let path_str = path.to_string_lossy();
    match shellexpand::full(&path_str) {
        Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
        Err(_) => None,
    }
}
