//! Configuration loading.
//!
//! Handles path resolution, default file creation and geo.toml overrides.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::validation::validate_config;
use super::{Config, GeoConfig};
use crate::constants::*;
use crate::utils::private_path;

/// Configuration directory chosen with `--config`, set once at startup.
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
///
/// Can only be called once; returns an error on the second call.
pub fn set_config_dir(dir: Option<PathBuf>) -> Result<()> {
    CONFIG_DIR
        .set(dir)
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Path of `miqat.toml`, honoring `--config`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = CONFIG_DIR.get().and_then(|d| d.clone()) {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Path of `geo.toml` next to a configuration file.
pub fn get_geo_path(config_path: &Path) -> Option<PathBuf> {
    config_path.parent().map(|dir| dir.join(GEO_FILE_NAME))
}

/// Load the configuration, writing a default file first if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path)
            .context("Failed to create default config during load")?;
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load and validate a configuration file without creating anything.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    // Merge geo.toml before validation so its values are checked too
    load_geo_override_from_path(&mut config, path)?;

    validate_config(&config)?;

    Ok(config)
}

/// Apply `geo.toml` next to `config_path`, if present.
///
/// A missing file is not an error. An unreadable or malformed one only
/// produces a warning and the main file's location is kept.
pub(crate) fn load_geo_override_from_path(config: &mut Config, config_path: &Path) -> Result<()> {
    let Some(geo_path) = get_geo_path(config_path) else {
        return Ok(());
    };

    if !geo_path.exists() {
        return Ok(());
    }

    let geo_config = match fs::read_to_string(&geo_path) {
        Ok(content) => match toml::from_str::<GeoConfig>(&content) {
            Ok(geo_config) => geo_config,
            Err(e) => {
                log_warning!("Failed to parse geo.toml: {e}. Using location from main config.");
                return Ok(());
            }
        },
        Err(e) => {
            log_warning!("Failed to read geo.toml: {e}. Using location from main config.");
            return Ok(());
        }
    };

    if let Some(lat) = geo_config.latitude {
        config.latitude = Some(lat);
        config.geo_override = true;
    }
    if let Some(lon) = geo_config.longitude {
        config.longitude = Some(lon);
        config.geo_override = true;
    }
    if let Some(timezone) = geo_config.timezone {
        config.timezone = Some(timezone);
        config.geo_override = true;
    }

    Ok(())
}
