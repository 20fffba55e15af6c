//! Default configuration file generation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::utils::private_path;

/// Write a commented default `miqat.toml` with the built-in location to
/// `path`, creating parent directories as needed.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "Failed to create config directory {}",
                private_path(parent)
            )
        })?;
    }

    let content = default_config_content(DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE);
    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default config: {}", private_path(path));
    Ok(())
}

fn default_config_content(latitude: f64, longitude: f64, timezone: &str) -> String {
    let methods = crate::prayer::CalculationMethod::ALL
        .map(|m| m.as_str())
        .join(", ");

    let mut content = ConfigBuilder::new()
        .add_section("Calculation")
        .add_setting(
            "method",
            &format!("\"{}\"", DEFAULT_METHOD.as_str()),
            &methods,
        )
        .add_setting(
            "asr",
            &format!("\"{}\"", DEFAULT_ASR.as_str()),
            "standard or hanafi (later asr)",
        )
        .add_setting(
            "time_format",
            &format!("\"{DEFAULT_TIME_FORMAT}\""),
            "strftime pattern for the table",
        )
        .add_section("Location")
        .add_setting(
            "latitude",
            &format!("{latitude:.6}"),
            "Degrees north (-90 to 90)",
        )
        .add_setting(
            "longitude",
            &format!("{longitude:.6}"),
            "Degrees east (-180 to 180)",
        )
        .add_setting(
            "timezone",
            &format!("\"{timezone}\""),
            "IANA timezone name",
        )
        .build();
    content.push('\n');
    content
}

/// Builds config files with comments aligned in one column.
struct ConfigBuilder {
    entries: Vec<Entry>,
}

enum Entry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(Entry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let column = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Setting { line, .. } => Some(line.chars().count()),
                Entry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Section(title) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                Entry::Setting { line, comment } => {
                    let padding = " ".repeat(column - line.chars().count());
                    lines.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        lines.join("\n")
    }
}
