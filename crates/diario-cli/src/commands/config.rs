//! Config command handlers

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use diario_core::{Config, Profile};

use crate::output::{Output, OutputFormat};

/// Keys accepted by `config set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigKey {
    DataDir,
    DefaultAuthor,
    LogFile,
}

impl ConfigKey {
    const ALL: [ConfigKey; 3] = [
        ConfigKey::DataDir,
        ConfigKey::DefaultAuthor,
        ConfigKey::LogFile,
    ];

    fn name(self) -> &'static str {
        match self {
            ConfigKey::DataDir => "data_dir",
            ConfigKey::DefaultAuthor => "default_author",
            ConfigKey::LogFile => "log_file",
        }
    }

    /// Current value as shown to the user
    fn display_value(self, config: &Config) -> String {
        match self {
            ConfigKey::DataDir => config.data_dir.display().to_string(),
            ConfigKey::DefaultAuthor => format!(
                "{} ({} {})",
                config.default_author,
                config.default_author.emoji(),
                config.default_author.name()
            ),
            ConfigKey::LogFile => config
                .log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(stderr)".to_string()),
        }
    }

    /// Validate `value` and store it in `config`
    fn apply(self, config: &mut Config, value: &str) -> Result<()> {
        match self {
            ConfigKey::DataDir => {
                let dir = non_empty_path(value, self)?;
                if dir.is_file() {
                    bail!("data_dir {:?} is a file, expected a directory", dir);
                }
                config.data_dir = dir;
            }
            ConfigKey::DefaultAuthor => {
                config.default_author = value.parse::<Profile>()?;
            }
            ConfigKey::LogFile => {
                config.log_file = if matches!(value.trim(), "" | "none") {
                    None
                } else {
                    let path = non_empty_path(value, self)?;
                    if path.is_dir() {
                        bail!("log_file {:?} is a directory", path);
                    }
                    Some(path)
                };
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = ConfigKey::ALL.iter().map(|k| k.name()).collect();
                anyhow!(
                    "Unknown configuration key: '{}'\nValid keys: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}

/// Trimmed path with a leading `~` expanded to the home directory
fn non_empty_path(value: &str, key: ConfigKey) -> Result<PathBuf> {
    let value = value.trim();
    if value.is_empty() {
        bail!("{} must not be empty", key);
    }

    let path = match value.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .ok_or_else(|| anyhow!("Cannot expand '~': no home directory"))?
            .join(rest),
        None => PathBuf::from(value),
    };
    Ok(path)
}

fn effective_path(config_path: Option<&PathBuf>) -> PathBuf {
    config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path)
}

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let file = effective_path(config_path);

    match output.format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&config)?;
            if let Some(map) = value.as_object_mut() {
                map.insert("config_file".into(), serde_json::json!(file));
            }
            println!("{}", value);
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            for key in ConfigKey::ALL {
                println!("  {:<15} {}", format!("{}:", key), key.display_value(&config));
            }
            println!();
            println!("Config file: {}{}", file.display(), missing_marker(&file));
        }
    }

    Ok(())
}

fn missing_marker(path: &Path) -> &'static str {
    if path.exists() {
        ""
    } else {
        " (not created yet, using defaults)"
    }
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let key: ConfigKey = key.parse()?;
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    key.apply(&mut config, &value)?;

    config
        .save_to_path(&effective_path(config_path))
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, key.display_value(&config)));
    Ok(())
}
