//! Configuration file management for listlaunch.
//!
//! Provides a TOML-based config file at `~/.config/listlaunch/config.toml`
//! and a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use listlaunch_core::generator::{GeneratorConfig, OpenAiGenerator};
use listlaunch_db::config::DbConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default)]
    pub generator: GeneratorSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the listlaunch config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/listlaunch` or
/// `~/.config/listlaunch`, never the macOS `Application Support` path.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("listlaunch");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("listlaunch")
}

/// Return the path to the listlaunch config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since it may hold an API key.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(path)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct ListlaunchConfig {
    pub db_config: DbConfig,
    pub generator: GeneratorConfig,
}

impl ListlaunchConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `cli_db_url` > `LISTLAUNCH_DATABASE_URL` > `database.url` > `DbConfig::DEFAULT_URL`
    /// - API key: `OPENAI_API_KEY` > `generator.api_key` > none
    /// - Model: `LISTLAUNCH_MODEL` > `generator.model` > default
    /// - Base URL: `OPENAI_BASE_URL` > `generator.base_url` > default
    ///
    /// A missing API key is not an error here; it only matters when a pack
    /// has to be generated.
    pub fn resolve(cli_db_url: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let db_url = if let Some(url) = cli_db_url {
            url.to_string()
        } else if let Ok(url) = std::env::var("LISTLAUNCH_DATABASE_URL") {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.database.url.clone()
        } else {
            DbConfig::DEFAULT_URL.to_string()
        };
        let db_config = DbConfig::new(db_url);

        let from_env = GeneratorConfig::from_env();
        let section = file_config.map(|c| c.generator).unwrap_or_default();
        let generator = GeneratorConfig {
            api_key: from_env.api_key.or(section.api_key),
            model: env_or("LISTLAUNCH_MODEL", section.model, GeneratorConfig::DEFAULT_MODEL),
            base_url: env_or("OPENAI_BASE_URL", section.base_url, GeneratorConfig::DEFAULT_BASE_URL),
        };

        Ok(Self {
            db_config,
            generator,
        })
    }

    /// The configured text generator, or `None` without an API key.
    pub fn build_generator(&self) -> Option<OpenAiGenerator> {
        OpenAiGenerator::from_config(&self.generator)
    }
}

fn env_or(var: &str, file_value: Option<String>, default: &str) -> String {
    std::env::var(var)
        .ok()
        .or(file_value)
        .unwrap_or_else(|| default.to_string())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
