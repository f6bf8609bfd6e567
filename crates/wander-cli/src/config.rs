//! Configuration file management for wander.
//!
//! Provides a TOML-based config file at `~/.config/wander/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use wander_core::generate::{CommandGenerator, ItineraryGenerator, StaticGenerator};
use wander_db::config::DbConfig;

/// Env var holding the user id trips are stored under.
pub const USER_ENV_VAR: &str = "WANDER_USER_ID";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorSection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserSection {
    /// Opaque id that owns the user's trips.
    pub id: String,
}

/// External command that turns a prompt on stdin into a plan on stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSection {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the wander config directory: `$XDG_CONFIG_HOME/wander` or
/// `~/.config/wander`, on every platform.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("wander");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("wander")
}

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
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
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

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct WanderConfig {
    pub db_config: DbConfig,
    user_id: Option<String>,
    generator: Option<GeneratorSection>,
}

impl WanderConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `cli_db_url` > `WANDER_DATABASE_URL` > `database.url` > `DbConfig::DEFAULT_URL`
    /// - User id: `WANDER_USER_ID` > `user.id` (no default; see [`Self::user_id`])
    /// - Generator: `generator` section only
    pub fn resolve(cli_db_url: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let db_url = if let Some(url) = cli_db_url {
            url.to_string()
        } else if let Ok(url) = std::env::var(DbConfig::ENV_VAR) {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.database.url.clone()
        } else {
            DbConfig::DEFAULT_URL.to_string()
        };

        let user_id = match std::env::var(USER_ENV_VAR) {
            Ok(id) if !id.trim().is_empty() => Some(id),
            _ => file_config
                .as_ref()
                .and_then(|cfg| cfg.user.as_ref())
                .map(|u| u.id.clone()),
        };

        let generator = file_config.and_then(|cfg| cfg.generator);

        Ok(Self {
            db_config: DbConfig::new(db_url),
            user_id,
            generator,
        })
    }

    /// The configured user. Every trip command needs one.
    pub fn user_id(&self) -> Result<&str> {
        match self.user_id.as_deref() {
            Some(id) => Ok(id),
            None => bail!(
                "user id not found; set {USER_ENV_VAR} or run `wander init --user-id <id>`"
            ),
        }
    }

    /// The generator to use: a fixed plan when one was supplied, else the
    /// configured command.
    pub fn generator(&self, plan_text: Option<String>) -> Result<Box<dyn ItineraryGenerator>> {
        if let Some(text) = plan_text {
            return Ok(Box::new(StaticGenerator::new(text)));
        }
        match &self.generator {
            Some(section) => Ok(Box::new(CommandGenerator::new(
                section.command.clone(),
                section.args.clone(),
            ))),
            None => bail!(
                "no itinerary generator configured; add a [generator] section to {} or pass --plan",
                config_path().display()
            ),
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
