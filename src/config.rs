//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::Quality;

/// Config file read from the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default database location
pub const DEFAULT_DB_PATH: &str = "data/ardent_study.db";

/// Log filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "ardent_study=info";

// ==================== Config File ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
    scheduler: Option<SchedulerConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SchedulerConfig {
    /// Quality assumed for a review submitted without one
    default_quality: Option<i64>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub default_quality: Quality,
}

fn read_config_file(path: &Path) -> Option<AppConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Load settings from config.toml, .env and the process environment
pub fn load_settings() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    load_settings_from(Path::new(CONFIG_FILE))
}

/// Load settings using a specific config file
pub fn load_settings_from(config_file: &Path) -> Settings {
    let config = read_config_file(config_file).unwrap_or_default();
    Settings {
        database_path: resolve_database_path(&config, std::env::var("DATABASE_PATH").ok()),
        default_quality: resolve_default_quality(
            &config,
            std::env::var("ARDENT_DEFAULT_QUALITY").ok(),
        ),
    }
}

fn resolve_database_path(config: &AppConfig, env_path: Option<String>) -> PathBuf {
    // Priority 1: config.toml
    if let Some(path) = config.database.as_ref().and_then(|db| db.path.clone()) {
        tracing::info!("Using database from config.toml: {}", path);
        return PathBuf::from(path);
    }

    // Priority 2: .env DATABASE_PATH
    if let Some(path) = env_path {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from(DEFAULT_DB_PATH);
    tracing::info!("Using default database path: {}", default.display());
    default
}

fn resolve_default_quality(config: &AppConfig, env_quality: Option<String>) -> Quality {
    let configured = config
        .scheduler
        .as_ref()
        .and_then(|s| s.default_quality)
        .or_else(|| env_quality.and_then(|q| q.trim().parse::<i64>().ok()));

    configured.map(Quality::clamped).unwrap_or_default()
}
