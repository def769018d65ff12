//! Configuration management for the geocluster service.
//!
//! Settings load from a TOML file and can be overridden per-option on the
//! command line. A missing file is created from defaults so a bare binary
//! starts up and documents its own knobs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::cli::CliArgs;

/// Application configuration loaded from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Grid dimensions for clustered viewport queries
    pub map: MapSettings,
    /// Coordinate pair omitted from every clustering result
    pub excluded: ExcludedSettings,
    /// Point-set ingestion settings
    pub source: SourceSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Network address to bind to (e.g., "127.0.0.1:8080")
    pub listen_addr: String,
}

/// Grid dimensions used when the caller asks for a clustered view.
///
/// Kept small on purpose: the assignment pass is O(points × width × height),
/// which is fine for grids of tens but not hundreds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSettings {
    /// Number of grid columns
    pub width: u8,
    /// Number of grid rows
    pub height: u8,
}

/// The caller-designated excluded point, in decimal degrees. A source record
/// at exactly this coordinate never appears in any cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedSettings {
    pub lat: f64,
    pub lng: f64,
}

/// Point-set ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Path to the JSON document holding the point records
    pub points_file: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                listen_addr: "127.0.0.1:8080".to_string(),
            },
            map: MapSettings { width: 15, height: 15 },
            excluded: ExcludedSettings { lat: 0.0, lng: 0.0 },
            source: SourceSettings {
                points_file: "points.json".to_string(),
            },
            logging: LoggingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file, creating a default file first
    /// when none exists.
    pub async fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn apply_overrides(&mut self, args: &CliArgs) {
        if let Some(points_file) = &args.points_file {
            self.source.points_file = points_file.to_string_lossy().to_string();
        }
        if let Some(bind_address) = &args.bind_address {
            self.server.listen_addr = bind_address.clone();
        }
        if let Some(log_level) = &args.log_level {
            self.logging.level = log_level.clone();
        }
        if args.json_logs {
            self.logging.json_format = true;
        }
    }

    /// Validates the configuration for consistency.
    ///
    /// The engine assumes its grid dimensions are positive and never checks
    /// them itself, so zero dimensions must be rejected here.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("Invalid listen address: {}", self.server.listen_addr));
        }

        if self.map.width == 0 || self.map.height == 0 {
            return Err("Map width and height must both be at least 1".to_string());
        }

        if self.source.points_file.is_empty() {
            return Err("Points file path cannot be empty".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                self.logging.level
            ));
        }

        Ok(())
    }
}
