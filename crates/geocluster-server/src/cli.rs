//! Command-line interface for the geocluster service.
//!
//! Argument parsing uses the `clap` builder API. Every option is an override
//! of the corresponding configuration-file setting; the config file itself
//! is the only required input and has a sensible default path.

use clap::{Arg, Command};
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the TOML configuration file.
    pub config_path: PathBuf,
    /// Optional override of the point-set document path.
    pub points_file: Option<PathBuf>,
    /// Optional override of the listen address.
    pub bind_address: Option<String>,
    /// Optional override of the log level.
    pub log_level: Option<String>,
    /// Force JSON log output.
    pub json_logs: bool,
}

impl CliArgs {
    /// Parses command-line arguments.
    pub fn parse() -> Self {
        let matches = Command::new("geocluster")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Map-viewport grid-clustering microservice")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value("geocluster.toml"),
            )
            .arg(
                Arg::new("points")
                    .short('p')
                    .long("points")
                    .value_name("FILE")
                    .help("Point-set JSON document (overrides [source] in the config)"),
            )
            .arg(
                Arg::new("bind")
                    .short('b')
                    .long("bind")
                    .value_name("ADDRESS")
                    .help("Listen address (e.g., 127.0.0.1:8080)"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .get_matches();

        Self {
            config_path: PathBuf::from(
                matches
                    .get_one::<String>("config")
                    .expect("default config path should always be set"),
            ),
            points_file: matches.get_one::<String>("points").map(PathBuf::from),
            bind_address: matches.get_one::<String>("bind").cloned(),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_are_carried_through() {
        let args = CliArgs {
            config_path: PathBuf::from("test.toml"),
            points_file: Some(PathBuf::from("points.json")),
            bind_address: Some("127.0.0.1:9000".to_string()),
            log_level: Some("debug".to_string()),
            json_logs: true,
        };

        assert_eq!(args.config_path, PathBuf::from("test.toml"));
        assert_eq!(args.points_file, Some(PathBuf::from("points.json")));
        assert_eq!(args.bind_address, Some("127.0.0.1:9000".to_string()));
        assert_eq!(args.log_level, Some("debug".to_string()));
        assert!(args.json_logs);
    }
}
