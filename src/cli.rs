//! Command-line interface definitions using clap
//!
//! Flags override the matching values from the config file and `IPC__*`
//! environment variables.

use clap::Parser;

use crate::config::{ConfigOverrides, DatastoreKind};

/// ipcountry - IP address to city/country lookup service
#[derive(Parser, Debug)]
#[command(name = "ipcountry")]
#[command(version)]
#[command(about = "IP geolocation lookup service", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: config.toml if present)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Listen port
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Admitted requests per second (burst equals this value)
    #[arg(long)]
    pub rps: Option<f64>,

    /// Dataset format: csv or json
    #[arg(long = "datastore-type")]
    pub datastore_type: Option<DatastoreKind>,

    /// Dataset file path
    #[arg(long = "datastore-file")]
    pub datastore_file: Option<String>,

    /// Print an example configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Cli {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            rps: self.rps,
            datastore_kind: self.datastore_type,
            datastore_file: self.datastore_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from([
            "ipcountry",
            "--port",
            "9090",
            "--rps",
            "2.5",
            "--datastore-type",
            "json",
            "--datastore-file",
            "data.json",
        ]);
        let overrides = cli.to_overrides();
        assert_eq!(overrides.port, Some(9090));
        assert_eq!(overrides.rps, Some(2.5));
        assert_eq!(overrides.datastore_kind, Some(DatastoreKind::Json));
        assert_eq!(overrides.datastore_file.as_deref(), Some("data.json"));
        assert!(!cli.generate_config);
    }

    #[test]
    fn test_no_flags_means_no_overrides() {
        let cli = Cli::parse_from(["ipcountry"]);
        let overrides = cli.to_overrides();
        assert!(overrides.port.is_none());
        assert!(overrides.rps.is_none());
        assert!(overrides.datastore_kind.is_none());
        assert!(overrides.datastore_file.is_none());
    }

    #[test]
    fn test_rejects_unknown_datastore_type() {
        let result = Cli::try_parse_from(["ipcountry", "--datastore-type", "xml"]);
        assert!(result.is_err());
    }
}
