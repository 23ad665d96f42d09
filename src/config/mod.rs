pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "consignment-service")]
#[command(about = "Records shipping consignments and allocates a vessel to each")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to serve the consignment API on
    #[arg(long)]
    pub bind_address: Option<String>,

    /// Vessel locator mode: remote, fleet or stub
    #[arg(long)]
    pub vessel_mode: Option<String>,

    /// Base URL of the vessel service
    #[arg(long)]
    pub vessel_endpoint: Option<String>,

    /// Upper bound on a single vessel lookup, in milliseconds
    #[arg(long)]
    pub vessel_timeout_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the configuration file (if any) and layers the flags on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(bind_address) = &self.bind_address {
            config.service_mut().bind_address = Some(bind_address.clone());
        }
        if let Some(mode) = &self.vessel_mode {
            config.vessel_locator_mut().mode = Some(mode.clone());
        }
        if let Some(endpoint) = &self.vessel_endpoint {
            config.vessel_locator_mut().endpoint = Some(endpoint.clone());
        }
        if let Some(timeout_ms) = self.vessel_timeout_ms {
            config.vessel_locator_mut().timeout_ms = Some(timeout_ms);
        }
        if self.verbose {
            config.logging_mut().verbose = Some(true);
        }
        if self.json_logs {
            config.logging_mut().format = Some("json".to_string());
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::{ConfigProvider, LocatorMode};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "consignment-service",
            "--bind-address",
            "127.0.0.1:9000",
            "--vessel-endpoint",
            "http://localhost:50052",
            "--verbose",
        ]);

        assert_eq!(cli.bind_address.as_deref(), Some("127.0.0.1:9000"));
        assert!(cli.verbose);
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[service]
bind_address = "0.0.0.0:50051"

[vessel_locator]
mode = "stub"
timeout_ms = 1000
"#,
            )
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_string_lossy().into_owned()),
            bind_address: Some("127.0.0.1:9000".to_string()),
            vessel_mode: Some("remote".to_string()),
            vessel_endpoint: Some("http://localhost:50052".to_string()),
            json_logs: true,
            ..Default::default()
        };

        let config = cli.resolve().unwrap();

        assert_eq!(config.bind_address().unwrap().port(), 9000);
        assert_eq!(config.locator_mode(), LocatorMode::Remote);
        assert_eq!(config.allocation_timeout(), Duration::from_millis(1000));
        assert!(config.json_logs());
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let config = CliConfig::default().resolve().unwrap();
        assert_eq!(config.locator_mode(), LocatorMode::Stub);
        assert!(!config.verbose());
    }
}
