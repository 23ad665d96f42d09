use crate::core::service::DEFAULT_ALLOCATION_TIMEOUT;
use crate::core::{ConfigProvider, LocatorMode, Vessel};
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SERVICE_NAME: &str = "go.micro.srv.consignment";
pub const DEFAULT_SERVICE_VERSION: &str = "latest";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:50051";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TomlConfig {
    pub service: Option<ServiceConfig>,
    pub vessel_locator: Option<VesselLocatorConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    pub bind_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VesselLocatorConfig {
    pub mode: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
    pub fleet: Option<Vec<Vessel>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShippingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShippingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShippingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("service.name", self.service_name())?;
        validation::validate_non_empty_string("service.version", self.service_version())?;
        self.bind_address()?;

        let mode = self.parse_locator_mode()?;
        match mode {
            LocatorMode::Remote => {
                let locator = self.vessel_locator.as_ref().and_then(|l| l.endpoint.as_ref());
                let endpoint = validation::validate_required_field("vessel_locator.endpoint", &locator)?;
                validation::validate_url("vessel_locator.endpoint", endpoint)?;
            }
            LocatorMode::Fleet => {
                if self.fleet().is_empty() {
                    return Err(ShippingError::InvalidConfigValueError {
                        field: "vessel_locator.fleet".to_string(),
                        value: "[]".to_string(),
                        reason: "fleet mode needs at least one vessel".to_string(),
                    });
                }
                for vessel in self.fleet() {
                    validation::validate_non_empty_string("vessel_locator.fleet.id", &vessel.id)?;
                }
            }
            LocatorMode::Stub => {}
        }

        if let Some(timeout_ms) = self.vessel_locator.as_ref().and_then(|l| l.timeout_ms) {
            validation::validate_positive_number("vessel_locator.timeout_ms", timeout_ms, 1)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_ref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format.as_str()) {
                return Err(ShippingError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    /// Without an explicit mode, a configured endpoint means `remote`.
    pub fn parse_locator_mode(&self) -> Result<LocatorMode> {
        let locator = self.vessel_locator.as_ref();
        match locator.and_then(|l| l.mode.as_deref()) {
            Some("remote") => Ok(LocatorMode::Remote),
            Some("fleet") => Ok(LocatorMode::Fleet),
            Some("stub") => Ok(LocatorMode::Stub),
            Some(other) => Err(ShippingError::InvalidConfigValueError {
                field: "vessel_locator.mode".to_string(),
                value: other.to_string(),
                reason: "Valid modes: remote, fleet, stub".to_string(),
            }),
            None if locator.and_then(|l| l.endpoint.as_ref()).is_some() => Ok(LocatorMode::Remote),
            None => Ok(LocatorMode::Stub),
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub(crate) fn service_mut(&mut self) -> &mut ServiceConfig {
        self.service.get_or_insert_with(ServiceConfig::default)
    }

    pub(crate) fn vessel_locator_mut(&mut self) -> &mut VesselLocatorConfig {
        self.vessel_locator
            .get_or_insert_with(VesselLocatorConfig::default)
    }

    pub(crate) fn logging_mut(&mut self) -> &mut LoggingConfig {
        self.logging.get_or_insert_with(LoggingConfig::default)
    }
}

impl ConfigProvider for TomlConfig {
    fn service_name(&self) -> &str {
        self.service
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or(DEFAULT_SERVICE_NAME)
    }

    fn service_version(&self) -> &str {
        self.service
            .as_ref()
            .and_then(|s| s.version.as_deref())
            .unwrap_or(DEFAULT_SERVICE_VERSION)
    }

    fn bind_address(&self) -> Result<SocketAddr> {
        let address = self
            .service
            .as_ref()
            .and_then(|s| s.bind_address.as_deref())
            .unwrap_or(DEFAULT_BIND_ADDRESS);
        validation::validate_socket_addr("service.bind_address", address)
    }

    fn locator_mode(&self) -> LocatorMode {
        self.parse_locator_mode().unwrap_or(LocatorMode::Stub)
    }

    fn vessel_endpoint(&self) -> Option<&str> {
        self.vessel_locator
            .as_ref()
            .and_then(|l| l.endpoint.as_deref())
    }

    fn fleet(&self) -> &[Vessel] {
        self.vessel_locator
            .as_ref()
            .and_then(|l| l.fleet.as_deref())
            .unwrap_or(&[])
    }

    fn allocation_timeout(&self) -> Duration {
        self.vessel_locator
            .as_ref()
            .and_then(|l| l.timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ALLOCATION_TIMEOUT)
    }

    fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
