use crate::core::{Vessel, VesselLocator, VesselQuery};
use crate::utils::error::{Result, ShippingError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const FIND_AVAILABLE_PATH: &str = "/vessels/find-available";

#[derive(Debug, Deserialize)]
struct FindAvailableResponse {
    vessel: Option<Vessel>,
}

/// Vessel locator backed by the remote vessel service.
///
/// `POST {endpoint}/vessels/find-available` with the query as JSON. A `200`
/// carrying a vessel is a match and a `404` means nothing fits. Anything else
/// is reported as a transport error.
#[derive(Debug, Clone)]
pub struct HttpVesselLocator {
    client: Client,
    url: String,
}

impl HttpVesselLocator {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        crate::utils::validation::validate_url("vessel_locator.endpoint", endpoint)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShippingError::ConfigError {
                message: format!("Failed to build vessel locator HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            url: format!("{}{}", endpoint.trim_end_matches('/'), FIND_AVAILABLE_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl VesselLocator for HttpVesselLocator {
    async fn find_available(&self, query: &VesselQuery) -> Result<Option<Vessel>> {
        tracing::debug!("Making vessel request to: {}", self.url);
        let response = self.client.post(&self.url).json(query).send().await?;

        let status = response.status();
        tracing::debug!("Vessel service response status: {}", status);

        match status {
            StatusCode::OK => {
                let body: FindAvailableResponse = response.json().await?;
                match body.vessel {
                    Some(vessel) if !vessel.id.is_empty() => Ok(Some(vessel)),
                    _ => Err(ShippingError::TransportError {
                        message: "vessel service answered 200 without a vessel id".to_string(),
                    }),
                }
            }
            StatusCode::NOT_FOUND => Ok(None),
            other => Err(ShippingError::TransportError {
                message: format!("vessel service answered with status {}", other),
            }),
        }
    }
}
