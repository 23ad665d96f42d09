//! Wiring from configuration to a running service.

use crate::adapters::http::{router, AppState};
use crate::adapters::vessel_client::HttpVesselLocator;
use crate::core::locator::{FleetVesselLocator, StubVesselLocator};
use crate::core::service::ShippingService;
use crate::core::store::InMemoryConsignmentStore;
use crate::core::{ConfigProvider, LocatorMode, VesselLocator};
use crate::utils::error::Result;
use crate::utils::validation;
use std::future::Future;
use std::sync::Arc;

pub fn build_vessel_locator<C: ConfigProvider>(config: &C) -> Result<Arc<dyn VesselLocator>> {
    match config.locator_mode() {
        LocatorMode::Remote => {
            let endpoint = config.vessel_endpoint();
            let endpoint = validation::validate_required_field("vessel_locator.endpoint", &endpoint)?;
            let locator = HttpVesselLocator::new(endpoint, config.allocation_timeout())?;
            tracing::info!("Using remote vessel locator at {}", locator.url());
            Ok(Arc::new(locator))
        }
        LocatorMode::Fleet => {
            tracing::info!(
                "Using in-memory fleet of {} vessels",
                config.fleet().len()
            );
            Ok(Arc::new(FleetVesselLocator::new(config.fleet().to_vec())))
        }
        LocatorMode::Stub => {
            tracing::warn!("No vessel service configured, every consignment gets the stub vessel");
            Ok(Arc::new(StubVesselLocator::default()))
        }
    }
}

pub fn build_app_state<C: ConfigProvider>(
    config: &C,
) -> Result<Arc<AppState<InMemoryConsignmentStore>>> {
    let service = ShippingService::new(InMemoryConsignmentStore::new())
        .with_vessel_locator(build_vessel_locator(config)?)
        .with_allocation_timeout(config.allocation_timeout());

    Ok(Arc::new(AppState {
        service,
        service_name: config.service_name().to_string(),
        service_version: config.service_version().to_string(),
    }))
}

/// Serves the consignment API until `shutdown` resolves.
pub async fn serve<C, F>(config: &C, shutdown: F) -> Result<()>
where
    C: ConfigProvider,
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_address()?;
    let state = build_app_state(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Serving {} ({}) on {}",
        config.service_name(),
        config.service_version(),
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TomlConfig;
    use crate::core::locator::STUB_VESSEL_ID;
    use crate::core::VesselQuery;

    #[tokio::test]
    async fn test_default_config_builds_stub_locator() {
        let config = TomlConfig::default();
        let locator = build_vessel_locator(&config).unwrap();

        let vessel = locator
            .find_available(&VesselQuery {
                max_weight: 1,
                capacity: 1,
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(vessel.id, STUB_VESSEL_ID);
    }

    #[tokio::test]
    async fn test_fleet_config_builds_fleet_locator() {
        let config = TomlConfig::from_toml_str(
            r#"
[vessel_locator]
mode = "fleet"

[[vessel_locator.fleet]]
id = "vessel001"
name = "Boaty McBoatface"
max_weight = 200000
capacity = 500
"#,
        )
        .unwrap();
        let locator = build_vessel_locator(&config).unwrap();

        let too_heavy = locator
            .find_available(&VesselQuery {
                max_weight: 300_000,
                capacity: 1,
            })
            .await
            .unwrap();

        assert!(too_heavy.is_none());
    }

    #[test]
    fn test_remote_mode_without_endpoint_fails() {
        let config = TomlConfig::from_toml_str(
            r#"
[vessel_locator]
mode = "remote"
"#,
        )
        .unwrap();

        assert!(build_vessel_locator(&config).is_err());
    }

    #[test]
    fn test_app_state_carries_service_identity() {
        let state = build_app_state(&TomlConfig::default()).unwrap();
        assert_eq!(state.service_name, "go.micro.srv.consignment");
        assert_eq!(state.service_version, "latest");
    }
}
