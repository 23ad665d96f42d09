pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::vessel_client::HttpVesselLocator;
pub use config::TomlConfig;
pub use core::locator::{FleetVesselLocator, StubVesselLocator};
pub use core::service::ShippingService;
pub use core::store::InMemoryConsignmentStore;
pub use domain::model::{Consignment, Container, Response, Vessel, VesselQuery};
pub use utils::error::{Result, ShippingError};
