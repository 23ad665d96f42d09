pub mod locator;
pub mod service;
pub mod store;

pub use crate::domain::model::{Consignment, Container, Response, Vessel, VesselQuery};
pub use crate::domain::ports::{ConfigProvider, ConsignmentRepository, LocatorMode, VesselLocator};
pub use crate::utils::error::Result;
