use crate::domain::model::{Consignment, Vessel, VesselQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;

/// Append-only record store. Neither operation can fail.
#[async_trait]
pub trait ConsignmentRepository: Send + Sync {
    async fn insert(&self, consignment: Consignment) -> Consignment;
    async fn list_all(&self) -> Vec<Consignment>;
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// `Ok(None)` means no vessel matches the query; `Err` means the locator
/// itself could not answer.
#[async_trait]
pub trait VesselLocator: Send + Sync {
    async fn find_available(&self, query: &VesselQuery) -> Result<Option<Vessel>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorMode {
    Remote,
    Fleet,
    Stub,
}

pub trait ConfigProvider: Send + Sync {
    fn service_name(&self) -> &str;
    fn service_version(&self) -> &str;
    fn bind_address(&self) -> Result<SocketAddr>;
    fn locator_mode(&self) -> LocatorMode;
    fn vessel_endpoint(&self) -> Option<&str>;
    fn fleet(&self) -> &[Vessel];
    fn allocation_timeout(&self) -> Duration;
    fn json_logs(&self) -> bool;
}
