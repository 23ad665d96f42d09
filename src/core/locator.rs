//! In-process vessel locators.
//!
//! [`StubVesselLocator`] lets the service run without a vessel service at all;
//! [`FleetVesselLocator`] answers queries from a fixed list of vessels.

use crate::core::{Vessel, VesselLocator, VesselQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const STUB_VESSEL_ID: &str = "stub-vessel";

/// Always allocates the same vessel, whatever the query asks for.
#[derive(Debug, Clone)]
pub struct StubVesselLocator {
    vessel: Vessel,
}

impl StubVesselLocator {
    pub fn new(vessel: Vessel) -> Self {
        Self { vessel }
    }
}

impl Default for StubVesselLocator {
    fn default() -> Self {
        Self::new(Vessel {
            id: STUB_VESSEL_ID.to_string(),
            name: "Stub Vessel".to_string(),
            max_weight: i32::MAX,
            capacity: i32::MAX,
        })
    }
}

#[async_trait]
impl VesselLocator for StubVesselLocator {
    async fn find_available(&self, query: &VesselQuery) -> Result<Option<Vessel>> {
        tracing::debug!(
            "Stub locator allocating {} for max_weight={} capacity={}",
            self.vessel.id,
            query.max_weight,
            query.capacity
        );
        Ok(Some(self.vessel.clone()))
    }
}

/// Picks the first vessel in fleet order that satisfies both limits.
#[derive(Debug, Clone, Default)]
pub struct FleetVesselLocator {
    fleet: Vec<Vessel>,
}

impl FleetVesselLocator {
    pub fn new(fleet: Vec<Vessel>) -> Self {
        Self { fleet }
    }

    pub fn fleet(&self) -> &[Vessel] {
        &self.fleet
    }
}

#[async_trait]
impl VesselLocator for FleetVesselLocator {
    async fn find_available(&self, query: &VesselQuery) -> Result<Option<Vessel>> {
        Ok(self
            .fleet
            .iter()
            .find(|vessel| vessel.can_carry(query))
            .cloned())
    }
}
