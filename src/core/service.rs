use crate::core::locator::StubVesselLocator;
use crate::core::{Consignment, ConsignmentRepository, Response, Vessel, VesselLocator, VesselQuery};
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::Validate;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_ALLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

impl Validate for Consignment {
    fn validate(&self) -> Result<()> {
        if self.weight < 0 {
            return Err(ShippingError::InvalidRequest {
                field: "weight".to_string(),
                reason: format!("must not be negative (got {})", self.weight),
            });
        }
        if self.containers.is_empty() {
            return Err(ShippingError::InvalidRequest {
                field: "containers".to_string(),
                reason: "must contain at least one container".to_string(),
            });
        }
        Ok(())
    }
}

/// Records consignments, allocating a vessel to each before it is stored.
pub struct ShippingService<R: ConsignmentRepository> {
    repo: R,
    vessel_locator: Arc<dyn VesselLocator>,
    allocation_timeout: Duration,
}

impl<R: ConsignmentRepository> ShippingService<R> {
    /// Uses [`StubVesselLocator`] until another locator is supplied.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            vessel_locator: Arc::new(StubVesselLocator::default()),
            allocation_timeout: DEFAULT_ALLOCATION_TIMEOUT,
        }
    }

    pub fn with_vessel_locator(mut self, vessel_locator: Arc<dyn VesselLocator>) -> Self {
        self.vessel_locator = vessel_locator;
        self
    }

    pub fn with_allocation_timeout(mut self, timeout: Duration) -> Self {
        self.allocation_timeout = timeout;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates the request, allocates a vessel and only then stores the
    /// consignment. Any failure before the insert leaves the store untouched,
    /// including the caller dropping this future mid-allocation.
    pub async fn create_consignment(&self, mut consignment: Consignment) -> Result<Response> {
        consignment.validate()?;

        if consignment.id.is_empty() {
            consignment.id = Uuid::new_v4().to_string();
        }
        if consignment.has_vessel() {
            tracing::debug!(
                "Ignoring caller-supplied vessel {} on consignment {}",
                consignment.vessel_id,
                consignment.id
            );
        }

        let query = VesselQuery::for_consignment(&consignment);
        let vessel = self.allocate(&consignment.id, &query).await?;

        tracing::info!(
            "Found vessel {} ({}) for consignment {}",
            vessel.name,
            vessel.id,
            consignment.id
        );
        consignment.vessel_id = vessel.id;

        let stored = self.repo.insert(consignment).await;
        tracing::info!(
            "Stored consignment {} with {} containers on vessel {}",
            stored.id,
            stored.containers.len(),
            stored.vessel_id
        );

        Ok(Response::created(stored))
    }

    pub async fn list_consignments(&self) -> Response {
        let consignments = self.repo.list_all().await;
        tracing::debug!("Listing {} consignments", consignments.len());
        Response::listing(consignments)
    }

    async fn allocate(&self, consignment_id: &str, query: &VesselQuery) -> Result<Vessel> {
        tracing::debug!(
            "Requesting vessel for consignment {}: max_weight={} capacity={}",
            consignment_id,
            query.max_weight,
            query.capacity
        );

        let outcome = tokio::time::timeout(
            self.allocation_timeout,
            self.vessel_locator.find_available(query),
        )
        .await
        .map_err(|_| ShippingError::TransportError {
            message: format!(
                "vessel locator did not answer within {:?}",
                self.allocation_timeout
            ),
        });

        match outcome.and_then(|answer| answer) {
            Ok(Some(vessel)) if !vessel.id.is_empty() => Ok(vessel),
            Ok(_) => {
                tracing::warn!(
                    "No vessel available for consignment {} (max_weight={}, capacity={})",
                    consignment_id,
                    query.max_weight,
                    query.capacity
                );
                Err(ShippingError::AllocationUnavailable {
                    max_weight: query.max_weight,
                    capacity: query.capacity,
                })
            }
            Err(e) => {
                tracing::error!(
                    "Vessel allocation failed for consignment {}: {}",
                    consignment_id,
                    e
                );
                Err(e)
            }
        }
    }
}
