use crate::core::{Consignment, ConsignmentRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory consignment store. Clones share the same backing collection.
///
/// Appends are serialized behind the write lock so racing creates never lose
/// an entry, and readers clone under the read lock so they never observe a
/// half-applied append.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConsignmentStore {
    consignments: Arc<RwLock<Vec<Consignment>>>,
}

impl InMemoryConsignmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConsignmentRepository for InMemoryConsignmentStore {
    async fn insert(&self, consignment: Consignment) -> Consignment {
        let mut consignments = self.consignments.write().await;
        consignments.push(consignment.clone());
        tracing::debug!("Store now holds {} consignments", consignments.len());
        consignment
    }

    async fn list_all(&self) -> Vec<Consignment> {
        self.consignments.read().await.clone()
    }

    async fn len(&self) -> usize {
        self.consignments.read().await.len()
    }
}
