// Adapters layer: concrete implementations for external systems (vessel service, http surface).

pub mod http;
pub mod vessel_client;
