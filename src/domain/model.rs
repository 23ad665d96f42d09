use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Container {
    pub id: String,
    pub customer_id: String,
    pub origin: String,
    pub user_id: String,
}

/// A filed cargo manifest. `vessel_id` stays empty until allocation succeeds,
/// and a consignment with an empty `vessel_id` is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Consignment {
    pub id: String,
    pub description: String,
    pub weight: i32,
    pub containers: Vec<Container>,
    pub vessel_id: String,
}

impl Consignment {
    pub fn has_vessel(&self) -> bool {
        !self.vessel_id.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub max_weight: i32,
    pub capacity: i32,
}

impl Vessel {
    pub fn can_carry(&self, query: &VesselQuery) -> bool {
        self.capacity >= query.capacity && self.max_weight >= query.max_weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselQuery {
    pub max_weight: i32,
    pub capacity: i32,
}

impl VesselQuery {
    pub fn for_consignment(consignment: &Consignment) -> Self {
        Self {
            max_weight: consignment.weight,
            capacity: i32::try_from(consignment.containers.len()).unwrap_or(i32::MAX),
        }
    }
}

/// Uniform envelope returned by both service operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Response {
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignment: Option<Consignment>,
    pub consignments: Vec<Consignment>,
}

impl Response {
    pub fn created(consignment: Consignment) -> Self {
        Self {
            created: true,
            consignment: Some(consignment),
            consignments: Vec::new(),
        }
    }

    pub fn listing(consignments: Vec<Consignment>) -> Self {
        Self {
            created: false,
            consignment: None,
            consignments,
        }
    }
}
