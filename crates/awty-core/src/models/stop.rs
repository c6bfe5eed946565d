//! Trip stop (waypoint) model

use serde::{Deserialize, Serialize};

/// A waypoint attached to a trip, ordered by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub id: Option<u64>,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub order: u32,
}

/// Payload for `POST /api/trips/{id}/add_stop/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStop {
    pub location: String,
    pub description: String,
    pub order: u32,
}
