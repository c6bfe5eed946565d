//! Calculated driving route for a trip

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Coordinate, TripId};

/// Route returned by `GET /api/trips/{id}/route/`.
///
/// `route_data` is the routing engine's raw response. Only the parts the
/// front ends show are read out of it; everything else is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRoute {
    #[serde(default)]
    pub id: Option<u64>,
    pub trip: TripId,
    #[serde(default)]
    pub route_data: Value,
    pub updated_at: DateTime<Utc>,
}

impl TripRoute {
    fn primary(&self) -> Option<&Value> {
        self.route_data.get("routes")?.get(0)
    }

    /// Total length in meters, when the engine reported one.
    pub fn distance_meters(&self) -> Option<f64> {
        self.primary()?.get("distance")?.as_f64()
    }

    /// Expected travel time in seconds.
    pub fn duration_seconds(&self) -> Option<f64> {
        self.primary()?.get("duration")?.as_f64()
    }

    /// Points along the route from its GeoJSON geometry (`[lng, lat]`
    /// pairs). Malformed points are skipped.
    pub fn path(&self) -> Vec<Coordinate> {
        let Some(points) = self
            .primary()
            .and_then(|route| route.get("geometry"))
            .and_then(|geometry| geometry.get("coordinates"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        points
            .iter()
            .filter_map(|point| {
                let pair = point.as_array()?;
                let longitude = pair.first()?.as_f64()?;
                let latitude = pair.get(1)?.as_f64()?;
                Coordinate::new(latitude, longitude).ok()
            })
            .collect()
    }

    /// One-line summary such as `12.3 km, 25 min`.
    pub fn summary(&self) -> Option<String> {
        let distance = self.distance_meters()?;
        let text = match self.duration_seconds() {
            Some(seconds) => format!(
                "{:.1} km, {} min",
                distance / 1000.0,
                (seconds / 60.0).round()
            ),
            None => format!("{:.1} km", distance / 1000.0),
        };
        Some(text)
    }
}
