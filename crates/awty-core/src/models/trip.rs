//! Trip model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Coordinate, Stop};
use crate::error::Error;

/// Server-assigned trip identifier.
///
/// The backend may hand out numeric or string keys; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TripId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Trip ID cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for TripId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(number) => Ok(Self(number.to_string())),
            RawId::Text(text) => Ok(Self(text)),
        }
    }
}

/// A trip as returned by the trip API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Server-assigned identifier, immutable
    pub id: TripId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Start location in `"lat, lng"` text form
    #[serde(default)]
    pub start_location: Option<String>,
    #[serde(default)]
    pub start_location_lat: Option<f64>,
    #[serde(default)]
    pub start_location_long: Option<f64>,
    #[serde(default)]
    pub end_location: Option<String>,
    /// Server-assigned creation time, immutable
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub stops: Vec<Stop>,
}

impl Trip {
    /// Start coordinate, preferring the numeric columns over the text form.
    #[must_use]
    pub fn start_coordinate(&self) -> Option<Coordinate> {
        if let (Some(lat), Some(lng)) = (self.start_location_lat, self.start_location_long) {
            if let Ok(coordinate) = Coordinate::new(lat, lng) {
                return Some(coordinate);
            }
        }
        self.start_location.as_deref()?.parse().ok()
    }

    /// Order value for the next stop appended to this trip.
    #[must_use]
    pub fn next_stop_order(&self) -> u32 {
        self.stops
            .iter()
            .map(|stop| stop.order)
            .max()
            .map_or(1, |order| order.saturating_add(1))
    }

    /// End location, with blank values treated as absent.
    #[must_use]
    pub fn end_location(&self) -> Option<&str> {
        self.end_location
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Payload for `POST /api/trips/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTrip {
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "serialize_display")]
    pub start_location: Coordinate,
    pub end_location: Option<String>,
}

fn serialize_display<S: Serializer>(value: &Coordinate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
