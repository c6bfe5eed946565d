//! Map coordinate model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A latitude/longitude pair picked on the map.
///
/// Rendered and parsed in the `"lat, lng"` text form the trip API stores in
/// `start_location`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the WGS84 ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidInput(format!(
                "latitude {latitude} must be between -90 and 90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidInput(format!(
                "longitude {longitude} must be between -180 and 180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidInput(format!("expected \"lat, lng\", got \"{s}\"")))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|error| Error::InvalidInput(format!("invalid latitude \"{lat}\": {error}")))?;
        let longitude = lng.trim().parse::<f64>().map_err(|error| {
            Error::InvalidInput(format!("invalid longitude \"{lng}\": {error}"))
        })?;
        Self::new(latitude, longitude)
    }
}
