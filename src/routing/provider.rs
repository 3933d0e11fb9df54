//! Distance provider seam and the value types it works with.

use crate::core::RouteResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the map: either a free-form address or a coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Coordinates { lat: f64, lng: f64 },
    Address(String),
}

impl Location {
    pub fn address(address: impl Into<String>) -> Self {
        Location::Address(address.into())
    }

    pub fn coordinates(lat: f64, lng: f64) -> Self {
        Location::Coordinates { lat, lng }
    }

    /// The form distance APIs accept: the address itself, or `lat,lng`.
    pub fn as_query(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Coordinates { lat, lng } => write!(f, "{},{}", lat, lng),
            Location::Address(address) => f.write_str(address),
        }
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    /// `"lat,lng"` with two numeric parts is a coordinate pair; anything else is an address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((lat, lng)) = trimmed.split_once(',') {
            if let (Ok(lat), Ok(lng)) = (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
                if lat.is_finite() && lng.is_finite() {
                    return Ok(Location::Coordinates { lat, lng });
                }
            }
        }
        Ok(Location::Address(trimmed.to_string()))
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(location) => location,
            Err(never) => match never {},
        }
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Location::Coordinates { lat, lng }
    }
}

/// How the route is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(format!(
                "unknown travel mode '{}', expected driving, walking, bicycling or transit",
                other
            )),
        }
    }
}

/// Distance and travel time between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub distance_meters: i64,
    pub duration_seconds: i64,
}

impl Measurement {
    pub fn new(distance_meters: i64, duration_seconds: i64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
        }
    }
}

/// Anything that can measure the route between two points.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Measure the route from `origin` to `destination`.
    async fn measure(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TravelMode,
    ) -> RouteResult<Measurement>;
}

#[async_trait]
impl<T: DistanceProvider + ?Sized> DistanceProvider for std::sync::Arc<T> {
    async fn measure(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TravelMode,
    ) -> RouteResult<Measurement> {
        (**self).measure(origin, destination, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parsing() {
        assert_eq!(
            Location::from("40.7128, -74.0060"),
            Location::coordinates(40.7128, -74.006)
        );
        assert_eq!(
            Location::from("Boston, MA"),
            Location::address("Boston, MA")
        );
        assert_eq!(Location::from(" Hartford "), Location::address("Hartford"));
    }

    #[test]
    fn test_location_query_form() {
        assert_eq!(Location::coordinates(41.5, -72.25).as_query(), "41.5,-72.25");
        assert_eq!(Location::address("New Haven, CT").as_query(), "New Haven, CT");
    }

    #[test]
    fn test_location_json_shapes() {
        let parsed: Vec<Location> =
            serde_json::from_str(r#"["Providence, RI", {"lat": 41.76, "lng": -72.67}]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Location::address("Providence, RI"),
                Location::coordinates(41.76, -72.67)
            ]
        );
    }

    #[test]
    fn test_travel_mode_round_trip() {
        assert_eq!("Walking".parse::<TravelMode>(), Ok(TravelMode::Walking));
        assert_eq!(TravelMode::default().to_string(), "driving");
        assert!("teleport".parse::<TravelMode>().is_err());
    }
}
