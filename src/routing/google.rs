//! Google Maps Distance Matrix provider.

use crate::core::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::core::{RouteError, RouteResult};
use crate::routing::provider::{DistanceProvider, Location, Measurement, TravelMode};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Top-level Distance Matrix response.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

/// One origin/destination cell.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

/// A `{ "text": ..., "value": ... }` pair; `value` is meters or seconds.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    pub value: i64,
    #[serde(default)]
    pub text: String,
}

impl DistanceMatrixResponse {
    /// Extract the single-cell measurement, failing on any non-OK status.
    pub fn into_measurement(
        self,
        origin: &Location,
        destination: &Location,
    ) -> RouteResult<Measurement> {
        if self.status != "OK" {
            return Err(RouteError::Rejected {
                status: self.status,
                message: self.error_message,
            });
        }

        let element = self
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| RouteError::Malformed("response has no elements".to_string()))?;

        if element.status != "OK" {
            return Err(RouteError::NoRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
                status: element.status,
            });
        }

        match (element.distance, element.duration) {
            (Some(distance), Some(duration)) => {
                Ok(Measurement::new(distance.value, duration.value))
            }
            _ => Err(RouteError::Malformed(
                "element is missing distance or duration".to_string(),
            )),
        }
    }
}

/// Distance provider backed by the Distance Matrix HTTP API.
#[derive(Clone)]
pub struct GoogleDistanceMatrix {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoogleDistanceMatrix {
    /// Create a client with the default timeout.
    pub fn new(api_key: impl Into<String>) -> RouteResult<Self> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> RouteResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different host (proxies, test servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/maps/api/distancematrix/json", self.base_url)
    }
}

#[async_trait]
impl DistanceProvider for GoogleDistanceMatrix {
    async fn measure(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TravelMode,
    ) -> RouteResult<Measurement> {
        let origins = origin.as_query();
        let destinations = destination.as_query();

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("mode", mode.as_str()),
                ("units", "metric"),
                ("departure_time", "now"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RouteError::HttpStatus(response.status()));
        }

        let body: DistanceMatrixResponse = response.json().await?;
        let measurement = body.into_measurement(origin, destination)?;

        debug!(
            origin = %origin,
            destination = %destination,
            mode = %mode,
            meters = measurement.distance_meters,
            seconds = measurement.duration_seconds,
            "Distance measured"
        );

        Ok(measurement)
    }
}
