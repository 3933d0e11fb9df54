//! Fake distance provider for testing.
//!
//! Routes are looked up by the query form of origin and destination, so tests
//! run without network access or an API key.

use crate::core::{RouteError, RouteResult};
use crate::routing::provider::{DistanceProvider, Location, Measurement, TravelMode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A distance provider answering from a fixed table.
///
/// Unknown pairs fail with a `NOT_FOUND` status. The travel mode is ignored.
#[derive(Debug, Default)]
pub struct FakeDistanceProvider {
    routes: HashMap<(String, String), Result<Measurement, String>>,
    delays: HashMap<(String, String), Duration>,
    calls: AtomicUsize,
}

impl FakeDistanceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful measurement for `origin -> destination`.
    pub fn with_route(
        mut self,
        origin: &str,
        destination: &str,
        meters: i64,
        seconds: i64,
    ) -> Self {
        self.routes.insert(
            Self::key(origin, destination),
            Ok(Measurement::new(meters, seconds)),
        );
        self
    }

    /// Register a failing element status for `origin -> destination`.
    pub fn with_failure(mut self, origin: &str, destination: &str, status: &str) -> Self {
        self.routes
            .insert(Self::key(origin, destination), Err(status.to_string()));
        self
    }

    /// Make `origin -> destination` answer only after `delay`.
    pub fn with_delay(mut self, origin: &str, destination: &str, delay: Duration) -> Self {
        self.delays.insert(Self::key(origin, destination), delay);
        self
    }

    /// Number of measurements requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn key(origin: &str, destination: &str) -> (String, String) {
        (
            Location::from(origin).as_query(),
            Location::from(destination).as_query(),
        )
    }
}

#[async_trait]
impl DistanceProvider for FakeDistanceProvider {
    async fn measure(
        &self,
        origin: &Location,
        destination: &Location,
        _mode: TravelMode,
    ) -> RouteResult<Measurement> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let key = (origin.as_query(), destination.as_query());
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }

        let status = match self.routes.get(&key) {
            Some(Ok(measurement)) => return Ok(*measurement),
            Some(Err(status)) => status.clone(),
            None => "NOT_FOUND".to_string(),
        };

        Err(RouteError::NoRoute {
            origin: origin.to_string(),
            destination: destination.to_string(),
            status,
        })
    }
}
