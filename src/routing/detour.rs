//! Detour evaluation and ranking.
//!
//! For every candidate site the calculator measures the direct route, the leg
//! to the site and the leg from the site, then reports how much distance and
//! time the stop adds. Sites whose measurements fail are dropped from the
//! ranking, never raised to the caller.

use crate::core::constants::{METERS_PER_KM, METERS_PER_MILE};
use crate::core::{DetourConfig, RouteResult};
use crate::routing::provider::{DistanceProvider, Location, Measurement, TravelMode};
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Unit used when presenting distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

impl DistanceUnit {
    /// Convert meters into this unit.
    pub fn from_meters(&self, meters: i64) -> f64 {
        match self {
            DistanceUnit::Km => meters as f64 / METERS_PER_KM,
            DistanceUnit::Miles => meters as f64 / METERS_PER_MILE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Miles => "miles",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "km" => Ok(DistanceUnit::Km),
            "miles" | "mi" => Ok(DistanceUnit::Miles),
            other => Err(format!("unknown unit '{}', expected km or miles", other)),
        }
    }
}

/// How much a stop at `site` adds to the direct route.
///
/// Distances are meters and durations are seconds, exactly as reported by the
/// provider. Extra values are not clamped and can be negative when the
/// provider returns a shorter via-route than the direct one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetourResult {
    pub site: Location,
    pub direct_distance_m: i64,
    pub direct_duration_s: i64,
    pub start_to_site_m: i64,
    pub site_to_end_m: i64,
    pub detour_distance_m: i64,
    pub detour_duration_s: i64,
    pub extra_distance_m: i64,
    pub extra_duration_s: i64,
}

impl DetourResult {
    /// Combine the three legs into a detour result.
    pub fn from_legs(
        site: Location,
        direct: Measurement,
        start_to_site: Measurement,
        site_to_end: Measurement,
    ) -> Self {
        let detour_distance_m = start_to_site.distance_meters + site_to_end.distance_meters;
        let detour_duration_s = start_to_site.duration_seconds + site_to_end.duration_seconds;

        Self {
            site,
            direct_distance_m: direct.distance_meters,
            direct_duration_s: direct.duration_seconds,
            start_to_site_m: start_to_site.distance_meters,
            site_to_end_m: site_to_end.distance_meters,
            detour_distance_m,
            detour_duration_s,
            extra_distance_m: detour_distance_m - direct.distance_meters,
            extra_duration_s: detour_duration_s - direct.duration_seconds,
        }
    }

    pub fn direct_distance(&self, unit: DistanceUnit) -> f64 {
        unit.from_meters(self.direct_distance_m)
    }

    pub fn detour_distance(&self, unit: DistanceUnit) -> f64 {
        unit.from_meters(self.detour_distance_m)
    }

    pub fn extra_distance(&self, unit: DistanceUnit) -> f64 {
        unit.from_meters(self.extra_distance_m)
    }

    pub fn direct_minutes(&self) -> f64 {
        self.direct_duration_s as f64 / 60.0
    }

    pub fn extra_minutes(&self) -> f64 {
        self.extra_duration_s as f64 / 60.0
    }
}

/// Ranks candidate sites by the detour they add between two points.
pub struct DetourCalculator<P> {
    provider: P,
    config: DetourConfig,
}

impl<P: DistanceProvider> DetourCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, DetourConfig::default())
    }

    pub fn with_config(provider: P, config: DetourConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Evaluate a single site. Stops at the first failed measurement.
    pub async fn evaluate(
        &self,
        start: &Location,
        end: &Location,
        site: &Location,
        mode: TravelMode,
    ) -> RouteResult<DetourResult> {
        let direct = self.provider.measure(start, end, mode).await?;
        let start_to_site = self.provider.measure(start, site, mode).await?;
        let site_to_end = self.provider.measure(site, end, mode).await?;

        Ok(DetourResult::from_legs(
            site.clone(),
            direct,
            start_to_site,
            site_to_end,
        ))
    }

    /// Evaluate every site and sort by extra distance, smallest first.
    ///
    /// Failed sites are logged and left out. Ties keep input order.
    pub async fn rank(
        &self,
        start: &Location,
        end: &Location,
        sites: &[Location],
        mode: TravelMode,
    ) -> Vec<DetourResult> {
        let total = sites.len();
        info!("Calculating detours from '{}' to '{}'...", start, end);
        info!("Checking {} sites...", total);

        let evaluated: Vec<Option<DetourResult>> = stream::iter(sites.iter().enumerate())
            .map(|(idx, site)| async move {
                info!("Processing site {}/{}: {}", idx + 1, total, site);
                match self.evaluate(start, end, site, mode).await {
                    Ok(detour) => Some(detour),
                    Err(e) => {
                        warn!(
                            site = %site,
                            error = %e,
                            "Skipping site, detour could not be evaluated"
                        );
                        None
                    }
                }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut detours: Vec<DetourResult> = evaluated.into_iter().flatten().collect();
        detours.sort_by_key(|detour| detour.extra_distance_m);

        info!(
            ranked = detours.len(),
            skipped = total - detours.len(),
            "Detour ranking complete"
        );
        detours
    }
}
