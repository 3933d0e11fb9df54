//! CLI mode for scanning and detour ranking.

use crate::config::{CaptureConfig, DetourRunConfig};
use crate::ocr::{build_scan_service, ScanResponse};
use gasly::routing::{
    render_closest, render_table, site_label, DetourCalculator, DetourResult, DistanceUnit,
    FuelAdvisor, FuelDecision, GoogleDistanceMatrix, Location, TravelMode,
};
use gasly::vision::ScanOutcome;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Capture a single frame and print what was found
pub async fn run_scan(
    config: &CaptureConfig,
    output_format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();

    let service = Arc::new(build_scan_service(config)?);
    let init_time = start.elapsed();
    info!("Scan service initialized in {:.2}ms", init_time.as_secs_f64() * 1000.0);

    let scan_start = Instant::now();
    let outcome = service.scan_blocking().await?;
    info!(
        "Scan completed in {:.2}ms",
        scan_start.elapsed().as_secs_f64() * 1000.0
    );

    match output_format {
        "json" => {
            let response = ScanResponse::from_outcome(outcome);
            println!("{}", serde_json::to_string(&response)?);
        }
        _ => print!("{}", format_scan(&outcome)),
    }

    Ok(())
}

/// Human readable scan report
fn format_scan(outcome: &ScanOutcome) -> String {
    let mut out = String::from("\n=== Scan Results ===\n");

    match outcome {
        ScanOutcome::Found(selection) => {
            out.push_str(&format!("Numbers found: {}\n", selection.all_numbers.len()));
            for (idx, candidate) in selection.all_numbers.iter().enumerate() {
                out.push_str(&format!(
                    "[{}] \"{}\" ({:.1}%)\n",
                    idx + 1,
                    candidate.value,
                    candidate.confidence * 100.0
                ));
            }
            out.push_str(&format!(
                "\nBest: {} (confidence: {:.2})\n",
                selection.number, selection.confidence
            ));
        }
        other => {
            out.push_str(other.message().unwrap_or_default());
            out.push('\n');
        }
    }

    out
}

/// A ranked site with the optional fuel verdict
#[derive(Debug, Serialize)]
struct RankedDetour {
    rank: usize,
    #[serde(flatten)]
    detour: DetourResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    fuel_decision: Option<FuelDecision>,
}

/// JSON report for a detour run
#[derive(Debug, Serialize)]
struct DetourReport {
    start: Location,
    end: Location,
    mode: TravelMode,
    unit: DistanceUnit,
    evaluated: usize,
    detours: Vec<RankedDetour>,
}

/// Rank the configured sites and print the report
pub async fn run_detour(
    config: &DetourRunConfig,
    output_format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let provider = GoogleDistanceMatrix::with_timeout(&config.api_key, config.timeout)?;
    let calculator = DetourCalculator::with_config(provider, config.detour.clone());

    let start = Instant::now();
    let detours = calculator
        .rank(&config.start, &config.end, &config.sites, config.mode)
        .await;
    info!(
        "Ranked {} of {} sites in {:.2}ms",
        detours.len(),
        config.sites.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    match output_format {
        "json" => {
            let report = DetourReport {
                start: config.start.clone(),
                end: config.end.clone(),
                mode: config.mode,
                unit: config.unit,
                evaluated: config.sites.len(),
                detours: rank_with_fuel(detours, config.fuel.as_ref()),
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        _ => print!("{}", format_detours(&detours, config.unit, config.fuel.as_ref())),
    }

    Ok(())
}

fn rank_with_fuel(detours: Vec<DetourResult>, fuel: Option<&FuelAdvisor>) -> Vec<RankedDetour> {
    detours
        .into_iter()
        .enumerate()
        .map(|(idx, detour)| RankedDetour {
            rank: idx + 1,
            fuel_decision: fuel.map(|advisor| advisor.advise(detour.extra_distance_m)),
            detour,
        })
        .collect()
}

/// Table, closest-site summary and fuel verdicts as plain text
fn format_detours(
    detours: &[DetourResult],
    unit: DistanceUnit,
    fuel: Option<&FuelAdvisor>,
) -> String {
    let mut out = render_table(detours, unit);

    if let Some(closest) = detours.first() {
        out.push('\n');
        out.push_str(&render_closest(closest, unit));
    }

    if let Some(advisor) = fuel {
        if !detours.is_empty() {
            out.push_str(&format!(
                "\nFuel ({:.0} L at {:.1} on route = {:.2}):\n",
                advisor.fill_litres,
                advisor.path_price,
                advisor.path_cost()
            ));
        }
        for detour in detours {
            let verdict = match advisor.advise(detour.extra_distance_m) {
                FuelDecision::StayOnPath => "stay on route, the station on the path is cheaper",
                FuelDecision::TakeDetour => {
                    "take the detour, cheaper fuel pays for the extra distance"
                }
                FuelDecision::DetourNotWorthIt => {
                    "skip, the extra distance costs more than it saves"
                }
            };
            out.push_str(&format!(
                "  {:<40} {:.2} -> {}\n",
                site_label(&detour.site),
                advisor.detour_cost(detour.extra_distance_m),
                verdict
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasly::routing::Measurement;
    use gasly::vision::{NumberSelection, NumericCandidate};

    fn detour(site: &str, to_site: i64, from_site: i64) -> DetourResult {
        DetourResult::from_legs(
            Location::from(site),
            Measurement::new(100_000, 3_600),
            Measurement::new(to_site, 1_800),
            Measurement::new(from_site, 1_800),
        )
    }

    #[test]
    fn test_format_scan_found() {
        let text = format_scan(&ScanOutcome::Found(NumberSelection {
            number: "7".to_string(),
            confidence: 0.9,
            all_numbers: vec![
                NumericCandidate {
                    value: "12".to_string(),
                    confidence: 0.6,
                },
                NumericCandidate {
                    value: "7".to_string(),
                    confidence: 0.9,
                },
            ],
        }));
        assert!(text.contains("Numbers found: 2"));
        assert!(text.contains("[1] \"12\" (60.0%)"));
        assert!(text.contains("Best: 7 (confidence: 0.90)"));
    }

    #[test]
    fn test_format_scan_nothing_found() {
        let text = format_scan(&ScanOutcome::NoNumbers);
        assert!(text.ends_with("No numbers detected in the frame\n"));
    }

    #[test]
    fn test_fuel_verdicts_follow_ranking() {
        let detours = vec![detour("Near", 50_000, 52_000), detour("Far", 90_000, 50_000)];
        let advisor = FuelAdvisor::new(160.0, 150.0);

        let ranked = rank_with_fuel(detours.clone(), Some(&advisor));
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].fuel_decision, Some(FuelDecision::TakeDetour));
        assert_eq!(ranked[1].fuel_decision, Some(FuelDecision::DetourNotWorthIt));

        let text = format_detours(&detours, DistanceUnit::Km, Some(&advisor));
        assert!(text.contains("Closest site (smallest detour):"));
        assert!(text.contains("take the detour"));
        assert!(text.contains("skip, the extra distance"));
    }

    #[test]
    fn test_ranked_detour_json_is_flat() {
        let ranked = rank_with_fuel(vec![detour("Near", 50_000, 52_000)], None);
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["rank"], 1);
        assert_eq!(value["site"], "Near");
        assert_eq!(value["extra_distance_m"], 2_000);
        assert!(value.get("fuel_decision").is_none());
    }
}
