//! Plain-text rendering of ranked detours.

use crate::routing::detour::{DetourResult, DistanceUnit};
use crate::routing::provider::Location;
use std::fmt::Write;

const RULE_WIDTH: usize = 100;
const SITE_LABEL_CHARS: usize = 38;

/// Short label for a site: coordinates to 4 decimals, addresses truncated.
pub fn site_label(site: &Location) -> String {
    match site {
        Location::Coordinates { lat, lng } => format!("({:.4}, {:.4})", lat, lng),
        Location::Address(address) => address.chars().take(SITE_LABEL_CHARS).collect(),
    }
}

/// Render the ranked detours as a table.
///
/// The direct route line is taken from the first result; every result in a
/// ranking shares the same start and end. Extra distance and time always carry
/// their sign, so a shorter via-route shows as `-0.30 km`.
pub fn render_table(detours: &[DetourResult], unit: DistanceUnit) -> String {
    let Some(first) = detours.first() else {
        return "No detours calculated.\n".to_string();
    };

    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let label = unit.label();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "\n{}", heavy);
    let _ = writeln!(out, "DETOUR ANALYSIS RESULTS");
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(
        out,
        "\nDirect Route: {:.2} {} ({:.1} minutes)",
        first.direct_distance(unit),
        label,
        first.direct_minutes()
    );
    let _ = writeln!(out, "\n{}", light);
    let _ = writeln!(
        out,
        "{:<4} {:<40} {:<15} {:<15} {:<15}",
        "#", "Site", "Detour", "Extra", "Time"
    );
    let _ = writeln!(out, "{}", light);

    for (idx, detour) in detours.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<40} {:.2} {:<8} {:+.2} {:<8} {:+.1} min",
            idx + 1,
            site_label(&detour.site),
            detour.detour_distance(unit),
            label,
            detour.extra_distance(unit),
            label,
            detour.extra_minutes()
        );
    }

    let _ = writeln!(out, "{}", heavy);
    out
}

/// Summary block for the best-ranked site.
pub fn render_closest(detour: &DetourResult, unit: DistanceUnit) -> String {
    format!(
        "Closest site (smallest detour):\n  Site: {}\n  Extra distance: {:.2} {}\n  Extra time: {:.1} minutes\n",
        site_label(&detour.site),
        detour.extra_distance(unit),
        unit.label(),
        detour.extra_minutes()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::provider::Measurement;

    fn detour(site: Location, to_site: i64, from_site: i64) -> DetourResult {
        DetourResult::from_legs(
            site,
            Measurement::new(100_000, 3_600),
            Measurement::new(to_site, 2_400),
            Measurement::new(from_site, 1_800),
        )
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(
            render_table(&[], DistanceUnit::Km),
            "No detours calculated.\n"
        );
    }

    #[test]
    fn test_table_layout() {
        let rows = vec![
            detour(Location::address("Hartford, CT"), 60_000, 45_000),
            detour(Location::coordinates(41.76581234, -72.67341234), 70_000, 50_000),
        ];
        let table = render_table(&rows, DistanceUnit::Km);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[1], "=".repeat(100));
        assert_eq!(lines[2], "DETOUR ANALYSIS RESULTS");
        assert!(table.contains("Direct Route: 100.00 km (60.0 minutes)"));
        assert!(table.contains(&format!(
            "{:<4} {:<40} {:<15} {:<15} {:<15}",
            "#", "Site", "Detour", "Extra", "Time"
        )));
        assert!(table.contains(&format!(
            "1    {:<40} 105.00 km       +5.00 km       +10.0 min",
            "Hartford, CT"
        )));
        assert!(table.contains("(41.7658, -72.6734)"));
        assert!(table.ends_with(&format!("{}\n", "=".repeat(100))));
    }

    #[test]
    fn test_long_addresses_are_truncated() {
        let long = Location::address("1600 Amphitheatre Parkway, Mountain View, California");
        assert_eq!(site_label(&long).chars().count(), 38);
    }

    #[test]
    fn test_closest_summary_in_miles() {
        let best = detour(Location::address("Worcester, MA"), 60_000, 56_093);
        let summary = render_closest(&best, DistanceUnit::Miles);
        assert!(summary.starts_with("Closest site (smallest detour):"));
        assert!(summary.contains("  Site: Worcester, MA"));
        assert!(summary.contains("  Extra distance: 10.00 miles"));
        assert!(summary.contains("  Extra time: 10.0 minutes"));
    }

    #[test]
    fn test_closest_uses_table_site_label() {
        let best = detour(Location::coordinates(41.5, -72.25), 60_000, 45_000);
        let summary = render_closest(&best, DistanceUnit::Km);
        assert!(summary.contains("  Site: (41.5000, -72.2500)\n"));
        assert!(render_table(&[best], DistanceUnit::Km).contains("(41.5000, -72.2500)"));
    }

    #[test]
    fn test_negative_extra_keeps_single_sign() {
        let shortcut = DetourResult::from_legs(
            Location::address("Shortcut"),
            Measurement::new(1_000, 600),
            Measurement::new(300, 240),
            Measurement::new(400, 330),
        );
        let table = render_table(&[shortcut], DistanceUnit::Km);
        assert!(table.contains(&format!(
            "1    {:<40} 0.70 km       -0.30 km       -0.5 min",
            "Shortcut"
        )));
        assert!(!table.contains("+-"));
    }
}
