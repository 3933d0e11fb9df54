//! Fuel price comparison for a detour to a different gas station.
//!
//! A detour is only worth it when the cheaper fuel at the detour station pays
//! for the extra fuel burnt getting there.

use serde::{Deserialize, Serialize};

/// Default tank fill, in litres.
pub const DEFAULT_FILL_LITRES: f64 = 50.0;

/// Default fuel economy, in kilometers per litre.
pub const DEFAULT_KM_PER_LITRE: f64 = 10.0;

/// Outcome of comparing the on-route station with the detour station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelDecision {
    /// The station on the route already has the cheaper price.
    StayOnPath,
    /// The detour station is cheaper even after the extra fuel.
    TakeDetour,
    /// The detour station is cheaper per litre but the extra driving eats the saving.
    DetourNotWorthIt,
}

impl FuelDecision {
    pub fn takes_detour(&self) -> bool {
        matches!(self, FuelDecision::TakeDetour)
    }
}

/// Prices and vehicle assumptions for the comparison.
///
/// Prices are per litre in any consistent currency unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelAdvisor {
    pub path_price: f64,
    pub detour_price: f64,
    #[serde(default = "FuelAdvisor::default_fill_litres")]
    pub fill_litres: f64,
    #[serde(default = "FuelAdvisor::default_km_per_litre")]
    pub km_per_litre: f64,
}

impl FuelAdvisor {
    pub fn new(path_price: f64, detour_price: f64) -> Self {
        Self {
            path_price,
            detour_price,
            fill_litres: Self::default_fill_litres(),
            km_per_litre: Self::default_km_per_litre(),
        }
    }

    pub fn with_fill_litres(mut self, fill_litres: f64) -> Self {
        self.fill_litres = fill_litres;
        self
    }

    pub fn with_km_per_litre(mut self, km_per_litre: f64) -> Self {
        self.km_per_litre = km_per_litre;
        self
    }

    /// Cost of a full fill at the on-route station.
    pub fn path_cost(&self) -> f64 {
        self.fill_litres * self.path_price
    }

    /// Cost of a full fill at the detour station plus the fuel the detour burns.
    pub fn detour_cost(&self, extra_distance_m: i64) -> f64 {
        let extra_litres = extra_distance_m as f64 / (self.km_per_litre * 1000.0);
        (extra_litres + self.fill_litres) * self.detour_price
    }

    /// Decide whether a detour adding `extra_distance_m` meters is worth taking.
    pub fn advise(&self, extra_distance_m: i64) -> FuelDecision {
        if self.path_price < self.detour_price {
            FuelDecision::StayOnPath
        } else if self.detour_cost(extra_distance_m) < self.path_cost() {
            FuelDecision::TakeDetour
        } else {
            FuelDecision::DetourNotWorthIt
        }
    }

    fn default_fill_litres() -> f64 {
        DEFAULT_FILL_LITRES
    }

    fn default_km_per_litre() -> f64 {
        DEFAULT_KM_PER_LITRE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cheaper_path_station_wins_outright() {
        let advisor = FuelAdvisor::new(155.9, 160.0);
        assert_eq!(advisor.advise(0), FuelDecision::StayOnPath);
        assert_eq!(advisor.advise(-500), FuelDecision::StayOnPath);
    }

    #[test]
    fn test_short_detour_to_cheaper_station_pays_off() {
        // 50 L * 160 = 8000 vs (0.5 L + 50 L) * 150 = 7575
        let advisor = FuelAdvisor::new(160.0, 150.0);
        assert_eq!(advisor.advise(5_000), FuelDecision::TakeDetour);
        assert!(advisor.advise(5_000).takes_detour());
        assert!((advisor.detour_cost(5_000) - 7575.0).abs() < 1e-9);
        assert!((advisor.path_cost() - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_detour_eats_the_saving() {
        // Needs > 3.33 L extra to lose: 40 km at 10 km/L is 4 L.
        let advisor = FuelAdvisor::new(160.0, 150.0);
        assert_eq!(advisor.advise(40_000), FuelDecision::DetourNotWorthIt);
    }

    #[test]
    fn test_equal_prices_never_detour() {
        let advisor = FuelAdvisor::new(150.0, 150.0);
        assert_eq!(advisor.advise(1), FuelDecision::DetourNotWorthIt);
    }

    #[test]
    fn test_vehicle_assumptions_are_configurable() {
        let advisor = FuelAdvisor::new(160.0, 150.0)
            .with_fill_litres(20.0)
            .with_km_per_litre(20.0);
        // 20 L * 160 = 3200 vs (1 L + 20 L) * 150 = 3150
        assert_eq!(advisor.advise(20_000), FuelDecision::TakeDetour);
    }
}
