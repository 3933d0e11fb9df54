//! Route detour ranking.
//!
//! [`detour::DetourCalculator`] asks a [`provider::DistanceProvider`] for the
//! direct route and the two legs through each candidate site, then ranks the
//! sites by the distance they add. [`report`] renders the ranking and
//! [`fuel`] decides whether a detour to cheaper fuel pays off.

pub mod detour;
pub mod fake;
pub mod fuel;
pub mod google;
pub mod provider;
pub mod report;

pub use detour::{DetourCalculator, DetourResult, DistanceUnit};
pub use fuel::{FuelAdvisor, FuelDecision};
pub use google::GoogleDistanceMatrix;
pub use provider::{DistanceProvider, Location, Measurement, TravelMode};
pub use report::{render_closest, render_table, site_label};
