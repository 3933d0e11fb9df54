//! Configuration types for the scanning and routing pipelines.

pub mod detour;
pub mod scan;

pub use detour::DetourConfig;
pub use scan::ScanConfig;
