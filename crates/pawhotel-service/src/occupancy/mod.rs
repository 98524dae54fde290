//! Per-type occupancy for a single night.

pub mod snapshot;

pub use snapshot::{OccupancyRow, OccupancyService};
