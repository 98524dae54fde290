//! Kennel inventory entities.

pub mod accommodation;
pub mod model;

pub use accommodation::AccommodationType;
pub use model::KennelUnit;
