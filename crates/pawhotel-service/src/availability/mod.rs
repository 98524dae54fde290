//! Kennel availability: which units are occupied or free for a stay.

pub mod resolver;
pub mod scan;

pub use resolver::AvailabilityResolver;
pub use scan::{free_from, occupied_in};
