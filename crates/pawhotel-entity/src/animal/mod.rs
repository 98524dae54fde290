//! Animal guest entities.

pub mod model;
pub mod species;

pub use model::{Animal, CreateAnimal};
pub use species::Species;
