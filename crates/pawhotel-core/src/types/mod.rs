//! Core type definitions used across the PawHotel workspace.

pub mod id;
pub mod money;

pub use id::*;
pub use money::Money;
