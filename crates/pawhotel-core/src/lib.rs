//! # pawhotel-core
//!
//! Core crate for PawHotel. Contains configuration schemas, typed
//! identifiers, the [`Money`](types::Money) value type, domain events,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other PawHotel crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
