//! # pawhotel-database
//!
//! The collaborator contracts the booking core reads and writes through
//! ([`store`]), their PostgreSQL implementations ([`repositories`]), and
//! an in-memory implementation for single-node use and tests
//! ([`memory`]).

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{AnimalDirectory, KennelInventory, ReservationSink, ReservationSource};
