//! PostgreSQL implementations of the ledger and inventory contracts.

pub mod animal;
pub mod kennel;
pub mod reservation;

pub use animal::AnimalRepository;
pub use kennel::KennelRepository;
pub use reservation::ReservationRepository;
