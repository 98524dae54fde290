//! Reservation domain entities.

pub mod filter;
pub mod model;
pub mod payment;
pub mod stay;
pub mod status;

pub use filter::ReservationFilter;
pub use model::{AddOn, Reservation};
pub use payment::PaymentMethod;
pub use stay::StayDates;
pub use status::ReservationStatus;
