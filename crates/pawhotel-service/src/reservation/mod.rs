//! Reservation lifecycle: quote, create, edit, checkout, cancel, delete.

pub mod request;
pub mod service;

pub use crate::pricing::rates::AddOnRequest;
pub use request::{CreateReservationRequest, Quote, QuoteRequest, UpdateReservationRequest};
pub use service::ReservationService;
