//! # pawhotel-service
//!
//! Business logic for PawHotel. The availability resolver answers which
//! kennel units are free; pricing derives day counts and totals; the
//! reservation service drives the booking lifecycle on top of both.
//!
//! Services follow constructor injection: every collaborator is passed in
//! as an `Arc<dyn Trait>` from `pawhotel-database`.

pub mod animal;
pub mod availability;
pub mod context;
pub mod events;
pub mod kennel;
pub mod occupancy;
pub mod pricing;
pub mod reservation;

pub use animal::AnimalService;
pub use availability::AvailabilityResolver;
pub use context::RequestContext;
pub use events::EventPublisher;
pub use kennel::KennelService;
pub use occupancy::{OccupancyRow, OccupancyService};
pub use pricing::{RateCard, Totals, compute_totals, recompute_for_early_checkout};
pub use reservation::{
    AddOnRequest, CreateReservationRequest, Quote, QuoteRequest, ReservationService,
    UpdateReservationRequest,
};
