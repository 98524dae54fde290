//! Domain events emitted by PawHotel operations.
//!
//! Events are published by the service layer after a write succeeds and
//! consumed by whoever subscribes (dashboards, audit sinks, tests).

pub mod inventory;
pub mod reservation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use inventory::InventoryEvent;
pub use reservation::ReservationEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The operator who caused the event (if known).
    pub actor: Option<String>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A reservation lifecycle event.
    Reservation(ReservationEvent),
    /// A kennel inventory event.
    Inventory(InventoryEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor: Option<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor,
            payload,
        }
    }
}

impl From<ReservationEvent> for EventPayload {
    fn from(event: ReservationEvent) -> Self {
        Self::Reservation(event)
    }
}

impl From<InventoryEvent> for EventPayload {
    fn from(event: InventoryEvent) -> Self {
        Self::Inventory(event)
    }
}
