//! Domain event fan-out.

use tokio::sync::broadcast;
use tracing::debug;

use pawhotel_core::events::{DomainEvent, EventPayload};

use crate::context::RequestContext;

/// Default buffer size for the event channel.
const DEFAULT_CAPACITY: usize = 256;

/// Publishes domain events to any number of subscribers.
///
/// Publishing never fails: with no subscribers the event is dropped.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventPublisher {
    /// Creates a publisher with the default buffer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a publisher buffering up to `capacity` events per subscriber.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Publish an event attributed to the context's operator.
    pub fn publish(&self, ctx: &RequestContext, payload: impl Into<EventPayload>) {
        let event = DomainEvent::new(Some(ctx.operator.clone()), payload.into());
        if self.tx.send(event).is_err() {
            debug!("No event subscribers");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
