//! Kennel inventory service.

use std::sync::Arc;

use tracing::info;

use pawhotel_core::events::InventoryEvent;
use pawhotel_core::result::AppResult;
use pawhotel_database::store::KennelInventory;
use pawhotel_entity::kennel::{AccommodationType, KennelUnit};

use crate::context::RequestContext;
use crate::events::EventPublisher;

/// Provisions and describes kennel units.
#[derive(Clone)]
pub struct KennelService {
    inventory: Arc<dyn KennelInventory>,
    events: EventPublisher,
}

impl std::fmt::Debug for KennelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KennelService").finish_non_exhaustive()
    }
}

impl KennelService {
    /// Creates a new kennel service.
    pub fn new(inventory: Arc<dyn KennelInventory>, events: EventPublisher) -> Self {
        Self { inventory, events }
    }

    /// Provision unit `number` of `accommodation_type`.
    pub async fn add_unit(
        &self,
        ctx: &RequestContext,
        accommodation_type: AccommodationType,
        number: i32,
        description: impl Into<String>,
    ) -> AppResult<KennelUnit> {
        let unit = KennelUnit::new(accommodation_type, number, description)?;
        self.inventory.add_kennel_unit(&unit).await?;

        info!(
            operator = %ctx.operator,
            accommodation_type = %accommodation_type,
            kennel_number = number,
            "Kennel unit added"
        );
        self.events.publish(
            ctx,
            InventoryEvent::UnitAdded {
                accommodation_type: accommodation_type.to_string(),
                number,
            },
        );
        Ok(unit)
    }

    /// Replace a unit's description.
    pub async fn describe(
        &self,
        ctx: &RequestContext,
        accommodation_type: AccommodationType,
        number: i32,
        description: &str,
    ) -> AppResult<()> {
        self.inventory
            .update_kennel_description(accommodation_type, number, description)
            .await?;

        info!(
            operator = %ctx.operator,
            accommodation_type = %accommodation_type,
            kennel_number = number,
            "Kennel unit described"
        );
        self.events.publish(
            ctx,
            InventoryEvent::UnitDescribed {
                accommodation_type: accommodation_type.to_string(),
                number,
                description: description.to_string(),
            },
        );
        Ok(())
    }

    /// List units, optionally of one type.
    pub async fn list(
        &self,
        accommodation_type: Option<AccommodationType>,
    ) -> AppResult<Vec<KennelUnit>> {
        self.inventory.list_kennel_units(accommodation_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pawhotel_core::error::ErrorKind;
    use pawhotel_core::events::EventPayload;
    use pawhotel_database::MemoryStore;

    #[tokio::test]
    async fn test_add_describe_and_list() {
        let events = EventPublisher::new();
        let mut rx = events.subscribe();
        let service = KennelService::new(Arc::new(MemoryStore::new()), events);
        let ctx = RequestContext::new("front-desk");

        service
            .add_unit(&ctx, AccommodationType::Cattery, 2, "")
            .await
            .expect("add");
        service
            .describe(&ctx, AccommodationType::Cattery, 2, "Window perch")
            .await
            .expect("describe");

        let units = service.list(Some(AccommodationType::Cattery)).await.expect("list");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].description, "Window perch");

        let first = rx.recv().await.expect("event");
        assert_eq!(first.actor.as_deref(), Some("front-desk"));
        assert!(matches!(
            first.payload,
            EventPayload::Inventory(InventoryEvent::UnitAdded { number: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_bad_and_duplicate_units() {
        let service = KennelService::new(Arc::new(MemoryStore::new()), EventPublisher::new());
        let ctx = RequestContext::system();

        let err = service
            .add_unit(&ctx, AccommodationType::IndoorKennel, 0, "")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        service
            .add_unit(&ctx, AccommodationType::IndoorKennel, 1, "")
            .await
            .expect("add");
        let err = service
            .add_unit(&ctx, AccommodationType::IndoorKennel, 1, "")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));

        let err = service
            .describe(&ctx, AccommodationType::OutdoorKennel, 1, "Shade")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
