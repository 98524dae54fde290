//! Kennel inventory events.

use serde::{Deserialize, Serialize};

/// Events related to kennel unit provisioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InventoryEvent {
    /// A kennel unit was provisioned.
    UnitAdded {
        /// Accommodation type.
        accommodation_type: String,
        /// Unit number.
        number: i32,
    },
    /// A kennel unit's description changed.
    UnitDescribed {
        /// Accommodation type.
        accommodation_type: String,
        /// Unit number.
        number: i32,
        /// New description.
        description: String,
    },
}
