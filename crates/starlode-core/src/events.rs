//! Events emitted by the simulation for audio and HUD feedback.
//!
//! The core emits discrete named events; how they are rendered or
//! sounded is entirely up to the subscriber.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Game events drained by the frontend after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A weapon discharged (one event per laser activation or shot).
    WeaponFired { weapon: WeaponKind },
    /// The equipped weapon hit its heat ceiling.
    Overheated,
    /// Something took a hit.
    Impact { kind: ImpactKind },
    /// Something was destroyed.
    Exploded { kind: ExplosionKind },
    /// An item was collected.
    Pickup { category: PickupCategory },
    /// A resource bar crossed its low threshold (edge-triggered).
    LowResource { resource: ResourceKind },
    /// The ship crossed outside the level border.
    OutsideBorder,
    /// A pirate base went on alert.
    BaseAggroed,
    /// The death sequence began.
    PlayerDied,
}
