//! The inventory item vocabulary.
//!
//! Items are a tagged union per domain object instead of optional-field
//! records; pickup and HUD boundaries match exhaustively.

use serde::{Deserialize, Serialize};

use crate::enums::{OreKind, PickupCategory, WeaponKind};

/// An inventory item. Charged items carry their remaining charge inline;
/// stackable items are counted by the slot's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Item {
    /// Powers weapons. Drained by firing.
    EnergyCell { charge: f64 },
    /// Refuels the ship when used.
    FuelTank { fuel: f64 },
    /// Refills oxygen when used.
    OxygenTank { oxygen: f64 },
    /// Restores hull health when used.
    RepairKit { health: f64 },
    Weapon { kind: WeaponKind },
    Ore { kind: OreKind },
    Scrap,
    WarpKey,
}

impl Item {
    /// Maximum quantity of this item per inventory slot.
    pub fn stack_max(&self) -> u32 {
        match self {
            Item::Ore { .. } | Item::Scrap => 100,
            Item::WarpKey => 10,
            Item::EnergyCell { .. }
            | Item::FuelTank { .. }
            | Item::OxygenTank { .. }
            | Item::RepairKit { .. }
            | Item::Weapon { .. } => 1,
        }
    }

    /// Whether this item goes through the stacking add path on pickup.
    /// Charged items and weapons each occupy their own slot.
    pub fn is_stackable(&self) -> bool {
        self.stack_max() > 1
    }

    /// Whether two items can share a slot.
    pub fn stacks_with(&self, other: &Item) -> bool {
        self.is_stackable() && self == other
    }

    /// Category for pickup feedback events.
    pub fn pickup_category(&self) -> PickupCategory {
        match self {
            Item::Ore { .. } => PickupCategory::Ore,
            Item::Scrap => PickupCategory::Scrap,
            Item::WarpKey => PickupCategory::Key,
            Item::Weapon { .. } => PickupCategory::Weapon,
            Item::EnergyCell { .. }
            | Item::FuelTank { .. }
            | Item::OxygenTank { .. }
            | Item::RepairKit { .. } => PickupCategory::Charge,
        }
    }
}
