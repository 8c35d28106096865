//! Fixed-capacity slot inventory with the shared add contract.
//!
//! Capacity is driven by the current ship kind. `add` stacks onto
//! existing slots up to each item's stack max before opening new slots
//! and reports the quantity that did not fit.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;
use crate::items::Item;

/// One occupied inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub item: Item,
    pub quantity: u32,
}

/// The player's hotbar/cargo slot array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<Option<Slot>>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Add `quantity` of `item`, stacking onto matching slots first, then
    /// opening empty slots. Returns the leftover quantity that did not fit
    /// (0 on full success).
    pub fn add(&mut self, item: Item, quantity: u32) -> u32 {
        let mut remaining = quantity;
        let stack_max = item.stack_max();

        // Top up existing stacks.
        for slot in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if slot.item.stacks_with(&item) && slot.quantity < stack_max {
                let take = remaining.min(stack_max - slot.quantity);
                slot.quantity += take;
                remaining -= take;
            }
        }

        // Open new slots.
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let take = remaining.min(stack_max);
                *slot = Some(Slot {
                    item,
                    quantity: take,
                });
                remaining -= take;
            }
        }

        remaining
    }

    /// Whether `add(item, quantity)` would fully succeed. Used to gate
    /// floating-item magnetism on inventory space.
    pub fn has_room_for(&self, item: &Item, quantity: u32) -> bool {
        let stack_max = item.stack_max();
        let mut capacity: u64 = 0;
        for slot in &self.slots {
            match slot {
                Some(s) if s.item.stacks_with(item) => {
                    capacity += (stack_max - s.quantity.min(stack_max)) as u64;
                }
                None => capacity += stack_max as u64,
                Some(_) => {}
            }
        }
        capacity >= quantity as u64
    }

    /// Place a non-stacking item into the first empty slot.
    pub fn place_in_empty(&mut self, item: Item) -> bool {
        for slot in self.slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(Slot { item, quantity: 1 });
                return true;
            }
        }
        false
    }

    /// Mutable access to the charge of the first energy cell holding at
    /// least `min_charge`. Firing is blocked when this returns `None`.
    pub fn first_cell_with_charge(&mut self, min_charge: f64) -> Option<&mut f64> {
        for slot in self.slots.iter_mut().flatten() {
            if let Item::EnergyCell { charge } = &mut slot.item {
                if *charge >= min_charge {
                    return Some(charge);
                }
            }
        }
        None
    }

    /// The weapon equipped in `slot`, if any.
    pub fn weapon_in_slot(&self, slot: usize) -> Option<WeaponKind> {
        match self.slots.get(slot)? {
            Some(Slot {
                item: Item::Weapon { kind },
                ..
            }) => Some(*kind),
            _ => None,
        }
    }

    /// Count of a specific stackable item across all slots.
    pub fn count_of(&self, item: &Item) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item == *item)
            .map(|s| s.quantity)
            .sum()
    }
}
