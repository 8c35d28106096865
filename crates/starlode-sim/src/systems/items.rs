//! Floating item drift, magnetism, and pickup.

use hecs::World;

use starlode_core::components::FloatingItem;
use starlode_core::constants::*;
use starlode_core::events::GameEvent;
use starlode_core::geometry::push_out_overlap;
use starlode_core::inventory::Inventory;
use starlode_core::state::Ship;
use starlode_core::types::{Position, Velocity};

use crate::world_setup;

const ITEM_RADIUS: f64 = 6.0;

/// Magnet pull, obstacle push-out, drag, and integration. Magnetism only
/// applies to items the inventory can actually take, so full cargo does
/// not vacuum items into the hull.
pub fn run(world: &mut World, ship: &Ship, inventory: &Inventory, dt: f64) {
    let obstacles = world_setup::collect_obstacles(world);
    let ship_pos = ship.pos.vec();

    for (_entity, (floating, pos, vel)) in
        world.query_mut::<(&FloatingItem, &mut Position, &mut Velocity)>()
    {
        let mut v = vel.vec();

        let to_ship = ship_pos - pos.vec();
        if to_ship.length() <= MAGNET_RANGE
            && inventory.has_room_for(&floating.item, floating.quantity)
        {
            v += to_ship.normalize_or_zero() * MAGNET_ACCEL * dt;
        }

        let damp = (1.0 - ITEM_DRAG * dt).max(0.0);
        v *= damp;
        if v.length() < ITEM_STOP_SPEED {
            v = glam::DVec2::ZERO;
        }
        *vel = Velocity::from_vec(v);
        *pos = Position::from_vec(pos.vec() + v * dt);

        // Items rest outside obstacles, never inside them.
        for circle in &obstacles {
            push_out_overlap(pos, Position::from_vec(circle.center), ITEM_RADIUS, circle.radius);
        }
    }
}

/// Collect items overlapping the pickup radius into the inventory.
pub fn pickup(
    world: &mut World,
    ship: &Ship,
    inventory: &mut Inventory,
    events: &mut Vec<GameEvent>,
) {
    let ship_pos = ship.pos.vec();
    let reach = ship.radius() + PICKUP_RADIUS;

    let touching: Vec<(hecs::Entity, FloatingItem)> = world
        .query::<(&FloatingItem, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| pos.vec().distance(ship_pos) <= reach)
        .map(|(entity, (floating, _))| (entity, *floating))
        .collect();

    for (entity, floating) in touching {
        if floating.item.is_stackable() {
            let leftover = inventory.add(floating.item, floating.quantity);
            if leftover == 0 {
                let _ = world.despawn(entity);
            } else if let Ok(mut f) = world.get::<&mut FloatingItem>(entity) {
                f.quantity = leftover;
            }
            if leftover < floating.quantity {
                events.push(GameEvent::Pickup {
                    category: floating.item.pickup_category(),
                });
            }
        } else if inventory.place_in_empty(floating.item) {
            let _ = world.despawn(entity);
            events.push(GameEvent::Pickup {
                category: floating.item.pickup_category(),
            });
        }
    }
}
