//! Death resolution for asteroids and pirate bases: despawn and drops.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::{Asteroid, PirateBase, Structure};
use starlode_core::constants::*;
use starlode_core::enums::ExplosionKind;
use starlode_core::events::GameEvent;
use starlode_core::items::Item;
use starlode_core::types::Position;

use crate::world_setup;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, events: &mut Vec<GameEvent>) {
    resolve_asteroids(world, rng, events);
    resolve_bases(world, rng, events);
}

/// Destroyed asteroids scatter their full ore yield as individual items.
fn resolve_asteroids(world: &mut World, rng: &mut ChaCha8Rng, events: &mut Vec<GameEvent>) {
    let dead: Vec<(hecs::Entity, Position, u32, Item)> = world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .filter(|(_, (asteroid, _))| asteroid.health <= 0.0)
        .map(|(entity, (asteroid, pos))| {
            (
                entity,
                *pos,
                asteroid.ore_yield(),
                Item::Ore { kind: asteroid.ore },
            )
        })
        .collect();

    for (entity, pos, ore_yield, ore) in dead {
        let _ = world.despawn(entity);
        world_setup::scatter_items(world, rng, pos, ore, ore_yield);
        world_setup::spawn_sparks(world, rng, pos, 8);
        events.push(GameEvent::Exploded {
            kind: ExplosionKind::Asteroid,
        });
    }
}

/// Destroyed bases pay out their configured drop list, or the fallback
/// haul of scrap plus a warp key. The `dead` flag guards against double
/// payout within the same frame.
fn resolve_bases(world: &mut World, rng: &mut ChaCha8Rng, events: &mut Vec<GameEvent>) {
    let mut dead: Vec<(hecs::Entity, Position, Vec<(Item, u32)>)> = Vec::new();
    for (entity, (_structure, base, pos)) in
        world.query_mut::<(&Structure, &mut PirateBase, &Position)>()
    {
        if base.health > 0.0 || base.dead {
            continue;
        }
        base.dead = true;
        dead.push((entity, *pos, base.drops.clone()));
    }

    for (entity, pos, drops) in dead {
        let _ = world.despawn(entity);
        if drops.is_empty() {
            world_setup::scatter_items(world, rng, pos, Item::Scrap, BASE_FALLBACK_SCRAP);
            world_setup::scatter_items(world, rng, pos, Item::WarpKey, 1);
        } else {
            for (item, quantity) in drops {
                world_setup::scatter_items(world, rng, pos, item, quantity);
            }
        }
        world_setup::spawn_sparks(world, rng, pos, 14);
        events.push(GameEvent::Exploded {
            kind: ExplosionKind::PirateBase,
        });
    }
}
