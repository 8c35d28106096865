//! Serializable render snapshot assembled after each tick.
//!
//! The snapshot is a flat value type: the frontend reads it, the
//! determinism tests serialize it and compare runs byte for byte.
//! Entity views are sorted by entity id so equal worlds produce equal
//! snapshots regardless of archetype iteration details.

use hecs::World;
use serde::{Deserialize, Serialize};

use starlode_core::components::{
    Asteroid, Beam, Bullet, Drone, FloatingItem, Pirate, PirateBase, Spark, Structure,
};
use starlode_core::enums::{
    BulletOwner, DroneState, OreKind, PirateArchetype, PirateKind, PirateState, StructureKind,
};
use starlode_core::events::GameEvent;
use starlode_core::inventory::Inventory;
use starlode_core::items::Item;
use starlode_core::state::{DeathSequence, Ship, WarpTransition};
use starlode_core::types::{Position, SimTime, Velocity};

use crate::systems::weapons::WeaponState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub elapsed_secs: f64,
    pub ship: Ship,
    pub weapon: WeaponView,
    pub inventory: Inventory,
    pub equipped_slot: usize,
    pub credits: u64,
    pub warp: WarpTransition,
    pub death: DeathSequence,
    pub outside_border: bool,
    pub pirates: Vec<PirateView>,
    pub drones: Vec<DroneView>,
    pub bullets: Vec<BulletView>,
    pub asteroids: Vec<AsteroidView>,
    pub structures: Vec<StructureView>,
    pub items: Vec<ItemView>,
    pub sparks: Vec<SparkView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub heat: f64,
    pub overheated: bool,
    pub beam: Option<Beam>,
    pub vibrate_timer: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PirateView {
    pub pos: Position,
    pub kind: PirateKind,
    pub archetype: PirateArchetype,
    pub state: PirateState,
    pub health: f64,
    pub max_health: f64,
    pub facing: f64,
    pub tilt: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub pos: Position,
    pub state: DroneState,
    pub facing: f64,
    pub beam: Option<Beam>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Position,
    pub vel: Velocity,
    pub owner: BulletOwner,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: Position,
    pub radius: f64,
    pub ore: OreKind,
    pub health: f64,
    pub max_health: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureView {
    pub pos: Position,
    pub kind: StructureKind,
    pub radius: f64,
    /// Present for pirate bases.
    pub health: Option<f64>,
    pub aggroed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub pos: Position,
    pub item: Item,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparkView {
    pub pos: Position,
    pub life: f64,
}

#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    ship: &Ship,
    inventory: &Inventory,
    equipped_slot: usize,
    weapon: &WeaponState,
    time: SimTime,
    credits: u64,
    warp: WarpTransition,
    death: DeathSequence,
    outside_border: bool,
    events: Vec<GameEvent>,
) -> RenderSnapshot {
    let mut pirates: Vec<(u64, PirateView)> = world
        .query::<(&Pirate, &Position)>()
        .iter()
        .map(|(entity, (pirate, pos))| {
            (
                entity.to_bits().get(),
                PirateView {
                    pos: *pos,
                    kind: pirate.kind,
                    archetype: pirate.archetype,
                    state: pirate.state,
                    health: pirate.health,
                    max_health: pirate.max_health,
                    facing: pirate.facing,
                    tilt: pirate.tilt,
                },
            )
        })
        .collect();
    let mut drones: Vec<(u64, DroneView)> = world
        .query::<(&Drone, &Position)>()
        .iter()
        .map(|(entity, (drone, pos))| {
            (
                entity.to_bits().get(),
                DroneView {
                    pos: *pos,
                    state: drone.state,
                    facing: drone.facing,
                    beam: drone.beam,
                },
            )
        })
        .collect();
    let mut bullets: Vec<(u64, BulletView)> = world
        .query::<(&Bullet, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (bullet, pos, vel))| {
            (
                entity.to_bits().get(),
                BulletView {
                    pos: *pos,
                    vel: *vel,
                    owner: bullet.owner,
                    color: bullet.color,
                },
            )
        })
        .collect();
    let mut asteroids: Vec<(u64, AsteroidView)> = world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .map(|(entity, (asteroid, pos))| {
            (
                entity.to_bits().get(),
                AsteroidView {
                    pos: *pos,
                    radius: asteroid.radius,
                    ore: asteroid.ore,
                    health: asteroid.health,
                    max_health: asteroid.max_health,
                },
            )
        })
        .collect();
    let mut structures: Vec<(u64, StructureView)> = world
        .query::<(&Structure, &Position)>()
        .iter()
        .map(|(entity, (structure, pos))| {
            let base = world.get::<&PirateBase>(entity).ok();
            (
                entity.to_bits().get(),
                StructureView {
                    pos: *pos,
                    kind: structure.kind,
                    radius: structure.radius,
                    health: base.as_ref().map(|b| b.health),
                    aggroed: base.as_ref().map(|b| b.aggroed).unwrap_or(false),
                },
            )
        })
        .collect();
    let mut items: Vec<(u64, ItemView)> = world
        .query::<(&FloatingItem, &Position)>()
        .iter()
        .map(|(entity, (floating, pos))| {
            (
                entity.to_bits().get(),
                ItemView {
                    pos: *pos,
                    item: floating.item,
                    quantity: floating.quantity,
                },
            )
        })
        .collect();
    let mut sparks: Vec<(u64, SparkView)> = world
        .query::<(&Spark, &Position)>()
        .iter()
        .map(|(entity, (spark, pos))| {
            (
                entity.to_bits().get(),
                SparkView {
                    pos: *pos,
                    life: spark.life,
                },
            )
        })
        .collect();

    pirates.sort_by_key(|(id, _)| *id);
    drones.sort_by_key(|(id, _)| *id);
    bullets.sort_by_key(|(id, _)| *id);
    asteroids.sort_by_key(|(id, _)| *id);
    structures.sort_by_key(|(id, _)| *id);
    items.sort_by_key(|(id, _)| *id);
    sparks.sort_by_key(|(id, _)| *id);

    RenderSnapshot {
        tick: time.tick,
        elapsed_secs: time.elapsed_secs,
        ship: ship.clone(),
        weapon: WeaponView {
            heat: weapon.heat,
            overheated: weapon.overheated,
            beam: weapon.beam,
            vibrate_timer: weapon.vibrate_timer,
        },
        inventory: inventory.clone(),
        equipped_slot,
        credits,
        warp,
        death,
        outside_border,
        pirates: strip(pirates),
        drones: strip(drones),
        bullets: strip(bullets),
        asteroids: strip(asteroids),
        structures: strip(structures),
        items: strip(items),
        sparks: strip(sparks),
        events,
    }
}

fn strip<T>(views: Vec<(u64, T)>) -> Vec<T> {
    views.into_iter().map(|(_, view)| view).collect()
}
