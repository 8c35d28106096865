//! Entity spawn factories for populating the simulation world.
//!
//! Creates asteroids, structures (with their defense pirates), pirates,
//! drones, bullets, floating items, and spark particles with appropriate
//! component bundles.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::*;
use starlode_core::constants::*;
use starlode_core::enums::*;
use starlode_core::items::Item;
use starlode_core::level::{AsteroidSpec, LevelSpec, StructureSpec};
use starlode_core::types::{Position, Velocity};
use starlode_core::weapons::WeaponStats;

use starlode_pirate_ai::profiles;

/// A collidable circle, snapshotted for avoidance and item push-out.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

/// Snapshot every collidable obstacle (asteroids and structures).
pub fn collect_obstacles(world: &World) -> Vec<Circle> {
    let mut obstacles = Vec::new();
    for (_entity, (asteroid, pos)) in world.query::<(&Asteroid, &Position)>().iter() {
        obstacles.push(Circle {
            center: pos.vec(),
            radius: asteroid.radius,
        });
    }
    for (_entity, (structure, pos)) in world.query::<(&Structure, &Position)>().iter() {
        obstacles.push(Circle {
            center: pos.vec(),
            radius: structure.radius,
        });
    }
    obstacles
}

/// Populate the world from a level descriptor.
pub fn setup_level(world: &mut World, level: &LevelSpec, rng: &mut ChaCha8Rng) {
    for spec in &level.asteroids {
        spawn_asteroid(world, spec);
    }
    for spec in &level.structures {
        spawn_structure(world, spec, rng);
    }
}

/// Spawn one asteroid. Health derives from radius and ore kind unless the
/// level file overrides it.
pub fn spawn_asteroid(world: &mut World, spec: &AsteroidSpec) -> hecs::Entity {
    let radius = if spec.radius.is_finite() && spec.radius > 0.0 {
        spec.radius
    } else {
        15.0
    };
    let health = spec
        .health
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(radius * spec.ore.health_multiplier());
    world.spawn((
        Asteroid {
            radius,
            ore: spec.ore,
            health,
            max_health: health,
        },
        Position::new(spec.x, spec.y),
    ))
}

/// Spawn one structure. Pirate bases get combat state scaled by tier and
/// their initial ring of defense pirates.
pub fn spawn_structure(world: &mut World, spec: &StructureSpec, rng: &mut ChaCha8Rng) -> hecs::Entity {
    let pos = Position::new(spec.x, spec.y);
    match spec.kind {
        StructureKind::PirateBase => {
            let scale = base_tier_scale(spec.tier);
            let radius = BASE_RADIUS * scale;
            let health = spec
                .health
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(BASE_HEALTH * scale);
            let spawn_rate = if spec.spawn_rate.is_finite() && spec.spawn_rate > 0.0 {
                spec.spawn_rate
            } else {
                30.0
            };
            let wave_kinds = if spec.wave_kinds.is_empty() {
                vec![PirateKind::Normal]
            } else {
                spec.wave_kinds.clone()
            };
            let base = world.spawn((
                Structure {
                    kind: StructureKind::PirateBase,
                    radius,
                    drone_stock: 0,
                },
                PirateBase {
                    tier: spec.tier.clamp(1, 5),
                    health,
                    max_health: health,
                    aggroed: false,
                    dead: false,
                    spawn_timer: spawn_rate,
                    spawn_rate,
                    wave_spawn_count: spec.wave_spawn_count,
                    wave_kinds: wave_kinds.clone(),
                    defense_count: spec.defense_count,
                    drops: spec.drops.iter().map(|d| (d.item, d.quantity)).collect(),
                },
                pos,
            ));

            // Ring of defenders, evenly distributed around the hull.
            for i in 0..spec.defense_count {
                let angle = std::f64::consts::TAU * i as f64 / spec.defense_count.max(1) as f64;
                let orbit_radius = radius + DEFENSE_ORBIT_CLEARANCE;
                let at = pos.vec() + DVec2::new(angle.cos(), angle.sin()) * orbit_radius;
                let kind = *pick(rng, &wave_kinds);
                let pirate = spawn_pirate(
                    world,
                    rng,
                    kind,
                    PirateArchetype::Standard,
                    Position::from_vec(at),
                    angle,
                    false,
                );
                let _ = world.insert_one(pirate, HomeBase(base));
                if let Ok(mut p) = world.get::<&mut Pirate>(pirate) {
                    p.state = PirateState::DefenseOrbit;
                    p.orbit_angle = angle;
                    p.orbit_radius = orbit_radius;
                }
            }
            base
        }
        kind => {
            let radius = match kind {
                StructureKind::Shop => 70.0,
                StructureKind::Refinery => 65.0,
                StructureKind::Shipyard => 80.0,
                StructureKind::WarpGate => 60.0,
                StructureKind::PirateBase => unreachable!(),
            };
            world.spawn((
                Structure {
                    kind,
                    radius,
                    drone_stock: spec.drone_stock,
                },
                pos,
            ))
        }
    }
}

/// Spawn a single pirate facing `facing`.
pub fn spawn_pirate(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: PirateKind,
    archetype: PirateArchetype,
    pos: Position,
    facing: f64,
    base_spawned: bool,
) -> hecs::Entity {
    let health = profiles::max_health(kind, archetype);
    world.spawn((
        Pirate {
            kind,
            archetype,
            health,
            max_health: health,
            state: PirateState::Chase,
            state_timer: rng.gen_range(PIRATE_STATE_SECS_MIN..PIRATE_STATE_SECS_MAX),
            fire_cooldown: rng.gen_range(PIRATE_FIRE_SECS_MIN..PIRATE_FIRE_SECS_MAX),
            facing,
            tilt: 0.0,
            // Stable per-pirate coin flip fixes the orbit direction.
            orbit_dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            orbit_angle: 0.0,
            orbit_radius: 0.0,
            base_spawned,
        },
        pos,
        Velocity::default(),
    ))
}

/// Spawn a companion drone near the ship.
pub fn spawn_drone(world: &mut World, rng: &mut ChaCha8Rng, ship_pos: Position) -> hecs::Entity {
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let offset = DVec2::new(angle.cos(), angle.sin()) * 50.0;
    world.spawn((
        Drone {
            state: DroneState::Chase,
            state_timer: DRONE_STATE_SECS,
            facing: angle,
            fire_timer: rng.gen_range(0.0..DRONE_LASER_PERIOD_SECS),
            spark_carry: 0.0,
            target: None,
            beam: None,
        },
        Position::from_vec(ship_pos.vec() + offset),
        Velocity::default(),
    ))
}

/// Spawn a player bullet with weapon-tier damage baked in.
pub fn spawn_player_bullet(
    world: &mut World,
    pos: Position,
    dir: DVec2,
    stats: &WeaponStats,
    damage_mult: f64,
) -> hecs::Entity {
    world.spawn((
        Bullet {
            owner: BulletOwner::Player,
            life: stats.bullet_life,
            ship_damage: 0.0,
            pirate_damage: stats.pirate_damage * damage_mult,
            asteroid_damage: stats.asteroid_damage * damage_mult,
            archetype: None,
            color: [0.4, 1.0, 0.5],
        },
        pos,
        Velocity::from_vec(dir * stats.bullet_speed),
    ))
}

/// Spawn a pirate bullet styled by its archetype.
pub fn spawn_pirate_bullet(
    world: &mut World,
    pos: Position,
    dir: DVec2,
    archetype: PirateArchetype,
) -> hecs::Entity {
    let profile = profiles::archetype_profile(archetype);
    world.spawn((
        Bullet {
            owner: BulletOwner::Pirate,
            life: PIRATE_BULLET_LIFE_SECS,
            ship_damage: profile.bullet_damage,
            pirate_damage: 0.0,
            asteroid_damage: 0.0,
            archetype: Some(archetype),
            color: profile.bullet_color,
        },
        pos,
        Velocity::from_vec(dir * profile.bullet_speed),
    ))
}

/// Spawn one floating item with a random scatter velocity.
pub fn spawn_floating_item(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Position,
    item: Item,
    quantity: u32,
) -> hecs::Entity {
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let speed = rng.gen_range(ITEM_SCATTER_SPEED_MIN..ITEM_SCATTER_SPEED_MAX);
    world.spawn((
        FloatingItem { item, quantity },
        pos,
        Velocity::from_vec(DVec2::new(angle.cos(), angle.sin()) * speed),
    ))
}

/// Spawn `count` units of `item`, each as an independent floating item.
pub fn scatter_items(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Position,
    item: Item,
    count: u32,
) {
    for _ in 0..count {
        spawn_floating_item(world, rng, pos, item, 1);
    }
}

/// Spawn a burst of spark particles.
pub fn spawn_sparks(world: &mut World, rng: &mut ChaCha8Rng, pos: Position, count: u32) {
    for _ in 0..count {
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = rng.gen_range(SPARK_SPEED_MIN..SPARK_SPEED_MAX);
        world.spawn((
            Spark {
                life: rng.gen_range(SPARK_LIFE_MIN..SPARK_LIFE_MAX),
            },
            pos,
            Velocity::from_vec(DVec2::new(angle.cos(), angle.sin()) * speed),
        ));
    }
}

/// Pick a random element of a non-empty slice.
pub fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
