//! Pirate death, AI steering, and firing; pirate-base aggro and
//! reinforcement waves.
//!
//! The AI pass snapshots its surroundings (home-base status, obstacle
//! circles, peer positions) before the mutable query so each pirate
//! steers against a coherent view of the frame.

use std::collections::HashMap;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::{HomeBase, Pirate, PirateBase, Structure};
use starlode_core::constants::*;
use starlode_core::enums::{ExplosionKind, PirateKind};
use starlode_core::events::GameEvent;
use starlode_core::items::Item;
use starlode_core::state::Ship;
use starlode_core::types::{Position, Velocity};

use starlode_pirate_ai::fsm::{self, BaseStatus, PirateContext};
use starlode_pirate_ai::profiles;

use crate::world_setup;

pub fn run(
    world: &mut World,
    ship: &Ship,
    rng: &mut ChaCha8Rng,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    resolve_deaths(world, rng, events);
    steer_and_fire(world, ship, rng, dt);
}

/// Remove dead pirates and scatter their scrap. Base reinforcements drop
/// nothing, so grinding a base is not a scrap fountain.
fn resolve_deaths(world: &mut World, rng: &mut ChaCha8Rng, events: &mut Vec<GameEvent>) {
    let dead: Vec<(hecs::Entity, Position, bool)> = world
        .query::<(&Pirate, &Position)>()
        .iter()
        .filter(|(_, (pirate, _))| pirate.health <= 0.0)
        .map(|(entity, (pirate, pos))| (entity, *pos, pirate.base_spawned))
        .collect();

    for (entity, pos, base_spawned) in dead {
        let _ = world.despawn(entity);
        if !base_spawned {
            let count = rng.gen_range(PIRATE_SCRAP_MIN..=PIRATE_SCRAP_MAX);
            world_setup::scatter_items(world, rng, pos, Item::Scrap, count);
        }
        world_setup::spawn_sparks(world, rng, pos, 6);
        events.push(GameEvent::Exploded {
            kind: ExplosionKind::Pirate,
        });
    }
}

struct PendingShot {
    origin: DVec2,
    dir: DVec2,
    archetype: starlode_core::enums::PirateArchetype,
}

fn steer_and_fire(world: &mut World, ship: &Ship, rng: &mut ChaCha8Rng, dt: f64) {
    // Frame snapshots taken before the mutable pass.
    let base_statuses: HashMap<hecs::Entity, BaseStatus> = world
        .query::<(&Structure, &PirateBase, &Position)>()
        .iter()
        .map(|(entity, (structure, base, pos))| {
            (
                entity,
                BaseStatus {
                    position: pos.vec(),
                    radius: structure.radius,
                    aggroed: base.aggroed,
                },
            )
        })
        .collect();
    let obstacles = world_setup::collect_obstacles(world);
    let peers: Vec<(hecs::Entity, DVec2)> = world
        .query::<(&Pirate, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, pos.vec()))
        .collect();

    let ship_pos = ship.pos.vec();
    let ship_vel = ship.vel.vec();
    let mut shots: Vec<PendingShot> = Vec::new();

    for (entity, (pirate, pos, vel, home)) in
        world.query_mut::<(&mut Pirate, &mut Position, &mut Velocity, Option<&HomeBase>)>()
    {
        let home_base = home.and_then(|h| base_statuses.get(&h.0).copied());
        let ctx = PirateContext {
            kind: pirate.kind,
            archetype: pirate.archetype,
            state: pirate.state,
            state_timer: pirate.state_timer,
            position: pos.vec(),
            ship_position: ship_pos,
            orbit_dir: pirate.orbit_dir,
            orbit_angle: pirate.orbit_angle,
            home_base,
            dt,
        };
        let steer = fsm::evaluate(&ctx, rng);
        pirate.state = steer.state;
        pirate.state_timer = steer.state_timer;

        if let Some(snap) = steer.snap {
            // Defense orbit is kinematic: position snapped, no combat.
            *pos = Position::from_vec(snap.position);
            *vel = Velocity::default();
            pirate.orbit_angle = snap.orbit_angle;
            let tangent = DVec2::new(-snap.orbit_angle.sin(), snap.orbit_angle.cos())
                * pirate.orbit_dir;
            pirate.facing = tangent.y.atan2(tangent.x);
            pirate.tilt = fsm::update_tilt(pirate.tilt, 0.0, dt);
            continue;
        }

        let radius = profiles::radius(pirate.kind);
        let mut accel = steer.accel;
        for circle in &obstacles {
            accel += fsm::avoidance(pos.vec(), circle.center, circle.radius + radius + AVOID_CLEARANCE);
        }
        accel += fsm::avoidance(pos.vec(), ship_pos, PIRATE_SHIP_AVOID_RADIUS);
        for (peer, peer_pos) in &peers {
            if *peer == entity {
                continue;
            }
            accel += fsm::avoidance(pos.vec(), *peer_pos, PIRATE_AVOID_RADIUS);
        }

        let mut v = vel.vec() + accel * dt;
        let max_speed = profiles::max_speed(pirate.kind, pirate.archetype);
        if v.length() > max_speed {
            v = v.normalize_or_zero() * max_speed;
        }
        *vel = Velocity::from_vec(v);
        *pos = Position::from_vec(pos.vec() + v * dt);

        let (facing, angular_velocity) = fsm::ease_facing(pirate.facing, accel, dt);
        pirate.facing = facing;
        pirate.tilt = fsm::update_tilt(pirate.tilt, angular_velocity, dt);

        // Firing.
        pirate.fire_cooldown -= dt;
        if pirate.fire_cooldown <= 0.0 && pos.vec().distance(ship_pos) <= PIRATE_FIRE_RANGE {
            pirate.fire_cooldown = rng.gen_range(PIRATE_FIRE_SECS_MIN..PIRATE_FIRE_SECS_MAX);
            let profile = profiles::archetype_profile(pirate.archetype);
            let aim = fsm::lead_aim(pos.vec(), ship_pos, ship_vel, profile.bullet_speed);
            if aim == DVec2::ZERO {
                continue;
            }
            for i in 0..profile.pellets {
                let offset = if profile.pellets > 1 {
                    -profile.spread / 2.0
                        + profile.spread * i as f64 / (profile.pellets - 1) as f64
                } else {
                    rng.gen_range(-profile.spread / 2.0..profile.spread / 2.0)
                };
                let dir = DVec2::from_angle(offset).rotate(aim);
                shots.push(PendingShot {
                    origin: pos.vec() + aim * radius,
                    dir,
                    archetype: pirate.archetype,
                });
            }
        }
    }

    for shot in shots {
        world_setup::spawn_pirate_bullet(
            world,
            Position::from_vec(shot.origin),
            shot.dir,
            shot.archetype,
        );
    }
}

struct Reinforcement {
    position: DVec2,
    radius: f64,
    count: u32,
    kinds: Vec<PirateKind>,
}

/// Proximity aggro and reinforcement waves for pirate bases.
pub fn base_defense(
    world: &mut World,
    ship: &Ship,
    rng: &mut ChaCha8Rng,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let ship_pos = ship.pos.vec();
    let mut waves: Vec<Reinforcement> = Vec::new();

    for (_entity, (structure, base, pos)) in
        world.query_mut::<(&Structure, &mut PirateBase, &Position)>()
    {
        if base.dead {
            continue;
        }
        if !base.aggroed && pos.vec().distance(ship_pos) <= base.aggro_radius() {
            base.aggroed = true;
            events.push(GameEvent::BaseAggroed);
        }
        if !base.aggroed {
            continue;
        }
        base.spawn_timer -= dt;
        while base.spawn_timer <= 0.0 {
            base.spawn_timer += base.spawn_rate;
            waves.push(Reinforcement {
                position: pos.vec(),
                radius: structure.radius,
                count: base.wave_spawn_count,
                kinds: base.wave_kinds.clone(),
            });
        }
    }

    for wave in waves {
        let toward_ship = (ship_pos - wave.position).normalize_or_zero();
        let base_angle = toward_ship.y.atan2(toward_ship.x);
        for i in 0..wave.count {
            let spread = i as f64 - (wave.count.saturating_sub(1)) as f64 / 2.0;
            let angle = base_angle + spread * 0.5 + rng.gen_range(-0.1..0.1);
            let at = wave.position
                + DVec2::new(angle.cos(), angle.sin()) * (wave.radius + BASE_REINFORCE_OFFSET);
            let kind = *world_setup::pick(rng, &wave.kinds);
            world_setup::spawn_pirate(
                world,
                rng,
                kind,
                starlode_core::enums::PirateArchetype::Standard,
                Position::from_vec(at),
                angle,
                true,
            );
        }
    }
}
