//! Companion drone AI: population reconcile, target selection, steering,
//! and the periodic beam.
//!
//! Target priority is pirates first (skipping defenders of un-aggroed
//! bases), then aggroed bases, then the asteroid the player last lasered.
//! All candidates must be on-screen relative to the ship.

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::{
    Asteroid, Beam, Drone, DroneTarget, Pirate, PirateBase, Structure,
};
use starlode_core::constants::*;
use starlode_core::enums::{DroneState, PirateState};
use starlode_core::state::Ship;
use starlode_core::types::{Position, Velocity};

use starlode_pirate_ai::fsm;

use crate::world_setup;

/// Keep the live drone count equal to the owned count, capped by the
/// current ship's drone slots.
pub fn reconcile(world: &mut World, ship: &Ship, desired: u32, rng: &mut ChaCha8Rng) {
    let live: Vec<hecs::Entity> = world
        .query::<&Drone>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    let count = live.len() as u32;
    if count < desired {
        for _ in count..desired {
            world_setup::spawn_drone(world, rng, ship.pos);
        }
    } else if count > desired {
        for entity in live.into_iter().take((count - desired) as usize) {
            let _ = world.despawn(entity);
        }
    }
}

#[derive(Clone, Copy)]
struct Candidate {
    target: DroneTarget,
    position: DVec2,
}

pub fn run(
    world: &mut World,
    ship: &Ship,
    last_hit_asteroid: Option<hecs::Entity>,
    rng: &mut ChaCha8Rng,
    dt: f64,
) {
    let ship_pos = ship.pos.vec();
    let on_screen = |p: DVec2| {
        let rel = p - ship_pos;
        rel.x.abs() <= VIEW_HALF_WIDTH && rel.y.abs() <= VIEW_HALF_HEIGHT
    };

    // Candidate snapshots, in priority order.
    let pirates: Vec<Candidate> = world
        .query::<(&Pirate, &Position)>()
        .iter()
        .filter(|(_, (pirate, pos))| {
            pirate.state != PirateState::DefenseOrbit && on_screen(pos.vec())
        })
        .map(|(entity, (_, pos))| Candidate {
            target: DroneTarget::Pirate(entity),
            position: pos.vec(),
        })
        .collect();
    let bases: Vec<Candidate> = world
        .query::<(&Structure, &PirateBase, &Position)>()
        .iter()
        .filter(|(_, (_, base, pos))| base.aggroed && !base.dead && on_screen(pos.vec()))
        .map(|(entity, (_, _, pos))| Candidate {
            target: DroneTarget::Base(entity),
            position: pos.vec(),
        })
        .collect();
    let asteroid: Option<Candidate> = last_hit_asteroid.and_then(|entity| {
        let pos = world.get::<&Position>(entity).ok()?.vec();
        world.get::<&Asteroid>(entity).ok()?;
        on_screen(pos).then_some(Candidate {
            target: DroneTarget::Asteroid(entity),
            position: pos,
        })
    });
    let obstacles = world_setup::collect_obstacles(world);

    let pick_target = |from: DVec2| -> Option<Candidate> {
        let nearest = |set: &[Candidate]| {
            set.iter()
                .copied()
                .min_by(|a, b| {
                    from.distance_squared(a.position)
                        .total_cmp(&from.distance_squared(b.position))
                })
        };
        nearest(&pirates).or_else(|| nearest(&bases)).or(asteroid)
    };

    struct BeamHit {
        target: DroneTarget,
        at: Position,
        damage: f64,
        sparks: u32,
    }
    let mut beam_hits: Vec<BeamHit> = Vec::new();

    for (_entity, (drone, pos, vel)) in
        world.query_mut::<(&mut Drone, &mut Position, &mut Velocity)>()
    {
        let p = pos.vec();
        let candidate = pick_target(p);
        drone.target = candidate.map(|c| c.target);

        // Chase/circle flips on a fixed cadence.
        drone.state_timer -= dt;
        if drone.state_timer <= 0.0 {
            drone.state_timer += DRONE_STATE_SECS;
            drone.state = match drone.state {
                DroneState::Chase => DroneState::Circle,
                DroneState::Circle => DroneState::Chase,
            };
        }

        let anchor = candidate.map(|c| c.position).unwrap_or(ship_pos);
        let to_anchor = anchor - p;
        let dist = to_anchor.length();
        let dir = to_anchor.normalize_or_zero();
        let mut accel = match drone.state {
            DroneState::Chase if dist > DRONE_ORBIT_DIST => dir * DRONE_ACCEL,
            DroneState::Chase => DVec2::ZERO,
            DroneState::Circle => dir.perp() * DRONE_ACCEL,
        };

        for circle in &obstacles {
            accel += fsm::avoidance(p, circle.center, circle.radius + DRONE_RADIUS + AVOID_CLEARANCE);
        }
        accel += fsm::avoidance(p, ship_pos, PIRATE_SHIP_AVOID_RADIUS);

        // Stay on screen and near the ship.
        let rel = p - ship_pos;
        if rel.x > VIEW_HALF_WIDTH - DRONE_EDGE_MARGIN {
            accel.x -= AVOID_ACCEL;
        }
        if rel.x < -(VIEW_HALF_WIDTH - DRONE_EDGE_MARGIN) {
            accel.x += AVOID_ACCEL;
        }
        if rel.y > VIEW_HALF_HEIGHT - DRONE_EDGE_MARGIN {
            accel.y -= AVOID_ACCEL;
        }
        if rel.y < -(VIEW_HALF_HEIGHT - DRONE_EDGE_MARGIN) {
            accel.y += AVOID_ACCEL;
        }
        if rel.length() > DRONE_LEASH_DIST {
            accel += -rel.normalize_or_zero() * DRONE_LEASH_ACCEL;
        }

        let mut v = vel.vec() + accel * dt;
        if v.length() > DRONE_MAX_SPEED {
            v = v.normalize_or_zero() * DRONE_MAX_SPEED;
        }
        *vel = Velocity::from_vec(v);
        *pos = Position::from_vec(pos.vec() + v * dt);

        let (facing, _) = fsm::ease_facing(drone.facing, accel, dt);
        drone.facing = facing;

        // Beam cycle: active for a short window at the start of each period.
        drone.fire_timer -= dt;
        if drone.fire_timer <= 0.0 {
            drone.fire_timer += DRONE_LASER_PERIOD_SECS;
        }
        let phase = DRONE_LASER_PERIOD_SECS - drone.fire_timer;
        let active = phase < DRONE_LASER_ACTIVE_SECS;

        drone.beam = None;
        if active {
            if let Some(c) = candidate {
                let offset = c.position - pos.vec();
                if offset.length() <= DRONE_LASER_RANGE {
                    drone.beam = Some(Beam {
                        dx: offset.normalize_or_zero().x,
                        dy: offset.normalize_or_zero().y,
                        length: offset.length(),
                    });
                    drone.spark_carry += DRONE_SPARK_RATE * dt;
                    let sparks = drone.spark_carry as u32;
                    drone.spark_carry -= sparks as f64;
                    beam_hits.push(BeamHit {
                        target: c.target,
                        at: Position::from_vec(c.position),
                        damage: DRONE_LASER_DPS * dt,
                        sparks,
                    });
                }
            }
        } else {
            drone.spark_carry = 0.0;
        }
    }

    for hit in beam_hits {
        match hit.target {
            DroneTarget::Pirate(entity) => {
                if let Ok(mut pirate) = world.get::<&mut Pirate>(entity) {
                    pirate.health -= hit.damage;
                }
            }
            DroneTarget::Base(entity) => {
                if let Ok(mut base) = world.get::<&mut PirateBase>(entity) {
                    base.health -= hit.damage;
                }
            }
            DroneTarget::Asteroid(entity) => {
                if let Ok(mut asteroid) = world.get::<&mut Asteroid>(entity) {
                    asteroid.health -= hit.damage;
                }
            }
        }
        world_setup::spawn_sparks(world, rng, hit.at, hit.sparks);
    }
}
