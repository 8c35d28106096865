//! Bullet flight, expiry, and collision resolution.
//!
//! Each bullet checks targets in a fixed order (asteroids, then bases,
//! then pirates, then the ship) and is consumed by the first overlap.
//! Pirate bullets damage only the ship; player bullets damage only
//! asteroids, bases, and pirates.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::{Asteroid, Bullet, HomeBase, Pirate, PirateBase, Structure};
use starlode_core::constants::*;
use starlode_core::enums::{BulletOwner, ImpactKind, PirateArchetype};
use starlode_core::events::GameEvent;
use starlode_core::state::Ship;
use starlode_core::types::{Position, Velocity};

use starlode_pirate_ai::profiles;

use crate::world_setup;

const BULLET_RADIUS: f64 = 2.0;

pub fn run(
    world: &mut World,
    ship: &mut Ship,
    rng: &mut ChaCha8Rng,
    dying: bool,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    integrate_and_expire(world, ship, dt);
    resolve_hits(world, ship, rng, dying, events);
}

/// Advance bullets and cull expired or far-off-screen ones.
fn integrate_and_expire(world: &mut World, ship: &Ship, dt: f64) {
    let mut expired = Vec::new();
    for (entity, (bullet, pos, vel)) in
        world.query_mut::<(&mut Bullet, &mut Position, &Velocity)>()
    {
        *pos = Position::from_vec(pos.vec() + vel.vec() * dt);
        bullet.life -= dt;
        let rel = pos.vec() - ship.pos.vec();
        let off_screen = rel.x.abs() > VIEW_HALF_WIDTH + VIEW_MARGIN
            || rel.y.abs() > VIEW_HALF_HEIGHT + VIEW_MARGIN;
        if bullet.life <= 0.0 || off_screen {
            expired.push(entity);
        }
    }
    for entity in expired {
        let _ = world.despawn(entity);
    }
}

enum BulletHit {
    Asteroid(hecs::Entity),
    Base(hecs::Entity),
    Pirate(hecs::Entity),
    Ship,
}

fn resolve_hits(
    world: &mut World,
    ship: &mut Ship,
    rng: &mut ChaCha8Rng,
    dying: bool,
    events: &mut Vec<GameEvent>,
) {
    // Target circles, snapshotted so the hit scan holds no world borrows.
    let asteroids: Vec<(hecs::Entity, glam::DVec2, f64)> = world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .map(|(e, (a, p))| (e, p.vec(), a.radius))
        .collect();
    let bases: Vec<(hecs::Entity, glam::DVec2, f64)> = world
        .query::<(&Structure, &PirateBase, &Position)>()
        .iter()
        .map(|(e, (s, _b, p))| (e, p.vec(), s.radius))
        .collect();
    let pirates: Vec<(hecs::Entity, glam::DVec2, f64)> = world
        .query::<(&Pirate, &Position)>()
        .iter()
        .map(|(e, (pirate, p))| (e, p.vec(), profiles::radius(pirate.kind)))
        .collect();

    let ship_pos = ship.pos.vec();
    let ship_radius = ship.radius();

    let mut hits: Vec<(hecs::Entity, Bullet, Position, BulletHit)> = Vec::new();
    for (entity, (bullet, pos)) in world.query::<(&Bullet, &Position)>().iter() {
        let p = pos.vec();
        let overlaps = |center: glam::DVec2, radius: f64| {
            p.distance_squared(center) <= (radius + BULLET_RADIUS).powi(2)
        };

        let hit = if let Some(&(target, ..)) =
            asteroids.iter().find(|(_, c, r)| overlaps(*c, *r))
        {
            Some(BulletHit::Asteroid(target))
        } else if bullet.owner == BulletOwner::Player {
            if let Some(&(target, ..)) = bases.iter().find(|(_, c, r)| overlaps(*c, *r)) {
                Some(BulletHit::Base(target))
            } else {
                pirates
                    .iter()
                    .find(|(_, c, r)| overlaps(*c, *r))
                    .map(|&(target, ..)| BulletHit::Pirate(target))
            }
        } else if !dying && overlaps(ship_pos, ship_radius) {
            Some(BulletHit::Ship)
        } else {
            None
        };

        if let Some(hit) = hit {
            hits.push((entity, *bullet, *pos, hit));
        }
    }

    let dr = ship.stats().damage_reduction;
    for (entity, bullet, pos, hit) in hits {
        let _ = world.despawn(entity);
        match hit {
            BulletHit::Asteroid(target) => {
                if bullet.owner == BulletOwner::Player {
                    if let Ok(mut asteroid) = world.get::<&mut Asteroid>(target) {
                        asteroid.health -= bullet.asteroid_damage;
                    }
                }
                events.push(GameEvent::Impact {
                    kind: ImpactKind::BulletAsteroid,
                });
            }
            BulletHit::Base(target) => {
                if let Ok(mut base) = world.get::<&mut PirateBase>(target) {
                    base.health -= bullet.pirate_damage;
                    if !base.aggroed {
                        base.aggroed = true;
                        events.push(GameEvent::BaseAggroed);
                    }
                }
                events.push(GameEvent::Impact {
                    kind: ImpactKind::BulletBase,
                });
            }
            BulletHit::Pirate(target) => {
                let mut home = None;
                if let Ok(mut pirate) = world.get::<&mut Pirate>(target) {
                    pirate.health -= bullet.pirate_damage;
                    home = world.get::<&HomeBase>(target).ok().map(|h| h.0);
                }
                if let Some(base_entity) = home {
                    if let Ok(mut base) = world.get::<&mut PirateBase>(base_entity) {
                        if !base.aggroed {
                            base.aggroed = true;
                            events.push(GameEvent::BaseAggroed);
                        }
                    }
                }
                events.push(GameEvent::Impact {
                    kind: ImpactKind::BulletPirate,
                });
            }
            BulletHit::Ship => {
                ship.health -= bullet.ship_damage * (1.0 - dr);
                apply_debuff(ship, bullet.archetype, rng);
                events.push(GameEvent::Impact {
                    kind: ImpactKind::BulletShip,
                });
                world_setup::spawn_sparks(world, rng, pos, 3);
            }
        }
    }
}

/// On-hit debuffs carried by pirate bullet archetypes.
fn apply_debuff(ship: &mut Ship, archetype: Option<PirateArchetype>, rng: &mut ChaCha8Rng) {
    match archetype {
        Some(PirateArchetype::Slowing) => {
            ship.slow_timer = SLOW_DURATION_SECS;
        }
        Some(PirateArchetype::Breaching) => {
            if rng.gen_bool(0.5) {
                ship.oxygen = (ship.oxygen - BREACH_DRAIN).max(0.0);
            } else {
                ship.fuel = (ship.fuel - BREACH_DRAIN).max(0.0);
            }
        }
        _ => {}
    }
}
