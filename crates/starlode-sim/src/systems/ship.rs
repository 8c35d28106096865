//! Player ship movement, border checks, collisions, and life support.

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::{Asteroid, PirateBase, Structure};
use starlode_core::constants::*;
use starlode_core::enums::ImpactKind;
use starlode_core::events::GameEvent;
use starlode_core::geometry::{bounce, push_out_overlap};
use starlode_core::input::InputSnapshot;
use starlode_core::state::Ship;
use starlode_core::types::{Position, Velocity};

use crate::world_setup;

/// Tick down the slowing debuff.
pub fn decay_debuffs(ship: &mut Ship, dt: f64) {
    ship.slow_timer = (ship.slow_timer - dt).max(0.0);
}

/// Apply thrust toward the aim point. Thrust costs fuel and does nothing
/// on an empty tank. A dying ship is frozen.
pub fn thrust(ship: &mut Ship, input: &InputSnapshot, dying: bool, dt: f64) {
    if dying || !input.thrust || ship.fuel <= 0.0 {
        return;
    }
    let dir = (input.aim.vec() - ship.pos.vec()).normalize_or_zero();
    if dir == DVec2::ZERO {
        return;
    }
    let accel = ship.effective_accel();
    ship.vel = Velocity::from_vec(ship.vel.vec() + dir * accel * dt);
    ship.fuel = (ship.fuel - FUEL_PER_THRUST_SEC * dt).max(0.0);
}

/// Friction, brake, speed clamp, and position integration.
pub fn integrate(ship: &mut Ship, brake: bool, dying: bool, dt: f64) {
    if dying {
        return;
    }
    let mut friction = SHIP_FRICTION;
    if brake {
        friction += SHIP_BRAKE_FRICTION;
    }
    let damp = (1.0 - friction * dt).max(0.0);
    let mut vel = ship.vel.vec() * damp;
    let max_speed = ship.effective_max_speed();
    if vel.length() > max_speed {
        vel = vel.normalize_or_zero() * max_speed;
    }
    ship.vel = Velocity::from_vec(vel);
    ship.pos = Position::from_vec(ship.pos.vec() + vel * dt);
}

/// Border status check. Emits `OutsideBorder` on the crossing edge only.
pub fn outside_border(
    ship: &Ship,
    width: f64,
    height: f64,
    was_outside: bool,
    events: &mut Vec<GameEvent>,
) -> bool {
    let p = ship.pos;
    let outside = p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height;
    if outside && !was_outside {
        events.push(GameEvent::OutsideBorder);
    }
    outside
}

/// Resolve ship-vs-asteroid and ship-vs-structure overlaps: push out,
/// bounce, and convert inward speed into hull damage on both sides.
/// Ramming a pirate base aggros it.
pub fn collide(
    world: &mut World,
    ship: &mut Ship,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let dr = ship.stats().damage_reduction;
    let ship_radius = ship.radius();
    let mut sparks = Vec::new();

    for (_entity, (asteroid, pos)) in world.query_mut::<(&mut Asteroid, &Position)>() {
        let Some(contact) = push_out_overlap(&mut ship.pos, *pos, ship_radius, asteroid.radius)
        else {
            continue;
        };
        let inward = bounce(&mut ship.vel, contact.normal, SHIP_RESTITUTION);
        if inward <= 0.0 {
            continue;
        }
        let raw = (inward * IMPACT_DAMAGE_SCALE).min(IMPACT_DAMAGE_CAP);
        ship.health -= raw * (1.0 - dr);
        asteroid.health -= raw * 0.5;
        events.push(GameEvent::Impact {
            kind: ImpactKind::ShipAsteroid,
        });
        sparks.push((ship.pos, impact_spark_count(inward)));
    }

    for (_entity, (structure, mut base, pos)) in
        world.query_mut::<(&Structure, Option<&mut PirateBase>, &Position)>()
    {
        let Some(contact) = push_out_overlap(&mut ship.pos, *pos, ship_radius, structure.radius)
        else {
            continue;
        };
        // Any ship contact with a base wakes it, even a grazing one.
        if let Some(base) = base.as_deref_mut() {
            if !base.aggroed {
                base.aggroed = true;
                events.push(GameEvent::BaseAggroed);
            }
        }
        let inward = bounce(&mut ship.vel, contact.normal, SHIP_RESTITUTION);
        if inward <= 0.0 {
            continue;
        }
        let raw = (inward * IMPACT_DAMAGE_SCALE).min(IMPACT_DAMAGE_CAP);
        ship.health -= raw * (1.0 - dr);
        if let Some(base) = base {
            base.health -= raw * 0.5;
        }
        events.push(GameEvent::Impact {
            kind: ImpactKind::ShipStructure,
        });
        sparks.push((ship.pos, impact_spark_count(inward)));
    }

    for (pos, count) in sparks {
        world_setup::spawn_sparks(world, rng, pos, count);
    }
}

/// Oxygen drain and suffocation. Outside the border, drain is harsher.
pub fn life_support(ship: &mut Ship, outside: bool, dt: f64) {
    let mut drain = OXYGEN_DRAIN_PER_SEC;
    if outside {
        drain += BORDER_OXYGEN_DRAIN_PER_SEC;
    }
    ship.oxygen -= drain * dt;
    if ship.oxygen <= 0.0 {
        ship.oxygen = 0.0;
        ship.health -= SUFFOCATION_DAMAGE_PER_SEC * dt;
    }
}

/// Sparks for an impact of the given inward speed.
pub fn impact_spark_count(inward_speed: f64) -> u32 {
    ((inward_speed * IMPACT_SPARKS_PER_SPEED) as u32).min(IMPACT_SPARKS_MAX)
}
