//! Player weapon handling: heat, energy, laser targeting, and blaster
//! fire-rate accumulation.
//!
//! Lasers raycast against every asteroid, pirate, and base in range and
//! hit only the single nearest target along the beam, capped at both the
//! weapon's range and the visible screen edge. Blasters convert held
//! trigger time into discrete shots through a fractional accumulator.

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::{Asteroid, Beam, HomeBase, Pirate, PirateBase, Structure};
use starlode_core::constants::*;
use starlode_core::enums::WeaponKind;
use starlode_core::events::GameEvent;
use starlode_core::geometry::{ray_circle, viewport_edge_distance};
use starlode_core::input::InputSnapshot;
use starlode_core::inventory::Inventory;
use starlode_core::state::Ship;
use starlode_core::types::Position;
use starlode_core::weapons::{is_laser, weapon_stats};

use starlode_pirate_ai::profiles;

use crate::world_setup;

/// Mutable weapon state owned by the engine, not the ECS.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponState {
    /// Heat fraction in [0, 1].
    pub heat: f64,
    /// Sticky overheat latch; clears only when heat returns to zero.
    pub overheated: bool,
    /// Fractional shots banked by the blaster accumulator.
    pub blaster_carry: f64,
    /// Fractional spark carry for laser hit particles.
    pub spark_carry: f64,
    /// Beam drawn this tick, ship-relative direction and length.
    pub beam: Option<Beam>,
    /// True while the laser trigger is producing a beam (edge detection).
    pub laser_active: bool,
    /// Remaining vibration time on the last lasered asteroid.
    pub vibrate_timer: f64,
}

/// What the beam ray hit first.
enum LaserHit {
    Asteroid(hecs::Entity),
    Pirate(hecs::Entity),
    Base(hecs::Entity),
}

/// Accrue heat and latch the overheat at the ceiling.
pub fn accrue_heat(ws: &mut WeaponState, amount: f64, events: &mut Vec<GameEvent>) {
    ws.heat = (ws.heat + amount).min(1.0);
    if ws.heat >= 1.0 && !ws.overheated {
        ws.overheated = true;
        events.push(GameEvent::Overheated);
    }
}

/// Shed heat. The overheat latch clears only at zero.
pub fn cool_heat(ws: &mut WeaponState, amount: f64) {
    ws.heat = (ws.heat - amount).max(0.0);
    if ws.overheated && ws.heat <= 0.0 {
        ws.overheated = false;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    ship: &mut Ship,
    inventory: &mut Inventory,
    equipped_slot: usize,
    ws: &mut WeaponState,
    input: &InputSnapshot,
    dying: bool,
    dt: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    last_hit_asteroid: &mut Option<hecs::Entity>,
) {
    ws.beam = None;
    ws.vibrate_timer = (ws.vibrate_timer - dt).max(0.0);

    let Some(kind) = inventory.weapon_in_slot(equipped_slot) else {
        cool_heat(ws, WEAPON_COOL_DEFAULT * dt);
        ws.blaster_carry = 0.0;
        ws.laser_active = false;
        return;
    };
    let stats = weapon_stats(kind);
    let trigger = input.fire && !dying;

    if is_laser(kind) {
        run_laser(
            world, ship, inventory, ws, kind, &stats, input, trigger, dt, rng, events,
            last_hit_asteroid,
        );
    } else {
        run_blaster(world, ship, inventory, ws, kind, &stats, input, trigger, dt, events);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_laser(
    world: &mut World,
    ship: &mut Ship,
    inventory: &mut Inventory,
    ws: &mut WeaponState,
    kind: WeaponKind,
    stats: &starlode_core::weapons::WeaponStats,
    input: &InputSnapshot,
    trigger: bool,
    dt: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    last_hit_asteroid: &mut Option<hecs::Entity>,
) {
    ws.blaster_carry = 0.0;

    let origin = ship.pos.vec();
    let dir = (input.aim.vec() - origin).normalize_or_zero();
    let can_aim = dir != DVec2::ZERO;

    let mut fired = false;
    if trigger && can_aim && !ws.overheated {
        if let Some(charge) = inventory.first_cell_with_charge(stats.min_charge) {
            fired = true;
            *charge = (*charge - stats.energy_per_sec * dt).max(0.0);
        }
    }

    if fired {
        accrue_heat(ws, stats.heat_per_sec * dt, events);
        if !ws.laser_active {
            events.push(GameEvent::WeaponFired { weapon: kind });
        }

        // Beam length stops at the screen edge even if range allows more.
        let max_len = stats
            .range
            .min(viewport_edge_distance(dir, VIEW_HALF_WIDTH, VIEW_HALF_HEIGHT));
        let hit = nearest_laser_hit(world, origin, dir, max_len);

        let length = hit.as_ref().map(|(_, t)| *t).unwrap_or(max_len);
        ws.beam = Some(Beam {
            dx: dir.x,
            dy: dir.y,
            length,
        });

        if let Some((hit, t)) = hit {
            let damage_mult = ship.stats().damage_mult;
            let hit_point = Position::from_vec(origin + dir * t);
            match hit {
                LaserHit::Asteroid(entity) => {
                    if let Ok(mut asteroid) = world.get::<&mut Asteroid>(entity) {
                        asteroid.health -= stats.dps * damage_mult * dt;
                    }
                    *last_hit_asteroid = Some(entity);
                    ws.vibrate_timer = VIBRATE_SECS;
                }
                LaserHit::Pirate(entity) => {
                    let damage = stats.dps * LASER_ENEMY_FACTOR * damage_mult * dt;
                    let mut home = None;
                    if let Ok(mut pirate) = world.get::<&mut Pirate>(entity) {
                        pirate.health -= damage;
                        home = world.get::<&HomeBase>(entity).ok().map(|h| h.0);
                    }
                    // Shooting a defender wakes its base.
                    if let Some(base_entity) = home {
                        if let Ok(mut base) = world.get::<&mut PirateBase>(base_entity) {
                            if !base.aggroed {
                                base.aggroed = true;
                                events.push(GameEvent::BaseAggroed);
                            }
                        }
                    }
                }
                LaserHit::Base(entity) => {
                    if let Ok(mut base) = world.get::<&mut PirateBase>(entity) {
                        base.health -= stats.dps * LASER_ENEMY_FACTOR * damage_mult * dt;
                        if !base.aggroed {
                            base.aggroed = true;
                            events.push(GameEvent::BaseAggroed);
                        }
                    }
                }
            }

            ws.spark_carry += LASER_SPARK_RATE * dt;
            let count = ws.spark_carry as u32;
            ws.spark_carry -= count as f64;
            world_setup::spawn_sparks(world, rng, hit_point, count);
        }
    } else {
        cool_heat(ws, stats.cool_per_sec * dt);
        ws.spark_carry = 0.0;
    }
    ws.laser_active = fired;
}

#[allow(clippy::too_many_arguments)]
fn run_blaster(
    world: &mut World,
    ship: &mut Ship,
    inventory: &mut Inventory,
    ws: &mut WeaponState,
    kind: WeaponKind,
    stats: &starlode_core::weapons::WeaponStats,
    input: &InputSnapshot,
    trigger: bool,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    ws.laser_active = false;

    let origin = ship.pos.vec();
    let dir = (input.aim.vec() - origin).normalize_or_zero();

    if !trigger || dir == DVec2::ZERO {
        ws.blaster_carry = 0.0;
        cool_heat(ws, stats.cool_per_sec * dt);
        return;
    }

    ws.blaster_carry += stats.fire_rate * dt;
    let attempts = ws.blaster_carry as u32;
    ws.blaster_carry -= attempts as f64;

    let mut fired_any = false;
    for _ in 0..attempts {
        if ws.overheated {
            break;
        }
        let Some(charge) = inventory.first_cell_with_charge(stats.min_charge) else {
            break;
        };
        *charge = (*charge - stats.energy_per_shot).max(0.0);
        accrue_heat(ws, stats.heat_per_shot, events);
        let muzzle = Position::from_vec(origin + dir * ship.radius());
        world_setup::spawn_player_bullet(world, muzzle, dir, stats, ship.stats().damage_mult);
        events.push(GameEvent::WeaponFired { weapon: kind });
        fired_any = true;
    }

    if !fired_any {
        cool_heat(ws, stats.cool_per_sec * dt);
    }
}

/// Raycast the beam against every potential target and keep the single
/// closest hit along the ray.
fn nearest_laser_hit(
    world: &World,
    origin: DVec2,
    dir: DVec2,
    max_len: f64,
) -> Option<(LaserHit, f64)> {
    let mut best: Option<(LaserHit, f64)> = None;
    let consider = |hit: LaserHit, t: f64, best: &mut Option<(LaserHit, f64)>| {
        if best.as_ref().map_or(true, |(_, bt)| t < *bt) {
            *best = Some((hit, t));
        }
    };

    for (entity, (asteroid, pos)) in world.query::<(&Asteroid, &Position)>().iter() {
        if let Some(t) = ray_circle(origin, dir, pos.vec(), asteroid.radius, max_len) {
            consider(LaserHit::Asteroid(entity), t, &mut best);
        }
    }
    for (entity, (pirate, pos)) in world.query::<(&Pirate, &Position)>().iter() {
        let radius = profiles::radius(pirate.kind);
        if let Some(t) = ray_circle(origin, dir, pos.vec(), radius, max_len) {
            consider(LaserHit::Pirate(entity), t, &mut best);
        }
    }
    for (entity, (structure, _base, pos)) in
        world.query::<(&Structure, &PirateBase, &Position)>().iter()
    {
        if let Some(t) = ray_circle(origin, dir, pos.vec(), structure.radius, max_len) {
            consider(LaserHit::Base(entity), t, &mut best);
        }
    }
    best
}
