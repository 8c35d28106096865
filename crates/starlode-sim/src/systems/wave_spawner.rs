//! Ambient pirate wave scheduling.
//!
//! Waves are scheduled on an absolute timeline: the scheduler stores the
//! next wave's absolute time and loops until it passes the current
//! elapsed time, so one oversized frame spawns every wave it covered
//! instead of dropping them. Each wave's parameters come from the tier
//! in force at its *scheduled* time, not the frame that processed it.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlode_core::constants::*;
use starlode_core::enums::{PirateArchetype, PirateKind};
use starlode_core::level::SpawnSettings;
use starlode_core::state::Ship;
use starlode_core::types::Position;

use crate::world_setup;

/// Absolute-time wave schedule state.
#[derive(Debug, Clone, Copy)]
pub struct WaveScheduler {
    /// Absolute elapsed time of the next wave.
    pub next_wave_time: f64,
}

impl WaveScheduler {
    /// First wave lands one interval in, clamped to the first tier
    /// boundary so a tier starting early is not skipped over.
    pub fn new(settings: &SpawnSettings, debug: bool) -> Self {
        if debug {
            return Self {
                next_wave_time: DEBUG_WAVE_INTERVAL_SECS,
            };
        }
        let mut next = settings.params_at(0.0).interval;
        if let Some(boundary) = settings.next_tier_start_after(0.0) {
            next = next.min(boundary);
        }
        Self {
            next_wave_time: next,
        }
    }
}

/// Spawn every wave scheduled at or before `elapsed`.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut WaveScheduler,
    settings: &SpawnSettings,
    debug: bool,
    elapsed: f64,
    ship: &Ship,
) {
    while scheduler.next_wave_time <= elapsed {
        let scheduled = scheduler.next_wave_time;

        if debug {
            spawn_wave(
                world,
                rng,
                ship,
                DEBUG_WAVE_SIZE,
                &[PirateKind::Normal],
                &[PirateArchetype::Standard],
            );
            scheduler.next_wave_time = scheduled + DEBUG_WAVE_INTERVAL_SECS;
            continue;
        }

        let params = settings.params_at(scheduled);
        spawn_wave(world, rng, ship, params.size, params.kinds, params.archetypes);

        let jitter = 1.0 + rng.gen_range(-WAVE_INTERVAL_JITTER..WAVE_INTERVAL_JITTER);
        let mut next = scheduled + params.interval * jitter;
        // Never overshoot a tier boundary, so new tiers take effect on time.
        if let Some(boundary) = settings.next_tier_start_after(scheduled) {
            next = next.min(boundary);
        }
        scheduler.next_wave_time = next;
    }
}

/// Spawn one wave just off-screen, fanned around a random bearing.
fn spawn_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ship: &Ship,
    size: u32,
    kinds: &[PirateKind],
    archetypes: &[PirateArchetype],
) {
    let base_angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    for i in 0..size {
        let angle = base_angle + i as f64 * 0.35 + rng.gen_range(-0.1..0.1);
        let dist = rng.gen_range(WAVE_SPAWN_DIST_MIN..WAVE_SPAWN_DIST_MAX);
        let at = ship.pos.vec() + DVec2::new(angle.cos(), angle.sin()) * dist;
        let kind = *world_setup::pick(rng, kinds);
        let archetype = *world_setup::pick(rng, archetypes);
        let to_ship = ship.pos.vec() - at;
        let facing = to_ship.y.atan2(to_ship.x);
        world_setup::spawn_pirate(
            world,
            rng,
            kind,
            archetype,
            Position::from_vec(at),
            facing,
            false,
        );
    }
}
