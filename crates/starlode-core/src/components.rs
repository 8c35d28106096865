//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic beyond small
//! derived-value helpers. Systems own the behavior.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::items::Item;

/// An enemy pirate ship.
#[derive(Debug, Clone)]
pub struct Pirate {
    pub kind: PirateKind,
    pub archetype: PirateArchetype,
    pub health: f64,
    pub max_health: f64,
    pub state: PirateState,
    /// Seconds until the next chase/circle flip.
    pub state_timer: f64,
    /// Seconds until this pirate may fire again.
    pub fire_cooldown: f64,
    /// Facing angle in radians.
    pub facing: f64,
    /// Banking lean derived from facing angular velocity, clamped ±TILT_MAX.
    pub tilt: f64,
    /// Stable orbit direction (+1.0 or -1.0), fixed at spawn.
    pub orbit_dir: f64,
    /// Current angle on the defense orbit.
    pub orbit_angle: f64,
    /// Defense orbit radius around the home base.
    pub orbit_radius: f64,
    /// Spawned as a base reinforcement, so exempt from scrap drops.
    pub base_spawned: bool,
}

/// Weak back-reference from a defending pirate to its base. The handle is
/// re-resolved every tick; a stale handle simply means "no base".
#[derive(Debug, Clone, Copy)]
pub struct HomeBase(pub hecs::Entity);

/// What a companion drone is currently attacking. Re-resolved every tick,
/// never owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DroneTarget {
    Pirate(hecs::Entity),
    Base(hecs::Entity),
    Asteroid(hecs::Entity),
}

/// Active laser beam geometry for the current tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Beam {
    pub dx: f64,
    pub dy: f64,
    pub length: f64,
}

/// A companion drone.
#[derive(Debug, Clone)]
pub struct Drone {
    pub state: DroneState,
    pub state_timer: f64,
    pub facing: f64,
    /// Cycles over DRONE_LASER_PERIOD_SECS; beam active at the start.
    pub fire_timer: f64,
    /// Fractional spark carry for rate-correct particle emission.
    pub spark_carry: f64,
    pub target: Option<DroneTarget>,
    pub beam: Option<Beam>,
}

/// A bullet in flight. Damage values are baked at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub owner: BulletOwner,
    /// Remaining lifespan in seconds.
    pub life: f64,
    /// Damage against the player ship (pirate bullets).
    pub ship_damage: f64,
    /// Damage against pirates and pirate bases (player bullets).
    pub pirate_damage: f64,
    /// Damage against asteroids (player bullets).
    pub asteroid_damage: f64,
    /// Debuff source for pirate bullets.
    pub archetype: Option<PirateArchetype>,
    pub color: [f32; 3],
}

/// A mineable asteroid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid {
    pub radius: f64,
    pub ore: OreKind,
    pub health: f64,
    pub max_health: f64,
}

impl Asteroid {
    /// Size tier: radius 15 is tier 1, 25 is tier 2, and so on.
    pub fn size_tier(&self) -> u32 {
        ((self.radius / 10.0).floor() as u32).max(1)
    }

    /// Ore dropped on destruction. Tier 1 yields ORE_YIELD_BASE; each
    /// later tier adds an increment that shrinks by 1 per 2-tier band,
    /// floored at ORE_YIELD_INC_FLOOR.
    pub fn ore_yield(&self) -> u32 {
        let tier = self.size_tier();
        let mut total = ORE_YIELD_BASE;
        for t in 2..=tier {
            let inc = ORE_YIELD_INC_START
                .saturating_sub((t - 2) / 2)
                .max(ORE_YIELD_INC_FLOOR);
            total += inc;
        }
        total
    }
}

/// A static structure. Shops, refineries, shipyards and warp gates are
/// collidable obstacles only; pirate bases also carry a `PirateBase`.
#[derive(Debug, Clone)]
pub struct Structure {
    pub kind: StructureKind,
    pub radius: f64,
    /// Companion drones left for sale (shops).
    pub drone_stock: u32,
}

/// Combat state of a pirate base.
#[derive(Debug, Clone)]
pub struct PirateBase {
    /// Difficulty tier 1-5, linearly scaling radius/health/aggro range.
    pub tier: u8,
    pub health: f64,
    pub max_health: f64,
    /// Latched true forever once triggered.
    pub aggroed: bool,
    /// One-shot death guard.
    pub dead: bool,
    /// Seconds until the next reinforcement wave while aggroed.
    pub spawn_timer: f64,
    /// Reinforcement interval in seconds.
    pub spawn_rate: f64,
    /// Pirates per reinforcement wave.
    pub wave_spawn_count: u32,
    /// Kind mix for reinforcement waves.
    pub wave_kinds: Vec<PirateKind>,
    /// Defenders spawned with the base.
    pub defense_count: u32,
    /// Configured drop list; empty means the hardcoded fallback.
    pub drops: Vec<(Item, u32)>,
}

/// Linear tier scale shared by base radius, health, and aggro range.
pub fn base_tier_scale(tier: u8) -> f64 {
    1.0 + BASE_TIER_STEP * tier.clamp(1, 5).saturating_sub(1) as f64
}

impl PirateBase {
    pub fn aggro_radius(&self) -> f64 {
        BASE_AGGRO_RANGE * base_tier_scale(self.tier)
    }
}

/// An item drifting in space, awaiting pickup.
#[derive(Debug, Clone, Copy)]
pub struct FloatingItem {
    pub item: Item,
    pub quantity: u32,
}

/// A short-lived spark particle.
#[derive(Debug, Clone, Copy)]
pub struct Spark {
    pub life: f64,
}
