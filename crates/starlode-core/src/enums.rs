//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Pirate base-stat variant: health/speed/size multipliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PirateKind {
    #[default]
    Normal,
    /// Slower, bigger, much more health.
    Sturdy,
    /// Faster, smaller, fragile.
    Fast,
}

/// Pirate combat-behavior variant, independent of kind. Controls bullet
/// pattern, damage, and on-hit debuffs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PirateArchetype {
    #[default]
    Standard,
    /// Fires a 3-pellet spread fan.
    Shotgun,
    /// Bullets apply a timed ship speed penalty.
    Slowing,
    /// Bullets randomly drain oxygen or fuel.
    Breaching,
    /// Weaker but faster hull.
    Drone,
}

/// Pirate behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PirateState {
    /// Steering toward the player.
    #[default]
    Chase,
    /// Orbit-steering around the player.
    Circle,
    /// Kinematic orbit around an un-aggroed home base, non-combatant.
    DefenseOrbit,
}

/// Companion drone behavior state (defense orbit does not apply).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneState {
    #[default]
    Chase,
    Circle,
}

/// Who fired a bullet. Determines which collision checks apply damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Pirate,
}

/// Ore vein type carried by an asteroid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OreKind {
    #[default]
    Iron,
    Copper,
    Silver,
    Gold,
    Platinum,
}

impl OreKind {
    /// Health multiplier applied to `radius` to derive asteroid health.
    pub fn health_multiplier(self) -> f64 {
        match self {
            OreKind::Iron => 1.0,
            OreKind::Copper => 1.3,
            OreKind::Silver => 1.6,
            OreKind::Gold => 2.0,
            OreKind::Platinum => 2.5,
        }
    }
}

/// Structure type. Only pirate bases carry combat-relevant state; the
/// rest are collidable obstacles the simulation never mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    PirateBase,
    Shop,
    Refinery,
    Shipyard,
    WarpGate,
}

/// Player hull variant. Controls speed, capacity, and drone slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipKind {
    #[default]
    Scout,
    Hauler,
    Fighter,
}

/// Equippable weapon, by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    MiningLaser,
    PulseLaser,
    Blaster,
    HeavyBlaster,
}

/// Depletable player resource, for low-level notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Health,
    Fuel,
    Oxygen,
}

/// Pickup category for audio/HUD feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupCategory {
    Ore,
    Scrap,
    Charge,
    Key,
    Weapon,
}

/// What kind of impact occurred, for audio feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactKind {
    ShipAsteroid,
    ShipStructure,
    BulletAsteroid,
    BulletPirate,
    BulletBase,
    BulletShip,
}

/// What exploded, for audio feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Pirate,
    Asteroid,
    PirateBase,
}

/// Warp visual-transition phase. The simulation is paused while a warp
/// transition is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarpPhase {
    #[default]
    None,
    BloomIn,
    Hold,
    BloomOut,
}
