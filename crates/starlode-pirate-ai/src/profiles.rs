//! Kind- and archetype-specific stat profiles.
//!
//! A pirate's *kind* sets its base stats (health/speed/size); its
//! *archetype* sets combat behavior (bullet pattern, damage, debuffs,
//! hull tweaks). The two axes are independent.

use starlode_core::constants::*;
use starlode_core::enums::{PirateArchetype, PirateKind};

/// Base-stat multipliers for a pirate kind.
#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    pub health_mult: f64,
    pub speed_mult: f64,
    pub size_mult: f64,
}

pub fn kind_profile(kind: PirateKind) -> KindProfile {
    match kind {
        PirateKind::Normal => KindProfile {
            health_mult: 1.0,
            speed_mult: 1.0,
            size_mult: 1.0,
        },
        PirateKind::Sturdy => KindProfile {
            health_mult: 1.8,
            speed_mult: 0.8,
            size_mult: 1.25,
        },
        PirateKind::Fast => KindProfile {
            health_mult: 0.7,
            speed_mult: 1.5,
            size_mult: 0.85,
        },
    }
}

/// Combat profile for a pirate archetype.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeProfile {
    /// Bullets per trigger pull.
    pub pellets: u32,
    /// Total spread fan in radians.
    pub spread: f64,
    pub bullet_damage: f64,
    pub bullet_speed: f64,
    pub accel_mult: f64,
    pub max_speed_mult: f64,
    pub health_mult: f64,
    pub bullet_color: [f32; 3],
}

pub fn archetype_profile(archetype: PirateArchetype) -> ArchetypeProfile {
    match archetype {
        PirateArchetype::Standard => ArchetypeProfile {
            pellets: 1,
            spread: 0.06,
            bullet_damage: 8.0,
            bullet_speed: 320.0,
            accel_mult: 1.0,
            max_speed_mult: 1.0,
            health_mult: 1.0,
            bullet_color: [1.0, 0.55, 0.1],
        },
        PirateArchetype::Shotgun => ArchetypeProfile {
            pellets: 3,
            spread: 0.35,
            bullet_damage: 5.0,
            bullet_speed: 300.0,
            accel_mult: 0.9,
            max_speed_mult: 0.95,
            health_mult: 1.1,
            bullet_color: [1.0, 0.85, 0.2],
        },
        PirateArchetype::Slowing => ArchetypeProfile {
            pellets: 1,
            spread: 0.08,
            bullet_damage: 5.0,
            bullet_speed: 300.0,
            accel_mult: 1.0,
            max_speed_mult: 1.0,
            health_mult: 1.0,
            bullet_color: [0.3, 0.9, 1.0],
        },
        PirateArchetype::Breaching => ArchetypeProfile {
            pellets: 1,
            spread: 0.08,
            bullet_damage: 6.0,
            bullet_speed: 340.0,
            accel_mult: 1.0,
            max_speed_mult: 1.0,
            health_mult: 1.0,
            bullet_color: [0.9, 0.3, 1.0],
        },
        // Weaker hull, faster airframe.
        PirateArchetype::Drone => ArchetypeProfile {
            pellets: 1,
            spread: 0.1,
            bullet_damage: 4.0,
            bullet_speed: 360.0,
            accel_mult: 1.35,
            max_speed_mult: 1.3,
            health_mult: 0.55,
            bullet_color: [1.0, 0.25, 0.25],
        },
    }
}

/// Max health for a kind/archetype combination.
pub fn max_health(kind: PirateKind, archetype: PirateArchetype) -> f64 {
    PIRATE_BASE_HEALTH * kind_profile(kind).health_mult * archetype_profile(archetype).health_mult
}

/// Collision radius for a pirate kind.
pub fn radius(kind: PirateKind) -> f64 {
    PIRATE_RADIUS * kind_profile(kind).size_mult
}

/// Steering acceleration for a kind/archetype combination.
pub fn accel(kind: PirateKind, archetype: PirateArchetype) -> f64 {
    PIRATE_ACCEL * kind_profile(kind).speed_mult * archetype_profile(archetype).accel_mult
}

/// Speed cap for a kind/archetype combination.
pub fn max_speed(kind: PirateKind, archetype: PirateArchetype) -> f64 {
    PIRATE_MAX_SPEED * kind_profile(kind).speed_mult * archetype_profile(archetype).max_speed_mult
}
