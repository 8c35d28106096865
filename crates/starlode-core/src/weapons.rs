//! Per-weapon stats table.

use crate::enums::WeaponKind;

/// Tuning for one weapon tier. Laser weapons use the per-second fields,
/// blasters the per-shot fields.
#[derive(Debug, Clone, Copy)]
pub struct WeaponStats {
    /// Maximum beam/targeting range (also capped at the screen edge).
    pub range: f64,
    /// Continuous damage per second (lasers).
    pub dps: f64,
    /// Shots per second (blasters).
    pub fire_rate: f64,
    /// Heat gained per second of beam time.
    pub heat_per_sec: f64,
    /// Heat gained per shot.
    pub heat_per_shot: f64,
    /// Heat shed per idle second.
    pub cool_per_sec: f64,
    /// Energy drawn per second of beam time.
    pub energy_per_sec: f64,
    /// Energy drawn per shot.
    pub energy_per_shot: f64,
    /// Minimum cell charge required to fire at all.
    pub min_charge: f64,
    /// Bullet damage against pirates and bases (blasters).
    pub pirate_damage: f64,
    /// Bullet damage against asteroids (blasters).
    pub asteroid_damage: f64,
    pub bullet_speed: f64,
    pub bullet_life: f64,
}

/// Whether this weapon fires a continuous beam.
pub fn is_laser(kind: WeaponKind) -> bool {
    matches!(kind, WeaponKind::MiningLaser | WeaponKind::PulseLaser)
}

/// Stats table. Values are gameplay balance and must not drift casually.
pub fn weapon_stats(kind: WeaponKind) -> WeaponStats {
    match kind {
        WeaponKind::MiningLaser => WeaponStats {
            range: 360.0,
            dps: 10.0,
            fire_rate: 0.0,
            heat_per_sec: 0.25,
            heat_per_shot: 0.0,
            cool_per_sec: 0.5,
            energy_per_sec: 4.0,
            energy_per_shot: 0.0,
            min_charge: 1.0,
            pirate_damage: 0.0,
            asteroid_damage: 0.0,
            bullet_speed: 0.0,
            bullet_life: 0.0,
        },
        WeaponKind::PulseLaser => WeaponStats {
            range: 420.0,
            dps: 22.0,
            fire_rate: 0.0,
            heat_per_sec: 0.35,
            heat_per_shot: 0.0,
            cool_per_sec: 0.5,
            energy_per_sec: 7.0,
            energy_per_shot: 0.0,
            min_charge: 1.0,
            pirate_damage: 0.0,
            asteroid_damage: 0.0,
            bullet_speed: 0.0,
            bullet_life: 0.0,
        },
        WeaponKind::Blaster => WeaponStats {
            range: 520.0,
            dps: 0.0,
            fire_rate: 4.0,
            heat_per_sec: 0.0,
            heat_per_shot: 0.06,
            cool_per_sec: 0.6,
            energy_per_sec: 0.0,
            energy_per_shot: 1.5,
            min_charge: 1.5,
            pirate_damage: 9.0,
            asteroid_damage: 4.0,
            bullet_speed: 480.0,
            bullet_life: 1.6,
        },
        WeaponKind::HeavyBlaster => WeaponStats {
            range: 560.0,
            dps: 0.0,
            fire_rate: 2.2,
            heat_per_sec: 0.0,
            heat_per_shot: 0.12,
            cool_per_sec: 0.6,
            energy_per_sec: 0.0,
            energy_per_shot: 3.0,
            min_charge: 3.0,
            pirate_damage: 22.0,
            asteroid_damage: 10.0,
            bullet_speed: 430.0,
            bullet_life: 1.9,
        },
    }
}
