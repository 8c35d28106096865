//! Player ship state, ship-kind stats, persisted progress, and the small
//! warp/death phase machines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{ShipKind, WarpPhase};
use crate::types::{Position, Velocity};

/// Per-kind hull stats.
#[derive(Debug, Clone, Copy)]
pub struct ShipStats {
    pub max_speed: f64,
    pub accel: f64,
    pub radius: f64,
    pub scale: f64,
    pub max_health: f64,
    pub max_fuel: f64,
    pub max_oxygen: f64,
    /// Multiplier on all player-dealt damage.
    pub damage_mult: f64,
    /// Fraction of incoming damage absorbed (0..1).
    pub damage_reduction: f64,
    pub cargo_slots: usize,
    pub drone_slots: u32,
}

impl ShipKind {
    pub fn stats(self) -> ShipStats {
        match self {
            ShipKind::Scout => ShipStats {
                max_speed: 260.0,
                accel: 300.0,
                radius: 16.0,
                scale: 1.0,
                max_health: 100.0,
                max_fuel: 100.0,
                max_oxygen: 100.0,
                damage_mult: 1.0,
                damage_reduction: 0.0,
                cargo_slots: 8,
                drone_slots: 1,
            },
            ShipKind::Hauler => ShipStats {
                max_speed: 200.0,
                accel: 220.0,
                radius: 22.0,
                scale: 1.35,
                max_health: 160.0,
                max_fuel: 140.0,
                max_oxygen: 140.0,
                damage_mult: 1.0,
                damage_reduction: 0.15,
                cargo_slots: 14,
                drone_slots: 2,
            },
            ShipKind::Fighter => ShipStats {
                max_speed: 300.0,
                accel: 360.0,
                radius: 18.0,
                scale: 1.1,
                max_health: 130.0,
                max_fuel: 110.0,
                max_oxygen: 100.0,
                damage_mult: 1.4,
                damage_reduction: 0.1,
                cargo_slots: 10,
                drone_slots: 3,
            },
        }
    }
}

/// The player ship. Owned singleton, mutated by input, collisions, and
/// debuffs every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub kind: ShipKind,
    pub pos: Position,
    pub vel: Velocity,
    pub health: f64,
    pub fuel: f64,
    pub oxygen: f64,
    /// Remaining seconds of the slowing debuff.
    pub slow_timer: f64,
}

impl Ship {
    pub fn new(kind: ShipKind, pos: Position) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos,
            vel: Velocity::default(),
            health: stats.max_health,
            fuel: stats.max_fuel,
            oxygen: stats.max_oxygen,
            slow_timer: 0.0,
        }
    }

    pub fn stats(&self) -> ShipStats {
        self.kind.stats()
    }

    pub fn radius(&self) -> f64 {
        self.stats().radius
    }

    fn slow_mult(&self) -> f64 {
        if self.slow_timer > 0.0 {
            SLOW_FACTOR
        } else {
            1.0
        }
    }

    /// Max speed after the slowing debuff.
    pub fn effective_max_speed(&self) -> f64 {
        self.stats().max_speed * self.slow_mult()
    }

    /// Acceleration after the slowing debuff.
    pub fn effective_accel(&self) -> f64 {
        self.stats().accel * self.slow_mult()
    }

    /// Clamp all resource bars into their valid ranges.
    pub fn clamp_resources(&mut self) {
        let stats = self.stats();
        self.health = self.health.clamp(0.0, stats.max_health);
        self.fuel = self.fuel.clamp(0.0, stats.max_fuel);
        self.oxygen = self.oxygen.clamp(0.0, stats.max_oxygen);
    }
}

/// Resource levels optionally carried across a level reload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedResources {
    pub health: f64,
    pub fuel: f64,
    pub oxygen: f64,
}

/// Cross-level player progress, preserved verbatim across level reloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPersist {
    pub credits: u64,
    pub ship_kind: ShipKind,
    /// Purchased companion drones, persisted per ship kind.
    pub drones_purchased: BTreeMap<ShipKind, u32>,
    /// Present only when resources carry over.
    pub resources: Option<SavedResources>,
}

/// The warp visual transition. The simulation is paused while a
/// transition is in progress; the level swap happens during `Hold`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WarpTransition {
    pub phase: WarpPhase,
    pub timer: f64,
}

impl WarpTransition {
    pub fn start(&mut self) {
        self.phase = WarpPhase::BloomIn;
        self.timer = WARP_BLOOM_IN_SECS;
    }

    pub fn is_active(&self) -> bool {
        self.phase != WarpPhase::None
    }

    pub fn advance(&mut self, dt: f64) {
        if self.phase == WarpPhase::None {
            return;
        }
        self.timer -= dt;
        if self.timer > 0.0 {
            return;
        }
        self.phase = match self.phase {
            WarpPhase::BloomIn => {
                self.timer = WARP_HOLD_SECS;
                WarpPhase::Hold
            }
            WarpPhase::Hold => {
                self.timer = WARP_BLOOM_OUT_SECS;
                WarpPhase::BloomOut
            }
            WarpPhase::BloomOut | WarpPhase::None => {
                self.timer = 0.0;
                WarpPhase::None
            }
        };
    }
}

/// Player death: a fixed-duration uninterruptible timer, then a paused
/// death screen. Not an error state; recovering means reloading the level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum DeathSequence {
    #[default]
    Alive,
    Dying {
        remaining: f64,
    },
    DeathScreen,
}

impl DeathSequence {
    pub fn is_dying(&self) -> bool {
        matches!(self, DeathSequence::Dying { .. })
    }
}
