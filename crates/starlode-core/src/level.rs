//! The level descriptor handed to the simulation by the level loader.
//!
//! Defensive policy is clamp-and-continue: missing or malformed fields
//! fall back to documented defaults via serde, and `SpawnSettings::sanitize`
//! repairs non-finite or non-positive values after load.

use serde::{Deserialize, Serialize};

use crate::enums::{OreKind, PirateArchetype, PirateKind, StructureKind};
use crate::items::Item;
use crate::types::Position;

/// A complete level as loaded from a level file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSpec {
    #[serde(default = "default_world_extent")]
    pub width: f64,
    #[serde(default = "default_world_extent")]
    pub height: f64,
    /// Seed for reproducible procedural visuals and gameplay rolls.
    #[serde(default)]
    pub seed: u64,
    /// Debug levels spawn a fixed-size group on a fixed cadence.
    #[serde(default)]
    pub debug: bool,
    /// Ship start position; defaults to the level center.
    #[serde(default)]
    pub start: Option<Position>,
    #[serde(default)]
    pub asteroids: Vec<AsteroidSpec>,
    #[serde(default)]
    pub structures: Vec<StructureSpec>,
    #[serde(default)]
    pub spawn: SpawnSettings,
}

impl LevelSpec {
    pub fn start_position(&self) -> Position {
        self.start
            .unwrap_or_else(|| Position::new(self.width / 2.0, self.height / 2.0))
    }
}

fn default_world_extent() -> f64 {
    4000.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidSpec {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default)]
    pub ore: OreKind,
    /// Explicit health override; derived from radius and ore otherwise.
    #[serde(default)]
    pub health: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureSpec {
    pub x: f64,
    pub y: f64,
    pub kind: StructureKind,
    /// Pirate-base difficulty tier (1-5).
    #[serde(default = "default_tier")]
    pub tier: u8,
    /// Explicit base health override.
    #[serde(default)]
    pub health: Option<f64>,
    /// Base drop list; empty means the hardcoded fallback.
    #[serde(default)]
    pub drops: Vec<DropSpec>,
    /// Reinforcement interval in seconds.
    #[serde(default = "default_spawn_rate")]
    pub spawn_rate: f64,
    /// Pirates per reinforcement wave.
    #[serde(default = "default_wave_spawn_count")]
    pub wave_spawn_count: u32,
    /// Kind mix for reinforcement waves.
    #[serde(default)]
    pub wave_kinds: Vec<PirateKind>,
    /// Defenders orbiting the base from level start.
    #[serde(default = "default_defense_count")]
    pub defense_count: u32,
    /// Companion drones for sale (shops).
    #[serde(default)]
    pub drone_stock: u32,
    /// Destination level name (warp gates); consumed by the level loader.
    #[serde(default)]
    pub warp_to: Option<String>,
}

fn default_tier() -> u8 {
    1
}

fn default_spawn_rate() -> f64 {
    30.0
}

fn default_wave_spawn_count() -> u32 {
    3
}

fn default_defense_count() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropSpec {
    pub item: Item,
    pub quantity: u32,
}

/// Wave parameters resolved for one scheduling step.
#[derive(Debug, Clone)]
pub struct WaveParams<'a> {
    pub interval: f64,
    pub size: u32,
    pub kinds: &'a [PirateKind],
    pub archetypes: &'a [PirateArchetype],
}

/// Absolute-time wave schedule: base parameters plus an ordered list of
/// time-gated tiers that override them once elapsed time passes their
/// start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSettings {
    #[serde(default = "default_interval")]
    pub interval: f64,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_kinds")]
    pub kinds: Vec<PirateKind>,
    #[serde(default = "default_archetypes")]
    pub archetypes: Vec<PirateArchetype>,
    #[serde(default)]
    pub tiers: Vec<SpawnTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTier {
    pub start_time: f64,
    #[serde(default = "default_interval")]
    pub interval: f64,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_kinds")]
    pub kinds: Vec<PirateKind>,
    #[serde(default = "default_archetypes")]
    pub archetypes: Vec<PirateArchetype>,
}

fn default_interval() -> f64 {
    25.0
}

fn default_size() -> u32 {
    2
}

fn default_kinds() -> Vec<PirateKind> {
    vec![PirateKind::Normal]
}

fn default_archetypes() -> Vec<PirateArchetype> {
    vec![PirateArchetype::Standard]
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            size: default_size(),
            kinds: default_kinds(),
            archetypes: default_archetypes(),
            tiers: Vec::new(),
        }
    }
}

impl SpawnSettings {
    /// Repair malformed fields and sort tiers by start time. Called once
    /// at level load.
    pub fn sanitize(&mut self) {
        fix_interval(&mut self.interval);
        fix_mix(&mut self.kinds, &mut self.archetypes);
        for tier in &mut self.tiers {
            if !tier.start_time.is_finite() || tier.start_time < 0.0 {
                tier.start_time = 0.0;
            }
            fix_interval(&mut tier.interval);
            fix_mix(&mut tier.kinds, &mut tier.archetypes);
        }
        self.tiers
            .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    }

    /// Parameters in force at time `t`: the tier with the latest
    /// `start_time <= t`, or the base settings when none matches.
    pub fn params_at(&self, t: f64) -> WaveParams<'_> {
        let mut params = WaveParams {
            interval: self.interval,
            size: self.size,
            kinds: &self.kinds,
            archetypes: &self.archetypes,
        };
        for tier in &self.tiers {
            if tier.start_time <= t {
                params = WaveParams {
                    interval: tier.interval,
                    size: tier.size,
                    kinds: &tier.kinds,
                    archetypes: &tier.archetypes,
                };
            } else {
                break;
            }
        }
        params
    }

    /// The first tier boundary strictly after `t`, if any. Wave intervals
    /// are clamped so the next wave never overshoots this boundary.
    pub fn next_tier_start_after(&self, t: f64) -> Option<f64> {
        self.tiers
            .iter()
            .map(|tier| tier.start_time)
            .find(|&s| s > t)
    }
}

fn fix_interval(interval: &mut f64) {
    if !interval.is_finite() || *interval <= 0.0 {
        *interval = default_interval();
    }
}

fn fix_mix(kinds: &mut Vec<PirateKind>, archetypes: &mut Vec<PirateArchetype>) {
    if kinds.is_empty() {
        *kinds = default_kinds();
    }
    if archetypes.is_empty() {
        *archetypes = default_archetypes();
    }
}
