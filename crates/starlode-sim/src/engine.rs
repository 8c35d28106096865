//! The headless simulation engine.
//!
//! Owns the hecs world, the player ship, and all per-level state, and
//! advances everything by one variable-dt frame per `update` call.
//! Deterministic for a given level seed and input sequence.

use std::collections::BTreeMap;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starlode_core::components::Structure;
use starlode_core::constants::*;
use starlode_core::enums::{ResourceKind, ShipKind, StructureKind};
use starlode_core::events::GameEvent;
use starlode_core::input::InputSnapshot;
use starlode_core::inventory::Inventory;
use starlode_core::items::Item;
use starlode_core::level::{LevelSpec, SpawnSettings};
use starlode_core::state::{
    DeathSequence, PlayerPersist, SavedResources, Ship, WarpTransition,
};
use starlode_core::types::SimTime;

use crate::systems;
use crate::systems::snapshot::RenderSnapshot;
use crate::systems::wave_spawner::WaveScheduler;
use crate::systems::weapons::WeaponState;
use crate::world_setup;

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub level: LevelSpec,
    /// Cross-level progress; `None` starts a fresh player.
    pub persist: Option<PlayerPersist>,
}

/// Why a shop purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    NoShop,
    NoStock,
    InsufficientCredits,
}

/// Edge-detection latches for low-resource alerts.
#[derive(Debug, Clone, Copy, Default)]
struct LowFlags {
    health: bool,
    fuel: bool,
    oxygen: bool,
}

pub struct SimulationEngine {
    pub(crate) world: World,
    pub(crate) ship: Ship,
    pub(crate) inventory: Inventory,
    pub(crate) equipped_slot: usize,
    pub(crate) weapon: WeaponState,
    pub(crate) credits: u64,
    pub(crate) drones_purchased: BTreeMap<ShipKind, u32>,
    pub(crate) spawn: SpawnSettings,
    pub(crate) scheduler: WaveScheduler,
    pub(crate) level_width: f64,
    pub(crate) level_height: f64,
    pub(crate) debug_level: bool,
    pub(crate) time: SimTime,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) despawn_buffer: Vec<hecs::Entity>,
    pub(crate) warp: WarpTransition,
    pub(crate) death: DeathSequence,
    /// Asteroid the mining laser last connected with; drones follow it.
    pub(crate) last_hit_asteroid: Option<hecs::Entity>,
    pub(crate) outside_border: bool,
    low_flags: LowFlags,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let mut level = config.level;
        level.spawn.sanitize();

        let persist = config.persist.unwrap_or_default();
        let mut ship = Ship::new(persist.ship_kind, level.start_position());
        if let Some(saved) = persist.resources {
            ship.health = saved.health;
            ship.fuel = saved.fuel;
            ship.oxygen = saved.oxygen;
            ship.clamp_resources();
        }

        let mut inventory = Inventory::new(ship.stats().cargo_slots);
        // Starting loadout: a mining laser and a charged cell.
        inventory.place_in_empty(Item::Weapon {
            kind: starlode_core::enums::WeaponKind::MiningLaser,
        });
        inventory.place_in_empty(Item::EnergyCell { charge: 100.0 });

        let mut rng = ChaCha8Rng::seed_from_u64(level.seed);
        let mut world = World::new();
        world_setup::setup_level(&mut world, &level, &mut rng);

        let scheduler = WaveScheduler::new(&level.spawn, level.debug);

        let mut engine = Self {
            world,
            ship,
            inventory,
            equipped_slot: 0,
            weapon: WeaponState::default(),
            credits: persist.credits,
            drones_purchased: persist.drones_purchased,
            spawn: level.spawn,
            scheduler,
            level_width: level.width,
            level_height: level.height,
            debug_level: level.debug,
            time: SimTime::default(),
            rng,
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            warp: WarpTransition::default(),
            death: DeathSequence::default(),
            last_hit_asteroid: None,
            outside_border: false,
            low_flags: LowFlags::default(),
        };
        let desired = engine.owned_drones();
        systems::drones::reconcile(
            &mut engine.world,
            &engine.ship,
            desired,
            &mut engine.rng,
        );
        engine
    }

    /// Advance the simulation by `dt` seconds. The whole world pauses
    /// during a warp transition and on the death screen; during the dying
    /// timer the ship is frozen and invulnerable to bullets while the
    /// world keeps moving.
    pub fn update(&mut self, dt: f64, input: &InputSnapshot) {
        if self.warp.is_active() {
            self.warp.advance(dt);
            return;
        }
        if self.death == DeathSequence::DeathScreen {
            return;
        }

        self.time.advance(dt);

        if let DeathSequence::Dying { remaining } = &mut self.death {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.death = DeathSequence::DeathScreen;
                return;
            }
        }
        let dying = self.death.is_dying();

        systems::ship::decay_debuffs(&mut self.ship, dt);
        systems::ship::thrust(&mut self.ship, input, dying, dt);
        systems::ship::integrate(&mut self.ship, input.brake, dying, dt);
        self.outside_border = systems::ship::outside_border(
            &self.ship,
            self.level_width,
            self.level_height,
            self.outside_border,
            &mut self.events,
        );
        systems::ship::collide(&mut self.world, &mut self.ship, &mut self.rng, &mut self.events);
        systems::ship::life_support(&mut self.ship, self.outside_border, dt);

        systems::weapons::run(
            &mut self.world,
            &mut self.ship,
            &mut self.inventory,
            self.equipped_slot,
            &mut self.weapon,
            input,
            dying,
            dt,
            &mut self.rng,
            &mut self.events,
            &mut self.last_hit_asteroid,
        );

        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &self.spawn,
            self.debug_level,
            self.time.elapsed_secs,
            &self.ship,
        );
        systems::pirates::run(&mut self.world, &self.ship, &mut self.rng, dt, &mut self.events);

        let desired = self.owned_drones();
        systems::drones::reconcile(&mut self.world, &self.ship, desired, &mut self.rng);
        systems::drones::run(
            &mut self.world,
            &self.ship,
            self.last_hit_asteroid,
            &mut self.rng,
            dt,
        );

        systems::pirates::base_defense(
            &mut self.world,
            &self.ship,
            &mut self.rng,
            dt,
            &mut self.events,
        );

        systems::bullets::run(
            &mut self.world,
            &mut self.ship,
            &mut self.rng,
            dying,
            dt,
            &mut self.events,
        );
        systems::particles::run(&mut self.world, dt, &mut self.despawn_buffer);

        systems::cleanup::run(&mut self.world, &mut self.rng, &mut self.events);

        systems::items::run(&mut self.world, &self.ship, &self.inventory, dt);
        systems::items::pickup(&mut self.world, &self.ship, &mut self.inventory, &mut self.events);

        self.ship.clamp_resources();
        self.check_low_resources();

        if self.death == DeathSequence::Alive && self.ship.health <= 0.0 {
            self.death = DeathSequence::Dying {
                remaining: DEATH_SEQUENCE_SECS,
            };
            self.events.push(GameEvent::PlayerDied);
        }
    }

    /// Edge-triggered low-resource alerts at the shared threshold.
    fn check_low_resources(&mut self) {
        let stats = self.ship.stats();
        let checks = [
            (
                ResourceKind::Health,
                self.ship.health / stats.max_health,
                &mut self.low_flags.health,
            ),
            (
                ResourceKind::Fuel,
                self.ship.fuel / stats.max_fuel,
                &mut self.low_flags.fuel,
            ),
            (
                ResourceKind::Oxygen,
                self.ship.oxygen / stats.max_oxygen,
                &mut self.low_flags.oxygen,
            ),
        ];
        for (resource, fraction, flag) in checks {
            let low = fraction < LOW_RESOURCE_FRACTION;
            if low && !*flag {
                self.events.push(GameEvent::LowResource { resource });
            }
            *flag = low;
        }
    }

    /// Drones the player owns for the current hull, capped by its slots.
    fn owned_drones(&self) -> u32 {
        let purchased = self
            .drones_purchased
            .get(&self.ship.kind)
            .copied()
            .unwrap_or(0);
        purchased.min(self.ship.stats().drone_slots)
    }

    /// Buy one companion drone at a shop.
    pub fn purchase_drone(&mut self, shop: hecs::Entity) -> Result<(), PurchaseError> {
        {
            let structure = self
                .world
                .get::<&Structure>(shop)
                .map_err(|_| PurchaseError::NoShop)?;
            if structure.kind != StructureKind::Shop {
                return Err(PurchaseError::NoShop);
            }
            if structure.drone_stock == 0 {
                return Err(PurchaseError::NoStock);
            }
            if self.credits < DRONE_PRICE {
                return Err(PurchaseError::InsufficientCredits);
            }
        }
        if let Ok(mut structure) = self.world.get::<&mut Structure>(shop) {
            structure.drone_stock -= 1;
        }
        self.credits -= DRONE_PRICE;
        *self.drones_purchased.entry(self.ship.kind).or_insert(0) += 1;
        Ok(())
    }

    /// Select the active hotbar slot.
    pub fn equip_slot(&mut self, slot: usize) {
        if slot < self.inventory.slots.len() {
            self.equipped_slot = slot;
        }
    }

    /// Begin the warp visual transition; the level swap belongs to the
    /// caller during the hold phase.
    pub fn start_warp(&mut self) {
        self.warp.start();
    }

    /// Progress to carry into the next level.
    pub fn persist(&self, keep_resources: bool) -> PlayerPersist {
        PlayerPersist {
            credits: self.credits,
            ship_kind: self.ship.kind,
            drones_purchased: self.drones_purchased.clone(),
            resources: keep_resources.then_some(SavedResources {
                health: self.ship.health,
                fuel: self.ship.fuel,
                oxygen: self.ship.oxygen,
            }),
        }
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Build the render snapshot, draining pending events into it.
    pub fn snapshot(&mut self) -> RenderSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.ship,
            &self.inventory,
            self.equipped_slot,
            &self.weapon,
            self.time,
            self.credits,
            self.warp,
            self.death,
            self.outside_border,
            events,
        )
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn credits(&self) -> u64 {
        self.credits
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn death(&self) -> DeathSequence {
        self.death
    }

    pub fn warp(&self) -> WarpTransition {
        self.warp
    }
}
