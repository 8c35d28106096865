use hecs::Entity;

use starlode_core::components::{Bullet, FloatingItem, Pirate, PirateBase, Structure};
use starlode_core::constants::*;
use starlode_core::enums::{
    BulletOwner, OreKind, PirateArchetype, PirateKind, PirateState, ShipKind, StructureKind,
    WarpPhase, WeaponKind,
};
use starlode_core::events::GameEvent;
use starlode_core::input::InputSnapshot;
use starlode_core::items::Item;
use starlode_core::level::{AsteroidSpec, LevelSpec, SpawnSettings, SpawnTier, StructureSpec};
use starlode_core::state::{DeathSequence, PlayerPersist, Ship};
use starlode_core::types::{Position, Velocity};

use crate::systems::weapons::{accrue_heat, cool_heat, WeaponState};
use crate::world_setup;
use crate::{PurchaseError, SimConfig, SimulationEngine};

const DT: f64 = 1.0 / 60.0;

fn empty_level(seed: u64) -> LevelSpec {
    LevelSpec {
        width: 8000.0,
        height: 8000.0,
        seed,
        debug: false,
        start: None,
        asteroids: Vec::new(),
        structures: Vec::new(),
        spawn: SpawnSettings {
            // Effectively disable ambient waves.
            interval: 1.0e9,
            ..SpawnSettings::default()
        },
    }
}

fn structure_spec(x: f64, y: f64, kind: StructureKind) -> StructureSpec {
    StructureSpec {
        x,
        y,
        kind,
        tier: 1,
        health: None,
        drops: Vec::new(),
        spawn_rate: 30.0,
        wave_spawn_count: 3,
        wave_kinds: Vec::new(),
        defense_count: 2,
        drone_stock: 0,
        warp_to: None,
    }
}

fn engine_for(level: LevelSpec) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        level,
        persist: None,
    })
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn count<C: hecs::Component>(engine: &SimulationEngine) -> usize {
    engine.world().query::<&C>().iter().count()
}

fn floating_items(engine: &SimulationEngine) -> Vec<FloatingItem> {
    engine
        .world()
        .query::<&FloatingItem>()
        .iter()
        .map(|(_, f)| *f)
        .collect()
}

mod determinism {
    use super::*;

    fn busy_level(seed: u64) -> LevelSpec {
        LevelSpec {
            width: 4000.0,
            height: 4000.0,
            seed,
            debug: false,
            start: None,
            asteroids: vec![
                AsteroidSpec {
                    x: 2300.0,
                    y: 2000.0,
                    radius: 25.0,
                    ore: OreKind::Iron,
                    health: None,
                },
                AsteroidSpec {
                    x: 1800.0,
                    y: 2200.0,
                    radius: 35.0,
                    ore: OreKind::Copper,
                    health: None,
                },
            ],
            structures: vec![structure_spec(2600.0, 2400.0, StructureKind::PirateBase)],
            spawn: SpawnSettings {
                interval: 2.0,
                size: 2,
                ..SpawnSettings::default()
            },
        }
    }

    fn scripted_input(tick: u64, ship_pos: Position) -> InputSnapshot {
        let angle = tick as f64 * 0.05;
        InputSnapshot {
            aim: Position::new(
                ship_pos.x + 300.0 * angle.cos(),
                ship_pos.y + 300.0 * angle.sin(),
            ),
            thrust: (tick / 40) % 2 == 0,
            fire: tick % 3 != 0,
            brake: false,
        }
    }

    #[test]
    fn same_seed_same_inputs_same_run() {
        let mut a = engine_for(busy_level(42));
        let mut b = engine_for(busy_level(42));

        for tick in 0..300 {
            let input_a = scripted_input(tick, a.ship().pos);
            let input_b = scripted_input(tick, b.ship().pos);
            a.update(DT, &input_a);
            b.update(DT, &input_b);
            if tick % 50 == 49 {
                let snap_a = serde_json::to_string(&a.snapshot()).unwrap();
                let snap_b = serde_json::to_string(&b.snapshot()).unwrap();
                assert_eq!(snap_a, snap_b, "runs diverged at tick {tick}");
            }
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = engine_for(busy_level(1));
        let mut b = engine_for(busy_level(2));

        for tick in 0..600 {
            let input_a = scripted_input(tick, a.ship().pos);
            let input_b = scripted_input(tick, b.ship().pos);
            a.update(DT, &input_a);
            b.update(DT, &input_b);
        }
        let snap_a = serde_json::to_string(&a.snapshot()).unwrap();
        let snap_b = serde_json::to_string(&b.snapshot()).unwrap();
        assert_ne!(snap_a, snap_b);
    }
}

mod mining {
    use super::*;

    #[test]
    fn lasered_asteroid_drops_its_full_yield() {
        let mut level = empty_level(5);
        // Tier-1 iron asteroid inside laser range, outside magnet range.
        level.asteroids.push(AsteroidSpec {
            x: 4300.0,
            y: 4000.0,
            radius: 15.0,
            ore: OreKind::Iron,
            health: None,
        });
        let mut engine = engine_for(level);
        let input = InputSnapshot {
            aim: Position::new(4300.0, 4000.0),
            thrust: false,
            fire: true,
            brake: false,
        };

        // 15 health at 10 dps: destroyed in 1.5 seconds.
        let mut destroyed_at = None;
        for tick in 0..240 {
            engine.update(DT, &input);
            if count::<starlode_core::components::Asteroid>(&engine) == 0 {
                destroyed_at = Some(tick);
                break;
            }
        }
        assert!(destroyed_at.is_some(), "asteroid survived the laser");

        let items = floating_items(&engine);
        assert_eq!(items.len(), 10);
        for item in &items {
            assert_eq!(item.item, Item::Ore { kind: OreKind::Iron });
            assert_eq!(item.quantity, 1);
        }
        // Fresh drops scatter with real velocity.
        let moving = engine
            .world()
            .query::<(&FloatingItem, &starlode_core::types::Velocity)>()
            .iter()
            .filter(|(_, (_, vel))| vel.speed() > 0.0)
            .count();
        assert!(moving > 0);
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::Exploded {
            kind: starlode_core::enums::ExplosionKind::Asteroid
        }));
    }
}

mod bases {
    use super::*;

    fn base_level() -> LevelSpec {
        let mut level = empty_level(9);
        let mut base = structure_spec(5000.0, 4000.0, StructureKind::PirateBase);
        base.spawn_rate = 5.0;
        base.wave_spawn_count = 3;
        level.structures.push(base);
        level
    }

    #[test]
    fn defenders_orbit_until_aggro() {
        let mut engine = engine_for(base_level());
        engine.update(DT, &idle());

        let states: Vec<PirateState> = engine
            .world()
            .query::<&Pirate>()
            .iter()
            .map(|(_, p)| p.state)
            .collect();
        assert_eq!(states.len(), 2);
        assert!(states.iter().all(|s| *s == PirateState::DefenseOrbit));

        let aggroed = engine
            .world()
            .query::<&PirateBase>()
            .iter()
            .any(|(_, b)| b.aggroed);
        assert!(!aggroed, "base aggroed with the ship 1000 units away");
    }

    #[test]
    fn grazing_a_base_wakes_it_without_hull_damage() {
        let mut engine = engine_for(base_level());
        engine.update(DT, &idle());

        let (base_pos, base_radius) = engine
            .world()
            .query::<(&Structure, &Position)>()
            .iter()
            .map(|(_, (s, p))| (*p, s.radius))
            .next()
            .unwrap();

        // Rest against the base edge with no closing speed.
        engine.ship.pos = Position::new(
            base_pos.x + base_radius + engine.ship.radius() - 1.0,
            base_pos.y,
        );
        engine.ship.vel = Velocity::default();
        let health_before = engine.ship.health;
        crate::systems::ship::collide(
            &mut engine.world,
            &mut engine.ship,
            &mut engine.rng,
            &mut engine.events,
        );

        assert!(engine
            .world()
            .query::<&PirateBase>()
            .iter()
            .any(|(_, b)| b.aggroed));
        assert!(engine.drain_events().contains(&GameEvent::BaseAggroed));
        assert_eq!(engine.ship.health, health_before);
    }

    #[test]
    fn proximity_aggro_releases_defenders_and_spawns_waves() {
        let mut engine = engine_for(base_level());
        engine.update(DT, &idle());

        // Step inside the aggro radius.
        engine.ship.pos = Position::new(4700.0, 4000.0);
        engine.update(DT, &idle());
        assert!(engine
            .world()
            .query::<&PirateBase>()
            .iter()
            .all(|(_, b)| b.aggroed));
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::BaseAggroed));

        // Defenders leave the orbit on the next evaluation.
        engine.update(DT, &idle());
        assert!(engine
            .world()
            .query::<&Pirate>()
            .iter()
            .all(|(_, p)| p.state != PirateState::DefenseOrbit));

        // One reinforcement interval later the wave arrives, flagged so it
        // drops no scrap.
        let before = count::<Pirate>(&engine);
        for _ in 0..(5.5 / DT) as u32 {
            engine.update(DT, &idle());
        }
        let reinforced = engine
            .world()
            .query::<&Pirate>()
            .iter()
            .filter(|(_, p)| p.base_spawned)
            .count();
        assert!(reinforced >= 3, "expected a reinforcement wave");
        assert!(count::<Pirate>(&engine) > before);
    }

    #[test]
    fn destroyed_base_pays_the_fallback_haul() {
        let mut engine = engine_for(base_level());
        engine.update(DT, &idle());

        for (_entity, base) in engine.world.query_mut::<&mut PirateBase>() {
            base.health = 0.0;
        }
        engine.update(DT, &idle());

        assert_eq!(count::<Structure>(&engine), 0);
        let items = floating_items(&engine);
        let scrap = items.iter().filter(|f| f.item == Item::Scrap).count();
        let keys = items.iter().filter(|f| f.item == Item::WarpKey).count();
        assert_eq!(scrap, BASE_FALLBACK_SCRAP as usize);
        assert_eq!(keys, 1);
    }
}

mod pirate_drops {
    use super::*;

    #[test]
    fn wave_pirates_drop_scrap_but_reinforcements_do_not() {
        let mut engine = engine_for(empty_level(3));
        let at = Position::new(4500.0, 4000.0);
        let wave =
            world_setup::spawn_pirate(
                &mut engine.world,
                &mut engine.rng,
                PirateKind::Normal,
                PirateArchetype::Standard,
                at,
                0.0,
                false,
            );
        let reinforcement = world_setup::spawn_pirate(
            &mut engine.world,
            &mut engine.rng,
            PirateKind::Normal,
            PirateArchetype::Standard,
            Position::new(3500.0, 4000.0),
            0.0,
            true,
        );
        engine.world.get::<&mut Pirate>(wave).unwrap().health = 0.0;
        engine.world.get::<&mut Pirate>(reinforcement).unwrap().health = 0.0;

        engine.update(DT, &idle());

        assert_eq!(count::<Pirate>(&engine), 0);
        let scrap: Vec<FloatingItem> = floating_items(&engine)
            .into_iter()
            .filter(|f| f.item == Item::Scrap)
            .collect();
        assert!(
            (PIRATE_SCRAP_MIN..=PIRATE_SCRAP_MAX).contains(&(scrap.len() as u32)),
            "scrap count {} outside the drop range",
            scrap.len()
        );
        assert!(scrap.iter().all(|f| f.quantity == 1));
    }
}

mod debuffs {
    use super::*;

    #[test]
    fn slowing_hit_caps_speed_for_its_duration() {
        let mut engine = engine_for(empty_level(11));
        let ship_pos = engine.ship().pos;
        world_setup::spawn_pirate_bullet(
            &mut engine.world,
            ship_pos,
            glam::DVec2::X,
            PirateArchetype::Slowing,
        );

        engine.update(DT, &idle());
        let full_speed = ShipKind::Scout.stats().max_speed;
        assert!(engine.ship().slow_timer > 0.0, "bullet did not connect");
        assert_eq!(engine.ship().effective_max_speed(), full_speed * SLOW_FACTOR);

        // Expires after its fixed window.
        for _ in 0..(3.2 / DT) as u32 {
            engine.update(DT, &idle());
        }
        assert_eq!(engine.ship().slow_timer, 0.0);
        assert_eq!(engine.ship().effective_max_speed(), full_speed);
    }
}

mod waves {
    use super::*;

    #[test]
    fn oversized_frame_spawns_every_scheduled_wave() {
        let mut level = empty_level(17);
        level.debug = true;
        let mut engine = engine_for(level);

        // One 25-second frame covers five debug waves of two pirates.
        engine.update(25.0, &idle());
        assert_eq!(count::<Pirate>(&engine), 10);
    }

    #[test]
    fn tiered_scheduler_is_frame_rate_independent() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        use crate::systems::wave_spawner::{self, WaveScheduler};

        let settings = SpawnSettings {
            interval: 20.0,
            size: 2,
            tiers: vec![SpawnTier {
                start_time: 35.0,
                interval: 10.0,
                size: 3,
                kinds: vec![PirateKind::Fast],
                archetypes: vec![PirateArchetype::Standard],
            }],
            ..SpawnSettings::default()
        };
        let ship = Ship::new(ShipKind::Scout, Position::new(2000.0, 2000.0));

        let run_for = |steps: u32, dt: f64| {
            let mut world = hecs::World::new();
            let mut rng = ChaCha8Rng::seed_from_u64(404);
            let mut scheduler = WaveScheduler::new(&settings, false);
            let mut elapsed = 0.0;
            for _ in 0..steps {
                elapsed += dt;
                wave_spawner::run(
                    &mut world,
                    &mut rng,
                    &mut scheduler,
                    &settings,
                    false,
                    elapsed,
                    &ship,
                );
            }
            let pirates = world.query::<&Pirate>().iter().count();
            (pirates, scheduler.next_wave_time)
        };

        // One 120-second frame must spawn the same waves, at the same
        // jittered times, as two minutes of 60 Hz ticks.
        let (coarse_count, coarse_next) = run_for(1, 120.0);
        let (fine_count, fine_next) = run_for(7200, DT);

        assert!(coarse_count > 0);
        assert_eq!(coarse_count, fine_count);
        assert!((coarse_next - fine_next).abs() < 1.0e-9);
    }

    #[test]
    fn ambient_waves_arrive_off_screen() {
        let mut level = empty_level(23);
        level.spawn.interval = 2.0;
        let mut engine = engine_for(level);

        for _ in 0..(4.0 / DT) as u32 {
            engine.update(DT, &idle());
        }
        assert!(count::<Pirate>(&engine) >= 2);
        let ship_pos = engine.ship().pos.vec();
        for (_entity, (pirate, pos)) in engine
            .world()
            .query::<(&Pirate, &Position)>()
            .iter()
        {
            assert!(!pirate.base_spawned);
            // Spawned well outside the viewport, even after steering in.
            assert!(pos.vec().distance(ship_pos) > VIEW_HALF_HEIGHT);
        }
    }
}

mod heat {
    use super::*;

    #[test]
    fn overheat_latches_until_fully_cooled() {
        let mut ws = WeaponState::default();
        let mut events = Vec::new();

        accrue_heat(&mut ws, 1.2, &mut events);
        assert!(ws.overheated);
        assert_eq!(ws.heat, 1.0);
        assert_eq!(events, vec![GameEvent::Overheated]);

        // Partial cooling does not clear the latch.
        cool_heat(&mut ws, 0.6);
        assert!(ws.overheated);
        assert!(ws.heat > 0.0);

        cool_heat(&mut ws, 1.0);
        assert!(!ws.overheated);
        assert_eq!(ws.heat, 0.0);

        // Re-overheating emits a fresh event.
        accrue_heat(&mut ws, 1.0, &mut events);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn blaster_converts_held_trigger_into_discrete_shots() {
        let mut engine = engine_for(empty_level(29));
        engine.inventory.slots[0] = Some(starlode_core::inventory::Slot {
            item: Item::Weapon {
                kind: WeaponKind::Blaster,
            },
            quantity: 1,
        });
        let ship_pos = engine.ship().pos;
        let input = InputSnapshot {
            aim: Position::new(ship_pos.x + 200.0, ship_pos.y),
            thrust: false,
            fire: true,
            brake: false,
        };

        // One full second at 4 shots/sec.
        engine.update(1.0, &input);
        let player_bullets = engine
            .world()
            .query::<&Bullet>()
            .iter()
            .filter(|(_, b)| b.owner == BulletOwner::Player)
            .count();
        assert_eq!(player_bullets, 4);
        assert!(engine.weapon.heat > 0.0);

        // Releasing the trigger discards the fractional carry.
        engine.update(DT, &idle());
        assert_eq!(engine.weapon.blaster_carry, 0.0);
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn persistence_round_trips_progress() {
        let mut persist = PlayerPersist {
            credits: 750,
            ship_kind: ShipKind::Hauler,
            ..PlayerPersist::default()
        };
        persist.drones_purchased.insert(ShipKind::Hauler, 2);
        let engine = SimulationEngine::new(SimConfig {
            level: empty_level(31),
            persist: Some(persist.clone()),
        });

        let saved = engine.persist(true);
        assert_eq!(saved.credits, 750);
        assert_eq!(saved.ship_kind, ShipKind::Hauler);
        assert_eq!(saved.drones_purchased, persist.drones_purchased);
        let resources = saved.resources.unwrap();
        assert_eq!(resources.health, ShipKind::Hauler.stats().max_health);

        // Fresh-resource handoff drops the bars entirely.
        assert!(engine.persist(false).resources.is_none());
    }

    #[test]
    fn purchased_drones_deploy_up_to_the_hull_limit() {
        let mut level = empty_level(37);
        let mut shop = structure_spec(4200.0, 4000.0, StructureKind::Shop);
        shop.drone_stock = 2;
        level.structures.push(shop);

        let persist = PlayerPersist {
            credits: DRONE_PRICE,
            ..PlayerPersist::default()
        };
        let mut engine = SimulationEngine::new(SimConfig {
            level,
            persist: Some(persist),
        });
        let shop_entity: Entity = engine
            .world()
            .query::<&Structure>()
            .iter()
            .map(|(e, _)| e)
            .next()
            .unwrap();

        assert_eq!(engine.purchase_drone(shop_entity), Ok(()));
        assert_eq!(engine.credits(), 0);
        assert_eq!(
            engine.purchase_drone(shop_entity),
            Err(PurchaseError::InsufficientCredits)
        );

        engine.update(DT, &idle());
        assert_eq!(count::<starlode_core::components::Drone>(&engine), 1);
    }

    #[test]
    fn death_sequence_freezes_then_pauses() {
        let mut engine = engine_for(empty_level(41));
        engine.ship.health = 0.0;

        engine.update(DT, &idle());
        assert!(engine.death().is_dying());
        assert!(engine.drain_events().contains(&GameEvent::PlayerDied));

        for _ in 0..(DEATH_SEQUENCE_SECS / DT) as u32 + 2 {
            engine.update(DT, &idle());
        }
        assert_eq!(engine.death(), DeathSequence::DeathScreen);

        let frozen_tick = engine.time().tick;
        engine.update(DT, &idle());
        assert_eq!(engine.time().tick, frozen_tick);
    }

    #[test]
    fn warp_transition_pauses_the_world() {
        let mut engine = engine_for(empty_level(43));
        engine.update(DT, &idle());
        let tick = engine.time().tick;

        engine.start_warp();
        assert_eq!(engine.warp().phase, WarpPhase::BloomIn);

        engine.update(WARP_BLOOM_IN_SECS + 0.01, &idle());
        assert_eq!(engine.warp().phase, WarpPhase::Hold);
        assert_eq!(engine.time().tick, tick, "world advanced during warp");

        engine.update(WARP_HOLD_SECS + 0.01, &idle());
        engine.update(WARP_BLOOM_OUT_SECS + 0.01, &idle());
        assert!(!engine.warp().is_active());

        engine.update(DT, &idle());
        assert_eq!(engine.time().tick, tick + 1);
    }
}
