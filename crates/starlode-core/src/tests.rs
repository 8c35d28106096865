use glam::DVec2;

use crate::components::Asteroid;
use crate::enums::{OreKind, WeaponKind};
use crate::geometry::{bounce, push_out_overlap, ray_circle, viewport_edge_distance};
use crate::inventory::Inventory;
use crate::items::Item;
use crate::level::SpawnSettings;
use crate::state::{DeathSequence, WarpTransition};
use crate::enums::WarpPhase;
use crate::types::{Position, Velocity};

// ---- Geometry ----

#[test]
fn test_ray_circle_head_on_returns_d_minus_r() {
    // Ray aimed exactly at a circle center at distance d with radius r < d
    // must return d - r.
    let d = 200.0;
    let r = 30.0;
    let hit = ray_circle(
        DVec2::ZERO,
        DVec2::new(1.0, 0.0),
        DVec2::new(d, 0.0),
        r,
        1000.0,
    );
    let t = hit.expect("head-on ray should hit");
    assert!((t - (d - r)).abs() < 1e-9, "expected {}, got {}", d - r, t);
}

#[test]
fn test_ray_circle_behind_origin_misses() {
    let hit = ray_circle(
        DVec2::ZERO,
        DVec2::new(1.0, 0.0),
        DVec2::new(-200.0, 0.0),
        30.0,
        1000.0,
    );
    assert!(hit.is_none());
}

#[test]
fn test_ray_circle_beyond_max_len_misses() {
    let hit = ray_circle(
        DVec2::ZERO,
        DVec2::new(1.0, 0.0),
        DVec2::new(500.0, 0.0),
        30.0,
        100.0,
    );
    assert!(hit.is_none());
}

#[test]
fn test_ray_circle_lateral_miss() {
    let hit = ray_circle(
        DVec2::ZERO,
        DVec2::new(1.0, 0.0),
        DVec2::new(200.0, 100.0),
        30.0,
        1000.0,
    );
    assert!(hit.is_none());
}

#[test]
fn test_push_out_restores_radius_sum() {
    // Overlapping circles end up exactly at the radius sum, along the
    // pre-call separating normal.
    let cases = [
        (Position::new(105.0, 100.0), 10.0, 12.0),
        (Position::new(100.0, 93.0), 5.0, 9.0),
        (Position::new(96.0, 104.0), 8.0, 8.0),
    ];
    let obstacle = Position::new(100.0, 100.0);
    for (start, r_a, r_b) in cases {
        let expected_normal = (start.vec() - obstacle.vec()).normalize();
        let mut pos = start;
        let contact = push_out_overlap(&mut pos, obstacle, r_a, r_b).expect("should collide");
        let dist = pos.distance_to(&obstacle);
        assert!(
            (dist - (r_a + r_b)).abs() < 1e-9,
            "post-call distance {} != radius sum {}",
            dist,
            r_a + r_b
        );
        assert!((contact.normal - expected_normal).length() < 1e-9);
    }
}

#[test]
fn test_push_out_zero_distance_is_no_collision() {
    let mut pos = Position::new(50.0, 50.0);
    assert!(push_out_overlap(&mut pos, Position::new(50.0, 50.0), 10.0, 10.0).is_none());
    assert_eq!(pos, Position::new(50.0, 50.0));
}

#[test]
fn test_push_out_separated_is_no_collision() {
    let mut pos = Position::new(100.0, 0.0);
    assert!(push_out_overlap(&mut pos, Position::new(0.0, 0.0), 10.0, 10.0).is_none());
}

#[test]
fn test_bounce_reflects_only_inward_motion() {
    let normal = DVec2::new(0.0, -1.0);

    // Moving into the surface: reflected, inward speed returned.
    let mut vel = Velocity::new(3.0, 10.0);
    let impact = bounce(&mut vel, normal, 0.5);
    assert!((impact - 10.0).abs() < 1e-9);
    assert!((vel.y - (-5.0)).abs() < 1e-9, "normal component reflected by 1.5x");
    assert!((vel.x - 3.0).abs() < 1e-9, "tangential component unchanged");

    // Moving away: untouched, impact 0.
    let mut vel = Velocity::new(3.0, -10.0);
    let impact = bounce(&mut vel, normal, 0.5);
    assert_eq!(impact, 0.0);
    assert_eq!(vel, Velocity::new(3.0, -10.0));
}

#[test]
fn test_viewport_edge_distance() {
    let d = viewport_edge_distance(DVec2::new(1.0, 0.0), 640.0, 360.0);
    assert!((d - 640.0).abs() < 1e-9);
    let d = viewport_edge_distance(DVec2::new(0.0, 1.0), 640.0, 360.0);
    assert!((d - 360.0).abs() < 1e-9);
    // Diagonal exits through the nearer edge.
    let dir = DVec2::new(1.0, 1.0).normalize();
    let d = viewport_edge_distance(dir, 640.0, 360.0);
    assert!((d - 360.0 / dir.y).abs() < 1e-9);
}

// ---- Ore yield ----

#[test]
fn test_ore_yield_stepped_formula() {
    // Exact integers for tiers 1-6.
    let expected = [(15.0, 10), (25.0, 19), (35.0, 28), (45.0, 36), (55.0, 44), (65.0, 51)];
    for (radius, want) in expected {
        let asteroid = Asteroid {
            radius,
            ore: OreKind::Iron,
            health: 1.0,
            max_health: 1.0,
        };
        assert_eq!(
            asteroid.ore_yield(),
            want,
            "radius {} (tier {})",
            radius,
            asteroid.size_tier()
        );
    }
}

// ---- Inventory ----

#[test]
fn test_inventory_add_stacks_before_opening_slots() {
    let mut inv = Inventory::new(3);
    let ore = Item::Ore { kind: OreKind::Iron };

    assert_eq!(inv.add(ore, 60), 0);
    assert_eq!(inv.add(ore, 60), 0);
    // 120 total: one full stack of 100 plus one of 20, so two slots.
    assert_eq!(inv.slots.iter().flatten().count(), 2);
    assert_eq!(inv.count_of(&ore), 120);
}

#[test]
fn test_inventory_add_reports_leftover_when_full() {
    let mut inv = Inventory::new(1);
    let ore = Item::Ore { kind: OreKind::Gold };
    assert_eq!(inv.add(ore, 150), 50);
    assert_eq!(inv.count_of(&ore), 100);
    assert!(!inv.has_room_for(&ore, 1));
}

#[test]
fn test_inventory_charged_items_do_not_stack() {
    let mut inv = Inventory::new(2);
    assert!(inv.place_in_empty(Item::EnergyCell { charge: 50.0 }));
    assert!(inv.place_in_empty(Item::EnergyCell { charge: 50.0 }));
    assert!(!inv.place_in_empty(Item::EnergyCell { charge: 50.0 }));
}

#[test]
fn test_first_cell_with_charge_respects_minimum() {
    let mut inv = Inventory::new(3);
    inv.place_in_empty(Item::EnergyCell { charge: 0.5 });
    inv.place_in_empty(Item::EnergyCell { charge: 80.0 });

    let charge = inv.first_cell_with_charge(1.0).expect("second cell qualifies");
    assert!((*charge - 80.0).abs() < 1e-9);

    // Depleted cells block firing entirely.
    *charge = 0.0;
    assert!(inv.first_cell_with_charge(1.0).is_none());
}

#[test]
fn test_weapon_in_slot() {
    let mut inv = Inventory::new(2);
    inv.place_in_empty(Item::Weapon {
        kind: WeaponKind::MiningLaser,
    });
    assert_eq!(inv.weapon_in_slot(0), Some(WeaponKind::MiningLaser));
    assert_eq!(inv.weapon_in_slot(1), None);
    assert_eq!(inv.weapon_in_slot(7), None);
}

// ---- Spawn settings ----

#[test]
fn test_params_at_picks_latest_started_tier() {
    let json = r#"{
        "interval": 20.0,
        "size": 1,
        "tiers": [
            { "start_time": 60.0, "size": 3 },
            { "start_time": 120.0, "size": 5, "interval": 10.0 }
        ]
    }"#;
    let mut settings: SpawnSettings = serde_json::from_str(json).unwrap();
    settings.sanitize();

    assert_eq!(settings.params_at(0.0).size, 1);
    assert_eq!(settings.params_at(59.9).size, 1);
    assert_eq!(settings.params_at(60.0).size, 3);
    assert_eq!(settings.params_at(119.9).size, 3);
    assert_eq!(settings.params_at(500.0).size, 5);
    assert_eq!(settings.next_tier_start_after(0.0), Some(60.0));
    assert_eq!(settings.next_tier_start_after(60.0), Some(120.0));
    assert_eq!(settings.next_tier_start_after(120.0), None);
}

#[test]
fn test_sanitize_repairs_malformed_tiers() {
    let json = r#"{
        "interval": 0.0,
        "kinds": [],
        "tiers": [
            { "start_time": 90.0 },
            { "start_time": 30.0, "interval": -5.0 }
        ]
    }"#;
    let mut settings: SpawnSettings = serde_json::from_str(json).unwrap();
    settings.sanitize();

    assert!(settings.interval > 0.0);
    assert!(!settings.kinds.is_empty());
    // Tiers sorted by start time, bad interval repaired.
    assert_eq!(settings.tiers[0].start_time, 30.0);
    assert!(settings.tiers[0].interval > 0.0);
}

// ---- Warp / death phase machines ----

#[test]
fn test_warp_transition_phase_order() {
    let mut warp = WarpTransition::default();
    assert!(!warp.is_active());

    warp.start();
    assert_eq!(warp.phase, WarpPhase::BloomIn);

    // Step in coarse increments; phases must appear in order.
    let mut seen = vec![warp.phase];
    for _ in 0..100 {
        warp.advance(0.1);
        if seen.last() != Some(&warp.phase) {
            seen.push(warp.phase);
        }
    }
    assert_eq!(
        seen,
        vec![
            WarpPhase::BloomIn,
            WarpPhase::Hold,
            WarpPhase::BloomOut,
            WarpPhase::None
        ]
    );
}

#[test]
fn test_death_sequence_states() {
    let alive = DeathSequence::Alive;
    assert!(!alive.is_dying());
    let dying = DeathSequence::Dying { remaining: 1.0 };
    assert!(dying.is_dying());
}
