#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use starlode_core::constants::*;
    use starlode_core::enums::{PirateArchetype, PirateKind, PirateState};

    use crate::fsm::{
        avoidance, ease_facing, evaluate, lead_aim, update_tilt, BaseStatus, PirateContext,
    };
    use crate::profiles;

    fn make_context(state: PirateState, home_base: Option<BaseStatus>) -> PirateContext {
        PirateContext {
            kind: PirateKind::Normal,
            archetype: PirateArchetype::Standard,
            state,
            state_timer: 10.0,
            position: DVec2::new(0.0, 0.0),
            ship_position: DVec2::new(300.0, 0.0),
            orbit_dir: 1.0,
            orbit_angle: 0.0,
            home_base,
            dt: 1.0 / 30.0,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_chase_accelerates_toward_ship() {
        let ctx = make_context(PirateState::Chase, None);
        let steer = evaluate(&ctx, &mut rng());
        assert_eq!(steer.state, PirateState::Chase);
        assert!(steer.accel.x > 0.0, "should accelerate toward +x ship");
        assert!(steer.accel.y.abs() < 1e-9);
        assert!(steer.snap.is_none());
    }

    #[test]
    fn test_circle_accelerates_perpendicular() {
        let ctx = make_context(PirateState::Circle, None);
        let steer = evaluate(&ctx, &mut rng());
        assert_eq!(steer.state, PirateState::Circle);
        // Perpendicular to the +x bearing: pure y.
        assert!(steer.accel.x.abs() < 1e-9);
        assert!(steer.accel.y.abs() > 1.0);
    }

    #[test]
    fn test_state_flips_when_timer_expires() {
        let mut ctx = make_context(PirateState::Chase, None);
        ctx.state_timer = 0.01;
        let steer = evaluate(&ctx, &mut rng());
        assert!(
            steer.state_timer >= PIRATE_STATE_SECS_MIN
                && steer.state_timer <= PIRATE_STATE_SECS_MAX,
            "fresh timer in the 2-6s window, got {}",
            steer.state_timer
        );
    }

    #[test]
    fn test_defense_orbit_while_base_unaggroed() {
        let base = BaseStatus {
            position: DVec2::new(100.0, 100.0),
            radius: 90.0,
            aggroed: false,
        };
        let ctx = make_context(PirateState::Chase, Some(base));
        let steer = evaluate(&ctx, &mut rng());
        assert_eq!(steer.state, PirateState::DefenseOrbit);
        let snap = steer.snap.expect("defense orbit is kinematic");
        let orbit_radius = base.radius + DEFENSE_ORBIT_CLEARANCE;
        let dist = snap.position.distance(base.position);
        assert!((dist - orbit_radius).abs() < 1e-9);
        assert!(steer.accel == DVec2::ZERO);
    }

    #[test]
    fn test_defense_exits_when_base_aggroed() {
        // Re-evaluated every tick: the moment the base aggroes, the pirate
        // falls back to chasing.
        let base = BaseStatus {
            position: DVec2::new(100.0, 100.0),
            radius: 90.0,
            aggroed: true,
        };
        let ctx = make_context(PirateState::DefenseOrbit, Some(base));
        let steer = evaluate(&ctx, &mut rng());
        assert_ne!(steer.state, PirateState::DefenseOrbit);
        assert!(steer.snap.is_none());
    }

    #[test]
    fn test_defense_exits_when_base_gone() {
        let ctx = make_context(PirateState::DefenseOrbit, None);
        let steer = evaluate(&ctx, &mut rng());
        assert_ne!(steer.state, PirateState::DefenseOrbit);
    }

    #[test]
    fn test_avoidance_pushes_away_and_fades() {
        let push = avoidance(DVec2::new(10.0, 0.0), DVec2::ZERO, 40.0);
        assert!(push.x > 0.0);
        assert_eq!(push.y, 0.0);

        // Beyond clearance: no repulsion.
        let none = avoidance(DVec2::new(50.0, 0.0), DVec2::ZERO, 40.0);
        assert_eq!(none, DVec2::ZERO);

        // Dead center: no direction, skip.
        let center = avoidance(DVec2::ZERO, DVec2::ZERO, 40.0);
        assert_eq!(center, DVec2::ZERO);

        // Closer means stronger.
        let near = avoidance(DVec2::new(5.0, 0.0), DVec2::ZERO, 40.0);
        assert!(near.length() > push.length());
    }

    #[test]
    fn test_facing_ignores_tiny_thrust() {
        let (facing, av) = ease_facing(1.0, DVec2::new(0.1, 0.0), 1.0 / 30.0);
        assert_eq!(facing, 1.0);
        assert_eq!(av, 0.0);
    }

    #[test]
    fn test_facing_converges_to_accel_direction() {
        let mut facing = 0.0;
        for _ in 0..200 {
            let (f, _) = ease_facing(facing, DVec2::new(0.0, 100.0), 1.0 / 30.0);
            facing = f;
        }
        assert!((facing - std::f64::consts::FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_facing_takes_shortest_arc() {
        // From just below +pi toward just above -pi: must wrap, not spin.
        let (facing, _) = ease_facing(3.0, DVec2::new(-100.0, -1.0), 1.0 / 30.0);
        assert!(facing > 3.0, "should push past pi, not unwind through 0");
    }

    #[test]
    fn test_tilt_clamped_and_decaying() {
        let tilt = update_tilt(0.0, 1000.0, 1.0 / 30.0);
        assert!((tilt - TILT_MAX).abs() < 1e-9, "tilt clamps at +max");

        let mut tilt = TILT_MAX;
        for _ in 0..300 {
            tilt = update_tilt(tilt, 0.0, 1.0 / 30.0);
        }
        assert!(tilt.abs() < 1e-3, "tilt decays to zero without input");
    }

    #[test]
    fn test_lead_aim_leads_moving_target() {
        let dir = lead_aim(
            DVec2::ZERO,
            DVec2::new(300.0, 0.0),
            DVec2::new(0.0, 100.0),
            300.0,
        );
        // One second of travel: predicted position (300, 100).
        let expected = DVec2::new(300.0, 100.0).normalize();
        assert!((dir - expected).length() < 1e-9);
    }

    #[test]
    fn test_lead_aim_degenerate_cases() {
        assert_eq!(
            lead_aim(DVec2::ZERO, DVec2::ZERO, DVec2::ZERO, 300.0),
            DVec2::ZERO
        );
        let dir = lead_aim(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::ZERO, 0.0);
        assert!((dir - DVec2::new(1.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_profiles_multipliers() {
        assert!(profiles::max_health(PirateKind::Sturdy, PirateArchetype::Standard)
            > profiles::max_health(PirateKind::Normal, PirateArchetype::Standard));
        assert!(profiles::max_health(PirateKind::Normal, PirateArchetype::Drone)
            < profiles::max_health(PirateKind::Normal, PirateArchetype::Standard));
        assert!(profiles::max_speed(PirateKind::Fast, PirateArchetype::Drone)
            > profiles::max_speed(PirateKind::Normal, PirateArchetype::Standard));
        assert_eq!(
            profiles::archetype_profile(PirateArchetype::Shotgun).pellets,
            3
        );
    }
}
