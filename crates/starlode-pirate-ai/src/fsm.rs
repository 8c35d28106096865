//! Pirate behavior state machine and steering math.
//!
//! Pure functions computing state transitions and goal steering for a
//! single pirate based on its kind, archetype, and surroundings. The
//! caller integrates velocity and adds avoidance on top.

use glam::DVec2;
use rand::Rng;

use starlode_core::constants::*;
use starlode_core::enums::{PirateArchetype, PirateKind, PirateState};

use crate::profiles;

/// Status of a pirate's home base, resolved by the caller this tick.
/// `None` means the pirate has no base (or the base is gone).
#[derive(Debug, Clone, Copy)]
pub struct BaseStatus {
    pub position: DVec2,
    pub radius: f64,
    pub aggroed: bool,
}

/// Input to the pirate FSM for a single entity.
pub struct PirateContext {
    pub kind: PirateKind,
    pub archetype: PirateArchetype,
    pub state: PirateState,
    pub state_timer: f64,
    pub position: DVec2,
    pub ship_position: DVec2,
    /// Stable orbit direction, +1.0 or -1.0.
    pub orbit_dir: f64,
    pub orbit_angle: f64,
    pub home_base: Option<BaseStatus>,
    pub dt: f64,
}

/// Kinematic result of a defense orbit step.
#[derive(Debug, Clone, Copy)]
pub struct OrbitSnap {
    pub position: DVec2,
    pub orbit_angle: f64,
}

/// Output from the pirate FSM.
pub struct PirateSteer {
    pub state: PirateState,
    pub state_timer: f64,
    /// Goal-seeking acceleration; zero while defending.
    pub accel: DVec2,
    /// Present only in defense orbit: position snap, velocity is zeroed.
    pub snap: Option<OrbitSnap>,
}

/// Evaluate one pirate for one tick. Defense orbit is re-evaluated every
/// tick, never latched: it holds exactly while the home base is alive and
/// un-aggroed.
pub fn evaluate(ctx: &PirateContext, rng: &mut impl Rng) -> PirateSteer {
    if let Some(base) = ctx.home_base {
        if !base.aggroed {
            return defense_orbit(ctx, base);
        }
    }

    let mut state = ctx.state;
    let mut state_timer = ctx.state_timer;

    // Falling out of defense goes straight back to the chase.
    if state == PirateState::DefenseOrbit {
        state = PirateState::Chase;
        state_timer = rng.gen_range(PIRATE_STATE_SECS_MIN..PIRATE_STATE_SECS_MAX);
    }

    state_timer -= ctx.dt;
    if state_timer <= 0.0 {
        state = if rng.gen_bool(0.5) {
            PirateState::Chase
        } else {
            PirateState::Circle
        };
        state_timer = rng.gen_range(PIRATE_STATE_SECS_MIN..PIRATE_STATE_SECS_MAX);
    }

    let accel_mag = profiles::accel(ctx.kind, ctx.archetype);
    let to_ship = (ctx.ship_position - ctx.position).normalize_or_zero();
    let accel = match state {
        PirateState::Chase => to_ship * accel_mag,
        PirateState::Circle => to_ship.perp() * (ctx.orbit_dir * accel_mag),
        PirateState::DefenseOrbit => DVec2::ZERO,
    };

    PirateSteer {
        state,
        state_timer,
        accel,
        snap: None,
    }
}

/// Kinematic defense orbit: position snapped to a circle around the base
/// at constant angular speed, velocity zeroed, non-combatant.
fn defense_orbit(ctx: &PirateContext, base: BaseStatus) -> PirateSteer {
    let orbit_angle =
        ctx.orbit_angle + ctx.orbit_dir * DEFENSE_ORBIT_ANGULAR_SPEED * ctx.dt;
    let orbit_radius = base.radius + DEFENSE_ORBIT_CLEARANCE;
    let position = base.position + DVec2::new(orbit_angle.cos(), orbit_angle.sin()) * orbit_radius;
    PirateSteer {
        state: PirateState::DefenseOrbit,
        state_timer: ctx.state_timer,
        accel: DVec2::ZERO,
        snap: Some(OrbitSnap {
            position,
            orbit_angle,
        }),
    }
}

/// Accumulate repulsive acceleration away from a circle obstacle. Returns
/// zero when outside the clearance radius or dead-centered.
pub fn avoidance(position: DVec2, obstacle: DVec2, clearance: f64) -> DVec2 {
    let away = position - obstacle;
    let dist = away.length();
    if dist <= 0.0 || dist >= clearance {
        return DVec2::ZERO;
    }
    // Repulsion ramps up linearly as the gap closes.
    away / dist * (AVOID_ACCEL * (1.0 - dist / clearance))
}

/// Ease the facing angle toward the acceleration direction. Only applies
/// above a small thrust threshold so idle pirates do not jitter. Returns
/// the new facing and the angular velocity of the change.
pub fn ease_facing(facing: f64, accel: DVec2, dt: f64) -> (f64, f64) {
    if accel.length() <= FACING_THRUST_EPSILON {
        return (facing, 0.0);
    }
    let target = accel.y.atan2(accel.x);
    let mut diff = target - facing;
    while diff > std::f64::consts::PI {
        diff -= std::f64::consts::TAU;
    }
    while diff < -std::f64::consts::PI {
        diff += std::f64::consts::TAU;
    }
    let step = diff * (1.0 - (-FACING_EASE_RATE * dt).exp());
    let angular_velocity = if dt > 0.0 { step / dt } else { 0.0 };
    (facing + step, angular_velocity)
}

/// Update the banking tilt from facing angular velocity: gain, clamp to
/// ±TILT_MAX, exponential decay.
pub fn update_tilt(tilt: f64, angular_velocity: f64, dt: f64) -> f64 {
    let decayed = tilt * (-TILT_DECAY_RATE * dt).exp();
    (decayed + angular_velocity * TILT_GAIN * dt).clamp(-TILT_MAX, TILT_MAX)
}

/// Unit aim direction leading a moving target by bullet travel time.
/// Falls back to the direct bearing for degenerate geometry, and to zero
/// when shooter and target coincide.
pub fn lead_aim(origin: DVec2, target: DVec2, target_vel: DVec2, bullet_speed: f64) -> DVec2 {
    let dist = origin.distance(target);
    if bullet_speed <= 0.0 {
        return (target - origin).normalize_or_zero();
    }
    let travel_time = dist / bullet_speed;
    let predicted = target + target_vel * travel_time;
    let dir = (predicted - origin).normalize_or_zero();
    if dir == DVec2::ZERO {
        (target - origin).normalize_or_zero()
    } else {
        dir
    }
}
