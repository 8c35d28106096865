//! Simulation constants and tuning parameters.

// --- Viewport (camera is centered on the ship) ---

/// Half the viewport width, in world units.
pub const VIEW_HALF_WIDTH: f64 = 640.0;

/// Half the viewport height, in world units.
pub const VIEW_HALF_HEIGHT: f64 = 360.0;

/// Extra margin for on-screen checks and bullet culling.
pub const VIEW_MARGIN: f64 = 60.0;

// --- Ship ---

/// Baseline velocity damping per second.
pub const SHIP_FRICTION: f64 = 0.6;

/// Additional damping per second while the brake is held.
pub const SHIP_BRAKE_FRICTION: f64 = 2.5;

/// Restitution for ship-vs-asteroid/structure bounces.
pub const SHIP_RESTITUTION: f64 = 0.5;

/// Impact speed → hull damage linear scale.
pub const IMPACT_DAMAGE_SCALE: f64 = 0.12;

/// Cap on damage from a single impact.
pub const IMPACT_DAMAGE_CAP: f64 = 25.0;

/// Fuel consumed per second of held thrust.
pub const FUEL_PER_THRUST_SEC: f64 = 1.2;

/// Baseline oxygen drain per second.
pub const OXYGEN_DRAIN_PER_SEC: f64 = 0.35;

/// Extra oxygen drain per second outside the level border.
pub const BORDER_OXYGEN_DRAIN_PER_SEC: f64 = 2.0;

/// Health drain per second once oxygen is exhausted.
pub const SUFFOCATION_DAMAGE_PER_SEC: f64 = 5.0;

/// Fraction of a resource bar below which a low-resource alert fires.
pub const LOW_RESOURCE_FRACTION: f64 = 0.25;

/// Speed/acceleration multiplier while slowed.
pub const SLOW_FACTOR: f64 = 0.8;

/// Duration of the slowing debuff in seconds.
pub const SLOW_DURATION_SECS: f64 = 3.0;

/// Oxygen or fuel drained by one breaching hit.
pub const BREACH_DRAIN: f64 = 10.0;

/// Duration of the uninterruptible death sequence in seconds.
pub const DEATH_SEQUENCE_SECS: f64 = 2.5;

// --- Warp transition ---

/// Bloom-in phase duration (seconds).
pub const WARP_BLOOM_IN_SECS: f64 = 0.8;

/// Hold phase duration (seconds); the level swap happens here.
pub const WARP_HOLD_SECS: f64 = 0.5;

/// Bloom-out phase duration (seconds).
pub const WARP_BLOOM_OUT_SECS: f64 = 0.8;

// --- Pirates ---

/// Base pirate health before kind/archetype multipliers.
pub const PIRATE_BASE_HEALTH: f64 = 30.0;

/// Base pirate collision radius before size multiplier.
pub const PIRATE_RADIUS: f64 = 14.0;

/// Base pirate steering acceleration.
pub const PIRATE_ACCEL: f64 = 120.0;

/// Base pirate speed cap.
pub const PIRATE_MAX_SPEED: f64 = 150.0;

/// Minimum seconds between chase/circle state flips.
pub const PIRATE_STATE_SECS_MIN: f64 = 2.0;

/// Maximum seconds between chase/circle state flips.
pub const PIRATE_STATE_SECS_MAX: f64 = 6.0;

/// Range within which a pirate will fire at the player.
pub const PIRATE_FIRE_RANGE: f64 = 450.0;

/// Minimum fire cooldown (seconds).
pub const PIRATE_FIRE_SECS_MIN: f64 = 1.0;

/// Maximum fire cooldown (seconds).
pub const PIRATE_FIRE_SECS_MAX: f64 = 3.0;

/// Pirate bullet lifespan (seconds).
pub const PIRATE_BULLET_LIFE_SECS: f64 = 2.2;

/// Repulsion radius between pirates.
pub const PIRATE_AVOID_RADIUS: f64 = 40.0;

/// Repulsion radius around the player ship.
pub const PIRATE_SHIP_AVOID_RADIUS: f64 = 60.0;

/// Clearance added around obstacles for avoidance steering.
pub const AVOID_CLEARANCE: f64 = 50.0;

/// Magnitude of avoidance acceleration.
pub const AVOID_ACCEL: f64 = 180.0;

/// Thrust magnitude below which facing does not chase acceleration.
pub const FACING_THRUST_EPSILON: f64 = 1.0;

/// Facing easing rate (per second).
pub const FACING_EASE_RATE: f64 = 6.0;

/// Tilt gained per radian/second of facing angular velocity.
pub const TILT_GAIN: f64 = 0.35;

/// Maximum banking tilt in radians.
pub const TILT_MAX: f64 = 0.5;

/// Tilt exponential decay rate (per second).
pub const TILT_DECAY_RATE: f64 = 4.0;

/// Angular speed of the defense orbit (radians per second).
pub const DEFENSE_ORBIT_ANGULAR_SPEED: f64 = 0.6;

/// Clearance between a defense orbit and its base's hull.
pub const DEFENSE_ORBIT_CLEARANCE: f64 = 45.0;

/// Minimum scrap items dropped by a pirate.
pub const PIRATE_SCRAP_MIN: u32 = 3;

/// Maximum scrap items dropped by a pirate.
pub const PIRATE_SCRAP_MAX: u32 = 5;

// --- Wave spawning ---

/// Fixed wave cadence for debug levels (seconds).
pub const DEBUG_WAVE_INTERVAL_SECS: f64 = 5.0;

/// Group size for debug-level waves.
pub const DEBUG_WAVE_SIZE: u32 = 2;

/// Random jitter applied to wave intervals (fraction of the interval).
pub const WAVE_INTERVAL_JITTER: f64 = 0.3;

/// Minimum spawn distance from the ship (just off-screen).
pub const WAVE_SPAWN_DIST_MIN: f64 = 800.0;

/// Maximum spawn distance from the ship.
pub const WAVE_SPAWN_DIST_MAX: f64 = 1000.0;

// --- Pirate bases ---

/// Base hull radius at tier 1.
pub const BASE_RADIUS: f64 = 90.0;

/// Base health at tier 1.
pub const BASE_HEALTH: f64 = 150.0;

/// Aggro radius at tier 1.
pub const BASE_AGGRO_RANGE: f64 = 380.0;

/// Per-tier linear scale step for radius/health/aggro range.
pub const BASE_TIER_STEP: f64 = 0.25;

/// Distance from the base hull at which reinforcements appear.
pub const BASE_REINFORCE_OFFSET: f64 = 30.0;

/// Fallback drop when a base has no configured drop list: scrap count.
pub const BASE_FALLBACK_SCRAP: u32 = 50;

// --- Drones ---

/// Laser fire period (seconds).
pub const DRONE_LASER_PERIOD_SECS: f64 = 5.0;

/// Portion of the period the beam stays active (seconds).
pub const DRONE_LASER_ACTIVE_SECS: f64 = 0.5;

/// Drone beam range.
pub const DRONE_LASER_RANGE: f64 = 260.0;

/// Drone beam damage per second while connected.
pub const DRONE_LASER_DPS: f64 = 18.0;

/// Spark particles per second while a drone beam connects.
pub const DRONE_SPARK_RATE: f64 = 12.0;

/// Drone steering acceleration.
pub const DRONE_ACCEL: f64 = 160.0;

/// Drone speed cap.
pub const DRONE_MAX_SPEED: f64 = 220.0;

/// Drone collision radius.
pub const DRONE_RADIUS: f64 = 8.0;

/// Margin from the viewport edge at which drones are pushed back.
pub const DRONE_EDGE_MARGIN: f64 = 60.0;

/// Distance from the ship beyond which the return bias kicks in.
pub const DRONE_LEASH_DIST: f64 = 420.0;

/// Magnitude of the return bias acceleration.
pub const DRONE_LEASH_ACCEL: f64 = 140.0;

/// Preferred orbit distance around a target while circling.
pub const DRONE_ORBIT_DIST: f64 = 120.0;

/// Seconds between drone chase/circle flips.
pub const DRONE_STATE_SECS: f64 = 3.0;

/// Credit price of one companion drone.
pub const DRONE_PRICE: u64 = 400;

// --- Weapons ---

/// Laser damage multiplier against pirates and bases.
pub const LASER_ENEMY_FACTOR: f64 = 0.7;

/// Duration of the asteroid vibration effect after a laser hit.
pub const VIBRATE_SECS: f64 = 0.15;

/// Spark particles per second while the mining laser connects.
pub const LASER_SPARK_RATE: f64 = 10.0;

/// Idle cooling rate applied when no weapon is equipped.
pub const WEAPON_COOL_DEFAULT: f64 = 0.5;

// --- Floating items ---

/// Range at which items are pulled toward the ship.
pub const MAGNET_RANGE: f64 = 140.0;

/// Magnetic acceleration toward the ship.
pub const MAGNET_ACCEL: f64 = 600.0;

/// Pickup radius added to the ship's own radius.
pub const PICKUP_RADIUS: f64 = 24.0;

/// Item velocity damping per second.
pub const ITEM_DRAG: f64 = 1.6;

/// Speed below which item velocity snaps to zero.
pub const ITEM_STOP_SPEED: f64 = 2.0;

/// Scatter speed range for dropped items.
pub const ITEM_SCATTER_SPEED_MIN: f64 = 20.0;
pub const ITEM_SCATTER_SPEED_MAX: f64 = 70.0;

// --- Ore yield ---

/// Ore dropped by a tier-1 asteroid.
pub const ORE_YIELD_BASE: u32 = 10;

/// Per-tier yield increment at tier 2.
pub const ORE_YIELD_INC_START: u32 = 9;

/// Floor for the per-tier increment.
pub const ORE_YIELD_INC_FLOOR: u32 = 4;

// --- Particles ---

/// Spark velocity damping per second.
pub const SPARK_DRAG: f64 = 3.0;

/// Spark lifetime range (seconds).
pub const SPARK_LIFE_MIN: f64 = 0.2;
pub const SPARK_LIFE_MAX: f64 = 0.6;

/// Spark scatter speed range.
pub const SPARK_SPEED_MIN: f64 = 40.0;
pub const SPARK_SPEED_MAX: f64 = 160.0;

/// Sparks spawned per unit of impact speed.
pub const IMPACT_SPARKS_PER_SPEED: f64 = 0.05;

/// Cap on sparks from one impact.
pub const IMPACT_SPARKS_MAX: u32 = 8;
