//! Simulation systems, run in a fixed order each tick by the engine.

pub mod bullets;
pub mod cleanup;
pub mod drones;
pub mod items;
pub mod particles;
pub mod pirates;
pub mod ship;
pub mod snapshot;
pub mod wave_spawner;
pub mod weapons;
