//! Headless simulation engine for STARLODE.
//!
//! `SimulationEngine` owns the hecs world and the player ship, advances
//! the simulation by one `update(dt)` per rendered frame, and produces
//! render snapshots. Completely headless, enabling deterministic testing.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{PurchaseError, SimConfig, SimulationEngine};
pub use systems::snapshot::RenderSnapshot;

#[cfg(test)]
mod tests;
