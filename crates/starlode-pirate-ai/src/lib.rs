//! Pirate AI for STARLODE.
//!
//! Implements the pirate behavior state machine, steering math, and
//! kind/archetype-driven stat profiles as pure functions over plain
//! data. No ECS dependency.

pub mod fsm;
pub mod profiles;

#[cfg(test)]
mod tests;
