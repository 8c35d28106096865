//! Core types and definitions for the STARLODE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, geometry utilities, events, the inventory contract,
//! the level descriptor, and constants. It has no dependency on any
//! runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod input;
pub mod inventory;
pub mod items;
pub mod level;
pub mod state;
pub mod types;
pub mod weapons;

#[cfg(test)]
mod tests;
