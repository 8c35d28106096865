//! Per-tick input sampled by the frontend.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Input snapshot handed to `update` once per tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// World-space aim position (cursor).
    pub aim: Position,
    pub thrust: bool,
    pub fire: bool,
    pub brake: bool,
}
