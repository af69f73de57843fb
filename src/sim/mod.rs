//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Collision, head_collision};
pub use grid::{Cell, Direction, Grid};
pub use snapshot::{Overlay, Snapshot};
pub use state::{GameState, RunState, Snake, start_head};
pub use tick::{Command, TickInput, TickOutcome, apply_input, tick};
