//! Collision detection for the snake head
//!
//! A move is terminal when the new head leaves the board or lands on any
//! current body cell. The tail still counts: it is only removed after the
//! move has been accepted.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Head left the board
    Wall,
    /// Head ran into the snake's own body
    SelfHit,
}

/// Check the candidate head against the board edges and the current body
pub fn head_collision<'a>(
    grid: &Grid,
    body: impl IntoIterator<Item = &'a Cell>,
    new_head: Cell,
) -> Option<Collision> {
    if !grid.contains(new_head) {
        return Some(Collision::Wall);
    }
    if body.into_iter().any(|&c| c == new_head) {
        return Some(Collision::SelfHit);
    }
    None
}
