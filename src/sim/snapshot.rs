//! Render-ready view of the game state

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use super::state::RunState;

/// Text overlay shown over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    PressStart,
    Paused,
    GameOver,
}

impl Overlay {
    pub fn for_state(state: RunState) -> Option<Self> {
        match state {
            RunState::NotStarted => Some(Overlay::PressStart),
            RunState::Paused => Some(Overlay::Paused),
            RunState::GameOver => Some(Overlay::GameOver),
            RunState::Running => None,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Overlay::PressStart => "Press START",
            Overlay::Paused => "Paused",
            Overlay::GameOver => "GAME OVER",
        }
    }
}

/// One frame's worth of state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    /// Snake cells, head first
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub run_state: RunState,
    pub overlay: Option<Overlay>,
}

impl Snapshot {
    /// Score label as shown in the HUD
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Plain-text board: `@` head, `o` body, `*` food, `.` empty
    pub fn to_ascii(&self) -> String {
        let w = self.width.max(0) as usize;
        let h = self.height.max(0) as usize;
        let mut rows = vec![vec!['.'; w]; h];

        let mut put = |cell: Cell, ch: char| {
            if cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < w && (cell.y as usize) < h {
                rows[cell.y as usize][cell.x as usize] = ch;
            }
        };

        if let Some(food) = self.food {
            put(food, '*');
        }
        for (i, &cell) in self.snake.iter().enumerate() {
            put(cell, if i == 0 { '@' } else { 'o' });
        }

        let mut out = String::with_capacity((w + 1) * (h + 2));
        out.push_str(&self.score_label());
        if let Some(overlay) = self.overlay {
            out.push_str("  ");
            out.push_str(overlay.text());
        }
        out.push('\n');
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
