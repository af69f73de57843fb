//! Game state and core simulation types
//!
//! `GameState` is the single source of truth for the board. Every mutation
//! goes through the run-state gated operations below or through `tick`.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid};
use super::snapshot::{Overlay, Snapshot};
use super::tick::{TickOutcome, tick};
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Freshly reset, waiting for Start
    #[default]
    NotStarted,
    /// Ticks advance the snake
    Running,
    /// Frozen until resumed
    Paused,
    /// Collision happened; only reset leaves this state
    GameOver,
}

/// The snake body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Straight snake of `length` cells trailing behind `head`, facing `dir`
    pub fn straight(head: Cell, dir: Direction, length: usize) -> Self {
        let back = dir.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut cell = head;
        for _ in 0..length {
            body.push_back(cell);
            cell = cell.step(back);
        }
        Self { body }
    }

    /// Build from explicit cells, head first
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) grid: Grid,
    pub(crate) snake: Snake,
    /// `None` only when the snake covers the whole board
    pub(crate) food: Option<Cell>,
    pub(crate) score: u32,
    /// Heading applied on the last tick
    pub(crate) direction: Direction,
    /// Heading requested since the last tick
    pub(crate) pending_direction: Option<Direction>,
    pub(crate) run_state: RunState,
    /// Ticks advanced since the last reset
    pub(crate) time_ticks: u64,
}

impl GameState {
    /// Create a reset game on `grid`, with food placement driven by `seed`
    ///
    /// The grid must be at least `MIN_GRID_WIDTH` x `MIN_GRID_HEIGHT`, or
    /// the starting snake does not fit.
    pub fn new(grid: Grid, seed: u64) -> Self {
        debug_assert!(
            grid.width >= MIN_GRID_WIDTH && grid.height >= MIN_GRID_HEIGHT,
            "grid {}x{} below minimum",
            grid.width,
            grid.height
        );
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid,
            snake: Snake::straight(start_head(&grid), Direction::Right, INITIAL_SNAKE_LENGTH),
            food: None,
            score: 0,
            direction: Direction::Right,
            pending_direction: None,
            run_state: RunState::NotStarted,
            time_ticks: 0,
        };
        state.reset();
        state
    }

    /// Create a not-started game with an explicit snake (head first)
    ///
    /// Cells must be unique and on the board.
    pub fn with_snake(
        grid: Grid,
        cells: impl IntoIterator<Item = Cell>,
        direction: Direction,
        seed: u64,
    ) -> Self {
        let snake = Snake::from_cells(cells);
        debug_assert!(!snake.is_empty());
        debug_assert!(snake.iter().all(|&c| grid.contains(c)));

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid,
            snake,
            food: None,
            score: 0,
            direction,
            pending_direction: None,
            run_state: RunState::NotStarted,
            time_ticks: 0,
        };
        state.food = state.spawn_food();
        state
    }

    /// Put the board back to its starting layout
    pub fn reset(&mut self) {
        self.snake = Snake::straight(start_head(&self.grid), Direction::Right, INITIAL_SNAKE_LENGTH);
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.score = 0;
        self.time_ticks = 0;
        self.run_state = RunState::NotStarted;
        self.food = self.spawn_food();
        log::info!("Game reset (food at {:?})", self.food);
    }

    /// NotStarted -> Running; anything else is ignored
    pub fn start(&mut self) -> bool {
        if self.run_state != RunState::NotStarted {
            return false;
        }
        self.run_state = RunState::Running;
        log::info!("Game started");
        true
    }

    /// Running <-> Paused; ignored before start and after game over
    pub fn toggle_pause(&mut self) -> bool {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::NotStarted | RunState::GameOver => return false,
        };
        log::debug!("Run state now {:?}", self.run_state);
        true
    }

    /// Running -> Paused; never resumes
    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.run_state = RunState::Paused;
        log::debug!("Run state now {:?}", self.run_state);
        true
    }

    /// Request a new heading for the next tick
    ///
    /// A reversal of the heading the snake is actually moving in is ignored,
    /// so two quick presses inside one tick can never fold the snake back.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if dir.is_opposite(self.direction) {
            return false;
        }
        self.pending_direction = Some(dir);
        true
    }

    /// Advance one step (no-op unless running)
    pub fn tick(&mut self) -> TickOutcome {
        tick(self)
    }

    /// Pick a food cell not covered by the snake
    ///
    /// Rejection sampling first, then a uniform pick over the free cells so
    /// a crowded board still terminates. Returns `None` on a full board.
    pub(crate) fn spawn_food(&mut self) -> Option<Cell> {
        if self.grid.cell_count() == 0 {
            return None;
        }
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = Cell::new(
                self.rng.random_range(0..self.grid.width),
                self.rng.random_range(0..self.grid.height),
            );
            if !self.snake.contains(cell) {
                log::debug!("Food spawned at ({}, {})", cell.x, cell.y);
                return Some(cell);
            }
        }

        let free: Vec<Cell> = self
            .grid
            .cells()
            .filter(|&c| !self.snake.contains(c))
            .collect();
        if free.is_empty() {
            log::info!("Board full, no cell left for food");
            return None;
        }
        let cell = free[self.rng.random_range(0..free.len())];
        log::debug!("Food spawned at ({}, {}) from free list", cell.x, cell.y);
        Some(cell)
    }

    /// Everything the presentation layer needs to draw a frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width,
            height: self.grid.height,
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            score: self.score,
            run_state: self.run_state,
            overlay: Overlay::for_state(self.run_state),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}

/// Head cell of a freshly reset snake
///
/// The classic board starts at (5, 5); smaller boards pull the head toward
/// the middle while leaving room for the body behind it.
pub fn start_head(grid: &Grid) -> Cell {
    let min_x = INITIAL_SNAKE_LENGTH as i32 - 1;
    let x = START_HEAD.0.min(grid.width / 2).max(min_x);
    let y = START_HEAD.1.min(grid.height / 2);
    Cell::new(x, y)
}
