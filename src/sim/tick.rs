//! Fixed-step simulation tick
//!
//! One call moves the snake exactly one cell.

use super::collision::{Collision, head_collision};
use super::grid::Direction;
use super::state::{GameState, RunState};

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    /// Pause if running; never resumes
    Pause,
    Reset,
    Turn(Direction),
}

/// Commands gathered between ticks, in press order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    commands: Vec<Command>,
}

impl TickInput {
    /// Append a command; a reset discards everything queued before it
    pub fn push(&mut self, cmd: Command) {
        if cmd == Command::Reset {
            self.commands.clear();
        }
        self.commands.push(cmd);
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<Command> for TickInput {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut input = Self::default();
        for cmd in iter {
            input.push(cmd);
        }
        input
    }
}

/// What a tick did, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Idle,
    /// Snake advanced one cell
    Moved,
    /// Snake ate and grew; carries the new score
    Ate { score: u32 },
    /// Run ended this tick
    GameOver(Collision),
}

/// Replay queued commands in the order they were pressed
///
/// Each command sees the state left by the one before it, so Pause before
/// Start is a no-op and Start still runs. Turns are checked against the
/// heading the snake is moving in: of Up then Left while heading Right only
/// Up is kept.
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    for &cmd in input.commands() {
        match cmd {
            Command::Start => {
                state.start();
            }
            Command::TogglePause => {
                state.toggle_pause();
            }
            Command::Pause => {
                state.pause();
            }
            Command::Reset => state.reset(),
            Command::Turn(dir) => {
                state.set_direction(dir);
            }
        }
    }
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.run_state != RunState::Running {
        return TickOutcome::Idle;
    }

    if let Some(dir) = state.pending_direction.take() {
        state.direction = dir;
    }

    let new_head = state.snake.head().step(state.direction);

    // The tail has not moved yet, so it still blocks the head
    if let Some(collision) = head_collision(&state.grid, state.snake.iter(), new_head) {
        state.run_state = RunState::GameOver;
        log::info!(
            "Game over: {:?} at ({}, {}), score {}",
            collision,
            new_head.x,
            new_head.y,
            state.score
        );
        return TickOutcome::GameOver(collision);
    }

    state.time_ticks += 1;
    state.snake.push_head(new_head);

    if state.food == Some(new_head) {
        state.score += 1;
        state.food = state.spawn_food();
        TickOutcome::Ate { score: state.score }
    } else {
        state.snake.pop_tail();
        TickOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
    use crate::sim::grid::{Cell, Grid};
    use proptest::prelude::*;

    fn classic_grid() -> Grid {
        Grid::new(GRID_WIDTH, GRID_HEIGHT)
    }

    fn start_cells() -> [Cell; 3] {
        [Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
    }

    #[test]
    fn test_tick_idle_until_started() {
        let mut state = GameState::new(classic_grid(), 1);
        let before = state.snapshot();
        assert_eq!(tick(&mut state), TickOutcome::Idle);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_three_ticks_right() {
        let mut state = GameState::with_snake(classic_grid(), start_cells(), Direction::Right, 42);
        // Keep food off the path
        state.food = Some(Cell::new(20, 15));
        state.start();

        for x in 6..=8 {
            assert_eq!(tick(&mut state), TickOutcome::Moved);
            assert_eq!(state.snake().head(), Cell::new(x, 5));
            assert_eq!(state.snake().len(), 3);
        }
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_ticks(), 3);
        assert_eq!(state.snake().tail(), Some(Cell::new(6, 5)));
    }

    #[test]
    fn test_left_wall_game_over() {
        let cells = [Cell::new(0, 5), Cell::new(1, 5), Cell::new(2, 5)];
        let mut state = GameState::with_snake(classic_grid(), cells, Direction::Left, 42);
        state.start();

        assert_eq!(tick(&mut state), TickOutcome::GameOver(Collision::Wall));
        assert_eq!(state.run_state(), RunState::GameOver);
        // Terminal snapshot keeps the body where it was
        assert_eq!(state.snake().head(), Cell::new(0, 5));
    }

    #[test]
    fn test_eat_food_grows() {
        let mut state = GameState::with_snake(classic_grid(), start_cells(), Direction::Right, 42);
        state.food = Some(Cell::new(6, 5));
        state.start();

        assert_eq!(tick(&mut state), TickOutcome::Ate { score: 1 });
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.snake().tail(), Some(Cell::new(3, 5)));

        let food = state.food().expect("board has room");
        assert!(!state.snake().contains(food));
        assert!(state.grid().contains(food));
    }

    #[test]
    fn test_self_collision() {
        // Hook shape: turning left from (5,5) runs into (4,5)
        let cells = [
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(4, 6),
            Cell::new(4, 5),
            Cell::new(4, 4),
        ];
        let mut state = GameState::with_snake(classic_grid(), cells, Direction::Up, 42);
        state.food = Some(Cell::new(20, 15));
        state.start();
        state.set_direction(Direction::Left);

        assert_eq!(tick(&mut state), TickOutcome::GameOver(Collision::SelfHit));
    }

    #[test]
    fn test_moving_into_tail_collides() {
        // Square loop: head chases its own tail one step behind
        let cells = [
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
            Cell::new(0, 0),
        ];
        let mut state = GameState::with_snake(Grid::new(4, 4), cells, Direction::Up, 3);
        state.food = Some(Cell::new(3, 3));
        state.start();
        state.set_direction(Direction::Left);

        assert_eq!(tick(&mut state), TickOutcome::GameOver(Collision::SelfHit));
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut state = GameState::new(classic_grid(), 9);
        state.start();
        state.toggle_pause();
        let before = state.snapshot();
        assert_eq!(tick(&mut state), TickOutcome::Idle);
        assert_eq!(state.snapshot().snake, before.snake);

        state.toggle_pause();
        assert_ne!(tick(&mut state), TickOutcome::Idle);
    }

    #[test]
    fn test_apply_input_press_order() {
        let mut state = GameState::new(classic_grid(), 5);
        let input: TickInput = [Command::Start, Command::Turn(Direction::Down)].into_iter().collect();
        apply_input(&mut state, &input);
        assert_eq!(state.run_state(), RunState::Running);
        tick(&mut state);
        assert_eq!(state.direction(), Direction::Down);

        // Reset then start in the same batch lands in Running on a fresh board
        state.run_state = RunState::GameOver;
        let input: TickInput = [Command::Reset, Command::Start].into_iter().collect();
        apply_input(&mut state, &input);
        assert_eq!(state.run_state(), RunState::Running);
        assert_eq!(state.snake().head(), Cell::new(5, 5));
        assert!(TickInput::default().is_empty());
    }

    #[test]
    fn test_pause_before_start_is_ignored() {
        let mut state = GameState::new(classic_grid(), 5);
        let input: TickInput = [Command::TogglePause, Command::Start].into_iter().collect();
        apply_input(&mut state, &input);
        assert_eq!(state.run_state(), RunState::Running);

        // Start then pause in one batch ends paused
        let mut state = GameState::new(classic_grid(), 5);
        let input: TickInput = [Command::Start, Command::TogglePause].into_iter().collect();
        apply_input(&mut state, &input);
        assert_eq!(state.run_state(), RunState::Paused);
    }

    #[test]
    fn test_pause_command_never_resumes() {
        let mut state = GameState::new(classic_grid(), 5);
        state.start();
        let input: TickInput = [Command::TogglePause, Command::Pause].into_iter().collect();
        apply_input(&mut state, &input);
        assert_eq!(state.run_state(), RunState::Paused);

        // Nothing to pause before start
        let mut state = GameState::new(classic_grid(), 5);
        apply_input(&mut state, &[Command::Pause].into_iter().collect());
        assert_eq!(state.run_state(), RunState::NotStarted);
    }

    #[test]
    fn test_reset_discards_earlier_commands() {
        let input: TickInput = [
            Command::Start,
            Command::Turn(Direction::Up),
            Command::Reset,
            Command::Start,
        ]
        .into_iter()
        .collect();
        assert_eq!(input.commands(), &[Command::Reset, Command::Start]);
    }

    #[test]
    fn test_determinism() {
        let turns = [
            Some(Direction::Down),
            None,
            Some(Direction::Right),
            Some(Direction::Up),
            None,
        ];
        let mut a = GameState::new(classic_grid(), 99999);
        let mut b = GameState::new(classic_grid(), 99999);
        assert_eq!(a.seed(), 99999);
        a.start();
        b.start();

        for turn in turns.iter().cycle().take(40) {
            if let Some(dir) = turn {
                a.set_direction(*dir);
                b.set_direction(*dir);
            }
            assert_eq!(tick(&mut a), tick(&mut b));
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    fn direction() -> impl Strategy<Value = Option<Direction>> {
        prop::option::of(prop::sample::select(Direction::ALL.to_vec()))
    }

    proptest! {
        #[test]
        fn prop_board_invariants(
            seed in any::<u64>(),
            turns in prop::collection::vec(direction(), 1..300),
        ) {
            let mut state = GameState::new(Grid::new(8, 6), seed);
            state.start();

            for turn in turns {
                if let Some(dir) = turn {
                    let before = state.direction();
                    let accepted = state.set_direction(dir);
                    if dir.is_opposite(before) {
                        prop_assert!(!accepted);
                        prop_assert_eq!(state.direction(), before);
                    }
                }

                let len_before = state.snake().len();
                let food_before = state.food();
                let score_before = state.score();
                let body_before: Vec<Cell> = state.snake().iter().copied().collect();
                let was_over = state.run_state() == RunState::GameOver;

                match tick(&mut state) {
                    TickOutcome::Moved => {
                        prop_assert_eq!(state.snake().len(), len_before);
                        prop_assert_eq!(state.score(), score_before);
                    }
                    TickOutcome::Ate { score } => {
                        prop_assert_eq!(state.snake().len(), len_before + 1);
                        prop_assert_eq!(score, score_before + 1);
                        prop_assert_eq!(Some(state.snake().head()), food_before);
                    }
                    TickOutcome::GameOver(_) | TickOutcome::Idle => {
                        let body_after: Vec<Cell> = state.snake().iter().copied().collect();
                        prop_assert_eq!(body_after, body_before);
                        prop_assert_eq!(state.food(), food_before);
                        prop_assert_eq!(state.score(), score_before);
                    }
                }

                if was_over {
                    prop_assert_eq!(state.run_state(), RunState::GameOver);
                }

                if let Some(food) = state.food() {
                    prop_assert!(!state.snake().contains(food));
                    prop_assert!(state.grid().contains(food));
                }

                let mut seen = std::collections::HashSet::new();
                for &cell in state.snake().iter() {
                    prop_assert!(state.grid().contains(cell));
                    prop_assert!(seen.insert(cell));
                }
            }
        }
    }
}
