//! Game controller and fixed-rate tick driver
//!
//! `App` owns the one `GameState` for the process. The frame loop hands it
//! timestamps; commands from keys and buttons are queued in between and
//! applied at the start of the next frame, so input, ticks and rendering
//! never interleave.

use crate::consts::MAX_CATCHUP_TICKS;
use crate::settings::Settings;
use crate::sim::{Command, GameState, RunState, Snapshot, TickInput, TickOutcome, apply_input};

/// Fixed-rate timer turning frame timestamps into whole ticks
///
/// Stopping the driver is what halts the loop on pause, reset and game over.
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval_ms: f64,
    accumulator_ms: f64,
    last_time: Option<f64>,
    active: bool,
}

impl TickDriver {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            accumulator_ms: 0.0,
            last_time: None,
            active: false,
        }
    }

    /// Begin counting from the next timestamp
    pub fn start(&mut self) {
        self.active = true;
        self.accumulator_ms = 0.0;
        self.last_time = None;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.accumulator_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Feed the current time and get the number of ticks now due
    ///
    /// At most `MAX_CATCHUP_TICKS` per call; time beyond that is dropped so a
    /// backgrounded tab does not fast-forward the snake.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let last = self.last_time.replace(now_ms);
        if !self.active {
            return 0;
        }

        let max_dt = self.interval_ms * f64::from(MAX_CATCHUP_TICKS);
        let dt = last.map_or(0.0, |t| (now_ms - t).clamp(0.0, max_dt));
        self.accumulator_ms += dt;

        let mut due = 0;
        while self.accumulator_ms >= self.interval_ms && due < MAX_CATCHUP_TICKS {
            self.accumulator_ms -= self.interval_ms;
            due += 1;
        }
        due
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Ticks run this frame
    pub ticks: u32,
    /// Last non-idle tick outcome
    pub outcome: Option<TickOutcome>,
    /// Whether anything visible may have changed
    pub dirty: bool,
}

impl FrameReport {
    pub fn game_over(&self) -> bool {
        matches!(self.outcome, Some(TickOutcome::GameOver(_)))
    }
}

/// Game controller: state, tick driver and queued input
pub struct App {
    settings: Settings,
    state: GameState,
    driver: TickDriver,
    input: TickInput,
}

impl App {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = GameState::new(settings.grid(), seed);
        let driver = TickDriver::new(settings.tick_interval_ms);
        log::info!(
            "New {}x{} game, tick {} ms, seed {}",
            settings.grid_width,
            settings.grid_height,
            settings.tick_interval_ms,
            seed
        );
        Self {
            settings,
            state,
            driver,
            input: TickInput::default(),
        }
    }

    /// Queue a command for the next frame
    pub fn command(&mut self, cmd: Command) {
        self.input.push(cmd);
    }

    /// Run one frame: apply queued input, then every tick that is due
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();

        if !self.input.is_empty() {
            let input = std::mem::take(&mut self.input);
            // A fresh board starts timing from zero
            if input.commands().contains(&Command::Reset) {
                self.driver.stop();
            }
            apply_input(&mut self.state, &input);
            report.dirty = true;
        }
        self.sync_driver();

        let due = self.driver.advance(now_ms);
        for _ in 0..due {
            let outcome = self.state.tick();
            report.ticks += 1;
            if outcome != TickOutcome::Idle {
                report.outcome = Some(outcome);
                report.dirty = true;
            }
            if let TickOutcome::GameOver(collision) = outcome {
                log::info!("Run ended by {:?} with score {}", collision, self.state.score());
                break;
            }
        }
        self.sync_driver();

        report
    }

    /// Keep the driver running exactly while the game is
    fn sync_driver(&mut self) {
        let running = self.state.run_state() == RunState::Running;
        if running && !self.driver.is_active() {
            self.driver.start();
        } else if !running && self.driver.is_active() {
            self.driver.stop();
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// Label for the pause button
    pub fn pause_label(&self) -> &'static str {
        match self.state.run_state() {
            RunState::Paused => "Resume",
            _ => "Pause",
        }
    }
}
