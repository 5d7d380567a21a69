use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

use super::{
    action::{steer, Direction},
    config::{validate_tick_rate, ConfigError, GameConfig},
    food::place_food,
    geometry::Position,
    snake::Snake,
};

/// Whether the tick timer should be firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Stopped,
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head ran into the body
    Tail,
    /// Head left the grid
    Border,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Moved,
    AteFood,
    /// The round ended and a fresh one was started
    RoundOver(Collision),
    /// The snake covers the whole grid, a fresh round was started
    GridFilled,
}

/// Render-ready copy of the session state
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: usize,
    pub tick: u64,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub event: TickEvent,
    /// State after the tick, already describing the fresh round if one started
    pub snapshot: Snapshot,
}

/// One game of Snake: owns the snake, the food and the tick bookkeeping.
///
/// The session does not own a timer. It bumps an epoch whenever the timer
/// has to be re-armed (start, stop, resume, restart, tick-rate change) and
/// the driver compares epochs to drop and recreate its interval.
pub struct GameSession {
    config: GameConfig,
    snake: Snake,
    food: Option<Position>,
    tick_count: u64,
    tick_rate_ms: u64,
    lifecycle: Lifecycle,
    epoch: u64,
    rng: StdRng,
}

impl GameSession {
    /// Create a stopped session with a fresh round laid out
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as `new` but with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            tick_rate_ms: config.tick_rate_ms,
            snake: Snake::new(config.start_position()),
            food: None,
            tick_count: 0,
            lifecycle: Lifecycle::Stopped,
            epoch: 0,
            rng,
            config,
        };
        session.new_round();

        Ok(session)
    }

    /// Begin a fresh round and let the timer run
    pub fn start(&mut self) {
        self.new_round();
        self.lifecycle = Lifecycle::Running;
        self.epoch += 1;
        log::info!(
            "round started at {:?}, food at {:?}",
            self.snake.head(),
            self.food
        );
    }

    /// Halt the timer, the current round stays as it is
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Stopped;
            self.epoch += 1;
            log::info!("stopped after {} ticks", self.tick_count);
        }
    }

    /// Continue a stopped round without resetting it
    pub fn resume(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            self.lifecycle = Lifecycle::Running;
            self.epoch += 1;
            log::info!("resumed at tick {}", self.tick_count);
        }
    }

    /// Throw the current round away and start a new one
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Change the tick interval, takes effect on the next re-arm
    pub fn set_tick_rate(&mut self, ms: u64) -> Result<(), ConfigError> {
        validate_tick_rate(ms)?;

        if ms != self.tick_rate_ms {
            self.tick_rate_ms = ms;
            self.epoch += 1;
            log::info!("tick rate set to {ms}ms");
        }

        Ok(())
    }

    /// Apply a direction request right away, reversals are dropped
    pub fn steer(&mut self, direction: Direction) {
        let current = self.snake.vector;
        let next = steer(current, direction);

        if next == current && direction.vector() != current {
            log::debug!("ignored reversal to {direction:?}");
        }

        self.snake.vector = next;
    }

    /// Advance the simulation by one step.
    ///
    /// Returns `None` when the session is stopped.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.lifecycle != Lifecycle::Running {
            return None;
        }

        self.tick_count += 1;
        self.snake.advance();
        let event = self.detect_collision();
        log::trace!("tick {} -> {:?}", self.tick_count, event);

        Some(TickReport {
            event,
            snapshot: self.snapshot(),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().to_vec(),
            food: self.food,
            score: self.score(),
            tick: self.tick_count,
        }
    }

    /// Snake length minus the initial head
    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.tick_rate_ms
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Checks run in order: tail, food, border
    fn detect_collision(&mut self) -> TickEvent {
        let head = self.snake.head();

        if self.snake.bites_itself() {
            return self.end_round(Collision::Tail);
        }

        let mut event = TickEvent::Moved;

        if self.food == Some(head) {
            self.snake.grow();
            self.food = place_food(&mut self.rng, &self.snake, self.config.size());
            log::debug!("snake grew to {}, food at {:?}", self.snake.len(), self.food);

            if self.food.is_none() {
                log::info!("grid filled with score {}", self.score());
                self.restart();
                return TickEvent::GridFilled;
            }
            event = TickEvent::AteFood;
        }

        if !self.config.size().contains(head) {
            return self.end_round(Collision::Border);
        }

        event
    }

    fn end_round(&mut self, collision: Collision) -> TickEvent {
        log::info!(
            "{:?} collision at {:?} after {} ticks, score {}",
            collision,
            self.snake.head(),
            self.tick_count,
            self.score()
        );
        self.restart();
        TickEvent::RoundOver(collision)
    }

    fn new_round(&mut self) {
        self.snake = Snake::new(self.config.start_position());
        self.food = place_food(&mut self.rng, &self.snake, self.config.size());
        self.tick_count = 0;
    }
}
