use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::{ConfigError, GameConfig, GridSize};
use crate::difficulty::Difficulty;
use crate::food::{SpawnError, generate_food};
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    Over,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// The snake covers every cell; counts as a win.
    BoardFilled,
}

/// What a single [`GameState::step`] call did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Paused or over; nothing changed.
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

/// Whether the driver loop should keep going after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

/// Why a scripted layout was rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum LayoutError {
    #[error("snake has no segments")]
    EmptySnake,
    #[error("cell {0:?} lies outside the board")]
    OutOfBounds(Position),
    #[error("segments {0:?} and {1:?} are not adjacent")]
    Disconnected(Position, Position),
    #[error("food at {0:?} lies on the snake")]
    FoodOnSnake(Position),
}

/// Read-only copy of everything the renderer needs for one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub difficulty: Difficulty,
    pub tick_rate: u32,
    pub bounds: GridSize,
}

/// Complete mutable game state for one process.
///
/// Only `step`, `apply_input`, `toggle_pause`, `reset` and `set_difficulty`
/// mutate it. The high score survives resets.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    high_score: u32,
    status: GameStatus,
    end_reason: Option<EndReason>,
    difficulty: Difficulty,
    tick_rate: u32,
    tick_count: u64,
    rng: StdRng,
}

impl GameState {
    /// Creates a running game seeded from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let difficulty = config.difficulty;
        let tick_rate = config.base_tick_rate(difficulty);
        let snake = starting_snake(&config);
        let mut state = Self {
            config,
            snake,
            food: None,
            score: 0,
            high_score: 0,
            status: GameStatus::Running,
            end_reason: None,
            difficulty,
            tick_rate,
            tick_count: 0,
            rng,
        };
        state.food = generate_food(&mut state.rng, &state.snake, state.config.grid).ok();
        Ok(state)
    }

    /// Replaces the snake and food, keeping score, status and settings.
    ///
    /// The snake must be a connected chain inside the board and the food must
    /// lie on a free cell.
    pub fn with_layout(mut self, snake: Snake, food: Position) -> Result<Self, LayoutError> {
        let bounds = self.config.grid;
        if snake.is_empty() {
            return Err(LayoutError::EmptySnake);
        }

        let mut previous: Option<Position> = None;
        for &segment in snake.segments() {
            if !segment.is_within_bounds(bounds) {
                return Err(LayoutError::OutOfBounds(segment));
            }
            if let Some(prev) = previous {
                if (prev.x - segment.x).abs() + (prev.y - segment.y).abs() != 1 {
                    return Err(LayoutError::Disconnected(prev, segment));
                }
            }
            previous = Some(segment);
        }

        if !food.is_within_bounds(bounds) {
            return Err(LayoutError::OutOfBounds(food));
        }
        if snake.occupies(food) {
            return Err(LayoutError::FoodOnSnake(food));
        }

        self.snake = snake;
        self.food = Some(food);
        Ok(self)
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Running {
            return StepOutcome::Idle;
        }

        self.tick_count += 1;
        let new_head = self.snake.commit_direction();

        if !new_head.is_within_bounds(self.config.grid) {
            return self.finish(EndReason::Wall);
        }

        // Checked against the body before it moves, tail cell included.
        if self.snake.occupies(new_head) {
            return self.finish(EndReason::SelfCollision);
        }

        self.snake.push_head(new_head);

        if self.food != Some(new_head) {
            let _ = self.snake.pop_tail();
            return StepOutcome::Moved;
        }

        self.score = self
            .score
            .saturating_add(self.config.food_points(self.difficulty));
        self.ramp_speed();

        match generate_food(&mut self.rng, &self.snake, self.config.grid) {
            Ok(food) => {
                debug!("food eaten at {new_head:?}, next food at {food:?}");
                self.food = Some(food);
                StepOutcome::Ate
            }
            Err(SpawnError::BoardFull { .. }) => {
                self.food = None;
                self.finish(EndReason::BoardFilled)
            }
        }
    }

    /// Buffers a turn for the next tick.
    ///
    /// Ignored unless running, and ignored when it would reverse the active
    /// direction. Returns whether the turn was accepted.
    pub fn apply_input(&mut self, requested: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.snake.buffer_direction(requested)
    }

    /// Flips between running and paused; a finished round stays over.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::Over => GameStatus::Over,
        };
    }

    /// Starts a fresh round, keeping the high score and difficulty.
    ///
    /// Points from an abandoned round still count towards the high score.
    pub fn reset(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.snake = starting_snake(&self.config);
        self.food = generate_food(&mut self.rng, &self.snake, self.config.grid).ok();
        self.score = 0;
        self.status = GameStatus::Running;
        self.end_reason = None;
        self.tick_rate = self.config.base_tick_rate(self.difficulty);
        self.tick_count = 0;
        info!("round reset at {} difficulty", self.difficulty);
    }

    /// Switches difficulty; the tick rate drops back to the new base rate.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.tick_rate = self.config.base_tick_rate(difficulty);
        info!("difficulty set to {difficulty}, tick rate {}", self.tick_rate);
    }

    /// Routes one input event to the matching mutator.
    pub fn handle_input(&mut self, input: GameInput) -> Control {
        match input {
            GameInput::Direction(direction) => {
                let _ = self.apply_input(direction);
            }
            GameInput::TogglePause => self.toggle_pause(),
            GameInput::Restart => self.reset(),
            GameInput::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
            GameInput::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Wall-clock time between two ticks at the current tick rate.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// Copies the renderer-facing view of the state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            direction: self.snake.direction(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            status: self.status,
            end_reason: self.end_reason,
            difficulty: self.difficulty,
            tick_rate: self.tick_rate,
            bounds: self.config.grid,
        }
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn finish(&mut self, reason: EndReason) -> StepOutcome {
        self.status = GameStatus::Over;
        self.end_reason = Some(reason);
        self.high_score = self.high_score.max(self.score);
        info!(
            "round over ({reason:?}) with score {} after {} ticks",
            self.score, self.tick_count
        );
        StepOutcome::Ended(reason)
    }

    fn ramp_speed(&mut self) {
        if self.score % self.config.speed_ramp_interval == 0
            && self.tick_rate < self.config.max_tick_rate
        {
            self.tick_rate += 1;
            debug!("speed ramp: tick rate now {}", self.tick_rate);
        }
    }
}

fn starting_snake(config: &GameConfig) -> Snake {
    let head = Position {
        x: i32::from(config.grid.width / 2),
        y: i32::from(config.grid.height / 2),
    };
    Snake::new(head, Direction::Right, config.initial_length)
}
