#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Snake Grid.
//!
//! The [`World`] owns the grid, the snake, the food item and the pacing
//! accumulator. Hosts drive it either through the direct operations
//! ([`World::initialize`], [`World::reset`], [`World::set_direction`],
//! [`World::advance`]) or through the [`apply`] command surface, and read it
//! back through the [`query`] module.

mod food;
mod pacing;
mod snake;

use std::time::Duration;

use snake_grid_core::{Command, Direction, EngineError, Event, Grid, Phase, Point, Rules};
use tracing::{debug, info, trace};

use self::{food::FoodSpawner, pacing::Pacer, snake::Snake};

/// Seed used for food placement when the host does not provide one.
pub const DEFAULT_FOOD_SEED: u64 = 0x5a4b_e7c1_9d02_f36e;

const INITIAL_DIRECTION: Direction = Direction::East;

/// Represents the authoritative Snake Grid simulation state.
#[derive(Clone, Debug)]
pub struct World {
    rules: Rules,
    grid: Option<Grid>,
    phase: Phase,
    snake: Snake,
    food: Option<Point>,
    spawner: FoodSpawner,
    pacer: Pacer,
    score: u32,
    growth: u32,
    current_speed: f32,
    steps_taken: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::from_validated(Rules::default(), DEFAULT_FOOD_SEED)
    }
}

impl World {
    /// Creates an idle world governed by `rules`, placing food from `seed`.
    pub fn new(rules: Rules, seed: u64) -> Result<Self, EngineError> {
        rules.validate()?;
        Ok(Self::from_validated(rules, seed))
    }

    fn from_validated(rules: Rules, seed: u64) -> Self {
        Self {
            rules,
            grid: None,
            phase: Phase::Idle,
            snake: Snake::empty(INITIAL_DIRECTION),
            food: None,
            spawner: FoodSpawner::new(seed),
            pacer: Pacer::new(rules.max_frame_delta),
            score: 0,
            growth: 0,
            current_speed: rules.base_speed,
            steps_taken: 0,
        }
    }

    /// Derives the grid from the canvas dimensions and returns to idle.
    ///
    /// Reconfiguring while a game is running is rejected so the snake never
    /// straddles cells of two different layouts.
    pub fn initialize(
        &mut self,
        canvas_width: f32,
        canvas_height: f32,
        cell_size: f32,
        out_events: &mut Vec<Event>,
    ) -> Result<(), EngineError> {
        if self.phase == Phase::Running {
            return Err(EngineError::GameInProgress);
        }
        let grid = Grid::from_canvas(canvas_width, canvas_height, cell_size)?;
        debug!(
            columns = grid.columns(),
            rows = grid.rows(),
            cell_size,
            "configured grid"
        );
        self.grid = Some(grid);
        self.phase = Phase::Idle;
        self.snake = Snake::empty(self.snake.direction());
        self.food = None;
        self.pacer.restart();
        out_events.push(Event::GridConfigured {
            columns: grid.columns(),
            rows: grid.rows(),
        });
        Ok(())
    }

    /// Starts a fresh game: centered snake, base speed, zero score, new food.
    pub fn reset(&mut self, out_events: &mut Vec<Event>) -> Result<(), EngineError> {
        let grid = self.grid.ok_or(EngineError::GridNotConfigured)?;
        self.score = 0;
        self.growth = 0;
        self.current_speed = self.rules.base_speed;
        self.steps_taken = 0;
        self.snake = Snake::spawn(&grid, self.rules.initial_length, INITIAL_DIRECTION);
        self.pacer.restart();
        self.phase = Phase::Running;

        if let Some(head) = self.snake.head_cell() {
            out_events.push(Event::GameStarted {
                head,
                length: self.rules.initial_length,
            });
        }
        self.spawn_food(&grid, out_events);
        debug!(length = self.snake.len(), "game started");
        Ok(())
    }

    /// Stores the direction the next step will take.
    ///
    /// No reversal guard is applied: turning straight back into the neck is
    /// accepted and ends the game on the following step.
    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    /// Delivers a frame timestamp, taking as many steps as the elapsed time
    /// covers. Returns whether the game is still running.
    pub fn advance(
        &mut self,
        timestamp: f64,
        out_events: &mut Vec<Event>,
    ) -> Result<bool, EngineError> {
        let grid = self.grid.ok_or(EngineError::GridNotConfigured)?;
        match self.phase {
            Phase::Idle => return Err(EngineError::NotStarted),
            Phase::GameOver => return Ok(false),
            Phase::Running => {}
        }

        let delta = self.pacer.accumulate(timestamp)?;
        let mut steps = 0_u32;
        while self.pacer.try_consume(self.time_per_cell(&grid)) {
            self.step(&grid, out_events);
            steps += 1;
            if self.phase == Phase::GameOver {
                self.pacer.settle(self.time_per_cell(&grid));
                break;
            }
        }
        trace!(
            timestamp,
            delta_secs = delta.as_secs_f64(),
            steps,
            "frame advanced"
        );

        Ok(self.phase == Phase::Running)
    }

    fn time_per_cell(&self, grid: &Grid) -> Duration {
        pacing::time_per_cell(grid.cell_size(), self.current_speed)
    }

    fn length_cap(&self) -> usize {
        let cap = u64::from(self.rules.initial_length) + u64::from(self.growth);
        usize::try_from(cap).unwrap_or(usize::MAX)
    }

    fn step(&mut self, grid: &Grid, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(from) = self.snake.head_cell() else {
            return;
        };

        let (to, wrapped) = grid.neighbor(from, self.snake.direction());
        self.snake.push_head(grid, to, wrapped);
        self.steps_taken = self.steps_taken.saturating_add(1);
        out_events.push(Event::SnakeAdvanced { from, to, wrapped });

        if self.food.is_some() && self.snake.head_point() == self.food {
            self.eat(grid, out_events);
        }

        self.snake.trim(self.length_cap());

        if self.snake.head_overlaps_body() {
            self.phase = Phase::GameOver;
            info!(score = self.score, steps = self.steps_taken, "game over");
            out_events.push(Event::GameOver {
                score: self.score,
                head: to,
            });
        }
    }

    fn eat(&mut self, grid: &Grid, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(1);
        self.growth = self.growth.saturating_add(self.rules.growth_increment);
        self.current_speed += self.rules.speed_increment;
        if let Some(food) = self.food {
            out_events.push(Event::FoodEaten {
                cell: grid.cell_of(food),
                score: self.score,
            });
        }
        debug!(
            score = self.score,
            growth = self.growth,
            speed = self.current_speed,
            "food eaten"
        );
        self.spawn_food(grid, out_events);
    }

    fn spawn_food(&mut self, grid: &Grid, out_events: &mut Vec<Event>) {
        let cell = self.spawner.spawn(grid);
        self.food = Some(grid.center_of(cell));
        out_events.push(Event::FoodSpawned { cell });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    match command {
        Command::ConfigureGrid {
            canvas_width,
            canvas_height,
            cell_size,
        } => world.initialize(canvas_width, canvas_height, cell_size, out_events),
        Command::Reset => world.reset(out_events),
        Command::SetDirection { direction } => {
            world.set_direction(direction);
            Ok(())
        }
        Command::Advance { timestamp } => world.advance(timestamp, out_events).map(|_| ()),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use snake_grid_core::{CellCoord, Direction, Grid, Phase, Point, SnakeView};

    use super::World;

    /// Grid derived from the most recent configuration, if any.
    #[must_use]
    pub fn grid(world: &World) -> Option<&Grid> {
        world.grid.as_ref()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Reports whether the snake has collided with itself.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.phase == Phase::GameOver
    }

    /// Captures the snake ordered from head to tail.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView {
        world.snake.view()
    }

    /// Cell occupied by the snake head, absent while idle.
    #[must_use]
    pub fn head_cell(world: &World) -> Option<CellCoord> {
        world.snake.head_cell()
    }

    /// Number of segments in the snake.
    #[must_use]
    pub fn snake_length(world: &World) -> usize {
        world.snake.len()
    }

    /// Position of the food item, absent while idle.
    #[must_use]
    pub fn food(world: &World) -> Option<Point> {
        world.food
    }

    /// Cell holding the food item, absent while idle.
    #[must_use]
    pub fn food_cell(world: &World) -> Option<CellCoord> {
        let grid = world.grid.as_ref()?;
        world.food.map(|food| grid.cell_of(food))
    }

    /// Number of food items eaten in the current game.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Segments earned beyond the initial length.
    #[must_use]
    pub fn growth(world: &World) -> u32 {
        world.growth
    }

    /// Current snake speed in pixels per second.
    #[must_use]
    pub fn current_speed(world: &World) -> f32 {
        world.current_speed
    }

    /// Direction the next step will take.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.snake.direction()
    }

    /// Time carried toward the next step, in seconds.
    #[must_use]
    pub fn accumulator(world: &World) -> f64 {
        world.pacer.accumulator().as_secs_f64()
    }

    /// Time a single step takes at the current speed, in seconds.
    #[must_use]
    pub fn time_per_cell(world: &World) -> Option<f64> {
        world
            .grid
            .as_ref()
            .map(|grid| world.time_per_cell(grid).as_secs_f64())
    }

    /// Steps taken since the current game started.
    #[must_use]
    pub fn steps_taken(world: &World) -> u64 {
        world.steps_taken
    }
}
