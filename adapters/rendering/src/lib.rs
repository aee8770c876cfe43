#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake Grid adapters.
//!
//! Hosts capture a [`Scene`] from world queries after every frame and hand it
//! to a [`RenderSink`]. Frame timestamps come from a [`Clock`]. Neither
//! capability is visible to the simulation itself.

use std::time::Instant;

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_grid_core::{Grid, Phase, Point, SnakeView};

/// Describes the square cell grid that backs the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell in pixels.
    pub cell_size: f32,
}

impl From<&Grid> for GridPresentation {
    fn from(grid: &Grid) -> Self {
        Self {
            columns: grid.columns(),
            rows: grid.rows(),
            cell_size: grid.cell_size(),
        }
    }
}

/// Connected stretch of snake body that can be drawn as one polyline.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SnakeRun {
    /// Cell centers ordered from the head end to the tail end.
    pub points: Vec<Vec2>,
}

/// Everything a sink needs to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid layout backing the scene.
    pub grid: GridPresentation,
    /// Snake body split at wrap-around discontinuities, head run first.
    pub snake: Vec<SnakeRun>,
    /// Food position, if a game has started.
    pub food: Option<Vec2>,
    /// Score of the current game.
    pub score: u32,
    /// Indicates whether the game has ended.
    pub game_over: bool,
}

impl Scene {
    /// Captures a scene from world snapshots.
    #[must_use]
    pub fn capture(
        grid: &Grid,
        snake: &SnakeView,
        food: Option<Point>,
        score: u32,
        phase: Phase,
    ) -> Self {
        let snake = snake
            .runs()
            .into_iter()
            .map(|run| SnakeRun {
                points: run.iter().map(|segment| to_vec2(segment.point)).collect(),
            })
            .collect();

        Self {
            grid: GridPresentation::from(grid),
            snake,
            food: food.map(to_vec2),
            score,
            game_over: phase == Phase::GameOver,
        }
    }

    /// Position of the snake head, if the snake has been placed.
    #[must_use]
    pub fn head(&self) -> Option<Vec2> {
        self.snake
            .first()
            .and_then(|run| run.points.first())
            .copied()
    }
}

fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.x(), point.y())
}

/// Destination for captured scenes.
pub trait RenderSink {
    /// Paints the scene.
    fn draw(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Monotonic source of frame timestamps.
pub trait Clock {
    /// Seconds elapsed since an arbitrary fixed origin.
    fn now(&self) -> f64;
}

/// Wall clock measuring time since its creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Starts a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to, for headless and replayed sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    /// Starts a clock at the provided timestamp.
    #[must_use]
    pub const fn starting_at(now: f64) -> Self {
        Self { now }
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance_by(&mut self, seconds: f64) {
        self.now += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_grid_core::{CellCoord, SnakeSegment};

    fn segment(grid: &Grid, column: u32, row: u32, wrapped: bool) -> SnakeSegment {
        let cell = CellCoord::new(column, row);
        SnakeSegment {
            point: grid.center_of(cell),
            cell,
            wrapped,
        }
    }

    #[test]
    fn capture_splits_snake_at_wraps() {
        let grid = Grid::new(10, 8, 20.0).expect("valid grid");
        let view = SnakeView::from_segments(vec![
            segment(&grid, 0, 4, true),
            segment(&grid, 9, 4, false),
            segment(&grid, 8, 4, false),
        ]);

        let scene = Scene::capture(
            &grid,
            &view,
            Some(grid.center_of(CellCoord::new(3, 3))),
            2,
            Phase::Running,
        );

        assert_eq!(scene.snake.len(), 2);
        assert_eq!(scene.snake[0].points, vec![Vec2::new(10.0, 90.0)]);
        assert_eq!(
            scene.snake[1].points,
            vec![Vec2::new(190.0, 90.0), Vec2::new(170.0, 90.0)]
        );
        assert_eq!(scene.head(), Some(Vec2::new(10.0, 90.0)));
        assert_eq!(scene.food, Some(Vec2::new(70.0, 70.0)));
        assert_eq!(scene.score, 2);
        assert!(!scene.game_over);
    }

    #[test]
    fn idle_scene_has_no_snake() {
        let grid = Grid::new(4, 4, 10.0).expect("valid grid");
        let scene = Scene::capture(&grid, &SnakeView::default(), None, 0, Phase::Idle);
        assert!(scene.snake.is_empty());
        assert_eq!(scene.head(), None);
        assert_eq!(scene.grid.columns, 4);
    }

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let mut clock = ManualClock::starting_at(2.0);
        assert_eq!(clock.now(), 2.0);
        clock.advance_by(0.5);
        assert_eq!(clock.now(), 2.5);
    }
}
