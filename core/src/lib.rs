#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Grid engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! happened. Geometry lives here as well: the [`Grid`] maps continuous canvas
//! coordinates onto the discrete cells the snake moves across.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of a grid cell used when the host does not pick one.
pub const DEFAULT_CELL_SIZE: f32 = 20.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Derives the grid from the drawing surface dimensions.
    ConfigureGrid {
        /// Width of the drawing surface in pixels.
        canvas_width: f32,
        /// Height of the drawing surface in pixels.
        canvas_height: f32,
        /// Side length of a single square cell in pixels.
        cell_size: f32,
    },
    /// Starts a fresh game on the configured grid.
    Reset,
    /// Replaces the direction used by the next step.
    SetDirection {
        /// Direction of travel requested by the player.
        direction: Direction,
    },
    /// Delivers a frame timestamp to the pacing controller.
    Advance {
        /// Monotonic host timestamp measured in seconds.
        timestamp: f64,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the grid dimensions were derived from the canvas.
    GridConfigured {
        /// Number of columns laid out on the canvas.
        columns: u32,
        /// Number of rows laid out on the canvas.
        rows: u32,
    },
    /// Announces that a new game started with a freshly placed snake.
    GameStarted {
        /// Cell occupied by the snake head.
        head: CellCoord,
        /// Number of segments the snake starts with.
        length: u32,
    },
    /// Reports that a food item was placed.
    FoodSpawned {
        /// Cell holding the food item.
        cell: CellCoord,
    },
    /// Confirms that the snake head moved by one cell.
    SnakeAdvanced {
        /// Cell the head occupied before the step.
        from: CellCoord,
        /// Cell the head occupies after the step.
        to: CellCoord,
        /// Whether the head crossed a grid edge and re-entered on the far side.
        wrapped: bool,
    },
    /// Reports that the snake head landed on the food item.
    FoodEaten {
        /// Cell the food occupied.
        cell: CellCoord,
        /// Score after the ingestion.
        score: u32,
    },
    /// Announces that the snake ran into itself.
    GameOver {
        /// Final score of the game.
        score: u32,
        /// Cell where the collision happened.
        head: CellCoord,
    },
}

/// Lifecycle phase of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No snake is on the board yet.
    Idle,
    /// Steps are being taken in response to elapsed time.
    Running,
    /// The snake collided with itself; only a reset leaves this phase.
    GameOver,
}

/// Cardinal movement directions available to the snake.
///
/// Rows grow downwards, matching canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Cell offset applied to the head by a single step, as `(columns, rows)`.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Continuous canvas position measured in pixels.
///
/// Every entity in play sits on the center of a cell, so two points produced
/// by the same [`Grid`] compare equal exactly when they denote the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a point from raw pixel coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in pixels.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in pixels.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Discrete layout of the movement grid derived from the canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cell_size: f32,
}

impl Grid {
    /// Creates a grid with explicit dimensions.
    ///
    /// Both dimensions must be at least one cell and the cell size must be a
    /// positive finite number.
    pub fn new(columns: u32, rows: u32, cell_size: f32) -> Result<Self, EngineError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(EngineError::InvalidCellSize { cell_size });
        }
        if columns == 0 || rows == 0 {
            return Err(EngineError::EmptyGrid { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            cell_size,
        })
    }

    /// Lays out as many whole cells as fit on a canvas of the given size.
    pub fn from_canvas(width: f32, height: f32, cell_size: f32) -> Result<Self, EngineError> {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(EngineError::InvalidCanvas { width, height });
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(EngineError::InvalidCellSize { cell_size });
        }
        let columns = (width / cell_size).floor() as u32;
        let rows = (height / cell_size).floor() as u32;
        Self::new(columns, rows, cell_size)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Cell whose center is the provided point.
    ///
    /// Points left of or above the first cell center saturate to index zero.
    #[must_use]
    pub fn cell_of(&self, point: Point) -> CellCoord {
        let half = self.cell_size / 2.0;
        let column = ((point.x() - half) / self.cell_size).floor();
        let row = ((point.y() - half) / self.cell_size).floor();
        CellCoord::new(column as u32, row as u32)
    }

    /// Canonical center point of the cell.
    #[must_use]
    pub fn center_of(&self, cell: CellCoord) -> Point {
        let half = self.cell_size / 2.0;
        Point::new(
            cell.column() as f32 * self.cell_size + half,
            cell.row() as f32 * self.cell_size + half,
        )
    }

    /// Folds signed cell indices onto the torus formed by the grid edges.
    #[must_use]
    pub fn wrap(&self, column: i64, row: i64) -> CellCoord {
        let column = column.rem_euclid(i64::from(self.columns));
        let row = row.rem_euclid(i64::from(self.rows));
        CellCoord::new(column as u32, row as u32)
    }

    /// Cell reached by moving one step from `cell` in `direction`.
    ///
    /// The flag reports whether the move crossed an edge of the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> (CellCoord, bool) {
        let (dx, dy) = direction.offset();
        let column = i64::from(cell.column()) + dx;
        let row = i64::from(cell.row()) + dy;
        let wrapped = column < 0
            || row < 0
            || column >= i64::from(self.columns)
            || row >= i64::from(self.rows);
        (self.wrap(column, row), wrapped)
    }
}

/// Tunable rules that shape a game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Number of segments the snake starts with.
    pub initial_length: u32,
    /// Speed at the start of a game, in pixels per second.
    pub base_speed: f32,
    /// Speed gained for every food item eaten, in pixels per second.
    pub speed_increment: f32,
    /// Segments gained for every food item eaten.
    pub growth_increment: u32,
    /// Upper bound on the time a single frame may contribute, in seconds.
    ///
    /// `None` lets arbitrarily long frame stalls turn into as many steps as
    /// they cover.
    pub max_frame_delta: Option<f64>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_length: 5,
            base_speed: 80.0,
            speed_increment: 10.0,
            growth_increment: 5,
            max_frame_delta: None,
        }
    }
}

impl Rules {
    /// Checks that the rules describe a playable game.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.initial_length == 0 {
            return Err(EngineError::InvalidRules {
                reason: "initial_length must be at least one segment",
            });
        }
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(EngineError::InvalidRules {
                reason: "base_speed must be positive and finite",
            });
        }
        if !(self.speed_increment.is_finite() && self.speed_increment >= 0.0) {
            return Err(EngineError::InvalidRules {
                reason: "speed_increment must be non-negative and finite",
            });
        }
        if let Some(limit) = self.max_frame_delta {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(EngineError::InvalidRules {
                    reason: "max_frame_delta must be positive and finite",
                });
            }
        }
        Ok(())
    }
}

/// Immutable representation of a single snake segment used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnakeSegment {
    /// Cell-center position of the segment.
    pub point: Point,
    /// Grid cell occupied by the segment.
    pub cell: CellCoord,
    /// Set when the link from this segment to the next one toward the tail
    /// crosses a grid edge, so the two must not be joined when drawing.
    pub wrapped: bool,
}

/// Read-only snapshot of the snake ordered from head to tail.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnakeView {
    segments: Vec<SnakeSegment>,
}

impl SnakeView {
    /// Creates a view from segments ordered head first.
    #[must_use]
    pub fn from_segments(segments: Vec<SnakeSegment>) -> Self {
        Self { segments }
    }

    /// Segments ordered from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[SnakeSegment] {
        &self.segments
    }

    /// Iterator over segment points ordered from head to tail.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|segment| segment.point)
    }

    /// Head segment, absent before the first game starts.
    #[must_use]
    pub fn head(&self) -> Option<&SnakeSegment> {
        self.segments.first()
    }

    /// Number of segments in the snake.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Reports whether the snake has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Splits the snake into contiguous runs at wrap-around discontinuities.
    ///
    /// Each run can be drawn as a single connected polyline.
    #[must_use]
    pub fn runs(&self) -> Vec<&[SnakeSegment]> {
        let mut runs = Vec::new();
        let mut start = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.wrapped && index + 1 < self.segments.len() {
                runs.push(&self.segments[start..=index]);
                start = index + 1;
            }
        }
        if start < self.segments.len() {
            runs.push(&self.segments[start..]);
        }
        runs
    }
}

/// Misuse of the engine surfaced as a fast failure.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum EngineError {
    /// A game was started or advanced before the grid was configured.
    #[error("grid has not been configured")]
    GridNotConfigured,
    /// Frames were delivered before the first reset.
    #[error("no game has been started")]
    NotStarted,
    /// The grid was reconfigured while a game was running.
    #[error("cannot reconfigure the grid while a game is running")]
    GameInProgress,
    /// The canvas does not fit a single whole cell along one axis.
    #[error("grid must contain at least one cell per axis (got {columns}x{rows})")]
    EmptyGrid {
        /// Number of columns that fit on the canvas.
        columns: u32,
        /// Number of rows that fit on the canvas.
        rows: u32,
    },
    /// Cell size must be positive and finite.
    #[error("cell size must be positive and finite (got {cell_size})")]
    InvalidCellSize {
        /// Rejected cell size.
        cell_size: f32,
    },
    /// Canvas dimensions must be non-negative and finite.
    #[error("canvas dimensions must be non-negative and finite (got {width}x{height})")]
    InvalidCanvas {
        /// Rejected canvas width.
        width: f32,
        /// Rejected canvas height.
        height: f32,
    },
    /// Frame timestamps must be finite.
    #[error("frame timestamp must be finite (got {timestamp})")]
    InvalidTimestamp {
        /// Rejected timestamp.
        timestamp: f64,
    },
    /// Rules failed validation.
    #[error("invalid rules: {reason}")]
    InvalidRules {
        /// Description of the violated constraint.
        reason: &'static str,
    },
}
