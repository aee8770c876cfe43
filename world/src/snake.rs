//! Ordered body of the snake and the direction it travels in.

use std::collections::VecDeque;

use snake_grid_core::{CellCoord, Direction, Grid, Point, SnakeSegment, SnakeView};

#[derive(Clone, Copy, Debug)]
struct Segment {
    point: Point,
    cell: CellCoord,
    wrapped: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Snake {
    segments: VecDeque<Segment>,
    direction: Direction,
}

impl Snake {
    pub(crate) fn empty(direction: Direction) -> Self {
        Self {
            segments: VecDeque::new(),
            direction,
        }
    }

    /// Lays out `length` segments centered on the grid, trailing away from
    /// `direction` so the first step moves the head into a free cell.
    pub(crate) fn spawn(grid: &Grid, length: u32, direction: Direction) -> Self {
        let head = CellCoord::new(grid.columns() / 2, grid.rows() / 2);
        let (dx, dy) = direction.offset();
        let capacity = usize::try_from(length).unwrap_or(0);
        let mut segments = VecDeque::with_capacity(capacity);
        segments.push_back(Segment {
            point: grid.center_of(head),
            cell: head,
            wrapped: false,
        });

        for index in 1..i64::from(length) {
            let cell = grid.wrap(
                i64::from(head.column()) - dx * index,
                i64::from(head.row()) - dy * index,
            );
            let (_, crossed_edge) = grid.neighbor(cell, direction);
            if let Some(ahead) = segments.back_mut() {
                ahead.wrapped = crossed_edge;
            }
            segments.push_back(Segment {
                point: grid.center_of(cell),
                cell,
                wrapped: false,
            });
        }

        Self {
            segments,
            direction,
        }
    }

    pub(crate) const fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn head_cell(&self) -> Option<CellCoord> {
        self.segments.front().map(|segment| segment.cell)
    }

    pub(crate) fn head_point(&self) -> Option<Point> {
        self.segments.front().map(|segment| segment.point)
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Prepends a new head; `wrapped` marks that it was entered across an edge.
    pub(crate) fn push_head(&mut self, grid: &Grid, cell: CellCoord, wrapped: bool) {
        self.segments.push_front(Segment {
            point: grid.center_of(cell),
            cell,
            wrapped,
        });
    }

    pub(crate) fn trim(&mut self, max_length: usize) {
        while self.segments.len() > max_length.max(1) {
            let _ = self.segments.pop_back();
        }
    }

    /// Exact point comparison; every segment sits on a cell center.
    pub(crate) fn head_overlaps_body(&self) -> bool {
        let mut segments = self.segments.iter();
        let Some(head) = segments.next() else {
            return false;
        };
        segments.any(|segment| segment.point == head.point)
    }

    pub(crate) fn view(&self) -> SnakeView {
        SnakeView::from_segments(
            self.segments
                .iter()
                .map(|segment| SnakeSegment {
                    point: segment.point,
                    cell: segment.cell,
                    wrapped: segment.wrapped,
                })
                .collect(),
        )
    }
}
