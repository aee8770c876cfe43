//! Text render sinks for terminal sessions.

use std::io::Write;

use anyhow::{Context, Result};
use glam::Vec2;
use snake_grid_rendering::{GridPresentation, RenderSink, Scene};

const EMPTY: char = '.';
const BODY: char = 'o';
const HEAD: char = '@';
const FOOD: char = '*';

/// Prints the grid as characters whenever the scene changes.
#[derive(Debug)]
pub(crate) struct AsciiSink<W: Write> {
    out: W,
    last: Option<Scene>,
}

impl<W: Write> AsciiSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, last: None }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for AsciiSink<W> {
    fn draw(&mut self, scene: &Scene) -> Result<()> {
        if self.last.as_ref() == Some(scene) {
            return Ok(());
        }
        let text = render(scene);
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .context("failed to write frame")?;
        self.last = Some(scene.clone());
        Ok(())
    }
}

/// Discards every scene.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SilentSink;

impl RenderSink for SilentSink {
    fn draw(&mut self, _scene: &Scene) -> Result<()> {
        Ok(())
    }
}

fn render(scene: &Scene) -> String {
    let grid = scene.grid;
    let columns = grid.columns as usize;
    let mut cells = vec![EMPTY; columns * grid.rows as usize];
    let mut paint = |point: Vec2, glyph: char| {
        if let Some(index) = cell_index(&grid, point) {
            cells[index] = glyph;
        }
    };

    for run in &scene.snake {
        for &point in &run.points {
            paint(point, BODY);
        }
    }
    if let Some(food) = scene.food {
        paint(food, FOOD);
    }
    if let Some(head) = scene.head() {
        paint(head, HEAD);
    }

    let mut text = format!("score: {}", scene.score);
    if scene.game_over {
        text.push_str("  game over");
    }
    text.push('\n');
    for row in cells.chunks(columns.max(1)) {
        text.extend(row);
        text.push('\n');
    }
    text
}

fn cell_index(grid: &GridPresentation, point: Vec2) -> Option<usize> {
    let cell = (point / grid.cell_size).floor();
    if cell.x < 0.0 || cell.y < 0.0 {
        return None;
    }
    let (column, row) = (cell.x as usize, cell.y as usize);
    let columns = grid.columns as usize;
    (column < columns && row < grid.rows as usize).then_some(row * columns + column)
}
