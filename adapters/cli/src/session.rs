//! Frame loop driving a world from a clock, a script and a render sink.

use std::{thread, time::Duration};

use anyhow::{Context, Result};
use snake_grid_core::{CellCoord, Command, Event, Grid};
use snake_grid_rendering::{Clock, ManualClock, RenderSink, Scene, SystemClock};
use snake_grid_system_steering::Steering;
use snake_grid_world::{self as world, query, World};
use tracing::{debug, info};

use crate::{config::CanvasConfig, script::InputScript};

/// Clock that can also hold the loop until the next frame is due.
pub(crate) trait FrameClock: Clock {
    fn wait(&mut self, interval: f64);
}

impl FrameClock for ManualClock {
    fn wait(&mut self, interval: f64) {
        self.advance_by(interval);
    }
}

impl FrameClock for SystemClock {
    fn wait(&mut self, interval: f64) {
        thread::sleep(Duration::from_secs_f64(interval));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SessionOptions {
    pub(crate) frame_interval: f64,
    pub(crate) max_frames: u32,
}

/// How a session finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    GameOver { score: u32, frames: u32 },
    OutOfFrames { score: u32, frames: u32 },
}

/// Configures the grid, starts a game and runs frames until it ends.
pub(crate) fn run<C: FrameClock>(
    world: &mut World,
    canvas: CanvasConfig,
    mut script: InputScript,
    clock: &mut C,
    sink: &mut dyn RenderSink,
    options: SessionOptions,
) -> Result<Outcome> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::ConfigureGrid {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            cell_size: canvas.cell_size,
        },
        &mut events,
    )
    .context("failed to configure the grid")?;
    world::apply(world, Command::Reset, &mut events).context("failed to start a game")?;

    let mut steering = Steering::new();
    let mut commands = Vec::new();
    for frame in 0..options.max_frames {
        let gestures = script.take_through(frame);
        steering.handle(&events, &gestures, &mut commands);
        events.clear();
        for command in commands.drain(..) {
            world::apply(world, command, &mut events)?;
        }

        world::apply(
            world,
            Command::Advance {
                timestamp: clock.now(),
            },
            &mut events,
        )
        .with_context(|| format!("frame {frame} was rejected"))?;
        log_events(&events);
        sink.draw(&capture(world)?)?;

        if query::is_game_over(world) {
            return Ok(Outcome::GameOver {
                score: query::score(world),
                frames: frame + 1,
            });
        }
        clock.wait(options.frame_interval);
    }

    Ok(Outcome::OutOfFrames {
        score: query::score(world),
        frames: options.max_frames,
    })
}

fn capture(world: &World) -> Result<Scene> {
    let grid: &Grid = query::grid(world).context("grid vanished mid-session")?;
    Ok(Scene::capture(
        grid,
        &query::snake_view(world),
        query::food(world),
        query::score(world),
        query::phase(world),
    ))
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::FoodEaten { cell, score } => {
                info!(cell = %describe(*cell), score = *score, "food eaten");
            }
            Event::FoodSpawned { cell } => debug!(cell = %describe(*cell), "food spawned"),
            _ => {}
        }
    }
}

fn describe(cell: CellCoord) -> String {
    format!("({}, {})", cell.column(), cell.row())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_grid_core::Rules;
    use snake_grid_system_steering::{Gesture, Key};

    use crate::script::ScriptedInput;

    #[derive(Default)]
    struct RecordingSink {
        scenes: Vec<Scene>,
    }

    impl RenderSink for RecordingSink {
        fn draw(&mut self, scene: &Scene) -> Result<()> {
            self.scenes.push(scene.clone());
            Ok(())
        }
    }

    const OPTIONS: SessionOptions = SessionOptions {
        frame_interval: 1.0 / 60.0,
        max_frames: 30,
    };

    fn world() -> World {
        World::new(Rules::default(), 11).expect("default rules are valid")
    }

    #[test]
    fn idle_player_runs_out_of_frames() {
        let mut world = world();
        let mut sink = RecordingSink::default();
        let mut clock = ManualClock::default();

        let outcome = run(
            &mut world,
            CanvasConfig::default(),
            InputScript::default(),
            &mut clock,
            &mut sink,
            OPTIONS,
        )
        .expect("session runs");

        assert!(matches!(outcome, Outcome::OutOfFrames { frames: 30, .. }));
        assert_eq!(sink.scenes.len(), 30);
        assert!(query::steps_taken(&world) >= 1);
        assert!(sink.scenes.iter().all(|scene| !scene.game_over));
    }

    #[test]
    fn reversing_on_the_first_frame_ends_the_game() {
        let mut world = world();
        let mut sink = RecordingSink::default();
        let mut clock = ManualClock::default();
        let script = InputScript::new(vec![ScriptedInput {
            frame: 0,
            gesture: Gesture::Key(Key::ArrowLeft),
        }]);

        let outcome = run(
            &mut world,
            CanvasConfig::default(),
            script,
            &mut clock,
            &mut sink,
            OPTIONS,
        )
        .expect("session runs");

        let Outcome::GameOver { score, frames } = outcome else {
            panic!("expected the reversal to end the game, got {outcome:?}");
        };
        assert!(frames < OPTIONS.max_frames);
        let last = sink.scenes.last().expect("frames were drawn");
        assert!(last.game_over);
        assert_eq!(last.score, score);
        assert_eq!(query::steps_taken(&world), 1);
    }

    #[test]
    fn unusable_canvas_is_reported() {
        let mut world = world();
        let mut sink = RecordingSink::default();
        let mut clock = ManualClock::default();
        let canvas = CanvasConfig {
            width: 10.0,
            height: 10.0,
            cell_size: 20.0,
        };

        let error = run(
            &mut world,
            canvas,
            InputScript::default(),
            &mut clock,
            &mut sink,
            OPTIONS,
        )
        .expect_err("grid has no cells");
        assert!(format!("{error:#}").contains("configure"));
        assert!(sink.scenes.is_empty());
    }
}
