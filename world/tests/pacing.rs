use snake_grid_core::{CellCoord, Rules};
use snake_grid_world::{query, World};

fn start(seed: u64) -> World {
    let mut world = World::new(Rules::default(), seed).expect("valid rules");
    let mut events = Vec::new();
    world
        .initialize(600.0, 400.0, 20.0, &mut events)
        .expect("valid canvas");
    world.reset(&mut events).expect("grid configured");
    world
}

/// Starts a game whose first food item is off the starting row, so the first
/// dozen steps east cannot eat and change speed.
fn start_without_food_ahead() -> World {
    (0_u64..)
        .map(start)
        .find(|world| query::food_cell(world).map(|cell| cell.row()) != Some(10))
        .expect("some seed places food off the starting row")
}

#[test]
fn whole_steps_are_taken_for_each_elapsed_cell() {
    let mut world = start_without_food_ahead();
    let mut events = Vec::new();

    assert_eq!(world.advance(100.0, &mut events), Ok(true));
    assert_eq!(query::steps_taken(&world), 0, "first frame sets the baseline");

    assert_eq!(world.advance(100.1, &mut events), Ok(true));
    assert_eq!(query::steps_taken(&world), 0);

    assert_eq!(world.advance(100.25, &mut events), Ok(true));
    assert_eq!(query::steps_taken(&world), 1);
    assert_eq!(query::head_cell(&world), Some(CellCoord::new(16, 10)));
}

#[test]
fn a_stalled_frame_takes_several_steps() {
    let mut world = start_without_food_ahead();
    let mut events = Vec::new();

    let _ = world.advance(0.0, &mut events).expect("running");
    let _ = world.advance(1.0, &mut events).expect("running");

    assert_eq!(query::steps_taken(&world), 4);
    assert_eq!(query::head_cell(&world), Some(CellCoord::new(19, 10)));
    assert_eq!(query::accumulator(&world), 0.0);
}

#[test]
fn backwards_timestamps_take_no_steps() {
    let mut world = start_without_food_ahead();
    let mut events = Vec::new();

    let _ = world.advance(5.0, &mut events).expect("running");
    let _ = world.advance(2.0, &mut events).expect("running");
    assert_eq!(query::steps_taken(&world), 0);
    assert_eq!(query::accumulator(&world), 0.0);

    let _ = world.advance(2.5, &mut events).expect("running");
    assert_eq!(query::steps_taken(&world), 2);
}

#[test]
fn host_clocks_below_zero_still_drive_steps() {
    let mut world = start_without_food_ahead();
    let mut events = Vec::new();

    let _ = world.advance(-2.0, &mut events).expect("running");
    let _ = world.advance(-1.0, &mut events).expect("running");
    assert_eq!(query::steps_taken(&world), 4);

    let _ = world.advance(-0.5, &mut events).expect("running");
    let _ = world.advance(0.5, &mut events).expect("running");
    assert_eq!(query::steps_taken(&world), 10);
    assert_eq!(query::head_cell(&world), Some(CellCoord::new(25, 10)));
}

#[test]
fn many_small_frames_match_one_large_frame() {
    let frames = 600_u32;
    let final_timestamp = f64::from(frames) / 60.0;

    let mut smooth = start(21);
    let mut smooth_events = Vec::new();
    for frame in 0..=frames {
        let _ = smooth
            .advance(f64::from(frame) / 60.0, &mut smooth_events)
            .expect("advance");
    }

    let mut stalled = start(21);
    let mut stalled_events = Vec::new();
    let _ = stalled.advance(0.0, &mut stalled_events).expect("advance");
    let _ = stalled
        .advance(final_timestamp, &mut stalled_events)
        .expect("advance");

    assert_eq!(query::steps_taken(&smooth), query::steps_taken(&stalled));
    assert_eq!(query::snake_view(&smooth), query::snake_view(&stalled));
    assert_eq!(query::score(&smooth), query::score(&stalled));
    assert_eq!(query::food(&smooth), query::food(&stalled));
    assert_eq!(query::phase(&smooth), query::phase(&stalled));
    assert_eq!(query::accumulator(&smooth), query::accumulator(&stalled));
    assert_eq!(smooth_events, stalled_events);
}

#[test]
fn accumulator_stays_below_one_step() {
    let mut world = start(34);
    let mut events = Vec::new();
    let frame_lengths = [0.016, 0.017, 0.5, 0.0, 0.033, 1.7, 0.004, 0.25, 0.249, 0.9];

    let mut clock = 3.0;
    for (index, length) in frame_lengths.iter().cycle().take(60).enumerate() {
        clock += length;
        let running = world.advance(clock, &mut events).expect("advance");
        let accumulator = query::accumulator(&world);
        let time_per_cell = query::time_per_cell(&world).expect("grid configured");
        assert!(accumulator >= 0.0, "frame {index}: negative accumulator");
        assert!(
            accumulator < time_per_cell,
            "frame {index}: {accumulator} >= {time_per_cell}"
        );
        if !running {
            break;
        }
    }
}

#[test]
fn frame_delta_limit_caps_steps_after_a_stall() {
    let rules = Rules {
        max_frame_delta: Some(0.5),
        ..Rules::default()
    };
    let mut world = (0_u64..)
        .map(|seed| {
            let mut world = World::new(rules, seed).expect("valid rules");
            let mut events = Vec::new();
            world
                .initialize(600.0, 400.0, 20.0, &mut events)
                .expect("valid canvas");
            world.reset(&mut events).expect("grid configured");
            world
        })
        .find(|world| query::food_cell(world).map(|cell| cell.row()) != Some(10))
        .expect("some seed places food off the starting row");
    let mut events = Vec::new();

    let _ = world.advance(0.0, &mut events).expect("running");
    let _ = world.advance(60.0, &mut events).expect("running");

    assert_eq!(query::steps_taken(&world), 2);
}

#[test]
fn non_finite_timestamps_are_rejected() {
    let mut world = start(1);
    assert!(world.advance(f64::NAN, &mut Vec::new()).is_err());
    assert_eq!(query::steps_taken(&world), 0);
}
