//! Fixed-timestep accumulator that turns frame timestamps into whole steps.

use std::time::Duration;

use snake_grid_core::EngineError;

const MIN_TIME_PER_CELL: Duration = Duration::from_nanos(1);

/// Converts a cell size and speed into the time one step takes.
pub(crate) fn time_per_cell(cell_size: f32, speed: f32) -> Duration {
    let seconds = f64::from(cell_size) / f64::from(speed);
    Duration::try_from_secs_f64(seconds)
        .unwrap_or(Duration::MAX)
        .max(MIN_TIME_PER_CELL)
}

/// Carries elapsed time across frames.
///
/// Every timestamp is measured as a [`Duration`] from the first frame after a
/// restart, so the time accumulated over a span does not depend on how many
/// frames it was delivered in. Host clocks may start anywhere, including
/// below zero.
#[derive(Clone, Debug)]
pub(crate) struct Pacer {
    baseline: Option<Baseline>,
    accumulator: Duration,
    max_frame_delta: Option<Duration>,
}

#[derive(Clone, Copy, Debug)]
struct Baseline {
    origin: f64,
    last: Duration,
}

impl Pacer {
    pub(crate) fn new(max_frame_delta: Option<f64>) -> Self {
        Self {
            baseline: None,
            accumulator: Duration::ZERO,
            max_frame_delta: max_frame_delta
                .and_then(|limit| Duration::try_from_secs_f64(limit).ok()),
        }
    }

    /// Forgets the previous frame so the next timestamp becomes the baseline.
    pub(crate) fn restart(&mut self) {
        self.baseline = None;
        self.accumulator = Duration::ZERO;
    }

    /// Adds the time since the previous frame, returning the accepted delta.
    ///
    /// Timestamps earlier than the previous frame contribute nothing and
    /// become the reference for the next frame.
    pub(crate) fn accumulate(&mut self, timestamp: f64) -> Result<Duration, EngineError> {
        if !timestamp.is_finite() {
            return Err(EngineError::InvalidTimestamp { timestamp });
        }
        let delta = match self.baseline {
            Some(Baseline { origin, last }) if timestamp >= origin => {
                let now = elapsed_since(origin, timestamp)?;
                self.baseline = Some(Baseline { origin, last: now });
                now.saturating_sub(last)
            }
            _ => {
                self.baseline = Some(Baseline {
                    origin: timestamp,
                    last: Duration::ZERO,
                });
                Duration::ZERO
            }
        };
        let delta = match self.max_frame_delta {
            Some(limit) => delta.min(limit),
            None => delta,
        };
        self.accumulator = self.accumulator.saturating_add(delta);
        Ok(delta)
    }

    /// Withdraws one step's worth of time if enough has accumulated.
    pub(crate) fn try_consume(&mut self, time_per_cell: Duration) -> bool {
        if self.accumulator >= time_per_cell {
            self.accumulator -= time_per_cell;
            true
        } else {
            false
        }
    }

    /// Drops whole steps that can no longer be taken, keeping the fraction.
    pub(crate) fn settle(&mut self, time_per_cell: Duration) {
        let period = time_per_cell.as_nanos().max(1);
        let remainder = self.accumulator.as_nanos() % period;
        self.accumulator = Duration::from_nanos(u64::try_from(remainder).unwrap_or(u64::MAX));
    }

    pub(crate) const fn accumulator(&self) -> Duration {
        self.accumulator
    }
}

fn elapsed_since(origin: f64, timestamp: f64) -> Result<Duration, EngineError> {
    let elapsed = timestamp - origin;
    if elapsed <= 0.0 {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(elapsed).map_err(|_| EngineError::InvalidTimestamp { timestamp })
}
