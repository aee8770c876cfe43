//! Scripted player input for headless sessions.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Error, Result};
use snake_grid_system_steering::{Gesture, Key};

/// Gesture delivered on a specific frame.
///
/// Written as `FRAME:KEY` (for example `30:ArrowUp`) or
/// `FRAME:swipe:DX,DY` (for example `45:swipe:-80,4`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScriptedInput {
    pub(crate) frame: u32,
    pub(crate) gesture: Gesture,
}

impl FromStr for ScriptedInput {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let (frame, rest) = value
            .split_once(':')
            .ok_or_else(|| anyhow!("expected FRAME:GESTURE, got `{value}`"))?;
        let frame = frame
            .trim()
            .parse()
            .with_context(|| format!("invalid frame number `{frame}`"))?;

        let gesture = match rest.split_once(':') {
            Some((kind, offset)) if kind.trim().eq_ignore_ascii_case("swipe") => {
                parse_swipe(offset)?
            }
            Some(_) => bail!("unknown gesture `{rest}`"),
            None => Gesture::Key(rest.parse::<Key>()?),
        };

        Ok(Self { frame, gesture })
    }
}

fn parse_swipe(offset: &str) -> Result<Gesture> {
    let (dx, dy) = offset
        .split_once(',')
        .ok_or_else(|| anyhow!("expected swipe offset DX,DY, got `{offset}`"))?;
    let dx = dx
        .trim()
        .parse()
        .with_context(|| format!("invalid swipe dx `{dx}`"))?;
    let dy = dy
        .trim()
        .parse()
        .with_context(|| format!("invalid swipe dy `{dy}`"))?;
    Ok(Gesture::Swipe { dx, dy })
}

/// Gestures queued for each frame, consumed in frame order.
#[derive(Clone, Debug, Default)]
pub(crate) struct InputScript {
    inputs: Vec<ScriptedInput>,
    cursor: usize,
}

impl InputScript {
    pub(crate) fn new(mut inputs: Vec<ScriptedInput>) -> Self {
        inputs.sort_by_key(|input| input.frame);
        Self { inputs, cursor: 0 }
    }

    /// Gestures scheduled up to and including `frame` that were not yet taken.
    pub(crate) fn take_through(&mut self, frame: u32) -> Vec<Gesture> {
        let start = self.cursor;
        while self
            .inputs
            .get(self.cursor)
            .is_some_and(|input| input.frame <= frame)
        {
            self.cursor += 1;
        }
        self.inputs[start..self.cursor]
            .iter()
            .map(|input| input.gesture)
            .collect()
    }
}
