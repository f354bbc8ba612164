// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Brickworks frame loop.
//!
//! Ticks a [`FrameStep`] at a fixed interval. Each tick hands the stage the
//! nominal frame length as `dt`, so a stage sees the same sequence of steps
//! whether the loop runs in real time or is ticked by hand.

use anyhow::Result;
use std::time::Duration;
use tokio::time;
use tracing::{debug, info, instrument};

/// Frames between periodic progress lines.
const LOG_EVERY: u64 = 600;

/// Work done once per frame, after the physics pass.
pub trait FrameStep {
    /// Advances the stage by `dt` seconds.
    fn step(&mut self, dt: f32) -> Result<()>;
}

impl<F> FrameStep for F
where
    F: FnMut(f32) -> Result<()>,
{
    fn step(&mut self, dt: f32) -> Result<()> {
        self(dt)
    }
}

/// Fixed-interval loop around a single stage.
pub struct FrameLoop<S> {
    interval: Duration,
    frame_count: u64,
    stage: S,
}

impl<S: FrameStep> FrameLoop<S> {
    /// Creates a loop ticking every `interval_ms` milliseconds (at least 1).
    pub fn new(interval_ms: u64, stage: S) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1)),
            frame_count: 0,
            stage,
        }
    }

    /// Frame length handed to the stage.
    pub fn dt(&self) -> f32 {
        self.interval.as_secs_f32()
    }

    /// Frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Borrow the stage.
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Mutably borrow the stage.
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// Consume the loop and return the stage.
    pub fn into_inner(self) -> S {
        self.stage
    }

    /// Runs until the stage returns an error.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        let mut interval = time::interval(self.interval);
        info!("Frame loop started. Interval: {:?}", self.interval);
        loop {
            interval.tick().await;
            self.tick()?;
        }
    }

    /// Runs exactly `frames` frames on the interval, then returns.
    #[instrument(skip(self))]
    pub async fn run_for(&mut self, frames: u64) -> Result<()> {
        let mut interval = time::interval(self.interval);
        for _ in 0..frames {
            interval.tick().await;
            self.tick()?;
        }
        debug!(frames = self.frame_count, "frame loop finished");
        Ok(())
    }

    /// Ticks one frame immediately.
    pub fn tick(&mut self) -> Result<()> {
        self.frame_count += 1;
        let dt = self.dt();
        self.stage.step(dt)?;
        if self.frame_count.is_multiple_of(LOG_EVERY) {
            info!("Frame #{}", self.frame_count);
        }
        Ok(())
    }
}
