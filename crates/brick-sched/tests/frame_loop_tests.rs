// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use anyhow::{bail, Result};
use brick_sched::{FrameLoop, FrameStep};
use std::time::Duration;

#[derive(Default)]
struct Recorder {
    dts: Vec<f32>,
}

impl FrameStep for Recorder {
    fn step(&mut self, dt: f32) -> Result<()> {
        self.dts.push(dt);
        Ok(())
    }
}

#[test]
fn manual_ticks_pass_nominal_dt() {
    let mut lp = FrameLoop::new(20, Recorder::default());
    lp.tick().unwrap();
    lp.tick().unwrap();
    assert_eq!(lp.frame_count(), 2);
    assert_eq!(lp.stage().dts, vec![0.02, 0.02]);
}

#[test]
fn zero_interval_is_clamped() {
    let lp = FrameLoop::new(0, Recorder::default());
    assert_eq!(lp.dt(), 0.001);
}

#[tokio::test(start_paused = true)]
async fn run_for_ticks_on_the_interval() {
    let started = tokio::time::Instant::now();
    let mut lp = FrameLoop::new(10, Recorder::default());
    lp.run_for(5).await.unwrap();
    assert_eq!(lp.into_inner().dts.len(), 5);
    // First tick fires immediately; four more intervals follow.
    assert_eq!(started.elapsed(), Duration::from_millis(40));
}

#[tokio::test(start_paused = true)]
async fn run_stops_on_stage_error() {
    let mut frames = 0u32;
    let stage = move |_dt: f32| -> Result<()> {
        frames += 1;
        if frames == 3 {
            bail!("stage gave up");
        }
        Ok(())
    };
    let mut lp = FrameLoop::new(16, stage);
    let err = lp.run().await.unwrap_err();
    assert_eq!(err.to_string(), "stage gave up");
    assert_eq!(lp.frame_count(), 3);
}
