// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording audio and haptics doubles.

use std::collections::BTreeSet;

use brick_core::math::Vec3;
use brick_snap::{AudioPort, ControllerId, HapticsPort};

/// One clip played through [`RecordingAudio`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedClip {
    /// Clip name.
    pub clip: String,
    /// World position it was played at.
    pub position: Vec3,
}

/// Audio port that records playback and resolves a fixed set of clip names.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    known: BTreeSet<String>,
    played: Vec<PlayedClip>,
}

impl RecordingAudio {
    /// Audio with no loadable clips.
    pub fn new() -> Self {
        Self::default()
    }

    /// Audio that can load each of `clips`.
    pub fn with_clips<I, S>(clips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: clips.into_iter().map(Into::into).collect(),
            played: Vec::new(),
        }
    }

    /// Everything played so far.
    pub fn played(&self) -> &[PlayedClip] {
        &self.played
    }
}

impl AudioPort for RecordingAudio {
    fn has_clip(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    fn play_clip_at_point(&mut self, clip: &str, position: Vec3) {
        self.played.push(PlayedClip {
            clip: clip.to_owned(),
            position,
        });
    }
}

/// One pulse sent through [`RecordingHaptics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Target controller.
    pub controller: ControllerId,
    /// Amplitude.
    pub strength: f32,
    /// Length in seconds.
    pub duration_secs: f32,
}

/// Haptics port that records every pulse.
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    pulses: Vec<Pulse>,
}

impl RecordingHaptics {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far.
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }
}

impl HapticsPort for RecordingHaptics {
    fn send_pulse(&mut self, controller: ControllerId, strength: f32, duration_secs: f32) {
        self.pulses.push(Pulse {
            controller,
            strength,
            duration_secs,
        });
    }
}
