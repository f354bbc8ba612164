// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use brick_core::math::smoothstep;

use crate::types::pose::Pose;

/// Path a moving brick follows from its pose at acceptance to its snapped pose.
///
/// - `start` is the pose captured when correction begins.
/// - `target` is the authoritative landing pose.
///
/// `sample` is only an approach: lerp/slerp at `progress == 1` can be off by an
/// ulp, so callers land on [`SnapSpan::target`] once the animation window
/// closes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SnapSpan {
    start: Pose,
    target: Pose,
}

impl SnapSpan {
    /// Creates a span between two poses.
    #[must_use]
    pub const fn new(start: Pose, target: Pose) -> Self {
        Self { start, target }
    }

    /// Pose when correction began.
    #[must_use]
    pub const fn start(&self) -> Pose {
        self.start
    }

    /// Exact landing pose.
    #[must_use]
    pub const fn target(&self) -> Pose {
        self.target
    }

    /// Pose at linear `progress` in `[0, 1]` (no easing applied).
    ///
    /// Position is lerped, rotation slerped along the shortest arc.
    #[must_use]
    pub fn sample(&self, progress: f32) -> Pose {
        let position = self
            .start
            .position()
            .lerp(&self.target.position(), progress);
        let rotation = self
            .start
            .rotation()
            .slerp(&self.target.rotation(), progress);
        Pose::new(position, rotation)
    }

    /// Pose after `elapsed` of a `duration` window, eased with smoothstep.
    ///
    /// A non-positive `duration` is treated as an already-closed window.
    #[must_use]
    pub fn sample_eased(&self, elapsed: f32, duration: f32) -> Pose {
        if duration <= 0.0 {
            return self.target;
        }
        self.sample(smoothstep(elapsed / duration))
    }
}
