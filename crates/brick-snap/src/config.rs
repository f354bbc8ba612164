// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-plug snap behaviour: instant vs animated correction, rotation
//! alignment, and feedback parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource name looked up when no explicit snap clip is configured.
pub const DEFAULT_FALLBACK_SOUND: &str = "LegoClick";

/// Default animated snap window, in seconds.
pub const DEFAULT_SNAP_DURATION_SECS: f32 = 0.12;

/// Haptic pulse sent to every active controller when a snap lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticPulse {
    /// Normalised amplitude in `[0, 1]`.
    pub strength: f32,
    /// Pulse length in seconds.
    pub duration_secs: f32,
}

impl Default for HapticPulse {
    fn default() -> Self {
        Self {
            strength: 0.7,
            duration_secs: 0.1,
        }
    }
}

/// Configuration carried by every plug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Land on the target pose in the step the snap resolves, skipping the
    /// animated approach.
    pub instant_snap_enabled: bool,
    /// Length of the animated approach. Ignored when `instant_snap_enabled`.
    pub snap_duration_secs: f32,
    /// Rotate the moving brick onto the stationary brick's rotation.
    pub align_rotation_on_snap: bool,
    /// Controller pulse on completion.
    pub haptics: HapticPulse,
    /// Explicit clip to play at the contact point.
    pub snap_sound: Option<String>,
    /// Clip resource tried when `snap_sound` is unset.
    pub fallback_sound: String,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            instant_snap_enabled: false,
            snap_duration_secs: DEFAULT_SNAP_DURATION_SECS,
            align_rotation_on_snap: true,
            haptics: HapticPulse::default(),
            snap_sound: None,
            fallback_sound: DEFAULT_FALLBACK_SOUND.to_owned(),
        }
    }
}

impl SnapConfig {
    /// Config that lands in a single step.
    pub fn instant() -> Self {
        Self {
            instant_snap_enabled: true,
            ..Self::default()
        }
    }

    /// Config that animates over `duration_secs`.
    pub fn animated(duration_secs: f32) -> Self {
        Self {
            instant_snap_enabled: false,
            snap_duration_secs: duration_secs,
            ..Self::default()
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.snap_duration_secs.is_finite() || self.snap_duration_secs < 0.0 {
            return Err(ConfigValidationError::SnapDuration(self.snap_duration_secs));
        }
        let strength = self.haptics.strength;
        if !(0.0..=1.0).contains(&strength) {
            return Err(ConfigValidationError::HapticStrength(strength));
        }
        let pulse = self.haptics.duration_secs;
        if !pulse.is_finite() || pulse < 0.0 {
            return Err(ConfigValidationError::HapticDuration(pulse));
        }
        Ok(())
    }

    /// Window the animated approach runs for; zero when snapping instantly.
    pub fn effective_duration(&self) -> f32 {
        if self.instant_snap_enabled {
            0.0
        } else {
            self.snap_duration_secs
        }
    }
}

/// Out-of-range configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    /// Duration must be finite and non-negative.
    #[error("snap duration must be finite and >= 0, got {0}")]
    SnapDuration(f32),
    /// Strength must lie in `[0, 1]`.
    #[error("haptic strength must be within [0, 1], got {0}")]
    HapticStrength(f32),
    /// Pulse duration must be finite and non-negative.
    #[error("haptic duration must be finite and >= 0, got {0}")]
    HapticDuration(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_smooth_variant() {
        let cfg = SnapConfig::default();
        assert!(!cfg.instant_snap_enabled);
        assert_eq!(cfg.snap_duration_secs, 0.12);
        assert!(cfg.align_rotation_on_snap);
        assert_eq!(cfg.haptics.strength, 0.7);
        assert_eq!(cfg.fallback_sound, "LegoClick");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let neg = SnapConfig::animated(-0.5);
        assert_eq!(
            neg.validate(),
            Err(ConfigValidationError::SnapDuration(-0.5))
        );

        let mut loud = SnapConfig::default();
        loud.haptics.strength = 1.5;
        assert!(matches!(
            loud.validate(),
            Err(ConfigValidationError::HapticStrength(_))
        ));

        let mut nan = SnapConfig::default();
        nan.haptics.duration_secs = f32::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn sparse_json_keeps_defaults() {
        let cfg: SnapConfig =
            serde_json::from_str(r#"{"snap_sound":"Clack","haptics":{"strength":0.2}}"#).unwrap();
        assert_eq!(cfg.snap_sound.as_deref(), Some("Clack"));
        assert_eq!(cfg.haptics.strength, 0.2);
        assert_eq!(cfg.haptics.duration_secs, 0.1);
        assert_eq!(cfg.snap_duration_secs, DEFAULT_SNAP_DURATION_SECS);
    }

    #[test]
    fn instant_has_zero_window() {
        assert_eq!(SnapConfig::instant().effective_duration(), 0.0);
        assert_eq!(SnapConfig::animated(0.3).effective_duration(), 0.3);
    }
}
