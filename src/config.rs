use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::presets::{AspectRatio, KaraokeStyle};
use crate::timeline::scenes::MIN_SCENE_SECS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub max_words_per_group: usize,
    /// Platform-enforced maximum clip length.
    pub hard_cap_secs: f64,
    /// Used when neither a measured nor an authored duration is usable.
    pub fallback_duration_secs: f64,
    /// Longest time a single background asset stays on screen. `None` spreads
    /// the assets evenly over the whole clip.
    pub max_scene_secs: Option<f64>,
    pub estimator: EstimatorConfig,
    pub highlight: HighlightTolerance,
    pub style: KaraokeStyle,
    pub aspect_ratio: AspectRatio,
}

impl TimelineConfig {
    pub const DEFAULT_MAX_WORDS_PER_GROUP: usize = 8;
    pub const DEFAULT_HARD_CAP_SECS: f64 = 30.0;
    pub const DEFAULT_FALLBACK_DURATION_SECS: f64 = 15.0;

    pub fn load(path: &Path) -> Result<Self, TimelineError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| TimelineError::io("read timeline config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| TimelineError::json("parse timeline config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.max_words_per_group == 0 {
            return Err(TimelineError::invalid_input(
                "max_words_per_group must be at least 1",
            ));
        }
        ensure_positive("hard_cap_secs", self.hard_cap_secs)?;
        ensure_positive("fallback_duration_secs", self.fallback_duration_secs)?;
        if let Some(max_scene_secs) = self.max_scene_secs {
            ensure_positive("max_scene_secs", max_scene_secs)?;
            if max_scene_secs < MIN_SCENE_SECS {
                return Err(TimelineError::invalid_input(format!(
                    "max_scene_secs must be at least {MIN_SCENE_SECS}, got {max_scene_secs}"
                )));
            }
        }
        ensure_non_negative("estimator.char_rate_secs", self.estimator.char_rate_secs)?;
        ensure_non_negative("estimator.base_offset_secs", self.estimator.base_offset_secs)?;
        ensure_non_negative("estimator.word_gap_secs", self.estimator.word_gap_secs)?;
        ensure_non_negative(
            "highlight.forward_tolerance_secs",
            self.highlight.forward_tolerance_secs,
        )?;
        ensure_non_negative("highlight.gap_tolerance_secs", self.highlight.gap_tolerance_secs)?;
        Ok(())
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_words_per_group: Self::DEFAULT_MAX_WORDS_PER_GROUP,
            hard_cap_secs: Self::DEFAULT_HARD_CAP_SECS,
            fallback_duration_secs: Self::DEFAULT_FALLBACK_DURATION_SECS,
            max_scene_secs: None,
            estimator: EstimatorConfig::default(),
            highlight: HighlightTolerance::default(),
            style: KaraokeStyle::default(),
            aspect_ratio: AspectRatio::default(),
        }
    }
}

/// Per-word duration model used when no measured timing exists:
/// `chars * char_rate_secs + base_offset_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub char_rate_secs: f64,
    pub base_offset_secs: f64,
    pub word_gap_secs: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            char_rate_secs: 0.08,
            base_offset_secs: 0.2,
            word_gap_secs: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTolerance {
    /// Extends each word's end so adjacent highlights do not flicker.
    pub forward_tolerance_secs: f64,
    /// Snap distance to the nearest word when the query falls in a gap.
    pub gap_tolerance_secs: f64,
}

impl Default for HighlightTolerance {
    fn default() -> Self {
        Self {
            forward_tolerance_secs: 0.01,
            gap_tolerance_secs: 0.05,
        }
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<(), TimelineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TimelineError::invalid_input(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result<(), TimelineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TimelineError::invalid_input(format!(
            "{name} must be a non-negative finite number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_config_default() {
        let config = TimelineConfig::default();
        assert_eq!(config.max_words_per_group, 8);
        assert_eq!(config.hard_cap_secs, 30.0);
        assert_eq!(config.fallback_duration_secs, 15.0);
        assert!(config.max_scene_secs.is_none());
        assert_eq!(config.estimator.char_rate_secs, 0.08);
        assert_eq!(config.estimator.base_offset_secs, 0.2);
        assert_eq!(config.highlight.forward_tolerance_secs, 0.01);
        assert_eq!(config.highlight.gap_tolerance_secs, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "hard_cap_secs": 60.0,
            "estimator": { "char_rate_secs": 0.1 },
            "style": "warm",
            "aspect_ratio": "1:1"
        }"#;
        let config: TimelineConfig = serde_json::from_str(json).expect("valid config json");
        assert_eq!(config.hard_cap_secs, 60.0);
        assert_eq!(config.max_words_per_group, 8);
        assert_eq!(config.estimator.char_rate_secs, 0.1);
        assert_eq!(config.estimator.base_offset_secs, 0.2);
        assert_eq!(config.style, KaraokeStyle::Warm);
        assert_eq!(config.aspect_ratio, AspectRatio::Square1x1);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = TimelineConfig {
            max_words_per_group: 0,
            ..TimelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TimelineConfig {
            hard_cap_secs: f64::NAN,
            ..TimelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TimelineConfig {
            max_scene_secs: Some(0.0),
            ..TimelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TimelineConfig {
            max_scene_secs: Some(1e-9),
            ..TimelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TimelineConfig {
            max_scene_secs: Some(MIN_SCENE_SECS),
            ..TimelineConfig::default()
        };
        assert!(config.validate().is_ok());

        let mut config = TimelineConfig::default();
        config.highlight.gap_tolerance_secs = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_and_validates_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let good = dir.path().join("timeline.json");
        std::fs::write(&good, r#"{"max_words_per_group": 5}"#).expect("write config");
        let config = TimelineConfig::load(&good).expect("load");
        assert_eq!(config.max_words_per_group, 5);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"max_words_per_group": 0}"#).expect("write config");
        assert!(matches!(
            TimelineConfig::load(&bad),
            Err(TimelineError::InvalidInput { .. })
        ));

        assert!(matches!(
            TimelineConfig::load(&dir.path().join("missing.json")),
            Err(TimelineError::Io { .. })
        ));
    }
}
