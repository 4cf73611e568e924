use std::path::Path;

use crate::error::ScoringError;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Maximum positional offset searched around each expected word.
    pub window_radius: usize,
    /// Words whose best similarity is strictly below this are mispronounced.
    pub mispronunciation_threshold: f64,
}

impl ScoringConfig {
    pub const DEFAULT_WINDOW_RADIUS: usize = 3;
    pub const DEFAULT_MISPRONUNCIATION_THRESHOLD: f64 = 0.8;

    /// Builds a config from untyped numbers, rejecting a negative radius or a
    /// threshold outside [0, 1].
    pub fn new(window_radius: i64, mispronunciation_threshold: f64) -> Result<Self, ScoringError> {
        let window_radius = usize::try_from(window_radius).map_err(|_| {
            ScoringError::invalid_argument(format!(
                "window_radius must be >= 0, got {window_radius}"
            ))
        })?;
        let config = Self {
            window_radius,
            mispronunciation_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        validate_threshold(self.mispronunciation_threshold)
    }

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scoring config", e))?;
        let raw: RawScoringConfig = serde_json::from_str(&data)
            .map_err(|e| ScoringError::json("parse scoring config", e))?;
        Self::new(raw.window_radius, raw.mispronunciation_threshold)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            window_radius: Self::DEFAULT_WINDOW_RADIUS,
            mispronunciation_threshold: Self::DEFAULT_MISPRONUNCIATION_THRESHOLD,
        }
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), ScoringError> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(ScoringError::invalid_argument(format!(
            "mispronunciation_threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}

#[derive(Debug, serde::Deserialize)]
struct RawScoringConfig {
    #[serde(default = "default_window_radius")]
    window_radius: i64,
    #[serde(default = "default_threshold")]
    mispronunciation_threshold: f64,
}

fn default_window_radius() -> i64 {
    ScoringConfig::DEFAULT_WINDOW_RADIUS as i64
}
fn default_threshold() -> f64 {
    ScoringConfig::DEFAULT_MISPRONUNCIATION_THRESHOLD
}
