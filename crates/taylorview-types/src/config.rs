// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{TaylorError, TaylorResult};

/// Upper bound on samples per axis. Keeps a grid under ~1M cells.
pub const MAX_AXIS_POINTS: usize = 1001;

/// Slack added before flooring `(max - min) / step` so that ranges which
/// divide evenly in exact arithmetic keep their last sample.
const AXIS_EPSILON: f64 = 1e-9;

/// Sampling domain shared by the x and y axes.
///
/// The domain is fixed per configuration; the evaluator never adapts it
/// to the expansion point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// First sample on each axis. Default: -3.0.
    pub min: f64,
    /// Last sample on each axis (inclusive when reachable). Default: 3.0.
    pub max: f64,
    /// Spacing between samples. Default: 0.2.
    pub step: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            min: -3.0,
            max: 3.0,
            step: 0.2,
        }
    }
}

impl SamplingConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> TaylorResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || !self.step.is_finite() {
            return Err(TaylorError::Config(format!(
                "sampling bounds must be finite, got min={} max={} step={}",
                self.min, self.max, self.step
            )));
        }
        if self.min >= self.max {
            return Err(TaylorError::Config(format!(
                "min must be < max, got {} >= {}",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(TaylorError::Config(format!(
                "step must be > 0, got {}",
                self.step
            )));
        }
        // Checked in f64 so huge ratios are rejected before any cast.
        let n = self.intervals() + 1.0;
        if !n.is_finite() || n > MAX_AXIS_POINTS as f64 {
            return Err(TaylorError::Config(format!(
                "axis would have {n} points, limit is {MAX_AXIS_POINTS}"
            )));
        }
        Ok(())
    }

    /// Number of samples per axis (31 for the default domain).
    pub fn point_count(&self) -> usize {
        (self.intervals() as usize).saturating_add(1)
    }

    fn intervals(&self) -> f64 {
        ((self.max - self.min) / self.step + AXIS_EPSILON).floor()
    }

    /// Ordered sample coordinates `min + k * step`.
    pub fn axis(&self) -> Vec<f64> {
        (0..self.point_count())
            .map(|k| self.min + k as f64 * self.step)
            .collect()
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> TaylorResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TaylorError::Config(format!("JSON parse error: {e}")))
    }
}

/// Configuration for an interactive exploration session.
///
/// The point range and step describe the slider the front end offers;
/// only [`ExplorerConfig::clamp_point`] consults them. The evaluator
/// accepts any real expansion point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Grid the surfaces are sampled on.
    pub sampling: SamplingConfig,
    /// Lowest selectable expansion coordinate. Default: -2.0.
    pub point_min: f64,
    /// Highest selectable expansion coordinate. Default: 2.0.
    pub point_max: f64,
    /// Slider resolution. Default: 0.1.
    pub point_step: f64,
    /// Language requested from the explanation collaborator.
    pub explanation_language: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            point_min: -2.0,
            point_max: 2.0,
            point_step: 0.1,
            explanation_language: "Chinese".to_string(),
        }
    }
}

impl ExplorerConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> TaylorResult<()> {
        self.sampling.validate()?;
        if !self.point_min.is_finite() || !self.point_max.is_finite() {
            return Err(TaylorError::Config(format!(
                "point range must be finite, got [{}, {}]",
                self.point_min, self.point_max
            )));
        }
        if self.point_min >= self.point_max {
            return Err(TaylorError::Config(format!(
                "point_min must be < point_max, got {} >= {}",
                self.point_min, self.point_max
            )));
        }
        if !(self.point_step > 0.0 && self.point_step.is_finite()) {
            return Err(TaylorError::Config(format!(
                "point_step must be > 0, got {}",
                self.point_step
            )));
        }
        Ok(())
    }

    /// Snap a coordinate onto the slider grid and clamp it into range.
    ///
    /// NaN maps to `point_min`, infinities to the nearest bound.
    pub fn clamp_point(&self, value: f64) -> f64 {
        if value.is_nan() {
            log::warn!("clamp_point: NaN coordinate, using {:.2}", self.point_min);
            return self.point_min;
        }
        if value.is_infinite() {
            return if value > 0.0 {
                self.point_max
            } else {
                self.point_min
            };
        }
        let steps = ((value - self.point_min) / self.point_step).round();
        (self.point_min + steps * self.point_step).clamp(self.point_min, self.point_max)
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> TaylorResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TaylorError::Config(format!("JSON parse error: {e}")))
    }
}
