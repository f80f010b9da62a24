// src/math/geometry/voronoi/config.rs
use crate::math::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};

/// Parameter der gewichteten Tessellierung.
///
/// Effektives Gewicht eines Sites im gewichteten Modus:
/// `weight * weight_scale + 1 / (x + jitter)`, mit `jitter` gleichverteilt in
/// `[jitter_min, jitter_max)` und pro Aufruf neu gezogen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoronoiConfig {
    /// Skalierung K des Basisgewichts (Einheit: Fläche)
    pub weight_scale: f64,
    pub jitter_min: f64,
    pub jitter_max: f64,
}

impl VoronoiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight_scale(mut self, weight_scale: f64) -> Self {
        self.weight_scale = weight_scale;
        self
    }

    pub fn with_jitter(mut self, min: f64, max: f64) -> Self {
        self.jitter_min = min;
        self.jitter_max = max;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !self.weight_scale.is_finite() || self.weight_scale < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Weight scale must be finite and non-negative".to_string(),
            });
        }

        if !self.jitter_min.is_finite()
            || !self.jitter_max.is_finite()
            || self.jitter_min >= self.jitter_max
        {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Jitter range [{}, {}) is empty or not finite",
                    self.jitter_min, self.jitter_max
                ),
            });
        }

        Ok(())
    }
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            weight_scale: 400.0,
            jitter_min: 0.0,
            jitter_max: 1.0,
        }
    }
}
