// src/city/policy.rs

use crate::math::geometry::polygon::ClippingAlgorithm;
use crate::math::{error::*, types::*, utils::*};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Platzierung der Kind-Seeds um die Position des Elternknotens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeedStrategy {
    /// Fester Ring mit `count` Seeds im Abstand `range / radius_divisor`
    Ring { count: usize, radius_divisor: f64 },
    /// `floor(area / area_per_child)` Seeds in zufälligem Winkel und Abstand
    /// `[0, min(max_radius, range - margin)]`
    Scatter {
        area_per_child: f64,
        max_radius: f64,
        margin: f64,
    },
}

/// Ein platzierter Seed. `sector` ist nur bei Ring-Platzierung gesetzt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedPlacement {
    pub position: Point2D,
    pub sector: Option<usize>,
}

impl SeedStrategy {
    /// Anzahl der Seeds für eine Elternzelle der Fläche `parent_area`
    pub fn seed_count(&self, parent_area: f64) -> usize {
        match *self {
            SeedStrategy::Ring { count, .. } => count,
            SeedStrategy::Scatter { area_per_child, .. } => {
                if area_per_child <= 0.0 || !parent_area.is_finite() || parent_area <= 0.0 {
                    0
                } else {
                    (parent_area / area_per_child).floor() as usize
                }
            }
        }
    }

    /// Platziert die Seeds um `center`. `range` ist der konservative Radius
    /// der Elternzelle (minimaler Abstand Schwerpunkt-Ecke).
    pub fn place<R: Rng + ?Sized>(
        &self,
        center: Point2D,
        range: f64,
        parent_area: f64,
        rng: &mut R,
    ) -> Vec<SeedPlacement> {
        let count = self.seed_count(parent_area);

        match *self {
            SeedStrategy::Ring { radius_divisor, .. } => {
                let radius = range / radius_divisor;
                (0..count)
                    .map(|i| {
                        let angle = i as f64 * constants::TAU / count as f64;
                        // Start oben (0, -1), Drehung im Uhrzeigersinn der Bildschirmkoordinaten
                        let direction = Point2D::new(angle.sin(), -angle.cos());
                        SeedPlacement {
                            position: center + direction * radius,
                            sector: Some(i),
                        }
                    })
                    .collect()
            }
            SeedStrategy::Scatter {
                max_radius, margin, ..
            } => {
                let reach = max_radius.min(range - margin).max(0.0);
                (0..count)
                    .map(|_| {
                        let angle = rng.random_range(0.0..constants::TAU);
                        let magnitude = if reach > 0.0 {
                            rng.random_range(0.0..=reach)
                        } else {
                            0.0
                        };
                        SeedPlacement {
                            position: center + Point2D::new(angle.sin(), -angle.cos()) * magnitude,
                            sector: None,
                        }
                    })
                    .collect()
            }
        }
    }

    pub fn validate(&self) -> MathResult<()> {
        match *self {
            SeedStrategy::Ring {
                count,
                radius_divisor,
            } => {
                if count == 0 {
                    return Err(MathError::InvalidConfiguration {
                        message: "Ring seeding needs at least one seed".to_string(),
                    });
                }
                if !radius_divisor.is_finite() || radius_divisor <= 0.0 {
                    return Err(MathError::InvalidConfiguration {
                        message: format!("Ring radius divisor must be positive, got {radius_divisor}"),
                    });
                }
            }
            SeedStrategy::Scatter {
                area_per_child,
                max_radius,
                margin,
            } => {
                if !area_per_child.is_finite() || area_per_child <= 0.0 {
                    return Err(MathError::InvalidConfiguration {
                        message: format!("Area per child must be positive, got {area_per_child}"),
                    });
                }
                if !max_radius.is_finite() || max_radius < 0.0 || !margin.is_finite() {
                    return Err(MathError::InvalidConfiguration {
                        message: "Scatter radius and margin must be finite".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Basisgewicht eines Kindes für die gewichtete Tessellierung
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Weighting {
    /// Kein Gewicht, ungewichtete Tessellierung
    Uniform,
    /// Gewicht = Sektorindex * `bias_step`, gewichtete Tessellierung
    Sector { bias_step: f64 },
}

impl Weighting {
    pub fn weight_for(&self, sector: Option<usize>) -> Option<f64> {
        match *self {
            Weighting::Uniform => None,
            Weighting::Sector { bias_step } => Some(sector.unwrap_or(0) as f64 * bias_step),
        }
    }

    pub fn is_weighted(&self) -> bool {
        matches!(self, Weighting::Sector { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelaxationOptions {
    /// Iterationen direkt nach dem Befüllen eines Knotens (0 = keine)
    pub burst_iterations: usize,
    /// Abbruch, wenn die Summe der Verschiebungen darunter fällt
    pub convergence_tolerance: f64,
}

impl Default for RelaxationOptions {
    fn default() -> Self {
        Self {
            burst_iterations: 0,
            convergence_tolerance: 1e-3,
        }
    }
}

/// Regeln, nach denen ein Knoten einer Tiefe seine Kinder erzeugt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionPolicy {
    pub seeding: SeedStrategy,
    pub weighting: Weighting,
    /// Kinder mit kleinerer Zellfläche werden entfernt
    pub cull_area: f64,
    /// Offset des Elternrings vor Tessellierung und Clipping (negativ = nach innen)
    pub padding: f64,
    pub clipping: ClippingAlgorithm,
    pub relaxation: RelaxationOptions,
}

impl SubdivisionPolicy {
    /// Sechs gewichtete Wards auf einem Ring um den Stadtschwerpunkt
    pub fn wards() -> Self {
        Self {
            seeding: SeedStrategy::Ring {
                count: 6,
                radius_divisor: 3.0,
            },
            weighting: Weighting::Sector { bias_step: 0.1 },
            cull_area: 200.0,
            padding: -10.0,
            clipping: ClippingAlgorithm::Overlay,
            relaxation: RelaxationOptions::default(),
        }
    }

    /// Ein Gebäude je 3000 Flächeneinheiten, 32 Relaxationsschritte
    pub fn buildings() -> Self {
        Self {
            seeding: SeedStrategy::Scatter {
                area_per_child: 3000.0,
                max_radius: 20.0,
                margin: 10.0,
            },
            weighting: Weighting::Uniform,
            cull_area: 200.0,
            padding: -10.0,
            clipping: ClippingAlgorithm::Overlay,
            relaxation: RelaxationOptions {
                burst_iterations: 32,
                ..Default::default()
            },
        }
    }

    pub fn with_seeding(mut self, seeding: SeedStrategy) -> Self {
        self.seeding = seeding;
        self
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn with_cull_area(mut self, cull_area: f64) -> Self {
        self.cull_area = cull_area;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_clipping(mut self, clipping: ClippingAlgorithm) -> Self {
        self.clipping = clipping;
        self
    }

    pub fn with_relaxation(mut self, relaxation: RelaxationOptions) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        self.seeding.validate()?;

        if !self.cull_area.is_finite() || self.cull_area < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Cull area must be non-negative, got {}", self.cull_area),
            });
        }
        if !self.padding.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: "Padding must be finite".to_string(),
            });
        }
        if let Weighting::Sector { bias_step } = self.weighting {
            if !bias_step.is_finite() {
                return Err(MathError::InvalidConfiguration {
                    message: "Sector bias step must be finite".to_string(),
                });
            }
        }
        if !self.relaxation.convergence_tolerance.is_finite()
            || self.relaxation.convergence_tolerance < 0.0
        {
            return Err(MathError::InvalidConfiguration {
                message: "Convergence tolerance must be non-negative".to_string(),
            });
        }

        Ok(())
    }
}
