// src/math/geometry/voronoi/site.rs
use crate::math::geometry::polygon::{Polygon, PolygonProperties};
use crate::math::types::*;
use crate::math::utils::constants;

/// Eingabepunkt der Tessellierung mit optionalem Gewicht (0 = neutral)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub position: Point2D,
    pub weight: f64,
}

impl Site {
    pub fn new(position: Point2D) -> Self {
        Self {
            position,
            weight: 0.0,
        }
    }

    pub fn weighted(position: Point2D, weight: f64) -> Self {
        Self { position, weight }
    }
}

impl From<Point2D> for Site {
    fn from(position: Point2D) -> Self {
        Self::new(position)
    }
}

/// Eine Zelle der Tessellierung, indexgleich mit den Eingabe-Sites
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    pub site_index: usize,
    pub site: Site,
    /// Tatsächlich verwendetes Gewicht (inkl. Skalierung und Jitter)
    pub effective_weight: f64,
    pub polygon: Polygon,
}

impl VoronoiCell {
    /// Leere oder flächenlose Zelle (z.B. für koinzidente Sites)
    pub fn is_degenerate(&self) -> bool {
        self.polygon.len() < 3 || self.polygon.area() < constants::AREA_EPSILON
    }
}
