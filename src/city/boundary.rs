// src/city/boundary.rs

use crate::math::geometry::polygon::{ConvexHullComputer, Polygon};
use crate::math::{error::*, types::*, utils::*};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Zufällige Stadtgrenze: ein Stern aus `sides` Strahlen zufälliger Länge,
/// anschließend konvex gehüllt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryGeneratorConfig {
    pub center: [f64; 2],
    pub min_sides: usize,
    pub max_sides: usize,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for BoundaryGeneratorConfig {
    fn default() -> Self {
        Self {
            center: [430.0, 240.0],
            min_sides: 3,
            max_sides: 12,
            min_radius: 100.0,
            max_radius: 235.0,
        }
    }
}

impl BoundaryGeneratorConfig {
    pub fn validate(&self) -> MathResult<()> {
        if self.min_sides < 3 || self.min_sides > self.max_sides {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Side range {}..={} must start at 3 or more",
                    self.min_sides, self.max_sides
                ),
            });
        }
        if !(self.min_radius > 0.0 && self.min_radius < self.max_radius && self.max_radius.is_finite())
        {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Radius range [{}, {}) is empty or not positive",
                    self.min_radius, self.max_radius
                ),
            });
        }
        Ok(())
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.center[0], self.center[1])
    }

    /// Erzeugt eine neue konvexe Grenze
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MathResult<Polygon> {
        self.validate()?;

        let sides = rng.random_range(self.min_sides..=self.max_sides);
        let center = self.center();
        let spikes: Vec<Point2D> = (0..sides)
            .map(|i| {
                let angle = i as f64 * constants::TAU / sides as f64;
                let radius = rng.random_range(self.min_radius..self.max_radius);
                center + Point2D::new(angle.sin(), -angle.cos()) * radius
            })
            .collect();

        ConvexHullComputer::default().compute_hull(&spikes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::{Orientation, PolygonProperties};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_boundaries_are_convex_and_bounded() {
        let config = BoundaryGeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let boundary = config.generate(&mut rng).unwrap();
            assert!(boundary.len() >= 3 && boundary.len() <= 12);
            assert!(boundary.is_convex());
            assert_eq!(boundary.orientation(), Orientation::CounterClockwise);
            for v in boundary.vertices() {
                let r = v.distance(config.center());
                assert!(r >= 100.0 - 1e-9 && r < 235.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_boundary() {
        let config = BoundaryGeneratorConfig::default();
        let a = config.generate(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = config.generate(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config() {
        let config = BoundaryGeneratorConfig {
            min_sides: 2,
            ..Default::default()
        };
        assert!(config.generate(&mut StdRng::seed_from_u64(1)).is_err());

        let config = BoundaryGeneratorConfig {
            min_radius: 50.0,
            max_radius: 50.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
