// src/math/geometry/polygon/operations/convex_hull.rs
use super::super::Polygon;
use crate::math::{error::*, types::*, utils::*};

/// Verschiedene Algorithmen für die konvexe Hülle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvexHullAlgorithm {
    /// Andrew's Monotone Chain (O(n log n))
    #[default]
    AndrewMonotone,
    /// Jarvis March / Gift Wrapping (O(nh), h = Anzahl Hull-Punkte)
    JarvisMarch,
}

/// Konvexe Hülle Computer
#[derive(Debug, Clone, Copy)]
pub struct ConvexHullComputer {
    algorithm: ConvexHullAlgorithm,
    tolerance: f64,
}

impl Default for ConvexHullComputer {
    fn default() -> Self {
        Self::new(ConvexHullAlgorithm::default())
    }
}

impl ConvexHullComputer {
    /// Erstellt einen neuen ConvexHull-Computer
    pub fn new(algorithm: ConvexHullAlgorithm) -> Self {
        Self {
            algorithm,
            tolerance: constants::EPSILON,
        }
    }

    /// Setzt die Toleranz für numerische Vergleiche
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Berechnet die konvexe Hülle von Punkten.
    ///
    /// Ergebnis ist ein offener Ring gegen den Uhrzeigersinn ohne kollineare
    /// Zwischenpunkte.
    pub fn compute_hull(&self, points: &[Point2D]) -> MathResult<Polygon> {
        if points.len() < 3 {
            return Err(MathError::UnsupportedInput {
                expected: 3,
                actual: points.len(),
            });
        }

        let hull_points = match self.algorithm {
            ConvexHullAlgorithm::AndrewMonotone => self.andrew_monotone(points),
            ConvexHullAlgorithm::JarvisMarch => self.jarvis_march(points),
        };

        if hull_points.len() < 3 {
            return Err(MathError::GeometricFailure {
                operation: "Convex hull resulted in fewer than 3 points".to_string(),
            });
        }

        Ok(Polygon::from_vertices_unchecked(hull_points))
    }

    /// Berechnet die konvexe Hülle eines Polygons
    pub fn compute_polygon_hull(&self, polygon: &Polygon) -> MathResult<Polygon> {
        self.compute_hull(polygon.vertices())
    }

    // === Algorithmus-Implementierungen ===

    fn andrew_monotone(&self, points: &[Point2D]) -> Vec<Point2D> {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        sorted.dedup();

        if sorted.len() < 3 {
            return sorted;
        }

        let mut lower: Vec<Point2D> = Vec::with_capacity(sorted.len());
        for &p in &sorted {
            while lower.len() >= 2
                && simple_geometry::cross(lower[lower.len() - 2], lower[lower.len() - 1], p)
                    <= self.tolerance
            {
                lower.pop();
            }
            lower.push(p);
        }

        let mut upper: Vec<Point2D> = Vec::with_capacity(sorted.len());
        for &p in sorted.iter().rev() {
            while upper.len() >= 2
                && simple_geometry::cross(upper[upper.len() - 2], upper[upper.len() - 1], p)
                    <= self.tolerance
            {
                upper.pop();
            }
            upper.push(p);
        }

        // Endpunkte sind jeweils im anderen Teil enthalten
        lower.pop();
        upper.pop();
        lower.extend(upper);
        lower
    }

    fn jarvis_march(&self, points: &[Point2D]) -> Vec<Point2D> {
        let mut unique = points.to_vec();
        unique.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        unique.dedup();

        if unique.len() < 3 {
            return unique;
        }

        // Start: der Punkt mit kleinstem x (bei Gleichstand kleinstem y)
        let start = 0;
        let mut hull = Vec::new();
        let mut current = start;

        loop {
            hull.push(unique[current]);
            let mut candidate = (current + 1) % unique.len();

            for (i, &p) in unique.iter().enumerate() {
                if i == current {
                    continue;
                }
                let cross = simple_geometry::cross(unique[current], unique[candidate], p);
                // p liegt rechts von current->candidate, oder kollinear und weiter weg
                let further = cross.abs() <= self.tolerance
                    && unique[current].distance_squared(p)
                        > unique[current].distance_squared(unique[candidate]);
                if cross < -self.tolerance || further {
                    candidate = i;
                }
            }

            current = candidate;
            if current == start || hull.len() > unique.len() {
                break;
            }
        }

        hull
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::{Orientation, PolygonProperties};
    use approx::assert_relative_eq;

    fn square_with_interior() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(0.5, 0.5), // Interior point
            Point2D::new(0.5, 0.0), // Collinear on an edge
        ]
    }

    #[test]
    fn test_convex_hull_square() {
        let computer = ConvexHullComputer::new(ConvexHullAlgorithm::AndrewMonotone);
        let hull = computer.compute_hull(&square_with_interior()).unwrap();

        // Hull should be the 4 corner points, stored open
        assert_eq!(hull.len(), 4);
        assert!(hull.is_convex());
        assert_eq!(hull.orientation(), Orientation::CounterClockwise);
        assert_relative_eq!(hull.area(), 1.0);
    }

    #[test]
    fn test_all_algorithms_same_result() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 1.0),
            Point2D::new(2.0, 3.0),
            Point2D::new(-1.0, 2.0),
            Point2D::new(1.0, 1.0), // Interior
            Point2D::new(0.5, 2.0), // Interior
        ];

        let algorithms = [
            ConvexHullAlgorithm::AndrewMonotone,
            ConvexHullAlgorithm::JarvisMarch,
        ];

        let hulls: Vec<Polygon> = algorithms
            .iter()
            .map(|algorithm| {
                ConvexHullComputer::new(*algorithm)
                    .compute_hull(&points)
                    .unwrap()
            })
            .collect();

        for hull in &hulls {
            assert_eq!(hull.len(), 4);
            assert!(hull.is_convex());
            assert_eq!(hull.orientation(), Orientation::CounterClockwise);
            assert_relative_eq!(hull.area(), hulls[0].area(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_hull_of_star_is_simple_boundary() {
        // Star shape: alternating radii, hull must drop the inner points
        let points: Vec<Point2D> = (0..10)
            .map(|i| {
                let angle = i as f64 * constants::TAU / 10.0;
                let radius = if i % 2 == 0 { 100.0 } else { 40.0 };
                Point2D::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();

        let hull = ConvexHullComputer::default().compute_hull(&points).unwrap();
        assert_eq!(hull.len(), 5);
        assert!(hull.is_convex());
    }

    #[test]
    fn test_insufficient_and_collinear_points() {
        let computer = ConvexHullComputer::default();
        assert!(matches!(
            computer.compute_hull(&[Point2D::ZERO, Point2D::ONE]),
            Err(MathError::UnsupportedInput { .. })
        ));

        let collinear = [
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
        ];
        assert!(matches!(
            computer.compute_hull(&collinear),
            Err(MathError::GeometricFailure { .. })
        ));
    }
}
