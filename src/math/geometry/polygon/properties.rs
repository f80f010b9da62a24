// src/math/geometry/polygon/properties.rs

use crate::math::geometry::polygon::Polygon;
use crate::math::{
    error::*,
    types::*,
    utils::{constants, simple_geometry},
};

/// Trait für Polygon-Eigenschaften
pub trait PolygonProperties {
    /// Vorzeichenbehaftete Fläche (Shoelace), positiv gegen den Uhrzeigersinn
    fn signed_area(&self) -> f64;

    /// Absolute Fläche
    fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Flächengewichteter Schwerpunkt.
    ///
    /// Schlägt mit [`MathError::DegeneratePolygon`] fehl, wenn die Fläche
    /// (nahezu) Null ist.
    fn centroid(&self) -> MathResult<Point2D>;

    /// Achsenparallele Bounding Box, `None` für leere Polygone
    fn extent(&self) -> Option<Bounds2D>;

    /// Prüft ob ein Punkt innerhalb des Polygons liegt (Ray-Casting).
    ///
    /// Halb-offene Kantenregel: Punkte auf Kanten werden deterministisch,
    /// aber nicht garantiert als innen klassifiziert.
    fn contains_point(&self, point: Point2D) -> bool;

    /// Kleinster Abstand vom Schwerpunkt zu einem Vertex
    fn min_vertex_distance(&self) -> MathResult<f64>;

    /// Prüft die Orientierung (im Uhrzeigersinn oder gegen)
    fn orientation(&self) -> Orientation;

    /// Prüft ob das Polygon konvex ist
    fn is_convex(&self) -> bool;

    /// Punkt, der sicher im Inneren liegt: der Schwerpunkt, falls er enthalten
    /// ist, sonst die Mitte des breitesten inneren Abschnitts einer
    /// waagrechten Scanline
    fn interior_point(&self) -> MathResult<Point2D>;

    /// Kleinster Abstand eines Punkts zu einer Kante
    fn boundary_distance(&self, point: Point2D) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

impl PolygonProperties for Polygon {
    fn signed_area(&self) -> f64 {
        let vertices = self.vertices();
        if vertices.len() < 3 {
            return 0.0;
        }

        let doubled: f64 = self.edges().map(|(a, b)| a.perp_dot(b)).sum();
        doubled * 0.5
    }

    fn centroid(&self) -> MathResult<Point2D> {
        let area = self.signed_area();
        if area.abs() < constants::AREA_EPSILON {
            return Err(MathError::DegeneratePolygon { area });
        }

        // Relativ zum ersten Vertex rechnen, hält die Summen klein
        let origin = self.vertices()[0];
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (a, b) in self.edges() {
            let a = a - origin;
            let b = b - origin;
            let factor = a.perp_dot(b);
            cx += (a.x + b.x) * factor;
            cy += (a.y + b.y) * factor;
        }

        let factor = 1.0 / (6.0 * area);
        Ok(origin + Point2D::new(cx * factor, cy * factor))
    }

    fn extent(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.vertices().iter().copied())
    }

    fn contains_point(&self, point: Point2D) -> bool {
        let vertices = self.vertices();
        let n = vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = vertices[i];
            let vj = vertices[j];

            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    fn min_vertex_distance(&self) -> MathResult<f64> {
        let centroid = self.centroid()?;
        Ok(self
            .vertices()
            .iter()
            .map(|v| v.distance(centroid))
            .fold(f64::INFINITY, f64::min))
    }

    fn orientation(&self) -> Orientation {
        let area = self.signed_area();
        if area.abs() < constants::AREA_EPSILON {
            Orientation::Collinear
        } else if area > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    fn is_convex(&self) -> bool {
        let vertices = self.vertices();
        let n = vertices.len();
        if n < 3 {
            return false;
        }

        let mut sign = None;

        for i in 0..n {
            let p1 = vertices[i];
            let p2 = vertices[(i + 1) % n];
            let p3 = vertices[(i + 2) % n];

            let cross_product = (p2 - p1).perp_dot(p3 - p2);

            if cross_product.abs() > constants::EPSILON {
                // Nicht kollinear
                let current_sign = cross_product > 0.0;

                match sign {
                    None => sign = Some(current_sign),
                    Some(s) if s != current_sign => return false,
                    _ => {}
                }
            }
        }

        sign.is_some()
    }

    fn interior_point(&self) -> MathResult<Point2D> {
        let centroid = self.centroid()?;
        if self.contains_point(centroid) {
            return Ok(centroid);
        }

        let bounds = self
            .extent()
            .ok_or(MathError::DegeneratePolygon { area: 0.0 })?;

        // Scanline durch den Schwerpunkt, ersatzweise durch die Boxmitte
        for y in [centroid.y, bounds.center().y] {
            let mut crossings: Vec<f64> = self
                .edges()
                .filter(|(a, b)| (a.y > y) != (b.y > y))
                .map(|(a, b)| a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x))
                .collect();
            crossings.sort_by(f64::total_cmp);

            let widest = crossings
                .chunks_exact(2)
                .map(|span| (span[0], span[1]))
                .filter(|(start, end)| end - start > constants::EPSILON)
                .max_by(|a, b| (a.1 - a.0).total_cmp(&(b.1 - b.0)));

            if let Some((start, end)) = widest {
                return Ok(Point2D::new((start + end) * 0.5, y));
            }
        }

        Err(MathError::GeometricFailure {
            operation: "no interior scanline span found".to_string(),
        })
    }

    fn boundary_distance(&self, point: Point2D) -> f64 {
        self.edges()
            .map(|(a, b)| simple_geometry::point_segment_distance(point, a, b))
            .fold(f64::INFINITY, f64::min)
    }
}
