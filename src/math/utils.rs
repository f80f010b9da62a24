// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f64 = 1e-9;
    /// Flächen unterhalb gelten als degeneriert
    pub const AREA_EPSILON: f64 = 1e-9;
    pub const TAU: f64 = std::f64::consts::TAU;
}

/// Vergleich mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f64) -> bool {
        a.abs() < EPSILON
    }
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use crate::math::types::Point2D;

    /// Kreuzprodukt (z-Komponente) von (b - a) x (c - a)
    pub fn cross(a: Point2D, b: Point2D, c: Point2D) -> f64 {
        (b - a).perp_dot(c - a)
    }

    /// Schnittpunkt zweier Geraden (p1,p2) und (p3,p4), None wenn parallel
    pub fn line_intersection(
        p1: Point2D,
        p2: Point2D,
        p3: Point2D,
        p4: Point2D,
    ) -> Option<Point2D> {
        let d1 = p2 - p1;
        let d2 = p4 - p3;
        let denom = d1.perp_dot(d2);
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = (p3 - p1).perp_dot(d2) / denom;
        Some(p1 + d1 * t)
    }

    /// Schneidet einen (konvexen) Ring mit der Halbebene `normal · p <= offset`
    pub fn clip_to_half_plane(vertices: &[Point2D], normal: Point2D, offset: f64) -> Vec<Point2D> {
        let mut output = Vec::with_capacity(vertices.len() + 1);
        let Some(&last) = vertices.last() else {
            return output;
        };

        let side = |p: Point2D| normal.dot(p) - offset;
        let mut s = last;
        for &e in vertices {
            let (ds, de) = (side(s), side(e));
            if de <= 0.0 {
                if ds > 0.0 {
                    output.push(s + (e - s) * (ds / (ds - de)));
                }
                output.push(e);
            } else if ds <= 0.0 {
                output.push(s + (e - s) * (ds / (ds - de)));
            }
            s = e;
        }

        output.dedup();
        output
    }

    /// Abstand eines Punkts zur Strecke (a,b)
    pub fn point_segment_distance(point: Point2D, a: Point2D, b: Point2D) -> f64 {
        let ab = b - a;
        let length_squared = ab.length_squared();
        if length_squared == 0.0 {
            return point.distance(a);
        }
        let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
        point.distance(a + ab * t)
    }

    /// Prüft ob sich die Strecken (a1,a2) und (b1,b2) echt schneiden
    pub fn segments_intersect(a1: Point2D, a2: Point2D, b1: Point2D, b2: Point2D) -> bool {
        let d1 = cross(b1, b2, a1);
        let d2 = cross(b1, b2, a2);
        let d3 = cross(a1, a2, b1);
        let d4 = cross(a1, a2, b2);
        ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    }
}
