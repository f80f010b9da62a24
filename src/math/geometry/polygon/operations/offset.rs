// src/math/geometry/polygon/operations/offset.rs

use super::super::{Orientation, Polygon, PolygonProperties, open_ring};
use crate::math::{types::*, utils::*};
use bevy::log::debug;

/// Offset eines geschlossenen Rings um eine vorzeichenbehaftete Distanz.
///
/// Positive Distanz vergrößert (nach außen), negative verkleinert.
/// Numerisch instabile Ergebnisse (kollabiert, selbstschneidend,
/// Orientierung gekippt) werden verworfen und der Eingabering unverändert
/// zurückgegeben.
#[derive(Debug, Clone, Copy)]
pub struct PolygonOffsetter {
    miter_limit: f64,
}

impl Default for PolygonOffsetter {
    fn default() -> Self {
        Self { miter_limit: 4.0 }
    }
}

impl PolygonOffsetter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximale Miter-Länge als Vielfaches der Distanz, darüber wird abgeschrägt
    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit.max(1.0);
        self
    }

    pub fn offset(&self, polygon: &Polygon, distance: f64) -> Polygon {
        if comparison::nearly_zero(distance) || polygon.area() < constants::AREA_EPSILON {
            return polygon.clone();
        }

        let clockwise = polygon.orientation() == Orientation::Clockwise;
        let ccw = if clockwise {
            polygon.reversed()
        } else {
            polygon.clone()
        };

        let candidate = if distance < 0.0 && ccw.is_convex() {
            self.inset_convex(&ccw, -distance)
        } else {
            self.miter_offset(&ccw, distance)
        };

        if !self.is_acceptable(&ccw, &candidate, distance) {
            debug!(
                "Offset um {:.3} verworfen ({} -> {} vertices), Fallback auf Originalring",
                distance,
                ccw.len(),
                candidate.len()
            );
            return polygon.clone();
        }

        if clockwise {
            candidate.reversed()
        } else {
            candidate
        }
    }

    /// Exakter Inset eines konvexen Rings: Schnitt der nach innen
    /// verschobenen Kanten-Halbebenen
    fn inset_convex(&self, ccw: &Polygon, inset: f64) -> Polygon {
        let mut vertices = ccw.vertices().to_vec();

        for (a, b) in ccw.edges() {
            let direction = (b - a).normalize_or_zero();
            if direction == Point2D::ZERO {
                continue;
            }
            // Linke Normale zeigt bei CCW nach innen
            let inward = direction.perp();
            let anchor = a + inward * inset;
            // Behalte inward · p >= inward · anchor
            vertices = simple_geometry::clip_to_half_plane(&vertices, -inward, -inward.dot(anchor));
            if vertices.len() < 3 {
                return Polygon::empty();
            }
        }

        Polygon::from_vertices_unchecked(vertices)
    }

    fn miter_offset(&self, ccw: &Polygon, distance: f64) -> Polygon {
        let mut source = ccw.vertices().to_vec();
        source.dedup();
        let source = open_ring(&source);
        let n = source.len();
        if n < 3 {
            return Polygon::empty();
        }

        let mut output = Vec::with_capacity(n * 2);
        for i in 0..n {
            let prev = source[(i + n - 1) % n];
            let current = source[i];
            let next = source[(i + 1) % n];

            // Rechte Normale zeigt bei CCW nach außen
            let n0 = -(current - prev).normalize_or_zero().perp();
            let n1 = -(next - current).normalize_or_zero().perp();

            let a0 = prev + n0 * distance;
            let b0 = current + n0 * distance;
            let a1 = current + n1 * distance;
            let b1 = next + n1 * distance;

            match simple_geometry::line_intersection(a0, b0, a1, b1) {
                Some(miter)
                    if miter.distance(current) <= self.miter_limit * distance.abs() =>
                {
                    output.push(miter)
                }
                Some(_) => {
                    // Abschrägen
                    output.push(b0);
                    output.push(a1);
                }
                // Kollineare Kanten
                None => output.push(b0),
            }
        }

        Polygon::from_vertices_unchecked(output)
    }

    fn is_acceptable(&self, original: &Polygon, candidate: &Polygon, distance: f64) -> bool {
        if candidate.len() < 3 || candidate.orientation() != Orientation::CounterClockwise {
            return false;
        }

        let grows = candidate.area() > original.area();
        if grows != (distance > 0.0) {
            return false;
        }

        is_simple(candidate)
    }
}

/// Keine zwei nicht benachbarten Kanten schneiden sich
fn is_simple(polygon: &Polygon) -> bool {
    let edges: Vec<(Point2D, Point2D)> = polygon.edges().collect();
    let n = edges.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a1, a2) = edges[i];
            let (b1, b2) = edges[j];
            if simple_geometry::segments_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    true
}
