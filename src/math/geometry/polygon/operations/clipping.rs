// src/math/geometry/polygon/operations/clipping.rs

use super::super::{Orientation, Polygon, PolygonProperties};
use crate::math::{types::*, utils::*};
use geo::BooleanOps;

/// Verschiedene Clipping-Algorithmen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ClippingAlgorithm {
    /// Sutherland-Hodgman, exakt nur für konvexe Clipper
    SutherlandHodgman,
    /// Allgemeiner Schnitt zweier einfacher Polygone (geo BooleanOps)
    #[default]
    Overlay,
}

impl ClippingAlgorithm {
    /// Ob der Clipper vom Aufrufer vorher konvex gemacht werden muss
    pub fn requires_convex_clip(&self) -> bool {
        matches!(self, ClippingAlgorithm::SutherlandHodgman)
    }
}

/// Clipping-Engine für Polygone.
///
/// Ein leerer Schnitt ist kein Fehler: [`PolygonClipper::intersect`] liefert
/// dann einen leeren Vec, der Aufrufer entscheidet über den Fallback.
#[derive(Debug, Clone, Copy)]
pub struct PolygonClipper {
    algorithm: ClippingAlgorithm,
    min_area: f64,
}

impl PolygonClipper {
    /// Erstellt einen neuen Clipper
    pub fn new(algorithm: ClippingAlgorithm) -> Self {
        Self {
            algorithm,
            min_area: constants::AREA_EPSILON,
        }
    }

    /// Teile mit kleinerer Fläche werden verworfen
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn algorithm(&self) -> ClippingAlgorithm {
        self.algorithm
    }

    /// Schneidet `subject` mit `clip`.
    ///
    /// Kann leer sein oder mehrere disjunkte Teile enthalten.
    pub fn intersect(&self, subject: &Polygon, clip: &Polygon) -> Vec<Polygon> {
        if subject.area() < self.min_area || clip.area() < self.min_area {
            return Vec::new();
        }

        let pieces = match self.algorithm {
            ClippingAlgorithm::SutherlandHodgman => self.sutherland_hodgman_clip(subject, clip),
            ClippingAlgorithm::Overlay => self.overlay_clip(subject, clip),
        };

        pieces
            .into_iter()
            .filter(|piece| piece.len() >= 3 && piece.area() >= self.min_area)
            .collect()
    }

    // === Sutherland-Hodgman Algorithmus ===

    fn sutherland_hodgman_clip(&self, subject: &Polygon, clipper: &Polygon) -> Vec<Polygon> {
        // Innen = links der Kante, daher Clipper gegen den Uhrzeigersinn
        let clipper = match clipper.orientation() {
            Orientation::Clockwise => clipper.reversed(),
            _ => clipper.clone(),
        };

        let mut output_vertices = subject.vertices().to_vec();

        // Für jede Kante des Clipping-Polygons
        for (clip_vertex1, clip_vertex2) in clipper.edges() {
            if output_vertices.is_empty() {
                break;
            }

            let input_vertices = std::mem::take(&mut output_vertices);
            let mut s = input_vertices[input_vertices.len() - 1];

            for &e in &input_vertices {
                if self.is_inside(e, clip_vertex1, clip_vertex2) {
                    if !self.is_inside(s, clip_vertex1, clip_vertex2) {
                        // Entering
                        if let Some(intersection) =
                            simple_geometry::line_intersection(s, e, clip_vertex1, clip_vertex2)
                        {
                            output_vertices.push(intersection);
                        }
                    }
                    output_vertices.push(e);
                } else if self.is_inside(s, clip_vertex1, clip_vertex2) {
                    // Leaving
                    if let Some(intersection) =
                        simple_geometry::line_intersection(s, e, clip_vertex1, clip_vertex2)
                    {
                        output_vertices.push(intersection);
                    }
                }
                s = e;
            }
        }

        output_vertices.dedup();
        if output_vertices.len() >= 3 {
            vec![Polygon::from_vertices_unchecked(output_vertices)]
        } else {
            vec![]
        }
    }

    fn is_inside(&self, point: Point2D, edge_start: Point2D, edge_end: Point2D) -> bool {
        simple_geometry::cross(edge_start, edge_end, point) >= 0.0
    }

    // === Allgemeiner Schnitt über geo ===

    fn overlay_clip(&self, subject: &Polygon, clipper: &Polygon) -> Vec<Polygon> {
        let result = subject.to_geo().intersection(&clipper.to_geo());
        result.0.iter().map(Polygon::from_geo).collect()
    }
}
