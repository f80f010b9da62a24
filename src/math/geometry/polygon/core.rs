// src/math/geometry/polygon/core.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// Entfernt einen schließenden Duplikatpunkt (erster == letzter)
pub fn open_ring(points: &[Point2D]) -> Vec<Point2D> {
    let mut vertices = points.to_vec();
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// Hängt den ersten Punkt am Ende an, falls noch nicht geschlossen
pub fn close_ring(points: &[Point2D]) -> Vec<Point2D> {
    let mut vertices = points.to_vec();
    if let Some(&first) = vertices.first() {
        if vertices.last() != Some(&first) || vertices.len() == 1 {
            vertices.push(first);
        }
    }
    vertices
}

/// Einfaches Polygon als offener Ring.
///
/// Der schließende Duplikatpunkt wird nie gespeichert; wer einen
/// geschlossenen Ring braucht, holt ihn über [`Polygon::closed_ring`].
/// Ein degeneriertes Polygon (leer oder ohne Fläche) ist ein gültiger Wert,
/// flächenabhängige Operationen lehnen es aber mit
/// [`MathError::DegeneratePolygon`] ab.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point2D>,
}

impl Polygon {
    /// Erstellt ein neues Polygon, mindestens drei verschiedene Vertices
    pub fn new(vertices: Vec<Point2D>) -> MathResult<Self> {
        let polygon = Self::from_vertices_unchecked(vertices);
        if polygon.len() < 3 {
            return Err(MathError::UnsupportedInput {
                expected: 3,
                actual: polygon.len(),
            });
        }
        Ok(polygon)
    }

    /// Erstellt ein Polygon ohne Validierung (für Zwischenergebnisse)
    pub fn from_vertices_unchecked(vertices: Vec<Point2D>) -> Self {
        Self {
            vertices: open_ring(&vertices),
        }
    }

    /// Leeres (degeneriertes) Polygon
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zugriff auf Vertices
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Anzahl der Vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Ist das Polygon leer?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Geschlossener Ring (erster Punkt am Ende wiederholt)
    pub fn closed_ring(&self) -> Vec<Point2D> {
        close_ring(&self.vertices)
    }

    /// Kanten als (Start, Ende), inklusive der schließenden Kante
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Erstellt eine Kopie mit umgekehrten Vertices
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Konvertierung zu geo (geschlossener Ring, ohne Löcher)
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: Vec<geo::Coord<f64>> = self
            .closed_ring()
            .into_iter()
            .map(|p| geo::Coord { x: p.x, y: p.y })
            .collect();
        geo::Polygon::new(geo::LineString::new(exterior), vec![])
    }

    /// Konvertierung von geo; Löcher werden ignoriert
    pub fn from_geo(polygon: &geo::Polygon<f64>) -> Self {
        let vertices = polygon
            .exterior()
            .coords()
            .map(|c| Point2D::new(c.x, c.y))
            .collect();
        Self::from_vertices_unchecked(vertices)
    }
}

/// Display-Implementierung für Debugging
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} vertices)", self.vertices.len())
    }
}

/// Konvertierung von Vec<Point2D>
impl TryFrom<Vec<Point2D>> for Polygon {
    type Error = MathError;

    fn try_from(vertices: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

/// Konvertierung zu Vec<Point2D>
impl From<Polygon> for Vec<Point2D> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
