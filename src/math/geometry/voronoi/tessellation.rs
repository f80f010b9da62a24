// src/math/geometry/voronoi/tessellation.rs

use super::config::VoronoiConfig;
use super::site::{Site, VoronoiCell};
use crate::math::geometry::polygon::{ClippingAlgorithm, Polygon, PolygonClipper, PolygonProperties};
use crate::math::{error::*, types::*, utils::*};
use bevy::log::trace;
use rand::Rng;
use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Triangulation};
use std::collections::HashMap;

/// Ungewichtet (Euklidisch) oder gewichtet (Power-Diagramm)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TessellationMode {
    Unweighted,
    Weighted,
}

/// Begrenzung der Tessellierung
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiExtent {
    Bounds(Bounds2D),
    Polygon(Polygon),
}

impl VoronoiExtent {
    pub fn bounds(&self) -> Option<Bounds2D> {
        match self {
            VoronoiExtent::Bounds(bounds) => Some(*bounds),
            VoronoiExtent::Polygon(polygon) => polygon.extent(),
        }
    }
}

/// Ergebnis einer Tessellierung, eine Zelle pro Site in Eingabereihenfolge
#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation {
    pub mode: TessellationMode,
    pub bounds: Bounds2D,
    cells: Vec<VoronoiCell>,
}

impl Tessellation {
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    pub fn cell(&self, site_index: usize) -> Option<&VoronoiCell> {
        self.cells.get(site_index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(|cell| cell.polygon.area()).sum()
    }

    pub fn into_cells(self) -> Vec<VoronoiCell> {
        self.cells
    }
}

/// Kandidaten, gegen deren Bisektoren eine Zelle geschnitten wird.
/// `None` markiert ein Duplikat eines früheren Sites.
type NeighborCandidates = Vec<Option<Vec<usize>>>;

/// Gewichtete Voronoi-Tessellierung.
///
/// Jede Zelle entsteht als Schnitt der Extent-Box mit den Halbebenen
/// `|p - p_i|² - w_i <= |p - p_j|² - w_j`. Im ungewichteten Modus genügen die
/// Delaunay-Nachbarn (spade), im gewichteten Modus wird gegen alle Sites
/// geschnitten, da die Nachbarschaft des Power-Diagramms davon abweicht.
#[derive(Debug, Clone)]
pub struct WeightedVoronoi {
    config: VoronoiConfig,
    clipper: PolygonClipper,
}

impl WeightedVoronoi {
    pub fn new(config: VoronoiConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clipper: PolygonClipper::new(ClippingAlgorithm::Overlay),
        })
    }

    pub fn config(&self) -> &VoronoiConfig {
        &self.config
    }

    /// Tesselliert `sites` innerhalb von `extent`.
    ///
    /// Fehler nur bei leerer Site-Menge oder unbrauchbarem Extent;
    /// koinzidente Sites liefern degenerierte (leere) Zellen.
    pub fn tessellate<R: Rng + ?Sized>(
        &self,
        sites: &[Site],
        extent: &VoronoiExtent,
        mode: TessellationMode,
        rng: &mut R,
    ) -> MathResult<Tessellation> {
        if sites.is_empty() {
            return Err(MathError::DegenerateSiteSet);
        }

        let bounds = extent
            .bounds()
            .filter(|bounds| bounds.area() > constants::AREA_EPSILON)
            .ok_or(MathError::DegeneratePolygon { area: 0.0 })?;

        let weights = self.effective_weights(sites, mode, rng);
        let candidates = match mode {
            TessellationMode::Unweighted => self.delaunay_neighbors(sites)?,
            TessellationMode::Weighted => self.all_other_sites(sites),
        };

        let mut cells = Vec::with_capacity(sites.len());
        for (i, site) in sites.iter().enumerate() {
            let polygon = match &candidates[i] {
                Some(neighbors) => {
                    let cell = self.power_cell(sites, &weights, i, neighbors, bounds);
                    self.apply_extent(cell, extent)
                }
                None => Polygon::empty(),
            };

            cells.push(VoronoiCell {
                site_index: i,
                site: *site,
                effective_weight: weights[i],
                polygon,
            });
        }

        trace!(
            "Tessellation ({:?}): {} sites, {} degenerate cells",
            mode,
            cells.len(),
            cells.iter().filter(|cell| cell.is_degenerate()).count()
        );

        Ok(Tessellation {
            mode,
            bounds,
            cells,
        })
    }

    /// `weight * K + 1 / (x + jitter)`, Jitter pro Site und Aufruf neu
    fn effective_weights<R: Rng + ?Sized>(
        &self,
        sites: &[Site],
        mode: TessellationMode,
        rng: &mut R,
    ) -> Vec<f64> {
        match mode {
            TessellationMode::Unweighted => vec![0.0; sites.len()],
            TessellationMode::Weighted => sites
                .iter()
                .map(|site| {
                    let jitter = rng.random_range(self.config.jitter_min..self.config.jitter_max);
                    let denominator = site.position.x + jitter;
                    let tie_breaker = if comparison::nearly_zero(denominator) {
                        0.0
                    } else {
                        1.0 / denominator
                    };
                    site.weight * self.config.weight_scale + tie_breaker
                })
                .collect(),
        }
    }

    fn delaunay_neighbors(&self, sites: &[Site]) -> MathResult<NeighborCandidates> {
        let mut triangulation = DelaunayTriangulation::<SpadePoint>::new();
        let mut owners: HashMap<FixedVertexHandle, usize> = HashMap::new();
        let mut handles: Vec<Option<FixedVertexHandle>> = Vec::with_capacity(sites.len());

        for (i, site) in sites.iter().enumerate() {
            let handle = triangulation
                .insert(SpadePoint::new(site.position.x, site.position.y))
                .map_err(|e| MathError::GeometricFailure {
                    operation: format!("Delaunay insertion of site {i} failed: {e:?}"),
                })?;

            // spade liefert für ein Duplikat den bestehenden Vertex zurück
            if owners.contains_key(&handle) {
                handles.push(None);
            } else {
                owners.insert(handle, i);
                handles.push(Some(handle));
            }
        }

        Ok(handles
            .into_iter()
            .map(|handle| {
                handle.map(|handle| {
                    triangulation
                        .vertex(handle)
                        .out_edges()
                        .filter_map(|edge| owners.get(&edge.to().fix()).copied())
                        .collect()
                })
            })
            .collect())
    }

    fn all_other_sites(&self, sites: &[Site]) -> NeighborCandidates {
        (0..sites.len())
            .map(|i| {
                let duplicate = sites[..i]
                    .iter()
                    .any(|earlier| earlier.position == sites[i].position);
                if duplicate {
                    None
                } else {
                    Some((0..sites.len()).filter(|&j| j != i).collect())
                }
            })
            .collect()
    }

    fn power_cell(
        &self,
        sites: &[Site],
        weights: &[f64],
        i: usize,
        neighbors: &[usize],
        bounds: Bounds2D,
    ) -> Polygon {
        let pi = sites[i].position;
        let mut vertices = bounds.corners().to_vec();

        for &j in neighbors {
            let pj = sites[j].position;
            if pi.distance_squared(pj) < constants::EPSILON {
                // Koinzident: die Zelle gehört dem früheren Site
                if j < i {
                    return Polygon::empty();
                }
                continue;
            }

            let normal = (pj - pi) * 2.0;
            let offset = pj.length_squared() - pi.length_squared() + weights[i] - weights[j];
            vertices = simple_geometry::clip_to_half_plane(&vertices, normal, offset);
            if vertices.len() < 3 {
                return Polygon::empty();
            }
        }

        Polygon::from_vertices_unchecked(vertices)
    }

    fn apply_extent(&self, cell: Polygon, extent: &VoronoiExtent) -> Polygon {
        match extent {
            VoronoiExtent::Bounds(_) => cell,
            VoronoiExtent::Polygon(boundary) => self
                .clipper
                .intersect(&cell, boundary)
                .into_iter()
                .next()
                .unwrap_or_default(),
        }
    }
}
