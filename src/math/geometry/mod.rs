// src/math/geometry/mod.rs

pub mod polygon;
pub mod voronoi;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen,
// falls man nicht das gesamte `math::prelude` importieren möchte.
pub use self::polygon::{
    ClippingAlgorithm, ConvexHullAlgorithm, ConvexHullComputer, Orientation, Polygon,
    PolygonClipper, PolygonOffsetter, PolygonProperties,
};
pub use self::voronoi::{
    Site, Tessellation, TessellationMode, VoronoiCell, VoronoiConfig, VoronoiExtent,
    WeightedVoronoi,
};
