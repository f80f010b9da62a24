// src/math/geometry/polygon/mod.rs

pub mod core; // Enthält die Polygon-Struktur selbst
pub mod operations; // Hülle, Clipping, Offset
pub mod properties; // Enthält den PolygonProperties-Trait

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Polygon-Elemente
pub use self::core::{Polygon, close_ring, open_ring};
pub use self::properties::{Orientation, PolygonProperties};

pub use self::operations::{
    clipping::{ClippingAlgorithm, PolygonClipper},
    convex_hull::{ConvexHullAlgorithm, ConvexHullComputer},
    offset::PolygonOffsetter,
};
