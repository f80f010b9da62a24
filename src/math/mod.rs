pub mod error;
pub mod geometry;
pub mod probability;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{MathError, MathResult},
        geometry::{
            ClippingAlgorithm, ConvexHullAlgorithm, ConvexHullComputer, Orientation, Polygon,
            PolygonClipper, PolygonOffsetter, PolygonProperties, Site, Tessellation,
            TessellationMode, VoronoiCell, VoronoiConfig, VoronoiExtent, WeightedVoronoi,
        },
        probability::{SeedChangedEvent, SeedPlugin, SeedResource},
        types::{Bounds2D, Point2D},
    };
}
