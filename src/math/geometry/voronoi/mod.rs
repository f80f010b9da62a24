// src/math/geometry/voronoi/mod.rs

pub mod config;
pub mod site;
pub mod tessellation;

pub use self::config::VoronoiConfig;
pub use self::site::{Site, VoronoiCell};
pub use self::tessellation::{Tessellation, TessellationMode, VoronoiExtent, WeightedVoronoi};
