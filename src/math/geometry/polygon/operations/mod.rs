// src/math/geometry/polygon/operations/mod.rs
pub mod clipping;
pub mod convex_hull;
pub mod offset;
