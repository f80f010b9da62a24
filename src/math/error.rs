// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Unsupported input: expected at least {expected} points, got {actual}")]
    UnsupportedInput { expected: usize, actual: usize },

    #[error("Degenerate polygon (area {area})")]
    DegeneratePolygon { area: f64 },

    #[error("Degenerate site set: at least one site is required")]
    DegenerateSiteSet,

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Geometric calculation failed: {operation}")]
    GeometricFailure { operation: String },
}

pub type MathResult<T> = Result<T, MathError>;
