pub mod boundary;
pub mod city;
pub mod config;
pub mod node;
pub mod policy;

pub use boundary::BoundaryGeneratorConfig;
pub use city::{City, CityStep};
pub use config::CityConfig;
pub use node::{
    ChildOutcome, CullReason, Depth, RelaxationStep, RelaxationSummary, SubdivisionNode,
};
pub use policy::{RelaxationOptions, SeedPlacement, SeedStrategy, SubdivisionPolicy, Weighting};
