pub mod city;
pub mod math;
pub mod sim;

pub use city::{City, CityConfig, SubdivisionNode, SubdivisionPolicy};
pub use sim::CityPlugin;
