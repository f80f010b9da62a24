// src/city/config.rs

use super::boundary::BoundaryGeneratorConfig;
use super::policy::SubdivisionPolicy;
use crate::math::error::*;
use crate::math::geometry::voronoi::VoronoiConfig;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Gesamtkonfiguration der Stadterzeugung
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// Stadt → Wards
    pub ward_policy: SubdivisionPolicy,
    /// Ward → Gebäude
    pub building_policy: SubdivisionPolicy,
    pub voronoi: VoronoiConfig,
    pub boundary: BoundaryGeneratorConfig,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            ward_policy: SubdivisionPolicy::wards(),
            building_policy: SubdivisionPolicy::buildings(),
            voronoi: VoronoiConfig::default(),
            boundary: BoundaryGeneratorConfig::default(),
        }
    }
}

impl CityConfig {
    pub fn with_ward_policy(mut self, policy: SubdivisionPolicy) -> Self {
        self.ward_policy = policy;
        self
    }

    pub fn with_building_policy(mut self, policy: SubdivisionPolicy) -> Self {
        self.building_policy = policy;
        self
    }

    pub fn with_voronoi(mut self, voronoi: VoronoiConfig) -> Self {
        self.voronoi = voronoi;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryGeneratorConfig) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        self.ward_policy.validate()?;
        self.building_policy.validate()?;
        self.voronoi.validate()?;
        self.boundary.validate()?;
        Ok(())
    }
}
