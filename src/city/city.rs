// src/city/city.rs

use super::config::CityConfig;
use super::node::{RelaxationStep, SubdivisionNode};
use crate::math::geometry::polygon::Polygon;
use crate::math::geometry::voronoi::{Tessellation, WeightedVoronoi};
use crate::math::{error::*, types::*};
use bevy::log::{debug, info, warn};
use rand::Rng;

/// Ergebnis von [`City::relax_one_step`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CityStep {
    pub wards: RelaxationStep,
    pub buildings: RelaxationStep,
}

/// Eine Stadt: Wurzelknoten mit Wards, die wiederum Gebäude enthalten.
///
/// Die Konstruktion läuft synchron vollständig durch: Wards platzieren,
/// tessellieren, clippen, entfernen, danach jeden Ward mit Gebäuden füllen
/// und relaxieren. Nur Fehler auf Stadtebene brechen die Konstruktion ab.
#[derive(Debug, Clone)]
pub struct City {
    root: SubdivisionNode,
    config: CityConfig,
    voronoi: WeightedVoronoi,
}

impl City {
    pub fn new<R: Rng + ?Sized>(
        boundary: Polygon,
        config: CityConfig,
        rng: &mut R,
    ) -> MathResult<Self> {
        config.validate()?;
        let voronoi = WeightedVoronoi::new(config.voronoi.clone())?;

        let mut root = SubdivisionNode::root(boundary)?;
        root.populate(&config.ward_policy, &voronoi, rng)?;
        let dropped = root.populate_children(&config.building_policy, &voronoi, rng);

        let city = Self {
            root,
            config,
            voronoi,
        };
        info!(
            "City constructed: {} wards, {} buildings ({} wards dropped)",
            city.ward_count(),
            city.building_count(),
            dropped
        );
        Ok(city)
    }

    pub fn from_points<R: Rng + ?Sized>(
        points: Vec<Point2D>,
        config: CityConfig,
        rng: &mut R,
    ) -> MathResult<Self> {
        Self::new(Polygon::new(points)?, config, rng)
    }

    /// Ein Schritt auf Ward-Ebene, danach ein Schritt auf Gebäude-Ebene in
    /// jedem verbliebenen Ward
    pub fn relax_one_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CityStep {
        let wards = match self
            .root
            .relax_step(&self.config.ward_policy, &self.voronoi, rng)
        {
            Ok(step) => step,
            Err(e) => {
                warn!("Ward relaxation step skipped: {}", e);
                RelaxationStep::default()
            }
        };
        let buildings =
            self.root
                .relax_children_step(&self.config.building_policy, &self.voronoi, rng);

        debug!(
            "City step: wards moved {:.3} ({} culled), buildings moved {:.3} ({} culled)",
            wards.displacement, wards.culled, buildings.displacement, buildings.culled
        );
        CityStep { wards, buildings }
    }

    pub fn root(&self) -> &SubdivisionNode {
        &self.root
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Die extern vorgegebene Stadtgrenze
    pub fn boundary(&self) -> Option<&Polygon> {
        self.root.boundary()
    }

    pub fn position(&self) -> Point2D {
        self.root.position()
    }

    pub fn wards(&self) -> &[SubdivisionNode] {
        self.root.children()
    }

    pub fn buildings(&self) -> impl Iterator<Item = &SubdivisionNode> + '_ {
        self.wards().iter().flat_map(|ward| ward.children().iter())
    }

    pub fn ward_count(&self) -> usize {
        self.wards().len()
    }

    pub fn building_count(&self) -> usize {
        self.buildings().count()
    }

    /// Zuletzt berechnete Ward-Tessellierung
    pub fn tessellation(&self) -> Option<&Tessellation> {
        self.root.tessellation()
    }
}
