use crate::city::City;
use crate::math::types::Point2D;
use bevy::prelude::*;

/// Steuerung des Treibers
#[derive(Resource, Debug, Clone)]
pub struct SimSettings {
    /// Neue Stadt, wenn `tick % regeneration_interval == regeneration_interval - 1`
    /// (0 = nie)
    pub regeneration_interval: u64,
    /// Beendet die App nach so vielen Ticks
    pub max_ticks: Option<u64>,
    /// Grenze der ersten Stadt
    pub initial_boundary: Vec<Point2D>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            regeneration_interval: 61,
            max_ticks: None,
            initial_boundary: vec![
                Point2D::new(5.0, 5.0),
                Point2D::new(855.0, 5.0),
                Point2D::new(855.0, 475.0),
                Point2D::new(5.0, 475.0),
            ],
        }
    }
}

impl SimSettings {
    pub fn regenerates_at(&self, tick: u64) -> bool {
        self.regeneration_interval > 0
            && tick % self.regeneration_interval == self.regeneration_interval - 1
    }
}

/// Die aktuelle Stadt. `None`, solange keine Konstruktion gelungen ist.
#[derive(Resource, Debug, Default)]
pub struct CityState {
    pub city: Option<City>,
    pub tick: u64,
    /// Zählt erfolgreiche Konstruktionen
    pub generation: u64,
}

#[derive(Event, Debug, Clone)]
pub struct CityRegeneratedEvent {
    pub generation: u64,
    pub ward_count: usize,
    pub building_count: usize,
}

impl CityRegeneratedEvent {
    pub fn for_city(generation: u64, city: &City) -> Self {
        Self {
            generation,
            ward_count: city.ward_count(),
            building_count: city.building_count(),
        }
    }
}
