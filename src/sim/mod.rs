pub mod resources;
pub mod systems;

pub use resources::{CityRegeneratedEvent, CityState, SimSettings};

use crate::city::CityConfig;
use crate::math::probability::SeedPlugin;
use bevy::prelude::*;
use systems::*;

/// Treiber: baut beim Start eine Stadt, relaxiert sie einmal pro Tick und
/// ersetzt sie periodisch durch eine neue.
pub struct CityPlugin;

impl Plugin for CityPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<SeedPlugin>() {
            app.add_plugins(SeedPlugin);
        }

        app.init_resource::<CityConfig>()
            .init_resource::<SimSettings>()
            .init_resource::<CityState>()
            .add_event::<CityRegeneratedEvent>()
            .add_systems(Startup, setup_city_system)
            .add_systems(
                Update,
                (
                    relax_city_system,
                    regenerate_city_system,
                    tick_limit_system,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::probability::SeedResource;
    use crate::math::types::Point2D;
    use bevy::app::AppExit;

    fn test_app(settings: SimSettings) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SeedResource::from_seed(17))
            .insert_resource(settings)
            .add_plugins(CityPlugin);
        app
    }

    #[test]
    fn test_startup_constructs_city() {
        let mut app = test_app(SimSettings::default());
        app.update();

        let state = app.world.resource::<CityState>();
        let city = state.city.as_ref().unwrap();
        assert!(city.ward_count() > 0);
        assert_eq!(state.generation, 1);
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_periodic_regeneration() {
        let mut app = test_app(SimSettings {
            regeneration_interval: 5,
            ..Default::default()
        });

        for _ in 0..3 {
            app.update();
        }
        assert_eq!(app.world.resource::<CityState>().generation, 1);

        // Tick 4 is the last tick of the first interval
        app.update();
        let state = app.world.resource::<CityState>();
        assert_eq!(state.tick, 4);
        assert_eq!(state.generation, 2);
        assert!(
            app.world
                .resource::<Events<CityRegeneratedEvent>>()
                .iter_current_update_events()
                .any(|event| event.generation == 2)
        );
    }

    #[test]
    fn test_invalid_initial_boundary_keeps_running() {
        let mut app = test_app(SimSettings {
            regeneration_interval: 0,
            initial_boundary: vec![Point2D::ZERO, Point2D::X],
            ..Default::default()
        });
        app.update();
        app.update();

        let state = app.world.resource::<CityState>();
        assert!(state.city.is_none());
        assert_eq!(state.generation, 0);
        assert_eq!(state.tick, 2);
    }

    #[test]
    fn test_tick_limit_requests_exit() {
        let mut app = test_app(SimSettings {
            max_ticks: Some(2),
            ..Default::default()
        });
        app.update();
        assert!(app.world.resource::<Events<AppExit>>().is_empty());

        app.update();
        assert!(!app.world.resource::<Events<AppExit>>().is_empty());
    }
}
