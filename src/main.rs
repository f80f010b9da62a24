// ./src/main.rs
use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::time::Duration;

use voronoi_city::math::probability::{SeedPlugin, SeedResource};
use voronoi_city::sim::{CityPlugin, CityRegeneratedEvent, SimSettings};

fn main() {
    // Optionaler Seed-Text als erstes Argument, sonst zufällig
    let seed = std::env::args()
        .nth(1)
        .map(SeedResource::from_text)
        .unwrap_or_default();

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f64(1.0 / 60.0),
        )))
        .add_plugins(LogPlugin::default())
        .insert_resource(seed)
        .insert_resource(SimSettings {
            max_ticks: Some(600),
            ..default()
        })
        .add_plugins(SeedPlugin)
        .add_plugins(CityPlugin)
        .add_systems(Update, report_city_system)
        .run();
}

fn report_city_system(mut regenerated: EventReader<CityRegeneratedEvent>) {
    for event in regenerated.read() {
        info!(
            "City #{}: {} wards, {} buildings",
            event.generation, event.ward_count, event.building_count
        );
    }
}
