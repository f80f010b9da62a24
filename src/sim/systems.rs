use super::resources::{CityRegeneratedEvent, CityState, SimSettings};
use crate::city::{City, CityConfig};
use crate::math::probability::SeedResource;
use bevy::app::AppExit;
use bevy::prelude::*;

/// Baut die erste Stadt aus `SimSettings::initial_boundary`
pub fn setup_city_system(
    config: Res<CityConfig>,
    settings: Res<SimSettings>,
    mut seed: ResMut<SeedResource>,
    mut state: ResMut<CityState>,
    mut regenerated: EventWriter<CityRegeneratedEvent>,
) {
    info!("Constructing initial city (seed {})", seed.seed);
    match City::from_points(
        settings.initial_boundary.clone(),
        config.clone(),
        seed.rng_mut(),
    ) {
        Ok(city) => {
            state.generation += 1;
            regenerated.send(CityRegeneratedEvent::for_city(state.generation, &city));
            state.city = Some(city);
        }
        Err(e) => error!("Initial city could not be constructed: {}", e),
    }
}

/// Ein Relaxationsschritt pro Tick
pub fn relax_city_system(mut seed: ResMut<SeedResource>, mut state: ResMut<CityState>) {
    let state = &mut *state;
    if let Some(city) = state.city.as_mut() {
        city.relax_one_step(seed.rng_mut());
    }
    state.tick += 1;
}

/// Ersetzt die Stadt periodisch durch eine mit zufälliger Grenze.
/// Scheitert die Konstruktion, bleibt die alte Stadt bestehen.
pub fn regenerate_city_system(
    config: Res<CityConfig>,
    settings: Res<SimSettings>,
    mut seed: ResMut<SeedResource>,
    mut state: ResMut<CityState>,
    mut regenerated: EventWriter<CityRegeneratedEvent>,
) {
    if !settings.regenerates_at(state.tick) {
        return;
    }

    let rng = seed.rng_mut();
    let result = config
        .boundary
        .generate(rng)
        .and_then(|boundary| City::new(boundary, config.clone(), rng));

    match result {
        Ok(city) => {
            state.generation += 1;
            info!(
                "Tick {}: city regenerated (generation {})",
                state.tick, state.generation
            );
            regenerated.send(CityRegeneratedEvent::for_city(state.generation, &city));
            state.city = Some(city);
        }
        Err(e) => warn!(
            "Tick {}: regeneration failed, keeping current city: {}",
            state.tick, e
        ),
    }
}

pub fn tick_limit_system(
    settings: Res<SimSettings>,
    state: Res<CityState>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(max_ticks) = settings.max_ticks {
        if state.tick >= max_ticks {
            info!("Tick limit {} reached, exiting", max_ticks);
            exit.send(AppExit);
        }
    }
}
