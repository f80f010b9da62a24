//! Bevy `Plugin` für die seed-basierte Zufallsquelle.
//!
//! Initialisiert die `SeedResource` und reagiert auf `SeedChangedEvent`.

use super::{events::SeedChangedEvent, resource::SeedResource};
use bevy::prelude::*;

/// Verwaltet die globale `SeedResource`.
///
/// Eine bereits eingefügte Resource (z.B. mit festem Seed) bleibt erhalten.
pub struct SeedPlugin;

impl Plugin for SeedPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SeedResource>()
            .add_event::<SeedChangedEvent>()
            .add_systems(PreUpdate, seed_changed_event_handler);
    }
}

fn seed_changed_event_handler(
    mut events: EventReader<SeedChangedEvent>,
    mut seed_resource: ResMut<SeedResource>,
) {
    for event in events.read() {
        info!(
            "SeedResource is being updated due to SeedChangedEvent: {}",
            event.new_seed
        );
        seed_resource.reset_with_new_seed(event.new_seed);
    }
}
