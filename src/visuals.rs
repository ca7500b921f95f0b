//! Scene backdrop: sky colour, sun, ambient light and the ground plane.
//!
//! In the debug state the lake and fire trigger boxes are outlined with
//! gizmos so area-flag changes can be checked by eye.

mod entities;
mod systems;

pub use entities::{Ground, Sun};

use bevy::prelude::*;

use crate::GameState;

/// Lighting and ground settings.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct VisualsConfig {
    /// Background colour.
    pub sky_color: Color,
    /// Sun illuminance in lux.
    pub sun_illuminance: f32,
    /// Global ambient brightness.
    pub ambient_brightness: f32,
    /// Ground plane side length.
    pub ground_size: f32,
    /// Grass colour.
    pub ground_color: Color,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            sky_color: Color::srgb(0.52, 0.72, 0.9),
            sun_illuminance: 12_000.0,
            ambient_brightness: 350.0,
            ground_size: 400.0,
            ground_color: Color::srgb(0.3, 0.5, 0.22),
        }
    }
}

/// Backdrop plugin with debug trigger outlines.
pub struct VisualsPlugin(pub VisualsConfig);

impl Plugin for VisualsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<VisualsConfig>()
            .register_type::<Sun>()
            .register_type::<Ground>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::setup_visuals)
            .add_systems(
                Update,
                systems::draw_trigger_areas.run_if(in_state(GameState::Debugging)),
            );
    }
}
