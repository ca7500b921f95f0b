use bevy::prelude::*;

/// The directional light.
#[derive(Component, Reflect)]
pub struct Sun;

/// The grass plane under the scene.
#[derive(Component, Reflect)]
pub struct Ground;
