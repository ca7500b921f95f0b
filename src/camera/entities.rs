use bevy::ecs::system::SystemParam;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::{CameraConfig, Orbit};

/// The scene camera and its orbit around the helicopter.
#[derive(Component, Reflect)]
pub struct FollowCamera {
    /// Current orbit.
    pub orbit: Orbit,
    /// Smoothed point the camera looks at.
    pub focus: Vec3,
}

/// Mouse input read by the orbit system.
#[derive(SystemParam)]
pub struct OrbitInput<'w, 's> {
    pub buttons: Res<'w, ButtonInput<MouseButton>>,
    pub motion: MessageReader<'w, 's, MouseMotion>,
    pub scroll: MessageReader<'w, 's, MouseWheel>,
    pub cfg: Res<'w, CameraConfig>,
    pub egui: EguiContexts<'w, 's>,
}
