use bevy::prelude::*;

use crate::heli::controller::HeliState;

/// Thickness of the helipad disc above the roof.
pub const HELIPAD_THICKNESS: f32 = 0.05;

/// The helipad disc whose material shows the current marking.
#[derive(Component, Reflect)]
pub struct Helipad;

/// One of the four corner lights around the helipad.
#[derive(Component, Reflect)]
pub struct ManeuverLight;

/// Painted helipad marking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HelipadMarking {
    /// Plain pad.
    #[default]
    Normal,
    /// Departure in progress.
    Up,
    /// Arrival in progress.
    Down,
}

impl HelipadMarking {
    /// Marking shown while the helicopter is in `state`.
    pub fn for_state(state: HeliState) -> Self {
        match state {
            HeliState::TakingOff | HeliState::BucketDeploy => Self::Up,
            HeliState::Landing | HeliState::BucketRetract => Self::Down,
            _ => Self::Normal,
        }
    }
}

/// Material handles for the pad markings and the shared light lens.
#[derive(Resource)]
pub struct HelipadMaterials {
    /// Plain pad.
    pub normal: Handle<StandardMaterial>,
    /// Departure marking.
    pub up: Handle<StandardMaterial>,
    /// Arrival marking.
    pub down: Handle<StandardMaterial>,
    /// Lens material shared by all maneuver lights.
    pub light: Handle<StandardMaterial>,
}

impl HelipadMaterials {
    /// Handle for `marking`.
    pub fn marking(&self, marking: HelipadMarking) -> &Handle<StandardMaterial> {
        match marking {
            HelipadMarking::Normal => &self.normal,
            HelipadMarking::Up => &self.up,
            HelipadMarking::Down => &self.down,
        }
    }
}
