#![warn(missing_docs)]
//! Firefighting helicopter scene.
//!
//! A helicopter takes off from a fire-station helipad, scoops water from a
//! lake with a bucket on a rope and drops it on a forest fire. The flight and
//! water-drop sequencing lives in [`heli::controller`] as plain Rust; the
//! other modules are Bevy plugins that draw the scene around it.

pub mod building;
pub mod camera;
pub mod fire;
pub mod forest;
pub mod heli;
pub mod lake;
pub mod math;
pub mod mission;
pub mod people;
pub mod ui;
pub mod visuals;

use bevy::app::AppExit;
use bevy::prelude::*;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Keyboard flies the helicopter.
    #[default]
    Running,
    /// Inspector and trigger outlines shown, flight keys ignored (Tab to toggle).
    Debugging,
}

/// Every scene plugin with its configuration.
#[derive(Default)]
pub struct ScenePlugin {
    /// Helicopter constants.
    pub heli: heli::HeliConfig,
    /// Tick rate and control steps.
    pub mission: mission::MissionConfig,
    /// Fire station.
    pub building: building::BuildingConfig,
    /// Water plane.
    pub lake: lake::LakeConfig,
    /// Trees.
    pub forest: forest::ForestConfig,
    /// Flames.
    pub fire: fire::FireConfig,
    /// Bystanders.
    pub people: people::PeopleConfig,
    /// Orbit camera.
    pub camera: camera::CameraConfig,
    /// Sky, sun and ground.
    pub visuals: visuals::VisualsConfig,
}

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameState>()
            .init_state::<GameState>()
            .add_plugins((
                heli::HeliPlugin(self.heli.clone()),
                mission::MissionPlugin(self.mission.clone()),
                building::BuildingPlugin(self.building.clone()),
                lake::LakePlugin(self.lake.clone()),
                forest::ForestPlugin(self.forest.clone()),
                fire::FirePlugin(self.fire.clone()),
                people::PeoplePlugin(self.people.clone()),
                camera::CameraPlugin(self.camera.clone()),
                visuals::VisualsPlugin(self.visuals.clone()),
                ui::UiPlugin,
            ))
            .add_systems(Update, (exit_on_esc, toggle_inspector));
    }
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        };
        info!("entering {new_state:?}");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
