use bevy::prelude::*;

use super::{MissionConfig, SceneSettings};
use crate::heli::HeliRig;
use crate::heli::controller::MissionEvent;

/// One-shot commands: P take off, L land, O drop water, R reset.
pub fn handle_commands(keys: Res<ButtonInput<KeyCode>>, mut rig: ResMut<HeliRig>) {
    if keys.just_pressed(KeyCode::KeyP) {
        rig.take_off();
    }
    if keys.just_pressed(KeyCode::KeyL) {
        rig.land();
    }
    if keys.just_pressed(KeyCode::KeyO) {
        rig.put_fire();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        rig.reset();
    }
}

/// Held controls, applied once per simulation tick: W/S speed, A/D heading.
pub fn apply_held_controls(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<MissionConfig>,
    mut rig: ResMut<HeliRig>,
) {
    if keys.pressed(KeyCode::KeyW) {
        rig.accelerate(cfg.accelerate_step);
    }
    if keys.pressed(KeyCode::KeyS) {
        rig.accelerate(-cfg.accelerate_step);
    }
    if keys.pressed(KeyCode::KeyA) {
        rig.turn(cfg.turn_step);
    }
    if keys.pressed(KeyCode::KeyD) {
        rig.turn(-cfg.turn_step);
    }
}

/// Advances the controller by the fixed timestep.
pub fn tick_controller(time: Res<Time>, mut rig: ResMut<HeliRig>) {
    rig.update(time.delta_secs() * 1000.0);
}

/// Drains the controller outbox into [`MissionEvent`] messages.
///
/// A put-out fire also unticks "fires enabled" so the panel shows it.
pub fn publish_events(
    mut rig: ResMut<HeliRig>,
    mut settings: ResMut<SceneSettings>,
    mut events: MessageWriter<MissionEvent>,
) {
    for event in rig.sink_mut().drain() {
        if event == MissionEvent::FireExtinguished && settings.fires_enabled {
            settings.fires_enabled = false;
        }
        events.write(event);
    }
}

/// Pushes panel edits into the controller.
pub fn apply_settings(
    settings: Res<SceneSettings>,
    mut rig: ResMut<HeliRig>,
    mut applied: Local<Option<SceneSettings>>,
) {
    settings.apply_to(applied.as_ref(), &mut rig.0);
    *applied = Some(settings.clone());
}
