use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::MouseScrollUnit;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use super::entities::{FollowCamera, OrbitInput};
use super::{CameraConfig, Orbit};
use crate::heli::HeliRig;
use crate::math;
use crate::mission::SceneSettings;

/// Pixels per line for pixel-based scroll devices.
const PIXELS_PER_LINE: f32 = 40.0;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the Camera3d with HDR, bloom and the starting FOV.
pub fn spawn_camera(
    mut commands: Commands,
    cfg: Res<CameraConfig>,
    settings: Res<SceneSettings>,
    rig: Res<HeliRig>,
) {
    let orbit = Orbit::from_config(&cfg);
    let focus = rig.position();
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov.radians(),
            ..default()
        }),
        Transform::from_translation(focus + orbit.offset()).looking_at(focus, Vec3::Y),
        FollowCamera { orbit, focus },
    ));
}

// ── Update ──────────────────────────────────────────────────────────

/// Right-drag orbits, the wheel zooms.
pub fn orbit_input(mut input: OrbitInput, mut camera_q: Query<&mut FollowCamera>) {
    let Ok(mut camera) = camera_q.single_mut() else {
        return;
    };
    // The control panel keeps the pointer while it is hovered.
    if input.egui.ctx_mut().is_ok_and(|ctx| ctx.is_pointer_over_area()) {
        input.motion.clear();
        input.scroll.clear();
        return;
    }

    let dragging = input.buttons.pressed(MouseButton::Right);
    let mut delta = Vec2::ZERO;
    for ev in input.motion.read() {
        if dragging {
            delta += ev.delta;
        }
    }
    if delta != Vec2::ZERO {
        camera.orbit.drag(delta, &input.cfg);
    }

    for ev in input.scroll.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        };
        camera.orbit.zoom(lines, &input.cfg);
    }
}

/// Eases the focus toward the helicopter and places the camera on its orbit.
pub fn follow_helicopter(
    rig: Res<HeliRig>,
    cfg: Res<CameraConfig>,
    mut camera_q: Query<(&mut FollowCamera, &mut Transform)>,
) {
    let Ok((mut camera, mut transform)) = camera_q.single_mut() else {
        return;
    };
    let target = rig.position();
    let focus = Vec3::new(
        math::damped_approach(camera.focus.x, target.x, cfg.follow_lerp),
        math::damped_approach(camera.focus.y, target.y, cfg.follow_lerp),
        math::damped_approach(camera.focus.z, target.z, cfg.follow_lerp),
    );
    camera.focus = focus;
    *transform = Transform::from_translation(focus + camera.orbit.offset()).looking_at(focus, Vec3::Y);
}

/// Applies the panel's FOV preset.
pub fn apply_fov(settings: Res<SceneSettings>, mut camera_q: Query<&mut Projection, With<FollowCamera>>) {
    let Ok(mut projection) = camera_q.single_mut() else {
        return;
    };
    if let Projection::Perspective(perspective) = &mut *projection {
        let fov = settings.fov.radians();
        if perspective.fov != fov {
            debug!("camera fov {fov}");
            perspective.fov = fov;
        }
    }
}
