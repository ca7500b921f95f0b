use bevy::prelude::*;

use super::VisualsConfig;
use super::entities::{Ground, Sun};
use crate::heli::{HeliConfig, HeliRig};

/// Raise outlines off the ground so the lake surface does not hide them.
const OUTLINE_Y: f32 = 0.3;

// ── Startup ─────────────────────────────────────────────────────────

/// Sky colour, ambient light, sun and ground.
pub fn setup_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<VisualsConfig>,
) {
    commands.insert_resource(ClearColor(cfg.sky_color));
    commands.insert_resource(GlobalAmbientLight {
        brightness: cfg.ambient_brightness,
        ..default()
    });

    commands.spawn((
        Name::new("Sun"),
        Sun,
        DirectionalLight {
            illuminance: cfg.sun_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40.0, 80.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("Ground"),
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(cfg.ground_size, cfg.ground_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: cfg.ground_color,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));
}

// ── Debug ───────────────────────────────────────────────────────────

/// Outlines the lake and fire trigger boxes and marks the heliport.
pub fn draw_trigger_areas(mut gizmos: Gizmos, cfg: Res<HeliConfig>, rig: Res<HeliRig>) {
    let areas = [
        (cfg.lake_bounds, Color::srgb(0.2, 0.6, 1.0)),
        (cfg.fire_bounds, Color::srgb(1.0, 0.35, 0.1)),
    ];
    for (bounds, color) in areas {
        let [a, b, c, d] = bounds.corners(OUTLINE_Y);
        gizmos.linestrip([a, b, c, d, a], color);
    }

    let pad = rig.heliport();
    let marker = Color::srgb(1.0, 1.0, 0.2);
    gizmos.line(pad - Vec3::X, pad + Vec3::X, marker);
    gizmos.line(pad - Vec3::Z, pad + Vec3::Z, marker);
}
