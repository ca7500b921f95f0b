use bevy::prelude::*;

use super::BuildingConfig;
use super::entities::{HELIPAD_THICKNESS, Helipad, HelipadMarking, HelipadMaterials, ManeuverLight};
use crate::heli::HeliRig;
use crate::heli::controller::MissionEvent;
use crate::math;

const WALL_THICKNESS: f32 = 0.2;
const WINDOW_HEIGHT_RATIO: f32 = 0.6;
const LIGHT_COLOR: LinearRgba = LinearRgba::rgb(1.0, 0.85, 0.0);

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the three modules, windows, door, sign, helipad and its lights.
pub fn spawn_building(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<BuildingConfig>,
) {
    let wall = materials.add(StandardMaterial {
        base_color: cfg.wall_color,
        perceptual_roughness: 0.9,
        ..default()
    });
    let glass = materials.add(StandardMaterial {
        base_color: Color::srgb(0.15, 0.25, 0.4),
        emissive: LinearRgba::rgb(0.02, 0.04, 0.08),
        perceptual_roughness: 0.1,
        ..default()
    });
    let door = materials.add(Color::srgb(0.45, 0.1, 0.08));
    let sign = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.05, 0.05),
        emissive: LinearRgba::rgb(0.6, 0.02, 0.02),
        ..default()
    });

    let pad_materials = HelipadMaterials {
        normal: materials.add(Color::srgb(0.25, 0.25, 0.27)),
        up: materials.add(StandardMaterial {
            base_color: Color::srgb(0.1, 0.45, 0.15),
            emissive: LinearRgba::rgb(0.0, 0.4, 0.05),
            ..default()
        }),
        down: materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.35, 0.05),
            emissive: LinearRgba::rgb(0.5, 0.25, 0.0),
            ..default()
        }),
        light: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.9, 0.1),
            emissive: LIGHT_COLOR,
            ..default()
        }),
    };
    let paint = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::rgb(0.3, 0.3, 0.3),
        ..default()
    });

    let building = commands
        .spawn((
            Name::new("Building"),
            Transform::from_translation(cfg.position),
            Visibility::default(),
        ))
        .id();

    let side_offset = cfg.side_width() / 2.0 + cfg.center_width() / 2.0;
    let modules = [
        ("LeftWing", -side_offset, cfg.side_width(), cfg.side_floors, cfg.side_depth(), false),
        ("CentreModule", 0.0, cfg.center_width(), cfg.center_floors(), cfg.center_depth(), true),
        ("RightWing", side_offset, cfg.side_width(), cfg.side_floors, cfg.side_depth(), false),
    ];

    for (name, x, width, floors, depth, has_door) in modules {
        let height = cfg.floor_height * floors as f32;
        let block = commands
            .spawn((
                Name::new(name),
                Mesh3d(meshes.add(Cuboid::new(width, height, depth))),
                MeshMaterial3d(wall.clone()),
                Transform::from_xyz(x, height / 2.0, 0.0),
            ))
            .id();
        commands.entity(building).add_child(block);

        // The door takes the ground floor of the centre module.
        let first_floor = u32::from(has_door);
        let window_mesh = meshes.add(Cuboid::new(
            width / (cfg.windows_per_floor.max(1) * 2) as f32,
            cfg.floor_height * WINDOW_HEIGHT_RATIO,
            WALL_THICKNESS / 2.0,
        ));
        for floor in first_floor..floors {
            for (wx, wy) in window_slots(width, cfg.windows_per_floor, floor, cfg.floor_height) {
                let pane = commands
                    .spawn((
                        Name::new("Window"),
                        Mesh3d(window_mesh.clone()),
                        MeshMaterial3d(glass.clone()),
                        Transform::from_xyz(wx, wy - height / 2.0, depth / 2.0),
                    ))
                    .id();
                commands.entity(block).add_child(pane);
            }
        }
    }

    let front = cfg.center_depth() / 2.0;
    let door_width = cfg.center_width() * 0.2;
    let door_height = cfg.floor_height * 0.8;
    commands.entity(building).with_children(|b| {
        b.spawn((
            Name::new("Door"),
            Mesh3d(meshes.add(Cuboid::new(door_width, door_height, WALL_THICKNESS / 2.0))),
            MeshMaterial3d(door),
            Transform::from_xyz(0.0, door_height / 2.0, front),
        ));
        b.spawn((
            Name::new("Sign"),
            Mesh3d(meshes.add(Cuboid::new(
                cfg.center_width() * 0.3,
                cfg.floor_height * 0.25,
                WALL_THICKNESS / 2.0,
            ))),
            MeshMaterial3d(sign),
            Transform::from_xyz(0.0, cfg.floor_height, front + 0.02),
        ));
    });

    // Helipad disc, "H" marking and corner lights.
    let roof = cfg.roof_height();
    let pad_size = cfg.helipad_size();
    let pad = commands
        .spawn((
            Name::new("Helipad"),
            Helipad,
            Mesh3d(meshes.add(Cylinder::new(pad_size / 2.0, HELIPAD_THICKNESS))),
            MeshMaterial3d(pad_materials.normal.clone()),
            Transform::from_xyz(0.0, roof + HELIPAD_THICKNESS / 2.0, 0.0),
        ))
        .with_children(|pad| {
            let stroke = pad_size * 0.08;
            let bar = pad_size * 0.45;
            for x in [-bar / 3.0, bar / 3.0] {
                pad.spawn((
                    Mesh3d(meshes.add(Cuboid::new(stroke, 0.01, bar))),
                    MeshMaterial3d(paint.clone()),
                    Transform::from_xyz(x, HELIPAD_THICKNESS / 2.0, 0.0),
                ));
            }
            pad.spawn((
                Mesh3d(meshes.add(Cuboid::new(bar * 2.0 / 3.0, 0.01, stroke))),
                MeshMaterial3d(paint),
                Transform::from_xyz(0.0, HELIPAD_THICKNESS / 2.0, 0.0),
            ));
        })
        .id();
    commands.entity(building).add_child(pad);

    let light_mesh = meshes.add(Cylinder::new(0.2, 0.5));
    let half = pad_size / 2.0;
    for (x, z) in [(half, half), (-half, half), (half, -half), (-half, -half)] {
        let light = commands
            .spawn((
                Name::new("ManeuverLight"),
                ManeuverLight,
                Mesh3d(light_mesh.clone()),
                MeshMaterial3d(pad_materials.light.clone()),
                Transform::from_xyz(x, roof + 0.25, z),
            ))
            .id();
        commands.entity(building).add_child(light);
    }

    commands.insert_resource(pad_materials);
    info!(
        "building spawned: {} x {:.1} m, helipad at {}",
        cfg.total_width,
        roof,
        cfg.heliport()
    );
}

/// Hands the helipad position to the helicopter.
pub fn place_heliport(cfg: Res<BuildingConfig>, mut rig: ResMut<HeliRig>) {
    rig.set_heliport_position(cfg.heliport());
}

/// Window centres on a module's front face, relative to the module base.
pub fn window_slots(width: f32, count: u32, floor: u32, floor_height: f32) -> Vec<(f32, f32)> {
    if count == 0 {
        return Vec::new();
    }
    let spacing = width / count as f32;
    let y = floor as f32 * floor_height + floor_height / 2.0;
    (0..count)
        .map(|i| (-width / 2.0 + spacing / 2.0 + i as f32 * spacing, y))
        .collect()
}

// ── Update ──────────────────────────────────────────────────────────

/// Swaps the helipad material when the helicopter changes state.
pub fn swap_helipad_marking(
    mut events: MessageReader<MissionEvent>,
    pad_materials: Option<Res<HelipadMaterials>>,
    mut pad_q: Query<&mut MeshMaterial3d<StandardMaterial>, With<Helipad>>,
) {
    let Some(pad_materials) = pad_materials else {
        return;
    };
    let mut latest = None;
    for event in events.read() {
        if let MissionEvent::StateChanged { to, .. } = event {
            latest = Some(*to);
        }
    }
    let Some(to) = latest else {
        return;
    };
    let Ok(mut material) = pad_q.single_mut() else {
        return;
    };

    let marking = HelipadMarking::for_state(to);
    debug!("helipad marking {marking:?}");
    material.0 = pad_materials.marking(marking).clone();
}

/// Pulses the maneuver light lens while the helicopter is on a vertical leg.
pub fn pulse_maneuver_lights(
    time: Res<Time>,
    cfg: Res<BuildingConfig>,
    rig: Res<HeliRig>,
    pad_materials: Option<Res<HelipadMaterials>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(pad_materials) = pad_materials else {
        return;
    };
    let intensity = if rig.state().is_maneuvering() {
        math::pulse(
            time.elapsed_secs(),
            cfg.light_pulse_hz,
            cfg.light_min_intensity,
            cfg.light_max_intensity,
        )
    } else {
        1.0
    };
    if let Some(light) = materials.get_mut(&pad_materials.light) {
        light.emissive = LIGHT_COLOR * intensity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_evenly_spaced_and_centred() {
        let slots = window_slots(6.0, 2, 0, 3.0);
        assert_eq!(slots.len(), 2);
        assert!((slots[0].0 + 1.5).abs() < 1e-6);
        assert!((slots[1].0 - 1.5).abs() < 1e-6);
        assert!((slots[0].1 - 1.5).abs() < 1e-6);
    }

    #[test]
    fn upper_floor_windows_rise_by_floor_height() {
        let ground = window_slots(8.0, 3, 0, 3.0);
        let third = window_slots(8.0, 3, 2, 3.0);
        assert!((third[0].1 - ground[0].1 - 6.0).abs() < 1e-6);
    }

    #[test]
    fn no_windows_requested() {
        assert!(window_slots(8.0, 0, 1, 3.0).is_empty());
    }
}
