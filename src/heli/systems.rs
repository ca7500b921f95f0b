use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::HeliRig;
use super::bucket::{BUCKET_HEIGHT, BUCKET_RADIUS, BucketBottom, BucketPose};
use super::controller::HeliState;
use super::entities::{Helicopter, RigPart};

/// Height of the airframe origin above the skids.
const SKID_HEIGHT: f32 = 0.6;
/// Rope anchor below the fuselage, relative to the rig root.
const ROPE_ANCHOR_Y: f32 = 0.3;
const FLOOR_THICKNESS: f32 = 0.05;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the helicopter mesh hierarchy at the controller's position.
pub fn spawn_rig(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    rig: Res<HeliRig>,
) {
    let hull = materials.add(StandardMaterial {
        base_color: Color::srgb(0.78, 0.12, 0.08),
        perceptual_roughness: 0.45,
        ..default()
    });
    let trim = materials.add(StandardMaterial {
        base_color: Color::srgb(0.12, 0.12, 0.14),
        perceptual_roughness: 0.8,
        ..default()
    });
    let glass = materials.add(StandardMaterial {
        base_color: Color::srgba(0.35, 0.55, 0.75, 0.55),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.1,
        ..default()
    });
    let bucket_shell = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.45, 0.05),
        cull_mode: None,
        ..default()
    });
    let rope = materials.add(Color::srgb(0.35, 0.25, 0.15));
    let water = materials.add(StandardMaterial {
        base_color: Color::srgba(0.2, 0.45, 0.9, 0.75),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let root = commands
        .spawn((
            Name::new("Helicopter"),
            Helicopter,
            Transform::from_translation(rig.position()),
            Visibility::default(),
        ))
        .id();

    // Airframe: pitches with the controller's tilt.
    let airframe = commands
        .spawn((
            Name::new("Airframe"),
            RigPart::Airframe,
            Transform::from_xyz(0.0, SKID_HEIGHT, 0.0),
            Visibility::default(),
        ))
        .with_children(|frame| {
            frame.spawn((
                Name::new("Fuselage"),
                Mesh3d(meshes.add(Sphere::new(1.0))),
                MeshMaterial3d(hull.clone()),
                Transform::from_xyz(0.0, 0.5, 0.0).with_scale(Vec3::new(2.0, 0.9, 1.0)),
            ));
            frame.spawn((
                Name::new("Canopy"),
                Mesh3d(meshes.add(Sphere::new(0.7))),
                MeshMaterial3d(glass),
                Transform::from_xyz(1.3, 0.65, 0.0).with_scale(Vec3::new(1.0, 0.8, 1.1)),
            ));
            frame.spawn((
                Name::new("TailBoom"),
                Mesh3d(meshes.add(Cylinder::new(0.15, 3.6))),
                MeshMaterial3d(hull.clone()),
                Transform::from_xyz(-3.3, 0.75, 0.0)
                    .with_rotation(Quat::from_rotation_z(FRAC_PI_2 - 0.06)),
            ));
            frame.spawn((
                Name::new("TailFin"),
                Mesh3d(meshes.add(Cuboid::new(0.7, 1.1, 0.08))),
                MeshMaterial3d(hull.clone()),
                Transform::from_xyz(-5.0, 1.2, 0.0),
            ));
            for side in [-1.0, 1.0] {
                frame.spawn((
                    Name::new("Skid"),
                    Mesh3d(meshes.add(Cuboid::new(3.2, 0.08, 0.1))),
                    MeshMaterial3d(trim.clone()),
                    Transform::from_xyz(0.1, -SKID_HEIGHT + 0.04, 0.75 * side),
                ));
                frame.spawn((
                    Name::new("SkidStrut"),
                    Mesh3d(meshes.add(Cuboid::new(0.08, SKID_HEIGHT, 0.08))),
                    MeshMaterial3d(trim.clone()),
                    Transform::from_xyz(0.6, -SKID_HEIGHT / 2.0, 0.65 * side),
                ));
            }

            frame
                .spawn((
                    Name::new("MainRotor"),
                    RigPart::MainRotor,
                    Transform::from_xyz(0.0, 1.55, 0.0),
                    Visibility::default(),
                ))
                .with_children(|rotor| {
                    rotor.spawn((
                        Mesh3d(meshes.add(Cylinder::new(0.12, 0.35))),
                        MeshMaterial3d(trim.clone()),
                        Transform::from_xyz(0.0, -0.15, 0.0),
                    ));
                    for angle in [0.0, FRAC_PI_2] {
                        rotor.spawn((
                            Name::new("MainBlade"),
                            Mesh3d(meshes.add(Cuboid::new(7.5, 0.04, 0.22))),
                            MeshMaterial3d(trim.clone()),
                            Transform::from_rotation(Quat::from_rotation_y(angle)),
                        ));
                    }
                });

            frame
                .spawn((
                    Name::new("TailRotor"),
                    RigPart::TailRotor,
                    Transform::from_xyz(-5.1, 1.3, 0.12),
                    Visibility::default(),
                ))
                .with_children(|rotor| {
                    for angle in [0.0, FRAC_PI_2] {
                        rotor.spawn((
                            Name::new("TailBlade"),
                            Mesh3d(meshes.add(Cuboid::new(1.3, 0.1, 0.03))),
                            MeshMaterial3d(trim.clone()),
                            Transform::from_rotation(Quat::from_rotation_z(angle)),
                        ));
                    }
                });
        })
        .id();
    commands.entity(root).add_child(airframe);

    // Bucket assembly hangs plumb from the root, unaffected by pitch.
    let hidden = Visibility::Hidden;
    let anchor = commands
        .spawn((
            Name::new("RopeAnchor"),
            Transform::from_xyz(0.0, ROPE_ANCHOR_Y, 0.0),
            Visibility::default(),
        ))
        .with_children(|anchor| {
            anchor.spawn((
                Name::new("Rope"),
                RigPart::Rope,
                Mesh3d(meshes.add(Cylinder::new(0.035, 1.0))),
                MeshMaterial3d(rope),
                Transform::default(),
                hidden,
            ));
            anchor.spawn((
                Name::new("BucketBody"),
                RigPart::BucketBody,
                Mesh3d(meshes.add(Cylinder::new(BUCKET_RADIUS, BUCKET_HEIGHT))),
                MeshMaterial3d(bucket_shell.clone()),
                Transform::default(),
                hidden,
            ));
            anchor.spawn((
                Name::new("BucketWater"),
                RigPart::BucketWater,
                Mesh3d(meshes.add(Cylinder::new(BUCKET_RADIUS * 0.95, 0.04))),
                MeshMaterial3d(water.clone()),
                Transform::default(),
                hidden,
            ));
            anchor.spawn((
                Name::new("BucketFloor"),
                RigPart::SolidBottom,
                Mesh3d(meshes.add(Cylinder::new(BUCKET_RADIUS, FLOOR_THICKNESS))),
                MeshMaterial3d(bucket_shell.clone()),
                Transform::default(),
                hidden,
            ));
            let half = meshes.add(Cuboid::new(BUCKET_RADIUS, FLOOR_THICKNESS, BUCKET_RADIUS * 2.0));
            for side in [-1.0, 1.0] {
                anchor.spawn((
                    Name::new("Trapdoor"),
                    RigPart::BottomHalf { side },
                    Mesh3d(half.clone()),
                    MeshMaterial3d(bucket_shell.clone()),
                    Transform::default(),
                    hidden,
                ));
            }
            anchor.spawn((
                Name::new("WaterColumn"),
                RigPart::WaterColumn,
                Mesh3d(meshes.add(Cone {
                    radius: 1.0,
                    height: 1.0,
                })),
                MeshMaterial3d(water.clone()),
                Transform::default(),
                hidden,
            ));
            anchor.spawn((
                Name::new("Splash"),
                RigPart::Splash,
                Mesh3d(meshes.add(Cylinder::new(1.0, 0.05))),
                MeshMaterial3d(water),
                Transform::default(),
                hidden,
            ));
        })
        .id();
    commands.entity(root).add_child(anchor);

    info!("helicopter rig spawned at {}", rig.position());
}

// ── Update ──────────────────────────────────────────────────────────

/// Copies position, heading, pitch and rotor phases from the controller.
pub fn follow_controller(
    rig: Res<HeliRig>,
    mut root_q: Query<&mut Transform, (With<Helicopter>, Without<RigPart>)>,
    mut parts: Query<(&RigPart, &mut Transform), Without<Helicopter>>,
) {
    let Ok(mut root) = root_q.single_mut() else {
        return;
    };
    root.translation = rig.position();
    root.rotation = Quat::from_rotation_y(rig.angle_yy());

    for (part, mut tf) in &mut parts {
        match part {
            RigPart::Airframe => tf.rotation = Quat::from_rotation_z(rig.tilt_angle_x()),
            RigPart::MainRotor => tf.rotation = Quat::from_rotation_y(rig.main_rotor_angle()),
            RigPart::TailRotor => tf.rotation = Quat::from_rotation_z(rig.tail_rotor_angle()),
            _ => {}
        }
    }
}

/// Places rope, bucket and water pieces from the bucket's display pose.
pub fn pose_bucket(
    rig: Res<HeliRig>,
    mut parts: Query<(&RigPart, &mut Transform, &mut Visibility), Without<Helicopter>>,
) {
    let pose = rig.bucket().display(
        rig.rope_length(),
        rig.current_rope_length(),
        rig.state() == HeliState::PutFire,
    );

    for (part, mut tf, mut vis) in &mut parts {
        if matches!(
            part,
            RigPart::Airframe | RigPart::MainRotor | RigPart::TailRotor
        ) {
            continue;
        }
        match pose.as_ref().and_then(|p| bucket_part_transform(*part, p)) {
            Some(placed) => {
                *tf = placed;
                *vis = Visibility::Inherited;
            }
            None => *vis = Visibility::Hidden,
        }
    }
}

/// Local transform of a bucket piece under the rope anchor, or `None` when
/// the piece is hidden for this pose.
pub fn bucket_part_transform(part: RigPart, pose: &BucketPose) -> Option<Transform> {
    match part {
        RigPart::Rope => (pose.rope_length > 0.0).then(|| {
            Transform::from_xyz(0.0, -pose.rope_length / 2.0, 0.0)
                .with_scale(Vec3::new(1.0, pose.rope_length, 1.0))
        }),
        RigPart::BucketBody => pose
            .show_body
            .then(|| Transform::from_xyz(0.0, pose.body_center_y, 0.0)),
        RigPart::BucketWater => pose.water.map(|level| {
            let surface = pose.body_center_y + BUCKET_HEIGHT * 0.35 + level;
            Transform::from_xyz(0.0, surface.max(pose.bottom_y), 0.0)
        }),
        RigPart::SolidBottom => (pose.show_body && pose.bottom == BucketBottom::Solid)
            .then(|| Transform::from_xyz(0.0, pose.bottom_y, 0.0)),
        RigPart::BottomHalf { side } => match pose.bottom {
            BucketBottom::Split { open_angle } if pose.show_body => {
                let hinge = Vec3::new(side * BUCKET_RADIUS, pose.bottom_y, 0.0);
                let rotation = Quat::from_rotation_z(side * open_angle);
                let center = hinge + rotation * Vec3::new(-side * BUCKET_RADIUS / 2.0, 0.0, 0.0);
                Some(Transform::from_translation(center).with_rotation(rotation))
            }
            _ => None,
        },
        RigPart::WaterColumn => pose.water_fall.and_then(|fall| {
            let radius = fall.radius * fall.fade;
            // Cone apex sits at the bucket, base on the ground side.
            (fall.length > 0.0 && radius > 0.0).then(|| {
                Transform::from_xyz(0.0, fall.top_y - fall.length / 2.0, 0.0)
                    .with_scale(Vec3::new(radius, fall.length, radius))
            })
        }),
        RigPart::Splash => pose.water_fall.and_then(|fall| {
            let splash = fall.splash?;
            (splash.radius > 0.0).then(|| {
                Transform::from_xyz(0.0, fall.top_y - fall.length, 0.0)
                    .with_scale(Vec3::new(splash.radius, splash.fade.max(0.01), splash.radius))
            })
        }),
        RigPart::Airframe | RigPart::MainRotor | RigPart::TailRotor => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heli::bucket::{BucketController, BucketRates};

    fn full_bucket() -> BucketController {
        let mut bucket = BucketController::new(BucketRates::default());
        bucket.fill();
        bucket
    }

    #[test]
    fn stowed_rope_shows_nothing() {
        let bucket = full_bucket();
        assert!(bucket.display(5.0, 0.0, false).is_none());
    }

    #[test]
    fn short_rope_hides_body_but_shows_rope() {
        let pose = full_bucket().display(5.0, 1.0, false).unwrap();
        assert!(bucket_part_transform(RigPart::BucketBody, &pose).is_none());
        assert!(bucket_part_transform(RigPart::BucketWater, &pose).is_none());
        assert!(bucket_part_transform(RigPart::SolidBottom, &pose).is_none());
    }

    #[test]
    fn deployed_bucket_hangs_below_rope() {
        let pose = full_bucket().display(5.0, 5.0, false).unwrap();
        let rope = bucket_part_transform(RigPart::Rope, &pose).unwrap();
        let body = bucket_part_transform(RigPart::BucketBody, &pose).unwrap();
        let rope_end = rope.translation.y - rope.scale.y / 2.0;
        assert!(body.translation.y < rope_end);
        assert!(bucket_part_transform(RigPart::BucketWater, &pose).is_some());
        assert!(bucket_part_transform(RigPart::SolidBottom, &pose).is_some());
        assert!(bucket_part_transform(RigPart::BottomHalf { side: 1.0 }, &pose).is_none());
    }

    #[test]
    fn closed_trapdoor_halves_meet_in_the_middle() {
        let mut bucket = full_bucket();
        bucket.start_water_drop();
        let pose = bucket.display(5.0, 5.0, true).unwrap();
        let left = bucket_part_transform(RigPart::BottomHalf { side: -1.0 }, &pose).unwrap();
        let right = bucket_part_transform(RigPart::BottomHalf { side: 1.0 }, &pose).unwrap();
        assert!((left.translation.x + BUCKET_RADIUS / 2.0).abs() < 1e-5);
        assert!((right.translation.x - BUCKET_RADIUS / 2.0).abs() < 1e-5);
        assert!(bucket_part_transform(RigPart::SolidBottom, &pose).is_none());
    }

    #[test]
    fn open_trapdoor_swings_down() {
        let mut bucket = full_bucket();
        bucket.start_water_drop();
        for _ in 0..20 {
            bucket.update_water_drop();
        }
        let pose = bucket.display(5.0, 5.0, true).unwrap();
        let half = bucket_part_transform(RigPart::BottomHalf { side: 1.0 }, &pose).unwrap();
        assert!(half.translation.y < pose.bottom_y - BUCKET_RADIUS / 4.0);
    }

    #[test]
    fn rotor_parts_are_not_bucket_pieces() {
        let pose = full_bucket().display(5.0, 5.0, false).unwrap();
        assert!(bucket_part_transform(RigPart::MainRotor, &pose).is_none());
        assert!(bucket_part_transform(RigPart::Airframe, &pose).is_none());
    }
}
