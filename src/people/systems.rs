use bevy::prelude::*;

use super::entities::{Person, PersonPart};
use super::{ARM, HEAD_RADIUS, LEG, PeopleConfig, TORSO, head_rest_height, shoulder_height};

// ── Startup ─────────────────────────────────────────────────────────

pub fn spawn_people(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<PeopleConfig>,
) {
    let skin = materials.add(Color::srgb(0.9, 0.72, 0.58));
    let trousers = materials.add(Color::srgb(0.15, 0.15, 0.2));
    let head = meshes.add(Sphere::new(HEAD_RADIUS));
    let torso = meshes.add(Cuboid::from_size(TORSO));
    let arm = meshes.add(Cuboid::from_size(ARM));
    let leg = meshes.add(Cuboid::from_size(LEG));

    for (i, figure) in cfg.figures.iter().enumerate() {
        let shirt = materials.add(figure.color);
        let shoulder_x = TORSO.x / 2.0 + ARM.x / 2.0;
        commands
            .spawn((
                Name::new("Person"),
                Person {
                    arms_up: figure.arms_up,
                    phase: i as f32 * 1.3,
                },
                Transform::from_xyz(figure.position.x, 0.0, figure.position.y)
                    .with_rotation(Quat::from_rotation_y(figure.facing))
                    .with_scale(Vec3::splat(cfg.scale)),
                Visibility::default(),
            ))
            .with_children(|p| {
                for x in [-LEG.x / 2.0, LEG.x / 2.0] {
                    p.spawn((
                        Mesh3d(leg.clone()),
                        MeshMaterial3d(trousers.clone()),
                        Transform::from_xyz(x, LEG.y / 2.0, 0.0),
                    ));
                }
                p.spawn((
                    Mesh3d(torso.clone()),
                    MeshMaterial3d(shirt.clone()),
                    Transform::from_xyz(0.0, LEG.y + TORSO.y / 2.0, 0.0),
                ));
                p.spawn((
                    PersonPart::Head,
                    Mesh3d(head.clone()),
                    MeshMaterial3d(skin.clone()),
                    Transform::from_xyz(0.0, head_rest_height(), 0.0),
                ));
                for (part, x) in [
                    (PersonPart::LeftShoulder, -shoulder_x),
                    (PersonPart::RightShoulder, shoulder_x),
                ] {
                    p.spawn((
                        part,
                        Transform::from_xyz(x, shoulder_height(), 0.0),
                        Visibility::default(),
                    ))
                    .with_children(|s| {
                        s.spawn((
                            Mesh3d(arm.clone()),
                            MeshMaterial3d(shirt.clone()),
                            Transform::from_xyz(0.0, -ARM.y / 2.0, 0.0),
                        ));
                    });
                }
            });
    }
    info!("{} people spawned", cfg.figures.len());
}

// ── Update ──────────────────────────────────────────────────────────

/// Swings shoulders and bobs heads.
pub fn animate_people(
    time: Res<Time>,
    cfg: Res<PeopleConfig>,
    people_q: Query<&Person>,
    mut part_q: Query<(&PersonPart, &ChildOf, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    for (part, child_of, mut transform) in &mut part_q {
        let Ok(person) = people_q.get(child_of.parent()) else {
            continue;
        };
        match part {
            PersonPart::Head => {
                transform.translation.y = head_rest_height() + cfg.head_bob(t, person.phase);
            }
            PersonPart::LeftShoulder => {
                transform.rotation = cfg.arm_rotations(person.arms_up, t, person.phase).0;
            }
            PersonPart::RightShoulder => {
                transform.rotation = cfg.arm_rotations(person.arms_up, t, person.phase).1;
            }
        }
    }
}
