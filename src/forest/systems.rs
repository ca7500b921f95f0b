use bevy::prelude::*;

use super::entities::Tree;
use super::{ForestConfig, plant};

// ── Startup ─────────────────────────────────────────────────────────

/// Plants every tree: trunk cylinder plus stacked crown tiers.
pub fn spawn_forest(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<ForestConfig>,
) {
    let bark = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.2, 0.2),
        perceptual_roughness: 1.0,
        ..default()
    });
    let forest = commands
        .spawn((Name::new("Forest"), Transform::default(), Visibility::default()))
        .id();

    let slots = plant(&cfg);
    for slot in &slots {
        let trunk_height = slot.height * 0.25;
        let leaves = materials.add(StandardMaterial {
            base_color: slot.leaf_color(),
            perceptual_roughness: 0.8,
            ..default()
        });

        let tree = commands
            .spawn((
                Name::new("Tree"),
                Tree,
                Transform::from_xyz(slot.position.x, 0.0, slot.position.y)
                    .with_rotation(Quat::from_euler(EulerRot::XYZ, slot.lean.x, 0.0, slot.lean.y)),
                Visibility::default(),
            ))
            .with_children(|t| {
                t.spawn((
                    Mesh3d(meshes.add(Cylinder::new(cfg.trunk_radius, trunk_height))),
                    MeshMaterial3d(bark.clone()),
                    Transform::from_xyz(0.0, trunk_height / 2.0, 0.0),
                ));
                for tier in slot.crown_tiers(cfg.trunk_radius) {
                    let mesh = if tier.radius_top > 0.0 {
                        meshes.add(ConicalFrustum {
                            radius_top: tier.radius_top,
                            radius_bottom: tier.radius_bottom,
                            height: tier.height,
                        })
                    } else {
                        meshes.add(Cone::new(tier.radius_bottom, tier.height))
                    };
                    t.spawn((
                        Mesh3d(mesh),
                        MeshMaterial3d(leaves.clone()),
                        Transform::from_xyz(0.0, tier.base_y + tier.height / 2.0, 0.0),
                    ));
                }
            })
            .id();
        commands.entity(forest).add_child(tree);
    }
    info!("forest planted: {} trees around {}", slots.len(), cfg.center);
}
