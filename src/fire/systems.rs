use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use super::entities::{FireRoot, Flame};
use super::{FLAME_SEGMENTS, FireConfig, FireNoise, flame_transform, generate_flames, tapered_triangle};
use crate::heli::HeliRig;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the flame cluster under a [`FireRoot`].
pub fn spawn_fire(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<FireConfig>,
    noise: Res<FireNoise>,
) {
    let (positions, uvs, indices) = tapered_triangle(FLAME_SEGMENTS);
    let count = positions.len();
    let mesh = meshes.add(
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; count])
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
            .with_inserted_indices(Indices::U16(indices)),
    );
    let flame_material = |color: Color, emissive: LinearRgba| StandardMaterial {
        base_color: color,
        emissive,
        cull_mode: None,
        double_sided: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    };
    let outer = materials.add(flame_material(
        Color::srgba(1.0, 0.4, 0.05, 0.85),
        LinearRgba::rgb(6.0, 1.5, 0.1),
    ));
    let inner = materials.add(flame_material(
        Color::srgba(1.0, 0.8, 0.2, 0.9),
        LinearRgba::rgb(8.0, 4.0, 0.4),
    ));

    let flames = generate_flames(&cfg, &noise);
    let total = flames.len();
    commands
        .spawn((
            Name::new("Fire"),
            FireRoot,
            Transform::from_xyz(cfg.center.x, 0.0, cfg.center.y),
            Visibility::default(),
        ))
        .with_children(|root| {
            for flame in flames {
                let material = if flame.small { inner.clone() } else { outer.clone() };
                root.spawn((
                    Name::new("Flame"),
                    flame_transform(&flame, 0.0, 1.0),
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    flame,
                ));
            }
        });
    info!("fire lit at {} with {total} flames", cfg.center);
}

// ── Update ──────────────────────────────────────────────────────────

/// Shows the fire while the controller reports it burning.
pub fn sync_fire_visibility(
    rig: Res<HeliRig>,
    mut root_q: Query<&mut Visibility, With<FireRoot>>,
) {
    let Ok(mut visibility) = root_q.single_mut() else {
        return;
    };
    let wanted = if rig.is_fire_on() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    visibility.set_if_neq(wanted);
}

/// Sways and flickers each flame.
pub fn animate_flames(
    time: Res<Time>,
    noise: Res<FireNoise>,
    mut flame_q: Query<(&Flame, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    for (flame, mut transform) in &mut flame_q {
        *transform = flame_transform(flame, t, noise.flicker(flame, t));
    }
}
