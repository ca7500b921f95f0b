use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, VertexAttributeValues};
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use super::entities::LakeSurface;
use super::{LakeConfig, lake_grid};

/// Normal sample offset for the finite-difference normals.
const NORMAL_EPS: f32 = 0.05;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the water plane. The mesh keeps its CPU copy for per-frame edits.
pub fn spawn_lake(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<LakeConfig>,
) {
    let (positions, indices) = lake_grid(cfg.size, cfg.subdivisions);
    let count = positions.len();
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [p[0] / cfg.size.x + 0.5, p[2] / cfg.size.y + 0.5])
        .collect();

    let mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 1.0, 0.0]; count])
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices));
    let handle = meshes.add(mesh);

    commands.spawn((
        Name::new("Lake"),
        LakeSurface {
            mesh: handle.clone(),
        },
        Mesh3d(handle),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: cfg.color,
            perceptual_roughness: 0.15,
            reflectance: 0.6,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(cfg.center.x, cfg.height, cfg.center.y),
    ));
    info!(
        "lake spawned at ({}, {}), {} vertices",
        cfg.center.x, cfg.center.y, count
    );
}

// ── Update ──────────────────────────────────────────────────────────

/// Rewrites vertex heights and normals from the wave function.
pub fn animate_waves(
    time: Res<Time>,
    cfg: Res<LakeConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    lake_q: Query<&LakeSurface>,
) {
    let Ok(lake) = lake_q.single() else {
        return;
    };
    let Some(mesh) = meshes.get_mut(&lake.mesh) else {
        return;
    };
    let t = time.elapsed_secs();

    let mut normals = Vec::new();
    if let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    {
        normals.reserve(positions.len());
        for p in positions.iter_mut() {
            let (x, z) = (p[0], p[2]);
            let h = cfg.wave_height(x, z, t);
            p[1] = h;
            let dx = cfg.wave_height(x + NORMAL_EPS, z, t) - h;
            let dz = cfg.wave_height(x, z + NORMAL_EPS, t) - h;
            normals.push(Vec3::new(-dx, NORMAL_EPS, -dz).normalize().to_array());
        }
    }
    if !normals.is_empty() {
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    }
}
