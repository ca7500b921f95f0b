//! Lake: a subdivided water plane over the pickup trigger box.
//!
//! Vertex heights come from two superimposed travelling sine waves and are
//! rewritten every frame.

mod entities;
mod systems;

pub use entities::LakeSurface;

use std::f32::consts::TAU;

use bevy::prelude::*;

/// Lake placement and wave shape.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct LakeConfig {
    /// Ground-plane centre as `(x, z)`.
    pub center: Vec2,
    /// Extent along X and Z.
    pub size: Vec2,
    /// Quads per side.
    pub subdivisions: u32,
    /// Water level.
    pub height: f32,
    /// Peak height of the primary wave.
    pub wave_amplitude: f32,
    /// Crest-to-crest distance of the primary wave.
    pub wave_length: f32,
    /// Primary wave crests per second.
    pub wave_speed: f32,
    /// Water colour.
    pub color: Color,
}

impl Default for LakeConfig {
    fn default() -> Self {
        Self {
            center: Vec2::new(-42.0, 31.0),
            size: Vec2::new(28.0, 34.0),
            subdivisions: 64,
            height: 0.05,
            wave_amplitude: 0.12,
            wave_length: 7.0,
            wave_speed: 0.4,
            color: Color::srgba(0.1, 0.35, 0.6, 0.85),
        }
    }
}

impl LakeConfig {
    /// Surface offset at local `(x, z)` after `t` seconds.
    ///
    /// The second wave runs diagonally at half the amplitude and a shorter
    /// wavelength, so the pattern never settles into plain ridges.
    pub fn wave_height(&self, x: f32, z: f32, t: f32) -> f32 {
        let k = TAU / self.wave_length;
        let w = TAU * self.wave_speed;
        let primary = (k * x - w * t).sin();
        let cross = (1.7 * k * (0.6 * x + 0.8 * z) + 1.3 * w * t).sin();
        self.wave_amplitude * (primary + 0.5 * cross)
    }
}

/// Grid positions and triangle indices for a `size` plane centred on the
/// origin with `subdivisions` quads per side.
pub fn lake_grid(size: Vec2, subdivisions: u32) -> (Vec<[f32; 3]>, Vec<u32>) {
    let n = subdivisions.max(1);
    let stride = n + 1;
    let mut positions = Vec::with_capacity((stride * stride) as usize);
    for row in 0..=n {
        for col in 0..=n {
            let x = (col as f32 / n as f32 - 0.5) * size.x;
            let z = (row as f32 / n as f32 - 0.5) * size.y;
            positions.push([x, 0.0, z]);
        }
    }

    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for row in 0..n {
        for col in 0..n {
            let i = row * stride + col;
            // Counter-clockwise seen from above.
            indices.extend_from_slice(&[i, i + stride, i + 1, i + 1, i + stride, i + stride + 1]);
        }
    }
    (positions, indices)
}

/// Lake plugin: water surface and wave animation.
pub struct LakePlugin(pub LakeConfig);

impl Plugin for LakePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LakeConfig>()
            .register_type::<LakeSurface>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::spawn_lake)
            .add_systems(Update, systems::animate_waves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heli::HeliConfig;
    use crate::math;

    // ── Waves ──────────────────────────────────────────────────────

    #[test]
    fn waves_stay_within_combined_amplitude() {
        let cfg = LakeConfig::default();
        let bound = cfg.wave_amplitude * 1.5 + 1e-6;
        for i in 0..200 {
            let f = i as f32 * 0.37;
            let h = cfg.wave_height(f, -f * 0.5, f * 0.1);
            assert!(h.abs() <= bound, "{h}");
        }
    }

    #[test]
    fn waves_travel_over_time() {
        let cfg = LakeConfig::default();
        let a = cfg.wave_height(1.0, 2.0, 0.0);
        let b = cfg.wave_height(1.0, 2.0, 0.3);
        assert!((a - b).abs() > 1e-4);
    }

    #[test]
    fn flat_water_without_amplitude() {
        let cfg = LakeConfig {
            wave_amplitude: 0.0,
            ..default()
        };
        assert_eq!(cfg.wave_height(3.0, 4.0, 5.0), 0.0);
    }

    // ── Grid ───────────────────────────────────────────────────────

    #[test]
    fn grid_vertex_and_index_counts() {
        let (positions, indices) = lake_grid(Vec2::new(10.0, 20.0), 4);
        assert_eq!(positions.len(), 25);
        assert_eq!(indices.len(), 4 * 4 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
    }

    #[test]
    fn grid_spans_the_requested_size() {
        let (positions, _) = lake_grid(Vec2::new(10.0, 20.0), 4);
        let first = positions[0];
        let last = positions[positions.len() - 1];
        assert_eq!(first, [-5.0, 0.0, -10.0]);
        assert_eq!(last, [5.0, 0.0, 10.0]);
    }

    #[test]
    fn grid_triangles_face_up() {
        let (positions, indices) = lake_grid(Vec2::splat(2.0), 1);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(positions[i as usize]));
            assert!(math::compute_normal(a, b, c).y > 0.99);
        }
    }

    #[test]
    fn default_lake_covers_the_pickup_area() {
        let lake = LakeConfig::default();
        let bounds = HeliConfig::default().lake_bounds;
        let half = lake.size / 2.0;
        assert!(lake.center.x - half.x <= bounds.min_x);
        assert!(lake.center.x + half.x >= bounds.max_x);
        assert!(lake.center.y - half.y <= bounds.min_z);
        assert!(lake.center.y + half.y >= bounds.max_z);
    }
}
