//! Fire: a cluster of tapered-triangle flames inside the fire trigger box.
//!
//! A large and a small flame population are generated once from seeded
//! Perlin noise. Each frame the flames sway about their base and flicker in
//! height. The whole cluster follows the controller's fire flag, so it
//! vanishes when a water drop puts it out and returns when fires are
//! re-enabled from the panel.

mod entities;
mod systems;

pub use entities::{FireRoot, Flame};

use std::f32::consts::TAU;

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};

use crate::math;

/// Vertical bands in the flame mesh.
pub const FLAME_SEGMENTS: u32 = 5;
/// Peak relative height change from flicker.
pub const FLICKER: f32 = 0.15;

/// Fire placement and flame population.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct FireConfig {
    /// Ground-plane centre as `(x, z)`.
    pub center: Vec2,
    /// Overall fire size; flame dimensions scale with it.
    pub size: f32,
    /// Large flames. A third as many small ones are added.
    pub flame_count: u32,
    /// Perlin seed for flame parameters and flicker.
    pub seed: u32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            center: Vec2::new(24.5, 24.5),
            size: 5.0,
            flame_count: 15,
            seed: 3,
        }
    }
}

/// Seeded noise shared by flame generation and flicker.
#[derive(Resource)]
pub struct FireNoise(pub Perlin);

impl FireNoise {
    /// Noise in `[-1, 1]` for flame `index`, parameter `channel`.
    fn sample(&self, index: u32, channel: u32) -> f64 {
        self.0
            .get([index as f64 * 0.731 + 0.37, channel as f64 * 1.913 + 0.13])
            .clamp(-1.0, 1.0)
    }

    /// Height multiplier for a flame at `t` seconds.
    pub fn flicker(&self, flame: &Flame, t: f32) -> f32 {
        let n = self
            .0
            .get([(t * flame.speed) as f64, flame.phase as f64 * 3.1])
            .clamp(-1.0, 1.0) as f32;
        1.0 + FLICKER * n
    }
}

/// Generates the large flames followed by the small ones.
pub fn generate_flames(cfg: &FireConfig, noise: &FireNoise) -> Vec<Flame> {
    let size = cfg.size;
    let small_count = cfg.flame_count / 3;
    let range = |i: u32, channel: u32, min: f32, max: f32| {
        math::map_noise_to_range(noise.sample(i, channel), min, max)
    };

    let large = (0..cfg.flame_count).map(|i| Flame {
        height: range(i, 0, 0.6, 1.0) * size,
        width: range(i, 1, 0.3, 0.7) * size,
        angle: range(i, 2, 0.0, TAU),
        phase: range(i, 3, 0.0, TAU),
        speed: range(i, 4, 0.5, 2.0),
        offset: Vec2::new(
            range(i, 5, -size / 2.0, size / 2.0),
            range(i, 6, -size / 2.0, size / 2.0),
        ),
        sway_amplitude: range(i, 7, 0.1, 0.3),
        sway_frequency: range(i, 8, 1.0, 3.0),
        small: false,
    });
    let small = (0..small_count).map(|k| {
        let i = cfg.flame_count + k;
        Flame {
            height: range(i, 0, 0.3, 0.6) * size,
            width: range(i, 1, 0.2, 0.4) * size,
            angle: range(i, 2, 0.0, TAU),
            phase: range(i, 3, 0.0, TAU),
            speed: range(i, 4, 0.5, 1.5),
            offset: Vec2::new(
                range(i, 5, -size / 2.5, size / 2.5),
                range(i, 6, -size / 2.5, size / 2.5),
            ),
            sway_amplitude: range(i, 7, 0.05, 0.15),
            sway_frequency: range(i, 8, 2.0, 4.0),
            small: true,
        }
    });
    large.chain(small).collect()
}

/// Unit flame outline: `segments` bands narrowing from width 1 at the base to
/// a point at height 1, in the XY plane.
pub fn tapered_triangle(segments: u32) -> (Vec<[f32; 3]>, Vec<[f32; 2]>, Vec<u16>) {
    let n = segments.max(1);
    let mut positions = Vec::with_capacity(2 * (n as usize + 1));
    let mut uvs = Vec::with_capacity(positions.capacity());
    for i in 0..=n {
        let f = i as f32 / n as f32;
        let half = 0.5 * (1.0 - f);
        positions.push([-half, f, 0.0]);
        positions.push([half, f, 0.0]);
        uvs.push([0.0, 1.0 - f]);
        uvs.push([1.0, 1.0 - f]);
    }
    let mut indices = Vec::with_capacity(6 * n as usize);
    for i in 0..n as u16 {
        let idx = i * 2;
        indices.extend_from_slice(&[idx, idx + 1, idx + 2, idx + 1, idx + 3, idx + 2]);
    }
    (positions, uvs, indices)
}

/// Local transform of `flame` at `t` seconds, given its flicker multiplier.
pub fn flame_transform(flame: &Flame, t: f32, flicker: f32) -> Transform {
    let sway = flame.sway_amplitude * (t * flame.sway_frequency + flame.phase).sin();
    Transform {
        translation: Vec3::new(flame.offset.x, 0.0, flame.offset.y),
        rotation: Quat::from_rotation_y(flame.angle) * Quat::from_rotation_z(sway),
        scale: Vec3::new(flame.width, flame.height * flicker, 1.0),
    }
}

/// Fire plugin: flame cluster, flicker and extinguish visibility.
pub struct FirePlugin(pub FireConfig);

impl Plugin for FirePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FireConfig>()
            .register_type::<Flame>()
            .register_type::<FireRoot>()
            .insert_resource(self.0.clone())
            .insert_resource(FireNoise(Perlin::new(self.0.seed)))
            .add_systems(Startup, systems::spawn_fire)
            .add_systems(
                Update,
                (
                    systems::sync_fire_visibility,
                    systems::animate_flames,
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heli::HeliConfig;

    fn flames(cfg: &FireConfig) -> Vec<Flame> {
        generate_flames(cfg, &FireNoise(Perlin::new(cfg.seed)))
    }

    // ── Generation ─────────────────────────────────────────────────

    #[test]
    fn adds_a_third_as_many_small_flames() {
        let all = flames(&FireConfig::default());
        assert_eq!(all.len(), 20);
        assert_eq!(all.iter().filter(|f| f.small).count(), 5);
        assert!(all[..15].iter().all(|f| !f.small));
    }

    #[test]
    fn flame_sizes_scale_with_fire_size() {
        let cfg = FireConfig::default();
        for f in flames(&cfg) {
            let (h, w) = if f.small { ((0.3, 0.6), (0.2, 0.4)) } else { ((0.6, 1.0), (0.3, 0.7)) };
            let within = |v: f32, (lo, hi): (f32, f32)| (lo * cfg.size - 1e-4..=hi * cfg.size + 1e-4).contains(&v);
            assert!(within(f.height, h), "{}", f.height);
            assert!(within(f.width, w), "{}", f.width);
            assert!(f.offset.abs().max_element() <= cfg.size / 2.0 + 1e-4);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let cfg = FireConfig::default();
        assert_eq!(flames(&cfg), flames(&cfg));
    }

    #[test]
    fn no_flames_requested() {
        let cfg = FireConfig {
            flame_count: 0,
            ..default()
        };
        assert!(flames(&cfg).is_empty());
    }

    #[test]
    fn default_fire_sits_in_the_fire_area() {
        let cfg = FireConfig::default();
        let bounds = HeliConfig::default().fire_bounds;
        assert!(bounds.contains(cfg.center.x, cfg.center.y));
    }

    // ── Mesh ───────────────────────────────────────────────────────

    #[test]
    fn triangle_narrows_to_a_point() {
        let (positions, uvs, indices) = tapered_triangle(FLAME_SEGMENTS);
        assert_eq!(positions.len(), 12);
        assert_eq!(uvs.len(), 12);
        assert_eq!(indices.len(), 30);
        assert_eq!(positions[0], [-0.5, 0.0, 0.0]);
        let top = positions[positions.len() - 1];
        assert!(top[0].abs() < 1e-6);
        assert!((top[1] - 1.0).abs() < 1e-6);
    }

    // ── Animation ──────────────────────────────────────────────────

    #[test]
    fn flicker_stays_within_bounds() {
        let noise = FireNoise(Perlin::new(3));
        let flame = flames(&FireConfig::default())[0].clone();
        for i in 0..100 {
            let f = noise.flicker(&flame, i as f32 * 0.13);
            assert!((1.0 - FLICKER..=1.0 + FLICKER).contains(&f));
        }
    }

    #[test]
    fn transform_applies_dimensions_and_offset() {
        let flame = flames(&FireConfig::default())[2].clone();
        let t = flame_transform(&flame, 0.0, 1.0);
        assert_eq!(t.translation, Vec3::new(flame.offset.x, 0.0, flame.offset.y));
        assert!((t.scale.y - flame.height).abs() < 1e-6);
        assert!((t.scale.x - flame.width).abs() < 1e-6);
    }
}
