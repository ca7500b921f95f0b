//! Procedural forest around the fire.
//!
//! Trees sit on a hexagonal lattice with a clearing in the middle for the
//! flames. Every per-tree parameter (jitter, height, lean, crown shape, leaf
//! tint) is sampled from seeded Perlin noise, so the same config always
//! grows the same forest.

mod entities;
mod systems;

pub use entities::Tree;

use std::ops::RangeInclusive;

use bevy::prelude::*;
use hexx::{Hex, HexLayout, shapes};
use noise::{NoiseFn, Perlin};

use crate::math;

/// Crown tier count range.
pub const CROWN_LEVELS: RangeInclusive<u32> = 3..=8;
/// Relative height variation applied to `tree_height`.
pub const HEIGHT_VARIATION: f32 = 0.2;
/// Crown width multiplier range.
pub const CROWN_SCALE: RangeInclusive<f32> = 0.2..=0.7;

/// Forest placement and tree shape settings.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ForestConfig {
    /// Lattice centre as `(x, z)`.
    pub center: Vec2,
    /// Hex rings around the centre cell.
    pub rings: u32,
    /// Distance between neighbouring lattice points.
    pub spacing: f32,
    /// Lattice points closer than this to the centre stay empty.
    pub clearing_radius: f32,
    /// Maximum position offset along each axis.
    pub jitter: f32,
    /// Perlin seed.
    pub seed: u32,
    /// Nominal tree height.
    pub tree_height: f32,
    /// Trunk radius.
    pub trunk_radius: f32,
    /// Maximum lean in radians about each horizontal axis.
    pub max_lean: f32,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            center: Vec2::new(24.5, 24.5),
            rings: 3,
            spacing: 6.0,
            clearing_radius: 5.0,
            jitter: 2.0,
            seed: 7,
            tree_height: 5.0,
            trunk_radius: 0.5,
            max_lean: 0.08,
        }
    }
}

/// Everything needed to build one tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeSlot {
    /// Ground position as `(x, z)`.
    pub position: Vec2,
    /// Total height.
    pub height: f32,
    /// Lean about X and Z, in radians.
    pub lean: Vec2,
    /// Number of stacked crown tiers, top cone included.
    pub crown_levels: u32,
    /// Crown width multiplier.
    pub crown_scale: f32,
    /// 0 = dark green, 1 = bright green.
    pub leaf_tint: f32,
}

impl TreeSlot {
    /// Leaf colour for this tree's tint.
    pub fn leaf_color(&self) -> Color {
        let t = self.leaf_tint.clamp(0.0, 1.0);
        Color::srgb(0.06 + 0.1 * t, 0.25 + 0.3 * t, 0.06 + 0.06 * t)
    }

    /// Crown tiers from bottom to top. The last one is a closed cone.
    pub fn crown_tiers(&self, trunk_radius: f32) -> Vec<CrownTier> {
        let levels = self.crown_levels.max(1);
        let start = self.height * 0.2;
        let tier_height = (self.height - start) / levels as f32;
        let base_radius = trunk_radius * 2.5 * (0.6 + self.crown_scale);

        (0..levels)
            .map(|i| {
                let shrink = 1.0 - 0.6 * i as f32 / levels as f32;
                let radius_bottom = base_radius * shrink;
                let radius_top = if i + 1 == levels {
                    0.0
                } else {
                    radius_bottom * 0.4
                };
                CrownTier {
                    base_y: start + tier_height * i as f32,
                    height: tier_height,
                    radius_bottom,
                    radius_top,
                }
            })
            .collect()
    }
}

/// One truncated cone of a tree crown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrownTier {
    /// Height of the tier's base above the ground.
    pub base_y: f32,
    /// Tier height.
    pub height: f32,
    /// Bottom radius.
    pub radius_bottom: f32,
    /// Top radius, zero for the closing cone.
    pub radius_top: f32,
}

/// Lattice points around `cfg.center` outside the clearing.
pub fn lattice(cfg: &ForestConfig) -> Vec<Vec2> {
    // Neighbouring hex centres are sqrt(3) hex sizes apart.
    let layout = HexLayout {
        scale: Vec2::splat(cfg.spacing / 3f32.sqrt()),
        ..default()
    };
    shapes::hexagon(Hex::ZERO, cfg.rings)
        .map(|hex| layout.hex_to_world_pos(hex))
        .filter(|p| p.length() >= cfg.clearing_radius)
        .map(|p| p + cfg.center)
        .collect()
}

/// Samples a tree for every lattice point.
pub fn plant(cfg: &ForestConfig) -> Vec<TreeSlot> {
    let perlin = Perlin::new(cfg.seed);
    // Off-lattice sampling keeps Perlin away from its zero crossings.
    let sample = |p: Vec2, channel: f64| {
        perlin.get([
            p.x as f64 * 0.173 + channel * 31.7 + 0.5,
            p.y as f64 * 0.173 - channel * 17.3 + 0.5,
        ])
        .clamp(-1.0, 1.0)
    };

    lattice(cfg)
        .into_iter()
        .map(|p| {
            let jitter = Vec2::new(
                math::map_noise_to_range(sample(p, 0.0), -cfg.jitter, cfg.jitter),
                math::map_noise_to_range(sample(p, 1.0), -cfg.jitter, cfg.jitter),
            );
            let variation = math::map_noise_to_range(sample(p, 2.0), -HEIGHT_VARIATION, HEIGHT_VARIATION);
            let levels = math::map_noise_to_range(
                sample(p, 3.0),
                *CROWN_LEVELS.start() as f32,
                *CROWN_LEVELS.end() as f32,
            )
            .round() as u32;
            TreeSlot {
                position: p + jitter,
                height: cfg.tree_height * (1.0 + variation),
                lean: Vec2::new(
                    math::map_noise_to_range(sample(p, 4.0), -cfg.max_lean, cfg.max_lean),
                    math::map_noise_to_range(sample(p, 5.0), -cfg.max_lean, cfg.max_lean),
                ),
                crown_levels: levels.clamp(*CROWN_LEVELS.start(), *CROWN_LEVELS.end()),
                crown_scale: math::map_noise_to_range(
                    sample(p, 6.0),
                    *CROWN_SCALE.start(),
                    *CROWN_SCALE.end(),
                ),
                leaf_tint: math::map_noise_to_range(sample(p, 7.0), 0.0, 1.0),
            }
        })
        .collect()
}

/// Forest plugin: plants the trees once at startup.
pub struct ForestPlugin(pub ForestConfig);

impl Plugin for ForestPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ForestConfig>()
            .register_type::<Tree>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::spawn_forest);
    }
}
