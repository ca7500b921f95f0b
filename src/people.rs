//! Two bystanders in front of the fire station.
//!
//! Figures are built from a sphere head and cuboid torso, arms and legs.
//! Arms hang from shoulder pivots and swing; one figure holds its arms up and
//! waves. Heads bob gently.

mod entities;
mod systems;

pub use entities::{Person, PersonPart};

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

/// Head radius.
pub const HEAD_RADIUS: f32 = 0.15;
/// Torso width, height and depth.
pub const TORSO: Vec3 = Vec3::new(0.3, 0.4, 0.15);
/// Arm width, length and depth.
pub const ARM: Vec3 = Vec3::new(0.1, 0.4, 0.1);
/// Leg width, length and depth.
pub const LEG: Vec3 = Vec3::new(0.12, 0.4, 0.12);

/// Where one figure stands.
#[derive(Clone, Debug, Reflect)]
pub struct FigurePlacement {
    /// Ground position as `(x, z)`.
    pub position: Vec2,
    /// Heading about the vertical axis.
    pub facing: f32,
    /// Arms raised and waving instead of hanging.
    pub arms_up: bool,
    /// Shirt colour.
    pub color: Color,
}

/// Figure placement and animation settings.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct PeopleConfig {
    /// Figures to spawn.
    pub figures: Vec<FigurePlacement>,
    /// Uniform scale applied to every figure.
    pub scale: f32,
    /// Peak arm swing in radians.
    pub swing_amplitude: f32,
    /// Arm swings per second.
    pub swing_hz: f32,
    /// Peak head bob, in figure units.
    pub bob_amplitude: f32,
    /// Head bobs per second.
    pub bob_hz: f32,
}

impl Default for PeopleConfig {
    fn default() -> Self {
        Self {
            figures: vec![
                FigurePlacement {
                    position: Vec2::new(-3.0, 7.0),
                    facing: 0.3,
                    arms_up: false,
                    color: Color::srgb(0.2, 0.3, 0.7),
                },
                FigurePlacement {
                    position: Vec2::new(3.0, 7.5),
                    facing: -0.4,
                    arms_up: true,
                    color: Color::srgb(0.75, 0.2, 0.15),
                },
            ],
            scale: 4.0,
            swing_amplitude: 0.4,
            swing_hz: 0.8,
            bob_amplitude: 0.015,
            bob_hz: 1.6,
        }
    }
}

impl PeopleConfig {
    /// Shoulder pivot rotations `(left, right)` at `t` seconds.
    ///
    /// Hanging arms swing in opposition about X. Raised arms point up and
    /// wave sideways about Z.
    pub fn arm_rotations(&self, arms_up: bool, t: f32, phase: f32) -> (Quat, Quat) {
        let s = self.swing_amplitude * (TAU * self.swing_hz * t + phase).sin();
        if arms_up {
            (
                Quat::from_rotation_z(-PI + s.abs()),
                Quat::from_rotation_z(PI - s.abs()),
            )
        } else {
            (Quat::from_rotation_x(s), Quat::from_rotation_x(-s))
        }
    }

    /// Head offset above its rest position at `t` seconds.
    pub fn head_bob(&self, t: f32, phase: f32) -> f32 {
        self.bob_amplitude * (TAU * self.bob_hz * t + phase).sin()
    }
}

/// Standing layout in figure units, feet at y = 0.
pub fn shoulder_height() -> f32 {
    LEG.y + TORSO.y
}

/// Rest height of the head centre.
pub fn head_rest_height() -> f32 {
    shoulder_height() + HEAD_RADIUS
}

/// People plugin: spawns the figures and animates limbs.
pub struct PeoplePlugin(pub PeopleConfig);

impl Plugin for PeoplePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PeopleConfig>()
            .register_type::<Person>()
            .register_type::<PersonPart>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::spawn_people)
            .add_systems(Update, systems::animate_people);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hanging_arms_swing_in_opposition() {
        let cfg = PeopleConfig::default();
        let t = 0.25 / cfg.swing_hz;
        let (left, right) = cfg.arm_rotations(false, t, 0.0);
        let (_, lx, _) = left.to_euler(EulerRot::YXZ);
        let (_, rx, _) = right.to_euler(EulerRot::YXZ);
        assert!((lx - cfg.swing_amplitude).abs() < 1e-4);
        assert!((lx + rx).abs() < 1e-4);
    }

    #[test]
    fn raised_arms_point_up() {
        let cfg = PeopleConfig::default();
        for i in 0..20 {
            let (left, right) = cfg.arm_rotations(true, i as f32 * 0.1, 0.0);
            // Arms hang along -Y at rest, so raised means the tip points up.
            assert!((left * Vec3::NEG_Y).y > 0.9);
            assert!((right * Vec3::NEG_Y).y > 0.9);
        }
    }

    #[test]
    fn head_bob_is_bounded() {
        let cfg = PeopleConfig::default();
        for i in 0..50 {
            assert!(cfg.head_bob(i as f32 * 0.07, 1.0).abs() <= cfg.bob_amplitude + 1e-6);
        }
    }

    #[test]
    fn head_sits_on_the_shoulders() {
        assert!((shoulder_height() - 0.8).abs() < 1e-6);
        assert!((head_rest_height() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn one_default_figure_waves() {
        let cfg = PeopleConfig::default();
        assert_eq!(cfg.figures.len(), 2);
        assert_eq!(cfg.figures.iter().filter(|f| f.arms_up).count(), 1);
    }
}
