//! Orbit camera that follows the helicopter.
//!
//! Right-drag orbits around the aircraft, the wheel zooms. The field of view
//! comes from the preset picked in the control panel. The camera carries the
//! HDR, tonemapping and bloom setup so emissive flames and lights glow.

mod entities;
mod systems;

pub use entities::FollowCamera;

use std::fmt;

use bevy::prelude::*;

use crate::GameState;
use crate::math;
use crate::mission::SceneSettings;

/// Camera field-of-view presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum FovPreset {
    /// 0.4 rad.
    Narrow,
    /// 0.8 rad.
    #[default]
    Medium,
    /// 1.2 rad.
    Wide,
    /// 1.6 rad.
    UltraWide,
}

impl FovPreset {
    /// Every preset, narrowest first.
    pub const ALL: [FovPreset; 4] = [Self::Narrow, Self::Medium, Self::Wide, Self::UltraWide];

    /// Vertical field of view in radians.
    pub fn radians(self) -> f32 {
        match self {
            Self::Narrow => 0.4,
            Self::Medium => 0.8,
            Self::Wide => 1.2,
            Self::UltraWide => 1.6,
        }
    }

    /// Panel label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Narrow => "Narrow",
            Self::Medium => "Medium",
            Self::Wide => "Wide",
            Self::UltraWide => "Ultra wide",
        }
    }
}

impl fmt::Display for FovPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Orbit limits, input sensitivity and post-processing for the camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// Initial distance from the helicopter.
    pub distance: f32,
    /// Closest zoom.
    pub min_distance: f32,
    /// Farthest zoom.
    pub max_distance: f32,
    /// Initial orbit angle about the vertical axis.
    pub yaw: f32,
    /// Initial elevation above the horizon, in radians.
    pub pitch: f32,
    /// Lowest elevation.
    pub min_pitch: f32,
    /// Highest elevation.
    pub max_pitch: f32,
    /// Orbit radians per pixel of right-drag.
    pub drag_sensitivity: f32,
    /// Fractional zoom per scroll line.
    pub zoom_step: f32,
    /// Fraction of the gap to the helicopter closed per frame.
    pub follow_lerp: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 40.0,
            min_distance: 8.0,
            max_distance: 150.0,
            yaw: 0.6,
            pitch: 0.45,
            min_pitch: 0.05,
            max_pitch: 1.45,
            drag_sensitivity: 0.005,
            zoom_step: 0.1,
            follow_lerp: 0.15,
            bloom_intensity: 0.2,
        }
    }
}

/// Orbit parameters around a focus point.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct Orbit {
    /// Angle about the vertical axis.
    pub yaw: f32,
    /// Elevation above the horizon.
    pub pitch: f32,
    /// Distance from the focus.
    pub distance: f32,
}

impl Orbit {
    /// Initial orbit from the config.
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Self {
            yaw: cfg.yaw,
            pitch: cfg.pitch.clamp(cfg.min_pitch, cfg.max_pitch),
            distance: cfg.distance.clamp(cfg.min_distance, cfg.max_distance),
        }
    }

    /// Camera position relative to the focus.
    pub fn offset(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    /// Applies a right-drag of `delta` pixels.
    pub fn drag(&mut self, delta: Vec2, cfg: &CameraConfig) {
        self.yaw = math::wrap_angle(self.yaw - delta.x * cfg.drag_sensitivity);
        self.pitch += math::clamp_pitch(
            self.pitch,
            delta.y * cfg.drag_sensitivity,
            cfg.min_pitch,
            cfg.max_pitch,
        );
    }

    /// Zooms in for positive `lines`, out for negative.
    pub fn zoom(&mut self, lines: f32, cfg: &CameraConfig) {
        let factor = (1.0 - lines * cfg.zoom_step).max(0.1);
        self.distance = (self.distance * factor).clamp(cfg.min_distance, cfg.max_distance);
    }
}

/// Camera plugin: spawn, orbit input, follow and FOV.
pub struct CameraPlugin(pub CameraConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraConfig>()
            .register_type::<FollowCamera>()
            .register_type::<FovPreset>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                (
                    systems::orbit_input.run_if(in_state(GameState::Running)),
                    systems::follow_helicopter,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                systems::apply_fov.run_if(resource_changed::<SceneSettings>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── FovPreset ──────────────────────────────────────────────────

    #[test]
    fn presets_widen_in_order() {
        let radians: Vec<f32> = FovPreset::ALL.iter().map(|p| p.radians()).collect();
        assert_eq!(radians, vec![0.4, 0.8, 1.2, 1.6]);
        assert_eq!(FovPreset::default(), FovPreset::Medium);
    }

    #[test]
    fn preset_labels_are_distinct() {
        for a in FovPreset::ALL {
            for b in FovPreset::ALL {
                assert_eq!(a == b, a.label() == b.label());
            }
        }
    }

    // ── Orbit ──────────────────────────────────────────────────────

    #[test]
    fn offset_has_orbit_length_and_sits_above() {
        let orbit = Orbit::from_config(&CameraConfig::default());
        let offset = orbit.offset();
        assert!((offset.length() - orbit.distance).abs() < 1e-3);
        assert!(offset.y > 0.0);
    }

    #[test]
    fn drag_clamps_elevation() {
        let cfg = CameraConfig::default();
        let mut orbit = Orbit::from_config(&cfg);
        orbit.drag(Vec2::new(0.0, 10_000.0), &cfg);
        assert!((orbit.pitch - cfg.max_pitch).abs() < 1e-5);
        orbit.drag(Vec2::new(0.0, -10_000.0), &cfg);
        assert!((orbit.pitch - cfg.min_pitch).abs() < 1e-5);
    }

    #[test]
    fn drag_wraps_yaw() {
        let cfg = CameraConfig::default();
        let mut orbit = Orbit::from_config(&cfg);
        for _ in 0..100 {
            orbit.drag(Vec2::new(500.0, 0.0), &cfg);
            assert!(orbit.yaw > -std::f32::consts::PI - 1e-5);
            assert!(orbit.yaw <= std::f32::consts::PI + 1e-5);
        }
    }

    #[test]
    fn zoom_respects_limits() {
        let cfg = CameraConfig::default();
        let mut orbit = Orbit::from_config(&cfg);
        orbit.zoom(1.0, &cfg);
        assert!((orbit.distance - cfg.distance * 0.9).abs() < 1e-4);
        for _ in 0..100 {
            orbit.zoom(5.0, &cfg);
        }
        assert_eq!(orbit.distance, cfg.min_distance);
        for _ in 0..100 {
            orbit.zoom(-5.0, &cfg);
        }
        assert_eq!(orbit.distance, cfg.max_distance);
    }
}
