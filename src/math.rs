//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use std::f32::consts::{PI, TAU};

use bevy::prelude::{Reflect, Vec2, Vec3};

/// Maps a noise value from the standard `[-1, 1]` range into `[min, max]`.
///
/// Noise generators (e.g. `Perlin`) produce values centred around zero.
/// This linearly rescales to an arbitrary output range.
///
/// # Examples
/// ```
/// # use heli_firefighter::math::map_noise_to_range;
/// assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
/// assert_eq!(map_noise_to_range( 1.0, 0.0, 10.0), 10.0);
/// assert_eq!(map_noise_to_range( 0.0, 2.0, 6.0),  4.0);
/// ```
pub fn map_noise_to_range(noise_val: f64, min: f32, max: f32) -> f32 {
    min + ((noise_val as f32 + 1.0) / 2.0) * (max - min)
}

/// Wraps an angle in radians into the half-open interval `(-PI, PI]`.
///
/// Non-finite input is returned unchanged so callers can detect it upstream
/// instead of having it silently folded into range.
///
/// # Examples
/// ```
/// # use heli_firefighter::math::wrap_angle;
/// use std::f32::consts::PI;
/// assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
/// assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
/// ```
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let wrapped = angle - TAU * ((angle - PI) / TAU).ceil();
    // Rounding can land a hair outside the interval for huge inputs.
    if wrapped <= -PI { wrapped + TAU } else { wrapped.min(PI) }
}

/// First-order low-pass step: moves `current` toward `target` by `fraction`
/// of the remaining gap. `fraction` is clamped to `[0, 1]`.
pub fn damped_approach(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction.clamp(0.0, 1.0)
}

/// Computes the face normal of a triangle defined by three vertices.
///
/// Uses the cross product of edges `(v1 - v0)` and `(v2 - v0)`.
/// Returns `Vec3::ZERO` if the triangle is degenerate (collinear points).
pub fn compute_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

/// Clamps a pitch angle so the camera cannot flip past vertical.
///
/// `current` is the existing pitch in radians, `delta` the desired change.
/// The result is clamped to `[min, max]` and the *effective* delta is returned
/// (i.e. how much to actually rotate).
pub fn clamp_pitch(current: f32, delta: f32, min: f32, max: f32) -> f32 {
    let clamped = (current + delta).clamp(min, max);
    clamped - current
}

/// Sinusoidal pulse between `min` and `max`, completing `speed` cycles per second.
pub fn pulse(time_secs: f32, speed: f32, min: f32, max: f32) -> f32 {
    let phase = 0.5 + 0.5 * (time_secs * speed * TAU).sin();
    min + (max - min) * phase
}

/// Axis-aligned rectangle on the ground plane, used as an area trigger.
///
/// Bounds are exclusive: a point exactly on an edge is outside.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct AreaBounds {
    /// Lower X bound.
    pub min_x: f32,
    /// Upper X bound.
    pub max_x: f32,
    /// Lower Z bound.
    pub min_z: f32,
    /// Upper Z bound.
    pub max_z: f32,
}

impl AreaBounds {
    /// Builds bounds from two opposite corners given as `(x, z)`.
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Whether the ground position `(x, z)` lies strictly inside.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x > self.min_x && x < self.max_x && z > self.min_z && z < self.max_z
    }

    /// Centre of the rectangle as `(x, z)`.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Extent of the rectangle along X and Z.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.max_x - self.min_x, self.max_z - self.min_z)
    }

    /// The four corners at height `y`, in winding order.
    pub fn corners(&self, y: f32) -> [Vec3; 4] {
        [
            Vec3::new(self.min_x, y, self.min_z),
            Vec3::new(self.max_x, y, self.min_z),
            Vec3::new(self.max_x, y, self.max_z),
            Vec3::new(self.min_x, y, self.max_z),
        ]
    }
}
