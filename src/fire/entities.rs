use bevy::prelude::*;

/// Parent of every flame; its visibility switches the whole fire.
#[derive(Component, Reflect)]
pub struct FireRoot;

/// One flame and its animation parameters.
#[derive(Component, Reflect, Clone, Debug, PartialEq)]
pub struct Flame {
    /// Height at rest.
    pub height: f32,
    /// Base width.
    pub width: f32,
    /// Facing about the vertical axis.
    pub angle: f32,
    /// Animation phase offset.
    pub phase: f32,
    /// Flicker rate.
    pub speed: f32,
    /// Ground offset from the fire centre as `(x, z)`.
    pub offset: Vec2,
    /// Peak sway angle in radians.
    pub sway_amplitude: f32,
    /// Sway rate in radians per second.
    pub sway_frequency: f32,
    /// Member of the small population.
    pub small: bool,
}
