use bevy::prelude::*;

/// Root of one figure.
#[derive(Component, Reflect)]
pub struct Person {
    /// Arms raised and waving.
    pub arms_up: bool,
    /// Animation phase so figures move out of step.
    pub phase: f32,
}

/// Animated part of a figure.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonPart {
    /// Bobs.
    Head,
    /// Pivot the left arm hangs from.
    LeftShoulder,
    /// Pivot the right arm hangs from.
    RightShoulder,
}
