use bevy::prelude::*;

/// Root of the helicopter rig. Carries position and heading only.
#[derive(Component, Reflect)]
pub struct Helicopter;

/// Child pieces of the rig that the pose systems move individually.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq)]
pub enum RigPart {
    /// Airframe pivot; takes the nose pitch.
    Airframe,
    /// Main rotor hub and blades.
    MainRotor,
    /// Tail rotor hub and blades.
    TailRotor,
    /// Rope between the anchor and the bucket handle.
    Rope,
    /// Bucket shell.
    BucketBody,
    /// Water surface inside the bucket.
    BucketWater,
    /// Closed bucket floor.
    SolidBottom,
    /// One trapdoor half; `side` is `-1.0` or `1.0` along local X.
    BottomHalf {
        /// Which side of the hinge line this half sits on.
        side: f32,
    },
    /// Falling water column.
    WaterColumn,
    /// Ground splash disc.
    Splash,
}
