//! Firefighting helicopter: flight state machine, bucket and rig visuals.
//!
//! [`controller::HelicopterController`] is plain Rust with no ECS access. The
//! plugin wraps one instance in the [`HeliRig`] resource, spawns the mesh rig
//! and copies the controller's pose onto it every frame. Ticking the
//! controller and feeding it commands is the `mission` plugin's job.

pub mod bucket;
pub mod controller;
mod entities;
mod systems;

pub use entities::{Helicopter, RigPart};

use bevy::prelude::*;

use crate::math::AreaBounds;
use bucket::BucketRates;
use controller::{HeliState, HelicopterController, MissionLog};

/// Kinematic constants, trigger zones and bucket rates for the helicopter.
///
/// Per-tick values assume the fixed simulation rate set in
/// [`MissionConfig`](crate::mission::MissionConfig).
#[derive(Resource, Clone, Debug, Reflect)]
pub struct HeliConfig {
    /// Top cruise speed at speed factor 1, in units per millisecond.
    pub base_speed: f32,
    /// Initial speed multiplier.
    pub speed_factor: f32,
    /// Initial cruising height above the heliport.
    pub cruising_height: f32,
    /// Whether the bucket is mounted at startup.
    pub has_bucket: bool,
    /// Main rotor top speed in radians per millisecond; the tail spins twice as fast.
    pub max_rotor_speed: f32,
    /// Takeoff rotor spin-up progress per tick.
    pub rotor_spinup: f32,
    /// Main rotor spin-down at rest, per millisecond.
    pub rotor_decay: f32,
    /// Fully deployed rope length.
    pub rope_length: f32,
    /// Rope travel per tick.
    pub rope_speed: f32,
    /// Takeoff climb and landing descent per tick.
    pub vertical_speed: f32,
    /// Altitude correction per tick in `adjusting_height`.
    pub height_adjust_speed: f32,
    /// Allowed drift from cruising altitude before correcting.
    pub altitude_tolerance: f32,
    /// Horizontal travel per tick on the landing approach.
    pub landing_step: f32,
    /// Fraction of the heading error removed per landing tick.
    pub yaw_damping: f32,
    /// Largest nose pitch in radians.
    pub max_tilt: f32,
    /// Pitch easing rate per millisecond.
    pub tilt_speed: f32,
    /// Hover altitude while scooping water.
    pub fill_altitude: f32,
    /// Vertical speed per tick while descending to or climbing from the lake.
    pub fill_vertical_speed: f32,
    /// Longest Δt a single tick integrates, in milliseconds.
    pub max_step_ms: f32,
    /// Ground rectangle where `land` turns into a lake pickup.
    pub lake_bounds: AreaBounds,
    /// Ground rectangle where water can be dropped on the fire.
    pub fire_bounds: AreaBounds,
    /// Water-drop sequence rates.
    pub bucket: BucketRates,
}

impl Default for HeliConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.01,
            speed_factor: 1.0,
            cruising_height: 6.0,
            has_bucket: true,
            max_rotor_speed: 0.01,
            rotor_spinup: 0.5,
            rotor_decay: 0.0001,
            rope_length: 5.0,
            rope_speed: 0.05,
            vertical_speed: 0.1,
            height_adjust_speed: 0.05,
            altitude_tolerance: 0.1,
            landing_step: 0.2,
            yaw_damping: 0.1,
            max_tilt: 0.15,
            tilt_speed: 0.005,
            fill_altitude: 5.0,
            fill_vertical_speed: 0.3,
            max_step_ms: 1000.0,
            lake_bounds: AreaBounds::new(-56.0, -28.0, 14.0, 48.0),
            fire_bounds: AreaBounds::new(9.0, 40.0, 14.0, 35.0),
            bucket: BucketRates::default(),
        }
    }
}

/// The scene's helicopter, driven by the mission plugin.
#[derive(Resource, Deref, DerefMut)]
pub struct HeliRig(pub HelicopterController<MissionLog>);

/// Helicopter plugin: controller resource, mesh rig and pose sync.
pub struct HeliPlugin(pub HeliConfig);

impl Plugin for HeliPlugin {
    fn build(&self, app: &mut App) {
        let rig = HelicopterController::new(self.0.clone(), Vec3::ZERO, MissionLog::default());

        app.register_type::<HeliConfig>()
            .register_type::<HeliState>()
            .register_type::<Helicopter>()
            .register_type::<RigPart>()
            .insert_resource(self.0.clone())
            .insert_resource(HeliRig(rig))
            .add_systems(Startup, systems::spawn_rig)
            .add_systems(
                Update,
                (systems::follow_controller, systems::pose_bucket).chain(),
            );
    }
}
