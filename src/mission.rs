//! Scene orchestrator.
//!
//! Owns the fixed simulation tick: held flight controls and
//! [`HelicopterController::update`](crate::heli::controller::HelicopterController::update)
//! run in `FixedUpdate`, one-shot commands are read every frame. Controller
//! notifications are drained from the [`HeliRig`](crate::heli::HeliRig)
//! outbox and re-emitted as [`MissionEvent`] messages for the building, fire
//! and HUD to react to. [`SceneSettings`] holds the values the control panel
//! edits; changes are pushed into the controller through its setters.

mod systems;

use std::ops::RangeInclusive;

use bevy::prelude::*;

use crate::GameState;
use crate::camera::FovPreset;
use crate::heli::HeliConfig;
use crate::heli::controller::{HelicopterController, MissionEvent, MissionSink};

/// Slider range for the cruising height.
pub const CRUISING_HEIGHT_RANGE: RangeInclusive<f32> = 5.0..=15.0;
/// Slider range for the speed factor.
pub const SPEED_FACTOR_RANGE: RangeInclusive<f32> = 0.1..=3.0;

/// Simulation rate and control step sizes.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct MissionConfig {
    /// Controller ticks per second.
    pub tick_hz: f64,
    /// Speed change per tick while W or S is held, in units per millisecond.
    pub accelerate_step: f32,
    /// Heading change per tick while A or D is held, in radians.
    pub turn_step: f32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            tick_hz: 20.0,
            accelerate_step: 0.0005,
            turn_step: 0.05,
        }
    }
}

/// Runtime-adjustable scene options, edited from the control panel.
#[derive(Resource, Clone, Debug, PartialEq, Reflect)]
pub struct SceneSettings {
    /// Bucket mounted under the helicopter.
    pub has_bucket: bool,
    /// Cruising height above the heliport.
    pub cruising_height: f32,
    /// Multiplier on the top cruise speed.
    pub speed_factor: f32,
    /// Whether the fire burns.
    pub fires_enabled: bool,
    /// Camera field of view.
    pub fov: FovPreset,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self::from_config(&HeliConfig::default())
    }
}

impl SceneSettings {
    /// Settings matching a helicopter's initial configuration.
    pub fn from_config(cfg: &HeliConfig) -> Self {
        Self {
            has_bucket: cfg.has_bucket,
            cruising_height: cfg
                .cruising_height
                .clamp(*CRUISING_HEIGHT_RANGE.start(), *CRUISING_HEIGHT_RANGE.end()),
            speed_factor: cfg
                .speed_factor
                .clamp(*SPEED_FACTOR_RANGE.start(), *SPEED_FACTOR_RANGE.end()),
            fires_enabled: true,
            fov: FovPreset::default(),
        }
    }

    /// Pushes every field that differs from `previous` into the controller.
    /// With no previous settings, everything is applied.
    pub fn apply_to<S: MissionSink>(
        &self,
        previous: Option<&SceneSettings>,
        controller: &mut HelicopterController<S>,
    ) {
        let differs = |field: fn(&SceneSettings) -> f32| {
            previous.is_none_or(|prev| field(prev) != field(self))
        };

        if previous.is_none_or(|prev| prev.has_bucket != self.has_bucket) {
            debug!("bucket mounted: {}", self.has_bucket);
            controller.set_bucket(self.has_bucket);
        }
        if differs(|s| s.cruising_height) {
            debug!("cruising height {:.1}", self.cruising_height);
            controller.set_cruising_height(self.cruising_height);
        }
        if differs(|s| s.speed_factor) {
            debug!("speed factor {:.2}", self.speed_factor);
            controller.set_speed_factor(self.speed_factor);
        }
        if previous.is_none_or(|prev| prev.fires_enabled != self.fires_enabled) {
            debug!("fire enabled: {}", self.fires_enabled);
            controller.set_fire_on(self.fires_enabled);
        }
    }
}

/// Keyboard commands, fixed-rate simulation and mission event fan-out.
pub struct MissionPlugin(pub MissionConfig);

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<MissionConfig>()
            .register_type::<SceneSettings>()
            .insert_resource(self.0.clone())
            .insert_resource(Time::<Fixed>::from_hz(self.0.tick_hz))
            .init_resource::<SceneSettings>()
            .add_message::<MissionEvent>()
            .add_systems(
                Update,
                (
                    systems::apply_settings.run_if(resource_changed::<SceneSettings>),
                    systems::handle_commands.run_if(in_state(GameState::Running)),
                    systems::publish_events,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::apply_held_controls.run_if(in_state(GameState::Running)),
                    systems::tick_controller,
                    systems::publish_events,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heli::controller::MissionLog;

    fn controller() -> HelicopterController {
        HelicopterController::new(HeliConfig::default(), Vec3::ZERO, MissionLog::default())
    }

    // ── SceneSettings ──────────────────────────────────────────────

    #[test]
    fn defaults_follow_heli_config() {
        let settings = SceneSettings::default();
        let cfg = HeliConfig::default();
        assert_eq!(settings.has_bucket, cfg.has_bucket);
        assert_eq!(settings.cruising_height, cfg.cruising_height);
        assert!(settings.fires_enabled);
    }

    #[test]
    fn from_config_clamps_into_slider_ranges() {
        let cfg = HeliConfig {
            cruising_height: 40.0,
            speed_factor: 0.0,
            ..HeliConfig::default()
        };
        let settings = SceneSettings::from_config(&cfg);
        assert_eq!(settings.cruising_height, 15.0);
        assert_eq!(settings.speed_factor, 0.1);
    }

    #[test]
    fn first_apply_pushes_everything() {
        let mut ctl = controller();
        let settings = SceneSettings {
            has_bucket: false,
            cruising_height: 12.0,
            speed_factor: 2.0,
            fires_enabled: false,
            fov: FovPreset::Wide,
        };
        settings.apply_to(None, &mut ctl);
        assert!(!ctl.has_bucket());
        assert!((ctl.cruising_altitude() - 12.0).abs() < 1e-6);
        assert!((ctl.max_speed() - 0.02).abs() < 1e-6);
        assert!(!ctl.is_fire_on());
    }

    #[test]
    fn unchanged_fire_flag_does_not_relight_extinguished_fire() {
        let mut ctl = controller();
        let before = SceneSettings::default();
        before.apply_to(None, &mut ctl);
        ctl.set_fire_on(false);

        let after = SceneSettings {
            speed_factor: 2.5,
            ..before.clone()
        };
        after.apply_to(Some(&before), &mut ctl);
        assert!(!ctl.is_fire_on());
        assert!((ctl.speed_factor() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn re_enabling_fire_relights_it() {
        let mut ctl = controller();
        let off = SceneSettings {
            fires_enabled: false,
            ..SceneSettings::default()
        };
        off.apply_to(None, &mut ctl);
        let on = SceneSettings {
            fires_enabled: true,
            ..off.clone()
        };
        on.apply_to(Some(&off), &mut ctl);
        assert!(ctl.is_fire_on());
    }
}
