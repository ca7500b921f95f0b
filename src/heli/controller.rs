//! Flight and mission state machine for the firefighting helicopter.
//!
//! One [`HelicopterController::update`] call is one simulation tick. Climbs,
//! rope travel and the landing approach advance by fixed per-tick steps, while
//! cruise position, rotor phase and tilt easing scale with the tick's Δt in
//! milliseconds. The controller never reaches into the scene: every state
//! change and the fire-out signal go through the injected [`MissionSink`].

use std::f32::consts::TAU;
use std::fmt;

use bevy::prelude::*;

use super::HeliConfig;
use super::bucket::BucketController;
use crate::math;

/// Forward speed below which the airframe is considered level.
const TILT_DEADBAND: f32 = 0.001;
/// Distance to the pad under which landing no longer pitches toward it.
const LANDING_TILT_RANGE: f32 = 0.1;
/// Descent starts this many landing steps away from the pad.
const DESCENT_STEPS: f32 = 5.0;

/// Flight mode. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum HeliState {
    /// Parked on the helipad, rotors spinning down.
    #[default]
    Resting,
    /// Vertical climb from the pad to cruising altitude.
    TakingOff,
    /// Hovering while the bucket rope pays out.
    BucketDeploy,
    /// Climbing or sinking back to cruising altitude.
    AdjustingHeight,
    /// Cruise under player control.
    Flying,
    /// Hovering while the bucket rope is reeled in before touchdown.
    BucketRetract,
    /// Approach and descent onto the helipad.
    Landing,
    /// Low hover over the lake, scooping water.
    Filling,
    /// Climb back to cruise with a full bucket.
    RiseAfterFill,
    /// Stationary hover while the bucket empties over the fire.
    PutFire,
}

impl HeliState {
    /// Every state, in declaration order.
    pub const ALL: [HeliState; 10] = [
        HeliState::Resting,
        HeliState::TakingOff,
        HeliState::BucketDeploy,
        HeliState::AdjustingHeight,
        HeliState::Flying,
        HeliState::BucketRetract,
        HeliState::Landing,
        HeliState::Filling,
        HeliState::RiseAfterFill,
        HeliState::PutFire,
    ];

    /// Snake-case name shown in the HUD and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            HeliState::Resting => "resting",
            HeliState::TakingOff => "taking_off",
            HeliState::BucketDeploy => "bucket_deploy",
            HeliState::AdjustingHeight => "adjusting_height",
            HeliState::Flying => "flying",
            HeliState::BucketRetract => "bucket_retract",
            HeliState::Landing => "landing",
            HeliState::Filling => "filling",
            HeliState::RiseAfterFill => "rise_after_fill",
            HeliState::PutFire => "put_fire",
        }
    }

    /// States during which the helipad maneuver lights pulse.
    pub fn is_maneuvering(self) -> bool {
        matches!(
            self,
            HeliState::TakingOff
                | HeliState::Landing
                | HeliState::BucketDeploy
                | HeliState::BucketRetract
        )
    }
}

impl fmt::Display for HeliState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for the controller's outbound notifications.
pub trait MissionSink {
    /// Called once per state transition, including the one made by `reset`.
    fn state_changed(&mut self, from: HeliState, to: HeliState);
    /// Called once when a water drop puts the fire out.
    fn fire_extinguished(&mut self);
}

/// Notification emitted by the controller, forwarded to the scene as a message.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionEvent {
    /// The flight state changed.
    StateChanged {
        /// Previous state.
        from: HeliState,
        /// New state.
        to: HeliState,
    },
    /// The fire under the helicopter was put out.
    FireExtinguished,
}

/// Outbox sink: buffers events until the scene drains them.
#[derive(Debug, Default)]
pub struct MissionLog {
    events: Vec<MissionEvent>,
}

impl MissionLog {
    /// Events recorded since the last drain, oldest first.
    pub fn events(&self) -> &[MissionEvent] {
        &self.events
    }

    /// Removes and yields all buffered events.
    pub fn drain(&mut self) -> impl Iterator<Item = MissionEvent> + '_ {
        self.events.drain(..)
    }
}

impl MissionSink for MissionLog {
    fn state_changed(&mut self, from: HeliState, to: HeliState) {
        self.events.push(MissionEvent::StateChanged { from, to });
    }

    fn fire_extinguished(&mut self) {
        self.events.push(MissionEvent::FireExtinguished);
    }
}

/// The helicopter: kinematics, rotor animation, mission state and its bucket.
pub struct HelicopterController<S: MissionSink = MissionLog> {
    cfg: HeliConfig,
    sink: S,
    state: HeliState,
    position: Vec3,
    angle_yy: f32,
    tilt_angle_x: f32,
    /// Ground-plane velocity `(x, z)` in units per millisecond.
    velocity: Vec2,
    main_rotor_speed: f32,
    tail_rotor_speed: f32,
    main_rotor_angle: f32,
    tail_rotor_angle: f32,
    takeoff_progress: f32,
    heliport: Vec3,
    cruising_height: f32,
    speed_factor: f32,
    has_bucket: bool,
    current_rope_length: f32,
    is_over_lake: bool,
    is_over_fire: bool,
    is_fire_on: bool,
    bucket: BucketController,
}

impl<S: MissionSink> HelicopterController<S> {
    /// A helicopter resting on the pad at `heliport`.
    pub fn new(cfg: HeliConfig, heliport: Vec3, sink: S) -> Self {
        let mut controller = Self {
            bucket: BucketController::new(cfg.bucket.clone()),
            cruising_height: cfg.cruising_height,
            speed_factor: cfg.speed_factor,
            has_bucket: cfg.has_bucket,
            cfg,
            sink,
            state: HeliState::Resting,
            position: heliport,
            angle_yy: 0.0,
            tilt_angle_x: 0.0,
            velocity: Vec2::ZERO,
            main_rotor_speed: 0.0,
            tail_rotor_speed: 0.0,
            main_rotor_angle: 0.0,
            tail_rotor_angle: 0.0,
            takeoff_progress: 0.0,
            heliport,
            current_rope_length: 0.0,
            is_over_lake: false,
            is_over_fire: false,
            is_fire_on: true,
        };
        controller.update_area_flags();
        controller
    }

    // ── Tick ───────────────────────────────────────────────────────

    /// Advances the simulation by one tick of `delta_ms` milliseconds.
    pub fn update(&mut self, delta_ms: f32) {
        let dt = if delta_ms.is_finite() {
            delta_ms.clamp(0.0, self.cfg.max_step_ms)
        } else {
            0.0
        };

        self.update_tilt(dt);
        if let Some(next) = self.step(dt) {
            self.transition(next);
        }
        self.update_rotors(dt);
        self.update_area_flags();
    }

    fn step(&mut self, dt: f32) -> Option<HeliState> {
        match self.state {
            HeliState::Resting => {
                self.main_rotor_speed = (self.main_rotor_speed - self.cfg.rotor_decay * dt).max(0.0);
                self.tail_rotor_speed =
                    (self.tail_rotor_speed - 2.0 * self.cfg.rotor_decay * dt).max(0.0);
                None
            }
            HeliState::TakingOff => self.step_taking_off(),
            HeliState::BucketDeploy => self.step_bucket_deploy(),
            HeliState::AdjustingHeight => self.step_adjusting_height(),
            HeliState::Flying => self.step_flying(dt),
            HeliState::BucketRetract => self.step_bucket_retract(),
            HeliState::Landing => self.step_landing(dt),
            HeliState::Filling => self.step_filling(),
            HeliState::RiseAfterFill => self.step_rise_after_fill(),
            HeliState::PutFire => self.step_put_fire(),
        }
    }

    fn step_taking_off(&mut self) -> Option<HeliState> {
        self.takeoff_progress = (self.takeoff_progress + self.cfg.rotor_spinup).min(1.0);
        self.set_rotor_power(self.takeoff_progress);
        self.position.y += self.cfg.vertical_speed;

        let altitude = self.cruising_altitude();
        if self.position.y >= altitude {
            self.position.y = altitude;
            return Some(if self.has_bucket {
                HeliState::BucketDeploy
            } else {
                HeliState::Flying
            });
        }
        None
    }

    fn step_bucket_deploy(&mut self) -> Option<HeliState> {
        self.set_rotor_power(1.0);
        let rope_length = self.cfg.rope_length;
        if !self.has_bucket || self.current_rope_length >= rope_length {
            return Some(HeliState::Flying);
        }
        self.current_rope_length = (self.current_rope_length + self.cfg.rope_speed).min(rope_length);
        (self.current_rope_length >= rope_length).then_some(HeliState::Flying)
    }

    fn step_bucket_retract(&mut self) -> Option<HeliState> {
        self.set_rotor_power(1.0);
        if !self.has_bucket || self.current_rope_length <= 0.0 {
            self.current_rope_length = 0.0;
            return Some(HeliState::Landing);
        }
        self.current_rope_length = (self.current_rope_length - self.cfg.rope_speed).max(0.0);
        (self.current_rope_length <= 0.0).then_some(HeliState::Landing)
    }

    fn step_adjusting_height(&mut self) -> Option<HeliState> {
        self.set_rotor_power(1.0);
        let altitude = self.cruising_altitude();
        let diff = altitude - self.position.y;
        if diff.abs() > self.cfg.altitude_tolerance {
            self.position.y += self.cfg.height_adjust_speed * diff.signum();
            None
        } else {
            self.position.y = altitude;
            debug!("height adjustment complete at {altitude:.2}");
            Some(HeliState::Flying)
        }
    }

    fn step_flying(&mut self, dt: f32) -> Option<HeliState> {
        self.set_rotor_power(1.0);
        if self.has_bucket {
            self.current_rope_length = self.cfg.rope_length;
        }

        let altitude = self.cruising_altitude();
        if (altitude - self.position.y).abs() > self.cfg.altitude_tolerance {
            debug!("drifted off cruise: y {:.2}, target {altitude:.2}", self.position.y);
            return Some(HeliState::AdjustingHeight);
        }

        self.position.x += self.velocity.x * dt;
        self.position.z += self.velocity.y * dt;
        None
    }

    fn step_landing(&mut self, dt: f32) -> Option<HeliState> {
        let ground = self.heliport.y;
        let altitude_range = self.cruising_altitude() - ground;
        let landing_progress = if altitude_range > 0.0 {
            ((self.position.y - ground) / altitude_range).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.set_rotor_power(landing_progress);

        let step = self.cfg.landing_step;
        let to_pad = Vec2::new(
            self.heliport.x - self.position.x,
            self.heliport.z - self.position.z,
        );
        let distance = to_pad.length();

        if distance > step {
            let travel = to_pad / distance * step;
            self.position.x += travel.x;
            self.position.z += travel.y;
            self.velocity = if dt > 0.0 { travel / dt } else { Vec2::ZERO };

            let target_yaw = (-travel.y).atan2(travel.x);
            let diff = math::wrap_angle(target_yaw - self.angle_yy);
            self.angle_yy = math::wrap_angle(self.angle_yy + diff * self.cfg.yaw_damping);
        } else {
            self.position.x = self.heliport.x;
            self.position.z = self.heliport.z;
            self.velocity = Vec2::ZERO;
        }

        let descent_radius = step * DESCENT_STEPS;
        if distance <= descent_radius && self.position.y > ground {
            if self.has_bucket && self.current_rope_length > 0.0 {
                return Some(HeliState::BucketRetract);
            }
            let factor = if descent_radius > 0.0 {
                1.0 - distance / descent_radius
            } else {
                1.0
            };
            self.position.y = (self.position.y - self.cfg.vertical_speed * factor).max(ground);
        }

        if distance <= step && self.position.y <= ground {
            self.position.y = ground;
            return Some(HeliState::Resting);
        }
        None
    }

    fn step_filling(&mut self) -> Option<HeliState> {
        self.set_rotor_power(1.0);
        if self.has_bucket {
            self.current_rope_length = self.cfg.rope_length;
        }
        if self.position.y > self.cfg.fill_altitude {
            self.position.y =
                (self.position.y - self.cfg.fill_vertical_speed).max(self.cfg.fill_altitude);
        }
        None
    }

    fn step_rise_after_fill(&mut self) -> Option<HeliState> {
        self.set_rotor_power(1.0);
        if self.has_bucket {
            self.current_rope_length = self.cfg.rope_length;
        }
        self.position.y += self.cfg.fill_vertical_speed;

        let altitude = self.cruising_altitude();
        if self.position.y >= altitude {
            self.position.y = altitude;
            self.velocity = Vec2::ZERO;
            return Some(HeliState::Flying);
        }
        None
    }

    fn step_put_fire(&mut self) -> Option<HeliState> {
        self.set_rotor_power(1.0);
        let progress = self.bucket.update_water_drop();

        if progress.fire_extinguished && self.is_fire_on {
            self.is_fire_on = false;
            info!("fire extinguished");
            self.sink.fire_extinguished();
        }
        progress.water_drop_complete.then_some(HeliState::Flying)
    }

    /// Applies entry actions for `next` and notifies the sink.
    fn transition(&mut self, next: HeliState) {
        let from = self.state;
        if from == next {
            return;
        }
        self.state = next;

        match next {
            HeliState::TakingOff => self.takeoff_progress = 0.0,
            HeliState::RiseAfterFill if self.has_bucket => self.bucket.fill(),
            HeliState::PutFire => {
                self.velocity = Vec2::ZERO;
                self.bucket.start_water_drop();
            }
            HeliState::Flying if from == HeliState::PutFire => {
                self.bucket.empty();
                if !self.has_bucket {
                    self.current_rope_length = 0.0;
                }
            }
            HeliState::Resting => self.velocity = Vec2::ZERO,
            _ => {}
        }

        info!("helicopter {from} -> {next}");
        self.sink.state_changed(from, next);
    }

    fn set_rotor_power(&mut self, power: f32) {
        self.main_rotor_speed = self.cfg.max_rotor_speed * power;
        self.tail_rotor_speed = self.cfg.max_rotor_speed * 2.0 * power;
    }

    fn update_rotors(&mut self, dt: f32) {
        self.main_rotor_angle = (self.main_rotor_angle + dt * self.main_rotor_speed).rem_euclid(TAU);
        self.tail_rotor_angle = (self.tail_rotor_angle + dt * self.tail_rotor_speed).rem_euclid(TAU);
    }

    fn update_tilt(&mut self, dt: f32) {
        let fraction = self.cfg.tilt_speed * dt;
        match self.state {
            HeliState::Flying => {
                let forward_velocity = self.velocity.dot(self.forward());
                let max_speed = self.max_speed();
                let target = if forward_velocity.abs() > TILT_DEADBAND && max_speed > 0.0 {
                    let ratio = (forward_velocity.abs() / max_speed).min(1.0);
                    -forward_velocity.signum() * self.cfg.max_tilt * ratio
                } else {
                    0.0
                };
                self.tilt_angle_x = math::damped_approach(self.tilt_angle_x, target, fraction);
            }
            HeliState::Landing => {
                let to_pad = Vec2::new(
                    self.heliport.x - self.position.x,
                    self.heliport.z - self.position.z,
                );
                let distance = to_pad.length();
                if distance > LANDING_TILT_RANGE && (to_pad / distance).dot(self.forward()) > 0.0 {
                    let target = -self.cfg.max_tilt * 0.5;
                    self.tilt_angle_x = math::damped_approach(self.tilt_angle_x, target, fraction);
                }
            }
            _ => self.tilt_angle_x = 0.0,
        }
    }

    fn update_area_flags(&mut self) {
        let (x, z) = (self.position.x, self.position.z);
        let over_lake = self.cfg.lake_bounds.contains(x, z);
        let over_fire = self.cfg.fire_bounds.contains(x, z);
        if over_lake != self.is_over_lake {
            debug!("over lake: {over_lake}");
        }
        if over_fire != self.is_over_fire {
            debug!("over fire: {over_fire}");
        }
        self.is_over_lake = over_lake;
        self.is_over_fire = over_fire;
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Lifts off from the pad, or climbs out of the lake with a full bucket.
    ///
    /// Returns whether the command was accepted.
    pub fn take_off(&mut self) -> bool {
        match self.state {
            HeliState::Resting => self.transition(HeliState::TakingOff),
            HeliState::Filling => self.transition(HeliState::RiseAfterFill),
            other => {
                debug!("take off ignored while {other}");
                return false;
            }
        }
        true
    }

    /// Starts the landing approach, or a lake pickup when hovering over the
    /// lake with an empty bucket. Only valid while flying.
    pub fn land(&mut self) -> bool {
        if self.state != HeliState::Flying {
            debug!("land ignored while {}", self.state);
            return false;
        }
        if self.is_over_lake && self.has_bucket && self.bucket.is_empty() {
            self.transition(HeliState::Filling);
        } else {
            self.transition(HeliState::Landing);
        }
        true
    }

    /// Opens the bucket over the fire. Only valid while flying over the fire
    /// zone with water in the bucket.
    pub fn put_fire(&mut self) -> bool {
        let ready = self.state == HeliState::Flying
            && self.has_bucket
            && !self.bucket.is_empty()
            && self.is_over_fire;
        if !ready {
            debug!(
                "water drop ignored: state {}, bucket empty {}, over fire {}",
                self.state,
                self.bucket.is_empty(),
                self.is_over_fire
            );
            return false;
        }
        self.transition(HeliState::PutFire);
        true
    }

    /// Rotates the heading by `delta` radians, carrying the current speed
    /// along the new heading in the same travel direction.
    ///
    /// Reverse travel stays reversed: a helicopter backing up keeps backing
    /// up along the new heading instead of being flipped to forward flight.
    pub fn turn(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let speed = self.velocity.length();
        let sense = if self.velocity.dot(self.forward()) < 0.0 {
            -1.0
        } else {
            1.0
        };

        self.angle_yy = math::wrap_angle(self.angle_yy + delta);
        if speed > 0.0 {
            self.velocity = self.forward() * speed * sense;
        }
    }

    /// Changes the signed forward speed by `delta` (units per millisecond).
    ///
    /// Speeding up is only allowed while flying; braking and reversing are
    /// always allowed. The result is clamped to `±base_speed × speed_factor`.
    pub fn accelerate(&mut self, delta: f32) {
        if !delta.is_finite() || (self.state != HeliState::Flying && delta > 0.0) {
            return;
        }

        let speed = self.velocity.length();
        let max_speed = self.max_speed();
        let forward = self.forward();
        let direction = if speed > 0.0 {
            self.velocity.dot(forward) / speed
        } else {
            1.0
        };

        let new_speed = (speed * sign(direction) + delta).clamp(-max_speed, max_speed);

        if speed > 0.0 && sign(direction) == sign(new_speed) {
            self.velocity *= new_speed.abs() / speed;
        } else {
            self.velocity = forward * new_speed;
        }
    }

    /// Puts the helicopter back on the pad, parked, with an empty stowed bucket.
    pub fn reset(&mut self) {
        let from = self.state;
        self.state = HeliState::Resting;
        self.position = self.heliport;
        self.angle_yy = 0.0;
        self.tilt_angle_x = 0.0;
        self.velocity = Vec2::ZERO;
        self.main_rotor_speed = 0.0;
        self.tail_rotor_speed = 0.0;
        self.takeoff_progress = 0.0;
        self.current_rope_length = 0.0;
        self.bucket.empty();
        self.update_area_flags();

        info!("helicopter reset ({from} -> resting)");
        self.sink.state_changed(from, HeliState::Resting);
    }

    // ── Configuration ──────────────────────────────────────────────

    /// Multiplier on the base cruise speed. Negative values are treated as zero.
    pub fn set_speed_factor(&mut self, speed_factor: f32) {
        self.speed_factor = speed_factor.max(0.0);
    }

    /// Cruising height above the heliport. Flying picks up the change on the
    /// next tick through `adjusting_height`.
    pub fn set_cruising_height(&mut self, cruising_height: f32) {
        if cruising_height.is_finite() {
            self.cruising_height = cruising_height;
        }
    }

    /// Moves the landing pad. A resting helicopter is carried along.
    pub fn set_heliport_position(&mut self, heliport: Vec3) {
        if !heliport.is_finite() {
            return;
        }
        self.heliport = heliport;
        if self.state == HeliState::Resting {
            self.position = heliport;
            self.update_area_flags();
        }
    }

    /// Mounts or removes the bucket. Removing it drops rope and water.
    ///
    /// A drop already under way finishes first; rope and water are stowed
    /// when the helicopter leaves `PutFire`.
    pub fn set_bucket(&mut self, has_bucket: bool) {
        self.has_bucket = has_bucket;
        if !has_bucket && self.state != HeliState::PutFire {
            self.current_rope_length = 0.0;
            self.bucket.empty();
        }
    }

    /// Lights or clears the fire without a water drop.
    pub fn set_fire_on(&mut self, on: bool) {
        self.is_fire_on = on;
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Current flight mode.
    pub fn state(&self) -> HeliState {
        self.state
    }

    /// World position of the fuselage centre.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Heading in radians, in `(-PI, PI]`. Zero points along +X.
    pub fn angle_yy(&self) -> f32 {
        self.angle_yy
    }

    /// Nose pitch in radians; negative is nose-down.
    pub fn tilt_angle_x(&self) -> f32 {
        self.tilt_angle_x
    }

    /// Main rotor phase in `[0, TAU)`.
    pub fn main_rotor_angle(&self) -> f32 {
        self.main_rotor_angle
    }

    /// Tail rotor phase in `[0, TAU)`.
    pub fn tail_rotor_angle(&self) -> f32 {
        self.tail_rotor_angle
    }

    /// Main rotor angular speed in radians per millisecond.
    pub fn main_rotor_speed(&self) -> f32 {
        self.main_rotor_speed
    }

    /// Ground-plane velocity `(x, z)` in units per millisecond.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether the last tick ended over the lake zone.
    pub fn is_over_lake(&self) -> bool {
        self.is_over_lake
    }

    /// Whether the last tick ended over the fire zone.
    pub fn is_over_fire(&self) -> bool {
        self.is_over_fire
    }

    /// Whether the bucket holds no water.
    pub fn is_bucket_empty(&self) -> bool {
        self.bucket.is_empty()
    }

    /// Whether the fire is still burning.
    pub fn is_fire_on(&self) -> bool {
        self.is_fire_on
    }

    /// Whether the bucket is mounted.
    pub fn has_bucket(&self) -> bool {
        self.has_bucket
    }

    /// Rope paid out right now.
    pub fn current_rope_length(&self) -> f32 {
        self.current_rope_length
    }

    /// Rope length when fully deployed.
    pub fn rope_length(&self) -> f32 {
        self.cfg.rope_length
    }

    /// Absolute cruise altitude: heliport height plus cruising height.
    pub fn cruising_altitude(&self) -> f32 {
        self.heliport.y + self.cruising_height
    }

    /// Cruising height above the heliport.
    pub fn cruising_height(&self) -> f32 {
        self.cruising_height
    }

    /// Current speed multiplier.
    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    /// Top speed in units per millisecond.
    pub fn max_speed(&self) -> f32 {
        self.cfg.base_speed * self.speed_factor
    }

    /// Landing pad position.
    pub fn heliport(&self) -> Vec3 {
        self.heliport
    }

    /// The slung bucket.
    pub fn bucket(&self) -> &BucketController {
        &self.bucket
    }

    /// Constants this controller was built with.
    pub fn config(&self) -> &HeliConfig {
        &self.cfg
    }

    /// The notification receiver.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the notification receiver, e.g. to drain it.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Unit heading on the ground plane as `(x, z)`.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.angle_yy.cos(), -self.angle_yy.sin())
    }
}

/// Three-way sign where zero maps to zero.
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
