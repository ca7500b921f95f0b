//! Water bucket slung under the helicopter.
//!
//! The bucket knows nothing about the aircraft transform. The owning
//! [`HelicopterController`](super::controller::HelicopterController) fills it,
//! starts drops and ticks the drop sequence; the rig systems only read
//! [`BucketController::display`].

use bevy::prelude::*;

/// Radius of the bucket body.
pub const BUCKET_RADIUS: f32 = 0.8;
/// Height of the bucket body.
pub const BUCKET_HEIGHT: f32 = 1.2;
/// How far the falling water column reaches below the bucket when fully dropped.
pub const WATER_FALL_DISTANCE: f32 = 12.0;
/// Rope fraction below which only the rope is shown.
pub const BODY_VISIBLE_ROPE_FRACTION: f32 = 0.25;

/// Per-tick increments for the water-drop sequence.
#[derive(Clone, Debug, Reflect)]
pub struct BucketRates {
    /// Trapdoor opening progress per tick.
    pub trapdoor: f32,
    /// Water column fall progress per tick.
    pub fall: f32,
    /// Water surface drop inside the bucket per tick while falling.
    pub water_level_drop: f32,
    /// Splash growth per tick once the column hits the ground.
    pub splash: f32,
    /// Falling-column fade per tick.
    pub fade: f32,
    /// Ground splash fade per tick.
    pub splash_fade: f32,
}

impl Default for BucketRates {
    fn default() -> Self {
        Self {
            trapdoor: 0.09,
            fall: 0.03,
            water_level_drop: 0.015,
            splash: 0.01,
            fade: 0.02,
            splash_fade: 0.02,
        }
    }
}

/// Outcome of one [`BucketController::update_water_drop`] tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaterDropProgress {
    /// The whole sequence finished and the bucket is empty again.
    pub water_drop_complete: bool,
    /// The falling column has faded out; the fire below is out.
    pub fire_extinguished: bool,
}

/// Water state of the bucket plus the drop animation progress.
#[derive(Clone, Debug)]
pub struct BucketController {
    rates: BucketRates,
    is_empty: bool,
    water_level: f32,
    bottom_open: f32,
    water_fall_progress: f32,
    water_splayed: f32,
    water_fading: bool,
    fade_progress: f32,
    fade_progress_splash: f32,
}

impl BucketController {
    /// An empty bucket with a closed trapdoor.
    pub fn new(rates: BucketRates) -> Self {
        Self {
            rates,
            is_empty: true,
            water_level: 0.0,
            bottom_open: 0.0,
            water_fall_progress: 0.0,
            water_splayed: 0.0,
            water_fading: false,
            fade_progress: 0.0,
            fade_progress_splash: 0.0,
        }
    }

    /// Scoops a full load of water.
    pub fn fill(&mut self) {
        self.is_empty = false;
        self.water_level = 0.0;
    }

    /// Clears the water and every drop-sequence field.
    pub fn empty(&mut self) {
        self.is_empty = true;
        self.water_level = 0.0;
        self.bottom_open = 0.0;
        self.water_fall_progress = 0.0;
        self.water_splayed = 0.0;
        self.water_fading = false;
        self.fade_progress = 0.0;
        self.fade_progress_splash = 0.0;
    }

    /// Rewinds the drop animation to its first frame.
    ///
    /// Callers must only start a drop on a filled bucket; this does not check.
    pub fn start_water_drop(&mut self) {
        self.bottom_open = 0.0;
        self.water_fall_progress = 0.0;
        self.water_splayed = 0.0;
        self.water_fading = false;
        self.fade_progress = 0.0;
        self.fade_progress_splash = 0.0;
    }

    /// Advances the drop by one tick.
    ///
    /// Phases run strictly in order: trapdoor, fall, splash, then the fade of
    /// the column followed by the fade of the splash. `fire_extinguished` is
    /// reported from the first tick after the column has faded until the end,
    /// and `water_drop_complete` only on the final tick.
    pub fn update_water_drop(&mut self) -> WaterDropProgress {
        let rates = &self.rates;
        let mut progress = WaterDropProgress::default();

        if self.bottom_open < 1.0 {
            self.bottom_open = (self.bottom_open + rates.trapdoor).min(1.0);
            return progress;
        }

        if self.water_fall_progress < 1.0 {
            self.water_fall_progress = (self.water_fall_progress + rates.fall).min(1.0);
            self.water_level -= rates.water_level_drop;
            return progress;
        }

        if self.water_splayed < 1.0 {
            self.water_splayed = (self.water_splayed + rates.splash).min(1.0);
            return progress;
        }

        if !self.water_fading {
            self.water_fading = true;
            self.fade_progress = 0.0;
            self.fade_progress_splash = 0.0;
            return progress;
        }

        if self.fade_progress < 1.0 {
            self.fade_progress = (self.fade_progress + rates.fade).min(1.0);
            return progress;
        }

        progress.fire_extinguished = true;
        self.fade_progress_splash = (self.fade_progress_splash + rates.splash_fade).min(1.0);
        if self.fade_progress_splash >= 1.0 {
            self.empty();
            progress.water_drop_complete = true;
        }
        progress
    }

    /// Computes what the rig should show for the given rope deployment.
    ///
    /// Returns `None` while the rope is stowed. Positions are relative to the
    /// rope anchor under the fuselage, with Y pointing up.
    pub fn display(
        &self,
        rope_length: f32,
        current_rope_length: f32,
        is_dropping: bool,
    ) -> Option<BucketPose> {
        if current_rope_length <= 0.0 {
            return None;
        }

        let show_body = current_rope_length >= rope_length * BODY_VISIBLE_ROPE_FRACTION;
        let body_center_y = -current_rope_length - BUCKET_HEIGHT / 2.0;
        let bottom_y = -current_rope_length - BUCKET_HEIGHT * 1.15;

        let bottom = if is_dropping {
            BucketBottom::Split {
                open_angle: self.bottom_open * std::f32::consts::FRAC_PI_2,
            }
        } else {
            BucketBottom::Solid
        };

        let water_fall = (is_dropping && (self.water_fall_progress > 0.0 || self.water_fading))
            .then(|| self.water_fall_pose(bottom_y));

        Some(BucketPose {
            rope_length: (current_rope_length - BUCKET_HEIGHT - 0.2).max(0.0),
            show_body,
            body_center_y,
            bottom_y,
            water: (show_body && !self.is_empty).then_some(self.water_level),
            bottom,
            water_fall,
        })
    }

    fn water_fall_pose(&self, top_y: f32) -> WaterFallPose {
        let length = WATER_FALL_DISTANCE * self.water_fall_progress;
        let end_radius = BUCKET_RADIUS * 1.5 * self.water_fall_progress;
        let column_fade = if self.water_fading {
            1.0 - self.fade_progress
        } else {
            1.0
        };
        let splash = (self.water_fall_progress >= 1.0).then(|| {
            let splash_fade = if self.water_fading {
                1.0 - self.fade_progress_splash
            } else {
                1.0
            };
            let base = end_radius * 1.8 * self.water_splayed;
            SplashPose {
                radius: base * (1.0 + 6.0 * self.water_splayed) * splash_fade,
                fade: splash_fade,
            }
        });
        WaterFallPose {
            top_y,
            length,
            radius: end_radius,
            fade: column_fade,
            splash,
        }
    }

    /// Whether the bucket carries no water.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Offset of the water surface from its full position (0 when full).
    pub fn water_level(&self) -> f32 {
        self.water_level
    }

    /// Trapdoor opening progress in `[0, 1]`.
    pub fn bottom_open(&self) -> f32 {
        self.bottom_open
    }

    /// Falling column progress in `[0, 1]`.
    pub fn water_fall_progress(&self) -> f32 {
        self.water_fall_progress
    }

    /// Ground splash growth in `[0, 1]`.
    pub fn water_splayed(&self) -> f32 {
        self.water_splayed
    }

    /// Whether the post-splash fade is running.
    pub fn water_fading(&self) -> bool {
        self.water_fading
    }

    /// Fade of the falling column in `[0, 1]`.
    pub fn fade_progress(&self) -> f32 {
        self.fade_progress
    }

    /// Fade of the ground splash in `[0, 1]`.
    pub fn fade_progress_splash(&self) -> f32 {
        self.fade_progress_splash
    }
}

/// Snapshot of the bucket rig for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketPose {
    /// Visible rope segment between the anchor and the bucket handle.
    pub rope_length: f32,
    /// Body, rim, handle and bottom are drawn only past a quarter deployment.
    pub show_body: bool,
    /// Y of the bucket body centre.
    pub body_center_y: f32,
    /// Y of the bucket floor.
    pub bottom_y: f32,
    /// Water surface offset when the bucket holds water.
    pub water: Option<f32>,
    /// Solid floor or the split trapdoor.
    pub bottom: BucketBottom,
    /// Falling water column, present while a drop is showing.
    pub water_fall: Option<WaterFallPose>,
}

/// Floor of the bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BucketBottom {
    /// Closed floor.
    Solid,
    /// Two halves swung open by `open_angle` radians.
    Split {
        /// Hinge angle of each half, `0` closed, `PI/2` fully open.
        open_angle: f32,
    },
}

/// Falling water column below the bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterFallPose {
    /// Y where the column leaves the bucket.
    pub top_y: f32,
    /// Column length.
    pub length: f32,
    /// Radius at the bottom of the column.
    pub radius: f32,
    /// Uniform scale applied while the column fades out.
    pub fade: f32,
    /// Ground splash once the column has landed.
    pub splash: Option<SplashPose>,
}

/// Ground splash under the water column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashPose {
    /// Splash disc radius.
    pub radius: f32,
    /// Uniform scale applied while the splash fades out.
    pub fade: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> BucketController {
        let mut bucket = BucketController::new(BucketRates::default());
        bucket.fill();
        bucket
    }

    /// Runs a full drop, returning `(first_extinguished_tick, complete_tick)`.
    fn run_drop(bucket: &mut BucketController) -> (Option<usize>, Option<usize>) {
        let mut first_extinguished = None;
        for tick in 0..10_000 {
            let p = bucket.update_water_drop();
            if p.fire_extinguished && first_extinguished.is_none() {
                first_extinguished = Some(tick);
            }
            if p.water_drop_complete {
                return (first_extinguished, Some(tick));
            }
        }
        (first_extinguished, None)
    }

    // ── fill / empty ────────────────────────────────────────────────

    #[test]
    fn new_bucket_is_empty() {
        let bucket = BucketController::new(BucketRates::default());
        assert!(bucket.is_empty());
        assert_eq!(bucket.water_level(), 0.0);
    }

    #[test]
    fn fill_marks_non_empty() {
        let bucket = filled();
        assert!(!bucket.is_empty());
        assert_eq!(bucket.water_level(), 0.0);
    }

    #[test]
    fn empty_is_idempotent() {
        let mut bucket = filled();
        bucket.start_water_drop();
        for _ in 0..60 {
            bucket.update_water_drop();
        }
        bucket.empty();
        let once = (
            bucket.is_empty(),
            bucket.bottom_open(),
            bucket.water_fall_progress(),
            bucket.water_level(),
        );
        bucket.empty();
        let twice = (
            bucket.is_empty(),
            bucket.bottom_open(),
            bucket.water_fall_progress(),
            bucket.water_level(),
        );
        assert_eq!(once, twice);
        assert_eq!(once, (true, 0.0, 0.0, 0.0));
    }

    // ── update_water_drop ───────────────────────────────────────────

    #[test]
    fn trapdoor_opens_before_water_falls() {
        let mut bucket = filled();
        bucket.start_water_drop();
        while bucket.bottom_open() < 1.0 {
            bucket.update_water_drop();
            if bucket.bottom_open() < 1.0 {
                assert_eq!(bucket.water_fall_progress(), 0.0);
            }
        }
        assert_eq!(bucket.bottom_open(), 1.0);
    }

    #[test]
    fn water_level_drops_while_falling() {
        let mut bucket = filled();
        bucket.start_water_drop();
        for _ in 0..20 {
            bucket.update_water_drop();
        }
        assert!(bucket.water_fall_progress() > 0.0);
        assert!(bucket.water_level() < 0.0);
    }

    #[test]
    fn fire_extinguished_strictly_before_complete() {
        let mut bucket = filled();
        bucket.start_water_drop();
        let (extinguished, complete) = run_drop(&mut bucket);
        let extinguished = extinguished.expect("fire never reported out");
        let complete = complete.expect("drop never completed");
        assert!(extinguished < complete);
    }

    #[test]
    fn drop_completion_empties_bucket() {
        let mut bucket = filled();
        bucket.start_water_drop();
        run_drop(&mut bucket);
        assert!(bucket.is_empty());
        assert!(!bucket.water_fading());
        assert_eq!(bucket.bottom_open(), 0.0);
        assert_eq!(bucket.fade_progress(), 0.0);
        assert_eq!(bucket.fade_progress_splash(), 0.0);
    }

    #[test]
    fn progress_fields_never_exceed_one() {
        let mut bucket = filled();
        bucket.start_water_drop();
        for _ in 0..400 {
            let p = bucket.update_water_drop();
            for v in [
                bucket.bottom_open(),
                bucket.water_fall_progress(),
                bucket.water_splayed(),
                bucket.fade_progress(),
                bucket.fade_progress_splash(),
            ] {
                assert!((0.0..=1.0).contains(&v));
            }
            if p.water_drop_complete {
                break;
            }
        }
    }

    #[test]
    fn start_water_drop_rewinds_partial_drop() {
        let mut bucket = filled();
        bucket.start_water_drop();
        for _ in 0..30 {
            bucket.update_water_drop();
        }
        bucket.start_water_drop();
        assert_eq!(bucket.bottom_open(), 0.0);
        assert_eq!(bucket.water_fall_progress(), 0.0);
        assert_eq!(bucket.water_splayed(), 0.0);
        assert!(!bucket.is_empty());
    }

    // ── display ─────────────────────────────────────────────────────

    #[test]
    fn display_hidden_when_rope_stowed() {
        let bucket = filled();
        assert!(bucket.display(5.0, 0.0, false).is_none());
        assert!(bucket.display(5.0, -1.0, false).is_none());
    }

    #[test]
    fn display_shows_only_rope_below_quarter_deploy() {
        let bucket = filled();
        let pose = bucket.display(5.0, 1.0, false).unwrap();
        assert!(!pose.show_body);
        assert!(pose.water.is_none());
    }

    #[test]
    fn display_shows_body_and_water_when_deployed() {
        let bucket = filled();
        let pose = bucket.display(5.0, 5.0, false).unwrap();
        assert!(pose.show_body);
        assert_eq!(pose.water, Some(0.0));
        assert_eq!(pose.bottom, BucketBottom::Solid);
        assert!(pose.water_fall.is_none());
    }

    #[test]
    fn display_splits_bottom_while_dropping() {
        let mut bucket = filled();
        bucket.start_water_drop();
        for _ in 0..5 {
            bucket.update_water_drop();
        }
        let pose = bucket.display(5.0, 5.0, true).unwrap();
        match pose.bottom {
            BucketBottom::Split { open_angle } => assert!(open_angle > 0.0),
            BucketBottom::Solid => panic!("expected split bottom"),
        }
    }

    #[test]
    fn display_water_column_grows_with_fall() {
        let mut bucket = filled();
        bucket.start_water_drop();
        for _ in 0..30 {
            bucket.update_water_drop();
        }
        let pose = bucket.display(5.0, 5.0, true).unwrap();
        let fall = pose.water_fall.unwrap();
        assert!(fall.length > 0.0 && fall.length < WATER_FALL_DISTANCE);
        assert!(fall.splash.is_none());
    }

    #[test]
    fn display_empty_bucket_has_no_water() {
        let bucket = BucketController::new(BucketRates::default());
        let pose = bucket.display(5.0, 5.0, false).unwrap();
        assert!(pose.water.is_none());
    }
}
