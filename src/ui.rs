//! Control panel.
//!
//! An egui window with the helicopter's live status and the runtime
//! settings: bucket, cruising height, speed factor, fires and camera FOV.
//! Edits go into [`SceneSettings`](crate::mission::SceneSettings); the
//! mission plugin forwards them to the controller.

mod systems;

use bevy::prelude::*;

use crate::heli::controller::{HelicopterController, MissionSink};

/// egui control panel plugin.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(bevy_egui::EguiPrimaryContextPass, systems::control_panel);
    }
}

/// Label and value rows for the status grid.
pub fn status_rows<S: MissionSink>(heli: &HelicopterController<S>) -> Vec<(&'static str, String)> {
    let p = heli.position();
    let yes_no = |flag: bool| (if flag { "yes" } else { "no" }).to_string();
    let bucket = if !heli.has_bucket() {
        "not mounted".to_string()
    } else if heli.is_bucket_empty() {
        "empty".to_string()
    } else {
        "full".to_string()
    };
    vec![
        ("State", heli.state().to_string()),
        ("Position", format!("{:.1}, {:.1}, {:.1}", p.x, p.y, p.z)),
        ("Heading", format!("{:.0}°", heli.angle_yy().to_degrees())),
        ("Speed", format!("{:.1} u/s", heli.velocity().length() * 1000.0)),
        ("Bucket", bucket),
        ("Rope", format!("{:.1} / {:.1}", heli.current_rope_length(), heli.rope_length())),
        ("Over lake", yes_no(heli.is_over_lake())),
        ("Over fire", yes_no(heli.is_over_fire())),
        ("Fire", (if heli.is_fire_on() { "burning" } else { "out" }).to_string()),
    ]
}

/// Key bindings shown under the status grid.
pub const KEY_HELP: &[(&str, &str)] = &[
    ("P", "take off"),
    ("L", "land / fill"),
    ("O", "drop water"),
    ("W S", "speed"),
    ("A D", "turn"),
    ("R", "reset"),
    ("Tab", "inspector"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heli::HeliConfig;
    use crate::heli::controller::MissionLog;

    fn value<'a>(rows: &'a [(&'static str, String)], label: &str) -> &'a str {
        rows.iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn resting_helicopter_status() {
        let heli = HelicopterController::new(
            HeliConfig::default(),
            Vec3::new(0.0, 3.0, 0.0),
            MissionLog::default(),
        );
        let rows = status_rows(&heli);
        assert_eq!(value(&rows, "State"), heli.state().to_string());
        assert_eq!(value(&rows, "Position"), "0.0, 3.0, 0.0");
        assert_eq!(value(&rows, "Speed"), "0.0 u/s");
        assert_eq!(value(&rows, "Bucket"), "empty");
        assert_eq!(value(&rows, "Fire"), "burning");
    }

    #[test]
    fn unmounted_bucket_is_reported() {
        let mut heli =
            HelicopterController::new(HeliConfig::default(), Vec3::ZERO, MissionLog::default());
        heli.set_bucket(false);
        assert_eq!(value(&status_rows(&heli), "Bucket"), "not mounted");
    }
}
