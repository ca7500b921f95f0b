//! Fire station: three-module block with the helipad on the centre roof.
//!
//! The helipad's top centre is the heliport handed to the helicopter at
//! startup. Its marking material follows the helicopter state and the four
//! corner maneuver lights pulse while the aircraft is on a vertical leg.

mod entities;
mod systems;

pub use entities::{Helipad, HelipadMarking, ManeuverLight};

use bevy::prelude::*;

/// Building dimensions and helipad light settings.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct BuildingConfig {
    /// Ground-level centre of the front module row.
    pub position: Vec3,
    /// Width of all three modules side by side.
    pub total_width: f32,
    /// Storeys in each side wing. The centre module has one more.
    pub side_floors: u32,
    /// Height of one storey.
    pub floor_height: f32,
    /// Windows per floor on each module's front face.
    pub windows_per_floor: u32,
    /// Wall colour.
    pub wall_color: Color,
    /// Maneuver light pulses per second.
    pub light_pulse_hz: f32,
    /// Emissive intensity at the bottom of a pulse.
    pub light_min_intensity: f32,
    /// Emissive intensity at the top of a pulse.
    pub light_max_intensity: f32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            total_width: 20.0,
            side_floors: 3,
            floor_height: 3.0,
            windows_per_floor: 2,
            wall_color: Color::srgb(0.9, 0.9, 0.9),
            light_pulse_hz: 1.0,
            light_min_intensity: 1.5,
            light_max_intensity: 5.0,
        }
    }
}

impl BuildingConfig {
    /// Width of the centre module.
    pub fn center_width(&self) -> f32 {
        self.total_width * 0.4
    }

    /// Width of each side wing.
    pub fn side_width(&self) -> f32 {
        self.total_width * 0.3
    }

    /// Depth of the centre module.
    pub fn center_depth(&self) -> f32 {
        self.center_width() * 0.8
    }

    /// Depth of each side wing.
    pub fn side_depth(&self) -> f32 {
        self.center_width() * 0.6
    }

    /// Storeys in the centre module.
    pub fn center_floors(&self) -> u32 {
        self.side_floors + 1
    }

    /// Height of the centre roof above the building base.
    pub fn roof_height(&self) -> f32 {
        self.floor_height * self.center_floors() as f32
    }

    /// Diameter of the helipad disc.
    pub fn helipad_size(&self) -> f32 {
        self.center_width().min(self.center_depth()) * 0.8
    }

    /// World position of the helipad's top centre.
    pub fn heliport(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.roof_height() + entities::HELIPAD_THICKNESS, 0.0)
    }
}

/// Building plugin: geometry, heliport hand-off and helipad feedback.
pub struct BuildingPlugin(pub BuildingConfig);

impl Plugin for BuildingPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BuildingConfig>()
            .register_type::<Helipad>()
            .register_type::<ManeuverLight>()
            .insert_resource(self.0.clone())
            .add_systems(
                Startup,
                (systems::spawn_building, systems::place_heliport),
            )
            .add_systems(
                Update,
                (systems::swap_helipad_marking, systems::pulse_maneuver_lights),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimensions() {
        let cfg = BuildingConfig::default();
        assert!((cfg.center_width() - 8.0).abs() < 1e-6);
        assert!((cfg.side_width() - 6.0).abs() < 1e-6);
        assert!((cfg.center_depth() - 6.4).abs() < 1e-5);
        assert_eq!(cfg.center_floors(), 4);
        assert!((cfg.roof_height() - 12.0).abs() < 1e-6);
    }

    #[test]
    fn heliport_sits_on_the_centre_roof() {
        let cfg = BuildingConfig {
            position: Vec3::new(5.0, 1.0, -3.0),
            ..default()
        };
        let pad = cfg.heliport();
        assert_eq!(pad.x, 5.0);
        assert_eq!(pad.z, -3.0);
        assert!(pad.y > 1.0 + cfg.roof_height());
        assert!(pad.y < 1.0 + cfg.roof_height() + 0.5);
    }

    #[test]
    fn helipad_fits_on_the_roof() {
        let cfg = BuildingConfig::default();
        assert!(cfg.helipad_size() < cfg.center_depth());
        assert!(cfg.helipad_size() < cfg.center_width());
    }
}
