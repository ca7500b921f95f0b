use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{KEY_HELP, status_rows};
use crate::camera::FovPreset;
use crate::heli::HeliRig;
use crate::mission::{CRUISING_HEIGHT_RANGE, SPEED_FACTOR_RANGE, SceneSettings};

/// Draws the status and settings window.
///
/// Settings are edited on a copy and written back only when something
/// changed, so the mission plugin sees a change tick only for real edits.
pub fn control_panel(
    mut contexts: EguiContexts,
    mut settings: ResMut<SceneSettings>,
    rig: Res<HeliRig>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let mut edited = settings.clone();

    egui::Window::new("Firefighter")
        .default_width(240.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Helicopter");
            egui::Grid::new("status").num_columns(2).show(ui, |ui| {
                for (label, value) in status_rows(&rig.0) {
                    ui.label(label);
                    ui.monospace(value);
                    ui.end_row();
                }
            });

            ui.separator();
            ui.heading("Settings");
            ui.checkbox(&mut edited.has_bucket, "Bucket");
            ui.add(egui::Slider::new(&mut edited.cruising_height, CRUISING_HEIGHT_RANGE).text("Cruising height"));
            ui.add(egui::Slider::new(&mut edited.speed_factor, SPEED_FACTOR_RANGE).text("Speed factor"));
            ui.checkbox(&mut edited.fires_enabled, "Enable fires");
            egui::ComboBox::from_label("Field of view")
                .selected_text(edited.fov.label())
                .show_ui(ui, |ui| {
                    for preset in FovPreset::ALL {
                        ui.selectable_value(&mut edited.fov, preset, preset.label());
                    }
                });

            ui.separator();
            egui::CollapsingHeader::new("Keys").show(ui, |ui| {
                egui::Grid::new("keys").num_columns(2).show(ui, |ui| {
                    for (key, action) in KEY_HELP {
                        ui.monospace(*key);
                        ui.label(*action);
                        ui.end_row();
                    }
                });
            });
        });

    settings.set_if_neq(edited);
    Ok(())
}
