use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use heli_firefighter::mission::SceneSettings;
use heli_firefighter::{GameState, ScenePlugin};

/// Starting values for the runtime settings.
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(about = "Firefighting helicopter scene")]
struct Args {
    /// Cruising height above the heliport.
    #[arg(long, default_value_t = 6.0)]
    cruising_height: f32,
    /// Multiplier on the top cruise speed.
    #[arg(long, default_value_t = 1.0)]
    speed_factor: f32,
    /// Start without the water bucket.
    #[arg(long)]
    no_bucket: bool,
    /// Simulation ticks per second.
    #[arg(long, default_value_t = 20.0)]
    tick_hz: f64,
}

fn main() {
    let mut scene = ScenePlugin::default();

    #[cfg(feature = "native")]
    {
        use clap::Parser;
        let args = Args::parse();
        scene.heli.cruising_height = args.cruising_height;
        scene.heli.speed_factor = args.speed_factor;
        scene.heli.has_bucket = !args.no_bucket;
        scene.mission.tick_hz = args.tick_hz.max(1.0);
    }

    let settings = SceneSettings::from_config(&scene.heli);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Heli Firefighter".into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(bevy_egui::EguiPlugin::default())
    .insert_resource(settings)
    .add_plugins(scene)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins((RemotePlugin::default(), RemoteHttpPlugin::default()));

    app.run();
}
