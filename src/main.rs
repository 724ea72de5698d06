use bevy::prelude::*;
use echoes::config::load_config;
use echoes::plugins::*;
use echoes::resources::GameState;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "ECHO's in the Dark".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(load_config())
        .init_state::<GameState>()
        .add_plugins((
            LevelPlugin,
            PlayerPlugin,
            GhostPlugin,
            InteractPlugin,
            LightingPlugin,
        ))
        .run();
}
