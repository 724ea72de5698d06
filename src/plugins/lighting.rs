use bevy::prelude::*;

use crate::components::{Motion, Robot};
use crate::lighting::{Headlight, LightChannel};
use crate::resources::GameState;

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                switch_channel,
                follow_robot.after(crate::plugins::player::move_robot),
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Select the headlight channel. The per-channel grids and graphs are
/// precomputed, so this is a table lookup, never a rebuild.
fn switch_channel(keys: Res<ButtonInput<KeyCode>>, mut headlight: ResMut<Headlight>) {
    let selected = if keys.just_pressed(KeyCode::Digit1) {
        Some(LightChannel::White)
    } else if keys.just_pressed(KeyCode::Digit2) {
        Some(LightChannel::Red)
    } else if keys.just_pressed(KeyCode::Digit3) {
        Some(LightChannel::Green)
    } else if keys.just_pressed(KeyCode::Digit4) {
        Some(LightChannel::Blue)
    } else {
        None
    };

    if let Some(channel) = selected {
        if channel != headlight.channel {
            info!("headlight channel switched to {channel:?}");
            headlight.channel = channel;
        }
    }
}

/// The headlight rides on the robot.
fn follow_robot(robot_query: Query<&Motion, With<Robot>>, mut headlight: ResMut<Headlight>) {
    if let Ok(motion) = robot_query.single() {
        headlight.position = motion.position;
    }
}
