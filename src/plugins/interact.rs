use bevy::prelude::*;

use crate::components::{Door, Motion, Robot, Sign};
use crate::plugins::level_loader::LoadLevelRequest;
use crate::resources::GameState;

pub struct InteractPlugin;

impl Plugin for InteractPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveInteractable>().add_systems(
            Update,
            (detect_interactables, door_interaction)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// What the robot is currently standing in front of.
#[derive(Resource, Debug, Default)]
pub struct ActiveInteractable {
    /// Destination of the overlapped door, if any.
    pub door_destination: Option<String>,
    /// Sign whose text was already surfaced, so it logs once per approach.
    last_sign: Option<Entity>,
}

fn detect_interactables(
    robot_query: Query<&Motion, With<Robot>>,
    door_query: Query<(&Door, &Motion)>,
    sign_query: Query<(Entity, &Sign, &Motion)>,
    mut active: ResMut<ActiveInteractable>,
) {
    let Ok(robot_motion) = robot_query.single() else {
        return;
    };
    let hitbox = Robot::hitbox(robot_motion.position);

    active.door_destination = door_query
        .iter()
        .find(|(_, motion)| Door::hitbox(motion.position).collides_with(&hitbox))
        .map(|(door, _)| door.next_level.clone());

    let overlapped_sign = sign_query
        .iter()
        .find(|(_, _, motion)| hitbox.collides_with_square(&Sign::hitbox(motion.position)));
    match overlapped_sign {
        Some((entity, sign, _)) => {
            if active.last_sign != Some(entity) {
                info!("sign: {}", sign.text);
                active.last_sign = Some(entity);
            }
        }
        None => active.last_sign = None,
    }
}

fn door_interaction(
    keys: Res<ButtonInput<KeyCode>>,
    active: Res<ActiveInteractable>,
    mut requests: EventWriter<LoadLevelRequest>,
) {
    if !keys.just_pressed(KeyCode::KeyE) {
        return;
    }
    if let Some(destination) = &active.door_destination {
        info!("entering door to '{destination}'");
        requests.write(LoadLevelRequest {
            name: destination.clone(),
        });
    }
}
