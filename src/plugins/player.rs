use bevy::prelude::*;

use crate::collision::resolve_move;
use crate::components::{Brick, Motion, Robot};
use crate::game_logic::movement::{MovementInput, integrate_velocity};
use crate::lighting::Headlight;
use crate::resources::{GameConfig, GameState};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_robot_input, move_robot)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

fn handle_robot_input(keys: Res<ButtonInput<KeyCode>>, mut robot_query: Query<&mut Robot>) {
    for mut robot in robot_query.iter_mut() {
        robot.accelerating_left =
            keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA);
        robot.accelerating_right =
            keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD);

        let wants_flight = keys.pressed(KeyCode::Space)
            || keys.pressed(KeyCode::ArrowUp)
            || keys.pressed(KeyCode::KeyW);
        let can_fly = wants_flight && !robot.flight.is_empty();
        if can_fly && !robot.is_flying {
            debug!("flight started with {:.2}s in the tank", robot.flight.current);
        }
        robot.is_flying = can_fly;
    }
}

/// Integrate the robot's velocity, sweep it against the tangible bricks one
/// axis at a time, and track grounding for the flight recharge.
pub fn move_robot(
    time: Res<Time>,
    config: Res<GameConfig>,
    headlight: Res<Headlight>,
    mut robot_query: Query<(&mut Robot, &mut Motion), Without<Brick>>,
    brick_query: Query<(&Brick, &Motion), Without<Robot>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    // Per-frame snapshot of the static obstacles.
    let mut squares = Vec::new();
    let mut colours = Vec::new();
    for (brick, motion) in brick_query.iter() {
        squares.push(Brick::hitbox(motion.position));
        colours.push(brick.colour);
    }

    let tuning = config.settings.movement_tuning();
    let circles = Robot::collision_circles();
    let channel = headlight.channel;

    for (mut robot, mut motion) in robot_query.iter_mut() {
        let input = MovementInput {
            accelerating_left: robot.accelerating_left,
            accelerating_right: robot.accelerating_right,
            flying: robot.is_flying,
        };
        let velocity = integrate_velocity(motion.velocity, input, &tuning, dt);
        let delta = velocity * dt;

        let resolution = resolve_move(&circles, motion.position, velocity, delta, &squares, |index| {
            colours[index].tangible_under(channel)
        });

        motion.position = resolution.position;
        motion.velocity = resolution.velocity;
        robot.grounded = resolution.grounded;

        if robot.is_flying {
            robot.flight.drain(dt);
            if robot.flight.is_empty() {
                debug!("flight exhausted");
                robot.is_flying = false;
            }
        } else if robot.grounded {
            robot.flight.recharge(dt);
        }
    }
}
