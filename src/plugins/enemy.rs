use bevy::prelude::*;

use crate::components::{Ghost, Motion, Robot};
use crate::lighting::Headlight;
use crate::pathfinding::ChannelGraphs;
use crate::resources::{GameConfig, GameState};

pub struct GhostPlugin;

impl Plugin for GhostPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (update_ghost_sight, plan_ghost_paths, move_ghosts, ghost_contact)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Ghosts only know where the robot is while it is inside their sight
/// range; outside it they keep heading for the last position they saw.
fn update_ghost_sight(
    robot_query: Query<&Motion, With<Robot>>,
    mut ghost_query: Query<(&mut Ghost, &Motion), Without<Robot>>,
) {
    let Ok(robot_motion) = robot_query.single() else {
        return;
    };

    for (mut ghost, motion) in ghost_query.iter_mut() {
        if motion.position.distance(robot_motion.position) < ghost.sight_range.0 {
            ghost.last_seen = Some(robot_motion.position);
        }
    }
}

/// Query the active channel's graph for ghosts whose path is missing or has
/// gone stale (its final waypoint drifted too far from the goal).
fn plan_ghost_paths(
    graphs: Res<ChannelGraphs>,
    headlight: Res<Headlight>,
    config: Res<GameConfig>,
    mut ghost_query: Query<(&mut Ghost, &Motion)>,
) {
    let graph = graphs.graph(headlight.channel);
    let stale_distance = config.settings.path_stale_distance.get();

    for (mut ghost, motion) in ghost_query.iter_mut() {
        let Some(goal) = ghost.last_seen else {
            continue;
        };

        let needs_replan = ghost.path.is_empty()
            || ghost
                .path
                .final_destination()
                .is_some_and(|destination| destination.distance(goal) > stale_distance);

        if needs_replan {
            let waypoints = graph.get_path(motion.position, goal);
            if waypoints.is_empty() {
                debug!("no route from {:?} to {:?}", motion.position, goal);
            } else {
                debug!("planned {} waypoints to {:?}", waypoints.len(), goal);
            }
            ghost.path.set(waypoints);
        }
    }
}

/// Advance each ghost along its waypoints on a fixed speed budget.
fn move_ghosts(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut ghost_query: Query<(&mut Ghost, &mut Motion)>,
) {
    let dt = time.delta_secs();
    let reach = config.settings.waypoint_reach_distance;

    for (mut ghost, mut motion) in ghost_query.iter_mut() {
        let mut budget = ghost.speed.0 * dt;

        while budget > 0.0 {
            let Some(waypoint) = ghost.path.current_waypoint() else {
                break;
            };

            let offset = waypoint - motion.position;
            let distance = offset.length();
            if distance <= reach {
                ghost.path.advance_waypoint();
                continue;
            }

            if distance <= budget {
                motion.position = waypoint;
                budget -= distance;
                ghost.path.advance_waypoint();
            } else {
                motion.position += offset / distance * budget;
                budget = 0.0;
            }
        }
    }
}

/// A ghost touching the robot sends everything back to its spawn point.
/// Resetting the ghosts also clears their paths and sight memory.
fn ghost_contact(
    mut robot_query: Query<(&mut Robot, &mut Motion), Without<Ghost>>,
    mut ghost_query: Query<(&mut Ghost, &mut Motion), Without<Robot>>,
) {
    let Ok((mut robot, mut robot_motion)) = robot_query.single_mut() else {
        return;
    };

    let hitbox = Robot::hitbox(robot_motion.position);
    let caught = ghost_query
        .iter()
        .any(|(_, motion)| hitbox.collides_with_square(&Ghost::hitbox(motion.position)));

    if caught {
        info!("the dark caught up; returning to spawn");
        robot.reset(&mut robot_motion);
        for (mut ghost, mut motion) in ghost_query.iter_mut() {
            ghost.reset(&mut motion);
        }
    }
}
