use bevy::prelude::*;

use crate::components::{
    Brick, Distance, Door, Ghost, LevelEntity, Motion, Robot, Sign, Speed, Torch,
};
use crate::level::LevelDefinition;
use crate::lighting::Headlight;
use crate::pathfinding::ChannelGraphs;
use crate::resources::{CurrentLevel, GameConfig, GameState, PendingLevel};

/// Ask the loader to bring up another level (sent by doors).
#[derive(Event, Debug, Clone)]
pub struct LoadLevelRequest {
    pub name: String,
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LoadLevelRequest>()
            .add_systems(OnEnter(GameState::Loading), load_pending_level)
            .add_systems(
                Update,
                watch_level_requests.run_if(in_state(GameState::Playing)),
            );
    }
}

fn watch_level_requests(
    mut requests: EventReader<LoadLevelRequest>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Some(request) = requests.read().last() {
        commands.insert_resource(PendingLevel {
            name: request.name.clone(),
        });
        next_state.set(GameState::Loading);
    }
}

/// Tear down the previous level, parse and validate the pending one, spawn
/// its entities, and build the four channel graphs in one blocking step.
fn load_pending_level(
    mut commands: Commands,
    pending: Option<Res<PendingLevel>>,
    config: Res<GameConfig>,
    existing: Query<Entity, With<LevelEntity>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let name = pending
        .map(|pending| pending.name.clone())
        .unwrap_or_else(|| config.settings.starting_level.clone());

    let definition = match LevelDefinition::load_from_file(&name) {
        Ok(definition) => definition,
        Err(err) => {
            error!("failed to load level '{name}': {err}");
            return;
        }
    };

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    spawn_level(&mut commands, &config, &definition);

    commands.insert_resource(ChannelGraphs::build(&definition));
    commands.insert_resource(Headlight::new(
        definition.spawn.pos.to_pixel(),
        definition.ambient_light,
    ));
    info!(
        "level '{name}' ready: {} bricks, {} ghosts, {} doors, {} signs",
        definition.bricks.len(),
        definition.ghosts.len(),
        definition.doors.len(),
        definition.signs.len()
    );
    commands.insert_resource(CurrentLevel { name, definition });

    next_state.set(GameState::Playing);
}

fn spawn_level(commands: &mut Commands, config: &GameConfig, level: &LevelDefinition) {
    let settings = &config.settings;

    for brick in &level.bricks {
        commands.spawn((
            LevelEntity,
            Brick {
                colour: brick.colour,
            },
            Motion {
                position: brick.pos.to_pixel(),
                ..Default::default()
            },
        ));
    }

    for ghost in &level.ghosts {
        let spawn = ghost.pos.to_pixel();
        commands.spawn((
            LevelEntity,
            Ghost::new(
                spawn,
                Speed::new(settings.ghost_speed.get()),
                Distance::new(settings.ghost_sight_range.get()),
            ),
            Motion {
                position: spawn,
                ..Default::default()
            },
        ));
    }

    for door in &level.doors {
        commands.spawn((
            LevelEntity,
            Door {
                next_level: door.next_level.clone(),
            },
            Motion {
                position: door.pos.to_pixel(),
                ..Default::default()
            },
        ));
    }

    for sign in &level.signs {
        commands.spawn((
            LevelEntity,
            Sign {
                text: sign.text.clone(),
            },
            Motion {
                position: sign.pos.to_pixel(),
                ..Default::default()
            },
        ));
    }

    for torch in &level.torches {
        commands.spawn((
            LevelEntity,
            Torch,
            Motion {
                position: torch.pos.to_pixel(),
                ..Default::default()
            },
        ));
    }

    let spawn = level.spawn.pos.to_pixel();
    commands.spawn((
        LevelEntity,
        Robot::new(spawn, settings.max_flight_seconds.get()),
        Motion {
            position: spawn,
            ..Default::default()
        },
    ));
}
