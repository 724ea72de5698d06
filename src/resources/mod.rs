use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::range_types::*;
use crate::game_logic::movement::MovementTuning;
use crate::level::LevelDefinition;

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
pub struct GameConfig {
    pub settings: GameSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GameSettings {
    // Robot settings
    pub horizontal_acceleration: Acceleration,
    pub horizontal_deceleration: Acceleration,
    pub max_horizontal_speed: MovementSpeed,
    pub max_vertical_speed: MovementSpeed,
    pub gravity: Acceleration,
    pub flight_thrust: Acceleration,
    pub max_flight_seconds: FlightSeconds,

    // Ghost settings
    pub ghost_speed: MovementSpeed,
    pub ghost_sight_range: SightRange,
    pub path_stale_distance: StaleDistance,
    pub waypoint_reach_distance: f32,

    // Level settings
    pub starting_level: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            // Robot settings
            horizontal_acceleration: Acceleration::new(600.0),
            horizontal_deceleration: Acceleration::new(1800.0),
            max_horizontal_speed: MovementSpeed::new(900.0),
            max_vertical_speed: MovementSpeed::new(900.0),
            gravity: Acceleration::new(600.0),
            flight_thrust: Acceleration::new(600.0),
            max_flight_seconds: FlightSeconds::new(1.5),

            // Ghost settings
            ghost_speed: MovementSpeed::new(100.0),
            ghost_sight_range: SightRange::new(500.0),
            path_stale_distance: StaleDistance::new(60.0),
            waypoint_reach_distance: 4.0,

            // Level settings
            starting_level: "first_light".to_string(),
        }
    }
}

impl GameSettings {
    /// The subset the velocity integrator needs, as one plain struct.
    pub fn movement_tuning(&self) -> MovementTuning {
        MovementTuning {
            horizontal_acceleration: self.horizontal_acceleration.get(),
            horizontal_deceleration: self.horizontal_deceleration.get(),
            max_horizontal_speed: self.max_horizontal_speed.get(),
            max_vertical_speed: self.max_vertical_speed.get(),
            gravity: self.gravity.get(),
            flight_thrust: self.flight_thrust.get(),
        }
    }
}

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

/// The level currently simulated, kept for resets and the editor-facing
/// tooling.
#[derive(Resource, Debug, Clone)]
pub struct CurrentLevel {
    pub name: String,
    pub definition: LevelDefinition,
}

/// Name of the level the loader should bring up next.
#[derive(Resource, Debug, Clone)]
pub struct PendingLevel {
    pub name: String,
}
