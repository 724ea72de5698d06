pub mod collision;
pub mod components;
pub mod config;
pub mod game_logic;
pub mod level;
pub mod lighting;
pub mod pathfinding;
pub mod plugins;
pub mod resources;

// Selective re-exports for external consumers

// Plugins - main.rs wires all of them
pub use plugins::{
    GhostPlugin, InteractPlugin, LevelPlugin, LightingPlugin, LoadLevelRequest, PlayerPlugin,
};

// Errors
pub use game_logic::errors::{EchoError, EchoResult};

// Core data types outside callers are expected to hold
pub use level::{BRICK_SIZE, LevelDefinition, TileGrid};
pub use lighting::{BrickColor, Headlight, LightChannel};
pub use pathfinding::{ChannelGraphs, LevelGraph, NavPath};
