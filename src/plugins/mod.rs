pub mod enemy;
pub mod interact;
pub mod level_loader;
pub mod lighting;
pub mod player;

pub use enemy::GhostPlugin;
pub use interact::InteractPlugin;
pub use level_loader::{LevelPlugin, LoadLevelRequest};
pub use lighting::LightingPlugin;
pub use player::PlayerPlugin;
