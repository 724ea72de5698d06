use std::fs;
use std::path::PathBuf;

use crate::game_logic::errors::{EchoError, EchoResult};
use crate::resources::GameConfig;

pub mod range_types;

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("echoes");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

/// Load the config from disk, falling back to defaults on any failure.
pub fn load_config() -> GameConfig {
    if let Some(config_path) = get_config_path() {
        if let Ok(contents) = fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<GameConfig>(&contents) {
                return config;
            }
        }
    }
    GameConfig::default()
}

pub fn save_config(config: &GameConfig) -> EchoResult<()> {
    let config_path = get_config_path().ok_or(EchoError::ConfigDirNotFound)?;
    let contents = toml::to_string_pretty(config)?;
    fs::write(config_path, contents)?;
    Ok(())
}
