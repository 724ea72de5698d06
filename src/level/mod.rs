//! Level definitions and tile occupancy grids.
//!
//! A level is authored as JSON: a tile-grid size, an ambient light value, a
//! robot spawn, and lists of bricks (with colour), ghosts, doors, signs, and
//! torches at integer tile coordinates. Tile (x, y) maps to the pixel centre
//! `(x, y) * BRICK_SIZE`, y pointing down, row 0 at the top.
//!
//! Loading validates dimensions and entity coordinates: a brick outside the
//! declared grid is a corrupt asset and fails the load. From a validated
//! definition the level produces one boolean occupancy grid per headlight
//! channel plus the candidate critical points the navigation graph is built
//! from.

use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::game_logic::errors::{EchoError, EchoResult};
use crate::lighting::{BrickColor, LightChannel};

/// Brick side length in pixels; the robot's body diameter matches it.
pub const BRICK_SIZE: f32 = 60.0;

/// Pixel centre of a tile.
pub fn to_pixel_position(tile: IVec2) -> Vec2 {
    Vec2::new(tile.x as f32, tile.y as f32) * BRICK_SIZE
}

/// Tile containing a pixel position.
pub fn to_tile_position(pixel: Vec2) -> IVec2 {
    IVec2::new(
        (pixel.x / BRICK_SIZE).round() as i32,
        (pixel.y / BRICK_SIZE).round() as i32,
    )
}

/// Row-major boolean occupancy over the level's tiles.
///
/// Out-of-bounds queries report unoccupied: the playfield simply ends and
/// nothing outside it blocks movement or sight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Build from explicit rows. Ragged input is a programmer error.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len() as u32);
        for row in rows {
            assert_eq!(
                row.len() as u32,
                width,
                "occupancy rows must all have the same width"
            );
        }

        Self {
            width,
            height,
            cells: rows.iter().flatten().copied().collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Internal storage matches the declared dimensions. Checked by the
    /// graph builder before it trusts the grid.
    pub fn is_consistent(&self) -> bool {
        self.cells.len() == (self.width as usize) * (self.height as usize)
    }

    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    pub fn occupied(&self, tile: IVec2) -> bool {
        if !self.in_bounds(tile) {
            return false;
        }
        self.cells[(tile.y as u32 * self.width + tile.x as u32) as usize]
    }

    pub fn set_occupied(&mut self, tile: IVec2) {
        if self.in_bounds(tile) {
            self.cells[(tile.y as u32 * self.width + tile.x as u32) as usize] = true;
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

/// Integer tile coordinate as it appears in level JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn to_pixel(self) -> Vec2 {
        to_pixel_position(self.as_ivec2())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LevelSize {
    #[validate(range(min = 1, max = 256))]
    pub width: u32,
    #[validate(range(min = 1, max = 256))]
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub pos: TilePos,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BrickDef {
    pub pos: TilePos,
    pub colour: BrickColor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GhostDef {
    pub pos: TilePos,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorDef {
    pub pos: TilePos,
    pub next_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignDef {
    pub pos: TilePos,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TorchDef {
    pub pos: TilePos,
}

/// Complete level description as authored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Resource)]
pub struct LevelDefinition {
    #[validate(nested)]
    pub size: LevelSize,
    #[validate(range(min = 0.0, max = 1.0))]
    pub ambient_light: f32,
    pub spawn: SpawnPoint,
    #[serde(default)]
    pub bricks: Vec<BrickDef>,
    #[serde(default)]
    pub ghosts: Vec<GhostDef>,
    #[serde(default)]
    pub doors: Vec<DoorDef>,
    #[serde(default)]
    pub signs: Vec<SignDef>,
    #[serde(default)]
    pub torches: Vec<TorchDef>,
}

impl LevelDefinition {
    /// Parse and validate a level from JSON text.
    pub fn from_json(text: &str) -> EchoResult<Self> {
        let level: LevelDefinition = serde_json::from_str(text)?;

        level.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            EchoError::MalformedLevel {
                reason: format!("validation failed: {error_details}"),
            }
        })?;

        level.check_positions()?;
        Ok(level)
    }

    /// Get the levels directory path
    pub fn levels_dir() -> EchoResult<PathBuf> {
        std::env::current_dir()
            .map_err(EchoError::Io)
            .map(|dir| dir.join("levels"))
    }

    /// Load `<levels dir>/<name>.json`.
    pub fn load_from_file(name: &str) -> EchoResult<Self> {
        let path = Self::levels_dir()?.join(format!("{name}.json"));
        if !path.exists() {
            return Err(EchoError::LevelFileNotFound { path });
        }

        let text = fs::read_to_string(&path)?;
        Self::from_json(&text)
    }

    fn check_positions(&self) -> EchoResult<()> {
        let in_grid = |pos: TilePos| {
            pos.x >= 0
                && pos.y >= 0
                && (pos.x as u32) < self.size.width
                && (pos.y as u32) < self.size.height
        };
        let reject = |what: &str, pos: TilePos| {
            Err(EchoError::MalformedLevel {
                reason: format!(
                    "{what} at ({}, {}) outside a {}x{} grid",
                    pos.x, pos.y, self.size.width, self.size.height
                ),
            })
        };

        if !in_grid(self.spawn.pos) {
            return reject("spawn", self.spawn.pos);
        }
        for brick in &self.bricks {
            if !in_grid(brick.pos) {
                return reject("brick", brick.pos);
            }
        }
        for ghost in &self.ghosts {
            if !in_grid(ghost.pos) {
                return reject("ghost", ghost.pos);
            }
        }
        for door in &self.doors {
            if !in_grid(door.pos) {
                return reject("door", door.pos);
            }
        }
        for sign in &self.signs {
            if !in_grid(sign.pos) {
                return reject("sign", sign.pos);
            }
        }
        for torch in &self.torches {
            if !in_grid(torch.pos) {
                return reject("torch", torch.pos);
            }
        }
        Ok(())
    }

    /// Occupancy grid for one headlight channel: a cell is occupied iff a
    /// brick tangible under that channel sits on it.
    pub fn occupancy(&self, channel: LightChannel) -> TileGrid {
        let mut grid = TileGrid::new(self.size.width, self.size.height);
        for brick in &self.bricks {
            if brick.colour.tangible_under(channel) {
                grid.set_occupied(brick.pos.as_ivec2());
            }
        }
        grid
    }

    /// Candidate navigation vertices: the four diagonal neighbours of every
    /// brick, duplicates and out-of-bounds entries included. The graph
    /// builder filters them against its own channel's occupancy.
    pub fn critical_point_candidates(&self) -> Vec<IVec2> {
        const DIFFS: [IVec2; 4] = [
            IVec2::new(-1, -1),
            IVec2::new(1, -1),
            IVec2::new(-1, 1),
            IVec2::new(1, 1),
        ];

        let mut candidates = Vec::with_capacity(self.bricks.len() * 4);
        for brick in &self.bricks {
            for diff in DIFFS {
                candidates.push(brick.pos.as_ivec2() + diff);
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "size": {"width": 6, "height": 4},
            "ambient_light": 0.25,
            "spawn": {"pos": {"x": 1, "y": 1}},
            "bricks": [
                {"pos": {"x": 0, "y": 3}, "colour": {"r": 1.0, "g": 1.0, "b": 1.0}},
                {"pos": {"x": 1, "y": 3}, "colour": {"r": 1.0, "g": 0.0, "b": 0.0}},
                {"pos": {"x": 2, "y": 3}, "colour": {"r": 0.0, "g": 1.0, "b": 0.0}}
            ],
            "ghosts": [{"pos": {"x": 4, "y": 1}}],
            "doors": [{"pos": {"x": 5, "y": 2}, "next_level": "deeper"}],
            "signs": [{"pos": {"x": 2, "y": 1}, "text": "mind the dark"}],
            "torches": [{"pos": {"x": 3, "y": 0}}]
        }"#
    }

    #[test]
    fn test_parse_sample_level() {
        let level = LevelDefinition::from_json(sample_json()).unwrap();

        assert_eq!(level.size.width, 6);
        assert_eq!(level.size.height, 4);
        assert_eq!(level.bricks.len(), 3);
        assert_eq!(level.ghosts.len(), 1);
        assert_eq!(level.doors[0].next_level, "deeper");
        assert_eq!(level.signs[0].text, "mind the dark");
        assert_eq!(level.torches.len(), 1);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let level = LevelDefinition::from_json(
            r#"{
                "size": {"width": 2, "height": 2},
                "ambient_light": 1.0,
                "spawn": {"pos": {"x": 0, "y": 0}}
            }"#,
        )
        .unwrap();

        assert!(level.bricks.is_empty());
        assert!(level.ghosts.is_empty());
        assert!(level.doors.is_empty());
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let err = LevelDefinition::from_json(
            r#"{
                "size": {"width": 0, "height": 4},
                "ambient_light": 0.5,
                "spawn": {"pos": {"x": 0, "y": 0}}
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, EchoError::MalformedLevel { .. }));
    }

    #[test]
    fn test_out_of_grid_brick_is_rejected() {
        let err = LevelDefinition::from_json(
            r#"{
                "size": {"width": 4, "height": 4},
                "ambient_light": 0.5,
                "spawn": {"pos": {"x": 0, "y": 0}},
                "bricks": [{"pos": {"x": 9, "y": 0}, "colour": {"r": 1.0, "g": 1.0, "b": 1.0}}]
            }"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("brick at (9, 0)"));
    }

    #[test]
    fn test_occupancy_respects_channel_tangibility() {
        let level = LevelDefinition::from_json(sample_json()).unwrap();

        let white = level.occupancy(LightChannel::White);
        let red = level.occupancy(LightChannel::Red);
        let green = level.occupancy(LightChannel::Green);

        // White brick at (0,3) occupies every channel.
        for channel_grid in [&white, &red, &green] {
            assert!(channel_grid.occupied(IVec2::new(0, 3)));
        }

        // Red brick at (1,3) only under the red channel.
        assert!(!white.occupied(IVec2::new(1, 3)));
        assert!(red.occupied(IVec2::new(1, 3)));
        assert!(!green.occupied(IVec2::new(1, 3)));

        // Green brick at (2,3) only under the green channel.
        assert!(!red.occupied(IVec2::new(2, 3)));
        assert!(green.occupied(IVec2::new(2, 3)));

        assert_eq!(white.occupied_count(), 1);
        assert_eq!(red.occupied_count(), 2);
    }

    #[test]
    fn test_critical_point_candidates_are_diagonal_neighbours() {
        let level = LevelDefinition::from_json(
            r#"{
                "size": {"width": 4, "height": 4},
                "ambient_light": 0.5,
                "spawn": {"pos": {"x": 0, "y": 0}},
                "bricks": [{"pos": {"x": 1, "y": 1}, "colour": {"r": 1.0, "g": 1.0, "b": 1.0}}]
            }"#,
        )
        .unwrap();

        let candidates = level.critical_point_candidates();
        assert_eq!(candidates.len(), 4);
        for corner in [
            IVec2::new(0, 0),
            IVec2::new(2, 0),
            IVec2::new(0, 2),
            IVec2::new(2, 2),
        ] {
            assert!(candidates.contains(&corner));
        }
    }

    #[test]
    fn test_tile_pixel_conversion() {
        let tile = IVec2::new(3, 2);
        let pixel = to_pixel_position(tile);

        assert_eq!(pixel, Vec2::new(180.0, 120.0));
        assert_eq!(to_tile_position(pixel), tile);
        assert_eq!(to_tile_position(pixel + Vec2::new(14.0, -14.0)), tile);
    }

    #[test]
    fn test_grid_out_of_bounds_is_unoccupied() {
        let mut grid = TileGrid::new(3, 3);
        grid.set_occupied(IVec2::new(1, 1));

        assert!(grid.occupied(IVec2::new(1, 1)));
        assert!(!grid.occupied(IVec2::new(-1, 0)));
        assert!(!grid.occupied(IVec2::new(3, 0)));
    }

    #[test]
    #[should_panic(expected = "same width")]
    fn test_ragged_rows_panic() {
        TileGrid::from_rows(&[vec![false, false], vec![false]]);
    }
}
