//! Headlight colour channels and brick colour semantics.
//!
//! Bricks are colour-coded. White bricks are opaque and solid under every
//! channel; a coloured brick is only visible and tangible while the active
//! headlight channel matches its colour exactly. Everything downstream
//! (collision filtering, the per-channel occupancy grids, the per-channel
//! navigation graphs) keys off [`BrickColor::tangible_under`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The active headlight colour channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightChannel {
    #[default]
    White,
    Red,
    Green,
    Blue,
}

impl LightChannel {
    pub const ALL: [LightChannel; 4] = [
        LightChannel::White,
        LightChannel::Red,
        LightChannel::Green,
        LightChannel::Blue,
    ];

    /// Stable index into per-channel tables.
    pub fn index(self) -> usize {
        match self {
            LightChannel::White => 0,
            LightChannel::Red => 1,
            LightChannel::Green => 2,
            LightChannel::Blue => 3,
        }
    }
}

/// RGB colour triple carried by each brick, straight from the level file.
///
/// Channel components are 0.0 or 1.0 in authored levels; comparisons are
/// exact on purpose, matching how levels encode colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BrickColor {
    pub const WHITE: BrickColor = BrickColor { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED: BrickColor = BrickColor { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: BrickColor = BrickColor { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE: BrickColor = BrickColor { r: 0.0, g: 0.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn is_white(&self) -> bool {
        *self == Self::WHITE
    }

    /// Whether a brick of this colour is visible and solid under `channel`.
    ///
    /// White is solid everywhere. A coloured brick matches only the channel
    /// of its exact primary; colours that match no channel are never
    /// tangible.
    pub fn tangible_under(&self, channel: LightChannel) -> bool {
        if self.is_white() {
            return true;
        }
        match channel {
            LightChannel::White => false,
            LightChannel::Red => *self == Self::RED,
            LightChannel::Green => *self == Self::GREEN,
            LightChannel::Blue => *self == Self::BLUE,
        }
    }
}

/// The robot's headlight: world position plus the active colour channel.
///
/// Position follows the robot every frame; the channel only changes on
/// explicit player input, at which point the precomputed per-channel grid
/// and graph are selected (never rebuilt mid-frame).
#[derive(Resource, Debug, Clone, Copy)]
pub struct Headlight {
    pub position: Vec2,
    pub channel: LightChannel,
    pub ambient: f32,
}

impl Headlight {
    pub fn new(position: Vec2, ambient: f32) -> Self {
        Self {
            position,
            channel: LightChannel::White,
            ambient,
        }
    }
}
