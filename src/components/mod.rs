use bevy::prelude::*;
use derive_more::{Add, Display, From, Mul};

use crate::collision::{BodyCircle, Circle, Hitbox, Square};
use crate::level::BRICK_SIZE;
use crate::lighting::BrickColor;
use crate::pathfinding::NavPath;

/// Simulation-space motion state: world pixel position (y pointing down)
/// and velocity in px/s. Rendering adapters read this; the simulation never
/// touches `Transform`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct Speed(pub f32);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Add, Mul, Display, From)]
pub struct Distance(pub f32);

impl Speed {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: Speed = Speed(0.0);
}

impl Distance {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: Distance = Distance(0.0);
}

/// Remaining flight time in seconds.
///
/// Drains in real time while flying; recharges at double rate while the
/// robot stands on something.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FlightPool {
    pub current: f32,
    pub max: f32,
}

impl FlightPool {
    pub const RECHARGE_FACTOR: f32 = 2.0;

    pub fn new_full(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn is_empty(self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(self) -> bool {
        self.current >= self.max
    }

    pub fn percentage(self) -> f32 {
        if self.max > 0.0 { self.current / self.max } else { 0.0 }
    }

    pub fn drain(&mut self, seconds: f32) {
        self.current = (self.current - seconds).max(0.0);
    }

    pub fn recharge(&mut self, seconds: f32) {
        self.current = (self.current + seconds * Self::RECHARGE_FACTOR).min(self.max);
    }
}

/// The player character: a rolling ball body with a lamp head above it.
#[derive(Component, Debug)]
pub struct Robot {
    pub spawn: Vec2,
    pub grounded: bool,
    pub is_flying: bool,
    pub accelerating_left: bool,
    pub accelerating_right: bool,
    pub flight: FlightPool,
}

impl Robot {
    pub const BODY_RADIUS: f32 = BRICK_SIZE / 2.0;
    pub const HEAD_RADIUS: f32 = 20.0;
    pub const HEAD_OFFSET: Vec2 = Vec2::new(0.0, -48.0);

    pub fn new(spawn: Vec2, max_flight_seconds: f32) -> Self {
        Self {
            spawn,
            grounded: false,
            is_flying: false,
            accelerating_left: false,
            accelerating_right: false,
            flight: FlightPool::new_full(max_flight_seconds),
        }
    }

    /// Body and head circles, relative to the robot position. Both take part
    /// in collision resolution.
    pub fn collision_circles() -> [BodyCircle; 2] {
        [
            BodyCircle::new(Vec2::ZERO, Self::BODY_RADIUS),
            BodyCircle::new(Self::HEAD_OFFSET, Self::HEAD_RADIUS),
        ]
    }

    /// World-space hitbox for overlap queries (doors, signs, ghosts).
    pub fn hitbox(position: Vec2) -> Hitbox {
        Hitbox::new(
            Self::collision_circles()
                .into_iter()
                .map(|body| Circle::new(position + body.offset, body.radius))
                .collect(),
            vec![],
        )
    }

    /// Put the robot back at its spawn point, standing still.
    pub fn reset(&mut self, motion: &mut Motion) {
        motion.position = self.spawn;
        motion.velocity = Vec2::ZERO;
        self.grounded = false;
        self.is_flying = false;
    }
}

/// A pursuer. Remembers where it last saw the robot and follows the
/// navigation graph toward that point.
#[derive(Component, Debug)]
pub struct Ghost {
    pub spawn: Vec2,
    pub speed: Speed,
    pub sight_range: Distance,
    pub last_seen: Option<Vec2>,
    pub path: NavPath,
}

impl Ghost {
    pub fn new(spawn: Vec2, speed: Speed, sight_range: Distance) -> Self {
        Self {
            spawn,
            speed,
            sight_range,
            last_seen: None,
            path: NavPath::default(),
        }
    }

    pub fn hitbox(position: Vec2) -> Square {
        Square::new(position, BRICK_SIZE)
    }

    /// External repositioning invalidates everything the ghost knew.
    pub fn reset(&mut self, motion: &mut Motion) {
        motion.position = self.spawn;
        motion.velocity = Vec2::ZERO;
        self.last_seen = None;
        self.path.clear();
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Brick {
    pub colour: BrickColor,
}

impl Brick {
    pub fn hitbox(position: Vec2) -> Square {
        Square::new(position, BRICK_SIZE)
    }
}

/// A passage to another level, two tiles tall.
#[derive(Component, Debug, Clone)]
pub struct Door {
    pub next_level: String,
}

impl Door {
    pub fn hitbox(position: Vec2) -> Hitbox {
        Hitbox::new(
            vec![],
            vec![
                Square::new(position, BRICK_SIZE),
                Square::new(position + Vec2::new(0.0, -BRICK_SIZE), BRICK_SIZE),
            ],
        )
    }
}

#[derive(Component, Debug, Clone)]
pub struct Sign {
    pub text: String,
}

impl Sign {
    pub fn hitbox(position: Vec2) -> Square {
        Square::new(position, BRICK_SIZE)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Torch;

/// Marker for entities owned by the currently loaded level, despawned
/// wholesale on level change.
#[derive(Component, Debug, Clone, Copy)]
pub struct LevelEntity;
