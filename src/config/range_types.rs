use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A movement speed in px/s, constrained to [10.0, 3000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 10.0;
    const MAX: f32 = 3000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// An acceleration in px/s², constrained to [10.0, 20000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Acceleration(f32);

impl Acceleration {
    const MIN: f32 = 10.0;
    const MAX: f32 = 20000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Self::new(600.0)
    }
}

/// A flight budget in seconds, constrained to [0.1, 60.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct FlightSeconds(f32);

impl FlightSeconds {
    const MIN: f32 = 0.1;
    const MAX: f32 = 60.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for FlightSeconds {
    fn default() -> Self {
        Self::new(1.5)
    }
}

/// A sight radius in pixels, constrained to [60.0, 6000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct SightRange(f32);

impl SightRange {
    const MIN: f32 = 60.0;
    const MAX: f32 = 6000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for SightRange {
    fn default() -> Self {
        Self::new(500.0)
    }
}

/// A path staleness threshold in pixels, constrained to [1.0, 600.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct StaleDistance(f32);

impl StaleDistance {
    const MIN: f32 = 1.0;
    const MAX: f32 = 600.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for StaleDistance {
    fn default() -> Self {
        Self::new(60.0)
    }
}
