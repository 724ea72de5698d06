//! Pure velocity integration for the robot, testable without an ECS runtime.
//!
//! Coordinates are pixels with y pointing down, so gravity is positive y and
//! flight thrust is negative y. Horizontal input accelerates toward a speed
//! cap; releasing input decelerates toward zero without overshooting.

use bevy::prelude::*;

/// Which direction inputs are held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub accelerating_left: bool,
    pub accelerating_right: bool,
    pub flying: bool,
}

/// Tuning constants for the integration, in px/s and px/s².
#[derive(Debug, Clone, Copy)]
pub struct MovementTuning {
    pub horizontal_acceleration: f32,
    pub horizontal_deceleration: f32,
    pub max_horizontal_speed: f32,
    pub max_vertical_speed: f32,
    pub gravity: f32,
    pub flight_thrust: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            horizontal_acceleration: 600.0,
            horizontal_deceleration: 1800.0,
            max_horizontal_speed: 900.0,
            max_vertical_speed: 900.0,
            gravity: 600.0,
            flight_thrust: 600.0,
        }
    }
}

/// Advance a velocity by one tick of input, gravity, and flight thrust.
pub fn integrate_velocity(
    velocity: Vec2,
    input: MovementInput,
    tuning: &MovementTuning,
    dt: f32,
) -> Vec2 {
    let mut velocity = velocity;

    if input.accelerating_right {
        velocity.x = (velocity.x + tuning.horizontal_acceleration * dt)
            .min(tuning.max_horizontal_speed);
    }
    if input.accelerating_left {
        velocity.x = (velocity.x - tuning.horizontal_acceleration * dt)
            .max(-tuning.max_horizontal_speed);
    }
    if !input.accelerating_right && velocity.x > 0.0 {
        velocity.x = (velocity.x - tuning.horizontal_deceleration * dt).max(0.0);
    }
    if !input.accelerating_left && velocity.x < 0.0 {
        velocity.x = (velocity.x + tuning.horizontal_deceleration * dt).min(0.0);
    }

    if input.flying {
        velocity.y = (velocity.y - tuning.flight_thrust * dt).max(-tuning.max_vertical_speed);
    } else {
        velocity.y = (velocity.y + tuning.gravity * dt).min(tuning.max_vertical_speed);
    }

    velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn tuning() -> MovementTuning {
        MovementTuning::default()
    }

    #[test]
    fn test_accelerates_right_up_to_cap() {
        let input = MovementInput {
            accelerating_right: true,
            ..Default::default()
        };

        let mut velocity = Vec2::ZERO;
        for _ in 0..200 {
            velocity = integrate_velocity(velocity, input, &tuning(), DT);
        }

        assert_eq!(velocity.x, tuning().max_horizontal_speed);
    }

    #[test]
    fn test_released_input_decelerates_to_exactly_zero() {
        let input = MovementInput::default();

        let mut velocity = Vec2::new(500.0, 0.0);
        for _ in 0..60 {
            velocity = integrate_velocity(velocity, input, &tuning(), DT);
        }

        assert_eq!(velocity.x, 0.0);
    }

    #[test]
    fn test_deceleration_does_not_overshoot() {
        let input = MovementInput::default();

        // One tick of deceleration is 30 px/s; starting below that must stop
        // at zero, not reverse.
        let velocity = integrate_velocity(Vec2::new(10.0, 0.0), input, &tuning(), DT);
        assert_eq!(velocity.x, 0.0);

        let velocity = integrate_velocity(Vec2::new(-10.0, 0.0), input, &tuning(), DT);
        assert_eq!(velocity.x, 0.0);
    }

    #[test]
    fn test_gravity_pulls_down_to_terminal_speed() {
        let input = MovementInput::default();

        let mut velocity = Vec2::ZERO;
        for _ in 0..200 {
            velocity = integrate_velocity(velocity, input, &tuning(), DT);
        }

        // y points down: positive terminal velocity.
        assert_eq!(velocity.y, tuning().max_vertical_speed);
    }

    #[test]
    fn test_flight_thrust_overcomes_gravity() {
        let input = MovementInput {
            flying: true,
            ..Default::default()
        };

        let mut velocity = Vec2::new(0.0, 200.0);
        for _ in 0..200 {
            velocity = integrate_velocity(velocity, input, &tuning(), DT);
        }

        assert_eq!(velocity.y, -tuning().max_vertical_speed);
    }

    #[test]
    fn test_opposing_inputs_cancel() {
        let input = MovementInput {
            accelerating_left: true,
            accelerating_right: true,
            ..Default::default()
        };

        let velocity = integrate_velocity(Vec2::ZERO, input, &tuning(), DT);
        assert_eq!(velocity.x, 0.0);
    }
}
