//! Axis-separated swept collision correction.
//!
//! The resolver takes an actor's circles, its current position, and the
//! displacement it wants this tick, and corrects the displacement against a
//! set of static obstacle squares. The X axis is resolved first and fully
//! applied before the Y axis runs, so the Y pass sees the corrected X
//! position. This is a sequential separating-axis solve, not continuous
//! collision detection: a sufficiently large per-tick displacement can
//! tunnel through thin geometry, which is an accepted limitation.
//!
//! Near corners the correction shrinks the circle's effective half-width via
//! the Pythagorean relation between its radius and how far the centre sits
//! past the obstacle's face on the perpendicular axis, so an actor brushing
//! a corner slides along the free axis instead of snapping a full radius out.

use bevy::prelude::*;

use super::shapes::{Circle, Square};

/// One circle of an actor's collision body, relative to the actor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCircle {
    pub offset: Vec2,
    pub radius: f32,
}

impl BodyCircle {
    pub fn new(offset: Vec2, radius: f32) -> Self {
        Self { offset, radius }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Result of resolving a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOutcome {
    /// Corrected actor coordinate on the resolved axis.
    pub coord: f32,
    /// Whether any obstacle blocked the attempted displacement.
    pub blocked: bool,
    /// Y axis only: whether the correction left the actor above an obstacle.
    pub grounded: bool,
}

/// Result of a full X-then-Y resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResolution {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
}

/// Resolve one axis of an attempted displacement.
///
/// `tangible` is queried per obstacle index; obstacles reporting false are
/// skipped entirely (an intangible coloured brick under a mismatched
/// headlight channel). Corrections chain: once an obstacle clamps the
/// displacement, later obstacles are tested against the clamped value.
///
/// An empty obstacle slice or an actor with no positive-radius circles is
/// not an error; the displacement passes through unchanged.
pub fn resolve_axis<F>(
    axis: Axis,
    circles: &[BodyCircle],
    position: Vec2,
    attempted: f32,
    obstacles: &[Square],
    tangible: &mut F,
) -> AxisOutcome
where
    F: FnMut(usize) -> bool,
{
    let mut translation = attempted;
    let mut blocked = false;
    let mut grounded = false;

    for (index, square) in obstacles.iter().enumerate() {
        if !tangible(index) {
            continue;
        }

        for body in circles {
            if body.radius <= 0.0 {
                continue;
            }

            let centre = position + body.offset;
            let step = match axis {
                Axis::X => Vec2::new(translation, 0.0),
                Axis::Y => Vec2::new(0.0, translation),
            };
            let moved = Circle::new(centre + step, body.radius);
            if !moved.penetrates_square(square) {
                continue;
            }

            blocked = true;

            let half = square.width / 2.0;
            let (along, perp, obstacle_along, obstacle_perp) = match axis {
                Axis::X => (centre.x, centre.y, square.centre.x, square.centre.y),
                Axis::Y => (centre.y, centre.x, square.centre.y, square.centre.x),
            };

            let reach = local_reach(body.radius, (perp - obstacle_perp).abs(), half);
            let corrected_centre = snap_outside(along, obstacle_along, reach, half);
            let corrected_actor = match axis {
                Axis::X => corrected_centre - body.offset.x,
                Axis::Y => corrected_centre - body.offset.y,
            };

            translation = match axis {
                Axis::X => corrected_actor - position.x,
                Axis::Y => corrected_actor - position.y,
            };

            // Collision against the top face of an obstacle below.
            if axis == Axis::Y && square.centre.y > corrected_actor {
                grounded = true;
            }
        }
    }

    let coord = match axis {
        Axis::X => position.x,
        Axis::Y => position.y,
    } + translation;

    AxisOutcome {
        coord,
        blocked,
        grounded,
    }
}

/// Resolve a full tick's displacement, X first, then Y from the corrected X
/// position. Blocked axes zero the matching velocity component.
pub fn resolve_move<F>(
    circles: &[BodyCircle],
    position: Vec2,
    velocity: Vec2,
    delta: Vec2,
    obstacles: &[Square],
    mut tangible: F,
) -> MoveResolution
where
    F: FnMut(usize) -> bool,
{
    let x = resolve_axis(Axis::X, circles, position, delta.x, obstacles, &mut tangible);
    let after_x = Vec2::new(x.coord, position.y);
    let y = resolve_axis(Axis::Y, circles, after_x, delta.y, obstacles, &mut tangible);

    MoveResolution {
        position: Vec2::new(x.coord, y.coord),
        velocity: Vec2::new(
            if x.blocked { 0.0 } else { velocity.x },
            if y.blocked { 0.0 } else { velocity.y },
        ),
        grounded: y.grounded,
    }
}

/// Effective circle half-width on the resolved axis.
///
/// When the centre sits within the obstacle's face span on the perpendicular
/// axis the full radius applies. Past the face the contact point moves onto
/// the corner arc and the reach shrinks to sqrt(r² - overhang²).
fn local_reach(radius: f32, perp_distance: f32, half_width: f32) -> f32 {
    if perp_distance > half_width {
        let overhang = perp_distance - half_width;
        let reach_sq = radius * radius - overhang * overhang;
        if reach_sq >= 0.0 {
            return reach_sq.sqrt();
        }
    }
    radius
}

/// Closest coordinate on the near side of the obstacle at which a circle
/// with the given reach no longer overlaps it.
fn snap_outside(from: f32, obstacle_centre: f32, reach: f32, half_width: f32) -> f32 {
    if from < obstacle_centre {
        obstacle_centre - half_width - reach
    } else {
        obstacle_centre + half_width + reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn body() -> Vec<BodyCircle> {
        vec![BodyCircle::new(Vec2::ZERO, 30.0)]
    }

    fn solid(_: usize) -> bool {
        true
    }

    /// Distance from a circle centre to the nearest point of a square, for
    /// penetration assertions.
    fn clearance(centre: Vec2, square: &Square) -> f32 {
        let cx = centre.x.clamp(square.left(), square.right());
        let cy = centre.y.clamp(square.top(), square.bottom());
        centre.distance(Vec2::new(cx, cy))
    }

    #[test]
    fn test_unobstructed_move_passes_through() {
        let result = resolve_move(
            &body(),
            Vec2::ZERO,
            Vec2::new(100.0, 50.0),
            Vec2::new(1.6, 0.8),
            &[],
            solid,
        );

        assert_eq!(result.position, Vec2::new(1.6, 0.8));
        assert_eq!(result.velocity, Vec2::new(100.0, 50.0));
        assert!(!result.grounded);
    }

    #[test]
    fn test_zero_radius_actor_is_a_no_op() {
        let ghostly = vec![BodyCircle::new(Vec2::ZERO, 0.0)];
        let wall = [Square::new(Vec2::new(10.0, 0.0), 60.0)];

        let result = resolve_move(&ghostly, Vec2::ZERO, Vec2::new(60.0, 0.0), Vec2::new(1.0, 0.0), &wall, solid);

        assert_eq!(result.position.x, 1.0);
        assert_eq!(result.velocity.x, 60.0);
    }

    #[test]
    fn test_wall_to_the_right_snaps_tangent() {
        // 16ms tick at 100 px/s into a 60px brick 50px to the right.
        let wall = [Square::new(Vec2::new(50.0, 0.0), 60.0)];
        let velocity = Vec2::new(100.0, 0.0);
        let delta = velocity * 0.016;

        let result = resolve_move(&body(), Vec2::ZERO, velocity, delta, &wall, solid);

        // Circle edge flush with the brick's left face at x = 20.
        assert!((result.position.x + 30.0 - wall[0].left()).abs() < EPS);
        assert_eq!(result.velocity.x, 0.0);
        assert!(clearance(result.position, &wall[0]) >= 30.0 - EPS);
    }

    #[test]
    fn test_landing_sets_grounded_and_zeroes_vertical_velocity() {
        // Brick below (y points down).
        let floor = [Square::new(Vec2::new(0.0, 60.0), 60.0)];
        let velocity = Vec2::new(0.0, 300.0);

        let result = resolve_move(&body(), Vec2::ZERO, velocity, Vec2::new(0.0, 5.0), &floor, solid);

        assert!((result.position.y - 0.0).abs() < EPS);
        assert_eq!(result.velocity.y, 0.0);
        assert!(result.grounded);
        assert!(clearance(result.position, &floor[0]) >= 30.0 - EPS);
    }

    #[test]
    fn test_ceiling_hit_does_not_ground() {
        let ceiling = [Square::new(Vec2::new(0.0, -60.0), 60.0)];

        let result = resolve_move(
            &body(),
            Vec2::ZERO,
            Vec2::new(0.0, -300.0),
            Vec2::new(0.0, -5.0),
            &ceiling,
            solid,
        );

        assert_eq!(result.velocity.y, 0.0);
        assert!(!result.grounded);
    }

    #[test]
    fn test_corner_contact_shrinks_reach() {
        // Centre 50px above the brick centre: 20px past the face, so the
        // corner arc applies and reach = sqrt(900 - 400).
        let brick = Square::new(Vec2::new(0.0, 0.0), 60.0);
        let position = Vec2::new(-60.0, -50.0);

        let out = resolve_axis(
            Axis::X,
            &body(),
            position,
            40.0,
            std::slice::from_ref(&brick),
            &mut solid,
        );

        let expected = -30.0 - (900.0f32 - 400.0).sqrt();
        assert!(out.blocked);
        assert!((out.coord - expected).abs() < EPS);
        assert!(clearance(Vec2::new(out.coord, position.y), &brick) >= 30.0 - EPS);
    }

    #[test]
    fn test_x_resolves_before_y() {
        // Moving diagonally into the inside of an L: the X pass stops at the
        // wall, then the Y pass lands on the floor from the corrected X.
        let bricks = [
            Square::new(Vec2::new(60.0, 0.0), 60.0),
            Square::new(Vec2::new(0.0, 60.0), 60.0),
        ];

        let result = resolve_move(
            &body(),
            Vec2::ZERO,
            Vec2::new(200.0, 200.0),
            Vec2::new(5.0, 5.0),
            &bricks,
            solid,
        );

        assert!((result.position.x - 0.0).abs() < EPS);
        assert!((result.position.y - 0.0).abs() < EPS);
        assert_eq!(result.velocity, Vec2::ZERO);
        assert!(result.grounded);
    }

    #[test]
    fn test_corrections_chain_across_obstacles() {
        // Two bricks side by side; the second is tested with the clamped
        // translation from the first and must not push the actor further.
        let bricks = [
            Square::new(Vec2::new(60.0, 0.0), 60.0),
            Square::new(Vec2::new(120.0, 0.0), 60.0),
        ];

        let result = resolve_move(
            &body(),
            Vec2::ZERO,
            Vec2::new(500.0, 0.0),
            Vec2::new(8.0, 0.0),
            &bricks,
            solid,
        );

        assert!((result.position.x - 0.0).abs() < EPS);
        assert_eq!(result.velocity.x, 0.0);
    }

    #[test]
    fn test_head_circle_stops_ascent() {
        let circles = vec![
            BodyCircle::new(Vec2::ZERO, 30.0),
            BodyCircle::new(Vec2::new(0.0, -48.0), 20.0),
        ];
        let brick = [Square::new(Vec2::new(0.0, -108.0), 60.0)];

        let result = resolve_move(
            &circles,
            Vec2::ZERO,
            Vec2::new(0.0, -400.0),
            Vec2::new(0.0, -15.0),
            &brick,
            solid,
        );

        // Head edge flush with the brick's bottom face at y = -78.
        assert!((result.position.y - -10.0).abs() < EPS);
        assert_eq!(result.velocity.y, 0.0);
        assert!(!result.grounded);
    }

    #[test]
    fn test_intangible_obstacles_are_skipped() {
        let wall = [Square::new(Vec2::new(50.0, 0.0), 60.0)];

        let through = resolve_move(
            &body(),
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            Vec2::new(1.6, 0.0),
            &wall,
            |_| false,
        );
        let blocked = resolve_move(
            &body(),
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            Vec2::new(1.6, 0.0),
            &wall,
            solid,
        );

        assert_eq!(through.position.x, 1.6);
        assert_eq!(through.velocity.x, 100.0);
        assert!((blocked.position.x - -10.0).abs() < EPS);
        assert_eq!(blocked.velocity.x, 0.0);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let wall = [Square::new(Vec2::new(50.0, 20.0), 60.0)];
        let a = resolve_move(&body(), Vec2::ZERO, Vec2::new(90.0, 10.0), Vec2::new(1.5, 0.2), &wall, solid);
        let b = resolve_move(&body(), Vec2::ZERO, Vec2::new(90.0, 10.0), Vec2::new(1.5, 0.2), &wall, solid);

        assert_eq!(a, b);
    }
}
