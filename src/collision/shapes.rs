//! Geometric collision primitives.
//!
//! All shapes live in world pixel space with the y axis pointing down
//! (screen convention). The tests are pure, stateless, and symmetric:
//! `Square::collides_with_circle` delegates to the circle test so both
//! argument orders always agree.

use bevy::prelude::*;

/// A circle in world pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub centre: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(centre: Vec2, radius: f32) -> Self {
        Self { centre, radius }
    }

    /// Circles collide when their centres are no further apart than the sum
    /// of their radii. Tangent contact counts as a collision.
    pub fn collides_with_circle(&self, other: &Circle) -> bool {
        self.centre.distance(other.centre) <= self.radius + other.radius
    }

    /// Clamp the centre onto the square's boundary and compare the distance
    /// to the radius.
    pub fn collides_with_square(&self, square: &Square) -> bool {
        let test_x = self.centre.x.clamp(square.left(), square.right());
        let test_y = self.centre.y.clamp(square.top(), square.bottom());

        let dist_x = self.centre.x - test_x;
        let dist_y = self.centre.y - test_y;
        (dist_x * dist_x + dist_y * dist_y).sqrt() <= self.radius
    }

    /// Strict variant of [`collides_with_square`]: true only on actual
    /// overlap, not tangent contact. The resolver snaps actors to exact
    /// tangency, so its collision test must not re-trigger on the contact
    /// it just produced.
    ///
    /// [`collides_with_square`]: Circle::collides_with_square
    pub fn penetrates_square(&self, square: &Square) -> bool {
        let test_x = self.centre.x.clamp(square.left(), square.right());
        let test_y = self.centre.y.clamp(square.top(), square.bottom());

        let dist_x = self.centre.x - test_x;
        let dist_y = self.centre.y - test_y;
        (dist_x * dist_x + dist_y * dist_y).sqrt() < self.radius
    }

    pub fn translated(&self, translation: Vec2) -> Circle {
        Circle::new(self.centre + translation, self.radius)
    }
}

/// An axis-aligned square in world pixel space, stored as centre + width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub centre: Vec2,
    pub width: f32,
}

impl Square {
    pub fn new(centre: Vec2, width: f32) -> Self {
        Self { centre, width }
    }

    pub fn left(&self) -> f32 {
        self.centre.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.centre.x + self.width / 2.0
    }

    /// Smallest y edge. With y pointing down this is the visually upper edge.
    pub fn top(&self) -> f32 {
        self.centre.y - self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.centre.y + self.width / 2.0
    }

    pub fn collides_with_circle(&self, circle: &Circle) -> bool {
        circle.collides_with_square(self)
    }

    /// Interval overlap on both axes. Shared edges count as a collision.
    pub fn collides_with_square(&self, other: &Square) -> bool {
        let x_overlap = self.left() <= other.right() && self.right() >= other.left();
        let y_overlap = self.top() <= other.bottom() && self.bottom() >= other.top();

        x_overlap && y_overlap
    }

    pub fn translated(&self, translation: Vec2) -> Square {
        Square::new(self.centre + translation, self.width)
    }
}

/// An entity's collision shape: a union of circles and squares.
///
/// Robots carry two circles (body + head), bricks and ghosts one square,
/// doors two stacked squares. An empty hitbox collides with nothing.
#[derive(Debug, Clone, Default)]
pub struct Hitbox {
    pub circles: Vec<Circle>,
    pub squares: Vec<Square>,
}

impl Hitbox {
    pub fn new(circles: Vec<Circle>, squares: Vec<Square>) -> Self {
        Self { circles, squares }
    }

    pub fn collides_with(&self, other: &Hitbox) -> bool {
        self.circles.iter().any(|c| other.collides_with_circle(c))
            || self.squares.iter().any(|s| other.collides_with_square(s))
    }

    pub fn collides_with_circle(&self, circle: &Circle) -> bool {
        self.circles.iter().any(|c| circle.collides_with_circle(c))
            || self.squares.iter().any(|s| circle.collides_with_square(s))
    }

    pub fn collides_with_square(&self, square: &Square) -> bool {
        self.circles.iter().any(|c| c.collides_with_square(square))
            || self.squares.iter().any(|s| square.collides_with_square(s))
    }

    pub fn translated(&self, translation: Vec2) -> Hitbox {
        Hitbox {
            circles: self.circles.iter().map(|c| c.translated(translation)).collect(),
            squares: self.squares.iter().map(|s| s.translated(translation)).collect(),
        }
    }
}
