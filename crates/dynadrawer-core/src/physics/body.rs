//! The pane's simulated body.

use kurbo::{Point, Rect, Size, Vec2};

use crate::direction::Direction;

/// The pane as a physical body.
///
/// The body moves along the axis of its active direction only. `distance` is
/// how far the pane has been displaced to reveal that direction's drawer,
/// so `0.0` is closed regardless of direction.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneBody {
    direction: Direction,
    distance: f64,
    velocity: f64,
    attached: bool,
}

impl Default for PaneBody {
    fn default() -> Self {
        Self {
            direction: Direction::NONE,
            distance: 0.0,
            velocity: 0.0,
            attached: false,
        }
    }
}

impl PaneBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// The direction the body is currently displaced toward.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Displacement along the active direction.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Velocity along the active direction, positive when opening.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether the body follows a gesture instead of the simulation.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the body rests at the closed position.
    pub fn is_closed(&self) -> bool {
        self.distance <= f64::EPSILON
    }

    /// Displacement of the pane frame from its closed origin.
    pub fn offset(&self) -> Vec2 {
        self.direction.unit_vector() * self.distance
    }

    /// The pane frame inside a container of the given size.
    pub fn frame(&self, bounds: Size) -> Rect {
        Rect::from_origin_size(Point::ORIGIN + self.offset(), bounds)
    }

    /// Put the body at rest at `distance` along `direction`.
    pub fn place(&mut self, direction: Direction, distance: f64) {
        self.direction = direction;
        self.distance = distance.max(0.0);
        self.velocity = 0.0;
    }

    /// Change the active direction without moving along it.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn set_motion(&mut self, distance: f64, velocity: f64) {
        self.distance = distance;
        self.velocity = velocity;
    }

    /// Attach the body to a gesture.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Release the body to the simulation, keeping its velocity.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Move an attached body to the finger's position, clamped to
    /// `0.0..=limit`, taking the finger's velocity.
    pub fn follow(&mut self, distance: f64, velocity: f64, limit: f64) {
        self.distance = distance.clamp(0.0, limit.max(0.0));
        self.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_body_is_closed() {
        let body = PaneBody::new();
        assert!(body.is_closed());
        assert_eq!(body.offset(), Vec2::ZERO);
        assert!(!body.is_attached());
    }

    #[test]
    fn test_offset_follows_direction() {
        let mut body = PaneBody::new();
        body.place(Direction::LEFT, 100.0);
        assert_eq!(body.offset(), Vec2::new(100.0, 0.0));

        body.place(Direction::RIGHT, 100.0);
        assert_eq!(body.offset(), Vec2::new(-100.0, 0.0));

        body.place(Direction::BOTTOM, 50.0);
        assert_eq!(body.offset(), Vec2::new(0.0, -50.0));
    }

    #[test]
    fn test_frame() {
        let mut body = PaneBody::new();
        body.place(Direction::TOP, 30.0);
        let frame = body.frame(Size::new(320.0, 480.0));
        assert!((frame.y0 - 30.0).abs() < f64::EPSILON);
        assert!((frame.height() - 480.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_follow_clamps() {
        let mut body = PaneBody::new();
        body.attach();
        body.follow(-20.0, -300.0, 340.0);
        assert!(body.distance().abs() < f64::EPSILON);
        assert!((body.velocity() + 300.0).abs() < f64::EPSILON);

        body.follow(400.0, 10.0, 340.0);
        assert!((body.distance() - 340.0).abs() < f64::EPSILON);
    }
}
