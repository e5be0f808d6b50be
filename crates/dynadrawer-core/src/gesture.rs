//! Pan gestures and how they move the pane.
//!
//! The host's gesture recognizer feeds [`PanGesture`] samples to
//! [`crate::DynamicsDrawer::handle_pan`]. While a pan is attached the pane
//! follows the finger; on release it is handed back to the simulation.

use kurbo::{Point, Size, Vec2};

use crate::direction::Direction;
use crate::pane::PaneState;
use crate::physics::PaneBody;
use crate::touch::TouchTarget;

/// Phase of a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample of a pan gesture, in container coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PanGesture {
    pub phase: PanPhase,
    /// Current finger position.
    pub location: Point,
    /// Finger movement since the pan began.
    pub translation: Vec2,
    /// Finger velocity in points/s.
    pub velocity: Vec2,
    /// The element the touch began on, if the host knows it.
    pub target: Option<TouchTarget>,
}

impl PanGesture {
    /// A pan beginning at `location`.
    pub fn began(location: Point) -> Self {
        Self {
            phase: PanPhase::Began,
            location,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: None,
        }
    }

    /// The finger moved.
    pub fn changed(location: Point, translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: PanPhase::Changed,
            location,
            translation,
            velocity,
            target: None,
        }
    }

    /// The finger lifted.
    pub fn ended(location: Point, translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: PanPhase::Ended,
            location,
            translation,
            velocity,
            target: None,
        }
    }

    /// The recognizer cancelled the pan.
    pub fn cancelled(location: Point) -> Self {
        Self {
            phase: PanPhase::Cancelled,
            location,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: None,
        }
    }

    /// Set the element the touch began on.
    pub fn with_target(mut self, target: TouchTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the translation and velocity already accumulated when the
    /// recognizer fired.
    pub fn with_motion(mut self, translation: Vec2, velocity: Vec2) -> Self {
        self.translation = translation;
        self.velocity = velocity;
        self
    }
}

/// Why a pan was not allowed to move the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanRejection {
    /// A transition that disallows user interruption is running.
    Uninterruptible,
    /// The delegate declined the pan.
    Vetoed,
    /// Only screen-edge pans may open the pane, and this one did not start at
    /// an edge with a drawer.
    NotAtScreenEdge,
    /// Drag-reveal is disabled for the implied direction.
    DragDisabled,
    /// No drawer is set in the implied direction.
    NoDrawer,
}

/// What the drawer did with a pan sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanResponse {
    /// The pane is now attached to the finger.
    Attached,
    /// The attached pane followed the finger.
    Moved,
    /// The pane was released toward a state.
    Released(PaneState),
    /// The touch began on a forwarding control; pass it through.
    Forwarded,
    /// The pan may not move the pane; pass it through.
    Rejected(PanRejection),
    /// No pan is attached.
    Ignored,
}

impl PanResponse {
    /// Whether the host should deliver the touch to the underlying content.
    pub fn passes_through(self) -> bool {
        matches!(self, PanResponse::Forwarded | PanResponse::Rejected(_) | PanResponse::Ignored)
    }
}

/// The drawer direction a drag vector would reveal, by its dominant axis.
///
/// Dragging right reveals the left drawer, dragging down reveals the top
/// drawer, and so on. A zero vector implies no direction.
pub fn drag_direction(vector: Vec2) -> Direction {
    if vector.x == 0.0 && vector.y == 0.0 {
        return Direction::NONE;
    }
    if vector.x.abs() >= vector.y.abs() {
        if vector.x > 0.0 { Direction::LEFT } else { Direction::RIGHT }
    } else if vector.y > 0.0 {
        Direction::TOP
    } else {
        Direction::BOTTOM
    }
}

/// Drawer directions whose container edge lies within `margin` of `location`.
pub fn edge_directions(location: Point, bounds: Size, margin: f64) -> Direction {
    let mut edges = Direction::NONE;
    if location.x <= margin {
        edges |= Direction::LEFT;
    }
    if location.x >= bounds.width - margin {
        edges |= Direction::RIGHT;
    }
    if location.y <= margin {
        edges |= Direction::TOP;
    }
    if location.y >= bounds.height - margin {
        edges |= Direction::BOTTOM;
    }
    edges
}

/// A pan attached to the pane.
///
/// Converts finger translation into a body displacement along one active
/// direction at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct PanTracker {
    origin_distance: f64,
    origin_state: PaneState,
    origin_direction: Direction,
    direction: Direction,
}

impl PanTracker {
    /// Start tracking from the body's current position. `settled` is the
    /// logical state the pane was in when the pan began.
    pub fn new(body: &PaneBody, settled: PaneState, settled_direction: Direction) -> Self {
        let direction = if body.is_closed() { Direction::NONE } else { body.direction() };
        Self {
            origin_distance: body.distance(),
            origin_state: settled,
            origin_direction: settled_direction,
            direction,
        }
    }

    /// The direction being dragged, or `NONE` while undetermined.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Logical state when the pan began.
    pub fn origin_state(&self) -> PaneState {
        self.origin_state
    }

    /// Logical direction when the pan began.
    pub fn origin_direction(&self) -> Direction {
        self.origin_direction
    }

    /// Body displacement for a finger translation.
    ///
    /// `allowed` is the set of directions that may be dragged open. Returns
    /// `None` while no allowed direction has been determined. A closed pane
    /// dragged through zero toward an allowed opposite drawer switches
    /// direction.
    pub fn track(&mut self, translation: Vec2, allowed: Direction) -> Option<(Direction, f64)> {
        if self.direction.is_none() {
            let candidate = drag_direction(translation);
            if candidate.is_none() || !allowed.contains(candidate) {
                return None;
            }
            self.direction = candidate;
        }

        let signed = self.origin_distance + translation.dot(self.direction.unit_vector());
        if signed < 0.0 {
            if let Ok(opposite) = self.direction.opposite() {
                if allowed.contains(opposite) {
                    self.direction = opposite;
                    self.origin_distance = -self.origin_distance;
                    return Some((opposite, -signed));
                }
            }
        }
        Some((self.direction, signed.max(0.0)))
    }

    /// Finger velocity projected onto the opening direction.
    pub fn velocity_along(&self, velocity: Vec2) -> f64 {
        velocity.dot(self.direction.unit_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_direction() {
        assert_eq!(drag_direction(Vec2::new(10.0, 2.0)), Direction::LEFT);
        assert_eq!(drag_direction(Vec2::new(-10.0, 2.0)), Direction::RIGHT);
        assert_eq!(drag_direction(Vec2::new(1.0, 8.0)), Direction::TOP);
        assert_eq!(drag_direction(Vec2::new(1.0, -8.0)), Direction::BOTTOM);
        assert_eq!(drag_direction(Vec2::ZERO), Direction::NONE);
    }

    #[test]
    fn test_edge_directions() {
        let bounds = Size::new(320.0, 480.0);
        assert_eq!(edge_directions(Point::new(10.0, 200.0), bounds, 40.0), Direction::LEFT);
        assert_eq!(edge_directions(Point::new(300.0, 200.0), bounds, 40.0), Direction::RIGHT);
        assert_eq!(
            edge_directions(Point::new(5.0, 5.0), bounds, 40.0),
            Direction::LEFT | Direction::TOP
        );
        assert_eq!(edge_directions(Point::new(160.0, 240.0), bounds, 40.0), Direction::NONE);
    }

    #[test]
    fn test_tracker_from_closed_resolves_direction() {
        let body = PaneBody::new();
        let mut tracker = PanTracker::new(&body, PaneState::Closed, Direction::NONE);
        assert_eq!(tracker.direction(), Direction::NONE);

        // No movement yet.
        assert_eq!(tracker.track(Vec2::ZERO, Direction::LEFT), None);
        // Dragging left would reveal the right drawer, which is not allowed.
        assert_eq!(tracker.track(Vec2::new(-30.0, 0.0), Direction::LEFT), None);

        let (direction, distance) = tracker.track(Vec2::new(50.0, 3.0), Direction::LEFT).unwrap();
        assert_eq!(direction, Direction::LEFT);
        assert!((distance - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_from_open_keeps_direction() {
        let mut body = PaneBody::new();
        body.place(Direction::RIGHT, 267.0);
        let mut tracker = PanTracker::new(&body, PaneState::Open, Direction::RIGHT);
        assert_eq!(tracker.direction(), Direction::RIGHT);

        // Finger moves right: the pane closes toward the right drawer's origin.
        let (direction, distance) = tracker.track(Vec2::new(67.0, 0.0), Direction::RIGHT).unwrap();
        assert_eq!(direction, Direction::RIGHT);
        assert!((distance - 200.0).abs() < f64::EPSILON);

        // Past zero without an opposite drawer it stays closed.
        let (_, distance) = tracker.track(Vec2::new(300.0, 0.0), Direction::RIGHT).unwrap();
        assert!(distance.abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_switches_to_opposite() {
        let body = PaneBody::new();
        let mut tracker = PanTracker::new(&body, PaneState::Closed, Direction::NONE);
        let allowed = Direction::HORIZONTAL;

        tracker.track(Vec2::new(40.0, 0.0), allowed).unwrap();
        let (direction, distance) = tracker.track(Vec2::new(-25.0, 0.0), allowed).unwrap();
        assert_eq!(direction, Direction::RIGHT);
        assert!((distance - 25.0).abs() < f64::EPSILON);

        // And back again.
        let (direction, distance) = tracker.track(Vec2::new(10.0, 0.0), allowed).unwrap();
        assert_eq!(direction, Direction::LEFT);
        assert!((distance - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_velocity_along() {
        let mut body = PaneBody::new();
        body.place(Direction::BOTTOM, 100.0);
        let tracker = PanTracker::new(&body, PaneState::Open, Direction::BOTTOM);
        assert!((tracker.velocity_along(Vec2::new(0.0, -400.0)) - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_passes_through() {
        assert!(PanResponse::Forwarded.passes_through());
        assert!(PanResponse::Rejected(PanRejection::Vetoed).passes_through());
        assert!(!PanResponse::Attached.passes_through());
    }
}
