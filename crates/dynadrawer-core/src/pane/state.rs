//! Logical pane states and the resting positions they map to.

use serde::{Deserialize, Serialize};

/// Visibility state of the pane over a drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaneState {
    /// The drawer is entirely hidden by the pane.
    #[default]
    Closed,
    /// The drawer is revealed to its reveal width.
    Open,
    /// The pane is moved past the container edge; the drawer is fully visible.
    OpenWide,
}

impl PaneState {
    /// States ordered by increasing displacement.
    pub const ALL: [PaneState; 3] = [PaneState::Closed, PaneState::Open, PaneState::OpenWide];

    pub fn is_open(self) -> bool {
        self != PaneState::Closed
    }
}

/// Resting distances of the pane along one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneStops {
    /// Distance of the open state.
    pub reveal: f64,
    /// Distance of the open-wide state.
    pub open_wide: f64,
}

impl PaneStops {
    pub fn new(reveal: f64, open_wide: f64) -> Self {
        Self {
            reveal,
            open_wide: open_wide.max(reveal),
        }
    }

    /// Resting distance of a state.
    pub fn distance(&self, state: PaneState) -> f64 {
        match state {
            PaneState::Closed => 0.0,
            PaneState::Open => self.reveal,
            PaneState::OpenWide => self.open_wide,
        }
    }

    /// The state whose resting distance is closest to `distance`.
    ///
    /// Ties go to the less open state.
    pub fn nearest(&self, distance: f64) -> PaneState {
        PaneState::ALL
            .into_iter()
            .fold((PaneState::Closed, f64::INFINITY), |(best, best_gap), state| {
                let gap = (self.distance(state) - distance).abs();
                if gap < best_gap { (state, gap) } else { (best, best_gap) }
            })
            .0
    }

    /// Where a released pane should come to rest.
    ///
    /// Below `flick_velocity` the nearest state wins. Faster releases go to the
    /// next state in the direction of travel.
    pub fn release_target(&self, distance: f64, velocity: f64, flick_velocity: f64) -> PaneState {
        if velocity.abs() < flick_velocity {
            return self.nearest(distance);
        }
        if velocity > 0.0 {
            PaneState::ALL
                .into_iter()
                .find(|state| self.distance(*state) > distance + f64::EPSILON)
                .unwrap_or(PaneState::OpenWide)
        } else {
            PaneState::ALL
                .into_iter()
                .rev()
                .find(|state| self.distance(*state) < distance - f64::EPSILON)
                .unwrap_or(PaneState::Closed)
        }
    }

    /// Fraction of the reveal width covered by `distance`, clamped to `0.0..=1.0`.
    pub fn open_fraction(&self, distance: f64) -> f64 {
        if self.reveal <= 0.0 {
            return if distance > 0.0 { 1.0 } else { 0.0 };
        }
        (distance / self.reveal).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> PaneStops {
        PaneStops::new(267.0, 340.0)
    }

    #[test]
    fn test_distance() {
        let stops = stops();
        assert!(stops.distance(PaneState::Closed).abs() < f64::EPSILON);
        assert!((stops.distance(PaneState::Open) - 267.0).abs() < f64::EPSILON);
        assert!((stops.distance(PaneState::OpenWide) - 340.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nearest() {
        let stops = stops();
        assert_eq!(stops.nearest(0.0), PaneState::Closed);
        assert_eq!(stops.nearest(100.0), PaneState::Closed);
        assert_eq!(stops.nearest(140.0), PaneState::Open);
        assert_eq!(stops.nearest(300.0), PaneState::Open);
        assert_eq!(stops.nearest(320.0), PaneState::OpenWide);
    }

    #[test]
    fn test_release_target_flicks() {
        let stops = stops();
        // Slow release snaps to the nearest state.
        assert_eq!(stops.release_target(100.0, 200.0, 500.0), PaneState::Closed);
        // Fast opening flick goes to the next state out.
        assert_eq!(stops.release_target(100.0, 900.0, 500.0), PaneState::Open);
        assert_eq!(stops.release_target(267.0, 900.0, 500.0), PaneState::OpenWide);
        assert_eq!(stops.release_target(340.0, 900.0, 500.0), PaneState::OpenWide);
        // Fast closing flick goes to the next state in.
        assert_eq!(stops.release_target(250.0, -900.0, 500.0), PaneState::Closed);
        assert_eq!(stops.release_target(300.0, -900.0, 500.0), PaneState::Open);
        assert_eq!(stops.release_target(0.0, -900.0, 500.0), PaneState::Closed);
    }

    #[test]
    fn test_open_fraction() {
        let stops = stops();
        assert!(stops.open_fraction(0.0).abs() < f64::EPSILON);
        assert!((stops.open_fraction(133.5) - 0.5).abs() < 1e-10);
        assert!((stops.open_fraction(340.0) - 1.0).abs() < f64::EPSILON);
    }
}
