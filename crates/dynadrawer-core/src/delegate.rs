//! Observer of pane state changes.

use crate::direction::Direction;
use crate::gesture::PanGesture;
use crate::pane::PaneState;

/// Receives pane state notifications. Every method has a default, so
/// implement only what you need.
///
/// For `Closed`, `direction` is the direction the pane is closing from; for
/// the open states it is the direction being opened.
pub trait DrawerDelegate {
    /// The pane is about to move toward `state`. Interruption may prevent
    /// a matching [`did_update_to_pane_state`](Self::did_update_to_pane_state).
    fn may_update_to_pane_state(&mut self, _state: PaneState, _direction: Direction) {}

    /// The pane settled in `state`. Called exactly once per settled change.
    fn did_update_to_pane_state(&mut self, _state: PaneState, _direction: Direction) {}

    /// Asked before every pan is allowed to move the pane.
    fn should_begin_pane_pan(&mut self, _gesture: &PanGesture) -> bool {
        true
    }
}
