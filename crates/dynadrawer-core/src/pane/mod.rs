//! The pane state machine.
//!
//! [`DynamicsDrawer`] owns the simulated pane body and decides which logical
//! [`PaneState`] it is in:
//! - programmatic requests drive the simulation toward a target state
//! - user pans attach the body to the finger and pre-empt requests that allow it
//! - delegate notifications fire once per settled change

mod controller;
mod state;
mod transition;

pub use controller::DynamicsDrawer;
pub use state::{PaneState, PaneStops};
pub use transition::{Completion, DriveKind, PaneId, TransitionOptions, TransitionOutcome};
