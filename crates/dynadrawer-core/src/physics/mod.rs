//! Physics of the pane: one body, gravity, collision boundaries and bounce.

mod body;
mod simulation;

pub use body::PaneBody;
pub use simulation::{
    BOUNCE_VELOCITY_SCALE, DynamicsSimulation, GRAVITY_SCALE, MAX_SETTLE_TIME, MIN_GRAVITY_MAGNITUDE, Motion,
    StepOutcome,
};
