//! DynaDrawer Core Library
//!
//! Platform-agnostic engine for a "dynamics drawer": a content pane laid over
//! up to two drawers that slides to reveal them. The pane is moved by a small
//! physics simulation (gravity, collision boundaries, bounce) and by user
//! pans, which may interrupt the simulation at any time.
//!
//! Rendering and gesture recognition belong to the host. The host feeds
//! [`PanGesture`] samples and display-clock ticks in, and reads the pane frame
//! and delegate/styler notifications out.

pub mod clock;
pub mod config;
pub mod delegate;
pub mod direction;
pub mod error;
pub mod gesture;
pub mod pane;
pub mod physics;
pub mod registry;
pub mod styler;
pub mod touch;

pub use clock::{FrameClock, FrameDriver};
pub use config::{DrawerConfig, DynamicsConfig, GestureConfig};
pub use delegate::DrawerDelegate;
pub use direction::{Axis, Direction};
pub use error::{DrawerError, DrawerResult};
pub use gesture::{PanGesture, PanPhase, PanRejection, PanResponse};
pub use pane::{
    Completion, DriveKind, DynamicsDrawer, PaneId, PaneState, PaneStops, TransitionOptions,
    TransitionOutcome,
};
pub use physics::{DynamicsSimulation, Motion, PaneBody};
pub use registry::{DrawerId, DrawerRegistry};
pub use styler::{Styler, StylerRegistry};
pub use touch::{TouchForwardingPolicy, TouchTarget};

// Re-export kurbo for convenience
pub use kurbo;
