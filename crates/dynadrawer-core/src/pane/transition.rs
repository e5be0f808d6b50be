//! Pane state transition requests.

use std::fmt;

use uuid::Uuid;

use crate::direction::Direction;
use crate::gesture::PanTracker;
use crate::physics::Motion;

use super::state::PaneState;

/// Identity of the content hosted in the pane.
pub type PaneId = Uuid;

/// Callback run when a transition finishes. Dropped without being called if
/// the transition is superseded.
pub type Completion = Box<dyn FnOnce()>;

/// How a state change is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Simulate the motion instead of moving the pane immediately.
    pub animated: bool,
    /// Whether a user pan may take over before the pane settles.
    pub allow_user_interruption: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            animated: true,
            allow_user_interruption: true,
        }
    }
}

impl TransitionOptions {
    /// Move the pane without animation.
    pub fn immediate() -> Self {
        Self {
            animated: false,
            allow_user_interruption: true,
        }
    }

    /// Animate, ignoring user pans until the pane settles.
    pub fn uninterruptible() -> Self {
        Self {
            animated: true,
            allow_user_interruption: false,
        }
    }
}

/// Result of a state change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Finished synchronously; the completion has run.
    Completed,
    /// The pane is moving; the completion runs when it settles.
    Started,
    /// No drawer in the requested direction; the completion has run.
    NoOp,
}

/// What happens once a transition settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FollowUp {
    /// Continue toward another state, e.g. opening after closing the other side.
    Open { state: PaneState, direction: Direction },
    /// Swap the pane content, then close.
    ReplacePane(PaneId),
}

/// A transition in flight.
pub(crate) struct Transition {
    pub target: PaneState,
    pub direction: Direction,
    pub motion: Motion,
    pub options: TransitionOptions,
    pub follow_up: Option<FollowUp>,
    pub completion: Option<Completion>,
    /// Whether reaching `target` updates the settled state and notifies the
    /// delegate. Off for legs that only pass through a state.
    pub announce: bool,
}

impl Transition {
    pub fn new(target: PaneState, direction: Direction, options: TransitionOptions) -> Self {
        Self {
            target,
            direction,
            motion: Motion::Settle,
            options,
            follow_up: None,
            completion: None,
            announce: true,
        }
    }

    pub fn bounce(direction: Direction, options: TransitionOptions) -> Self {
        Self {
            motion: Motion::Bounce,
            ..Self::new(PaneState::Closed, direction, options)
        }
    }

    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    pub fn with_completion(mut self, completion: Option<Completion>) -> Self {
        self.completion = completion;
        self
    }

    /// Pass through `target` without settling there.
    pub fn silent(mut self) -> Self {
        self.announce = false;
        self
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("direction", &self.direction)
            .field("motion", &self.motion)
            .field("options", &self.options)
            .field("follow_up", &self.follow_up)
            .field("has_completion", &self.completion.is_some())
            .field("announce", &self.announce)
            .finish()
    }
}

/// Who currently moves the pane.
#[derive(Debug)]
pub(crate) enum DriveSource {
    /// At rest.
    Idle,
    /// Attached to a user pan.
    Gesture(PanTracker),
    /// Moved by the simulation toward a transition's target.
    Simulation(Transition),
}

/// Public view of [`DriveSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveKind {
    Idle,
    Gesture,
    Simulation,
}

impl DriveSource {
    pub fn kind(&self) -> DriveKind {
        match self {
            DriveSource::Idle => DriveKind::Idle,
            DriveSource::Gesture(_) => DriveKind::Gesture,
            DriveSource::Simulation(_) => DriveKind::Simulation,
        }
    }
}
