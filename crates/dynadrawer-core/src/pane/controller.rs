//! The drawer engine: pane state, gestures and simulation in one place.

use std::mem;
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};

use crate::clock::{FrameClock, FrameDriver};
use crate::config::{DrawerConfig, DynamicsConfig, GestureConfig};
use crate::delegate::DrawerDelegate;
use crate::direction::{Axis, Direction};
use crate::error::{DrawerError, DrawerResult};
use crate::gesture::{
    PanGesture, PanPhase, PanRejection, PanResponse, PanTracker, drag_direction, edge_directions,
};
use crate::physics::{BOUNCE_VELOCITY_SCALE, DynamicsSimulation, Motion, StepOutcome};
use crate::registry::{DrawerId, DrawerRegistry};
use crate::styler::{Styler, StylerRegistry};
use crate::touch::TouchForwardingPolicy;

use super::state::{PaneState, PaneStops};
use super::transition::{
    Completion, DriveKind, DriveSource, FollowUp, PaneId, Transition, TransitionOptions,
    TransitionOutcome,
};

/// A pane laid over one or two drawers, moved by a physics simulation and by
/// user pans.
///
/// Single-threaded: the host calls [`tick`](Self::tick) from its display
/// clock and [`handle_pan`](Self::handle_pan) from its gesture recognizer, on
/// the same thread.
pub struct DynamicsDrawer {
    config: DrawerConfig,
    bounds: Size,
    registry: DrawerRegistry,
    touch_policy: TouchForwardingPolicy,
    stylers: StylerRegistry,
    delegate: Option<Box<dyn DrawerDelegate>>,
    frames: FrameDriver,
    simulation: DynamicsSimulation,
    drive: DriveSource,
    pane_state: PaneState,
    /// Settled direction; `NONE` while closed.
    direction: Direction,
    pane: Option<PaneId>,
}

impl DynamicsDrawer {
    /// Create a drawer for a container of the given size, with default settings.
    pub fn new(bounds: Size) -> Self {
        let config = DrawerConfig::default();
        Self {
            registry: DrawerRegistry::new(config.reveal_width_horizontal, config.reveal_width_vertical),
            config,
            bounds,
            touch_policy: TouchForwardingPolicy::default(),
            stylers: StylerRegistry::default(),
            delegate: None,
            frames: FrameDriver::default(),
            simulation: DynamicsSimulation::default(),
            drive: DriveSource::Idle,
            pane_state: PaneState::Closed,
            direction: Direction::NONE,
            pane: None,
        }
    }

    /// Create a drawer with the given configuration.
    pub fn with_config(bounds: Size, config: DrawerConfig) -> DrawerResult<Self> {
        let mut drawer = Self::new(bounds);
        drawer.set_config(config)?;
        Ok(drawer)
    }

    // --- Configuration ---

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Replace the whole configuration after validating it.
    pub fn set_config(&mut self, config: DrawerConfig) -> DrawerResult<()> {
        config.validate()?;
        self.registry
            .set_default_widths(config.reveal_width_horizontal, config.reveal_width_vertical);
        self.config = config;
        self.retarget_in_flight();
        self.reposition_at_rest();
        Ok(())
    }

    /// Dynamics parameters. Changes apply from the next simulation step.
    ///
    /// Values are not validated here. The simulation raises a gravity magnitude
    /// below [`MIN_GRAVITY_MAGNITUDE`](crate::physics::MIN_GRAVITY_MAGNITUDE)
    /// to that floor and clamps elasticities to `0.0..=1.0`. A changed `open_wide_edge_offset` takes
    /// effect with the next transition.
    pub fn dynamics_mut(&mut self) -> &mut DynamicsConfig {
        &mut self.config.dynamics
    }

    /// Gesture options.
    pub fn gestures_mut(&mut self) -> &mut GestureConfig {
        &mut self.config.gestures
    }

    /// Whether replacing the pane slides the old one off screen first.
    pub fn set_pane_view_slide_off_animation_enabled(&mut self, enabled: bool) {
        self.config.pane_view_slide_off_animation_enabled = enabled;
    }

    pub fn set_delegate(&mut self, delegate: Option<Box<dyn DrawerDelegate>>) {
        self.delegate = delegate;
    }

    /// Install the host's display clock.
    pub fn set_frame_clock(&mut self, clock: Option<Box<dyn FrameClock>>) {
        self.frames.set_clock(clock);
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Resize the container. Moves the open-wide position with it, for a
    /// resting pane as well as one on its way there.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.retarget_in_flight();
        self.reposition_at_rest();
    }

    // --- Drawers ---

    /// Set or clear (with `None`) the drawer in a single direction.
    ///
    /// Clearing the drawer the pane is open over, or moving toward, closes
    /// the pane immediately. A transition or pan headed there is dropped
    /// along with its completion.
    pub fn set_drawer(&mut self, drawer: Option<DrawerId>, direction: Direction) -> DrawerResult<()> {
        self.registry.assign(drawer, direction)?;

        if drawer.is_none() && self.is_headed(direction) {
            let body = self.simulation.body();
            let displaced = if body.direction().is_single() { body.direction() } else { direction };
            let closing_from = if self.pane_state.is_open() { self.direction } else { displaced };
            log::debug!("Drawer in {direction} cleared, closing the pane");

            self.supersede();
            self.frames.halt();
            self.simulation.body_mut().place(displaced, 0.0);
            self.update_stylers();
            self.settle_state(PaneState::Closed, closing_from);
        }
        Ok(())
    }

    /// The drawer set in a single direction.
    pub fn drawer(&self, direction: Direction) -> DrawerResult<Option<DrawerId>> {
        self.registry.drawer(direction)
    }

    /// Directions that have a drawer.
    pub fn possible_drawer_direction(&self) -> Direction {
        self.registry.possible_directions()
    }

    pub fn registry(&self) -> &DrawerRegistry {
        &self.registry
    }

    /// Set the reveal width for every direction in `mask`. A pane resting open
    /// in one of them moves to the new width; one still moving there settles
    /// at the new width.
    pub fn set_reveal_width(&mut self, width: f64, mask: Direction) -> DrawerResult<()> {
        self.registry.set_reveal_width(width, mask)?;
        self.retarget_in_flight();
        self.reposition_at_rest();
        Ok(())
    }

    /// Reveal width for a single direction.
    pub fn reveal_width(&self, direction: Direction) -> DrawerResult<f64> {
        self.registry.reveal_width(direction)
    }

    /// How far the pane is currently displaced.
    ///
    /// `0.0` when closed, the direction's reveal width when open.
    pub fn current_reveal_width(&self) -> f64 {
        self.simulation.body().distance()
    }

    pub fn set_pane_drag_reveal_enabled(&mut self, enabled: bool, mask: Direction) -> DrawerResult<()> {
        self.registry.set_drag_enabled(enabled, mask)
    }

    pub fn pane_drag_reveal_enabled(&self, direction: Direction) -> DrawerResult<bool> {
        self.registry.drag_enabled(direction)
    }

    pub fn set_pane_tap_to_close_enabled(&mut self, enabled: bool, mask: Direction) -> DrawerResult<()> {
        self.registry.set_tap_to_close_enabled(enabled, mask)
    }

    pub fn pane_tap_to_close_enabled(&self, direction: Direction) -> DrawerResult<bool> {
        self.registry.tap_to_close_enabled(direction)
    }

    /// Register a control type through which pans are forwarded.
    pub fn register_touch_forwarding_type(&mut self, type_identifier: impl Into<String>) {
        self.touch_policy.register(type_identifier);
    }

    pub fn touch_policy(&self) -> &TouchForwardingPolicy {
        &self.touch_policy
    }

    // --- Stylers ---

    pub fn add_styler(&mut self, styler: Rc<dyn Styler>, mask: Direction) {
        self.stylers.add(styler, mask);
    }

    pub fn add_stylers(&mut self, stylers: impl IntoIterator<Item = Rc<dyn Styler>>, mask: Direction) {
        self.stylers.add_all(stylers, mask);
    }

    pub fn remove_styler(&mut self, styler: &Rc<dyn Styler>, mask: Direction) {
        self.stylers.remove(styler, mask);
    }

    pub fn stylers_for_direction(&self, mask: Direction) -> Vec<Rc<dyn Styler>> {
        self.stylers.stylers_for(mask)
    }

    // --- State ---

    pub fn pane_state(&self) -> PaneState {
        self.pane_state
    }

    /// Direction the pane is settled open in, `NONE` while closed.
    pub fn current_direction(&self) -> Direction {
        self.direction
    }

    /// Who is moving the pane right now.
    pub fn drive_kind(&self) -> DriveKind {
        self.drive.kind()
    }

    /// Whether the display clock is needed.
    pub fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    /// Displacement of the pane frame from its closed origin.
    pub fn pane_offset(&self) -> Vec2 {
        self.simulation.body().offset()
    }

    /// The pane's frame in container coordinates.
    pub fn pane_frame(&self) -> Rect {
        self.simulation.body().frame(self.bounds)
    }

    /// Content currently hosted in the pane.
    pub fn pane(&self) -> Option<PaneId> {
        self.pane
    }

    /// Resting distances for a single direction.
    pub fn stops(&self, direction: Direction) -> PaneStops {
        let reveal = self.registry.reveal_width(direction).unwrap_or(0.0);
        let extent = match direction.axis() {
            Ok(Axis::Horizontal) => self.bounds.width,
            Ok(Axis::Vertical) => self.bounds.height,
            Err(_) => 0.0,
        };
        PaneStops::new(reveal, extent + self.config.dynamics.open_wide_edge_offset)
    }

    // --- State changes ---

    /// Move the single drawer's pane to `state` without animation.
    pub fn set_pane_state(&mut self, state: PaneState) -> DrawerResult<TransitionOutcome> {
        self.set_pane_state_animated(state, TransitionOptions::immediate(), None)
    }

    /// Move the pane to `state` in `direction` without animation.
    pub fn set_pane_state_in(&mut self, state: PaneState, direction: Direction) -> DrawerResult<TransitionOutcome> {
        self.set_pane_state_with(state, direction, TransitionOptions::immediate(), None)
    }

    /// Move the single drawer's pane to `state`.
    ///
    /// Fails with [`DrawerError::InvalidDirection`] when more than one drawer
    /// is set; use [`set_pane_state_with`](Self::set_pane_state_with) instead.
    pub fn set_pane_state_animated(
        &mut self,
        state: PaneState,
        options: TransitionOptions,
        completion: Option<Completion>,
    ) -> DrawerResult<TransitionOutcome> {
        let possible = self.registry.possible_directions();
        if possible.is_masked() {
            return Err(DrawerError::InvalidDirection(possible));
        }
        if possible.is_none() {
            return Ok(no_op(state, possible, completion));
        }
        self.set_pane_state_with(state, possible, options, completion)
    }

    /// Move the pane to `state` in `direction`.
    ///
    /// `direction` may be a mask as long as it contains exactly one direction
    /// with a drawer. Requests for directions without a drawer succeed as a
    /// no-op. A request for the state the pane is already resting in
    /// completes immediately without notifications. Any transition still in
    /// flight is superseded: its completion is dropped.
    pub fn set_pane_state_with(
        &mut self,
        state: PaneState,
        direction: Direction,
        options: TransitionOptions,
        completion: Option<Completion>,
    ) -> DrawerResult<TransitionOutcome> {
        let Some(direction) = self.resolve_direction(direction)? else {
            return Ok(no_op(state, direction, completion));
        };

        if self.is_resting_in(state, direction) {
            log::debug!("Pane already {state:?} in {direction}");
            if let Some(completion) = completion {
                completion();
            }
            return Ok(TransitionOutcome::Completed);
        }

        self.supersede();
        let transition = self.plan(state, direction, options).with_completion(completion);
        Ok(self.run(transition))
    }

    /// Bounce the single drawer's pane open and let it fall closed again.
    pub fn bounce_pane_open(&mut self) -> DrawerResult<TransitionOutcome> {
        self.bounce_pane_open_with(true, None)
    }

    /// Bounce the single drawer's pane open, running `completion` once it has
    /// come back to rest.
    pub fn bounce_pane_open_with(
        &mut self,
        allow_user_interruption: bool,
        completion: Option<Completion>,
    ) -> DrawerResult<TransitionOutcome> {
        let possible = self.registry.possible_directions();
        if possible.is_masked() {
            return Err(DrawerError::InvalidDirection(possible));
        }
        if possible.is_none() {
            return Ok(no_op(PaneState::Closed, possible, completion));
        }
        self.bounce_pane_open_in(possible, allow_user_interruption, completion)
    }

    /// Bounce the pane open in `direction`.
    ///
    /// Uses the bounce elasticity and magnitude. The pane returns to closed;
    /// no delegate notifications are sent. Only a closed pane bounces; for an
    /// open pane the completion runs immediately.
    pub fn bounce_pane_open_in(
        &mut self,
        direction: Direction,
        allow_user_interruption: bool,
        completion: Option<Completion>,
    ) -> DrawerResult<TransitionOutcome> {
        let Some(direction) = self.resolve_direction(direction)? else {
            return Ok(no_op(PaneState::Closed, direction, completion));
        };

        if self.pane_state != PaneState::Closed {
            log::debug!("Pane is {:?}, not bouncing", self.pane_state);
            if let Some(completion) = completion {
                completion();
            }
            return Ok(TransitionOutcome::Completed);
        }

        self.supersede();
        let body = self.simulation.body();
        let direction = if body.is_closed() { direction } else { body.direction() };
        let options = TransitionOptions {
            animated: true,
            allow_user_interruption,
        };
        let transition = Transition::bounce(direction, options).with_completion(completion);
        Ok(self.run(transition))
    }

    /// Replace the pane content.
    ///
    /// Animated with slide-off enabled, the pane opens wide, the content is
    /// swapped, and the pane closes. Animated without slide-off, the content
    /// is swapped and the pane closes. Otherwise the swap is immediate.
    pub fn set_pane(&mut self, pane: PaneId, animated: bool, completion: Option<Completion>) -> TransitionOutcome {
        let body = self.simulation.body();
        let direction = if body.direction().is_single() && !body.is_closed() {
            body.direction()
        } else {
            self.registry
                .possible_directions()
                .iter()
                .next()
                .unwrap_or(Direction::NONE)
        };

        if self.pane.is_none() || !animated || direction.is_none() {
            self.replace_pane_content(pane);
            if let Some(completion) = completion {
                completion();
            }
            return TransitionOutcome::Completed;
        }

        self.supersede();
        let options = TransitionOptions::uninterruptible();
        if self.config.pane_view_slide_off_animation_enabled {
            let transition = Transition::new(PaneState::OpenWide, direction, options)
                .with_follow_up(FollowUp::ReplacePane(pane))
                .with_completion(completion);
            return self.run(transition);
        }

        self.replace_pane_content(pane);
        if self.pane_state == PaneState::Closed && self.simulation.body().is_closed() {
            if let Some(completion) = completion {
                completion();
            }
            return TransitionOutcome::Completed;
        }
        let transition = Transition::new(PaneState::Closed, direction, options).with_completion(completion);
        self.run(transition)
    }

    // --- Frames ---

    /// Advance the simulation by `dt` seconds. Returns whether more frames
    /// are needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !matches!(self.drive, DriveSource::Simulation(_)) {
            if matches!(self.drive, DriveSource::Idle) {
                self.frames.halt();
            }
            return self.frames.is_running();
        }

        let outcome = self.simulation.step(dt, &self.config.dynamics);
        self.update_stylers();
        log::trace!(
            "Tick {:.4}s: distance {:.2}, velocity {:.2}",
            dt,
            self.simulation.body().distance(),
            self.simulation.body().velocity()
        );

        if matches!(outcome, StepOutcome::Settled | StepOutcome::Idle) {
            if let DriveSource::Simulation(transition) = mem::replace(&mut self.drive, DriveSource::Idle) {
                self.finish(transition);
            }
        }
        self.frames.is_running()
    }

    // --- Gestures ---

    /// Feed one pan sample. The response tells the host whether to pass the
    /// touch through to the content.
    pub fn handle_pan(&mut self, gesture: &PanGesture) -> PanResponse {
        match gesture.phase {
            PanPhase::Began => self.begin_pan(gesture),
            PanPhase::Changed => self.move_pan(gesture),
            PanPhase::Ended => self.end_pan(gesture, false),
            PanPhase::Cancelled => self.end_pan(gesture, true),
        }
    }

    /// Close the pane if a tap at `location` lands on it while it is open
    /// and tap-to-close is enabled. Returns whether the tap was consumed.
    pub fn handle_tap(&mut self, location: Point) -> bool {
        if !self.pane_state.is_open() || !matches!(self.drive, DriveSource::Idle) {
            return false;
        }
        if !self.registry.tap_to_close_enabled(self.direction).unwrap_or(false) {
            return false;
        }
        if !self.pane_frame().contains(location) {
            return false;
        }
        log::debug!("Tap to close from {}", self.direction);
        self.set_pane_state_with(PaneState::Closed, self.direction, TransitionOptions::default(), None)
            .is_ok()
    }

    /// Whether a gesture starting at `location` should make conflicting
    /// gestures fail so the pane pan wins.
    pub fn should_cancel_conflicting_gestures(&self, location: Point) -> bool {
        let gestures = &self.config.gestures;
        if !gestures.screen_edge_pan_cancels_conflicting_gestures || self.pane_state != PaneState::Closed {
            return false;
        }
        let edges = edge_directions(location, self.bounds, gestures.screen_edge_margin);
        edges.intersects(self.registry.draggable_directions(Direction::ALL))
    }

    fn begin_pan(&mut self, gesture: &PanGesture) -> PanResponse {
        if let DriveSource::Simulation(transition) = &self.drive {
            if !transition.options.allow_user_interruption {
                return PanResponse::Rejected(PanRejection::Uninterruptible);
            }
        }
        if let Some(target) = &gesture.target {
            if self.touch_policy.should_forward(target) {
                log::trace!("Forwarding pan on {}", target.type_identifier());
                return PanResponse::Forwarded;
            }
        }
        if let Some(delegate) = self.delegate.as_mut() {
            if !delegate.should_begin_pane_pan(gesture) {
                return PanResponse::Rejected(PanRejection::Vetoed);
            }
        }
        if let Err(rejection) = self.check_pan_direction(gesture) {
            log::debug!("Pan rejected: {rejection:?}");
            return PanResponse::Rejected(rejection);
        }

        self.supersede();
        self.frames.halt();
        let tracker = PanTracker::new(self.simulation.body(), self.pane_state, self.direction);
        self.simulation.body_mut().attach();
        self.drive = DriveSource::Gesture(tracker);
        log::debug!("Pan attached at {:?}", gesture.location);

        self.follow_finger(gesture);
        PanResponse::Attached
    }

    fn check_pan_direction(&self, gesture: &PanGesture) -> Result<(), PanRejection> {
        let possible = self.registry.possible_directions();
        let draggable = self.registry.draggable_directions(Direction::ALL);
        let body = self.simulation.body();

        if !body.is_closed() {
            return match self.registry.drag_enabled(body.direction()) {
                Ok(true) => Ok(()),
                _ => Err(PanRejection::DragDisabled),
            };
        }

        if self.config.gestures.pane_drag_requires_screen_edge_pan {
            let start = gesture.location - gesture.translation;
            let edges = edge_directions(start, self.bounds, self.config.gestures.screen_edge_margin);
            if !edges.intersects(draggable) {
                return Err(PanRejection::NotAtScreenEdge);
            }
        }

        let implied = match drag_direction(gesture.translation) {
            d if d.is_none() => drag_direction(gesture.velocity),
            d => d,
        };
        if implied.is_none() {
            return if possible.is_none() {
                Err(PanRejection::NoDrawer)
            } else if draggable.is_none() {
                Err(PanRejection::DragDisabled)
            } else {
                Ok(())
            };
        }
        if !possible.contains(implied) {
            return Err(PanRejection::NoDrawer);
        }
        if !draggable.contains(implied) {
            return Err(PanRejection::DragDisabled);
        }
        Ok(())
    }

    fn move_pan(&mut self, gesture: &PanGesture) -> PanResponse {
        if !matches!(self.drive, DriveSource::Gesture(_)) {
            return PanResponse::Ignored;
        }
        self.follow_finger(gesture);
        PanResponse::Moved
    }

    fn follow_finger(&mut self, gesture: &PanGesture) {
        let allowed = self.registry.draggable_directions(Direction::ALL);
        let DriveSource::Gesture(tracker) = &mut self.drive else {
            return;
        };
        let Some((direction, distance)) = tracker.track(gesture.translation, allowed) else {
            return;
        };
        let velocity = tracker.velocity_along(gesture.velocity);

        let limit = self.stops(direction).open_wide;
        let body = self.simulation.body_mut();
        body.set_direction(direction);
        body.follow(distance, velocity, limit);
        self.update_stylers();
    }

    fn end_pan(&mut self, gesture: &PanGesture, cancelled: bool) -> PanResponse {
        if !matches!(self.drive, DriveSource::Gesture(_)) {
            return PanResponse::Ignored;
        }
        if !cancelled {
            self.follow_finger(gesture);
        }
        let DriveSource::Gesture(tracker) = mem::replace(&mut self.drive, DriveSource::Idle) else {
            return PanResponse::Ignored;
        };
        self.simulation.body_mut().detach();

        let body = self.simulation.body();
        if tracker.direction().is_none() {
            // Never moved off the closed position.
            log::debug!("Pan ended without a direction");
            return PanResponse::Released(self.pane_state);
        }

        if cancelled && tracker.origin_state().is_open() {
            let state = tracker.origin_state();
            let origin = tracker.origin_direction();
            log::debug!("Pan cancelled, returning to {state:?} in {origin}");
            let transition = if body.direction() != origin && !body.is_closed() {
                // Dragged through into the opposite drawer: fall back through
                // closed without settling there.
                Transition::new(PaneState::Closed, body.direction(), TransitionOptions::default())
                    .silent()
                    .with_follow_up(FollowUp::Open { state, direction: origin })
            } else {
                Transition::new(state, origin, TransitionOptions::default())
            };
            self.run(transition);
            return PanResponse::Released(state);
        }

        let (state, direction) = if cancelled {
            (tracker.origin_state(), body.direction())
        } else {
            let direction = body.direction();
            let stops = self.stops(direction);
            let velocity = tracker.velocity_along(gesture.velocity);
            let state = stops.release_target(body.distance(), velocity, self.config.gestures.flick_velocity);
            (state, direction)
        };
        log::debug!("Pan released toward {state:?} in {direction}");

        let transition = self.plan(state, direction, TransitionOptions::default());
        self.run(transition);
        PanResponse::Released(state)
    }

    // --- Internals ---

    /// Narrow a requested direction to the single drawer it refers to.
    fn resolve_direction(&self, direction: Direction) -> DrawerResult<Option<Direction>> {
        if direction.is_none() {
            return Err(DrawerError::InvalidDirection(direction));
        }
        let candidates = direction & self.registry.possible_directions();
        if candidates.is_none() {
            return Ok(None);
        }
        if candidates.is_masked() {
            return Err(DrawerError::InvalidDirection(direction));
        }
        Ok(Some(candidates))
    }

    fn is_resting_in(&self, state: PaneState, direction: Direction) -> bool {
        matches!(self.drive, DriveSource::Idle)
            && self.pane_state == state
            && (state == PaneState::Closed || self.direction == direction)
    }

    /// Build the transition for a request, closing the other side first when
    /// the pane is open in a different direction.
    fn plan(&self, state: PaneState, direction: Direction, options: TransitionOptions) -> Transition {
        let body = self.simulation.body();
        let displaced = !body.is_closed() && body.direction().is_single();

        if state == PaneState::Closed {
            let from = if displaced { body.direction() } else { direction };
            return Transition::new(PaneState::Closed, from, options);
        }
        if displaced && body.direction() != direction {
            return Transition::new(PaneState::Closed, body.direction(), options)
                .with_follow_up(FollowUp::Open { state, direction });
        }
        Transition::new(state, direction, options)
    }

    /// Start a transition. Unanimated transitions finish before this returns.
    fn run(&mut self, transition: Transition) -> TransitionOutcome {
        if transition.motion == Motion::Settle && transition.announce {
            self.notify_may_update(transition.target, transition.direction);
        }

        let stops = self.stops(transition.direction);
        let target = stops.distance(transition.target);

        if !transition.options.animated {
            self.simulation.stop();
            self.simulation.body_mut().place(transition.direction, target);
            self.update_stylers();
            return self.finish(transition);
        }

        self.simulation.body_mut().set_direction(transition.direction);
        self.simulation.begin(target, stops.open_wide, transition.motion);
        if transition.motion == Motion::Bounce {
            self.simulation
                .push(self.config.dynamics.bounce_magnitude * BOUNCE_VELOCITY_SCALE);
        }
        log::debug!(
            "Animating toward {:?} in {} ({:?})",
            transition.target,
            transition.direction,
            transition.motion
        );
        self.drive = DriveSource::Simulation(transition);
        self.frames.ensure_running();
        TransitionOutcome::Started
    }

    /// The pane reached a transition's target.
    fn finish(&mut self, transition: Transition) -> TransitionOutcome {
        let Transition {
            target,
            direction,
            motion,
            options,
            follow_up,
            completion,
            announce,
        } = transition;

        if motion == Motion::Settle && announce {
            self.settle_state(target, direction);
        }

        match follow_up {
            Some(FollowUp::Open { state, direction }) => {
                let next = Transition::new(state, direction, options).with_completion(completion);
                self.run(next)
            }
            Some(FollowUp::ReplacePane(pane)) => {
                self.replace_pane_content(pane);
                let next = Transition::new(PaneState::Closed, direction, options).with_completion(completion);
                self.run(next)
            }
            None => {
                self.drive = DriveSource::Idle;
                self.frames.halt();
                if let Some(completion) = completion {
                    completion();
                }
                TransitionOutcome::Completed
            }
        }
    }

    /// Drop whatever is moving the pane. Completions of superseded
    /// transitions are never run.
    fn supersede(&mut self) {
        match mem::replace(&mut self.drive, DriveSource::Idle) {
            DriveSource::Simulation(transition) => {
                self.simulation.stop();
                log::debug!("Superseded {transition:?}");
                if let Some(FollowUp::ReplacePane(pane)) = transition.follow_up {
                    self.replace_pane_content(pane);
                }
            }
            DriveSource::Gesture(_) => {
                self.simulation.body_mut().detach();
                log::debug!("Pan detached by a new request");
            }
            DriveSource::Idle => {}
        }
    }

    fn notify_may_update(&mut self, state: PaneState, direction: Direction) {
        let settled_direction = if state == PaneState::Closed { Direction::NONE } else { direction };
        if (self.pane_state, self.direction) == (state, settled_direction) {
            return;
        }
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.may_update_to_pane_state(state, direction);
        }
    }

    fn settle_state(&mut self, state: PaneState, direction: Direction) {
        let settled_direction = if state == PaneState::Closed { Direction::NONE } else { direction };
        let changed = (self.pane_state, self.direction) != (state, settled_direction);
        self.pane_state = state;
        self.direction = settled_direction;
        if changed {
            log::debug!("Pane state is now {state:?} ({direction})");
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_update_to_pane_state(state, direction);
            }
        }
    }

    fn replace_pane_content(&mut self, pane: PaneId) {
        log::debug!("Pane content replaced: {:?} -> {pane}", self.pane);
        self.pane = Some(pane);
    }

    /// Whether the pane is open in, moving toward, or being dragged in
    /// `direction`.
    fn is_headed(&self, direction: Direction) -> bool {
        let body = self.simulation.body();
        let displaced = body.direction() == direction && !body.is_closed();
        match &self.drive {
            DriveSource::Idle => displaced || (self.pane_state.is_open() && self.direction == direction),
            DriveSource::Gesture(tracker) => displaced || tracker.direction() == direction,
            DriveSource::Simulation(transition) => {
                displaced
                    || transition.direction == direction
                    || matches!(
                        transition.follow_up,
                        Some(FollowUp::Open { direction: next, .. }) if next == direction
                    )
            }
        }
    }

    /// Point a running simulation at the current stop of its transition after
    /// widths or bounds change.
    fn retarget_in_flight(&mut self) {
        let DriveSource::Simulation(transition) = &self.drive else {
            return;
        };
        let stops = self.stops(transition.direction);
        let target = stops.distance(transition.target);
        self.simulation.retarget(target, stops.open_wide);
        self.update_stylers();
    }

    /// Keep a resting pane on its stop after widths or bounds change.
    fn reposition_at_rest(&mut self) {
        if !matches!(self.drive, DriveSource::Idle) || !self.pane_state.is_open() {
            return;
        }
        let distance = self.stops(self.direction).distance(self.pane_state);
        self.simulation.body_mut().place(self.direction, distance);
        self.update_stylers();
    }

    fn update_stylers(&self) {
        let body = self.simulation.body();
        let direction = body.direction();
        if !direction.is_single() {
            return;
        }
        let fraction = self.stops(direction).open_fraction(body.distance());
        self.stylers.notify(fraction, direction);
    }
}

fn no_op(state: PaneState, direction: Direction, completion: Option<Completion>) -> TransitionOutcome {
    log::debug!("No drawer in {direction}, ignoring request for {state:?}");
    if let Some(completion) = completion {
        completion();
    }
    TransitionOutcome::NoOp
}
