//! Gravity, collision and bounce dynamics for the pane body.

use crate::config::DynamicsConfig;

use super::body::PaneBody;

/// Acceleration in points/s² for a gravity magnitude of `1.0`.
pub const GRAVITY_SCALE: f64 = 1000.0;
/// Initial speed in points/s for each unit of bounce magnitude.
pub const BOUNCE_VELOCITY_SCALE: f64 = 10.0;
/// Longest integration sub-step, in seconds.
pub const MAX_SUBSTEP: f64 = 1.0 / 240.0;
/// Longest frame the simulation will integrate at once, in seconds.
pub const MAX_FRAME: f64 = 0.1;
/// Speed below which the body counts as still.
pub const SETTLE_VELOCITY: f64 = 5.0;
/// Distance from the target within which the body counts as arrived.
pub const SETTLE_DISTANCE: f64 = 0.5;
/// Rebound speeds below this are absorbed entirely.
pub const REST_VELOCITY: f64 = 20.0;
/// Simulated time after which the body is snapped onto its target.
pub const MAX_SETTLE_TIME: f64 = 4.0;
/// Smallest gravity magnitude the simulation runs with. Lower or invalid
/// values are raised to it.
pub const MIN_GRAVITY_MAGNITUDE: f64 = 0.1;

/// What kind of motion the simulation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Fall toward the target and stay there.
    Settle,
    /// Pushed away from the closed position, falling back with bounce elasticity.
    Bounce,
}

/// Result of advancing the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to simulate.
    Idle,
    /// Still moving.
    Moving,
    /// Came to rest on the target during this step.
    Settled,
}

/// One-body simulation of the pane.
///
/// Boundaries sit at `0.0` and at the open-wide distance; a third boundary
/// sits at the target. Gravity points from where the motion began toward the
/// target, so the target boundary is always approached from one side.
#[derive(Debug, Clone)]
pub struct DynamicsSimulation {
    body: PaneBody,
    target: f64,
    open_wide: f64,
    gravity_sign: f64,
    motion: Motion,
    elapsed: f64,
    active: bool,
}

impl Default for DynamicsSimulation {
    fn default() -> Self {
        Self {
            body: PaneBody::default(),
            target: 0.0,
            open_wide: 0.0,
            gravity_sign: -1.0,
            motion: Motion::Settle,
            elapsed: 0.0,
            active: false,
        }
    }
}

impl DynamicsSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self) -> &PaneBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut PaneBody {
        &mut self.body
    }

    /// Whether a motion is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Distance the current motion is heading to.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Move the target and the outer boundary of a motion in progress, e.g.
    /// after a reveal width or the container size changed.
    ///
    /// Gravity is re-aimed at the new target from wherever the body is now.
    pub fn retarget(&mut self, target: f64, open_wide: f64) {
        self.open_wide = open_wide.max(0.0);
        self.target = target.clamp(0.0, self.open_wide);
        self.elapsed = 0.0;

        let distance = self.body.distance().min(self.open_wide);
        let velocity = self.body.velocity();
        self.body.set_motion(distance, velocity);
        if distance < self.target {
            self.gravity_sign = 1.0;
        } else if distance > self.target {
            self.gravity_sign = -1.0;
        }
        log::trace!("Simulation retargeted to {:.1} (open wide {:.1})", self.target, self.open_wide);
    }

    /// Start falling toward `target`, keeping the body's current velocity.
    pub fn begin(&mut self, target: f64, open_wide: f64, motion: Motion) {
        self.open_wide = open_wide.max(0.0);
        self.target = target.clamp(0.0, self.open_wide);
        self.motion = motion;
        self.elapsed = 0.0;
        self.active = true;
        self.body.detach();

        let distance = self.body.distance();
        self.gravity_sign = if distance < self.target {
            1.0
        } else if distance > self.target {
            -1.0
        } else if self.target <= 0.0 {
            -1.0
        } else if self.target >= self.open_wide {
            1.0
        } else if self.body.velocity() > 0.0 {
            -1.0
        } else {
            1.0
        };
        log::trace!(
            "Simulation toward {:.1} from {:.1} ({:?}, v={:.1})",
            self.target,
            distance,
            motion,
            self.body.velocity()
        );
    }

    /// Add an instantaneous push, in points/s along the opening direction.
    pub fn push(&mut self, velocity: f64) {
        let distance = self.body.distance();
        let current = self.body.velocity();
        self.body.set_motion(distance, current + velocity);
    }

    /// Abandon the current motion, leaving the body where it is.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f64, config: &DynamicsConfig) -> StepOutcome {
        if !self.active || dt <= 0.0 {
            return StepOutcome::Idle;
        }

        let dt = dt.min(MAX_FRAME);
        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as usize;
        let h = dt / substeps as f64;

        let gravity = config.gravity_magnitude.max(MIN_GRAVITY_MAGNITUDE) * GRAVITY_SCALE * self.gravity_sign;
        let elasticity = match self.motion {
            Motion::Settle => config.elasticity,
            Motion::Bounce => config.bounce_elasticity,
        }
        .clamp(0.0, 1.0);

        for _ in 0..substeps {
            let mut velocity = self.body.velocity() + gravity * h;
            let mut distance = self.body.distance() + velocity * h;

            if self.gravity_sign * (distance - self.target) > 0.0 {
                distance = self.target;
                velocity = rebound(velocity, elasticity);
            }
            if distance < 0.0 {
                distance = 0.0;
                velocity = rebound(velocity, elasticity);
            } else if distance > self.open_wide {
                distance = self.open_wide;
                velocity = rebound(velocity, elasticity);
            }

            self.body.set_motion(distance, velocity);
            self.elapsed += h;

            if velocity.abs() < SETTLE_VELOCITY && (distance - self.target).abs() < SETTLE_DISTANCE {
                return self.settle();
            }
        }

        if self.elapsed >= MAX_SETTLE_TIME {
            log::warn!(
                "Pane did not settle within {MAX_SETTLE_TIME}s, snapping to {:.1}",
                self.target
            );
            return self.settle();
        }

        StepOutcome::Moving
    }

    fn settle(&mut self) -> StepOutcome {
        self.body.set_motion(self.target, 0.0);
        self.active = false;
        StepOutcome::Settled
    }
}

fn rebound(velocity: f64, elasticity: f64) -> f64 {
    let reflected = -velocity * elasticity;
    if reflected.abs() < REST_VELOCITY { 0.0 } else { reflected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    const FRAME: f64 = 1.0 / 60.0;

    fn run(sim: &mut DynamicsSimulation, config: &DynamicsConfig) -> (usize, f64) {
        let mut frames = 0;
        let mut peak: f64 = 0.0;
        loop {
            let outcome = sim.step(FRAME, config);
            frames += 1;
            peak = peak.max(sim.body().distance());
            if outcome != StepOutcome::Moving {
                return (frames, peak);
            }
            assert!(frames < 1000, "simulation never settled");
        }
    }

    #[test]
    fn test_falls_to_open_without_overshoot() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 0.0);
        sim.begin(267.0, 360.0, Motion::Settle);

        let (frames, peak) = run(&mut sim, &config);
        assert!(frames > 1);
        assert!(peak <= 267.0 + f64::EPSILON);
        assert!((sim.body().distance() - 267.0).abs() < f64::EPSILON);
        assert!(sim.body().velocity().abs() < f64::EPSILON);
        assert!(!sim.is_active());
    }

    #[test]
    fn test_falls_closed() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 267.0);
        sim.begin(0.0, 360.0, Motion::Settle);

        run(&mut sim, &config);
        assert!(sim.body().distance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounce_overshoots_and_returns() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 0.0);
        sim.begin(0.0, 360.0, Motion::Bounce);
        sim.push(config.bounce_magnitude * BOUNCE_VELOCITY_SCALE);

        let (_, peak) = run(&mut sim, &config);
        // v² / 2g = 600² / 4000
        assert!(peak > 80.0 && peak < 95.0, "peak was {peak}");
        assert!(sim.body().distance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_elastic_collision_bounces_back() {
        let config = DynamicsConfig {
            elasticity: 0.5,
            ..DynamicsConfig::default()
        };
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::TOP, 300.0);
        sim.begin(0.0, 500.0, Motion::Settle);

        let mut falling = false;
        let mut bounced = false;
        for _ in 0..600 {
            let outcome = sim.step(FRAME, &config);
            let velocity = sim.body().velocity();
            if velocity < 0.0 {
                falling = true;
            } else if falling && velocity > 0.0 {
                bounced = true;
            }
            if outcome == StepOutcome::Settled {
                break;
            }
        }
        assert!(bounced);
        assert!(!sim.is_active());
        assert!(sim.body().distance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_fully_elastic_still_terminates() {
        let config = DynamicsConfig {
            elasticity: 1.0,
            ..DynamicsConfig::default()
        };
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 267.0);
        sim.begin(0.0, 360.0, Motion::Settle);

        let (frames, _) = run(&mut sim, &config);
        assert!(frames as f64 * FRAME >= MAX_SETTLE_TIME - FRAME);
        assert!(sim.body().distance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_outward_velocity_is_reversed_by_gravity() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::RIGHT, 100.0);
        sim.push(800.0);
        sim.begin(0.0, 360.0, Motion::Settle);

        let (_, peak) = run(&mut sim, &config);
        assert!(peak > 100.0);
        assert!(sim.body().distance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 0.0);
        sim.begin(267.0, 340.0, Motion::Settle);
        for _ in 0..5 {
            sim.step(FRAME, &config);
        }

        sim.retarget(150.0, 340.0);
        run(&mut sim, &config);
        assert!((sim.body().distance() - 150.0).abs() < f64::EPSILON);

        // Past the new target: gravity turns around.
        sim.body_mut().place(Direction::LEFT, 300.0);
        sim.begin(340.0, 340.0, Motion::Settle);
        sim.retarget(100.0, 340.0);
        run(&mut sim, &config);
        assert!((sim.body().distance() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retarget_shrinks_open_wide() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 300.0);
        sim.begin(340.0, 340.0, Motion::Settle);

        sim.retarget(240.0, 240.0);
        assert!(sim.body().distance() <= 240.0);
        run(&mut sim, &config);
        assert!((sim.body().distance() - 240.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_gravity_still_moves() {
        let config = DynamicsConfig {
            gravity_magnitude: 0.0,
            ..DynamicsConfig::default()
        };
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 0.0);
        sim.begin(267.0, 340.0, Motion::Settle);

        let (frames, _) = run(&mut sim, &config);
        assert!((frames as f64) * FRAME < MAX_SETTLE_TIME);
        assert!((sim.body().distance() - 267.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_idle_when_inactive() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        assert_eq!(sim.step(FRAME, &config), StepOutcome::Idle);
    }

    #[test]
    fn test_already_at_target_settles_immediately() {
        let config = DynamicsConfig::default();
        let mut sim = DynamicsSimulation::new();
        sim.body_mut().place(Direction::LEFT, 267.0);
        sim.begin(267.0, 360.0, Motion::Settle);
        assert_eq!(sim.step(FRAME, &config), StepOutcome::Settled);
    }
}
