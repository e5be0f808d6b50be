//! Display clock start/stop.

/// A periodic frame callback provided by the host, nominally 60 Hz.
///
/// While started, the host calls [`crate::DynamicsDrawer::tick`] once per
/// frame.
pub trait FrameClock {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Starts the host clock lazily when motion begins and stops it once the
/// pane settles.
#[derive(Default)]
pub struct FrameDriver {
    clock: Option<Box<dyn FrameClock>>,
    running: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the host clock. A running driver starts the new clock and
    /// stops the old one.
    pub fn set_clock(&mut self, clock: Option<Box<dyn FrameClock>>) {
        if self.running {
            if let Some(old) = self.clock.as_mut() {
                old.stop();
            }
        }
        self.clock = clock;
        if self.running {
            if let Some(new) = self.clock.as_mut() {
                new.start();
            }
        }
    }

    /// Whether frames are currently requested.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request frames. Returns `false` if already running.
    pub fn ensure_running(&mut self) -> bool {
        if self.running {
            return false;
        }
        // Flag first so a clock that ticks synchronously from `start` cannot
        // start it a second time.
        self.running = true;
        log::trace!("Frame clock started");
        if let Some(clock) = self.clock.as_mut() {
            clock.start();
        }
        true
    }

    /// Stop requesting frames. Returns `false` if already stopped.
    pub fn halt(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        log::trace!("Frame clock stopped");
        if let Some(clock) = self.clock.as_mut() {
            clock.stop();
        }
        true
    }
}
