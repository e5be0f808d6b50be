//! Headless driver: runs a dynamics drawer through a scripted session on a
//! simulated 60 Hz clock.
//!
//! Usage: `dynadrawer-sim [config.json]`. Set `RUST_LOG=debug` (or `trace`
//! for every frame) to see what the engine does.

use std::path::PathBuf;
use std::process::ExitCode;

use kurbo::{Point, Size, Vec2};
use dynadrawer_core::{
    Direction, DrawerConfig, DrawerDelegate, DrawerResult, DynamicsDrawer, PanGesture, PaneState,
    TransitionOptions,
};
use uuid::Uuid;

const FRAME: f64 = 1.0 / 60.0;
/// Give up on a step after this many frames.
const MAX_FRAMES: usize = 600;

struct LoggingDelegate;

impl DrawerDelegate for LoggingDelegate {
    fn may_update_to_pane_state(&mut self, state: PaneState, direction: Direction) {
        log::info!("  may update to {state:?} ({direction})");
    }

    fn did_update_to_pane_state(&mut self, state: PaneState, direction: Direction) {
        log::info!("  did update to {state:?} ({direction})");
    }
}

/// Tick until the pane comes to rest. Returns the number of frames and the
/// largest displacement seen.
fn run_until_settled(drawer: &mut DynamicsDrawer) -> (usize, f64) {
    let mut peak = drawer.current_reveal_width();
    for frame in 1..=MAX_FRAMES {
        let more = drawer.tick(FRAME);
        peak = peak.max(drawer.current_reveal_width());
        log::trace!("frame {frame}: offset {:?}", drawer.pane_offset());
        if !more {
            return (frame, peak);
        }
    }
    log::warn!("Pane still moving after {MAX_FRAMES} frames");
    (MAX_FRAMES, peak)
}

fn report(label: &str, drawer: &DynamicsDrawer, frames: usize, peak: f64) {
    log::info!(
        "{label}: {:?} after {frames} frames ({:.2}s), reveal {:.1}, peak {:.1}",
        drawer.pane_state(),
        frames as f64 * FRAME,
        drawer.current_reveal_width(),
        peak
    );
}

/// A finger dragging from `from` by `translation`, in `steps` samples.
fn drag(drawer: &mut DynamicsDrawer, from: Point, translation: Vec2, steps: usize, release_velocity: Vec2) {
    let response = drawer.handle_pan(&PanGesture::began(from));
    log::info!("  pan began: {response:?}");
    if response.passes_through() {
        return;
    }
    let velocity = translation / (steps as f64 * FRAME);
    for step in 1..=steps {
        let moved = translation * (step as f64 / steps as f64);
        drawer.handle_pan(&PanGesture::changed(from + moved, moved, velocity));
    }
    let response = drawer.handle_pan(&PanGesture::ended(from + translation, translation, release_velocity));
    log::info!("  pan ended: {response:?}");
}

fn run(config: DrawerConfig) -> DrawerResult<()> {
    let mut drawer = DynamicsDrawer::with_config(Size::new(320.0, 480.0), config)?;
    drawer.set_delegate(Some(Box::new(LoggingDelegate)));
    drawer.set_drawer(Some(Uuid::new_v4()), Direction::LEFT)?;
    drawer.set_drawer(Some(Uuid::new_v4()), Direction::RIGHT)?;
    drawer.set_pane(Uuid::new_v4(), false, None);

    log::info!("Open left");
    drawer.set_pane_state_with(PaneState::Open, Direction::LEFT, TransitionOptions::default(), None)?;
    let (frames, peak) = run_until_settled(&mut drawer);
    report("Open left", &drawer, frames, peak);

    log::info!("Switch to right");
    drawer.set_pane_state_with(PaneState::Open, Direction::RIGHT, TransitionOptions::default(), None)?;
    let (frames, peak) = run_until_settled(&mut drawer);
    report("Switch to right", &drawer, frames, peak);

    log::info!("Close");
    drawer.set_pane_state_with(PaneState::Closed, Direction::RIGHT, TransitionOptions::default(), None)?;
    let (frames, peak) = run_until_settled(&mut drawer);
    report("Close", &drawer, frames, peak);

    log::info!("Bounce left");
    drawer.bounce_pane_open_in(Direction::LEFT, true, Some(Box::new(|| log::info!("  bounce finished"))))?;
    let (frames, peak) = run_until_settled(&mut drawer);
    report("Bounce left", &drawer, frames, peak);

    log::info!("Drag open from the left edge");
    drag(&mut drawer, Point::new(10.0, 240.0), Vec2::new(180.0, 0.0), 12, Vec2::ZERO);
    let (frames, peak) = run_until_settled(&mut drawer);
    report("Drag open", &drawer, frames, peak);

    log::info!("Flick closed");
    drag(&mut drawer, Point::new(290.0, 240.0), Vec2::new(-40.0, 0.0), 3, Vec2::new(-1200.0, 0.0));
    let (frames, peak) = run_until_settled(&mut drawer);
    report("Flick closed", &drawer, frames, peak);

    log::info!("Replace pane");
    drawer.set_pane_view_slide_off_animation_enabled(true);
    drawer.set_pane(Uuid::new_v4(), true, None);
    let (frames, peak) = run_until_settled(&mut drawer);
    report("Replace pane", &drawer, frames, peak);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting dynadrawer-sim");

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match DrawerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => DrawerConfig::default(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Session failed: {e}");
            ExitCode::FAILURE
        }
    }
}
