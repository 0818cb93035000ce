//! Headless backend — fixed-step frame scheduler for CI and scripted runs.
//!
//! Drains an `InputProvider` once per frame, drives `Session::update`,
//! and hands each frame to a `Presenter`. `InputEvent::Wait` pauses input
//! consumption for the given duration while frames keep running, so a
//! script can hold a gaze. Time comes from a `Clock`, which makes runs
//! against `TestClock` reproducible and instantaneous.

use std::time::Duration;

use tracing::{debug, info};

use super::Presenter;
use crate::clock::Clock;
use crate::input_source::{InputEvent, InputProvider};
use crate::training::events::{SessionEvent, SessionOutcome};
use crate::training::session::Session;

/// Headless scheduler configuration.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Frame interval in milliseconds.
    pub frame_interval_ms: u64,
    /// Stop after N frames (for CI).
    pub max_frames: Option<u64>,
    /// Log session status every N frames; 0 disables.
    pub status_interval_frames: u64,
    /// Stop once the provider is drained and no wait is pending.
    pub stop_when_exhausted: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            max_frames: None,
            status_interval_frames: 0,
            stop_when_exhausted: true,
        }
    }
}

impl HeadlessConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// What a headless run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub score: i64,
    pub penalties: u32,
    pub outcome: Option<SessionOutcome>,
    pub events: Vec<SessionEvent>,
}

impl RunSummary {
    /// Generate s-expression for status reporting.
    pub fn to_sexp(&self) -> String {
        format!(
            "(:frames {} :score {} :penalties {} :outcome {} :events {})",
            self.frames,
            self.score,
            self.penalties,
            self.outcome.map(|o| o.as_str()).unwrap_or("nil"),
            self.events.len(),
        )
    }
}

/// Run the session until it ends, the input runs out, or the frame cap hits.
///
/// Each frame calls `Session::update` (orientation, pending message, gaze,
/// timeout) and then presents it: scene first, HUD and overlays on top.
pub fn run(
    session: &mut Session,
    provider: &mut dyn InputProvider,
    presenter: &mut dyn Presenter,
    clock: &dyn Clock,
    config: &HeadlessConfig,
) -> RunSummary {
    let interval = config.frame_interval();
    let mut frames = 0u64;
    let mut waiting = Duration::ZERO;
    let mut log = session.begin(clock.now());

    info!(
        "headless: starting, frame interval {}ms, max frames {:?}",
        interval.as_millis(),
        config.max_frames
    );

    loop {
        if session.is_ended() {
            debug!("headless: session ended");
            break;
        }
        if config.max_frames.is_some_and(|max| frames >= max) {
            info!("headless: frame cap {} reached", frames);
            break;
        }
        if config.stop_when_exhausted && waiting.is_zero() && !provider.has_events() {
            debug!("headless: input exhausted");
            break;
        }

        let mut inputs = Vec::new();
        if waiting.is_zero() {
            while let Some(event) = provider.next_event() {
                if let InputEvent::Wait { duration } = event {
                    waiting = duration;
                    break;
                }
                inputs.push(event);
            }
        }

        let now = clock.now();
        log.extend(session.update(&inputs, now));
        if let Some(scene) = session.scene() {
            presenter.render_scene(scene, &session.camera.orientation);
        }
        presenter.render_overlay(&session.render(now));
        frames += 1;

        if config.status_interval_frames > 0 && frames % config.status_interval_frames == 0 {
            info!("headless status: {}", session.status_sexp(now));
        }

        clock.sleep(interval);
        waiting = waiting.saturating_sub(interval);
    }

    let summary = RunSummary {
        frames,
        score: session.board.score,
        penalties: session.board.penalties,
        outcome: session.outcome(),
        events: log,
    };
    info!("headless: finished {}", summary.to_sexp());
    summary
}
