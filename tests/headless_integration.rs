//! Headless integration tests.
//!
//! Run full autopilot sessions through the frame scheduler on a
//! `TestClock`: no display, no wall-clock time, reproducible output.

use gazeward::autopilot::{self, AutopilotConfig};
use gazeward::backend::headless::{self, HeadlessConfig, RunSummary};
use gazeward::backend::HeadlessPresenter;
use gazeward::clock::{Clock, TestClock};
use gazeward::config::SessionConfig;
use gazeward::input_source::{InputEvent, RecordingProvider, ScriptedInputProvider};
use gazeward::training::content::WorldDef;
use gazeward::training::events::{SessionEvent, SessionOutcome};
use gazeward::training::hud::OverlayKind;
use gazeward::training::session::Session;

use std::sync::Arc;
use std::time::Duration;

fn run_script(config: SessionConfig, script: Vec<InputEvent>) -> (Session, RunSummary, HeadlessPresenter) {
    let mut session = Session::new(&WorldDef::builtin().unwrap(), config).unwrap();
    let clock: Arc<dyn Clock> = Arc::new(TestClock::new());
    let mut presenter = HeadlessPresenter::new();
    let summary = headless::run(
        &mut session,
        &mut ScriptedInputProvider::new(script),
        &mut presenter,
        clock.as_ref(),
        &HeadlessConfig::default(),
    );
    (session, summary, presenter)
}

fn plan(config: &SessionConfig) -> Vec<InputEvent> {
    let session = Session::new(&WorldDef::builtin().unwrap(), config.clone()).unwrap();
    autopilot::walkthrough(&session, &AutopilotConfig::default()).unwrap()
}

fn bonuses(events: &[SessionEvent]) -> Vec<i64> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::CaseCompleted { bonus, .. } => Some(*bonus),
            _ => None,
        })
        .collect()
}

// ── Autopilot ───────────────────────────────────────────────

#[test]
fn test_autopilot_completes_builtin_world() {
    let config = SessionConfig::default();
    let (session, summary, presenter) = run_script(config.clone(), plan(&config));

    assert_eq!(summary.outcome, Some(SessionOutcome::Success));
    assert_eq!(summary.penalties, 0);

    let bonuses = bonuses(&summary.events);
    assert_eq!(bonuses.len(), 3);
    assert!(bonuses.iter().all(|b| *b > 0));
    assert_eq!(summary.score, 13 * 20 + bonuses.iter().sum::<i64>());

    assert!(!summary
        .events
        .iter()
        .any(|e| matches!(e, SessionEvent::StepIncorrect { .. } | SessionEvent::WrongAction { .. })));

    let view = presenter.last_view.unwrap();
    assert_eq!(view.overlays.len(), 1);
    assert_eq!(view.overlays[0].kind, OverlayKind::Final);
    assert_eq!(
        view.overlays[0].text,
        format!("Congratulations! All cases completed!\nScore: {}", summary.score)
    );
    assert_eq!(presenter.frames, summary.frames);
    assert!(session.is_ended());
}

#[test]
fn test_autopilot_visits_every_scene() {
    let config = SessionConfig::default();
    let (_, summary, _) = run_script(config.clone(), plan(&config));
    let visited: Vec<&str> = summary
        .events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::SceneChanged { to, .. } => Some(to.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        visited,
        vec!["nursing", "reception", "procedures", "reception", "nursing"]
    );
}

#[test]
fn test_faster_dwell_finishes_in_fewer_frames() {
    let slow = SessionConfig::default();
    let fast = SessionConfig {
        gaze_ms: 500,
        message_ms: 500,
        ..Default::default()
    };
    let (_, slow_summary, _) = run_script(slow.clone(), plan(&slow));
    let (_, fast_summary, _) = run_script(fast.clone(), plan(&fast));

    assert_eq!(fast_summary.outcome, Some(SessionOutcome::Success));
    assert!(fast_summary.frames < slow_summary.frames);
    assert!(fast_summary.score >= slow_summary.score);
}

#[test]
fn test_truncated_script_leaves_session_open() {
    let config = SessionConfig::default();
    let mut script = plan(&config);
    script.truncate(8);
    let (session, summary, _) = run_script(config, script);
    assert_eq!(summary.outcome, None);
    assert!(!session.is_ended());
    assert!(summary.events.contains(&SessionEvent::CaseStarted { index: 0 }));
}

// ── Record / replay ─────────────────────────────────────────

#[test]
fn test_recorded_run_replays_identically() {
    let config = SessionConfig::default();

    let mut session = Session::new(&WorldDef::builtin().unwrap(), config.clone()).unwrap();
    let mut recorder = RecordingProvider::new(ScriptedInputProvider::new(plan(&config)));
    let first = headless::run(
        &mut session,
        &mut recorder,
        &mut HeadlessPresenter::new(),
        &TestClock::new(),
        &HeadlessConfig::default(),
    );

    let (_, second, _) = run_script(config, recorder.into_recorded());
    assert_eq!(first, second);
}

#[test]
fn test_run_advances_test_clock() {
    let config = SessionConfig::default();
    let mut session = Session::new(&WorldDef::builtin().unwrap(), config).unwrap();
    let clock = TestClock::new();
    let t0 = clock.now();
    let summary = headless::run(
        &mut session,
        &mut ScriptedInputProvider::new(vec![InputEvent::Wait {
            duration: Duration::from_secs(2),
        }]),
        &mut HeadlessPresenter::new(),
        &clock,
        &HeadlessConfig {
            frame_interval_ms: 20,
            ..Default::default()
        },
    );
    assert_eq!(summary.frames, 100);
    assert_eq!(clock.now() - t0, Duration::from_secs(2));
}
