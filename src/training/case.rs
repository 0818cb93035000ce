//! Clinical case state machine.
//!
//! Tracks which case is current, how far the trainee got through its
//! ordered steps, and the case clock. Hotspot activations advance or
//! penalize the case; timeouts fail it. Transient messages are modeled
//! as a timestamped pending transition that `tick_pending` fires once
//! its deadline passes, so tests can fast-forward through them.
//!
//! Score and penalty counters belong to the session and are passed in
//! as `&mut Scoreboard`; only the transitions here mutate them.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::content::CaseDef;
use super::events::{SessionEvent, SessionOutcome};
use crate::config::SessionConfig;
use crate::error::ContentError;
use crate::vr::hotspot::{Hotspot, HotspotKind};
use crate::vr::scene::World;

pub const CASE_COMPLETE_MESSAGE: &str = "Case complete! Next one shortly...";
pub const TIMEOUT_MESSAGE: &str = "Time's up! Penalty applied.";
pub const TOO_MANY_PENALTIES_MESSAGE: &str = "Game over! Too many penalties.";

// ── Case ───────────────────────────────────────────────────

/// An ordered clinical procedure with a time limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub description: String,
    pub steps: Vec<String>,
    pub time_limit_secs: u32,
    pub requires_doctor: bool,
    pub start_scene: String,
}

/// The static, ordered case list.
#[derive(Debug, Clone)]
pub struct CaseBook {
    cases: Vec<Case>,
}

impl CaseBook {
    pub fn new(defs: &[CaseDef], world: &World) -> Result<Self, ContentError> {
        if defs.is_empty() {
            return Err(ContentError::NoCases);
        }
        let mut cases = Vec::with_capacity(defs.len());
        for (index, def) in defs.iter().enumerate() {
            if def.steps.is_empty() {
                return Err(ContentError::EmptyCaseSteps {
                    index,
                    description: def.description.clone(),
                });
            }
            if def.time_limit_secs == 0 {
                return Err(ContentError::ZeroTimeLimit {
                    index,
                    description: def.description.clone(),
                });
            }
            if !world.contains(&def.start_scene) {
                return Err(ContentError::UnknownStartScene {
                    index,
                    scene: def.start_scene.clone(),
                });
            }
            cases.push(Case {
                description: def.description.clone(),
                steps: def.steps.clone(),
                time_limit_secs: def.time_limit_secs,
                requires_doctor: def.requires_doctor,
                start_scene: def.start_scene.clone(),
            });
        }
        Ok(Self { cases })
    }

    pub fn get(&self, index: usize) -> Option<&Case> {
        self.cases.get(index)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }
}

// ── Scoring ────────────────────────────────────────────────

/// Session-wide score counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: i64,
    /// Never decreases.
    pub penalties: u32,
}

/// Point values and limits applied by the case transitions.
#[derive(Debug, Clone)]
pub struct CaseRules {
    pub correct_step_points: i64,
    pub incorrect_step_points: i64,
    pub wrong_action_points: i64,
    pub timeout_penalty_points: i64,
    pub time_bonus_multiplier: i64,
    pub max_penalties: u32,
    pub message_duration: Duration,
}

impl CaseRules {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            correct_step_points: config.correct_step_points,
            incorrect_step_points: config.incorrect_step_points,
            wrong_action_points: config.wrong_action_points,
            timeout_penalty_points: config.timeout_penalty_points,
            time_bonus_multiplier: config.time_bonus_multiplier,
            max_penalties: config.max_penalties,
            message_duration: config.message_duration(),
        }
    }
}

impl Default for CaseRules {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

// ── State ──────────────────────────────────────────────────

/// Externally visible state of the case machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    NoCaseActive,
    CaseActive,
    ShowingTransientMessage,
    SessionEnded,
}

impl CaseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCaseActive => "no-case-active",
            Self::CaseActive => "case-active",
            Self::ShowingTransientMessage => "showing-message",
            Self::SessionEnded => "session-ended",
        }
    }
}

/// Progress through the current case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCase {
    pub started: Instant,
    /// Number of steps completed, in `0..=steps.len()`.
    pub progress: usize,
}

/// What happens when the transient message expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    /// The case index was already advanced at completion.
    AfterCompletion,
    /// The failed case is skipped on expiry.
    AfterTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub due: Instant,
    pub kind: PendingKind,
}

/// Terminal record of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnd {
    pub outcome: SessionOutcome,
    pub message: String,
}

// ── CaseMachine ────────────────────────────────────────────

pub struct CaseMachine {
    pub book: CaseBook,
    pub rules: CaseRules,
    /// Index of the current case; equals `book.len()` once exhausted.
    pub case_index: usize,
    pub active: Option<ActiveCase>,
    /// Transient message on screen, if any.
    pub message: Option<String>,
    pub pending: Option<PendingTransition>,
    pub ended: Option<SessionEnd>,
}

impl CaseMachine {
    pub fn new(book: CaseBook, rules: CaseRules) -> Self {
        Self {
            book,
            rules,
            case_index: 0,
            active: None,
            message: None,
            pending: None,
            ended: None,
        }
    }

    pub fn state(&self) -> CaseState {
        if self.ended.is_some() {
            CaseState::SessionEnded
        } else if self.message.is_some() {
            CaseState::ShowingTransientMessage
        } else if self.active.is_some() {
            CaseState::CaseActive
        } else {
            CaseState::NoCaseActive
        }
    }

    /// Whether gaze detection and timeout checks should run.
    pub fn is_interactive(&self) -> bool {
        self.ended.is_none() && self.message.is_none()
    }

    pub fn current_case(&self) -> Option<&Case> {
        self.book.get(self.case_index)
    }

    /// The active case with its progress.
    pub fn active_case(&self) -> Option<(&Case, &ActiveCase)> {
        let active = self.active.as_ref()?;
        Some((self.current_case()?, active))
    }

    /// Whole seconds elapsed on the active case.
    pub fn elapsed_secs(&self, now: Instant) -> Option<u64> {
        self.active
            .map(|a| now.saturating_duration_since(a.started).as_secs())
    }

    /// Seconds left on the active case; negative once overdue.
    pub fn remaining_secs(&self, now: Instant) -> Option<i64> {
        let (case, _) = self.active_case()?;
        let elapsed = self.elapsed_secs(now)?;
        Some(case.time_limit_secs as i64 - elapsed as i64)
    }

    /// Auto-start the current case when its start scene is entered.
    pub fn on_scene_entered(&mut self, scene: &str, now: Instant, events: &mut Vec<SessionEvent>) {
        if !self.is_interactive() || self.active.is_some() {
            return;
        }
        if self.current_case().is_some_and(|c| c.start_scene == scene) {
            self.start_case(now, events);
        }
    }

    /// React to an activated hotspot. GOTO is handled by the session.
    pub fn on_activation(
        &mut self,
        hotspot: &Hotspot,
        now: Instant,
        board: &mut Scoreboard,
        events: &mut Vec<SessionEvent>,
    ) {
        if self.ended.is_some() {
            debug!("case: activation of {} after session end ignored", hotspot.id);
            return;
        }
        match &hotspot.kind {
            HotspotKind::Goto { .. } => {}
            HotspotKind::StartCase => {
                debug!("case: start-case hotspot {} has no transition", hotspot.id);
            }
            HotspotKind::WrongAction => self.wrong_action(hotspot, board, events),
            HotspotKind::Action => self.action(hotspot, now, board, events),
        }
    }

    fn wrong_action(&mut self, hotspot: &Hotspot, board: &mut Scoreboard, events: &mut Vec<SessionEvent>) {
        board.score -= self.rules.wrong_action_points;
        board.penalties += 1;
        info!(
            "case: wrong action '{}' (penalties {}/{})",
            hotspot.label, board.penalties, self.rules.max_penalties
        );
        events.push(SessionEvent::WrongAction {
            label: hotspot.label.clone(),
        });
        if board.penalties >= self.rules.max_penalties {
            self.end_session(SessionOutcome::Failure, TOO_MANY_PENALTIES_MESSAGE.to_string(), events);
        }
    }

    fn action(&mut self, hotspot: &Hotspot, now: Instant, board: &mut Scoreboard, events: &mut Vec<SessionEvent>) {
        let index = self.case_index;
        let Some(active) = self.active.as_mut() else {
            debug!("case: action '{}' with no active case", hotspot.label);
            return;
        };
        let Some(case) = self.book.get(index) else {
            return;
        };
        let Some(expected) = case.steps.get(active.progress) else {
            return;
        };

        if hotspot.label != *expected {
            board.score -= self.rules.incorrect_step_points;
            debug!("case: expected '{}', got '{}'", expected, hotspot.label);
            events.push(SessionEvent::StepIncorrect {
                index,
                expected: expected.clone(),
                got: hotspot.label.clone(),
            });
            return;
        }

        board.score += self.rules.correct_step_points;
        active.progress += 1;
        debug!("case {}: step {} '{}' correct", index, active.progress, hotspot.label);
        events.push(SessionEvent::StepCorrect {
            index,
            step: active.progress - 1,
            label: hotspot.label.clone(),
        });

        if active.progress >= case.steps.len() {
            let elapsed = now.saturating_duration_since(active.started).as_secs() as i64;
            let remaining = case.time_limit_secs as i64 - elapsed;
            let bonus = if remaining > 0 {
                remaining * self.rules.time_bonus_multiplier
            } else {
                0
            };
            board.score += bonus;
            self.complete_case(bonus, now, events);
        }
    }

    /// Fail the active case once its time limit has elapsed.
    pub fn check_timeout(&mut self, now: Instant, board: &mut Scoreboard, events: &mut Vec<SessionEvent>) {
        if !self.is_interactive() {
            return;
        }
        let (Some(case), Some(elapsed)) = (self.current_case(), self.elapsed_secs(now)) else {
            return;
        };
        if elapsed < case.time_limit_secs as u64 {
            return;
        }

        let index = self.case_index;
        self.active = None;
        board.penalties += 1;
        board.score -= self.rules.timeout_penalty_points;
        info!(
            "case {}: timed out after {}s (penalties {}/{})",
            index, elapsed, board.penalties, self.rules.max_penalties
        );
        events.push(SessionEvent::CaseTimedOut { index });

        if board.penalties >= self.rules.max_penalties {
            self.end_session(SessionOutcome::Failure, TOO_MANY_PENALTIES_MESSAGE.to_string(), events);
        } else {
            self.show_message(TIMEOUT_MESSAGE, PendingKind::AfterTimeout, now);
        }
    }

    /// Fire the pending transition once its message has been shown long enough.
    pub fn tick_pending(
        &mut self,
        now: Instant,
        current_scene: &str,
        board: &Scoreboard,
        events: &mut Vec<SessionEvent>,
    ) {
        let Some(pending) = self.pending else {
            return;
        };
        if now < pending.due {
            return;
        }
        self.pending = None;
        if self.ended.is_some() {
            return;
        }

        self.message = None;
        events.push(SessionEvent::MessageDismissed);
        if pending.kind == PendingKind::AfterTimeout {
            self.case_index += 1;
        }

        if self.case_index >= self.book.len() {
            let message = match pending.kind {
                PendingKind::AfterCompletion => {
                    format!("Congratulations! All cases completed!\nScore: {}", board.score)
                }
                PendingKind::AfterTimeout => format!("All cases attempted.\nScore: {}", board.score),
            };
            self.end_session(SessionOutcome::Success, message, events);
        } else {
            self.on_scene_entered(current_scene, now, events);
        }
    }

    fn start_case(&mut self, now: Instant, events: &mut Vec<SessionEvent>) {
        let Some(case) = self.current_case() else {
            return;
        };
        info!("case {}: started '{}'", self.case_index, case.description);
        self.active = Some(ActiveCase {
            started: now,
            progress: 0,
        });
        events.push(SessionEvent::CaseStarted {
            index: self.case_index,
        });
    }

    fn complete_case(&mut self, bonus: i64, now: Instant, events: &mut Vec<SessionEvent>) {
        info!("case {}: completed (time bonus {})", self.case_index, bonus);
        events.push(SessionEvent::CaseCompleted {
            index: self.case_index,
            bonus,
        });
        self.active = None;
        self.case_index += 1;
        self.show_message(CASE_COMPLETE_MESSAGE, PendingKind::AfterCompletion, now);
    }

    fn show_message(&mut self, text: &str, kind: PendingKind, now: Instant) {
        self.message = Some(text.to_string());
        self.pending = Some(PendingTransition {
            due: now + self.rules.message_duration,
            kind,
        });
    }

    fn end_session(&mut self, outcome: SessionOutcome, message: String, events: &mut Vec<SessionEvent>) {
        if self.ended.is_some() {
            return;
        }
        info!("session ended ({}): {}", outcome.as_str(), message.replace('\n', " "));
        self.active = None;
        self.message = None;
        self.pending = None;
        events.push(SessionEvent::SessionEnded {
            outcome,
            message: message.clone(),
        });
        self.ended = Some(SessionEnd { outcome, message });
    }

    /// Generate s-expression for status reporting.
    pub fn status_sexp(&self, now: Instant, board: &Scoreboard) -> String {
        format!(
            "(:state :{} :case {} :cases {} :progress {} :remaining-s {} :score {} :penalties {})",
            self.state().as_str(),
            self.case_index,
            self.book.len(),
            self.active.map(|a| a.progress).unwrap_or(0),
            self.remaining_secs(now)
                .map(|s| s.max(0).to_string())
                .unwrap_or_else(|| "nil".to_string()),
            board.score,
            board.penalties,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::content::WorldDef;

    const A: &str = "A";
    const B: &str = "B";
    const C: &str = "C";

    fn world() -> World {
        World::from_def(&WorldDef::builtin().unwrap().scenes, 950.0).unwrap()
    }

    fn case_def(steps: &[&str], limit: u32, scene: &str) -> CaseDef {
        CaseDef {
            description: format!("{} steps", steps.len()),
            steps: steps.iter().map(|s| s.to_string()).collect(),
            time_limit_secs: limit,
            requires_doctor: false,
            start_scene: scene.to_string(),
        }
    }

    fn machine(defs: &[CaseDef]) -> CaseMachine {
        CaseMachine::new(CaseBook::new(defs, &world()).unwrap(), CaseRules::default())
    }

    fn action(label: &str) -> Hotspot {
        Hotspot::new(format!("h_{}", label), label.to_string(), HotspotKind::Action, 0.0, 0.0, 950.0)
    }

    fn wrong(label: &str) -> Hotspot {
        Hotspot::new(format!("w_{}", label), label.to_string(), HotspotKind::WrongAction, 0.0, 0.0, 950.0)
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_casebook_validation() {
        let w = world();
        assert!(matches!(CaseBook::new(&[], &w), Err(ContentError::NoCases)));
        assert!(matches!(
            CaseBook::new(&[case_def(&[], 60, "nursing")], &w),
            Err(ContentError::EmptyCaseSteps { index: 0, .. })
        ));
        assert!(matches!(
            CaseBook::new(&[case_def(&[A], 0, "nursing")], &w),
            Err(ContentError::ZeroTimeLimit { .. })
        ));
        assert!(matches!(
            CaseBook::new(&[case_def(&[A], 60, "attic")], &w),
            Err(ContentError::UnknownStartScene { .. })
        ));
    }

    #[test]
    fn test_auto_start_only_in_start_scene() {
        let mut m = machine(&[case_def(&[A], 60, "nursing")]);
        let mut events = Vec::new();
        let t0 = Instant::now();

        m.on_scene_entered("reception", t0, &mut events);
        assert_eq!(m.state(), CaseState::NoCaseActive);

        m.on_scene_entered("nursing", t0, &mut events);
        assert_eq!(m.state(), CaseState::CaseActive);
        assert_eq!(events, vec![SessionEvent::CaseStarted { index: 0 }]);

        // Re-entering does not restart the clock.
        m.on_scene_entered("nursing", t0 + secs(5), &mut events);
        assert_eq!(m.active.unwrap().started, t0);
    }

    #[test]
    fn test_step_order_enforced() {
        let mut m = machine(&[case_def(&[A, B, C], 120, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);

        m.on_activation(&action(B), t0, &mut board, &mut events);
        assert_eq!(m.active.unwrap().progress, 0);
        assert_eq!(board.score, -15);
        assert_eq!(board.penalties, 0, "incorrect steps are not penalties");

        m.on_activation(&action(A), t0, &mut board, &mut events);
        assert_eq!(m.active.unwrap().progress, 1);
        assert_eq!(board.score, 5);
    }

    #[test]
    fn test_action_without_active_case_is_noop() {
        let mut m = machine(&[case_def(&[A], 60, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        m.on_activation(&action(A), Instant::now(), &mut board, &mut events);
        assert_eq!(board, Scoreboard::default());
        assert!(events.is_empty());
    }

    #[test]
    fn test_completion_time_bonus() {
        let mut m = machine(&[case_def(&[A], 120, "nursing"), case_def(&[B], 60, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);

        m.on_activation(&action(A), t0 + secs(100), &mut board, &mut events);
        assert_eq!(board.score, 20 + (120 - 100) * 2);
        assert!(events.contains(&SessionEvent::CaseCompleted { index: 0, bonus: 40 }));
        assert_eq!(m.case_index, 1);
        assert_eq!(m.state(), CaseState::ShowingTransientMessage);
        assert_eq!(m.message.as_deref(), Some(CASE_COMPLETE_MESSAGE));
    }

    #[test]
    fn test_no_bonus_after_limit() {
        let mut m = machine(&[case_def(&[A], 120, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);

        m.on_activation(&action(A), t0 + secs(130), &mut board, &mut events);
        assert_eq!(board.score, 20);
        assert!(events.contains(&SessionEvent::CaseCompleted { index: 0, bonus: 0 }));
    }

    #[test]
    fn test_message_expiry_starts_next_case_in_same_scene() {
        let mut m = machine(&[case_def(&[A], 120, "nursing"), case_def(&[B], 60, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);
        m.on_activation(&action(A), t0 + secs(10), &mut board, &mut events);

        m.tick_pending(t0 + secs(12), "nursing", &board, &mut events);
        assert_eq!(m.state(), CaseState::ShowingTransientMessage);

        m.tick_pending(t0 + secs(13), "nursing", &board, &mut events);
        assert_eq!(m.state(), CaseState::CaseActive);
        assert_eq!(m.case_index, 1);
        assert_eq!(m.active.unwrap().started, t0 + secs(13));
    }

    #[test]
    fn test_message_expiry_waits_for_start_scene() {
        let mut m = machine(&[case_def(&[A], 120, "nursing"), case_def(&[B], 60, "procedures")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);
        m.on_activation(&action(A), t0, &mut board, &mut events);
        m.tick_pending(t0 + secs(3), "nursing", &board, &mut events);
        assert_eq!(m.state(), CaseState::NoCaseActive);

        m.on_scene_entered("procedures", t0 + secs(20), &mut events);
        assert_eq!(m.state(), CaseState::CaseActive);
    }

    #[test]
    fn test_last_case_ends_session_after_message() {
        let mut m = machine(&[case_def(&[A], 120, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);
        m.on_activation(&action(A), t0 + secs(20), &mut board, &mut events);
        assert!(m.ended.is_none());

        m.tick_pending(t0 + secs(23), "nursing", &board, &mut events);
        let end = m.ended.clone().unwrap();
        assert_eq!(end.outcome, SessionOutcome::Success);
        assert!(end.message.contains(&format!("Score: {}", board.score)));
        assert_eq!(m.state(), CaseState::SessionEnded);
    }

    #[test]
    fn test_timeout_penalizes_and_skips_case() {
        let mut m = machine(&[case_def(&[A], 60, "nursing"), case_def(&[B], 60, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);

        m.check_timeout(t0 + Duration::from_millis(59_999), &mut board, &mut events);
        assert_eq!(m.state(), CaseState::CaseActive);

        m.check_timeout(t0 + secs(60), &mut board, &mut events);
        assert_eq!(board, Scoreboard { score: -30, penalties: 1 });
        assert_eq!(m.message.as_deref(), Some(TIMEOUT_MESSAGE));
        assert_eq!(m.case_index, 0);

        m.tick_pending(t0 + secs(63), "nursing", &board, &mut events);
        assert_eq!(m.case_index, 1);
        assert_eq!(m.state(), CaseState::CaseActive);
    }

    #[test]
    fn test_timeout_of_last_case_ends_session() {
        let mut m = machine(&[case_def(&[A], 10, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);
        m.check_timeout(t0 + secs(10), &mut board, &mut events);
        m.tick_pending(t0 + secs(13), "nursing", &board, &mut events);

        let end = m.ended.clone().unwrap();
        assert_eq!(end.outcome, SessionOutcome::Success);
        assert!(end.message.contains("Score: -30"));
    }

    #[test]
    fn test_penalty_threshold_ends_session() {
        let mut m = machine(&[case_def(&[A], 10, "nursing"), case_def(&[A], 10, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);

        m.on_activation(&wrong("X"), t0, &mut board, &mut events);
        m.on_activation(&wrong("Y"), t0, &mut board, &mut events);
        assert!(m.ended.is_none());
        m.check_timeout(t0 + secs(10), &mut board, &mut events);

        let end = m.ended.clone().unwrap();
        assert_eq!(end.outcome, SessionOutcome::Failure);
        assert_eq!(end.message, TOO_MANY_PENALTIES_MESSAGE);
        assert_eq!(board, Scoreboard { score: -70, penalties: 3 });
        assert!(m.pending.is_none());

        let frozen = board;
        m.on_activation(&wrong("Z"), t0 + secs(11), &mut board, &mut events);
        m.on_activation(&action(A), t0 + secs(11), &mut board, &mut events);
        m.check_timeout(t0 + secs(100), &mut board, &mut events);
        m.tick_pending(t0 + secs(100), "nursing", &board, &mut events);
        assert_eq!(board, frozen);
        assert_eq!(m.state(), CaseState::SessionEnded);
    }

    #[test]
    fn test_wrong_action_without_case() {
        let mut m = machine(&[case_def(&[A], 60, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        m.on_activation(&wrong("X"), Instant::now(), &mut board, &mut events);
        assert_eq!(board, Scoreboard { score: -20, penalties: 1 });
        assert_eq!(m.state(), CaseState::NoCaseActive);
    }

    #[test]
    fn test_no_timeout_while_message_showing() {
        let mut m = machine(&[case_def(&[A], 120, "nursing"), case_def(&[B], 1, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let t0 = Instant::now();
        m.on_scene_entered("nursing", t0, &mut events);
        m.on_activation(&action(A), t0, &mut board, &mut events);
        let before = board;
        m.check_timeout(t0 + secs(2), &mut board, &mut events);
        assert_eq!(board, before);
    }

    #[test]
    fn test_start_case_hotspot_is_inert() {
        let mut m = machine(&[case_def(&[A], 60, "nursing")]);
        let mut board = Scoreboard::default();
        let mut events = Vec::new();
        let h = Hotspot::new("s".to_string(), "Start".to_string(), HotspotKind::StartCase, 0.0, 0.0, 950.0);
        m.on_activation(&h, Instant::now(), &mut board, &mut events);
        assert_eq!(m.state(), CaseState::NoCaseActive);
        assert!(events.is_empty());
    }

    #[test]
    fn test_remaining_secs() {
        let mut m = machine(&[case_def(&[A], 60, "nursing")]);
        let mut events = Vec::new();
        let t0 = Instant::now();
        assert_eq!(m.remaining_secs(t0), None);
        m.on_scene_entered("nursing", t0, &mut events);
        assert_eq!(m.remaining_secs(t0 + Duration::from_millis(10_500)), Some(50));
    }

    #[test]
    fn test_status_sexp() {
        let m = machine(&[case_def(&[A], 60, "nursing")]);
        let sexp = m.status_sexp(Instant::now(), &Scoreboard::default());
        assert!(sexp.contains(":state :no-case-active"));
        assert!(sexp.contains(":remaining-s nil"));
    }
}
