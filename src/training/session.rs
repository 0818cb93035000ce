//! Session manager — composes orientation, gaze, and the case machine
//! into one per-frame `update`, plus a read-only `render` projection.
//!
//! Follows the single-owner pattern: `Session` owns every piece of
//! mutable state and is driven by exactly one caller, the frame
//! scheduler. Score counters live here but change only inside
//! `CaseMachine` transitions.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::case::{CaseBook, CaseMachine, CaseRules, CaseState, Scoreboard};
use super::content::WorldDef;
use super::events::{SessionEvent, SessionOutcome};
use super::hud::{
    CasePanel, FrameView, GazeIndicator, HudPanel, Overlay, OverlayKind, StepLine, StepStatus, Tone,
    EDITOR_HINT, RELOAD_HINT,
};
use crate::config::SessionConfig;
use crate::error::ContentError;
use crate::input_source::InputEvent;
use crate::vr::gaze::{DwellConfig, GazeDetector, GazePhase};
use crate::vr::hotspot::{AimWindow, HotspotDef, HotspotKind};
use crate::vr::orientation::OrientationModel;
use crate::vr::scene::{Scene, World};

pub struct Session {
    pub config: SessionConfig,
    pub world: World,
    pub cases: CaseMachine,
    pub board: Scoreboard,
    pub camera: OrientationModel,
    pub gaze: GazeDetector,
    pub window: AimWindow,
    pub current_scene: String,
    pub editor_mode: bool,
}

impl Session {
    /// Build the world graph and case book. Call `begin` before the first frame.
    pub fn new(def: &WorldDef, config: SessionConfig) -> Result<Self, ContentError> {
        let world = World::from_def(&def.scenes, config.hotspot_radius())?;
        if !world.contains(&config.initial_scene) {
            return Err(ContentError::UnknownInitialScene(config.initial_scene.clone()));
        }
        let book = CaseBook::new(&def.cases, &world)?;
        info!(
            "session: {} scenes, {} cases, starting in {}",
            world.scene_names().count(),
            book.len(),
            config.initial_scene
        );

        Ok(Self {
            cases: CaseMachine::new(book, CaseRules::from_config(&config)),
            board: Scoreboard::default(),
            camera: OrientationModel::new(config.drag_sensitivity),
            gaze: GazeDetector::new(DwellConfig {
                threshold: config.gaze_duration(),
            }),
            window: AimWindow::from_config(&config),
            current_scene: config.initial_scene.clone(),
            editor_mode: false,
            world,
            config,
        })
    }

    /// Enter the initial scene, auto-starting a case that begins there.
    pub fn begin(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let scene = self.current_scene.clone();
        self.cases.on_scene_entered(&scene, now, &mut events);
        events
    }

    pub fn is_ended(&self) -> bool {
        self.cases.ended.is_some()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.cases.ended.as_ref().map(|end| end.outcome)
    }

    pub fn state(&self) -> CaseState {
        self.cases.state()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.world.get(&self.current_scene)
    }

    /// Advance the session by one frame.
    pub fn update(&mut self, inputs: &[InputEvent], now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for input in inputs {
            self.apply_input(input, &mut events);
        }

        self.cases
            .tick_pending(now, &self.current_scene, &self.board, &mut events);

        if !self.cases.is_interactive() {
            self.gaze.suspend();
            return events;
        }

        let candidate = self
            .world
            .get(&self.current_scene)
            .and_then(|scene| scene.candidate(&self.camera.orientation, &self.window));
        if let Some(hotspot_id) = self.gaze.update(candidate, now).activated {
            self.activate(&hotspot_id, now, &mut events);
        }

        self.cases.check_timeout(now, &mut self.board, &mut events);
        events
    }

    fn apply_input(&mut self, input: &InputEvent, events: &mut Vec<SessionEvent>) {
        match input {
            InputEvent::PointerDown { x, y } => self.camera.begin_drag(*x, *y),
            InputEvent::PointerMove { x, y } => self.camera.update(*x, *y),
            InputEvent::PointerUp => self.camera.end_drag(),
            InputEvent::Key { key } => match key.to_ascii_lowercase() {
                'e' => {
                    self.editor_mode = !self.editor_mode;
                    info!("editor mode: {}", self.editor_mode);
                    events.push(SessionEvent::EditorToggled {
                        enabled: self.editor_mode,
                    });
                }
                'c' if self.editor_mode => events.push(SessionEvent::AuthoringRequested {
                    scene: self.current_scene.clone(),
                }),
                _ => {}
            },
            InputEvent::AuthorHotspot { label, kind } => self.author_hotspot(label, kind, events),
            InputEvent::Wait { .. } => {}
        }
    }

    /// Append a hotspot at the current aim to the current scene.
    fn author_hotspot(&mut self, label: &str, kind: &HotspotKind, events: &mut Vec<SessionEvent>) {
        if !self.editor_mode {
            debug!("authoring ignored outside editor mode");
            return;
        }
        let orientation = self.camera.orientation;
        let Some(scene) = self.world.get_mut(&self.current_scene) else {
            return;
        };
        let def = HotspotDef {
            id: Some(scene.next_editor_id()),
            label: label.to_string(),
            kind: kind.clone(),
            yaw_deg: orientation.yaw.to_degrees(),
            pitch_deg: orientation.pitch.to_degrees(),
        };
        match scene.add_hotspot_from_def(&def, "").map(|h| h.id.clone()) {
            Ok(hotspot_id) => {
                info!(
                    "authored hotspot {} '{}' in {} at ({:.2}°, {:.2}°)",
                    hotspot_id, def.label, scene.name, def.yaw_deg, def.pitch_deg
                );
                events.push(SessionEvent::HotspotAuthored {
                    scene: scene.name.clone(),
                    hotspot_id,
                });
            }
            Err(e) => warn!("authoring rejected: {}", e),
        }
    }

    fn activate(&mut self, hotspot_id: &str, now: Instant, events: &mut Vec<SessionEvent>) {
        let Some(hotspot) = self
            .world
            .get(&self.current_scene)
            .and_then(|scene| scene.hotspot(hotspot_id))
            .cloned()
        else {
            return;
        };
        events.push(SessionEvent::HotspotActivated {
            hotspot_id: hotspot.id.clone(),
            kind: hotspot.kind.as_str(),
        });

        match &hotspot.kind {
            HotspotKind::Goto { target } => self.change_scene(target, now, events),
            _ => self
                .cases
                .on_activation(&hotspot, now, &mut self.board, events),
        }
    }

    /// Switch the displayed scene. Unknown names are logged and ignored.
    pub fn change_scene(&mut self, name: &str, now: Instant, events: &mut Vec<SessionEvent>) {
        if self.is_ended() {
            return;
        }
        if !self.world.contains(name) {
            warn!("scene change to unknown scene '{}' ignored", name);
            events.push(SessionEvent::SceneChangeRejected {
                target: name.to_string(),
            });
            return;
        }
        let from = std::mem::replace(&mut self.current_scene, name.to_string());
        info!("scene: {} -> {}", from, name);
        events.push(SessionEvent::SceneChanged {
            from,
            to: name.to_string(),
        });
        self.cases.on_scene_entered(name, now, events);
    }

    /// Project the current state for the presenter. Never mutates.
    pub fn render(&self, now: Instant) -> FrameView {
        let scene = self.scene();
        FrameView {
            scene: self.current_scene.clone(),
            backdrop: scene.map(|s| s.backdrop.clone()).unwrap_or_default(),
            orientation: self.camera.orientation,
            gaze: self.gaze_indicator(scene, now),
            hud: self.hud_panel(now),
            overlays: self.overlays(),
            editor_hint: self.editor_mode.then_some(EDITOR_HINT),
        }
    }

    fn gaze_indicator(&self, scene: Option<&Scene>, now: Instant) -> GazeIndicator {
        if !self.cases.is_interactive() {
            return GazeIndicator::default();
        }
        match &self.gaze.phase {
            GazePhase::Acquiring { hotspot_id, .. } => GazeIndicator {
                progress: self.gaze.progress(now),
                label: scene
                    .and_then(|s| s.hotspot(hotspot_id))
                    .map(|h| h.label.clone()),
            },
            _ => GazeIndicator::default(),
        }
    }

    fn hud_panel(&self, now: Instant) -> HudPanel {
        let case = self.cases.active_case().map(|(case, active)| CasePanel {
            number: self.cases.case_index + 1,
            description: case.description.clone(),
            remaining_secs: self.cases.remaining_secs(now).unwrap_or(0).max(0) as u64,
            requires_doctor: case.requires_doctor,
            steps: case
                .steps
                .iter()
                .enumerate()
                .map(|(i, label)| StepLine {
                    number: i + 1,
                    label: label.clone(),
                    status: StepStatus::for_step(i, active.progress),
                })
                .collect(),
        });
        HudPanel {
            scene: self.current_scene.clone(),
            score: self.board.score,
            penalties: self.board.penalties,
            max_penalties: self.cases.rules.max_penalties,
            case,
        }
    }

    fn overlays(&self) -> Vec<Overlay> {
        let mut overlays = Vec::new();
        if let Some(text) = &self.cases.message {
            overlays.push(Overlay {
                kind: OverlayKind::Transient,
                text: text.clone(),
                tone: Tone::Current,
                hint: None,
            });
        }
        if let Some(end) = &self.cases.ended {
            overlays.push(Overlay {
                kind: OverlayKind::Final,
                text: end.message.clone(),
                tone: match end.outcome {
                    SessionOutcome::Success => Tone::Success,
                    SessionOutcome::Failure => Tone::Error,
                },
                hint: Some(RELOAD_HINT),
            });
        }
        overlays
    }

    /// Generate s-expression for status reporting.
    pub fn status_sexp(&self, now: Instant) -> String {
        format!(
            "(:scene \"{}\" :yaw-deg {:.1} :pitch-deg {:.1} :editor {} :case {} :gaze {})",
            self.current_scene,
            self.camera.orientation.yaw.to_degrees(),
            self.camera.orientation.pitch.to_degrees(),
            if self.editor_mode { "t" } else { "nil" },
            self.cases.status_sexp(now, &self.board),
            self.gaze.status_sexp(now),
        )
    }
}
