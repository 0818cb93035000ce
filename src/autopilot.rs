//! Scripted walkthrough generation for headless runs.
//!
//! Plans the input a trainee would produce to finish every case in order:
//! navigate to each case's start scene through GOTO hotspots, aim at each
//! step's hotspot with a pointer drag, and hold the gaze for the dwell
//! threshold. The camera is tracked with the same `OrientationModel` the
//! session uses, so the planned aim matches what the session computes.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::input_source::InputEvent;
use crate::training::session::Session;
use crate::vr::hotspot::{Hotspot, HotspotKind};
use crate::vr::math::angle_diff;
use crate::vr::orientation::OrientationModel;
use crate::vr::scene::World;

// ── AutopilotConfig ─────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AutopilotConfig {
    /// Extra hold beyond each dwell and message duration (ms).
    pub margin_ms: u64,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self { margin_ms: 100 }
    }
}

// ── PlanError ───────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("no GOTO path from scene '{from}' to '{to}'")]
    Unreachable { from: String, to: String },
    #[error("scene '{scene}' has no action hotspot labelled '{label}'")]
    MissingStep { scene: String, label: String },
}

// ── Planner ─────────────────────────────────────────────────

struct Planner<'a> {
    world: &'a World,
    camera: OrientationModel,
    cursor: (f64, f64),
    scene: String,
    dwell: Duration,
    script: Vec<InputEvent>,
}

impl Planner<'_> {
    /// Drag the camera onto the hotspot along the shortest yaw arc.
    fn aim(&mut self, hotspot: &Hotspot) {
        let s = self.camera.sensitivity;
        let current = self.camera.orientation;
        let dx = angle_diff(hotspot.yaw, current.yaw) / s;
        let dy = -(hotspot.pitch - current.pitch) / s;

        let (x0, y0) = self.cursor;
        let (x1, y1) = (x0 + dx, y0 + dy);
        self.camera.begin_drag(x0, y0);
        self.camera.update(x1, y1);
        self.camera.end_drag();
        self.cursor = (x1, y1);

        self.script.push(InputEvent::PointerDown { x: x0, y: y0 });
        self.script.push(InputEvent::PointerMove { x: x1, y: y1 });
        self.script.push(InputEvent::PointerUp);
    }

    fn hold(&mut self, duration: Duration) {
        self.script.push(InputEvent::Wait { duration });
    }

    fn activate(&mut self, hotspot: &Hotspot) {
        debug!("autopilot: {} '{}'", hotspot.id, hotspot.label);
        self.aim(hotspot);
        self.hold(self.dwell);
    }

    fn navigate(&mut self, to: &str) -> Result<(), PlanError> {
        let path = shortest_path(self.world, &self.scene, to).ok_or_else(|| PlanError::Unreachable {
            from: self.scene.clone(),
            to: to.to_string(),
        })?;
        for next in path {
            let world = self.world;
            let hop = world
                .get(&self.scene)
                .and_then(|scene| scene.hotspots.iter().find(|h| h.goto_target() == Some(next.as_str())))
                .ok_or_else(|| PlanError::Unreachable {
                    from: self.scene.clone(),
                    to: next.clone(),
                })?;
            self.activate(hop);
            self.scene = next;
        }
        Ok(())
    }

    fn step(&mut self, label: &str) -> Result<(), PlanError> {
        let world = self.world;
        let hotspot = world
            .get(&self.scene)
            .and_then(|scene| {
                scene
                    .hotspots
                    .iter()
                    .find(|h| h.kind == HotspotKind::Action && h.label == label)
            })
            .ok_or_else(|| PlanError::MissingStep {
                scene: self.scene.clone(),
                label: label.to_string(),
            })?;
        self.activate(hotspot);
        Ok(())
    }
}

/// Scenes to pass through after `from` to reach `to`, excluding `from`.
pub fn shortest_path(world: &World, from: &str, to: &str) -> Option<Vec<String>> {
    if from == to {
        return Some(Vec::new());
    }
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        for next in world.neighbours(current) {
            if next == from || parent.contains_key(next) {
                continue;
            }
            parent.insert(next, current);
            if next == to {
                let mut path = vec![to.to_string()];
                let mut cursor = to;
                while let Some(&prev) = parent.get(cursor) {
                    if prev == from {
                        break;
                    }
                    path.push(prev.to_string());
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }
    None
}

/// Plan the input that completes every case of `session` in order.
pub fn walkthrough(session: &Session, config: &AutopilotConfig) -> Result<Vec<InputEvent>, PlanError> {
    let margin = Duration::from_millis(config.margin_ms);
    let mut planner = Planner {
        world: &session.world,
        camera: session.camera.clone(),
        cursor: (0.0, 0.0),
        scene: session.current_scene.clone(),
        dwell: session.config.gaze_duration() + margin,
        script: Vec::new(),
    };

    for case in session.cases.book.iter() {
        planner.navigate(&case.start_scene)?;
        for label in &case.steps {
            planner.step(label)?;
        }
        planner.hold(session.config.message_duration() + margin);
    }

    info!(
        "autopilot: planned {} events for {} cases",
        planner.script.len(),
        session.cases.book.len()
    );
    Ok(planner.script)
}
