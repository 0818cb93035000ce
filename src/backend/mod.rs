//! Presenter abstraction — how a frame leaves the engine.
//!
//! The session hands the presenter the current scene and a read-only
//! `FrameView`. A graphical renderer would draw the panorama, the hotspot
//! labels, and the HUD; the headless presenter only logs and counts.

use tracing::{info, trace};

use crate::training::hud::{FrameView, OverlayKind};
use crate::vr::orientation::Orientation;
use crate::vr::scene::Scene;

pub mod headless;

/// Frame sink driven by the scheduler once per frame.
pub trait Presenter {
    /// Draw the panorama and hotspot labels from the given camera.
    fn render_scene(&mut self, scene: &Scene, orientation: &Orientation);

    /// Draw the HUD, gaze indicator, and overlays on top of the scene.
    fn render_overlay(&mut self, view: &FrameView);
}

/// Presenter for CI and scripted runs: nothing is drawn.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    pub frames: u64,
    /// Most recent projection, kept for inspection.
    pub last_view: Option<FrameView>,
    /// Ids of hotspots in front of the camera on the last scene pass.
    pub visible: Vec<String>,
    last_scene: Option<String>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for HeadlessPresenter {
    fn render_scene(&mut self, scene: &Scene, orientation: &Orientation) {
        if self.last_scene.as_deref() != Some(scene.name.as_str()) {
            info!(
                "presenter: scene {} ({}, {} hotspots)",
                scene.name,
                scene.backdrop,
                scene.hotspots.len()
            );
            self.last_scene = Some(scene.name.clone());
        }
        trace!(
            "presenter: frame {} yaw={:.3} pitch={:.3}",
            self.frames,
            orientation.yaw,
            orientation.pitch
        );

        // View space looks down -Z; anything with z >= 0 is behind the camera.
        self.visible.clear();
        for hotspot in &scene.hotspots {
            let view = orientation.to_view_space(hotspot.position);
            if view.z < 0.0 {
                trace!(
                    "presenter: {} at view ({:.1}, {:.1}, {:.1})",
                    hotspot.id,
                    view.x,
                    view.y,
                    view.z
                );
                self.visible.push(hotspot.id.clone());
            }
        }
    }

    fn render_overlay(&mut self, view: &FrameView) {
        let previous = self.last_view.as_ref().map(|v| v.overlays.as_slice()).unwrap_or(&[]);
        for overlay in &view.overlays {
            if !previous.contains(overlay) {
                let kind = match overlay.kind {
                    OverlayKind::Transient => "message",
                    OverlayKind::Final => "final",
                };
                info!("presenter: {} overlay: {}", kind, overlay.text.replace('\n', " | "));
            }
        }
        self.frames += 1;
        self.last_view = Some(view.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::training::content::WorldDef;
    use crate::training::session::Session;
    use std::time::Instant;

    #[test]
    fn test_headless_presenter_counts_frames() {
        let session = Session::new(&WorldDef::builtin().unwrap(), SessionConfig::default()).unwrap();
        let mut presenter = HeadlessPresenter::new();
        let now = Instant::now();
        for _ in 0..3 {
            presenter.render_scene(session.scene().unwrap(), &session.camera.orientation);
            presenter.render_overlay(&session.render(now));
        }
        assert_eq!(presenter.frames, 3);
        assert_eq!(presenter.last_view.as_ref().unwrap().scene, "reception");
    }

    #[test]
    fn test_visible_hotspots_follow_camera() {
        let session = Session::new(&WorldDef::builtin().unwrap(), SessionConfig::default()).unwrap();
        let reception = session.scene().unwrap();
        let nursing_door = reception.hotspots[0].id.clone();
        let procedures_door = reception.hotspots[1].id.clone();
        let mut presenter = HeadlessPresenter::new();

        // Doors sit at ±150°, both behind a camera facing 0°.
        presenter.render_scene(reception, &Orientation::default());
        assert!(presenter.visible.is_empty());

        presenter.render_scene(reception, &Orientation::from_degrees(150.0, 0.0));
        assert!(presenter.visible.contains(&nursing_door));
        assert!(presenter.visible.contains(&procedures_door));

        presenter.render_scene(reception, &Orientation::from_degrees(100.0, 0.0));
        assert_eq!(presenter.visible, vec![nursing_door]);
    }
}
