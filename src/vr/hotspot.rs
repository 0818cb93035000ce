//! Hotspots — interactive targets on the inside of the panorama sphere.
//!
//! A hotspot is placed with a spherical-to-Cartesian projection and is
//! "looked at" when the camera's yaw and pitch both fall inside an
//! independent per-axis window. The window is rectangular, not a cone.

use serde::{Deserialize, Serialize};

use super::math::{angle_diff, Vec3};
use super::orientation::Orientation;
use crate::config::SessionConfig;

// ── HotspotKind ─────────────────────────────────────────────

/// What activating a hotspot does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HotspotKind {
    /// A clinical step, matched against the active case.
    Action,
    /// Navigation to another scene.
    Goto { target: String },
    /// Marks a case entry point; carries no transition of its own.
    StartCase,
    /// Always penalized, whatever the case state.
    WrongAction,
}

impl HotspotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Goto { .. } => "goto",
            Self::StartCase => "start-case",
            Self::WrongAction => "wrong-action",
        }
    }
}

// ── HotspotDef ──────────────────────────────────────────────

/// Declarative hotspot description, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotDef {
    /// Explicit id; generated from the scene name and index when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    #[serde(flatten)]
    pub kind: HotspotKind,
    #[serde(default)]
    pub yaw_deg: f64,
    #[serde(default)]
    pub pitch_deg: f64,
}

// ── AimWindow ───────────────────────────────────────────────

/// Per-axis detection thresholds in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimWindow {
    pub yaw: f64,
    pub pitch: f64,
}

impl AimWindow {
    pub fn from_degrees(yaw_deg: f64, pitch_deg: f64) -> Self {
        Self {
            yaw: yaw_deg.to_radians(),
            pitch: pitch_deg.to_radians(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::from_degrees(config.yaw_threshold_deg, config.pitch_threshold_deg)
    }
}

// ── Hotspot ─────────────────────────────────────────────────

/// Project (yaw, pitch, r) onto the sphere, facing the viewer at the origin.
pub fn spherical_to_cartesian(yaw: f64, pitch: f64, r: f64) -> Vec3 {
    Vec3::new(
        -r * yaw.sin() * pitch.cos(),
        r * pitch.sin(),
        -r * yaw.cos() * pitch.cos(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    /// Unique within its scene.
    pub id: String,
    pub label: String,
    pub kind: HotspotKind,
    /// Radians.
    pub yaw: f64,
    /// Radians.
    pub pitch: f64,
    pub position: Vec3,
}

impl Hotspot {
    pub fn new(id: String, label: String, kind: HotspotKind, yaw: f64, pitch: f64, radius: f64) -> Self {
        Self {
            position: spherical_to_cartesian(yaw, pitch, radius),
            id,
            label,
            kind,
            yaw,
            pitch,
        }
    }

    pub fn from_def(def: &HotspotDef, id: String, radius: f64) -> Self {
        Self::new(
            id,
            def.label.clone(),
            def.kind.clone(),
            def.yaw_deg.to_radians(),
            def.pitch_deg.to_radians(),
            radius,
        )
    }

    /// Whether the camera currently aims inside this hotspot's window.
    pub fn is_looked_at(&self, cam: &Orientation, window: &AimWindow) -> bool {
        let d_yaw = angle_diff(self.yaw, cam.yaw).abs();
        let d_pitch = (self.pitch - cam.pitch).abs();
        d_yaw < window.yaw && d_pitch < window.pitch
    }

    pub fn goto_target(&self) -> Option<&str> {
        match &self.kind {
            HotspotKind::Goto { target } => Some(target),
            _ => None,
        }
    }
}
