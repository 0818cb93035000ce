//! Camera orientation model driven by pointer drags.
//!
//! Yaw is unbounded and wraps implicitly; pitch is clamped to
//! [-π/2, π/2]. Horizontal drags add to yaw, vertical drags subtract
//! from pitch so dragging up looks up.

use std::f64::consts::FRAC_PI_2;

use tracing::trace;

use super::math::Vec3;

// ── Orientation ─────────────────────────────────────────────

/// Two-axis camera orientation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    /// Create an orientation, clamping pitch to the visible range.
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
        }
    }

    pub fn from_degrees(yaw_deg: f64, pitch_deg: f64) -> Self {
        Self::new(yaw_deg.to_radians(), pitch_deg.to_radians())
    }

    /// Map a world-space point into view space.
    ///
    /// The world rotates opposite to the camera: first about Y by -yaw,
    /// then about X by -pitch. A point the camera aims at ends up on -Z.
    pub fn to_view_space(&self, p: Vec3) -> Vec3 {
        let (sy, cy) = (-self.yaw).sin_cos();
        let x = p.x * cy + p.z * sy;
        let z = -p.x * sy + p.z * cy;

        let (sp, cp) = (-self.pitch).sin_cos();
        Vec3::new(x, p.y * cp - z * sp, p.y * sp + z * cp)
    }
}

// ── OrientationModel ────────────────────────────────────────

/// Drag-gesture state wrapped around the session's single orientation.
#[derive(Debug, Clone)]
pub struct OrientationModel {
    pub orientation: Orientation,
    /// Radians per pointer pixel.
    pub sensitivity: f64,
    dragging: bool,
    last_x: f64,
    last_y: f64,
}

impl OrientationModel {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            orientation: Orientation::default(),
            sensitivity,
            dragging: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start a drag at the given pointer position.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.last_x = x;
        self.last_y = y;
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Apply the pointer delta since the last sample while dragging.
    pub fn update(&mut self, x: f64, y: f64) {
        if !self.dragging {
            return;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;

        let yaw = self.orientation.yaw + dx * self.sensitivity;
        let pitch = self.orientation.pitch - dy * self.sensitivity;
        self.orientation = Orientation::new(yaw, pitch);

        self.last_x = x;
        self.last_y = y;
        trace!(
            "orientation: yaw={:.3} pitch={:.3}",
            self.orientation.yaw,
            self.orientation.pitch
        );
    }
}
