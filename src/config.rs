//! Session tuning constants.
//!
//! Every number the interaction core depends on lives here so tests and
//! the CLI can override individual values without touching the engine.

use std::time::Duration;

// ── SessionConfig ──────────────────────────────────────────

/// Tunable constants for gaze targeting, scoring, and pacing.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Continuous dwell required to activate a hotspot (ms).
    pub gaze_ms: u64,
    /// Radius of the panoramic sphere.
    pub scene_radius: f64,
    /// Fraction of the sphere radius at which hotspots sit.
    pub hotspot_dist_factor: f64,
    /// Horizontal half-width of the detection window (degrees).
    pub yaw_threshold_deg: f64,
    /// Vertical half-height of the detection window (degrees).
    pub pitch_threshold_deg: f64,
    /// Radians of rotation per pointer pixel while dragging.
    pub drag_sensitivity: f64,
    /// Points awarded for the expected step.
    pub correct_step_points: i64,
    /// Points deducted for an out-of-order step.
    pub incorrect_step_points: i64,
    /// Points deducted for a wrong-action hotspot.
    pub wrong_action_points: i64,
    /// Points deducted when a case runs out of time.
    pub timeout_penalty_points: i64,
    /// Points per remaining second on case completion.
    pub time_bonus_multiplier: i64,
    /// Penalty count that ends the session.
    pub max_penalties: u32,
    /// How long transient messages stay on screen (ms).
    pub message_ms: u64,
    /// Scene shown when the session starts.
    pub initial_scene: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gaze_ms: 2000,
            scene_radius: 1000.0,
            hotspot_dist_factor: 0.95,
            yaw_threshold_deg: 7.0,
            pitch_threshold_deg: 7.0,
            drag_sensitivity: 0.01,
            correct_step_points: 20,
            incorrect_step_points: 15,
            wrong_action_points: 20,
            timeout_penalty_points: 30,
            time_bonus_multiplier: 2,
            max_penalties: 3,
            message_ms: 3000,
            initial_scene: "reception".to_string(),
        }
    }
}

impl SessionConfig {
    /// Distance from the viewer at which hotspots are placed.
    pub fn hotspot_radius(&self) -> f64 {
        self.scene_radius * self.hotspot_dist_factor
    }

    pub fn gaze_duration(&self) -> Duration {
        Duration::from_millis(self.gaze_ms)
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_ms)
    }

    /// Generate s-expression describing the active configuration.
    pub fn status_sexp(&self) -> String {
        format!(
            "(:gaze-ms {} :radius {:.1} :yaw-threshold {:.1} :pitch-threshold {:.1} :max-penalties {} :message-ms {} :initial-scene \"{}\")",
            self.gaze_ms,
            self.hotspot_radius(),
            self.yaw_threshold_deg,
            self.pitch_threshold_deg,
            self.max_penalties,
            self.message_ms,
            self.initial_scene,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hotspot_radius() {
        let config = SessionConfig::default();
        assert!((config.hotspot_radius() - 950.0).abs() < 1e-9);
    }

    #[test]
    fn test_durations() {
        let config = SessionConfig::default();
        assert_eq!(config.gaze_duration(), Duration::from_secs(2));
        assert_eq!(config.message_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_status_sexp() {
        let sexp = SessionConfig::default().status_sexp();
        assert!(sexp.contains(":gaze-ms 2000"));
        assert!(sexp.contains(":radius 950.0"));
        assert!(sexp.contains(":max-penalties 3"));
        assert!(sexp.contains(":initial-scene \"reception\""));
    }
}
