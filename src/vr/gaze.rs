//! Dwell-based gaze activation.
//!
//! Each frame the session hands the detector the first hotspot the
//! camera aims at. Holding the aim for the dwell threshold fires one
//! activation. The hotspot that fired last stays suppressed until the
//! gaze leaves it, so an aim held past activation cannot loop.

use std::time::{Duration, Instant};

use tracing::debug;

use super::hotspot::Hotspot;

// ── Dwell config ────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DwellConfig {
    /// Continuous aim required to activate.
    pub threshold: Duration,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            threshold: Duration::from_millis(2000),
        }
    }
}

// ── Gaze phase ──────────────────────────────────────────────

/// Per-candidate dwell state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GazePhase {
    /// No tracked target.
    Idle,
    /// Aim held on a hotspot; dwell running since `started`.
    Acquiring { hotspot_id: String, started: Instant },
    /// Aim held on the hotspot that fired last; no dwell until it is left.
    Suppressed { hotspot_id: String },
}

impl GazePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Acquiring { .. } => "acquiring",
            Self::Suppressed { .. } => "suppressed",
        }
    }

    pub fn hotspot_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Acquiring { hotspot_id, .. } | Self::Suppressed { hotspot_id } => Some(hotspot_id),
        }
    }
}

/// Outcome of one detector frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GazeUpdate {
    /// Hotspot currently aimed at.
    pub candidate: Option<String>,
    /// Dwell progress in [0, 1].
    pub progress: f64,
    /// Hotspot that fired this frame.
    pub activated: Option<String>,
}

// ── Detector ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GazeDetector {
    pub config: DwellConfig,
    pub phase: GazePhase,
    /// Hotspot that fired most recently, while it is still being aimed at.
    pub last_activated: Option<String>,
}

impl GazeDetector {
    pub fn new(config: DwellConfig) -> Self {
        Self {
            config,
            phase: GazePhase::Idle,
            last_activated: None,
        }
    }

    /// Advance the dwell state for this frame's candidate.
    pub fn update(&mut self, candidate: Option<&Hotspot>, now: Instant) -> GazeUpdate {
        let Some(hotspot) = candidate else {
            if let Some(id) = self.phase.hotspot_id() {
                debug!("gaze: left {}", id);
            }
            self.phase = GazePhase::Idle;
            self.last_activated = None;
            return GazeUpdate::default();
        };

        if self.phase.hotspot_id() != Some(hotspot.id.as_str()) {
            if self.last_activated.as_deref() == Some(hotspot.id.as_str()) {
                self.phase = GazePhase::Suppressed {
                    hotspot_id: hotspot.id.clone(),
                };
            } else {
                debug!("gaze: acquiring {} '{}'", hotspot.id, hotspot.label);
                self.last_activated = None;
                self.phase = GazePhase::Acquiring {
                    hotspot_id: hotspot.id.clone(),
                    started: now,
                };
            }
        }

        let mut update = GazeUpdate {
            candidate: Some(hotspot.id.clone()),
            progress: self.progress(now),
            activated: None,
        };

        if let GazePhase::Acquiring { started, .. } = self.phase {
            if now.saturating_duration_since(started) >= self.config.threshold {
                debug!("gaze: activated {} '{}'", hotspot.id, hotspot.label);
                update.activated = Some(hotspot.id.clone());
                self.last_activated = Some(hotspot.id.clone());
                self.phase = GazePhase::Idle;
            }
        }
        update
    }

    /// Dwell progress in [0, 1] at `now`; zero unless acquiring.
    pub fn progress(&self, now: Instant) -> f64 {
        match &self.phase {
            GazePhase::Acquiring { started, .. } => {
                if self.config.threshold.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(*started).as_secs_f64();
                (elapsed / self.config.threshold.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Drop any running dwell while detection is inhibited.
    ///
    /// The last activated id survives so that an aim held through a
    /// message screen stays suppressed afterwards.
    pub fn suspend(&mut self) {
        self.phase = GazePhase::Idle;
    }

    /// Generate s-expression for status reporting.
    pub fn status_sexp(&self, now: Instant) -> String {
        format!(
            "(:phase :{} :target {} :last-activated {} :progress {:.2} :threshold-ms {})",
            self.phase.as_str(),
            self.phase
                .hotspot_id()
                .map(|id| format!("\"{}\"", id))
                .unwrap_or_else(|| "nil".to_string()),
            self.last_activated
                .as_ref()
                .map(|id| format!("\"{}\"", id))
                .unwrap_or_else(|| "nil".to_string()),
            self.progress(now),
            self.config.threshold.as_millis(),
        )
    }
}
