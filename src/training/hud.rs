//! Read-only frame projection handed to the presenter.
//!
//! The core never lays out pixels. It supplies text, a dwell progress
//! fraction, and semantic tones; the presenter decides what they look
//! like.

use crate::vr::orientation::Orientation;

pub const RELOAD_HINT: &str = "Reload to play again.";
pub const EDITOR_HINT: &str = "EDITOR MODE (C to create, E to exit)";

/// Semantic color category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Current,
    Pending,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

impl StepStatus {
    pub fn tone(&self) -> Tone {
        match self {
            Self::Completed => Tone::Success,
            Self::Current => Tone::Current,
            Self::Pending => Tone::Pending,
        }
    }

    /// Status of step `index` given `progress` completed steps.
    pub fn for_step(index: usize, progress: usize) -> Self {
        match index.cmp(&progress) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepLine {
    /// 1-based.
    pub number: usize,
    pub label: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CasePanel {
    /// 1-based case number.
    pub number: usize,
    pub description: String,
    /// Never negative.
    pub remaining_secs: u64,
    pub requires_doctor: bool,
    pub steps: Vec<StepLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudPanel {
    pub scene: String,
    pub score: i64,
    pub penalties: u32,
    pub max_penalties: u32,
    pub case: Option<CasePanel>,
}

impl HudPanel {
    /// Plain-text rendition, one line per HUD row.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Scene: {}", self.scene),
            format!("Score: {}", self.score),
            format!("Penalties: {}/{}", self.penalties, self.max_penalties),
        ];
        match &self.case {
            Some(case) => {
                lines.push(format!("Current case: {}", case.number));
                lines.push(format!("Time: {}s", case.remaining_secs));
                lines.push(format!("Procedure: {}", case.description));
                if case.requires_doctor {
                    lines.push("Requires doctor referral".to_string());
                }
                for step in &case.steps {
                    lines.push(format!("{}. {}", step.number, step.label));
                }
            }
            None => lines.push("No active case".to_string()),
        }
        lines
    }
}

/// Dwell cursor state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GazeIndicator {
    /// Fraction in [0, 1].
    pub progress: f64,
    /// Label of the hotspot being acquired.
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Transient,
    Final,
}

/// Full-screen message.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub text: String,
    pub tone: Tone,
    pub hint: Option<&'static str>,
}

/// Everything the presenter needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub scene: String,
    pub backdrop: String,
    pub orientation: Orientation,
    pub gaze: GazeIndicator,
    pub hud: HudPanel,
    pub overlays: Vec<Overlay>,
    pub editor_hint: Option<&'static str>,
}
