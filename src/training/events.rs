//! Session events — one entry per state transition.
//!
//! `Session::update` returns the events produced during the frame, so a
//! replayed input script can be compared event-for-event.

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Success,
    Failure,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SceneChanged { from: String, to: String },
    /// A scene change named a scene that does not exist.
    SceneChangeRejected { target: String },
    HotspotActivated { hotspot_id: String, kind: &'static str },
    CaseStarted { index: usize },
    StepCorrect { index: usize, step: usize, label: String },
    StepIncorrect { index: usize, expected: String, got: String },
    WrongAction { label: String },
    CaseCompleted { index: usize, bonus: i64 },
    CaseTimedOut { index: usize },
    MessageDismissed,
    SessionEnded { outcome: SessionOutcome, message: String },
    EditorToggled { enabled: bool },
    /// The external authoring dialog should open.
    AuthoringRequested { scene: String },
    HotspotAuthored { scene: String, hotspot_id: String },
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl SessionEvent {
    /// Convert the event to an s-expression.
    pub fn to_sexp(&self) -> String {
        match self {
            Self::SceneChanged { from, to } => {
                format!("(:event :scene-changed :from {} :to {})", quote(from), quote(to))
            }
            Self::SceneChangeRejected { target } => {
                format!("(:event :scene-change-rejected :target {})", quote(target))
            }
            Self::HotspotActivated { hotspot_id, kind } => {
                format!("(:event :hotspot-activated :id {} :kind :{})", quote(hotspot_id), kind)
            }
            Self::CaseStarted { index } => format!("(:event :case-started :case {})", index),
            Self::StepCorrect { index, step, label } => format!(
                "(:event :step-correct :case {} :step {} :label {})",
                index,
                step,
                quote(label)
            ),
            Self::StepIncorrect { index, expected, got } => format!(
                "(:event :step-incorrect :case {} :expected {} :got {})",
                index,
                quote(expected),
                quote(got)
            ),
            Self::WrongAction { label } => {
                format!("(:event :wrong-action :label {})", quote(label))
            }
            Self::CaseCompleted { index, bonus } => {
                format!("(:event :case-completed :case {} :bonus {})", index, bonus)
            }
            Self::CaseTimedOut { index } => format!("(:event :case-timed-out :case {})", index),
            Self::MessageDismissed => "(:event :message-dismissed)".to_string(),
            Self::SessionEnded { outcome, message } => format!(
                "(:event :session-ended :outcome :{} :message {})",
                outcome.as_str(),
                quote(message)
            ),
            Self::EditorToggled { enabled } => format!(
                "(:event :editor-toggled :enabled {})",
                if *enabled { "t" } else { "nil" }
            ),
            Self::AuthoringRequested { scene } => {
                format!("(:event :authoring-requested :scene {})", quote(scene))
            }
            Self::HotspotAuthored { scene, hotspot_id } => format!(
                "(:event :hotspot-authored :scene {} :id {})",
                quote(scene),
                quote(hotspot_id)
            ),
        }
    }
}
