//! Declarative content errors.
//!
//! Raised while building the world graph and case book. Runtime lookups
//! (e.g. a GOTO to a scene that does not exist) are logged and ignored
//! instead of surfacing here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse world document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("world defines no scenes")]
    EmptyWorld,

    #[error("world defines no cases")]
    NoCases,

    #[error("scene '{scene}' declares hotspot id '{id}' more than once")]
    DuplicateHotspotId { scene: String, id: String },

    #[error("goto hotspot '{label}' in scene '{scene}' has an empty target")]
    MissingGotoTarget { scene: String, label: String },

    #[error("case {index} ('{description}') has no steps")]
    EmptyCaseSteps { index: usize, description: String },

    #[error("case {index} ('{description}') has a zero time limit")]
    ZeroTimeLimit { index: usize, description: String },

    #[error("case {index} starts in unknown scene '{scene}'")]
    UnknownStartScene { index: usize, scene: String },

    #[error("initial scene '{0}' is not defined")]
    UnknownInitialScene(String),
}
