//! Declarative world content.
//!
//! Scenes and cases are authored as a TOML document. The built-in world
//! ships inside the binary; `--world` can point the CLI at another file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::vr::scene::SceneDef;

/// The built-in training world.
pub const BUILTIN_WORLD: &str = include_str!("../../assets/world.toml");

/// Step labels used by the built-in cases.
pub mod actions {
    pub const WASH_HANDS: &str = "Wash hands";
    pub const DRY_HANDS: &str = "Dry hands";
    pub const GLOVES: &str = "Put on gloves";
    pub const HISTORY: &str = "Take patient history";
    pub const ANALGESIC: &str = "Give analgesic";
    pub const DRESSING: &str = "Apply dressing";
    pub const COMPRESSION: &str = "Apply compression";
    pub const TEMPERATURE: &str = "Measure temperature";
    pub const WEIGHT: &str = "Measure weight";
    pub const BLOOD_PRESSURE: &str = "Measure blood pressure";
    pub const REFER_DOCTOR: &str = "Refer to doctor urgently";
    pub const REFER_CONSULT: &str = "Refer for consultation";
}

/// Declarative case description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDef {
    pub description: String,
    /// Ordered action labels.
    pub steps: Vec<String>,
    pub time_limit_secs: u32,
    #[serde(default)]
    pub requires_doctor: bool,
    pub start_scene: String,
}

/// A complete world document: named scenes plus the ordered case list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDef {
    pub scenes: BTreeMap<String, SceneDef>,
    #[serde(default)]
    pub cases: Vec<CaseDef>,
}

impl WorldDef {
    pub fn from_toml(text: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(text)?)
    }

    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml(BUILTIN_WORLD)
    }
}
