//! Scene graph — named panoramas and their ordered hotspots.
//!
//! Core types:
//! - `SceneDef`: declarative backdrop reference + hotspot definitions
//! - `Scene`: one panorama with its constructed hotspots
//! - `World`: the named collection of scenes forming the navigation graph

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::hotspot::{AimWindow, Hotspot, HotspotDef, HotspotKind};
use super::orientation::Orientation;
use crate::error::ContentError;

// ── SceneDef ────────────────────────────────────────────────

/// Declarative scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDef {
    /// Opaque reference to the panoramic image, resolved by the presenter.
    pub backdrop: String,
    #[serde(default)]
    pub hotspots: Vec<HotspotDef>,
}

// ── Scene ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    pub backdrop: String,
    /// Declaration order is the gaze tie-break order.
    pub hotspots: Vec<Hotspot>,
    radius: f64,
}

impl Scene {
    pub fn new(name: &str, backdrop: &str, radius: f64) -> Self {
        Self {
            name: name.to_string(),
            backdrop: backdrop.to_string(),
            hotspots: Vec::new(),
            radius,
        }
    }

    pub fn from_def(name: &str, def: &SceneDef, radius: f64) -> Result<Self, ContentError> {
        let mut scene = Self::new(name, &def.backdrop, radius);
        for (idx, hdef) in def.hotspots.iter().enumerate() {
            scene.add_hotspot_from_def(hdef, &idx.to_string())?;
        }
        Ok(scene)
    }

    /// Append a hotspot. The id is `def.id` or `<scene>_<suffix>`.
    pub fn add_hotspot_from_def(&mut self, def: &HotspotDef, suffix: &str) -> Result<&Hotspot, ContentError> {
        if let HotspotKind::Goto { target } = &def.kind {
            if target.trim().is_empty() {
                return Err(ContentError::MissingGotoTarget {
                    scene: self.name.clone(),
                    label: def.label.clone(),
                });
            }
        }

        let id = def
            .id
            .clone()
            .unwrap_or_else(|| format!("{}_{}", self.name, suffix));
        if self.hotspot(&id).is_some() {
            return Err(ContentError::DuplicateHotspotId {
                scene: self.name.clone(),
                id,
            });
        }

        debug!("scene {}: hotspot {} ({}) '{}'", self.name, id, def.kind.as_str(), def.label);
        self.hotspots.push(Hotspot::from_def(def, id, self.radius));
        let last = self.hotspots.len() - 1;
        Ok(&self.hotspots[last])
    }

    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    /// First hotspot, in declaration order, the camera aims at.
    pub fn candidate(&self, cam: &Orientation, window: &AimWindow) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.is_looked_at(cam, window))
    }

    /// Smallest `<scene>_editor_<n>` id not yet used in this scene.
    /// Ids are unique across the world, not just within the scene.
    pub fn next_editor_id(&self) -> String {
        (0..)
            .map(|n| format!("{}_editor_{}", self.name, n))
            .find(|id| self.hotspot(id).is_none())
            .unwrap_or_default()
    }
}

// ── World ───────────────────────────────────────────────────

/// The named scene graph.
#[derive(Debug, Clone, Default)]
pub struct World {
    scenes: BTreeMap<String, Scene>,
}

impl World {
    pub fn from_def(defs: &BTreeMap<String, SceneDef>, radius: f64) -> Result<Self, ContentError> {
        if defs.is_empty() {
            return Err(ContentError::EmptyWorld);
        }
        let mut scenes = BTreeMap::new();
        for (name, def) in defs {
            scenes.insert(name.clone(), Scene::from_def(name, def, radius)?);
        }
        let world = Self { scenes };
        world.warn_dangling_targets();
        info!("world: {} scenes loaded", world.scenes.len());
        Ok(world)
    }

    fn warn_dangling_targets(&self) {
        for scene in self.scenes.values() {
            for h in &scene.hotspots {
                if let Some(target) = h.goto_target() {
                    if !self.contains(target) {
                        warn!("scene {}: hotspot {} targets unknown scene '{}'", scene.name, h.id, target);
                    }
                }
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    /// Scenes reachable in one GOTO from `name`, in hotspot order.
    pub fn neighbours(&self, name: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.get(name)
            .map(|scene| {
                scene
                    .hotspots
                    .iter()
                    .filter_map(Hotspot::goto_target)
                    .filter(|t| self.contains(t) && seen.insert(*t))
                    .collect()
            })
            .unwrap_or_default()
    }
}
