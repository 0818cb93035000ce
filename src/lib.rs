//! Gazeward — gaze-driven 360° clinical training engine.
//!
//! The library holds the interaction and session-state core: camera
//! orientation, spherical hotspot targeting, dwell activation, and the
//! clinical case state machine. Rendering and asset loading are supplied
//! by a `backend::Presenter`. The binary entry point lives in `main.rs`.

pub mod autopilot;
pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod input_source;
pub mod training;
pub mod vr;
