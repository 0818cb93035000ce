//! Panorama interaction core — camera orientation, hotspot geometry,
//! scene graph, and dwell-based gaze activation.

pub mod gaze;
pub mod hotspot;
pub mod math;
pub mod orientation;
pub mod scene;
