//! Small f64 math helpers shared by the panorama modules.
//!
//! Hotspot positions must be bit-reproducible for a given (yaw, pitch,
//! radius) triple, so everything here stays in f64 and avoids any
//! fused or approximate operations.

use std::f64::consts::{PI, TAU};

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Shortest signed difference `a - b`, wrapped into [-π, π].
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let mut d = (a - b) % TAU;
    if d > PI {
        d -= TAU;
    } else if d < -PI {
        d += TAU;
    }
    d
}
