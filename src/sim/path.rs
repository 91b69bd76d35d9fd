//! Spiral path geometry
//!
//! Tokens never store coordinates, only a normalized progress value in [0,1).
//! The path maps that progress to a point on a 3-loop spiral that tightens
//! toward the hazard at the center. The sampling is a pure function of the
//! surface size, so the path can be rebuilt on resize while every stored
//! token position stays valid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Precomputed spiral path samples
///
/// Index 0 is the spawn end (outermost), index `PATH_SAMPLES` is the hazard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Vec2>,
    width: f32,
    height: f32,
}

impl Path {
    /// Sample the spiral for a playing surface of the given size
    pub fn build(width: f32, height: f32) -> Self {
        let center = Vec2::new(width / 2.0, height / 2.0);
        let max_radius = width.min(height) * PATH_RADIUS_FACTOR;

        let mut points = Vec::with_capacity(PATH_SAMPLES + 1);
        for i in 0..=PATH_SAMPLES {
            let t = i as f32 / PATH_SAMPLES as f32;
            let angle = t * std::f32::consts::TAU * PATH_LOOPS;
            let radius = max_radius * (1.0 - t * PATH_SHRINK);
            points.push(center + crate::direction(angle) * radius);
        }

        Self {
            points,
            width,
            height,
        }
    }

    /// Map a normalized position in [0,1) to its path sample
    #[inline]
    pub fn point_at(&self, pos: f32) -> Vec2 {
        let idx = (pos.clamp(0.0, 1.0) * (PATH_SAMPLES - 1) as f32) as usize;
        self.points[idx]
    }

    /// The hazard end of the path
    #[inline]
    pub fn hazard(&self) -> Vec2 {
        self.points[PATH_SAMPLES]
    }

    /// The center of the surface the path was built for (shooter position)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Surface size the path was built for
    #[inline]
    pub fn surface(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// All samples, spawn end first (for rendering)
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}
