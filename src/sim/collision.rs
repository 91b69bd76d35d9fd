//! Projectile integration and hit detection
//!
//! Projectiles fly in straight lines from the center; a hit is the first
//! token (hazard-proximal first) whose path-mapped point is within
//! `HIT_RADIUS` of the projectile. First match wins: one collision consumes
//! the projectile no matter how the resolution turns out.

use glam::Vec2;

use super::path::Path;
use super::state::{Projectile, Token};
use crate::consts::*;

impl Projectile {
    /// Spawn a shot at the muzzle, heading along `angle`
    pub fn fire(center: Vec2, angle: f32, value: u32) -> Self {
        let dir = crate::direction(angle);
        Self {
            pos: center + dir * MUZZLE_OFFSET,
            vel: dir * PROJECTILE_SPEED,
            value,
        }
    }

    /// Integrate position; velocity is fixed for the projectile's lifetime
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Still inside the playing surface?
    #[inline]
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x >= 0.0 && self.pos.x <= width && self.pos.y >= 0.0 && self.pos.y <= height
    }
}

/// Find the queue index of the first token this projectile overlaps
///
/// Iterates in queue order so a shot threading between coils resolves
/// against the token closest to the hazard. Tokens that have not yet
/// entered the path (`pos < 0`) are not live and are skipped.
pub fn detect_hit(projectile: &Projectile, tokens: &[Token], path: &Path) -> Option<usize> {
    for (i, token) in tokens.iter().enumerate() {
        if token.pos < 0.0 {
            continue;
        }
        let point = path.point_at(token.pos);
        if (projectile.pos - point).length() < HIT_RADIUS {
            return Some(i);
        }
    }
    None
}
