//! Enemy projectiles
//!
//! Straight-line horizontal movers. They ignore level geometry and only
//! matter to the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{PROJECTILE_SIZE, WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Fireball,
    Sword,
}

impl ProjectileKind {
    /// Image name for the renderer
    pub fn sprite(self) -> &'static str {
        match self {
            ProjectileKind::Fireball => "fireball",
            ProjectileKind::Sword => "sword",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Center position
    pub pos: Vec2,
    /// Horizontal speed, units per frame
    pub vel_x: f32,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, pos: Vec2, vel_x: f32) -> Self {
        Self { kind, pos, vel_x }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, PROJECTILE_SIZE, PROJECTILE_SIZE)
    }

    /// Still within the horizontal screen bounds
    #[inline]
    pub fn on_screen(&self) -> bool {
        (0.0..=WIDTH).contains(&self.pos.x)
    }
}

/// Move every projectile one frame and drop those that left the screen
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>) {
    for p in projectiles.iter_mut() {
        p.pos.x += p.vel_x;
    }
    projectiles.retain(Projectile::on_screen);
}
