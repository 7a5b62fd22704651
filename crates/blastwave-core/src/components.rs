//! ECS components for hecs entities.
//!
//! Components are plain data structs.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::teams::Team;
use crate::types::{Position, Rect};

/// Marks an entity as a mobile unit (damageable, knocked back by blasts).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit;

/// Hit points. A unit at or below zero is dead and ignores further damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract `amount`. Returns false when already dead.
    pub fn damage(&mut self, amount: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.current -= amount;
        true
    }
}

/// Axis-aligned hitbox size, centred on the entity's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// World-space rectangle at `pos`.
    pub fn rect_at(&self, pos: &Position) -> Rect {
        Rect::centered(pos.x, pos.y, self.width, self.height)
    }
}

/// A live projectile. Also the instigator of line damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub team: Option<Team>,
    /// Damage dealt to anything it collides with.
    pub damage: f32,
    /// Remaining lifetime in ticks.
    pub lifetime: f32,
    /// Whether it can collide with structures.
    pub collides_tiles: bool,
    /// Number of collisions registered so far.
    pub hits: u32,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// Timed status effect. A newer status replaces the current one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Remaining duration in ticks.
    pub remaining: f32,
}
