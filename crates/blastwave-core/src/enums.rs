//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Visual effects the frontend knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Core flash at the centre of an explosion.
    BlockExplosion,
    /// Smoke puff left by a shockwave wave.
    BlockExplosionSmoke,
    /// Expanding ring (explosiveness > 15).
    Shockwave,
    /// Large expanding ring (explosiveness > 30).
    BigShockwave,
    /// Impact spark where a laser meets a target.
    LaserHit,
    /// Generic projectile impact.
    Hit,
    /// A structure was destroyed.
    BlockDestroyed,
    /// A unit was destroyed.
    UnitDestroyed,
}

/// Projectile archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Incendiary bullet launched by volatile explosions.
    Fireball,
    /// Instant line shot resolved by the line damage resolver.
    Laser,
}

impl ProjectileKind {
    /// Effect played by the projectile's own on-hit handler.
    pub fn hit_effect(&self) -> EffectKind {
        match self {
            ProjectileKind::Fireball => EffectKind::Hit,
            ProjectileKind::Laser => EffectKind::LaserHit,
        }
    }
}

/// Timed status effects carried by units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    /// Damage over time, applied by fires.
    Burning,
    /// Applied by lightning. No periodic damage.
    Shocked,
}

impl StatusKind {
    /// Damage per tick while the status is active.
    pub fn damage_per_tick(&self) -> f32 {
        match self {
            StatusKind::Burning => crate::constants::BURN_DAMAGE,
            StatusKind::Shocked => 0.0,
        }
    }
}
