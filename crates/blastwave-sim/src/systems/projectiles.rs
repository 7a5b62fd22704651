//! Projectile system: ages projectiles and lets fire bullets set tiles alight.

use rand::Rng;

use blastwave_core::components::Projectile;
use blastwave_core::constants::{FIREBALL_DRAG, FIREBALL_IGNITE_CHANCE};
use blastwave_core::enums::ProjectileKind;
use blastwave_core::types::{Position, Velocity};

use crate::battlefield::Battlefield;

/// Advance every projectile by `delta` ticks.
///
/// Fire bullets lose speed to drag, occasionally ignite the tile beneath them
/// and always ignite the tile they burn out over. Expired projectiles are left
/// for cleanup.
pub fn run(field: &mut Battlefield, rng: &mut impl Rng, delta: f32) {
    let mut ignitions = Vec::new();

    for (_entity, (projectile, pos, vel)) in
        field
            .world
            .query_mut::<(&mut Projectile, &Position, &mut Velocity)>()
    {
        if projectile.is_expired() {
            continue;
        }
        projectile.lifetime -= delta;

        if projectile.kind != ProjectileKind::Fireball {
            continue;
        }
        let keep = (1.0 - FIREBALL_DRAG * delta).max(0.0);
        vel.x *= keep;
        vel.y *= keep;

        if projectile.is_expired() || rng.gen_bool(FIREBALL_IGNITE_CHANCE) {
            ignitions.push((pos.x, pos.y));
        }
    }

    for (x, y) in ignitions {
        field.grid.ignite_world(x, y);
    }
}
