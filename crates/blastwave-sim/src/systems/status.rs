//! Status effect system: damage over time and expiry.

use hecs::Entity;

use blastwave_core::components::{Health, StatusEffect};

use crate::battlefield::Battlefield;

/// Tick every status effect by `delta`. Expired effects are removed.
pub fn run(field: &mut Battlefield, delta: f32, expired: &mut Vec<Entity>) {
    expired.clear();

    for (entity, (status, health)) in field
        .world
        .query_mut::<(&mut StatusEffect, &mut Health)>()
    {
        let damage = status.kind.damage_per_tick() * delta;
        if damage > 0.0 {
            health.damage(damage);
        }
        status.remaining -= delta;
        if status.remaining <= 0.0 {
            expired.push(entity);
        }
    }

    for entity in expired.drain(..) {
        let _ = field.world.remove_one::<StatusEffect>(entity);
    }
}
