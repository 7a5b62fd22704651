//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * delta.
//! Units bleed off knockback through drag.

use blastwave_core::components::Unit;
use blastwave_core::constants::UNIT_DRAG;
use blastwave_core::types::{Position, Velocity};

use crate::battlefield::Battlefield;

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(field: &mut Battlefield, delta: f32) {
    let mut moved = false;
    for (_entity, (pos, vel)) in field.world.query_mut::<(&mut Position, &Velocity)>() {
        if vel.x != 0.0 || vel.y != 0.0 {
            pos.x += vel.x * delta;
            pos.y += vel.y * delta;
            moved = true;
        }
    }

    let keep = (1.0 - UNIT_DRAG * delta).clamp(0.0, 1.0);
    for (_entity, (_unit, vel)) in field.world.query_mut::<(&Unit, &mut Velocity)>() {
        vel.x *= keep;
        vel.y *= keep;
    }

    if moved {
        field.mark_moved();
    }
}
