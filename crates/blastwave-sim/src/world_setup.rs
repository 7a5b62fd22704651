//! Entity spawn factories for populating the battlefield.
//!
//! Creates units and projectiles with the component bundles the damage
//! systems expect.

use glam::Vec2;
use hecs::Entity;

use blastwave_core::components::*;
use blastwave_core::constants::*;
use blastwave_core::enums::ProjectileKind;
use blastwave_core::teams::Team;
use blastwave_core::types::{Position, Velocity};

use crate::battlefield::Battlefield;

/// Spawn a unit with the default square hitbox.
pub fn spawn_unit(field: &mut Battlefield, team: Team, position: Position, health: f32) -> Entity {
    spawn_unit_with_hitbox(field, team, position, Hitbox::new(UNIT_SIZE, UNIT_SIZE), health)
}

/// Spawn a stationary unit with an explicit hitbox.
pub fn spawn_unit_with_hitbox(
    field: &mut Battlefield,
    team: Team,
    position: Position,
    hitbox: Hitbox,
    health: f32,
) -> Entity {
    let entity = field.world.spawn((
        Unit,
        team,
        position,
        Velocity::default(),
        hitbox,
        Health::new(health),
    ));
    field.mark_moved();
    entity
}

/// Spawn a projectile heading along `angle` (radians).
pub fn spawn_projectile(
    field: &mut Battlefield,
    kind: ProjectileKind,
    team: Option<Team>,
    position: Position,
    angle: f32,
    damage: f32,
) -> Entity {
    let (speed, lifetime, collides_tiles) = projectile_params(kind);
    let velocity = Vec2::from_angle(angle) * speed;

    field.world.spawn((
        Projectile {
            kind,
            team,
            damage,
            lifetime,
            collides_tiles,
            hits: 0,
        },
        position,
        Velocity::new(velocity.x, velocity.y),
    ))
}

/// (speed, lifetime, collides with tiles) per projectile kind.
fn projectile_params(kind: ProjectileKind) -> (f32, f32, bool) {
    match kind {
        ProjectileKind::Fireball => (FIREBALL_SPEED, FIREBALL_LIFETIME, false),
        ProjectileKind::Laser => (0.0, LASER_LIFETIME, true),
    }
}
