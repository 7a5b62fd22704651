//! Cleanup system: removes dead units, expired projectiles and destroyed structures.

use hecs::Entity;

use blastwave_core::components::{Health, Projectile, Unit};
use blastwave_core::enums::EffectKind;
use blastwave_core::events::EffectEvent;
use blastwave_core::types::Position;

use crate::battlefield::Battlefield;

/// Despawn everything that is finished and emit destruction effects.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(field: &mut Battlefield, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Dead units.
    for (entity, (_unit, health, pos)) in field.world.query_mut::<(&Unit, &Health, &Position)>() {
        if health.is_dead() {
            field
                .effects
                .push(EffectEvent::at(EffectKind::UnitDestroyed, pos.x, pos.y));
            despawn_buffer.push(entity);
        }
    }

    // Expired projectiles.
    for (entity, projectile) in field.world.query_mut::<&Projectile>() {
        if projectile.is_expired() {
            despawn_buffer.push(entity);
        }
    }

    if !despawn_buffer.is_empty() {
        for entity in despawn_buffer.drain(..) {
            let _ = field.world.despawn(entity);
        }
        field.mark_moved();
    }

    for (_origin, center) in field.grid.remove_destroyed() {
        field
            .effects
            .push(EffectEvent::at(EffectKind::BlockDestroyed, center.x, center.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blastwave_core::enums::ProjectileKind;
    use blastwave_core::teams::{Team, TeamRelations};
    use blastwave_grid::{Structure, TileGrid};

    use crate::world_setup::{spawn_projectile, spawn_unit};

    #[test]
    fn test_removes_dead_unit() {
        let mut f = Battlefield::new(TileGrid::new(4, 4), TeamRelations::new());
        let dead = spawn_unit(&mut f, Team::CRUX, Position::new(8.0, 8.0), 5.0);
        let alive = spawn_unit(&mut f, Team::CRUX, Position::new(16.0, 8.0), 5.0);
        f.damage_unit(dead, 10.0);
        let mut buffer = Vec::new();

        run(&mut f, &mut buffer);

        assert!(!f.world.contains(dead));
        assert!(f.world.contains(alive));
        assert_eq!(f.effects, vec![EffectEvent::at(EffectKind::UnitDestroyed, 8.0, 8.0)]);
        assert_eq!(f.units_alive(), 1);
    }

    #[test]
    fn test_removes_expired_projectile() {
        let mut f = Battlefield::new(TileGrid::new(4, 4), TeamRelations::new());
        let e = spawn_projectile(&mut f, ProjectileKind::Laser, None, Position::new(0.0, 0.0), 0.0, 1.0);
        let mut buffer = Vec::new();

        run(&mut f, &mut buffer);
        assert!(f.world.contains(e), "fresh laser survives");

        f.world.get::<&mut Projectile>(e).unwrap().lifetime = 0.0;
        run(&mut f, &mut buffer);
        assert!(!f.world.contains(e));
    }

    #[test]
    fn test_removes_destroyed_structure() {
        let mut f = Battlefield::new(TileGrid::new(8, 8), TeamRelations::new());
        f.grid.place(2, 2, Structure::new(Team::CRUX, 1.0, 2));
        f.grid.structure_at_mut(2, 2).unwrap().damage(5.0);
        let mut buffer = Vec::new();

        run(&mut f, &mut buffer);

        assert_eq!(f.grid.structure_count(), 0);
        assert!(f.grid.tile(3, 3).unwrap().occupant == blastwave_grid::Occupant::Empty);
        assert_eq!(f.effects, vec![EffectEvent::at(EffectKind::BlockDestroyed, 20.0, 20.0)]);
    }
}
