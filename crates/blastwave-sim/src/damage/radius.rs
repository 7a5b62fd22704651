//! Radius damage: falloff damage and knockback to units in a circle, plus a
//! separate pass over the tile footprint for structures.

use glam::Vec2;
use hecs::Entity;
use tracing::trace;

use blastwave_core::constants::{KNOCKBACK_SCALE, TILE_SIZE};
use blastwave_core::teams::Team;
use blastwave_core::types::{Rect, Velocity};
use blastwave_grid::TileGrid;

use crate::battlefield::Battlefield;
use crate::damage::falloff::calculate_damage;
use crate::error::{ensure_finite, ensure_non_negative, SimResult};

/// A unit damaged by a radius blast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitHit {
    pub entity: Entity,
    pub damage: f32,
}

/// A structure damaged by a radius blast, keyed by its origin cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileHit {
    pub cell: (i32, i32),
    pub damage: f32,
}

/// What a radius blast touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadiusDamageReport {
    pub units: Vec<UnitHit>,
    pub tiles: Vec<TileHit>,
}

/// Damage everything in a radius, regardless of team.
pub fn damage_everything(
    field: &mut Battlefield,
    x: f32,
    y: f32,
    radius: f32,
    damage: f32,
) -> SimResult<RadiusDamageReport> {
    apply_radius_damage(field, None, x, y, radius, damage)
}

/// Damage all units and structures within `radius` of `(x, y)` that are
/// hostile to `team` (everything when `team` is None).
pub fn apply_radius_damage(
    field: &mut Battlefield,
    team: Option<Team>,
    x: f32,
    y: f32,
    radius: f32,
    damage: f32,
) -> SimResult<RadiusDamageReport> {
    ensure_finite("x", x)?;
    ensure_finite("y", y)?;
    ensure_non_negative("radius", radius)?;
    ensure_non_negative("damage", damage)?;

    let report = RadiusDamageReport {
        units: damage_units(field, team, x, y, radius, damage),
        tiles: damage_tiles(field, team, x, y, radius, damage),
    };
    trace!(
        x,
        y,
        radius,
        units = report.units.len(),
        tiles = report.tiles.len(),
        "radius damage applied"
    );
    Ok(report)
}

fn damage_units(
    field: &mut Battlefield,
    team: Option<Team>,
    x: f32,
    y: f32,
    radius: f32,
    damage: f32,
) -> Vec<UnitHit> {
    let rect = Rect::spanning(x - radius, y - radius, x + radius, y + radius);
    let origin = Vec2::new(x, y);
    let mut hits = Vec::new();

    for entity in field.targets_in(team, &rect) {
        let Some(unit) = field.unit_view(entity) else {
            continue;
        };
        let dst = unit.position.distance_to(x, y);
        if Some(unit.team) == team || dst > radius {
            continue;
        }

        let amount = calculate_damage(x, y, unit.position.x, unit.position.y, radius, damage);
        if !field.damage_unit(entity, amount) {
            continue;
        }
        hits.push(UnitHit {
            entity,
            damage: amount,
        });

        if dst > 0.0 && radius > 0.0 {
            let away = (unit.position.as_vec2() - origin) / dst;
            let impulse = away * (1.0 - dst / radius) * KNOCKBACK_SCALE;
            if let Ok(mut velocity) = field.world.get::<&mut Velocity>(entity) {
                velocity.add(impulse);
            }
        }
    }
    hits
}

fn damage_tiles(
    field: &mut Battlefield,
    team: Option<Team>,
    x: f32,
    y: f32,
    radius: f32,
    damage: f32,
) -> Vec<TileHit> {
    let cell_radius = (radius / TILE_SIZE).floor().min(i32::MAX as f32) as i64;
    let (ox, oy) = TileGrid::world_to_cell(x, y);
    let (ox, oy) = (ox as i64, oy as i64);
    let mut hits = Vec::new();

    // Only cells inside the grid can hold structures.
    let (width, height) = (field.grid.width() as i64, field.grid.height() as i64);
    let (x_lo, x_hi) = ((ox - cell_radius).max(0), (ox + cell_radius).min(width - 1));
    let (y_lo, y_hi) = ((oy - cell_radius).max(0), (oy + cell_radius).min(height - 1));

    for cy in y_lo..=y_hi {
        for cx in x_lo..=x_hi {
            let (dx, dy) = ((cx - ox) as f64, (cy - oy) as f64);
            if dx.hypot(dy) > cell_radius as f64 {
                continue;
            }
            let (cx, cy) = (cx as i32, cy as i32);
            let Some(center) = field.grid.structure_center(cx, cy) else {
                continue;
            };
            let Some(structure) = field.grid.structure_at_mut(cx, cy) else {
                continue;
            };
            if !field.teams.is_target(team, structure.team) {
                continue;
            }

            let amount = calculate_damage(x, y, center.x, center.y, radius, damage);
            if structure.damage(amount) {
                hits.push(TileHit {
                    cell: (cx, cy),
                    damage: amount,
                });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use blastwave_core::components::{Health, Unit};
    use blastwave_core::teams::TeamRelations;
    use blastwave_core::types::Position;
    use blastwave_grid::Structure;

    use crate::world_setup::spawn_unit;

    fn field() -> Battlefield {
        Battlefield::new(TileGrid::new(32, 32), TeamRelations::new())
    }

    fn health(field: &Battlefield, e: Entity) -> f32 {
        field.world.get::<&Health>(e).unwrap().current
    }

    fn velocity(field: &Battlefield, e: Entity) -> Velocity {
        *field.world.get::<&Velocity>(e).unwrap()
    }

    #[test]
    fn test_hostile_at_half_radius_takes_seventy_percent() {
        let mut f = field();
        let e = spawn_unit(&mut f, Team::CRUX, Position::new(5.0, 0.0), 1000.0);
        let report = apply_radius_damage(&mut f, Some(Team::SHARDED), 0.0, 0.0, 10.0, 100.0).unwrap();

        assert_eq!(report.units.len(), 1);
        assert!((report.units[0].damage - 70.0).abs() < 1e-3);
        assert!((health(&f, e) - 930.0).abs() < 1e-3);
    }

    #[test]
    fn test_knockback_points_away_and_scales_with_proximity() {
        let mut f = field();
        let e = spawn_unit(&mut f, Team::CRUX, Position::new(0.0, 5.0), 1000.0);
        apply_radius_damage(&mut f, None, 0.0, 0.0, 10.0, 1.0).unwrap();

        let v = velocity(&f, e);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-5, "(1 - 5/10) * 2 = 1, got {}", v.y);
    }

    #[test]
    fn test_unit_at_origin_full_damage_no_knockback() {
        let mut f = field();
        let e = spawn_unit(&mut f, Team::CRUX, Position::new(0.0, 0.0), 1000.0);
        apply_radius_damage(&mut f, None, 0.0, 0.0, 10.0, 100.0).unwrap();

        assert!((health(&f, e) - 900.0).abs() < 1e-3);
        let v = velocity(&f, e);
        assert!(v.x.is_finite() && v.y.is_finite());
        assert_eq!(v.speed(), 0.0);
    }

    #[test]
    fn test_out_of_radius_untouched() {
        let mut f = field();
        // Hitbox overlaps the query square corner but the centre is outside the circle.
        let e = spawn_unit(&mut f, Team::CRUX, Position::new(8.0, 8.0), 1000.0);
        let report = apply_radius_damage(&mut f, None, 0.0, 0.0, 10.0, 100.0).unwrap();

        assert!(report.units.is_empty());
        assert_eq!(health(&f, e), 1000.0);
        assert_eq!(velocity(&f, e).speed(), 0.0);
    }

    #[test]
    fn test_same_team_untouched() {
        let mut f = field();
        let friend = spawn_unit(&mut f, Team::SHARDED, Position::new(1.0, 0.0), 100.0);
        let enemy = spawn_unit(&mut f, Team::CRUX, Position::new(-1.0, 0.0), 100.0);
        apply_radius_damage(&mut f, Some(Team::SHARDED), 0.0, 0.0, 10.0, 10.0).unwrap();

        assert_eq!(health(&f, friend), 100.0);
        assert!(health(&f, enemy) < 100.0);
    }

    #[test]
    fn test_allied_team_untouched() {
        let mut f = Battlefield::new(
            TileGrid::new(8, 8),
            TeamRelations::with_alliances([(Team::SHARDED, Team::CRUX)]),
        );
        let ally = spawn_unit(&mut f, Team::CRUX, Position::new(1.0, 0.0), 100.0);
        apply_radius_damage(&mut f, Some(Team::SHARDED), 0.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(health(&f, ally), 100.0);
    }

    #[test]
    fn test_tile_pass_respects_cell_radius() {
        let mut f = field();
        // Origin cell (10, 10); radius 16 -> cell radius 2.
        f.grid.place(12, 10, Structure::new(Team::CRUX, 100.0, 1));
        f.grid.place(13, 10, Structure::new(Team::CRUX, 100.0, 1));
        f.grid.place(12, 12, Structure::new(Team::CRUX, 100.0, 1));

        let report = apply_radius_damage(&mut f, None, 80.0, 80.0, 16.0, 100.0).unwrap();
        let cells: Vec<(i32, i32)> = report.tiles.iter().map(|t| t.cell).collect();
        assert_eq!(cells, vec![(12, 10)], "diagonal (2,2) is outside the cell circle");

        let edge = f.grid.structure_at(12, 10).unwrap();
        assert!((edge.health - 60.0).abs() < 1e-3, "edge tile takes 40%");
        assert_eq!(f.grid.structure_at(13, 10).unwrap().health, 100.0);
        assert_eq!(f.grid.structure_at(12, 12).unwrap().health, 100.0);
    }

    #[test]
    fn test_tile_pass_skips_friendly_structures() {
        let mut f = field();
        f.grid.place(10, 10, Structure::new(Team::SHARDED, 100.0, 1));
        f.grid.place(11, 10, Structure::new(Team::CRUX, 100.0, 1));

        apply_radius_damage(&mut f, Some(Team::SHARDED), 80.0, 80.0, 16.0, 50.0).unwrap();
        assert_eq!(f.grid.structure_at(10, 10).unwrap().health, 100.0);
        assert!(f.grid.structure_at(11, 10).unwrap().health < 100.0);
    }

    #[test]
    fn test_large_structure_damaged_once() {
        let mut f = field();
        f.grid.place(10, 10, Structure::new(Team::CRUX, 100.0, 3));
        let report = damage_everything(&mut f, 80.0, 80.0, 24.0, 10.0).unwrap();
        assert_eq!(report.tiles.len(), 1);
        assert_eq!(f.grid.structure_at(10, 10).unwrap().health, 90.0);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut f = field();
        assert!(apply_radius_damage(&mut f, None, f32::NAN, 0.0, 10.0, 1.0).is_err());
        assert!(apply_radius_damage(&mut f, None, 0.0, 0.0, -1.0, 1.0).is_err());
        assert!(apply_radius_damage(&mut f, None, 0.0, 0.0, 1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_dead_unit_is_noop() {
        let mut f = field();
        let e = spawn_unit(&mut f, Team::CRUX, Position::new(0.0, 0.0), 10.0);
        f.world.get::<&mut Health>(e).unwrap().current = 0.0;
        let report = damage_everything(&mut f, 0.0, 0.0, 10.0, 5.0).unwrap();
        assert!(report.units.is_empty());
        assert_eq!(health(&f, e), 0.0);
    }

    #[test]
    fn test_huge_radius_stays_on_grid() {
        let mut f = field();
        f.grid.place(5, 5, Structure::new(Team::CRUX, 100.0, 1));
        let e = spawn_unit(&mut f, Team::CRUX, Position::new(40.0, 40.0), 100.0);

        let report = damage_everything(&mut f, 0.0, 0.0, 400_000.0, 1.0).unwrap();
        assert_eq!(report.tiles.len(), 1);
        assert_eq!(report.tiles[0].cell, (5, 5));
        assert_eq!(report.units.len(), 1);
        assert!(health(&f, e) < 100.0);
    }

    #[test]
    fn test_extreme_radius_and_far_origin_do_not_panic() {
        let mut f = field();
        f.grid.place(5, 0, Structure::new(Team::CRUX, 100.0, 1));
        spawn_unit(&mut f, Team::CRUX, Position::new(8.0, 8.0), 100.0);

        assert!(damage_everything(&mut f, 1e30, 0.0, 3e38, 1.0).is_ok());
        assert!(damage_everything(&mut f, -1e30, -1e30, f32::MAX, 1.0).is_ok());
    }

    #[test]
    fn test_units_are_unit_tagged() {
        let mut f = field();
        let e = spawn_unit(&mut f, Team::CRUX, Position::new(0.0, 0.0), 10.0);
        assert!(f.world.get::<&Unit>(e).is_ok());
    }
}
