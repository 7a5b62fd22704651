//! Line damage: resolve a directed segment against the tile grid and unit hitboxes.

use glam::Vec2;
use hecs::Entity;
use tracing::trace;

use blastwave_core::components::Projectile;
use blastwave_core::constants::LINE_HIT_EXPAND;
use blastwave_core::enums::EffectKind;
use blastwave_core::events::EffectEvent;
use blastwave_core::teams::Team;
use blastwave_core::types::Rect;
use blastwave_grid::raycast_cells;

use crate::battlefield::Battlefield;
use crate::error::{ensure_finite, ensure_non_negative, SimError, SimResult};

/// One collision registered by a line trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHit {
    /// A structure, by origin cell, hit at its centre.
    Tile { cell: (i32, i32), x: f32, y: f32 },
    /// A unit, hit where the segment enters its expanded hitbox.
    Unit { entity: Entity, x: f32, y: f32 },
}

/// Trace a segment from `(x, y)` along `angle` (radians) for `length` units.
///
/// Structures hostile to `team` along the path take the instigator's damage
/// and trigger its on-hit effect at their centre; the trace continues past
/// them unless a structure blocks rays. Hostile units whose hitbox, grown by
/// `LINE_HIT_EXPAND`, intersects the segment take the instigator's damage and
/// `effect` plays at the intersection. Every structure and unit is hit at most
/// once. A zero-length segment hits nothing.
#[allow(clippy::too_many_arguments)]
pub fn apply_line_damage(
    field: &mut Battlefield,
    instigator: Entity,
    team: Team,
    effect: EffectKind,
    x: f32,
    y: f32,
    angle: f32,
    length: f32,
) -> SimResult<Vec<LineHit>> {
    ensure_finite("x", x)?;
    ensure_finite("y", y)?;
    ensure_finite("angle", angle)?;
    ensure_non_negative("length", length)?;

    let mut projectile = match field.world.get::<&Projectile>(instigator) {
        Ok(p) => *p,
        Err(_) => return Err(SimError::UnknownInstigator(instigator)),
    };

    let start = Vec2::new(x, y);
    let end = start + Vec2::from_angle(angle) * length;
    ensure_finite("end x", end.x)?;
    ensure_finite("end y", end.y)?;
    if length == 0.0 || start == end {
        return Ok(Vec::new());
    }

    let mut hits = collide_tiles(field, &mut projectile, team, start, end);
    hits.extend(collide_units(field, &mut projectile, team, effect, start, end));

    if let Ok(mut stored) = field.world.get::<&mut Projectile>(instigator) {
        *stored = projectile;
    }
    trace!(x, y, angle, length, hits = hits.len(), "line damage resolved");
    Ok(hits)
}

fn collide_tiles(
    field: &mut Battlefield,
    projectile: &mut Projectile,
    team: Team,
    start: Vec2,
    end: Vec2,
) -> Vec<LineHit> {
    let mut hits: Vec<LineHit> = Vec::new();
    let Some((from, to)) = field.grid.clip_segment(start.x, start.y, end.x, end.y) else {
        return hits;
    };

    raycast_cells(from.0, from.1, to.0, to.1, |cx, cy| {
        let Some(origin) = field.grid.structure_origin(cx, cy) else {
            return false;
        };
        let already_hit = hits
            .iter()
            .any(|h| matches!(h, LineHit::Tile { cell, .. } if *cell == origin));
        if already_hit {
            return false;
        }
        let Some(center) = field.grid.structure_center(origin.0, origin.1) else {
            return false;
        };
        let Some(structure) = field.grid.structure_at_mut(origin.0, origin.1) else {
            return false;
        };
        if !field.teams.are_hostile(team, structure.team) || !structure.collides_with(projectile) {
            return false;
        }

        structure.damage(projectile.damage);
        let blocks = structure.blocks_rays;
        projectile.hits += 1;
        field
            .effects
            .push(EffectEvent::at(projectile.kind.hit_effect(), center.x, center.y));
        hits.push(LineHit::Tile {
            cell: origin,
            x: center.x,
            y: center.y,
        });
        blocks
    });
    hits
}

fn collide_units(
    field: &mut Battlefield,
    projectile: &mut Projectile,
    team: Team,
    effect: EffectKind,
    start: Vec2,
    end: Vec2,
) -> Vec<LineHit> {
    let bounds = Rect::spanning(start.x, start.y, end.x, end.y).expanded(LINE_HIT_EXPAND);
    let mut hits = Vec::new();

    for entity in field.hostile_units_in(team, &bounds) {
        let Some(unit) = field.unit_view(entity) else {
            continue;
        };
        let Some(point) = unit.hitbox.expanded(LINE_HIT_EXPAND).raycast(start, end) else {
            continue;
        };

        field.effects.push(EffectEvent::at(effect, point.x, point.y));
        field.damage_unit(entity, projectile.damage);
        projectile.hits += 1;
        hits.push(LineHit::Unit {
            entity,
            x: point.x,
            y: point.y,
        });
    }
    hits
}
