//! Filtered area damage: flat damage to units in a box that pass a predicate.
//!
//! The hook point for effects layered on top of plain damage (status
//! application, one-hit-per-arc bookkeeping, ...).

use hecs::{Entity, World};

use blastwave_core::teams::Team;
use blastwave_core::types::Rect;

use crate::battlefield::{Battlefield, UnitView};
use crate::error::{ensure_finite, ensure_non_negative, SimResult};

/// Damage units in the `2 * size` square centred on `(x, y)`.
///
/// Only units hostile to `team` are considered when a team is given. A unit
/// is hit when `predicate` accepts it and its hitbox overlaps the square; it
/// takes flat `damage` and then `on_hit` runs with mutable world access.
/// Returns the entities hit, in query order.
#[allow(clippy::too_many_arguments)]
pub fn apply_filtered_damage<P, H>(
    field: &mut Battlefield,
    team: Option<Team>,
    x: f32,
    y: f32,
    size: f32,
    damage: f32,
    predicate: P,
    mut on_hit: H,
) -> SimResult<Vec<Entity>>
where
    P: Fn(&UnitView) -> bool,
    H: FnMut(&mut World, Entity),
{
    ensure_finite("x", x)?;
    ensure_finite("y", y)?;
    ensure_non_negative("size", size)?;
    ensure_non_negative("damage", damage)?;

    let rect = Rect::spanning(x - size, y - size, x + size, y + size);
    let mut hit = Vec::new();

    for entity in field.targets_in(team, &rect) {
        let Some(unit) = field.unit_view(entity) else {
            continue;
        };
        if !predicate(&unit) || !unit.hitbox.overlaps(&rect) {
            continue;
        }
        if !field.damage_unit(entity, damage) {
            continue;
        }
        on_hit(&mut field.world, entity);
        hit.push(entity);
    }
    Ok(hit)
}
