//! Lightning discharge: resolves a scheduled arc into a bent polyline that
//! damages units along its path.

use std::collections::HashSet;

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use blastwave_core::constants::{LIGHTNING_BEND, LIGHTNING_HIT_SIZE, LIGHTNING_STEP, SHOCK_DURATION};
use blastwave_core::enums::StatusKind;
use blastwave_core::events::{Color, EffectEvent};
use blastwave_core::teams::Team;

use crate::battlefield::{self, Battlefield};
use crate::damage::apply_filtered_damage;
use crate::error::SimResult;

/// Walk `length` points from `(x, y)`, bending randomly at each step, and
/// damage every unit touched. A unit is hit at most once per discharge and
/// is left `Shocked`. Returns the units hit.
#[allow(clippy::too_many_arguments)]
pub fn discharge(
    field: &mut Battlefield,
    rng: &mut impl Rng,
    x: f32,
    y: f32,
    angle: f32,
    length: u32,
    damage: f32,
    team: Option<Team>,
) -> SimResult<Vec<Entity>> {
    let mut hit: HashSet<Entity> = HashSet::new();
    let mut order = Vec::new();
    let mut points = Vec::with_capacity(length as usize + 1);

    let mut point = Vec2::new(x, y);
    let mut heading = angle;
    points.push((point.x, point.y));

    for _ in 0..length {
        let struck = apply_filtered_damage(
            field,
            team,
            point.x,
            point.y,
            LIGHTNING_HIT_SIZE,
            damage,
            |unit| !hit.contains(&unit.entity),
            |world, entity| {
                battlefield::apply_status(world, entity, StatusKind::Shocked, SHOCK_DURATION)
            },
        )?;
        for entity in struck {
            if hit.insert(entity) {
                order.push(entity);
            }
        }

        heading += rng.gen_range(-LIGHTNING_BEND..=LIGHTNING_BEND);
        point += Vec2::from_angle(heading) * LIGHTNING_STEP;
        points.push((point.x, point.y));
    }

    field.effects.push(EffectEvent::Lightning {
        points,
        color: Color::POWER,
    });
    Ok(order)
}
