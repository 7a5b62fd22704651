//! Fire system: burning tiles damage what stands on them, then burn out.

use blastwave_core::constants::{
    BURN_DURATION, FIRE_STRUCTURE_DAMAGE, FIRE_UNIT_DAMAGE, TILE_SIZE,
};
use blastwave_core::enums::StatusKind;
use blastwave_grid::TileGrid;

use crate::battlefield::{self, Battlefield};
use crate::damage::apply_filtered_damage;
use crate::error::SimResult;

/// Burn every lit cell for `delta` ticks.
pub fn run(field: &mut Battlefield, delta: f32) -> SimResult<()> {
    for (cx, cy) in field.grid.burning_cells() {
        if let Some((ox, oy)) = field.grid.structure_origin(cx, cy) {
            if let Some(structure) = field.grid.structure_at_mut(ox, oy) {
                structure.damage(FIRE_STRUCTURE_DAMAGE * delta);
            }
        }

        let center = TileGrid::cell_center(cx, cy);
        apply_filtered_damage(
            field,
            None,
            center.x,
            center.y,
            TILE_SIZE / 2.0,
            FIRE_UNIT_DAMAGE * delta,
            |_| true,
            |world, entity| {
                battlefield::apply_status(world, entity, StatusKind::Burning, BURN_DURATION)
            },
        )?;

        if let Some(tile) = field.grid.tile_mut(cx, cy) {
            if let Some(fire) = tile.fire.as_mut() {
                fire.lifetime -= delta;
                if fire.lifetime <= 0.0 {
                    tile.fire = None;
                }
            }
        }
    }
    Ok(())
}
