//! Battlefield: the mutable world state damage operations act on.
//!
//! Bundles the hecs world, tile grid, team table, unit spatial index and the
//! effect buffer so damage functions take a single `&mut Battlefield`.

use hecs::{Entity, World};

use blastwave_core::components::{Health, Hitbox, StatusEffect, Unit};
use blastwave_core::constants::SPATIAL_CELL_SIZE;
use blastwave_core::enums::StatusKind;
use blastwave_core::events::EffectEvent;
use blastwave_core::teams::{Team, TeamRelations};
use blastwave_core::types::{Position, Rect};
use blastwave_grid::TileGrid;

use crate::spatial::SpatialGrid;

/// Read-only copy of the unit fields damage filters look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitView {
    pub entity: Entity,
    pub position: Position,
    pub hitbox: Rect,
    pub team: Team,
    pub health: Health,
}

pub struct Battlefield {
    pub world: World,
    pub grid: TileGrid,
    pub teams: TeamRelations,
    /// Effects emitted since the last drain.
    pub effects: Vec<EffectEvent>,
    index: SpatialGrid,
    index_dirty: bool,
}

impl Battlefield {
    pub fn new(grid: TileGrid, teams: TeamRelations) -> Self {
        Self {
            world: World::new(),
            grid,
            teams,
            effects: Vec::new(),
            index: SpatialGrid::new(SPATIAL_CELL_SIZE),
            index_dirty: true,
        }
    }

    /// Flag the spatial index as stale (units moved, spawned or despawned).
    pub fn mark_moved(&mut self) {
        self.index_dirty = true;
    }

    fn refresh_index(&mut self) {
        if self.index_dirty {
            self.index.rebuild(&self.world);
            self.index_dirty = false;
        }
    }

    /// Units whose hitbox overlaps `rect`.
    pub fn units_in(&mut self, rect: &Rect) -> Vec<Entity> {
        self.refresh_index();
        self.index.query_nearby(rect)
    }

    /// Units overlapping `rect` that are hostile to `team`.
    pub fn hostile_units_in(&mut self, team: Team, rect: &Rect) -> Vec<Entity> {
        self.refresh_index();
        self.index.query_nearby_hostile(&self.teams, team, rect)
    }

    /// Units overlapping `rect`, hostile-only when a team is given.
    pub fn targets_in(&mut self, team: Option<Team>, rect: &Rect) -> Vec<Entity> {
        match team {
            Some(team) => self.hostile_units_in(team, rect),
            None => self.units_in(rect),
        }
    }

    /// Snapshot a unit. None if it was despawned or is not a unit.
    pub fn unit_view(&self, entity: Entity) -> Option<UnitView> {
        let mut query = self
            .world
            .query_one::<(&Unit, &Position, &Hitbox, &Team, &Health)>(entity)
            .ok()?;
        let (_unit, position, hitbox, team, health) = query.get()?;
        Some(UnitView {
            entity,
            position: *position,
            hitbox: hitbox.rect_at(position),
            team: *team,
            health: *health,
        })
    }

    /// Damage a unit. Missing or dead units are a no-op and return false.
    pub fn damage_unit(&mut self, entity: Entity, amount: f32) -> bool {
        match self.world.get::<&mut Health>(entity) {
            Ok(mut health) => health.damage(amount),
            Err(_) => false,
        }
    }

    /// Apply (or refresh) a status effect. Missing units are a no-op.
    pub fn apply_status(&mut self, entity: Entity, kind: StatusKind, duration: f32) {
        apply_status(&mut self.world, entity, kind, duration);
    }

    /// Number of live units.
    pub fn units_alive(&self) -> usize {
        let mut query = self.world.query::<(&Unit, &Health)>();
        query.iter().filter(|(_, (_, h))| !h.is_dead()).count()
    }
}

/// Insert or replace a unit's status effect.
pub fn apply_status(world: &mut World, entity: Entity, kind: StatusKind, duration: f32) {
    if !world.contains(entity) {
        return;
    }
    let _ = world.insert_one(
        entity,
        StatusEffect {
            kind,
            remaining: duration,
        },
    );
}
