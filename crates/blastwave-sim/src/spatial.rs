//! Spatial index over unit hitboxes.
//!
//! Uniform bucket grid rebuilt from the world whenever units move or spawn.
//! Queries return every unit whose hitbox overlaps the query rectangle,
//! deduplicated and in a stable order.

use std::collections::HashMap;

use hecs::{Entity, World};

use blastwave_core::components::{Health, Hitbox, Unit};
use blastwave_core::teams::{Team, TeamRelations};
use blastwave_core::types::{Position, Rect};

#[derive(Debug, Clone, Copy)]
struct Entry {
    entity: Entity,
    hitbox: Rect,
    team: Team,
}

/// Bucketed index of live units.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    buckets: HashMap<(i32, i32), Vec<Entry>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            buckets: HashMap::new(),
        }
    }

    fn bucket_range(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let min = rect.min() / self.cell_size;
        let max = rect.max() / self.cell_size;
        (
            min.x.floor() as i32,
            min.y.floor() as i32,
            max.x.floor() as i32,
            max.y.floor() as i32,
        )
    }

    /// Re-index every live unit in the world.
    pub fn rebuild(&mut self, world: &World) {
        self.buckets.clear();

        let mut query = world.query::<(&Unit, &Position, &Hitbox, &Team, &Health)>();
        for (entity, (_unit, pos, hitbox, team, health)) in query.iter() {
            if health.is_dead() {
                continue;
            }
            let entry = Entry {
                entity,
                hitbox: hitbox.rect_at(pos),
                team: *team,
            };
            let (x0, y0, x1, y1) = self.bucket_range(&entry.hitbox);
            for by in y0..=y1 {
                for bx in x0..=x1 {
                    self.buckets.entry((bx, by)).or_default().push(entry);
                }
            }
        }
    }

    fn collect(&self, rect: &Rect, mut keep: impl FnMut(&Entry) -> bool) -> Vec<Entity> {
        let (x0, y0, x1, y1) = self.bucket_range(rect);
        let span = (x1 as i64 - x0 as i64 + 1).saturating_mul(y1 as i64 - y0 as i64 + 1);
        let mut found: Vec<Entity> = Vec::new();
        let mut scan = |bucket: &Vec<Entry>| {
            found.extend(
                bucket
                    .iter()
                    .filter(|e| e.hitbox.overlaps(rect) && keep(e))
                    .map(|e| e.entity),
            );
        };

        // Wide queries walk the occupied buckets instead of the covered range.
        if span > self.buckets.len() as i64 {
            self.buckets.values().for_each(&mut scan);
        } else {
            for by in y0..=y1 {
                for bx in x0..=x1 {
                    if let Some(bucket) = self.buckets.get(&(bx, by)) {
                        scan(bucket);
                    }
                }
            }
        }
        found.sort_unstable_by_key(|e| e.to_bits());
        found.dedup();
        found
    }

    /// All units overlapping `rect`.
    pub fn query_nearby(&self, rect: &Rect) -> Vec<Entity> {
        self.collect(rect, |_| true)
    }

    /// Units overlapping `rect` whose team is hostile to `team`.
    pub fn query_nearby_hostile(
        &self,
        relations: &TeamRelations,
        team: Team,
        rect: &Rect,
    ) -> Vec<Entity> {
        self.collect(rect, |e| relations.are_hostile(team, e.team))
    }

    /// Number of indexed units.
    pub fn len(&self) -> usize {
        let mut all: Vec<Entity> = self
            .buckets
            .values()
            .flat_map(|b| b.iter().map(|e| e.entity))
            .collect();
        all.sort_unstable_by_key(|e| e.to_bits());
        all.dedup();
        all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(world: &mut World, x: f32, y: f32, team: Team) -> Entity {
        world.spawn((
            Unit,
            Position::new(x, y),
            Hitbox::new(4.0, 4.0),
            team,
            Health::new(10.0),
        ))
    }

    #[test]
    fn test_query_by_hitbox_overlap() {
        let mut world = World::new();
        let near = spawn(&mut world, 10.0, 10.0, Team::CRUX);
        let _far = spawn(&mut world, 200.0, 200.0, Team::CRUX);

        let mut grid = SpatialGrid::new(32.0);
        grid.rebuild(&world);

        let found = grid.query_nearby(&Rect::centered(0.0, 0.0, 17.0, 17.0));
        assert_eq!(found, vec![near], "hitbox edge at 8.0 overlaps box edge at 8.5");
    }

    #[test]
    fn test_unit_spanning_buckets_reported_once() {
        let mut world = World::new();
        let e = spawn(&mut world, 32.0, 32.0, Team::CRUX);
        let mut grid = SpatialGrid::new(32.0);
        grid.rebuild(&world);

        let found = grid.query_nearby(&Rect::centered(32.0, 32.0, 100.0, 100.0));
        assert_eq!(found, vec![e]);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_hostile_query_filters_allies() {
        let mut world = World::new();
        let enemy = spawn(&mut world, 0.0, 0.0, Team::CRUX);
        let _friend = spawn(&mut world, 1.0, 1.0, Team::SHARDED);
        let mut grid = SpatialGrid::new(32.0);
        grid.rebuild(&world);

        let relations = TeamRelations::new();
        let found =
            grid.query_nearby_hostile(&relations, Team::SHARDED, &Rect::centered(0.0, 0.0, 20.0, 20.0));
        assert_eq!(found, vec![enemy]);
    }

    #[test]
    fn test_unbounded_query_scans_occupied_buckets() {
        let mut world = World::new();
        let a = spawn(&mut world, 0.0, 0.0, Team::CRUX);
        let b = spawn(&mut world, 5000.0, -5000.0, Team::CRUX);
        let mut grid = SpatialGrid::new(32.0);
        grid.rebuild(&world);

        let everything = Rect::spanning(-f32::MAX, -f32::MAX, f32::MAX, f32::MAX);
        let mut expected = vec![a, b];
        expected.sort_unstable_by_key(|e| e.to_bits());
        assert_eq!(grid.query_nearby(&everything), expected);
    }

    #[test]
    fn test_dead_units_not_indexed() {
        let mut world = World::new();
        let e = spawn(&mut world, 0.0, 0.0, Team::CRUX);
        world.get::<&mut Health>(e).unwrap().current = 0.0;
        let mut grid = SpatialGrid::new(32.0);
        grid.rebuild(&world);
        assert!(grid.is_empty());
    }
}
