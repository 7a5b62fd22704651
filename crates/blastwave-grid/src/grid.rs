//! TileGrid: fixed-size cells hosting structures and fires.
//!
//! Cell `(cx, cy)` is centred on world point `(cx * TILE_SIZE, cy * TILE_SIZE)`.
//! A structure of footprint `size` occupies an origin cell holding the
//! structure itself plus `Linked` cells pointing back at the origin.

use blastwave_core::components::Projectile;
use blastwave_core::constants::{FIRE_LIFETIME, TILE_SIZE};
use blastwave_core::teams::Team;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::raycast::raycast_cells;

/// A building or block placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub team: Team,
    pub health: f32,
    pub max_health: f32,
    /// Footprint edge length in cells.
    pub size: u8,
    /// Whether projectiles can collide with it.
    pub hittable: bool,
    /// Whether it stops a line trace after being hit.
    pub blocks_rays: bool,
}

impl Structure {
    pub fn new(team: Team, health: f32, size: u8) -> Self {
        Self {
            team,
            health,
            max_health: health,
            size: size.max(1),
            hittable: true,
            blocks_rays: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtract `amount`. Returns false when already destroyed.
    pub fn damage(&mut self, amount: f32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.health -= amount;
        true
    }

    /// Whether `projectile` can register a collision with this structure.
    pub fn collides_with(&self, projectile: &Projectile) -> bool {
        self.hittable && projectile.collides_tiles && !self.is_destroyed()
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    Structure(Structure),
    /// Extra footprint cell of the structure at `origin`.
    Linked { origin: (i32, i32) },
}

/// A burning cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fire {
    /// Remaining burn time in ticks.
    pub lifetime: f32,
}

/// A single grid cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub occupant: Occupant,
    pub fire: Option<Fire>,
}

impl Tile {
    pub fn is_burning(&self) -> bool {
        self.fire.is_some()
    }
}

/// The world's tile grid. Cells outside `0..width, 0..height` do not exist.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create an empty grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, cx: i32, cy: i32) -> bool {
        cx >= 0 && cy >= 0 && (cx as u32) < self.width && (cy as u32) < self.height
    }

    fn index(&self, cx: i32, cy: i32) -> Option<usize> {
        self.in_bounds(cx, cy)
            .then(|| cy as usize * self.width as usize + cx as usize)
    }

    /// Cell containing a world point.
    pub fn world_to_cell(x: f32, y: f32) -> (i32, i32) {
        ((x / TILE_SIZE).round() as i32, (y / TILE_SIZE).round() as i32)
    }

    /// World-space centre of a single cell.
    pub fn cell_center(cx: i32, cy: i32) -> Vec2 {
        Vec2::new(cx as f32 * TILE_SIZE, cy as f32 * TILE_SIZE)
    }

    pub fn tile(&self, cx: i32, cy: i32) -> Option<&Tile> {
        self.index(cx, cy).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, cx: i32, cy: i32) -> Option<&mut Tile> {
        self.index(cx, cy).map(move |i| &mut self.tiles[i])
    }

    /// Tile under a world point.
    pub fn tile_world(&self, x: f32, y: f32) -> Option<&Tile> {
        let (cx, cy) = Self::world_to_cell(x, y);
        self.tile(cx, cy)
    }

    /// Origin cell of the structure covering `(cx, cy)`, if any.
    pub fn structure_origin(&self, cx: i32, cy: i32) -> Option<(i32, i32)> {
        match &self.tile(cx, cy)?.occupant {
            Occupant::Empty => None,
            Occupant::Structure(_) => Some((cx, cy)),
            Occupant::Linked { origin } => Some(*origin),
        }
    }

    /// Structure whose origin is exactly `(cx, cy)`.
    pub fn structure_at(&self, cx: i32, cy: i32) -> Option<&Structure> {
        match &self.tile(cx, cy)?.occupant {
            Occupant::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn structure_at_mut(&mut self, cx: i32, cy: i32) -> Option<&mut Structure> {
        match &mut self.tile_mut(cx, cy)?.occupant {
            Occupant::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// World-space centre of the structure at origin `(cx, cy)`.
    /// Even footprints sit half a cell up and right of their origin.
    pub fn structure_center(&self, cx: i32, cy: i32) -> Option<Vec2> {
        let size = self.structure_at(cx, cy)?.size;
        let offset = if size % 2 == 0 { TILE_SIZE / 2.0 } else { 0.0 };
        Some(Self::cell_center(cx, cy) + Vec2::splat(offset))
    }

    /// Cells covered by a footprint of `size` with origin `(cx, cy)`.
    fn footprint(cx: i32, cy: i32, size: u8) -> impl Iterator<Item = (i32, i32)> {
        let size = size.max(1) as i32;
        let lo = -(size - 1) / 2;
        let hi = size / 2;
        (lo..=hi).flat_map(move |dy| (lo..=hi).map(move |dx| (cx + dx, cy + dy)))
    }

    /// Place a structure with origin `(cx, cy)`.
    /// Returns false if any footprint cell is out of bounds or occupied.
    pub fn place(&mut self, cx: i32, cy: i32, structure: Structure) -> bool {
        let free = Self::footprint(cx, cy, structure.size).all(|(x, y)| {
            self.tile(x, y)
                .is_some_and(|t| t.occupant == Occupant::Empty)
        });
        if !free {
            return false;
        }

        for (x, y) in Self::footprint(cx, cy, structure.size) {
            if let Some(tile) = self.tile_mut(x, y) {
                tile.occupant = Occupant::Linked { origin: (cx, cy) };
            }
        }
        if let Some(tile) = self.tile_mut(cx, cy) {
            tile.occupant = Occupant::Structure(structure);
        }
        true
    }

    /// Remove the structure with origin `(cx, cy)` and clear its linked cells.
    pub fn remove(&mut self, cx: i32, cy: i32) -> Option<Structure> {
        let structure = self.structure_at(cx, cy)?.clone();
        for (x, y) in Self::footprint(cx, cy, structure.size) {
            if let Some(tile) = self.tile_mut(x, y) {
                tile.occupant = Occupant::Empty;
            }
        }
        Some(structure)
    }

    /// Remove every destroyed structure. Returns each removed origin and its centre.
    pub fn remove_destroyed(&mut self) -> Vec<((i32, i32), Vec2)> {
        let destroyed: Vec<((i32, i32), Vec2)> = self
            .structure_origins()
            .into_iter()
            .filter(|&(cx, cy)| self.structure_at(cx, cy).is_some_and(Structure::is_destroyed))
            .filter_map(|(cx, cy)| Some(((cx, cy), self.structure_center(cx, cy)?)))
            .collect();

        for &((cx, cy), _) in &destroyed {
            self.remove(cx, cy);
        }
        destroyed
    }

    /// Origins of all structures, row-major.
    pub fn structure_origins(&self) -> Vec<(i32, i32)> {
        self.cells()
            .filter(|&(cx, cy)| self.structure_at(cx, cy).is_some())
            .collect()
    }

    pub fn structure_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| matches!(t.occupant, Occupant::Structure(_)))
            .count()
    }

    /// Set a cell burning (or refresh its fire). Returns false if out of bounds.
    pub fn ignite(&mut self, cx: i32, cy: i32) -> bool {
        match self.tile_mut(cx, cy) {
            Some(tile) => {
                tile.fire = Some(Fire {
                    lifetime: FIRE_LIFETIME,
                });
                true
            }
            None => false,
        }
    }

    /// Ignite the cell under a world point.
    pub fn ignite_world(&mut self, x: f32, y: f32) -> bool {
        let (cx, cy) = Self::world_to_cell(x, y);
        self.ignite(cx, cy)
    }

    /// All burning cells, row-major.
    pub fn burning_cells(&self) -> Vec<(i32, i32)> {
        self.cells()
            .filter(|&(cx, cy)| self.tile(cx, cy).is_some_and(Tile::is_burning))
            .collect()
    }

    pub fn fires_burning(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_burning()).count()
    }

    /// Walk the cells crossed by a world-space segment, origin to end.
    /// The visitor returns `true` to stop; see [`raycast_cells`].
    pub fn raycast_world(
        &self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        visitor: impl FnMut(i32, i32) -> bool,
    ) -> bool {
        match self.clip_segment(x0, y0, x1, y1) {
            Some(((cx0, cy0), (cx1, cy1))) => raycast_cells(cx0, cy0, cx1, cy1, visitor),
            None => false,
        }
    }

    /// Cells where a world-space segment enters and leaves the grid, or None
    /// when it misses the grid. Clipping runs in `f64` (Liang-Barsky) so
    /// segments of any finite length stay cheap to walk.
    pub fn clip_segment(
        &self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    ) -> Option<((i32, i32), (i32, i32))> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let tile = TILE_SIZE as f64;
        let min = [-tile / 2.0; 2];
        let max = [
            self.width as f64 * tile - tile / 2.0,
            self.height as f64 * tile - tile / 2.0,
        ];
        let p0 = [x0 as f64, y0 as f64];
        let d = [x1 as f64 - p0[0], y1 as f64 - p0[1]];

        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for axis in 0..2 {
            if d[axis] == 0.0 {
                if p0[axis] < min[axis] || p0[axis] > max[axis] {
                    return None;
                }
                continue;
            }
            let a = (min[axis] - p0[axis]) / d[axis];
            let b = (max[axis] - p0[axis]) / d[axis];
            t0 = t0.max(a.min(b));
            t1 = t1.min(a.max(b));
            if t0 > t1 {
                return None;
            }
        }

        let (w, h) = (self.width as i32, self.height as i32);
        let cell_at = |t: f64| {
            let x = ((p0[0] + d[0] * t) / tile).round() as i32;
            let y = ((p0[1] + d[1] * t) / tile).round() as i32;
            (x.clamp(0, w - 1), y.clamp(0, h - 1))
        };
        Some((cell_at(t0), cell_at(t1)))
    }

    fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height as i32).flat_map(move |cy| (0..self.width as i32).map(move |cx| (cx, cy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laser() -> Projectile {
        Projectile {
            kind: blastwave_core::enums::ProjectileKind::Laser,
            team: Some(Team::SHARDED),
            damage: 10.0,
            lifetime: 1.0,
            collides_tiles: true,
            hits: 0,
        }
    }

    #[test]
    fn test_world_to_cell_rounds() {
        assert_eq!(TileGrid::world_to_cell(0.0, 0.0), (0, 0));
        assert_eq!(TileGrid::world_to_cell(3.9, 4.1), (0, 1));
        assert_eq!(TileGrid::world_to_cell(16.0, 23.0), (2, 3));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = TileGrid::new(4, 4);
        assert!(grid.tile(-1, 0).is_none());
        assert!(grid.tile(4, 0).is_none());
        assert!(grid.tile_world(1000.0, 0.0).is_none());
        assert!(grid.tile(3, 3).is_some());
    }

    #[test]
    fn test_place_single_cell() {
        let mut grid = TileGrid::new(8, 8);
        assert!(grid.place(2, 3, Structure::new(Team::CRUX, 50.0, 1)));
        assert_eq!(grid.structure_origin(2, 3), Some((2, 3)));
        assert_eq!(grid.structure_center(2, 3), Some(Vec2::new(16.0, 24.0)));
        assert_eq!(grid.structure_count(), 1);
    }

    #[test]
    fn test_place_large_footprint_links_cells() {
        let mut grid = TileGrid::new(8, 8);
        assert!(grid.place(3, 3, Structure::new(Team::CRUX, 100.0, 3)));
        for dy in -1..=1 {
            for dx in -1..=1 {
                assert_eq!(grid.structure_origin(3 + dx, 3 + dy), Some((3, 3)));
            }
        }
        assert!(grid.structure_at(2, 2).is_none(), "linked cell is not an origin");
        assert_eq!(grid.structure_count(), 1);

        // Overlapping placement is rejected.
        assert!(!grid.place(4, 4, Structure::new(Team::CRUX, 10.0, 1)));
    }

    #[test]
    fn test_even_footprint_center_offset() {
        let mut grid = TileGrid::new(8, 8);
        assert!(grid.place(2, 2, Structure::new(Team::CRUX, 100.0, 2)));
        assert_eq!(grid.structure_center(2, 2), Some(Vec2::new(20.0, 20.0)));
        assert_eq!(grid.structure_origin(3, 3), Some((2, 2)));
        assert!(grid.structure_origin(1, 1).is_none());
    }

    #[test]
    fn test_place_out_of_bounds_rejected() {
        let mut grid = TileGrid::new(4, 4);
        assert!(!grid.place(0, 0, Structure::new(Team::CRUX, 10.0, 3)));
        assert_eq!(grid.structure_count(), 0);
    }

    #[test]
    fn test_remove_destroyed_clears_footprint() {
        let mut grid = TileGrid::new(8, 8);
        grid.place(3, 3, Structure::new(Team::CRUX, 10.0, 3));
        grid.place(6, 6, Structure::new(Team::CRUX, 10.0, 1));
        grid.structure_at_mut(3, 3).unwrap().damage(20.0);

        let removed = grid.remove_destroyed();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].0, (3, 3));
        assert!(grid.structure_origin(2, 2).is_none());
        assert_eq!(grid.structure_count(), 1);
    }

    #[test]
    fn test_structure_collision_rules() {
        let mut s = Structure::new(Team::CRUX, 10.0, 1);
        let mut p = laser();
        assert!(s.collides_with(&p));
        p.collides_tiles = false;
        assert!(!s.collides_with(&p));
        p.collides_tiles = true;
        s.hittable = false;
        assert!(!s.collides_with(&p));
    }

    #[test]
    fn test_ignite_and_count() {
        let mut grid = TileGrid::new(4, 4);
        assert!(grid.ignite_world(8.0, 8.0));
        assert!(!grid.ignite(9, 9));
        assert_eq!(grid.burning_cells(), vec![(1, 1)]);
        assert_eq!(grid.fires_burning(), 1);
    }

    #[test]
    fn test_raycast_world_converts_to_cells() {
        let grid = TileGrid::new(8, 8);
        let mut cells = Vec::new();
        grid.raycast_world(0.0, 0.0, 24.0, 0.0, |cx, cy| {
            cells.push((cx, cy));
            false
        });
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_clip_segment_to_grid() {
        let grid = TileGrid::new(8, 8);
        assert_eq!(
            grid.clip_segment(-100.0, 16.0, 1e12, 16.0),
            Some(((0, 2), (7, 2)))
        );
        assert_eq!(grid.clip_segment(-100.0, 500.0, 1e12, 500.0), None);
        assert_eq!(grid.clip_segment(100.0, 100.0, 200.0, 200.0), None);
        assert_eq!(TileGrid::new(0, 0).clip_segment(0.0, 0.0, 8.0, 0.0), None);
    }

    #[test]
    fn test_raycast_world_long_segment_visits_grid_only() {
        let grid = TileGrid::new(8, 8);
        let mut cells = Vec::new();
        grid.raycast_world(0.0, 8.0, f32::MAX, 8.0, |cx, cy| {
            cells.push((cx, cy));
            false
        });
        assert_eq!(cells, (0..8).map(|cx| (cx, 1)).collect::<Vec<_>>());
    }
}
