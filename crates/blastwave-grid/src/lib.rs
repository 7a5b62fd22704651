//! Tile grid for BLASTWAVE.
//!
//! Structure placement, fires, and cell raycasting
//! over the world's fixed-size grid.

pub use blastwave_core as core;

pub mod grid;
pub mod raycast;

// Re-export key types for convenience.
pub use grid::{Fire, Occupant, Structure, Tile, TileGrid};
pub use raycast::raycast_cells;
