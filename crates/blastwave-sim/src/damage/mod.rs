//! Damage primitives: falloff, radius blasts, line traces, filtered area damage.
//!
//! All functions validate their numeric input and act on a `Battlefield`.

pub mod falloff;
pub mod filtered;
pub mod line;
pub mod radius;

pub use falloff::calculate_damage;
pub use filtered::apply_filtered_damage;
pub use line::{apply_line_damage, LineHit};
pub use radius::{apply_radius_damage, damage_everything, RadiusDamageReport, TileHit, UnitHit};
