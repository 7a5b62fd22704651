//! Systems that operate on the battlefield each tick.
//!
//! Systems are free functions over `&mut Battlefield`. They do not own state;
//! all state lives in components, the tile grid or buffers passed in.

pub mod cleanup;
pub mod fires;
pub mod lightning;
pub mod movement;
pub mod projectiles;
pub mod status;
