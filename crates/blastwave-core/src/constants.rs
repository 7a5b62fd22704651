//! Simulation constants and tuning parameters.
//!
//! Time values are in ticks unless the name says otherwise.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// World units per grid cell.
pub const TILE_SIZE: f32 = 8.0;

/// Bucket size of the unit spatial index (world units).
pub const SPATIAL_CELL_SIZE: f32 = TILE_SIZE * 4.0;

// --- Falloff ---

/// Damage multiplier at the edge of a blast radius.
pub const FALLOFF: f32 = 0.4;

/// Peak knockback impulse at the centre of a blast (units/tick).
pub const KNOCKBACK_SCALE: f32 = 2.0;

// --- Line damage ---

/// Margin added around a traced segment and each candidate hitbox.
pub const LINE_HIT_EXPAND: f32 = 3.0;

// --- Explosion staging ---

/// Power per lightning arc.
pub const POWER_PER_ARC: f32 = 20.0;

/// Cap on lightning arcs per explosion.
pub const MAX_LIGHTNING_ARCS: f32 = 6.0;

/// Spacing between lightning arcs.
pub const ARC_SPACING: f32 = 2.0;

/// Maximum random delay added to each arc.
pub const ARC_JITTER: f32 = 4.0;

/// Base segment count of a lightning arc.
pub const LIGHTNING_BASE_LENGTH: i32 = 5;

/// Power per additional lightning segment.
pub const POWER_PER_LIGHTNING_SEGMENT: f32 = 30.0;

/// Bounds on the power-derived extra lightning segments.
pub const LIGHTNING_EXTRA_MIN: i32 = 1;
pub const LIGHTNING_EXTRA_MAX: i32 = 20;

/// Random spread (+/-) on the lightning segment count.
pub const LIGHTNING_LENGTH_SPREAD: i32 = 2;

/// Damage dealt by each lightning point.
pub const LIGHTNING_DAMAGE: f32 = 3.0;

/// World units between lightning points.
pub const LIGHTNING_STEP: f32 = TILE_SIZE;

/// Half-extent of the box a lightning point damages.
pub const LIGHTNING_HIT_SIZE: f32 = TILE_SIZE / 2.0;

/// Maximum bend between lightning segments (radians).
pub const LIGHTNING_BEND: f32 = 0.35;

/// Shocked status applied by lightning (ticks).
pub const SHOCK_DURATION: f32 = 30.0;

/// Flammability per fire bullet.
pub const FLAMMABILITY_PER_BULLET: f32 = 4.0;

/// Cap on fire bullets per explosion.
pub const MAX_FIRE_BULLETS: f32 = 30.0;

/// Spacing between fire bullet launches.
pub const FIRE_BULLET_SPACING: f32 = 0.5;

/// Explosiveness per shockwave wave.
pub const EXPLOSIVENESS_PER_WAVE: f32 = 4.0;

/// Cap on shockwave waves per explosion.
pub const MAX_SHOCKWAVE_WAVES: i32 = 30;

/// Spacing between shockwave waves.
pub const WAVE_SPACING: f32 = 2.0;

/// Cap on the final shockwave radius.
pub const MAX_SHOCKWAVE_RADIUS: f32 = 50.0;

/// Explosiveness above which the shockwave ring is shown.
pub const SHOCKWAVE_THRESHOLD: f32 = 15.0;

/// Explosiveness above which the large shockwave ring is shown.
pub const BIG_SHOCKWAVE_THRESHOLD: f32 = 30.0;

/// Base camera shake of any explosion.
pub const SHAKE_BASE: f32 = 3.0;

/// Upper bound on camera shake.
pub const SHAKE_MAX: f32 = 9.0;

// --- Projectiles ---

/// Launch speed of a fire bullet (units/tick).
pub const FIREBALL_SPEED: f32 = 1.0;

/// Fraction of fire bullet speed lost per tick.
pub const FIREBALL_DRAG: f32 = 0.03;

/// Fire bullet lifetime.
pub const FIREBALL_LIFETIME: f32 = 90.0;

/// Chance per tick that a fire bullet ignites the tile below it.
pub const FIREBALL_IGNITE_CHANCE: f64 = 0.04;

/// Lifetime of a laser instigator (resolved on the tick it is fired).
pub const LASER_LIFETIME: f32 = 1.0;

// --- Fires ---

/// Ticks a tile burns once ignited.
pub const FIRE_LIFETIME: f32 = 240.0;

/// Damage per tick to the structure on a burning tile.
pub const FIRE_STRUCTURE_DAMAGE: f32 = 0.1;

/// Damage per tick to units standing on a burning tile.
pub const FIRE_UNIT_DAMAGE: f32 = 0.05;

/// Burning status applied by fires (ticks).
pub const BURN_DURATION: f32 = 120.0;

/// Damage per tick while burning.
pub const BURN_DAMAGE: f32 = 0.04;

// --- Units ---

/// Fraction of unit velocity lost per tick.
pub const UNIT_DRAG: f32 = 0.1;

/// Default unit hitbox edge length.
pub const UNIT_SIZE: f32 = TILE_SIZE;
