//! Dynamic explosions: expand four intensity parameters into a staged sequence
//! of lightning arcs, fire bullets and growing shockwave waves, plus the
//! immediate visual feedback.

use rand::Rng;
use tracing::debug;

use blastwave_core::constants::*;
use blastwave_core::enums::EffectKind;
use blastwave_core::events::{Color, EffectEvent};
use blastwave_grid::TileGrid;

use crate::error::{ensure_finite, ensure_non_negative, SimResult};
use crate::scheduler::{DeferredEvent, Scheduler};

/// Parameters of one dynamic explosion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    /// Drives fire bullets.
    pub flammability: f32,
    /// Drives shockwave waves, their damage and the camera shake.
    pub explosiveness: f32,
    /// Drives lightning arcs.
    pub power: f32,
    pub radius: f32,
    pub color: Color,
}

impl Explosion {
    /// Reject NaN coordinates and negative or non-finite intensities.
    pub fn validate(&self) -> SimResult<()> {
        ensure_finite("x", self.x)?;
        ensure_finite("y", self.y)?;
        ensure_non_negative("flammability", self.flammability)?;
        ensure_non_negative("explosiveness", self.explosiveness)?;
        ensure_non_negative("power", self.power)?;
        ensure_non_negative("radius", self.radius)?;
        Ok(())
    }

    /// Number of lightning arcs: every integer below `clamp(power / 20, 0, 6)`.
    pub fn lightning_arcs(&self) -> u32 {
        (self.power / POWER_PER_ARC)
            .clamp(0.0, MAX_LIGHTNING_ARCS)
            .ceil() as u32
    }

    /// Base length of each lightning arc, before the random spread.
    pub fn lightning_length(&self) -> i32 {
        let extra = ((self.power / POWER_PER_LIGHTNING_SEGMENT) as i32)
            .clamp(LIGHTNING_EXTRA_MIN, LIGHTNING_EXTRA_MAX);
        LIGHTNING_BASE_LENGTH + extra
    }

    /// Number of fire bullets: every integer below `clamp(flammability / 4, 0, 30)`.
    pub fn fire_bullets(&self) -> u32 {
        (self.flammability / FLAMMABILITY_PER_BULLET)
            .clamp(0.0, MAX_FIRE_BULLETS)
            .ceil() as u32
    }

    /// Number of shockwave waves.
    pub fn shockwave_waves(&self) -> u32 {
        ((self.explosiveness / EXPLOSIVENESS_PER_WAVE) as i32).clamp(0, MAX_SHOCKWAVE_WAVES) as u32
    }

    /// Radius of the final (largest) wave.
    pub fn max_wave_radius(&self) -> f32 {
        (self.radius + self.explosiveness).clamp(0.0, MAX_SHOCKWAVE_RADIUS)
    }

    /// Radius of wave `index` (0-based); grows linearly up to `max_wave_radius`.
    pub fn wave_radius(&self, index: u32) -> f32 {
        let waves = self.shockwave_waves().max(1);
        self.max_wave_radius() * ((index + 1) as f32 / waves as f32)
    }

    /// Damage of each shockwave wave.
    pub fn wave_damage(&self) -> f32 {
        self.explosiveness / 2.0
    }

    /// Camera shake intensity (also used as duration).
    pub fn shake(&self) -> f32 {
        (self.explosiveness / 4.0 + SHAKE_BASE).min(SHAKE_MAX)
    }
}

/// Schedule the staged sub-events of `explosion` and emit its immediate effects.
///
/// Stages are scheduled in a fixed order (lightning, fire, shockwave) but
/// fire interleaved by delay.
pub fn trigger_explosion(
    scheduler: &mut Scheduler,
    effects: &mut Vec<EffectEvent>,
    rng: &mut impl Rng,
    explosion: &Explosion,
) -> SimResult<()> {
    explosion.validate()?;
    let Explosion { x, y, radius, .. } = *explosion;

    let arcs = explosion.lightning_arcs();
    for i in 0..arcs {
        let delay = i as f32 * ARC_SPACING + rng.gen_range(0.0..=ARC_JITTER);
        let spread = rng.gen_range(-LIGHTNING_LENGTH_SPREAD..=LIGHTNING_LENGTH_SPREAD);
        scheduler.schedule(
            delay,
            DeferredEvent::LightningArc {
                x,
                y,
                angle: rng.gen_range(0.0..std::f32::consts::TAU),
                length: (explosion.lightning_length() + spread).max(1) as u32,
                damage: LIGHTNING_DAMAGE,
                team: None,
            },
        );
    }

    let bullets = explosion.fire_bullets();
    for i in 0..bullets {
        scheduler.schedule(
            i as f32 * FIRE_BULLET_SPACING,
            DeferredEvent::FireBullet {
                x,
                y,
                angle: rng.gen_range(0.0..std::f32::consts::TAU),
            },
        );
    }

    let waves = explosion.shockwave_waves();
    for i in 0..waves {
        scheduler.schedule(
            i as f32 * WAVE_SPACING,
            DeferredEvent::ShockwaveWave {
                x,
                y,
                radius: explosion.wave_radius(i),
                damage: explosion.wave_damage(),
                smoke_x: x + scatter(rng, radius),
                smoke_y: y + scatter(rng, radius),
            },
        );
    }

    if explosion.explosiveness > SHOCKWAVE_THRESHOLD {
        effects.push(EffectEvent::at(EffectKind::Shockwave, x, y));
    }
    if explosion.explosiveness > BIG_SHOCKWAVE_THRESHOLD {
        effects.push(EffectEvent::at(EffectKind::BigShockwave, x, y));
    }

    let shake = explosion.shake();
    effects.push(EffectEvent::Shake {
        intensity: shake,
        duration: shake,
        x,
        y,
    });
    effects.push(EffectEvent::Effect {
        kind: EffectKind::BlockExplosion,
        x,
        y,
        color: Some(explosion.color),
    });

    debug!(x, y, arcs, bullets, waves, "explosion scheduled");
    Ok(())
}

/// Scatter `count` ignition points within `range` of `(x, y)`; each in-bounds
/// cell hit starts burning. Returns how many points landed on the grid.
pub fn spawn_fires(
    grid: &mut TileGrid,
    rng: &mut impl Rng,
    x: f32,
    y: f32,
    range: f32,
    count: u32,
) -> SimResult<u32> {
    ensure_finite("x", x)?;
    ensure_finite("y", y)?;
    ensure_non_negative("range", range)?;

    let mut ignited = 0;
    for _ in 0..count {
        let cx = x + scatter(rng, range);
        let cy = y + scatter(rng, range);
        if grid.ignite_world(cx, cy) {
            ignited += 1;
        }
    }
    Ok(ignited)
}

/// Uniform offset in `[-extent, extent]`, for any finite extent.
fn scatter(rng: &mut impl Rng, extent: f32) -> f32 {
    rng.gen_range(-1.0f32..=1.0) * extent
}
