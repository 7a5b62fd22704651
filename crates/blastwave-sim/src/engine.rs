//! Simulation engine: the public face of the damage engine.
//!
//! `SimulationEngine` owns the battlefield, the deferred event scheduler and
//! the seeded RNG. It exposes the damage and explosion operations, runs all
//! systems once per tick and produces serialisable `TickReport`s. Completely
//! headless, enabling deterministic testing.

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use blastwave_core::components::Projectile;
use blastwave_core::enums::{EffectKind, ProjectileKind};
use blastwave_core::events::EffectEvent;
use blastwave_core::state::TickReport;
use blastwave_core::teams::{Team, TeamRelations};
use blastwave_core::types::{Position, SimTime};
use blastwave_grid::{Structure, TileGrid};

use crate::battlefield::{Battlefield, UnitView};
use crate::damage::{self as ops, LineHit, RadiusDamageReport};
use crate::error::{ensure_non_negative, SimResult};
use crate::explosion::{self as orchestrator, Explosion};
use crate::scheduler::{DeferredEvent, Scheduler};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Ticks of scheduler and system time per engine tick (1.0 = normal).
    pub time_scale: f32,
    /// Tile grid size in cells.
    pub grid_width: u32,
    pub grid_height: u32,
    /// Allied team pairs. Distinct teams not listed are hostile.
    pub alliances: Vec<(Team, Team)>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            grid_width: 64,
            grid_height: 64,
            alliances: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        ensure_non_negative("time_scale", config.time_scale)?;
        debug!(seed = config.seed, "loaded simulation config");
        Ok(config)
    }
}

/// The simulation engine. Owns the battlefield and all sim state.
pub struct SimulationEngine {
    field: Battlefield,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    time: SimTime,
    time_scale: f32,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            field: Battlefield::new(
                TileGrid::new(config.grid_width, config.grid_height),
                TeamRelations::with_alliances(config.alliances),
            ),
            scheduler: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            time: SimTime::default(),
            time_scale: sanitize_time_scale(config.time_scale),
            despawn_buffer: Vec::new(),
        }
    }

    /// Advance the simulation by one tick and return what happened.
    pub fn tick(&mut self) -> TickReport {
        let delta = self.time_scale;

        for event in self.scheduler.advance(delta) {
            self.dispatch(event);
        }
        self.run_systems(delta);
        self.time.advance(delta as f64);

        TickReport {
            time: self.time,
            effects: std::mem::take(&mut self.field.effects),
            units_alive: self.field.units_alive(),
            structures_alive: self.field.grid.structure_count(),
            fires_burning: self.field.grid.fires_burning(),
            pending_events: self.scheduler.len(),
        }
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale, clamped to `0.0..=4.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = sanitize_time_scale(scale);
    }

    /// Read-only access to the battlefield.
    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    /// Mutable access to the battlefield, for scenario setup.
    pub fn field_mut(&mut self) -> &mut Battlefield {
        &mut self.field
    }

    /// Read-only access to the pending deferred events.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // --- Setup ---

    /// Spawn a unit with the default hitbox.
    pub fn spawn_unit(&mut self, team: Team, position: Position, health: f32) -> Entity {
        world_setup::spawn_unit(&mut self.field, team, position, health)
    }

    /// Place a structure with origin cell `(cx, cy)`. False if the footprint is blocked.
    pub fn place_structure(&mut self, cx: i32, cy: i32, structure: Structure) -> bool {
        self.field.grid.place(cx, cy, structure)
    }

    // --- Damage operations ---

    /// Radius damage with falloff and knockback, to units and structures.
    pub fn apply_radius_damage(
        &mut self,
        team: Option<Team>,
        x: f32,
        y: f32,
        radius: f32,
        damage: f32,
    ) -> SimResult<RadiusDamageReport> {
        logged(
            "radius damage",
            ops::apply_radius_damage(&mut self.field, team, x, y, radius, damage),
        )
    }

    /// Radius damage that spares no one.
    pub fn damage_everything(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        damage: f32,
    ) -> SimResult<RadiusDamageReport> {
        logged(
            "radius damage",
            ops::damage_everything(&mut self.field, x, y, radius, damage),
        )
    }

    /// Trace a segment on behalf of an existing projectile.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_line_damage(
        &mut self,
        instigator: Entity,
        team: Team,
        effect: EffectKind,
        x: f32,
        y: f32,
        angle: f32,
        length: f32,
    ) -> SimResult<Vec<LineHit>> {
        logged(
            "line damage",
            ops::apply_line_damage(
                &mut self.field,
                instigator,
                team,
                effect,
                x,
                y,
                angle,
                length,
            ),
        )
    }

    /// Fire an instant laser: spawns a laser instigator and traces it.
    /// The instigator is removed by cleanup on a later tick.
    pub fn fire_laser(
        &mut self,
        team: Team,
        x: f32,
        y: f32,
        angle: f32,
        length: f32,
        damage: f32,
    ) -> SimResult<Vec<LineHit>> {
        let laser = world_setup::spawn_projectile(
            &mut self.field,
            ProjectileKind::Laser,
            Some(team),
            Position::new(x, y),
            angle,
            damage,
        );
        let result = self.apply_line_damage(
            laser,
            team,
            ProjectileKind::Laser.hit_effect(),
            x,
            y,
            angle,
            length,
        );
        if result.is_err() {
            let _ = self.field.world.despawn(laser);
        }
        result
    }

    /// Flat damage to units in a box that pass `predicate`, then `on_hit` for each.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_filtered_damage<P, H>(
        &mut self,
        team: Option<Team>,
        x: f32,
        y: f32,
        size: f32,
        damage: f32,
        predicate: P,
        on_hit: H,
    ) -> SimResult<Vec<Entity>>
    where
        P: Fn(&UnitView) -> bool,
        H: FnMut(&mut hecs::World, Entity),
    {
        logged(
            "filtered damage",
            ops::apply_filtered_damage(&mut self.field, team, x, y, size, damage, predicate, on_hit),
        )
    }

    // --- Explosions ---

    /// Schedule a dynamic explosion's stages and emit its immediate effects.
    pub fn trigger_explosion(&mut self, explosion: &Explosion) -> SimResult<()> {
        logged(
            "explosion",
            orchestrator::trigger_explosion(
                &mut self.scheduler,
                &mut self.field.effects,
                &mut self.rng,
                explosion,
            ),
        )
    }

    /// Ignite `count` random cells within `range` of `(x, y)`.
    pub fn spawn_fires(&mut self, x: f32, y: f32, range: f32, count: u32) -> SimResult<u32> {
        logged(
            "spawn fires",
            orchestrator::spawn_fires(&mut self.field.grid, &mut self.rng, x, y, range, count),
        )
    }

    /// Execute one deferred event that came due.
    fn dispatch(&mut self, event: DeferredEvent) {
        match event {
            DeferredEvent::LightningArc {
                x,
                y,
                angle,
                length,
                damage,
                team,
            } => {
                let result = systems::lightning::discharge(
                    &mut self.field,
                    &mut self.rng,
                    x,
                    y,
                    angle,
                    length,
                    damage,
                    team,
                );
                if let Ok(hit) = logged("lightning", result) {
                    debug!(x, y, length, hits = hit.len(), "lightning discharged");
                }
            }
            DeferredEvent::FireBullet { x, y, angle } => {
                // Fire bullets harm only through the fires they start.
                world_setup::spawn_projectile(
                    &mut self.field,
                    ProjectileKind::Fireball,
                    None,
                    Position::new(x, y),
                    angle,
                    0.0,
                );
            }
            DeferredEvent::ShockwaveWave {
                x,
                y,
                radius,
                damage,
                smoke_x,
                smoke_y,
            } => {
                let result = ops::damage_everything(&mut self.field, x, y, radius, damage);
                if let Ok(report) = logged("shockwave", result) {
                    debug!(
                        x,
                        y,
                        radius,
                        units = report.units.len(),
                        tiles = report.tiles.len(),
                        "shockwave wave"
                    );
                }
                self.field.effects.push(EffectEvent::at(
                    EffectKind::BlockExplosionSmoke,
                    smoke_x,
                    smoke_y,
                ));
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, delta: f32) {
        // 1. Projectile ageing and fire bullet ignition
        systems::projectiles::run(&mut self.field, &mut self.rng, delta);
        // 2. Burning tiles
        if let Err(err) = systems::fires::run(&mut self.field, delta) {
            warn!(%err, "fire system failed");
        }
        // 3. Status effects
        systems::status::run(&mut self.field, delta, &mut self.despawn_buffer);
        // 4. Movement integration
        systems::movement::run(&mut self.field, delta);
        // 5. Cleanup (dead, expired, destroyed)
        systems::cleanup::run(&mut self.field, &mut self.despawn_buffer);
    }

    /// The projectile component of a live instigator, if any.
    pub fn projectile(&self, entity: Entity) -> Option<Projectile> {
        self.field.world.get::<&Projectile>(entity).ok().map(|p| *p)
    }
}

fn sanitize_time_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(0.0, 4.0)
    } else {
        1.0
    }
}

/// Log a rejected operation at the boundary and pass the result through.
fn logged<T>(operation: &'static str, result: SimResult<T>) -> SimResult<T> {
    if let Err(err) = &result {
        warn!(operation, %err, "rejected");
    }
    result
}
