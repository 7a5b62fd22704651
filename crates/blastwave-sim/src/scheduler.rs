//! Deferred event scheduler.
//!
//! Holds value-typed pending events on a shared time axis (ticks). The engine
//! advances it once per tick and dispatches whatever came due. Events fire
//! exactly once, ordered by fire time and then by scheduling order.

use serde::{Deserialize, Serialize};

use blastwave_core::teams::Team;

/// Work deferred to a later tick. All randomness is resolved when scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeferredEvent {
    /// A branching lightning discharge starting at `(x, y)`.
    LightningArc {
        x: f32,
        y: f32,
        /// Initial heading (radians).
        angle: f32,
        /// Number of points along the arc.
        length: u32,
        damage: f32,
        team: Option<Team>,
    },
    /// Launch an incendiary bullet.
    FireBullet { x: f32, y: f32, angle: f32 },
    /// One expanding shockwave stage.
    ShockwaveWave {
        x: f32,
        y: f32,
        radius: f32,
        damage: f32,
        smoke_x: f32,
        smoke_y: f32,
    },
}

/// A scheduled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEvent {
    /// Absolute scheduler time at which the event fires.
    pub fire_at: f32,
    /// Scheduling order, breaks ties between equal fire times.
    pub sequence: u64,
    pub event: DeferredEvent,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: f32,
    next_sequence: u64,
    pending: Vec<PendingEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time.
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Run `event` after `delay` ticks. Negative or NaN delays fire on the next advance.
    pub fn schedule(&mut self, delay: f32, event: DeferredEvent) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.pending.push(PendingEvent {
            fire_at: self.now + delay,
            sequence: self.next_sequence,
            event,
        });
        self.next_sequence += 1;
    }

    /// Advance time by `delta` and return every event that came due, in firing order.
    pub fn advance(&mut self, delta: f32) -> Vec<DeferredEvent> {
        self.now += delta.max(0.0);
        let now = self.now;

        let (mut due, waiting): (Vec<PendingEvent>, Vec<PendingEvent>) =
            std::mem::take(&mut self.pending)
                .into_iter()
                .partition(|p| p.fire_at <= now);
        self.pending = waiting;

        due.sort_by(|a, b| {
            a.fire_at
                .total_cmp(&b.fire_at)
                .then(a.sequence.cmp(&b.sequence))
        });
        due.into_iter().map(|p| p.event).collect()
    }

    /// Events still waiting, in scheduling order.
    pub fn pending(&self) -> &[PendingEvent] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
