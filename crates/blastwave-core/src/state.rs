//! Tick report: what changed during one simulation tick.

use serde::{Deserialize, Serialize};

use crate::events::EffectEvent;
use crate::types::SimTime;

/// Summary produced by the engine after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub time: SimTime,
    /// Effects emitted since the previous report, in emission order.
    pub effects: Vec<EffectEvent>,
    pub units_alive: usize,
    pub structures_alive: usize,
    pub fires_burning: usize,
    /// Deferred events still waiting to fire.
    pub pending_events: usize,
}
