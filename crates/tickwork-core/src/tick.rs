//! Tick cycle: the loop body that drives every live action.
//!
//! Each tick runs two phases:
//!
//! 1. **World Wake** -- advance the clock and run the deferred world
//!    mutations (respawns) due at the new tick.
//! 2. **Actions** -- invoke every actor's live run once and release the
//!    runs that completed or were interrupted.
//!
//! Player intents arrive between ticks through [`crate::events::dispatch`].

use tickwork_actions::{CraftingConfig, WoodcuttingConfig};
use tracing::{debug, info};

use crate::clock::{ClockError, TickClock};
use crate::config::EngineConfig;
use crate::host::MemoryHost;
use crate::scheduler::{ActionScheduler, FinishedRun};

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Deferred world mutations applied during World Wake.
    pub restored: usize,
    /// Runs invoked.
    pub advanced: usize,
    /// Runs still live after the tick.
    pub active: usize,
    /// Runs released this tick.
    pub finished: Vec<FinishedRun>,
}

/// The mutable engine state passed through the tick cycle.
#[derive(Debug)]
pub struct EngineState {
    /// The tick clock.
    pub clock: TickClock,
    /// Per-actor action slots.
    pub scheduler: ActionScheduler,
    /// Players and the world.
    pub host: MemoryHost,
    /// Woodcutting tuning used when building runs.
    pub woodcutting: WoodcuttingConfig,
    /// Crafting tuning used when building runs.
    pub crafting: CraftingConfig,
}

impl EngineState {
    /// A fresh engine at tick 0 with an empty world.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] for an invalid tick interval.
    pub fn new(config: &EngineConfig) -> Result<Self, ClockError> {
        Ok(Self {
            clock: TickClock::new(&config.world)?,
            scheduler: ActionScheduler::new(),
            host: MemoryHost::from_config(config),
            woodcutting: config.woodcutting.clone(),
            crafting: config.crafting.clone(),
        })
    }
}

/// Execute one complete tick.
pub fn run_tick(state: &mut EngineState) -> Result<TickSummary, TickError> {
    // --- Phase 1: World Wake ---
    let tick = state.clock.advance()?;

    // --- Phase 2: Actions ---
    let activity = state.scheduler.run_tick(&mut state.host, tick);

    if activity.restored > 0 {
        debug!(tick, restored = activity.restored, "deferred world mutations applied");
    }
    for finished in &activity.finished {
        info!(
            tick,
            actor = %finished.actor,
            run = %finished.run,
            action = finished.action,
            grants = finished.grants,
            outcome = ?finished.outcome,
            "action released"
        );
    }

    Ok(TickSummary {
        tick,
        restored: activity.restored,
        advanced: activity.advanced,
        active: state.scheduler.len(),
        finished: activity.finished,
    })
}
