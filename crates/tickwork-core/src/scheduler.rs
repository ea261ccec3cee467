//! Per-actor action slots.
//!
//! Each actor has at most one live run. Submitting a new run cancels the
//! current one with [`CancelReason::Replaced`]. Every tick the scheduler
//! first lets the host run its deferred world mutations, then invokes each
//! slot once and frees the slots whose run reached a terminal phase.
//!
//! Slots are visited in actor id order. Nothing in the engine relies on
//! that order; shared world objects are protected by generation checks.

use std::collections::BTreeMap;

use tickwork_actions::{RunOutcome, ScheduledAction};
use tickwork_types::{ActorId, CancelReason, RunId};
use tracing::{debug, warn};

use crate::host::ActionHost;

/// Errors returned by scheduler operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// The host has no such actor.
    #[error("actor {actor} is not known to the host")]
    UnknownActor {
        /// The actor.
        actor: ActorId,
    },

    /// The actor has no live run to cancel.
    #[error("actor {actor} has no active action")]
    NoActiveRun {
        /// The actor.
        actor: ActorId,
    },
}

/// A run that left its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRun {
    /// The run id.
    pub run: RunId,
    /// The acting player.
    pub actor: ActorId,
    /// Action name.
    pub action: &'static str,
    /// Successful ticks it produced.
    pub grants: u32,
    /// How it ended. `None` when the actor vanished mid-run.
    pub outcome: Option<RunOutcome>,
}

impl FinishedRun {
    fn of(run: &dyn ScheduledAction) -> Self {
        Self {
            run: run.id(),
            actor: run.actor(),
            action: run.name(),
            grants: run.grants(),
            outcome: run.outcome().cloned(),
        }
    }
}

/// What one scheduler tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickActivity {
    /// Deferred world mutations that ran before any action.
    pub restored: usize,
    /// Runs invoked this tick.
    pub advanced: usize,
    /// Runs that left their slot this tick.
    pub finished: Vec<FinishedRun>,
}

/// Actor id to its single live run.
#[derive(Default)]
pub struct ActionScheduler {
    slots: BTreeMap<ActorId, Box<dyn ScheduledAction>>,
}

impl core::fmt::Debug for ActionScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionScheduler")
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl ActionScheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no actor has a live run.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The live run of `actor`, if any.
    pub fn active(&self, actor: ActorId) -> Option<&dyn ScheduledAction> {
        self.slots.get(&actor).map(Box::as_ref)
    }

    /// Place `run` in its actor's slot. A run already there is cancelled
    /// with [`CancelReason::Replaced`] and returned.
    pub fn submit(
        &mut self,
        host: &mut dyn ActionHost,
        tick: u64,
        run: Box<dyn ScheduledAction>,
    ) -> Result<Option<FinishedRun>, SchedulerError> {
        let actor = run.actor();
        if !host.knows(actor) {
            return Err(SchedulerError::UnknownActor { actor });
        }
        let replaced = self.slots.remove(&actor).map(|mut old| {
            host.cancel(tick, old.as_mut(), CancelReason::Replaced);
            FinishedRun::of(old.as_ref())
        });
        debug!(tick, %actor, run = %run.id(), action = run.name(), "action submitted");
        self.slots.insert(actor, run);
        Ok(replaced)
    }

    /// Cancel the live run of `actor` and free its slot.
    pub fn cancel(
        &mut self,
        host: &mut dyn ActionHost,
        tick: u64,
        actor: ActorId,
        reason: CancelReason,
    ) -> Result<FinishedRun, SchedulerError> {
        let mut run = self
            .slots
            .remove(&actor)
            .ok_or(SchedulerError::NoActiveRun { actor })?;
        host.cancel(tick, run.as_mut(), reason);
        Ok(FinishedRun::of(run.as_ref()))
    }

    /// Run one tick: drain the host's deferred mutations, then invoke every
    /// slot once.
    pub fn run_tick(&mut self, host: &mut dyn ActionHost, tick: u64) -> TickActivity {
        let restored = host.begin_tick(tick);
        let mut advanced: usize = 0;
        let mut released = Vec::new();

        for (actor, run) in &mut self.slots {
            match host.advance(tick, run.as_mut()) {
                Some(signal) => {
                    advanced = advanced.saturating_add(1);
                    if signal.is_terminal() {
                        released.push(*actor);
                    }
                }
                None => {
                    warn!(
                        tick,
                        %actor,
                        run = %run.id(),
                        "actor left the host; dropping its action"
                    );
                    released.push(*actor);
                }
            }
        }

        let finished = released
            .into_iter()
            .filter_map(|actor| self.slots.remove(&actor))
            .map(|run| FinishedRun::of(run.as_ref()))
            .collect();

        TickActivity {
            restored,
            advanced,
            finished,
        }
    }
}
