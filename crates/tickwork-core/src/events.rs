//! Player intents and the runs they start or stop.
//!
//! The host's event dispatcher turns clicks and movement into
//! [`ContentEvent`]s. [`dispatch`] resolves each one against the current
//! state: object options become [`CutTree`] runs, make-item buttons become
//! [`SpinTextile`] runs, emote buttons play immediately, and movement or
//! logout cancels whatever the actor was doing.

use tickwork_actions::{
    ActionRun, ContentError, CutTree, MakeAmount, ScheduledAction, SpinTextile, Textile,
};
use tickwork_types::{ActorId, ButtonId, CancelReason, ItemId, ObjectType, Position, RunId};
use tickwork_world::WorldError;
use tracing::debug;

use crate::scheduler::{FinishedRun, SchedulerError};
use crate::tick::EngineState;

/// Something a player did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEvent {
    /// The first option on a world object ("Chop down").
    ObjectAction {
        /// Who clicked.
        actor: ActorId,
        /// Object tile.
        position: Position,
        /// Object layer.
        object_type: ObjectType,
    },
    /// A make-item interface button, for the raw item the interface was
    /// opened with.
    MakeItem {
        /// Who clicked.
        actor: ActorId,
        /// The raw material.
        raw: ItemId,
        /// The amount button.
        button: ButtonId,
        /// The typed amount for the X button.
        amount: Option<u32>,
    },
    /// An emote tab button.
    Emote {
        /// Who clicked.
        actor: ActorId,
        /// The emote button.
        button: ButtonId,
    },
    /// The actor walked to a new tile.
    Moved {
        /// Who moved.
        actor: ActorId,
        /// Where to.
        to: Position,
    },
    /// The actor's session ended.
    Logout {
        /// Who left.
        actor: ActorId,
    },
}

/// What dispatching an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// A run was placed in the actor's slot.
    Submitted {
        /// The new run.
        run: RunId,
        /// The run it replaced, if any.
        replaced: Option<FinishedRun>,
    },
    /// The actor's run, if any, was cancelled.
    Cancelled(Option<FinishedRun>),
    /// An emote button was handled. `false` when it is not an emote.
    Emoted(bool),
}

/// Errors that stop an event from starting anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The actor is not connected.
    #[error("actor {actor} is not connected")]
    UnknownActor {
        /// The actor.
        actor: ActorId,
    },

    /// The clicked object could not be resolved.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The object or item has no action.
    #[error("content error: {source}")]
    Content {
        /// The underlying content error.
        #[from]
        source: ContentError,
    },

    /// The button is not on the make-item interface.
    #[error("button {button} is not a make-item amount")]
    UnknownButton {
        /// The button.
        button: ButtonId,
    },

    /// The actor holds none of the raw material.
    #[error("actor {actor} has no {raw} to make anything from")]
    NothingToMake {
        /// The actor.
        actor: ActorId,
        /// The raw material.
        raw: ItemId,
    },

    /// The scheduler refused the run.
    #[error("scheduler error: {source}")]
    Scheduler {
        /// The underlying scheduler error.
        #[from]
        source: SchedulerError,
    },
}

/// Resolve `event` against `state`.
pub fn dispatch(state: &mut EngineState, event: ContentEvent) -> Result<Dispatched, EventError> {
    debug!(tick = state.clock.tick(), ?event, "content event");
    match event {
        ContentEvent::ObjectAction {
            actor,
            position,
            object_type,
        } => {
            ensure_connected(state, actor)?;
            let target = state.host.target_at(position, object_type)?;
            let action = CutTree::new(target, &state.woodcutting)?;
            let policy = state.woodcutting.policy();
            let run = ActionRun::new(actor, action, policy, state.host.rng_mut());
            submit(state, Box::new(run))
        }
        ContentEvent::MakeItem {
            actor,
            raw,
            button,
            amount,
        } => {
            let textile = Textile::try_from(raw)?;
            let amount = MakeAmount::from_button(button, amount)
                .ok_or(EventError::UnknownButton { button })?;
            let player = state
                .host
                .player(actor)
                .ok_or(EventError::UnknownActor { actor })?;
            let (action, policy) =
                SpinTextile::plan(textile, amount, &player.inventory, &state.crafting)
                    .ok_or(EventError::NothingToMake { actor, raw })?;
            let run = ActionRun::new(actor, action, policy, state.host.rng_mut());
            submit(state, Box::new(run))
        }
        ContentEvent::Emote { actor, button } => {
            ensure_connected(state, actor)?;
            Ok(Dispatched::Emoted(state.host.perform_emote(actor, button)))
        }
        ContentEvent::Moved { actor, to } => {
            let player = state
                .host
                .player_mut(actor)
                .ok_or(EventError::UnknownActor { actor })?;
            player.position = to;
            Ok(Dispatched::Cancelled(cancel(state, actor, CancelReason::Movement)))
        }
        ContentEvent::Logout { actor } => {
            ensure_connected(state, actor)?;
            let cancelled = cancel(state, actor, CancelReason::Logout);
            state.host.leave(actor);
            Ok(Dispatched::Cancelled(cancelled))
        }
    }
}

fn ensure_connected(state: &EngineState, actor: ActorId) -> Result<(), EventError> {
    if state.host.player(actor).is_some() {
        Ok(())
    } else {
        Err(EventError::UnknownActor { actor })
    }
}

fn submit(
    state: &mut EngineState,
    run: Box<dyn ScheduledAction>,
) -> Result<Dispatched, EventError> {
    let id = run.id();
    let tick = state.clock.tick();
    let replaced = state.scheduler.submit(&mut state.host, tick, run)?;
    Ok(Dispatched::Submitted { run: id, replaced })
}

/// Cancel the actor's run if there is one.
fn cancel(state: &mut EngineState, actor: ActorId, reason: CancelReason) -> Option<FinishedRun> {
    let tick = state.clock.tick();
    state
        .scheduler
        .cancel(&mut state.host, tick, actor, reason)
        .ok()
}
