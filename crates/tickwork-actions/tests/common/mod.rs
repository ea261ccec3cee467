//! Shared harness for the integration scenarios.

#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tickwork_actions::{
    ActionContext, ActionPolicy, ActionRun, CueLog, ItemContainer, SkillSet, TimedAction,
};
use tickwork_types::{ActionSignal, ActorId, CancelReason, ItemId, Position};
use tickwork_world::MemoryWorld;

/// One actor with its own capabilities, sharing nothing.
pub struct Actor {
    pub id: ActorId,
    pub position: Position,
    pub wielded: Option<ItemId>,
    pub skills: SkillSet,
    pub inventory: ItemContainer,
    pub log: CueLog,
}

impl Actor {
    pub fn new(position: Position) -> Self {
        Self {
            id: ActorId::new(),
            position,
            wielded: None,
            skills: SkillSet::new(),
            inventory: ItemContainer::default(),
            log: CueLog::new(),
        }
    }
}

/// A world plus a seeded random source.
pub struct Stage {
    pub world: MemoryWorld,
    pub rng: SmallRng,
}

impl Stage {
    pub fn new(seed: u64) -> Self {
        Self {
            world: MemoryWorld::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn start<A: TimedAction>(
        &mut self,
        actor: &Actor,
        action: A,
        policy: ActionPolicy,
    ) -> ActionRun<A> {
        ActionRun::new(actor.id, action, policy, &mut self.rng)
    }

    pub fn advance<A: TimedAction>(
        &mut self,
        actor: &mut Actor,
        run: &mut ActionRun<A>,
    ) -> ActionSignal {
        let mut ctx = ActionContext {
            tick: self.world.tick(),
            actor: actor.id,
            position: actor.position,
            wielded: actor.wielded,
            skills: &mut actor.skills,
            inventory: &mut actor.inventory,
            world: &mut self.world,
            presentation: &mut actor.log,
            rng: &mut self.rng,
        };
        run.advance(&mut ctx)
    }

    pub fn cancel<A: TimedAction>(
        &mut self,
        actor: &mut Actor,
        run: &mut ActionRun<A>,
        reason: CancelReason,
    ) {
        let mut ctx = ActionContext {
            tick: self.world.tick(),
            actor: actor.id,
            position: actor.position,
            wielded: actor.wielded,
            skills: &mut actor.skills,
            inventory: &mut actor.inventory,
            world: &mut self.world,
            presentation: &mut actor.log,
            rng: &mut self.rng,
        };
        run.cancel(&mut ctx, reason);
    }

    /// Advance until the run ends. Returns the final signal and how many
    /// invocations it took.
    pub fn drive<A: TimedAction>(
        &mut self,
        actor: &mut Actor,
        run: &mut ActionRun<A>,
    ) -> (ActionSignal, u32) {
        for invocation in 1..=100_000 {
            let signal = self.advance(actor, run);
            if signal.is_terminal() {
                return (signal, invocation);
            }
        }
        (ActionSignal::Continue, 100_000)
    }
}
