//! Everything an action may touch during one invocation.

use rand::RngCore;
use tickwork_types::{ActorId, ItemId, Position, Skill};
use tickwork_world::{WorldCapability, WorldMutationGateway};

use crate::inventory::Inventory;
use crate::presentation::Presentation;
use crate::skills::SkillSet;

/// Borrowed host capabilities for one actor on one tick.
///
/// The host builds a fresh context per invocation; nothing in it outlives
/// the call to [`advance`](crate::engine::ActionRun::advance).
pub struct ActionContext<'a> {
    /// Current game tick.
    pub tick: u64,
    /// The acting player.
    pub actor: ActorId,
    /// Tile the actor stands on.
    pub position: Position,
    /// Item in the actor's weapon slot.
    pub wielded: Option<ItemId>,
    /// The actor's experience.
    pub skills: &'a mut SkillSet,
    /// The actor's backpack.
    pub inventory: &'a mut dyn Inventory,
    /// The shared world.
    pub world: &'a mut dyn WorldCapability,
    /// Cue sink for this actor.
    pub presentation: &'a mut dyn Presentation,
    /// Random source for every draw the action makes.
    pub rng: &'a mut dyn RngCore,
}

impl ActionContext<'_> {
    /// Current level in `skill`.
    pub fn level(&self, skill: Skill) -> u8 {
        self.skills.level(skill)
    }

    /// A mutation gateway over the world for this invocation.
    pub fn gateway(&mut self) -> WorldMutationGateway<'_> {
        WorldMutationGateway::new(&mut *self.world)
    }
}

impl core::fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionContext")
            .field("tick", &self.tick)
            .field("actor", &self.actor)
            .field("position", &self.position)
            .field("wielded", &self.wielded)
            .finish_non_exhaustive()
    }
}
