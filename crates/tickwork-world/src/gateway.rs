//! World mutations issued by actions.
//!
//! [`WorldMutationGateway`] wraps a [`WorldCapability`] and offers the three
//! compound operations an action needs: remove-and-replace, schedule a
//! respawn, and spawn a bonus item. Resource depletion combines the first
//! two so that the respawn is only ever scheduled by the caller that
//! actually removed the object.

use tickwork_types::{ActorId, ItemStack, ObjectId, Position, WorldObjectRef};
use tracing::debug;

use crate::capability::{ScheduledMutation, WorldCapability};

/// Result of trying to remove a world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// This caller removed the object.
    Removed {
        /// The replacement placed in its spot, if one was requested.
        replacement: Option<WorldObjectRef>,
    },
    /// The object was already gone (depleted by someone else, or replaced).
    AlreadyGone,
}

impl RemovalOutcome {
    /// Whether this caller performed the removal.
    pub const fn removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}

/// An action's handle onto the world for one invocation.
pub struct WorldMutationGateway<'w> {
    world: &'w mut dyn WorldCapability,
}

impl<'w> WorldMutationGateway<'w> {
    /// Wrap the host world.
    pub fn new(world: &'w mut dyn WorldCapability) -> Self {
        Self { world }
    }

    /// Remove `object` and, if `replacement` is given, place it at the same
    /// tile, layer and orientation.
    ///
    /// Nothing is placed when the object was already gone.
    pub fn remove_and_replace(
        &mut self,
        object: &WorldObjectRef,
        replacement: Option<ObjectId>,
    ) -> RemovalOutcome {
        if !self.world.remove_object(object) {
            debug!(object = %object.id, position = %object.position, "object already gone");
            return RemovalOutcome::AlreadyGone;
        }
        let replacement = replacement.map(|id| {
            self.world
                .add_object(id, object.position, object.object_type, object.direction)
        });
        RemovalOutcome::Removed { replacement }
    }

    /// Restore `object` in `delay_ticks` ticks, whatever happens to the actor
    /// in the meantime.
    pub fn schedule_respawn(&mut self, object: &WorldObjectRef, delay_ticks: u32) {
        debug!(
            object = %object.id,
            position = %object.position,
            delay_ticks,
            "respawn scheduled"
        );
        self.world
            .schedule_once(delay_ticks, ScheduledMutation::restore(object));
    }

    /// Deplete a resource object: remove it, place `replacement`, and
    /// schedule the original's return.
    ///
    /// The respawn is scheduled only when this call removed the object, so
    /// two actors depleting the same tree on the same tick produce exactly
    /// one stump and one respawn.
    pub fn deplete(
        &mut self,
        object: &WorldObjectRef,
        replacement: Option<ObjectId>,
        respawn_delay_ticks: u32,
    ) -> RemovalOutcome {
        let outcome = self.remove_and_replace(object, replacement);
        if outcome.removed() {
            self.schedule_respawn(object, respawn_delay_ticks);
        }
        outcome
    }

    /// Drop a bonus item at `position`.
    pub fn spawn_bonus(&mut self, item: ItemStack, position: Position, owner: Option<ActorId>) {
        self.world.add_ground_item(item, position, owner);
    }

    /// Whether `object` still refers to the live occupant of its tile.
    pub fn is_live(&self, object: &WorldObjectRef) -> bool {
        self.world.is_live(object)
    }
}
