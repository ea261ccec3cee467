//! The narrow view of the host world that actions are allowed to use.
//!
//! The host owns the real object registry, ground items and timer wheel.
//! Actions only see [`WorldCapability`]. Deferred work is handed to the host
//! as data ([`ScheduledMutation`]) rather than closures, so a scheduled
//! respawn holds no reference to the actor or the action that caused it.

use serde::{Deserialize, Serialize};
use tickwork_types::{ActorId, Direction, ItemStack, ObjectId, ObjectType, Position, WorldObjectRef};

/// A world mutation the host runs later, on its own timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledMutation {
    /// Place an object back where a depleted one stood.
    RestoreObject {
        /// Object definition to place.
        id: ObjectId,
        /// Tile to place it on.
        position: Position,
        /// Layer to place it on.
        object_type: ObjectType,
        /// Orientation to place it with.
        direction: Direction,
    },
}

impl ScheduledMutation {
    /// A mutation that restores exactly the object `original` referred to.
    pub const fn restore(original: &WorldObjectRef) -> Self {
        Self::RestoreObject {
            id: original.id,
            position: original.position,
            object_type: original.object_type,
            direction: original.direction,
        }
    }
}

/// World operations exposed by the host.
///
/// Implementations must make [`remove_object`] atomic and idempotent: it
/// returns `true` for exactly one caller per placed object, and `false` for
/// stale references (the object was removed or replaced since the reference
/// was taken).
///
/// [`remove_object`]: WorldCapability::remove_object
pub trait WorldCapability {
    /// Whether `object` still refers to the live occupant of its tile.
    fn is_live(&self, object: &WorldObjectRef) -> bool;

    /// Remove `object` if it is still live. Returns whether it was removed.
    fn remove_object(&mut self, object: &WorldObjectRef) -> bool;

    /// Place a new object, replacing any occupant of the same tile and layer.
    fn add_object(
        &mut self,
        id: ObjectId,
        position: Position,
        object_type: ObjectType,
        direction: Direction,
    ) -> WorldObjectRef;

    /// Run `mutation` once, `delay_ticks` ticks from now.
    fn schedule_once(&mut self, delay_ticks: u32, mutation: ScheduledMutation);

    /// Drop an item on the ground, optionally visible only to `owner` at first.
    fn add_ground_item(&mut self, item: ItemStack, position: Position, owner: Option<ActorId>);
}
