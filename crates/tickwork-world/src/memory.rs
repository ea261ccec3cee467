//! In-memory [`WorldCapability`] used by the reference host and tests.
//!
//! Objects are keyed by `(tile, layer)`. Every placement takes the next
//! value of a global generation counter, so a [`WorldObjectRef`] taken
//! before a removal can never match whatever is placed there afterwards.
//! Deferred mutations sit in a due-tick queue that the host drains with
//! [`MemoryWorld::advance_to`] at the start of each tick.

use std::collections::BTreeMap;

use tickwork_types::{
    ActorId, Direction, ItemStack, ObjectId, ObjectKey, ObjectType, Position, WorldObjectRef,
};
use tracing::debug;

use crate::capability::{ScheduledMutation, WorldCapability};

/// An item lying on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundItem {
    /// What was dropped.
    pub item: ItemStack,
    /// Where it lies.
    pub position: Position,
    /// Who may see it first, if anyone.
    pub owner: Option<ActorId>,
    /// Tick it was dropped on.
    pub dropped_at: u64,
}

/// The occupant of one object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlacedObject {
    id: ObjectId,
    direction: Direction,
    generation: u64,
}

/// A reference in-memory world.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorld {
    /// Last tick the world was advanced to.
    tick: u64,
    /// Generation handed to the next placement.
    next_generation: u64,
    /// Live objects by key.
    objects: BTreeMap<ObjectKey, PlacedObject>,
    /// Items on the ground, in drop order.
    ground_items: Vec<GroundItem>,
    /// Due tick to the mutations scheduled for it, in scheduling order.
    pending: BTreeMap<u64, Vec<ScheduledMutation>>,
}

impl MemoryWorld {
    /// An empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick the world was last advanced to.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// A reference to the live occupant of `key`.
    pub fn object_at(&self, key: &ObjectKey) -> Option<WorldObjectRef> {
        self.objects.get(key).map(|placed| WorldObjectRef {
            id: placed.id,
            position: key.position,
            object_type: key.object_type,
            direction: placed.direction,
            generation: placed.generation,
        })
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Items currently on the ground.
    pub fn ground_items(&self) -> &[GroundItem] {
        &self.ground_items
    }

    /// Number of mutations still waiting for their due tick.
    pub fn pending_mutations(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    /// The earliest tick with a pending mutation.
    pub fn next_due_tick(&self) -> Option<u64> {
        self.pending.keys().next().copied()
    }

    /// Move the world clock to `tick` and run every mutation due at or
    /// before it, in due order. Returns how many ran.
    ///
    /// Moving backwards only runs nothing; the clock never decreases.
    pub fn advance_to(&mut self, tick: u64) -> usize {
        self.tick = self.tick.max(tick);
        let mut applied: usize = 0;
        while let Some(entry) = self.pending.first_entry() {
            if *entry.key() > self.tick {
                break;
            }
            for mutation in entry.remove() {
                self.apply(mutation);
                applied = applied.saturating_add(1);
            }
        }
        applied
    }

    fn apply(&mut self, mutation: ScheduledMutation) {
        match mutation {
            ScheduledMutation::RestoreObject {
                id,
                position,
                object_type,
                direction,
            } => {
                debug!(object = %id, %position, tick = self.tick, "object restored");
                self.add_object(id, position, object_type, direction);
            }
        }
    }

    fn take_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.saturating_add(1);
        generation
    }
}

impl WorldCapability for MemoryWorld {
    fn is_live(&self, object: &WorldObjectRef) -> bool {
        self.objects
            .get(&object.key())
            .is_some_and(|placed| placed.generation == object.generation && placed.id == object.id)
    }

    fn remove_object(&mut self, object: &WorldObjectRef) -> bool {
        if !self.is_live(object) {
            return false;
        }
        self.objects.remove(&object.key()).is_some()
    }

    fn add_object(
        &mut self,
        id: ObjectId,
        position: Position,
        object_type: ObjectType,
        direction: Direction,
    ) -> WorldObjectRef {
        let generation = self.take_generation();
        let key = ObjectKey {
            position,
            object_type,
        };
        self.objects.insert(key, PlacedObject {
            id,
            direction,
            generation,
        });
        WorldObjectRef {
            id,
            position,
            object_type,
            direction,
            generation,
        }
    }

    fn schedule_once(&mut self, delay_ticks: u32, mutation: ScheduledMutation) {
        let due = self.tick.saturating_add(u64::from(delay_ticks));
        self.pending.entry(due).or_default().push(mutation);
    }

    fn add_ground_item(&mut self, item: ItemStack, position: Position, owner: Option<ActorId>) {
        self.ground_items.push(GroundItem {
            item,
            position,
            owner,
            dropped_at: self.tick,
        });
    }
}
