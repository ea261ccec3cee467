//! Inventory capability and the reference slot container.
//!
//! The host owns the real inventory. Actions reach it through the
//! [`Inventory`] trait, whose batch operations are all-or-nothing: a failed
//! [`remove_all`](Inventory::remove_all) or [`add_all`](Inventory::add_all)
//! leaves the holdings untouched.
//!
//! [`ItemContainer`] is the in-memory implementation used by the reference
//! host and the tests. It models a fixed number of slots where each unit of
//! a non-stackable item takes a slot and every stackable item kind takes one
//! slot regardless of amount. All counts use checked arithmetic.

use std::collections::{BTreeMap, BTreeSet};

use tickwork_types::{ItemId, ItemStack};

use crate::error::InventoryError;

/// Default number of slots in a player's backpack.
pub const DEFAULT_CAPACITY: u32 = 28;

/// Holdings operations exposed by the host.
pub trait Inventory {
    /// How many units of `item` are held.
    fn count(&self, item: ItemId) -> u32;

    /// Whether the listed items fit in the current free space.
    fn has_capacity_for(&self, items: &[ItemStack]) -> bool;

    /// Whether `add` fits once `remove` has been taken out.
    ///
    /// The default ignores the space `remove` would free, which is never
    /// optimistic. Implementations that can compute it exactly should.
    fn has_capacity_for_exchange(&self, remove: &[ItemStack], add: &[ItemStack]) -> bool {
        let _ = remove;
        self.has_capacity_for(add)
    }

    /// Remove every listed stack, or nothing.
    fn remove_all(&mut self, items: &[ItemStack]) -> Result<(), InventoryError>;

    /// Add every listed stack, or nothing.
    fn add_all(&mut self, items: &[ItemStack]) -> Result<(), InventoryError>;

    /// Whether no slot is free.
    fn is_full(&self) -> bool;

    /// Whether every listed stack is held, summing repeated items.
    fn contains_all(&self, items: &[ItemStack]) -> bool {
        totals(items).is_some_and(|wanted| {
            wanted
                .iter()
                .all(|(item, amount)| self.count(*item) >= *amount)
        })
    }

    /// Whether at least one unit of `item` is held.
    fn contains(&self, item: ItemId) -> bool {
        self.count(item) > 0
    }
}

/// Sum a batch of stacks per item. `None` on overflow.
fn totals(items: &[ItemStack]) -> Option<BTreeMap<ItemId, u32>> {
    let mut totals: BTreeMap<ItemId, u32> = BTreeMap::new();
    for stack in items {
        let entry = totals.entry(stack.item).or_insert(0);
        *entry = entry.checked_add(stack.amount)?;
    }
    Some(totals)
}

/// A slot-bounded item container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContainer {
    /// Maximum number of occupied slots.
    capacity: u32,
    /// Units held per item; never contains zero entries.
    items: BTreeMap<ItemId, u32>,
    /// Items that share a single slot per kind.
    stackable: BTreeSet<ItemId>,
}

impl Default for ItemContainer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ItemContainer {
    /// An empty container with `capacity` slots and no stackable items.
    pub const fn new(capacity: u32) -> Self {
        Self {
            capacity,
            items: BTreeMap::new(),
            stackable: BTreeSet::new(),
        }
    }

    /// Mark `items` as stackable.
    #[must_use]
    pub fn with_stackable(mut self, items: impl IntoIterator<Item = ItemId>) -> Self {
        self.stackable.extend(items);
        self
    }

    /// Total slots.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Slots currently occupied.
    pub fn used_slots(&self) -> u32 {
        slots_used(&self.items, &self.stackable).unwrap_or(u32::MAX)
    }

    /// Slots currently free.
    pub fn free_slots(&self) -> u32 {
        self.capacity.saturating_sub(self.used_slots())
    }

    /// Snapshot of the holdings, item to units.
    pub const fn items(&self) -> &BTreeMap<ItemId, u32> {
        &self.items
    }

    /// Slots the container would occupy after removing `remove` and adding `add`.
    fn slots_after(
        &self,
        remove: &[ItemStack],
        add: &[ItemStack],
    ) -> Result<u32, InventoryError> {
        let mut projected = self.items.clone();
        subtract(&mut projected, remove)?;
        insert(&mut projected, add)?;
        slots_used(&projected, &self.stackable).ok_or_else(|| InventoryError::ArithmeticOverflow {
            context: String::from("slot count overflow"),
        })
    }
}

/// Slots taken by `items`. `None` on overflow.
fn slots_used(items: &BTreeMap<ItemId, u32>, stackable: &BTreeSet<ItemId>) -> Option<u32> {
    let mut used: u32 = 0;
    for (item, amount) in items {
        let slots = if stackable.contains(item) { 1 } else { *amount };
        used = used.checked_add(slots)?;
    }
    Some(used)
}

/// Remove `stacks` from `items`, or fail without touching it.
fn subtract(items: &mut BTreeMap<ItemId, u32>, stacks: &[ItemStack]) -> Result<(), InventoryError> {
    let wanted = totals(stacks).ok_or_else(|| InventoryError::ArithmeticOverflow {
        context: String::from("removal total overflow"),
    })?;
    for (item, requested) in &wanted {
        let available = items.get(item).copied().unwrap_or(0);
        if available < *requested {
            return Err(InventoryError::InsufficientItems {
                item: *item,
                requested: *requested,
                available,
            });
        }
    }
    for (item, requested) in wanted {
        let available = items.get(&item).copied().unwrap_or(0);
        let remaining = available.saturating_sub(requested);
        if remaining == 0 {
            items.remove(&item);
        } else {
            items.insert(item, remaining);
        }
    }
    Ok(())
}

/// Add `stacks` to `items`, or fail without touching it.
fn insert(items: &mut BTreeMap<ItemId, u32>, stacks: &[ItemStack]) -> Result<(), InventoryError> {
    let mut next = items.clone();
    for stack in stacks {
        if stack.amount == 0 {
            continue;
        }
        let entry = next.entry(stack.item).or_insert(0);
        *entry = entry
            .checked_add(stack.amount)
            .ok_or_else(|| InventoryError::ArithmeticOverflow {
                context: format!("item {} count overflow", stack.item),
            })?;
    }
    *items = next;
    Ok(())
}

impl Inventory for ItemContainer {
    fn count(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    fn has_capacity_for(&self, items: &[ItemStack]) -> bool {
        self.has_capacity_for_exchange(&[], items)
    }

    fn has_capacity_for_exchange(&self, remove: &[ItemStack], add: &[ItemStack]) -> bool {
        self.slots_after(remove, add)
            .is_ok_and(|needed| needed <= self.capacity)
    }

    fn remove_all(&mut self, items: &[ItemStack]) -> Result<(), InventoryError> {
        subtract(&mut self.items, items)
    }

    fn add_all(&mut self, items: &[ItemStack]) -> Result<(), InventoryError> {
        let needed = self.slots_after(&[], items)?;
        if needed > self.capacity {
            return Err(InventoryError::NoCapacity {
                needed,
                free: self.free_slots(),
            });
        }
        insert(&mut self.items, items)
    }

    fn is_full(&self) -> bool {
        self.used_slots() >= self.capacity
    }
}
