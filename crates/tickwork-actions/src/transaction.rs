//! Atomic inventory deltas.
//!
//! Each successful tick of a timed action exchanges a set of items with the
//! actor's inventory. The exchange is computed fresh per tick as an
//! [`InventoryDelta`], checked without side effects, then applied
//! all-or-nothing.

use serde::{Deserialize, Serialize};
use tickwork_types::{ItemStack, RejectionReason};
use tracing::warn;

use crate::inventory::Inventory;

/// Items one tick removes from and adds to the actor's inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDelta {
    /// Consumed inputs, in order.
    pub to_remove: Vec<ItemStack>,
    /// Produced outputs, in order.
    pub to_add: Vec<ItemStack>,
}

impl InventoryDelta {
    /// A delta that only produces items.
    pub const fn produce(to_add: Vec<ItemStack>) -> Self {
        Self {
            to_remove: Vec::new(),
            to_add,
        }
    }

    /// A delta that consumes `to_remove` and produces `to_add`.
    pub const fn exchange(to_remove: Vec<ItemStack>, to_add: Vec<ItemStack>) -> Self {
        Self { to_remove, to_add }
    }

    /// Whether the delta changes nothing.
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Diagnose whether `delta` could be applied right now.
///
/// Inputs are checked before outputs, so an actor lacking both sees the
/// missing-input reason.
pub fn check<I: Inventory + ?Sized>(
    inventory: &I,
    delta: &InventoryDelta,
) -> Result<(), RejectionReason> {
    if !inventory.contains_all(&delta.to_remove) {
        return Err(RejectionReason::InsufficientInput);
    }
    if !inventory.has_capacity_for_exchange(&delta.to_remove, &delta.to_add) {
        return Err(RejectionReason::OutputFull);
    }
    Ok(())
}

/// Whether `delta` could be applied right now. Never mutates.
pub fn can_apply<I: Inventory + ?Sized>(inventory: &I, delta: &InventoryDelta) -> bool {
    check(inventory, delta).is_ok()
}

/// Apply `delta` atomically.
///
/// Either every removal and addition happens or the inventory is left as it
/// was. If the additions fail after the removals succeeded, the removed
/// stacks are put back before returning.
pub fn apply<I: Inventory + ?Sized>(
    inventory: &mut I,
    delta: &InventoryDelta,
) -> Result<(), RejectionReason> {
    check(inventory, delta)?;
    inventory
        .remove_all(&delta.to_remove)
        .map_err(|e| e.rejection())?;
    if let Err(e) = inventory.add_all(&delta.to_add) {
        if let Err(restore) = inventory.add_all(&delta.to_remove) {
            warn!(error = %restore, "failed to restore consumed inputs");
        }
        return Err(e.rejection());
    }
    Ok(())
}
