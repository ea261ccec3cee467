//! Error types for the tickwork-actions crate.
//!
//! Nothing in the action engine panics. Inventory and skill operations
//! return typed errors; a running action folds every failure into an
//! [`ActionError`] that ends the run with an optional message for the actor.

use tickwork_types::{ItemId, ObjectId, RejectionReason};
use tickwork_world::WorldError;

/// Errors raised by [`Inventory`](crate::inventory::Inventory) operations.
///
/// A failed operation leaves the inventory unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// Attempted to remove more of an item than is held.
    #[error("insufficient items: wanted {requested} of {item} but only have {available}")]
    InsufficientItems {
        /// The item being removed.
        item: ItemId,
        /// Total amount requested across the batch.
        requested: u32,
        /// Amount actually held.
        available: u32,
    },

    /// The items do not fit in the free slots.
    #[error("no capacity: need {needed} slots but only {free} are free")]
    NoCapacity {
        /// Slots the batch would occupy after the change.
        needed: u32,
        /// Slots available.
        free: u32,
    },

    /// An item count overflowed.
    #[error("arithmetic overflow in inventory computation: {context}")]
    ArithmeticOverflow {
        /// What was being computed.
        context: String,
    },
}

impl InventoryError {
    /// The transaction-level rejection this error corresponds to.
    pub const fn rejection(&self) -> RejectionReason {
        match self {
            Self::InsufficientItems { .. } => RejectionReason::InsufficientInput,
            Self::NoCapacity { .. } | Self::ArithmeticOverflow { .. } => {
                RejectionReason::OutputFull
            }
        }
    }
}

/// Errors raised by the skill table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    /// A level outside `1..=MAX_LEVEL` was requested.
    #[error("invalid skill level {0}")]
    InvalidLevel(u8),
}

/// Why a run stopped early.
///
/// Every variant is local to one actor's run and non-fatal to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// A requirement check failed: level too low, tool missing, target gone.
    #[error("precondition failed: {}", message.as_deref().unwrap_or("(silent)"))]
    Precondition {
        /// Line shown to the actor; `None` stops silently.
        message: Option<String>,
    },

    /// The inventory cannot take the output, or lacks the input.
    #[error("capacity failure ({reason:?}): {message}")]
    Capacity {
        /// Which side of the delta failed.
        reason: RejectionReason,
        /// Line shown to the actor.
        message: String,
    },

    /// The inventory refused a delta that had passed its pre-check.
    #[error("inventory transaction rejected ({reason:?})")]
    TransactionRejected {
        /// Which side of the delta failed.
        reason: RejectionReason,
    },
}

impl ActionError {
    /// The line to show the actor, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Precondition { message } => message.as_deref(),
            Self::Capacity { message, .. } => Some(message),
            Self::TransactionRejected { .. } => None,
        }
    }
}

/// Errors raised while building an action from catalog data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// The clicked object is not a known tree.
    #[error("object {object} is not a tree")]
    UnknownTree {
        /// The clicked object.
        object: ObjectId,
    },

    /// The item cannot be spun.
    #[error("item {item} is not a spinnable textile")]
    UnknownTextile {
        /// The offered item.
        item: ItemId,
    },

    /// A resource definition was rejected.
    #[error("invalid resource definition: {0}")]
    World(#[from] WorldError),
}
