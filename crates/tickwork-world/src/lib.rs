//! Resource nodes and world mutation for the tickwork action engine.
//!
//! This crate holds everything an action knows about the physical world:
//! what a harvestable resource is, how its odds are rolled, and the narrow
//! set of world operations an action may request from the host.
//!
//! # Modules
//!
//! - [`capability`] -- [`WorldCapability`], the host's world operations, and
//!   [`ScheduledMutation`], deferred world work expressed as data.
//! - [`error`] -- Error types for resource definitions and world mutation.
//! - [`gateway`] -- [`WorldMutationGateway`]: remove-and-replace, respawn
//!   scheduling, depletion and bonus drops.
//! - [`memory`] -- [`MemoryWorld`], a generation-checked in-memory world
//!   with a due-tick mutation queue.
//! - [`resource`] -- [`ResourceNode`], [`OneIn`] odds and [`BonusTable`]s.

pub mod capability;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod resource;

// Re-export primary types at crate root.
pub use capability::{ScheduledMutation, WorldCapability};
pub use error::WorldError;
pub use gateway::{RemovalOutcome, WorldMutationGateway};
pub use memory::{GroundItem, MemoryWorld};
pub use resource::{BonusEntry, BonusTable, OneIn, ResourceNode};
