//! Shared type definitions for the tickwork action engine.
//!
//! This crate is the single source of truth for the small value types that
//! cross the boundary between the action engine and the game-server host.
//!
//! # Modules
//!
//! - [`ids`] -- Session ids (UUID v7) and cache content ids
//! - [`enums`] -- Skills, object layers, orientations, action signals and phases
//! - [`structs`] -- Positions, item stacks, world object references, sound cues

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActionPhase, ActionSignal, CancelReason, Direction, ObjectType, RejectionReason, Skill,
};
pub use ids::{ActorId, AnimationId, ButtonId, ItemId, ObjectId, RunId, SoundId};
pub use structs::{ItemStack, MAX_PLANE, ObjectKey, Position, SoundCue, WorldObjectRef};
