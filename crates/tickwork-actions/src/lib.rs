//! Timed gathering and production actions for the tickwork engine.
//!
//! The heart of this crate is [`ActionRun`], a resumable per-tick state
//! machine that drives any [`TimedAction`]: it checks requirements, counts
//! down randomized delays, applies inventory deltas atomically, grants
//! experience, rolls depletion and sequences animation and sound cues. The
//! host invokes it once per tick and reads back an
//! [`ActionSignal`](tickwork_types::ActionSignal).
//!
//! # Modules
//!
//! - [`config`] -- Run policies and per-skill tuning sections
//! - [`context`] -- [`ActionContext`], the capabilities borrowed for one invocation
//! - [`crafting`] -- Textile spinning
//! - [`emote`] -- Emote button bindings
//! - [`engine`] -- [`TimedAction`], [`ActionRun`] and [`ScheduledAction`]
//! - [`error`] -- Error types for inventory, skills, runs and content
//! - [`inventory`] -- [`Inventory`] capability and the [`ItemContainer`] reference
//! - [`make_item`] -- Make-item amount selection
//! - [`presentation`] -- [`Presentation`] capability, cue log and sub-timers
//! - [`requirement`] -- Requirement checks evaluated every invocation
//! - [`skills`] -- Experience and the 99-level curve
//! - [`timing`] -- Harvest delay computation
//! - [`transaction`] -- Atomic [`InventoryDelta`]s
//! - [`woodcutting`] -- Trees, axes, nests and [`CutTree`]

pub mod config;
pub mod context;
pub mod crafting;
pub mod emote;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod make_item;
pub mod presentation;
pub mod requirement;
pub mod skills;
pub mod timing;
pub mod transaction;
pub mod woodcutting;

pub use config::{
    ActionPolicy, CraftingConfig, FullInventoryPolicy, IterationBudget, IterationRange,
    WoodcuttingConfig,
};
pub use context::ActionContext;
pub use crafting::{SpinTextile, Textile};
pub use emote::{Emote, EmoteBindings};
pub use engine::{
    ActionRun, CompletionReason, InterruptReason, RunOutcome, ScheduledAction, TimedAction,
};
pub use error::{ActionError, ContentError, InventoryError, SkillError};
pub use inventory::{Inventory, ItemContainer};
pub use make_item::MakeAmount;
pub use presentation::{Cue, CueLog, Echo, Presentation, SubTimers, Swing};
pub use requirement::{RequirementCheck, Unmet};
pub use skills::SkillSet;
pub use transaction::InventoryDelta;
pub use woodcutting::{Axe, CutTree, Tree};
