//! Per-action-type tuning and run policies.
//!
//! The content configs ([`WoodcuttingConfig`], [`CraftingConfig`]) mirror the
//! `woodcutting` and `crafting` sections of `tickwork-config.yaml`. Every
//! field has a default so a partial or empty section still loads. Each
//! config lowers to an [`ActionPolicy`] that the run engine consumes.

use std::num::NonZeroU32;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a run does when its output no longer fits mid-run.
///
/// A run that cannot fit its very first output always interrupts, whatever
/// the policy: nothing has been granted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullInventoryPolicy {
    /// Treat it as a soft stop and complete normally.
    Complete,
    /// Stop the run as interrupted.
    Interrupt,
}

/// An inclusive range of successful iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRange {
    /// Fewest grants before the run stops on its own.
    pub min: u32,
    /// Most grants before the run stops on its own.
    pub max: u32,
}

/// How many successful ticks a run may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationBudget {
    /// Exactly this many.
    Fixed(u32),
    /// A uniform draw from the range, made once when the run is created.
    Range(IterationRange),
}

impl IterationBudget {
    /// Draw the concrete budget for one run. Never less than 1.
    pub fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            Self::Fixed(count) => count.max(1),
            Self::Range(range) => {
                let low = range.min.min(range.max).max(1);
                let high = range.min.max(range.max).max(low);
                rng.random_range(low..=high)
            }
        }
    }
}

/// Run-level behaviour for one action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPolicy {
    /// Successful-tick budget.
    pub iterations: IterationBudget,
    /// Mid-run full inventory handling.
    pub on_inventory_full: FullInventoryPolicy,
    /// Re-issue the swing every this many ticks while waiting, if set.
    pub swing_interval: Option<NonZeroU32>,
}

/// `woodcutting` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoodcuttingConfig {
    /// Base time units for every tree.
    #[serde(default = "default_base_cut_rate")]
    pub base_cut_rate: u32,

    /// Range the per-run log budget is drawn from.
    #[serde(default = "default_fail_rate")]
    pub fail_rate: IterationRange,

    /// One-in-N chance of a bird's nest per log.
    #[serde(default = "default_nest_chance")]
    pub nest_chance: u32,

    /// Ticks between repeated swing animations.
    #[serde(default = "default_swing_interval")]
    pub swing_interval: u32,

    /// Ticks between the swing and its echo sound.
    #[serde(default = "default_sound_echo_ticks")]
    pub sound_echo_ticks: u32,

    /// Mid-run full inventory handling.
    #[serde(default = "default_woodcutting_full")]
    pub on_inventory_full: FullInventoryPolicy,
}

impl Default for WoodcuttingConfig {
    fn default() -> Self {
        Self {
            base_cut_rate: default_base_cut_rate(),
            fail_rate: default_fail_rate(),
            nest_chance: default_nest_chance(),
            swing_interval: default_swing_interval(),
            sound_echo_ticks: default_sound_echo_ticks(),
            on_inventory_full: default_woodcutting_full(),
        }
    }
}

impl WoodcuttingConfig {
    /// The run policy for tree cutting.
    pub fn policy(&self) -> ActionPolicy {
        ActionPolicy {
            iterations: IterationBudget::Range(self.fail_rate),
            on_inventory_full: self.on_inventory_full,
            swing_interval: NonZeroU32::new(self.swing_interval),
        }
    }
}

/// `crafting` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingConfig {
    /// Ticks between products.
    #[serde(default = "default_crafting_delay")]
    pub delay: u32,

    /// Mid-run full inventory handling.
    #[serde(default = "default_crafting_full")]
    pub on_inventory_full: FullInventoryPolicy,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            delay: default_crafting_delay(),
            on_inventory_full: default_crafting_full(),
        }
    }
}

impl CraftingConfig {
    /// The run policy for making `amount` products.
    pub const fn policy(&self, amount: NonZeroU32) -> ActionPolicy {
        ActionPolicy {
            iterations: IterationBudget::Fixed(amount.get()),
            on_inventory_full: self.on_inventory_full,
            swing_interval: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_base_cut_rate() -> u32 {
    25
}

const fn default_fail_rate() -> IterationRange {
    IterationRange { min: 5, max: 50 }
}

const fn default_nest_chance() -> u32 {
    256
}

const fn default_swing_interval() -> u32 {
    6
}

const fn default_sound_echo_ticks() -> u32 {
    2
}

const fn default_woodcutting_full() -> FullInventoryPolicy {
    FullInventoryPolicy::Complete
}

const fn default_crafting_delay() -> u32 {
    2
}

const fn default_crafting_full() -> FullInventoryPolicy {
    FullInventoryPolicy::Interrupt
}
