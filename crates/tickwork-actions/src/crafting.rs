//! Textile spinning at a spinning wheel.
//!
//! Each product consumes one raw textile and yields one processed item.
//! The run length is the amount picked on the make-item interface, capped
//! by the raw textiles held when the run is planned.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use tickwork_types::{AnimationId, ItemId, ItemStack, Skill};

use crate::config::{ActionPolicy, CraftingConfig};
use crate::context::ActionContext;
use crate::engine::TimedAction;
use crate::error::ContentError;
use crate::inventory::Inventory;
use crate::make_item::MakeAmount;
use crate::requirement::{LevelAtLeast, RequirementCheck, Unmet, level_message};
use crate::transaction::InventoryDelta;

/// Spinning animation.
pub const SPIN_ANIMATION: AnimationId = AnimationId(894);

/// A spinnable material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Textile {
    /// Wool into a ball of wool.
    Wool,
    /// Flax into a bow string.
    Flax,
}

impl Textile {
    /// Every textile.
    pub const ALL: [Self; 2] = [Self::Wool, Self::Flax];

    /// The consumed item.
    pub const fn raw(self) -> ItemId {
        match self {
            Self::Wool => ItemId(1737),
            Self::Flax => ItemId(1779),
        }
    }

    /// The produced item.
    pub const fn processed(self) -> ItemId {
        match self {
            Self::Wool => ItemId(1759),
            Self::Flax => ItemId(1777),
        }
    }

    /// Lowercase name of the raw item.
    pub const fn raw_name(self) -> &'static str {
        match self {
            Self::Wool => "wool",
            Self::Flax => "flax",
        }
    }

    /// Product name with its article.
    pub const fn processed_name(self) -> &'static str {
        match self {
            Self::Wool => "a ball of wool",
            Self::Flax => "a bow string",
        }
    }

    /// Crafting level needed.
    pub const fn level(self) -> u8 {
        match self {
            Self::Wool => 1,
            Self::Flax => 10,
        }
    }

    /// Experience per product.
    pub fn experience(self) -> Decimal {
        match self {
            Self::Wool => Decimal::new(25, 1),
            Self::Flax => Decimal::from(15),
        }
    }

    /// The textile `item` is the raw material of.
    pub fn from_raw(item: ItemId) -> Option<Self> {
        Self::ALL.into_iter().find(|textile| textile.raw() == item)
    }
}

impl TryFrom<ItemId> for Textile {
    type Error = ContentError;

    fn try_from(item: ItemId) -> Result<Self, Self::Error> {
        Self::from_raw(item).ok_or(ContentError::UnknownTextile { item })
    }
}

/// Spin one textile repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTextile {
    textile: Textile,
    delay: u32,
}

impl SpinTextile {
    /// A spinning action using the configured delay.
    pub fn new(textile: Textile, config: &CraftingConfig) -> Self {
        Self {
            textile,
            delay: config.delay.max(1),
        }
    }

    /// Resolve a make-item request into an action and its policy.
    ///
    /// Returns `None` when the actor holds none of the raw textile.
    pub fn plan(
        textile: Textile,
        amount: MakeAmount,
        inventory: &dyn Inventory,
        config: &CraftingConfig,
    ) -> Option<(Self, ActionPolicy)> {
        let count: NonZeroU32 = amount.resolve(inventory.count(textile.raw()))?;
        Some((Self::new(textile, config), config.policy(count)))
    }

    /// The textile being spun.
    pub const fn textile(&self) -> Textile {
        self.textile
    }
}

impl TimedAction for SpinTextile {
    fn name(&self) -> &'static str {
        "spin_textile"
    }

    fn skill(&self) -> Skill {
        Skill::Crafting
    }

    fn check(&self, ctx: &ActionContext<'_>) -> Result<(), Unmet> {
        LevelAtLeast {
            skill: Skill::Crafting,
            level: self.textile.level(),
            message: level_message(Skill::Crafting, self.textile.level(), "make this"),
        }
        .check(ctx)
    }

    fn begin(&mut self, _ctx: &mut ActionContext<'_>) -> u32 {
        1
    }

    fn delta(&self, _ctx: &ActionContext<'_>) -> InventoryDelta {
        InventoryDelta::exchange(
            vec![ItemStack::one(self.textile.raw())],
            vec![ItemStack::one(self.textile.processed())],
        )
    }

    fn experience(&self) -> Decimal {
        self.textile.experience()
    }

    fn on_grant(&mut self, ctx: &mut ActionContext<'_>) -> Decimal {
        ctx.presentation.play_animation(SPIN_ANIMATION);
        ctx.presentation
            .send_message(&format!("You make {}.", self.textile.processed_name()));
        self.experience()
    }

    fn next_delay(&mut self, _ctx: &mut ActionContext<'_>) -> u32 {
        self.delay
    }

    fn missing_input_message(&self) -> String {
        format!("You have run out of {}.", self.textile.raw_name())
    }
}
