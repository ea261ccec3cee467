//! Woodcutting: trees, axes, bird's nests and the cut-tree action.
//!
//! Every tree object id maps to a [`Tree`], and every tree kind lowers to a
//! [`ResourceNode`] tuned by [`WoodcuttingConfig`]. [`CutTree`] is the
//! [`TimedAction`] that chops one placed tree until it falls, the actor's
//! log budget runs out, or the backpack fills.

use rust_decimal::Decimal;
use tickwork_types::{
    AnimationId, ItemId, ItemStack, ObjectId, Skill, SoundCue, SoundId, WorldObjectRef,
};
use tickwork_world::{BonusEntry, BonusTable, OneIn, ResourceNode, WorldError};
use tracing::debug;

use crate::config::WoodcuttingConfig;
use crate::context::ActionContext;
use crate::engine::TimedAction;
use crate::error::ContentError;
use crate::inventory::Inventory;
use crate::presentation::{Echo, Swing};
use crate::requirement::{
    LevelAtLeast, RequirementCheck, TargetLive, Unmet, check_all, level_message,
};
use crate::timing::{DelayInputs, harvest_delay};
use crate::transaction::InventoryDelta;

// ---------------------------------------------------------------------------
// Sounds and messages
// ---------------------------------------------------------------------------

/// Played once when the actor starts cutting.
pub const CUT_TREE_1: SoundId = SoundId(2734);

/// Played with every swing and again as its echo.
pub const CUT_TREE_2: SoundId = SoundId(2735);

/// Played when a tree falls.
pub const TREE_FALLEN: SoundId = SoundId(2736);

/// Volume of the opening chop.
const START_VOLUME: u8 = 40;

/// Sent when no held axe is usable.
pub const NO_AXE_MESSAGE: &str =
    "You do not have an axe which you have the Woodcutting level to use.";

/// Sent when a nest drops.
pub const NEST_MESSAGE: &str = "A bird's nest drops to the floor!";

// ---------------------------------------------------------------------------
// Trees
// ---------------------------------------------------------------------------

/// A kind of cuttable tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tree {
    /// Regular tree, dead tree, evergreen.
    Normal,
    /// Oak tree.
    Oak,
    /// Willow tree.
    Willow,
    /// Maple tree.
    Maple,
    /// Yew tree.
    Yew,
    /// Magic tree.
    Magic,
}

impl Tree {
    /// Every tree kind, lowest level first.
    pub const ALL: [Self; 6] = [
        Self::Normal,
        Self::Oak,
        Self::Willow,
        Self::Maple,
        Self::Yew,
        Self::Magic,
    ];

    /// Woodcutting level needed to cut it.
    pub const fn level(self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Oak => 15,
            Self::Willow => 30,
            Self::Maple => 45,
            Self::Yew => 60,
            Self::Magic => 75,
        }
    }

    /// Experience per log, in tenths.
    const fn experience_tenths(self) -> i64 {
        match self {
            Self::Normal => 250,
            Self::Oak => 375,
            Self::Willow => 675,
            Self::Maple => 1000,
            Self::Yew => 1750,
            Self::Magic => 2500,
        }
    }

    /// Experience per log.
    pub fn experience(self) -> Decimal {
        Decimal::new(self.experience_tenths(), 1)
    }

    /// The logs it yields.
    pub const fn logs(self) -> ItemId {
        match self {
            Self::Normal => ItemId(1511),
            Self::Oak => ItemId(1521),
            Self::Willow => ItemId(1519),
            Self::Maple => ItemId(1517),
            Self::Yew => ItemId(1515),
            Self::Magic => ItemId(1513),
        }
    }

    /// Lowercase name of its logs.
    pub const fn logs_name(self) -> &'static str {
        match self {
            Self::Normal => "logs",
            Self::Oak => "oak logs",
            Self::Willow => "willow logs",
            Self::Maple => "maple logs",
            Self::Yew => "yew logs",
            Self::Magic => "magic logs",
        }
    }

    /// One-in-N chance that a log fells the tree.
    pub const fn depletion(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Oak | Self::Willow | Self::Maple => 8,
            Self::Yew => 10,
            Self::Magic => 12,
        }
    }

    /// Ticks a felled tree takes to grow back.
    pub const fn respawn_ticks(self) -> u32 {
        match self {
            Self::Normal => 50,
            Self::Oak => 100,
            Self::Willow => 120,
            Self::Maple => 150,
            Self::Yew => 250,
            Self::Magic => 400,
        }
    }

    /// How strongly the wood resists an axe.
    pub const fn resistance(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Oak => 2,
            Self::Willow => 4,
            Self::Maple => 6,
            Self::Yew => 8,
            Self::Magic => 10,
        }
    }

    /// The tree kind a placed object is, if any.
    pub const fn from_object(object: ObjectId) -> Option<Self> {
        match object.0 {
            1276 | 1278 => Some(Self::Normal),
            1281 => Some(Self::Oak),
            1308 => Some(Self::Willow),
            1307 => Some(Self::Maple),
            1309 => Some(Self::Yew),
            1306 => Some(Self::Magic),
            _ => None,
        }
    }

    /// The resource node for this tree under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] when the configured cut rate or nest chance is
    /// zero.
    pub fn node(self, config: &WoodcuttingConfig) -> Result<ResourceNode, WorldError> {
        Ok(ResourceNode {
            skill: Skill::Woodcutting,
            required_level: self.level(),
            experience: self.experience(),
            base_time_units: 1,
            resistance: self.resistance(),
            depletion_chance: OneIn::new(self.depletion())?,
            respawn_delay_ticks: self.respawn_ticks(),
            yield_item: self.logs(),
            bonus_table: Some(nest_table(config.nest_chance)?),
        }
        .with_base_time(config.base_cut_rate)?)
    }
}

/// The stump left behind when `object` is felled.
pub const fn stump_for(object: ObjectId) -> Option<ObjectId> {
    match object.0 {
        1276 | 1278 => Some(ObjectId(1342)),
        1281 => Some(ObjectId(1356)),
        1308 => Some(ObjectId(7399)),
        1307 => Some(ObjectId(1343)),
        1309 => Some(ObjectId(7402)),
        1306 => Some(ObjectId(7401)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// A woodcutting axe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axe {
    /// Bronze axe.
    Bronze,
    /// Iron axe.
    Iron,
    /// Steel axe.
    Steel,
    /// Black axe.
    Black,
    /// Mithril axe.
    Mithril,
    /// Adamant axe.
    Adamant,
    /// Rune axe.
    Rune,
    /// Dragon axe.
    Dragon,
}

impl Axe {
    /// Every axe, weakest first.
    pub const ALL: [Self; 8] = [
        Self::Bronze,
        Self::Iron,
        Self::Steel,
        Self::Black,
        Self::Mithril,
        Self::Adamant,
        Self::Rune,
        Self::Dragon,
    ];

    /// The axe item.
    pub const fn item(self) -> ItemId {
        match self {
            Self::Bronze => ItemId(1351),
            Self::Iron => ItemId(1349),
            Self::Steel => ItemId(1353),
            Self::Black => ItemId(1361),
            Self::Mithril => ItemId(1355),
            Self::Adamant => ItemId(1357),
            Self::Rune => ItemId(1359),
            Self::Dragon => ItemId(6739),
        }
    }

    /// Woodcutting level needed to use it.
    pub const fn level(self) -> u8 {
        match self {
            Self::Bronze | Self::Iron => 1,
            Self::Steel => 6,
            Self::Black => 11,
            Self::Mithril => 21,
            Self::Adamant => 31,
            Self::Rune => 41,
            Self::Dragon => 61,
        }
    }

    /// Strength subtracted from the cut delay.
    pub const fn strength(self) -> u32 {
        match self {
            Self::Bronze => 1,
            Self::Iron => 2,
            Self::Steel => 3,
            Self::Black => 4,
            Self::Mithril => 5,
            Self::Adamant => 6,
            Self::Rune => 7,
            Self::Dragon => 8,
        }
    }

    /// Swing animation.
    pub const fn animation(self) -> AnimationId {
        match self {
            Self::Bronze => AnimationId(879),
            Self::Iron => AnimationId(877),
            Self::Steel => AnimationId(875),
            Self::Black => AnimationId(873),
            Self::Mithril => AnimationId(871),
            Self::Adamant => AnimationId(869),
            Self::Rune => AnimationId(867),
            Self::Dragon => AnimationId(2846),
        }
    }

    /// The strongest axe the actor holds or wields and may use at `level`.
    pub fn best_usable(
        inventory: &dyn Inventory,
        wielded: Option<ItemId>,
        level: u8,
    ) -> Option<Self> {
        Self::ALL.iter().rev().copied().find(|axe| {
            axe.level() <= level && (wielded == Some(axe.item()) || inventory.contains(axe.item()))
        })
    }
}

// ---------------------------------------------------------------------------
// Nests
// ---------------------------------------------------------------------------

/// Bird's nests that can fall from a tree: three egg nests, seeds, ring.
pub const NESTS: [ItemId; 5] = [
    ItemId(5070),
    ItemId(5071),
    ItemId(5072),
    ItemId(5073),
    ItemId(5074),
];

/// The bird's nest bonus table, one nest in `chance` logs.
///
/// # Errors
///
/// Returns [`WorldError::InvalidOdds`] when `chance` is zero.
pub fn nest_table(chance: u32) -> Result<BonusTable, WorldError> {
    let entries = NESTS
        .iter()
        .map(|&item| BonusEntry { item, weight: 1 })
        .collect();
    BonusTable::new(OneIn::new(chance)?, entries)
}

// ---------------------------------------------------------------------------
// CutTree
// ---------------------------------------------------------------------------

/// Chop one placed tree.
#[derive(Debug, Clone)]
pub struct CutTree {
    tree: Tree,
    node: ResourceNode,
    target: WorldObjectRef,
    stump: Option<ObjectId>,
    echo_ticks: u32,
}

impl CutTree {
    /// Build the action for the tree `target` refers to.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownTree`] when the object is not a tree
    /// and [`ContentError::World`] when `config` yields an invalid node.
    pub fn new(target: WorldObjectRef, config: &WoodcuttingConfig) -> Result<Self, ContentError> {
        let tree =
            Tree::from_object(target.id).ok_or(ContentError::UnknownTree { object: target.id })?;
        Ok(Self {
            tree,
            node: tree.node(config)?,
            target,
            stump: stump_for(target.id),
            echo_ticks: config.sound_echo_ticks,
        })
    }

    /// The tree kind being cut.
    pub const fn tree(&self) -> Tree {
        self.tree
    }

    /// The placed tree being cut.
    pub const fn target(&self) -> &WorldObjectRef {
        &self.target
    }

    /// The resource node in use.
    pub const fn node(&self) -> &ResourceNode {
        &self.node
    }

    fn axe(ctx: &ActionContext<'_>) -> Option<Axe> {
        Axe::best_usable(&*ctx.inventory, ctx.wielded, ctx.level(Skill::Woodcutting))
    }

    fn cut_delay(&self, ctx: &mut ActionContext<'_>) -> u32 {
        let inputs = DelayInputs {
            base_time_units: self.node.base_time_units,
            tool_strength: Self::axe(ctx).map_or(0, Axe::strength),
            resistance: self.node.resistance,
            actor_level: ctx.level(Skill::Woodcutting),
            required_level: self.node.required_level,
        };
        harvest_delay(&inputs, &mut *ctx.rng)
    }
}

/// The actor holds or wields an axe their level allows.
struct HasUsableAxe;

impl RequirementCheck for HasUsableAxe {
    fn check(&self, ctx: &ActionContext<'_>) -> Result<(), Unmet> {
        if CutTree::axe(ctx).is_some() {
            Ok(())
        } else {
            Err(Unmet::with_message(NO_AXE_MESSAGE))
        }
    }
}

impl TimedAction for CutTree {
    fn name(&self) -> &'static str {
        "cut_tree"
    }

    fn skill(&self) -> Skill {
        Skill::Woodcutting
    }

    fn check(&self, ctx: &ActionContext<'_>) -> Result<(), Unmet> {
        let level = LevelAtLeast {
            skill: Skill::Woodcutting,
            level: self.node.required_level,
            message: level_message(Skill::Woodcutting, self.node.required_level, "cut this"),
        };
        check_all(&[&level, &TargetLive(self.target), &HasUsableAxe], ctx)
    }

    fn begin(&mut self, ctx: &mut ActionContext<'_>) -> u32 {
        ctx.presentation
            .play_sound(SoundCue::with_volume(CUT_TREE_1, START_VOLUME));
        ctx.presentation.send_message("You swing your axe at the tree.");
        self.cut_delay(ctx)
    }

    fn delta(&self, _ctx: &ActionContext<'_>) -> InventoryDelta {
        InventoryDelta::produce(vec![ItemStack::one(self.node.yield_item)])
    }

    fn experience(&self) -> Decimal {
        self.node.experience
    }

    /// A nest tick drops the nest instead of announcing the logs and earns
    /// no experience.
    fn on_grant(&mut self, ctx: &mut ActionContext<'_>) -> Decimal {
        if let Some(nest) = self.node.roll_bonus(&mut *ctx.rng) {
            let (feet, actor) = (ctx.position, ctx.actor);
            debug!(%actor, nest = %nest, position = %feet, "bird's nest dropped");
            ctx.presentation.send_message(NEST_MESSAGE);
            ctx.gateway().spawn_bonus(ItemStack::one(nest), feet, Some(actor));
            return Decimal::ZERO;
        }
        ctx.presentation
            .send_message(&format!("You get some {}.", self.tree.logs_name()));
        self.experience()
    }

    fn next_delay(&mut self, ctx: &mut ActionContext<'_>) -> u32 {
        self.cut_delay(ctx)
    }

    fn swing(&self, ctx: &ActionContext<'_>) -> Option<Swing> {
        let axe = Self::axe(ctx)?;
        let echo = (self.echo_ticks > 0).then_some(Echo {
            sound: SoundCue::new(CUT_TREE_2),
            after_ticks: self.echo_ticks,
        });
        Some(Swing {
            animation: axe.animation(),
            sound: Some(SoundCue::new(CUT_TREE_2)),
            echo,
        })
    }

    fn depletion_chance(&self) -> Option<OneIn> {
        Some(self.node.depletion_chance)
    }

    fn deplete(&mut self, ctx: &mut ActionContext<'_>) {
        let outcome = ctx
            .gateway()
            .deplete(&self.target, self.stump, self.node.respawn_delay_ticks);
        if outcome.removed() {
            ctx.presentation.play_sound(SoundCue::new(TREE_FALLEN));
        }
    }

    fn missing_input_message(&self) -> String {
        String::from(NO_AXE_MESSAGE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::inventory::ItemContainer;

    #[test]
    fn tree_objects_map_to_kinds_and_stumps() {
        assert_eq!(Tree::from_object(ObjectId(1276)), Some(Tree::Normal));
        assert_eq!(Tree::from_object(ObjectId(1281)), Some(Tree::Oak));
        assert_eq!(Tree::from_object(ObjectId(1)), None);
        assert_eq!(stump_for(ObjectId(1281)), Some(ObjectId(1356)));
        assert_eq!(stump_for(ObjectId(1)), None);
    }

    #[test]
    fn catalog_levels_ascend() {
        let levels: Vec<u8> = Tree::ALL.iter().copied().map(Tree::level).collect();
        assert!(levels.windows(2).all(|w| w.first() < w.get(1)));
        let strengths: Vec<u32> = Axe::ALL.iter().copied().map(Axe::strength).collect();
        assert!(strengths.windows(2).all(|w| w.first() < w.get(1)));
    }

    #[test]
    fn oak_node_uses_configured_rates() {
        let node = Tree::Oak.node(&WoodcuttingConfig::default()).unwrap();
        assert_eq!(node.experience, dec!(37.5));
        assert_eq!(node.base_time_units, 25);
        assert_eq!(node.depletion_chance.denominator(), 8);
        assert_eq!(node.bonus_table.map(|t| t.chance.denominator()), Some(256));
    }

    #[test]
    fn zero_cut_rate_is_rejected() {
        let config = WoodcuttingConfig {
            base_cut_rate: 0,
            ..WoodcuttingConfig::default()
        };
        assert_eq!(Tree::Normal.node(&config), Err(WorldError::ZeroBaseTime));
    }

    #[test]
    fn best_axe_respects_level_and_location() {
        let mut inv = ItemContainer::default();
        inv.add_all(&[ItemStack::one(Axe::Bronze.item()), ItemStack::one(Axe::Rune.item())])
            .unwrap();
        assert_eq!(Axe::best_usable(&inv, None, 1), Some(Axe::Bronze));
        assert_eq!(Axe::best_usable(&inv, None, 41), Some(Axe::Rune));
        assert_eq!(
            Axe::best_usable(&inv, Some(Axe::Dragon.item()), 61),
            Some(Axe::Dragon)
        );
        assert_eq!(Axe::best_usable(&ItemContainer::default(), None, 99), None);
    }

    #[test]
    fn nest_table_only_drops_nests() {
        let table = nest_table(1).unwrap();
        assert_eq!(table.entries().len(), NESTS.len());
        assert!(nest_table(0).is_err());
    }
}
