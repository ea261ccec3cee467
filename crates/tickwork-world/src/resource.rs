//! Resource node definitions and the probability rolls made against them.
//!
//! A [`ResourceNode`] is immutable data shared by every action that targets
//! the same kind of resource (every oak tree uses the oak node). It carries
//! the skill gate, the experience reward, the timing inputs for the cut/make
//! delay, and the odds that one successful harvest depletes the resource.
//!
//! Probabilities are expressed as "one in N" ([`OneIn`]) and rolled against
//! an injected random source so tests can seed them.

use std::num::NonZeroU32;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tickwork_types::{ItemId, Skill};

use crate::error::WorldError;

/// A probability of exactly `1 / N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OneIn(NonZeroU32);

impl OneIn {
    /// A roll that always succeeds.
    pub const ALWAYS: Self = Self(NonZeroU32::MIN);

    /// Build a one-in-`n` chance.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidOdds`] when `n` is zero.
    pub fn new(n: u32) -> Result<Self, WorldError> {
        NonZeroU32::new(n).map(Self).ok_or(WorldError::InvalidOdds(n))
    }

    /// The denominator `N`.
    pub const fn denominator(self) -> u32 {
        self.0.get()
    }

    /// Whether this chance is certain.
    pub const fn is_certain(self) -> bool {
        self.0.get() == 1
    }

    /// Roll the chance once.
    ///
    /// A certain chance never consumes randomness, which keeps seeded runs
    /// stable when a node is switched between certain and uncertain odds.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        if self.is_certain() {
            return true;
        }
        rng.random_range(0..self.0.get()) == 0
    }
}

impl TryFrom<u32> for OneIn {
    type Error = WorldError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<OneIn> for u32 {
    fn from(odds: OneIn) -> Self {
        odds.denominator()
    }
}

/// One weighted entry of a [`BonusTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEntry {
    /// The item dropped when this entry is picked.
    pub item: ItemId,
    /// Relative weight against the other entries.
    pub weight: u32,
}

/// Serialized form of a [`BonusTable`], validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BonusTableSpec {
    chance: OneIn,
    entries: Vec<BonusEntry>,
}

/// A rare extra drop that may occur on a successful harvest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BonusTableSpec", into = "BonusTableSpec")]
pub struct BonusTable {
    /// Chance that any bonus drops on a given harvest.
    pub chance: OneIn,
    /// Weighted candidates, picked once the chance succeeds.
    entries: Vec<BonusEntry>,
    /// Cached sum of weights; always greater than zero.
    total_weight: u32,
}

impl BonusTable {
    /// Build a bonus table.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyBonusTable`] if the weights sum to zero and
    /// [`WorldError::ArithmeticOverflow`] if they overflow `u32`.
    pub fn new(chance: OneIn, entries: Vec<BonusEntry>) -> Result<Self, WorldError> {
        let mut total_weight: u32 = 0;
        for entry in &entries {
            total_weight = total_weight
                .checked_add(entry.weight)
                .ok_or(WorldError::ArithmeticOverflow)?;
        }
        if total_weight == 0 {
            return Err(WorldError::EmptyBonusTable);
        }
        Ok(Self {
            chance,
            entries,
            total_weight,
        })
    }

    /// The weighted candidates.
    pub fn entries(&self) -> &[BonusEntry] {
        &self.entries
    }

    /// Roll the table: `None` most of the time, otherwise a weighted pick.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ItemId> {
        if !self.chance.roll(rng) {
            return None;
        }
        self.pick(rng.random_range(0..self.total_weight))
    }

    /// Select the entry covering `value` in `[0, total_weight)`.
    fn pick(&self, value: u32) -> Option<ItemId> {
        let mut cumulative: u32 = 0;
        for entry in &self.entries {
            cumulative = cumulative.saturating_add(entry.weight);
            if value < cumulative {
                return Some(entry.item);
            }
        }
        None
    }
}

impl TryFrom<BonusTableSpec> for BonusTable {
    type Error = WorldError;

    fn try_from(spec: BonusTableSpec) -> Result<Self, Self::Error> {
        Self::new(spec.chance, spec.entries)
    }
}

impl From<BonusTable> for BonusTableSpec {
    fn from(table: BonusTable) -> Self {
        Self {
            chance: table.chance,
            entries: table.entries,
        }
    }
}

/// Immutable description of a harvestable resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// The skill trained by harvesting this resource.
    pub skill: Skill,
    /// Minimum skill level to harvest.
    pub required_level: u8,
    /// Experience granted per successful harvest.
    pub experience: Decimal,
    /// Upper bound of the harvest delay, in ticks.
    pub base_time_units: u32,
    /// How strongly the resource resists the actor's tool.
    pub resistance: u32,
    /// Chance that one harvest depletes the resource.
    pub depletion_chance: OneIn,
    /// Ticks until a depleted resource is restored.
    pub respawn_delay_ticks: u32,
    /// Item granted per successful harvest.
    pub yield_item: ItemId,
    /// Optional rare extra drop.
    pub bonus_table: Option<BonusTable>,
}

impl ResourceNode {
    /// Return a copy with a different base time, used when the configured
    /// base rate differs from the catalog default.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZeroBaseTime`] when `base_time_units` is zero.
    pub fn with_base_time(&self, base_time_units: u32) -> Result<Self, WorldError> {
        if base_time_units == 0 {
            return Err(WorldError::ZeroBaseTime);
        }
        Ok(Self {
            base_time_units,
            ..self.clone()
        })
    }

    /// Roll whether one harvest depletes this resource.
    pub fn roll_depletion<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.depletion_chance.roll(rng)
    }

    /// Roll the bonus table, if any.
    pub fn roll_bonus<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ItemId> {
        self.bonus_table.as_ref().and_then(|table| table.roll(rng))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rust_decimal_macros::dec;

    use super::*;

    fn oak(depletion: u32) -> ResourceNode {
        ResourceNode {
            skill: Skill::Woodcutting,
            required_level: 15,
            experience: dec!(37.5),
            base_time_units: 25,
            resistance: 2,
            depletion_chance: OneIn::new(depletion).unwrap(),
            respawn_delay_ticks: 100,
            yield_item: ItemId(1521),
            bonus_table: None,
        }
    }

    #[test]
    fn zero_odds_rejected() {
        assert!(matches!(OneIn::new(0), Err(WorldError::InvalidOdds(0))));
    }

    #[test]
    fn certain_odds_always_roll_true() {
        let mut rng = SmallRng::seed_from_u64(1);
        let node = oak(1);
        for _ in 0..1000 {
            assert!(node.roll_depletion(&mut rng));
        }
    }

    #[test]
    fn depletion_rate_converges_to_one_in_n() {
        let mut rng = SmallRng::seed_from_u64(42);
        let node = oak(8);
        let trials = 80_000_u32;
        let mut depleted = 0_u32;
        for _ in 0..trials {
            if node.roll_depletion(&mut rng) {
                depleted = depleted.saturating_add(1);
            }
        }
        // Expected 10_000; allow a generous band.
        assert!((9_400..=10_600).contains(&depleted), "depleted {depleted}");
    }

    #[test]
    fn odds_serde_as_denominator() {
        let json = serde_json::to_string(&OneIn::new(256).unwrap()).unwrap();
        assert_eq!(json, "256");
        let bad: Result<OneIn, _> = serde_json::from_str("0");
        assert!(bad.is_err());
    }

    #[test]
    fn empty_bonus_table_rejected() {
        let result = BonusTable::new(OneIn::ALWAYS, vec![BonusEntry {
            item: ItemId(5070),
            weight: 0,
        }]);
        assert!(matches!(result, Err(WorldError::EmptyBonusTable)));
    }

    #[test]
    fn bonus_table_respects_weights() {
        let table = BonusTable::new(OneIn::ALWAYS, vec![
            BonusEntry {
                item: ItemId(1),
                weight: 3,
            },
            BonusEntry {
                item: ItemId(2),
                weight: 0,
            },
            BonusEntry {
                item: ItemId(3),
                weight: 1,
            },
        ])
        .unwrap();
        assert_eq!(table.pick(0), Some(ItemId(1)));
        assert_eq!(table.pick(2), Some(ItemId(1)));
        assert_eq!(table.pick(3), Some(ItemId(3)));

        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..500 {
            assert_ne!(table.roll(&mut rng), Some(ItemId(2)));
        }
    }

    #[test]
    fn with_base_time_rejects_zero() {
        let node = oak(8);
        assert!(node.with_base_time(0).is_err());
        assert_eq!(node.with_base_time(30).unwrap().base_time_units, 30);
    }
}
